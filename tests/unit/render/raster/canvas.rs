use super::*;
use crate::foundation::config::FontConfig;
use crate::layout::plan::TextRole;

fn canvas(photo: Option<&[u8]>) -> Canvas<'_> {
    Canvas::new(FontBook::new(FontConfig::builtin_only()), photo)
}

fn px(img: &PreparedImage, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * img.width + x) * 4) as usize;
    let p = &img.rgba8_premul[i..i + 4];
    [p[0], p[1], p[2], p[3]]
}

fn solid_png(color: [u8; 4], w: u32, h: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, image::Rgba(color));
    crate::assets::decode::encode_png_rgba(&img).unwrap()
}

#[test]
fn px_box_maps_the_full_canvas() {
    let b = PxBox::from_inches(Rect::new(0.0, 0.0, 13.333, 7.5));
    assert_eq!(
        b,
        PxBox {
            x: 0,
            y: 0,
            w: 1920,
            h: 1080
        }
    );
}

#[test]
fn px_box_never_collapses_to_zero() {
    let b = PxBox::from_inches(Rect::new(1.0, 1.0, 1.0, 1.0));
    assert_eq!((b.w, b.h), (1, 1));
}

#[test]
fn diagonal_gradient_hits_both_stops_at_the_corners() {
    let start = Rgba8::rgb(10, 20, 30);
    let end = Rgba8::rgb(200, 100, 50);
    let img = diagonal_gradient(start, end, 16, 9);
    assert_eq!(px(&img, 0, 0), start.to_premul());
    assert_eq!(px(&img, 15, 8), end.to_premul());
    let mid = px(&img, 15, 0);
    assert!(mid[0] > start.r && mid[0] < end.r);
}

#[test]
fn fill_rect_covers_its_pixels() {
    let mut c = canvas(None);
    c.draw(&DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 13.333, 7.5),
        color: Rgba8::rgb(255, 0, 0),
    })
    .unwrap();
    let img = c.finish();
    assert_eq!(px(&img, 960, 540), [255, 0, 0, 255]);
    assert_eq!(px(&img, 0, 1079), [255, 0, 0, 255]);
}

#[test]
fn frame_leaves_the_inside_empty() {
    let mut c = canvas(None);
    c.draw(&DrawOp::FrameRect {
        rect: Rect::new(1.0, 1.0, 5.0, 5.0),
        stroke: 0.1,
        color: Rgba8::BLACK,
    })
    .unwrap();
    let img = c.finish();
    let b = PxBox::from_inches(Rect::new(1.0, 1.0, 5.0, 5.0));
    assert_eq!(px(&img, b.x as u32 + 2, b.y as u32 + 2)[3], 255);
    assert_eq!(px(&img, b.x as u32 + b.w / 2, b.y as u32 + b.h / 2)[3], 0);
}

#[test]
fn bitmap_text_stays_inside_its_box() {
    let rect = Rect::new(1.0, 1.0, 6.0, 2.0);
    let mut c = canvas(None);
    c.draw(&DrawOp::Text(TextBlock {
        role: TextRole::Headline,
        text: "HELLO WORLD".to_owned(),
        rect,
        size_pt: 24.0,
        bold: true,
        color: Rgba8::BLACK,
        align: TextAlign::Left,
        max_lines: 1,
    }))
    .unwrap();
    let img = c.finish();
    let b = PxBox::from_inches(rect);
    let mut inked = 0;
    for y in 0..img.height {
        for x in 0..img.width {
            if px(&img, x, y)[3] == 0 {
                continue;
            }
            inked += 1;
            let (xi, yi) = (x as i32, y as i32);
            assert!(xi >= b.x && xi < b.x + b.w as i32, "ink at x={x}");
            assert!(yi >= b.y && yi < b.y + b.h as i32, "ink at y={y}");
        }
    }
    assert!(inked > 0);
}

#[test]
fn circle_photo_masks_corners_and_keeps_the_center() {
    let photo = solid_png([0, 0, 255, 255], 40, 30);
    let rect = Rect::new(2.0, 2.0, 5.0, 5.0);
    let mut c = canvas(Some(&photo));
    c.draw(&DrawOp::CirclePhoto {
        rect,
        ring: 0.05,
        ring_color: Rgba8::rgb(255, 255, 0),
    })
    .unwrap();
    let img = c.finish();
    let b = PxBox::from_inches(rect);
    let side = b.w.min(b.h);
    let center = px(&img, b.x as u32 + side / 2, b.y as u32 + side / 2);
    assert_eq!(center, [0, 0, 255, 255]);
    assert_eq!(px(&img, b.x as u32 + 1, b.y as u32 + 1)[3], 0);
}

#[test]
fn photo_steps_without_a_photo_fail_to_decode() {
    let mut c = canvas(None);
    let err = c
        .draw(&DrawOp::FullBleedPhoto {
            overlay_max_alpha: 100,
        })
        .unwrap_err();
    assert!(matches!(err, SlideError::ImageDecode(_)));
}

#[test]
fn broken_photo_bytes_fail_to_decode() {
    let junk = [1u8, 2, 3, 4];
    let mut c = canvas(Some(&junk));
    let err = c
        .draw(&DrawOp::RectPhoto {
            rect: Rect::new(0.0, 0.0, 2.0, 2.0),
        })
        .unwrap_err();
    assert!(matches!(err, SlideError::ImageDecode(_)));
}
