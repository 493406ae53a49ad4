use super::*;
use crate::foundation::config::FontConfig;
use crate::layout::plan::{IconKind, TextRole, compile_slide_as};
use crate::layout::resolve::LayoutKind;
use crate::model::slide::SlideData;

fn photo_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(40, 20, image::Rgba([10, 120, 200, 255]));
    encode_png_rgba(&img).unwrap()
}

fn opts(family: &str) -> DocumentOpts {
    DocumentOpts::default()
        .with_font_family(family)
        .with_fonts(FontConfig::builtin_only())
}

fn text(text: &str, rect: Rect, size_pt: f64, max_lines: usize) -> DrawOp {
    DrawOp::Text(TextBlock {
        role: TextRole::Description,
        text: text.to_owned(),
        rect,
        size_pt,
        bold: false,
        color: Rgba8::WHITE,
        align: TextAlign::Left,
        max_lines,
    })
}

fn plan(ops: Vec<DrawOp>) -> SlidePlan {
    SlidePlan {
        layout: LayoutKind::TextOnly,
        ops,
    }
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(
        escape_xml(r#"<a & "b" 'c'>"#),
        "&lt;a &amp; &quot;b&quot; &apos;c&apos;&gt;"
    );
}

#[test]
fn alpha_maps_to_thousandths_of_a_percent() {
    assert_eq!(alpha_val(255), 100_000);
    assert_eq!(alpha_val(0), 0);
    assert_eq!(alpha_val(204), 80_000);
}

#[test]
fn text_box_carries_size_weight_color_and_font() {
    let p = plan(vec![DrawOp::Text(TextBlock {
        role: TextRole::Headline,
        text: "Ions & Atoms".to_owned(),
        rect: Rect::new(1.0, 1.0, 11.0, 2.0),
        size_pt: 44.0,
        bold: true,
        color: Rgba8::WHITE.with_alpha(204),
        align: TextAlign::Center,
        max_lines: 2,
    })]);
    let part = write_slide(&p, None, None, &opts("Helvetica")).unwrap();
    assert!(part.xml.contains(r#"sz="4400" b="1""#));
    assert!(part.xml.contains(r#"<a:srgbClr val="FFFFFF"><a:alpha val="80000"/></a:srgbClr>"#));
    assert!(part.xml.contains(r#"<a:latin typeface="Helvetica"/>"#));
    assert!(part.xml.contains(r#"algn="ctr""#));
    assert!(part.xml.contains(r#"wrap="square""#));
    assert!(part.xml.contains("<a:t>Ions &amp; Atoms</a:t>"));
    assert!(part.media.is_empty());
}

#[test]
fn gradient_runs_diagonally_between_two_stops() {
    let p = plan(vec![DrawOp::Gradient {
        rect: CANVAS.rect(),
        start: Rgba8::rgb(0x11, 0x22, 0x33),
        end: Rgba8::rgb(0x44, 0x55, 0x66),
    }]);
    let xml = write_slide(&p, None, None, &opts("F")).unwrap().xml;
    assert!(xml.contains(r#"<a:gs pos="0"><a:srgbClr val="112233"/></a:gs>"#));
    assert!(xml.contains(r#"<a:gs pos="100000"><a:srgbClr val="445566"/></a:gs>"#));
    assert!(xml.contains(r#"<a:lin ang="2700000" scaled="1"/>"#));
    assert!(xml.contains(r#"<a:off x="0" y="0"/><a:ext cx="12192000" cy="6858000"/>"#));
}

#[test]
fn rect_photo_is_cropped_with_src_rect() {
    let photo = photo_png();
    let p = plan(vec![DrawOp::RectPhoto {
        rect: Rect::new(0.0, 0.0, 4.0, 4.0),
    }]);
    let part = write_slide(&p, Some(&photo), Some("Lab bench"), &opts("F")).unwrap();
    // 40x20 into a square trims a quarter from each side.
    assert!(part.xml.contains(r#"<a:srcRect l="25000" t="0" r="25000" b="0"/>"#));
    assert!(part.xml.contains(r#"descr="Lab bench""#));
    assert!(part.xml.contains(r#"r:embed="rId2""#));
    assert_eq!(part.media.len(), 1);
    assert_eq!(part.media[0].name, "image1.png");
}

#[test]
fn circle_photo_sits_on_an_accent_ring() {
    let photo = photo_png();
    let p = plan(vec![DrawOp::CirclePhoto {
        rect: Rect::new(8.0, 1.0, 11.0, 4.0),
        ring: 0.08,
        ring_color: Rgba8::rgb(0xff, 0xaa, 0x00),
    }]);
    let xml = write_slide(&p, Some(&photo), None, &opts("F")).unwrap().xml;
    let ring = xml.find(r#"name="Photo Ring"#).unwrap();
    let pic = xml.find("<p:pic>").unwrap();
    assert!(ring < pic);
    assert_eq!(xml.matches(r#"prst="ellipse""#).count(), 2);
    assert!(xml.contains(r#"<a:srgbClr val="FFAA00"/>"#));
}

#[test]
fn full_bleed_photo_is_pre_blended_and_fills_the_slide() {
    let photo = photo_png();
    let p = plan(vec![DrawOp::FullBleedPhoto {
        overlay_max_alpha: 200,
    }]);
    let part = write_slide(&p, Some(&photo), None, &opts("F")).unwrap();
    assert!(part.xml.contains(r#"<a:ext cx="12192000" cy="6858000"/>"#));
    let img = decode_rgba(&part.media[0].bytes).unwrap();
    assert_eq!(img.dimensions(), (RASTER_WIDTH, RASTER_HEIGHT));
    let top = img.get_pixel(10, 0).0;
    let bottom = img.get_pixel(10, RASTER_HEIGHT - 1).0;
    assert_eq!(top[2], 200);
    assert!(bottom[2] < 60);
}

#[test]
fn icons_and_qr_become_png_pictures() {
    let p = plan(vec![
        DrawOp::Icon {
            kind: IconKind::Clock,
            rect: Rect::new(1.0, 1.0, 1.3, 1.3),
            color: Rgba8::BLACK,
        },
        DrawOp::Qr {
            url: "https://example.com/a?b=1&c=2".to_owned(),
            rect: Rect::new(11.0, 5.0, 12.5, 6.5),
        },
    ]);
    let part = write_slide(&p, None, None, &opts("F")).unwrap();
    assert_eq!(part.media.len(), 2);
    assert!(part.xml.contains(r#"r:embed="rId3""#));
    assert!(part.xml.contains("QR code: https://example.com/a?b=1&amp;c=2"));
    for m in &part.media {
        assert_eq!(&m.bytes[..4], b"\x89PNG");
    }
}

#[test]
fn frame_stays_inside_its_rect() {
    let p = plan(vec![DrawOp::FrameRect {
        rect: Rect::new(1.0, 1.0, 3.0, 3.0),
        stroke: 0.1,
        color: Rgba8::BLACK,
    }]);
    let xml = write_slide(&p, None, None, &opts("F")).unwrap().xml;
    let inner = rect_to_emu(Rect::new(1.05, 1.05, 2.95, 2.95));
    assert!(xml.contains(&format!(r#"<a:off x="{}" y="{}"/>"#, inner.x, inner.y)));
    assert!(xml.contains(&format!(r#"<a:ln w="{}">"#, len_to_emu(0.1))));
}

#[test]
fn shape_ids_are_unique_across_a_full_slide() {
    let slide = SlideData::builder("Headline", "Description")
        .caption("Cap")
        .publication_link("https://example.com")
        .event_date("Jan 1")
        .build();
    let p = compile_slide_as(&slide, LayoutKind::SplitTextPrimary);
    let xml = write_slide(&p, None, None, &opts("F")).unwrap().xml;
    let mut ids: Vec<&str> = xml
        .split(r#"<p:cNvPr id=""#)
        .skip(1)
        .map(|s| &s[..s.find('"').unwrap()])
        .collect();
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n);
}

#[test]
fn missing_photo_is_a_decode_error() {
    let p = plan(vec![DrawOp::RectPhoto {
        rect: Rect::new(0.0, 0.0, 1.0, 1.0),
    }]);
    assert!(matches!(
        write_slide(&p, None, None, &opts("F")),
        Err(SlideError::ImageDecode(_))
    ));
}

#[test]
fn long_text_is_cut_to_the_block_line_limit() {
    let words: Vec<String> = (0..120).map(|i| format!("word{i}")).collect();
    let p = plan(vec![text(&words.join(" "), Rect::new(0.5, 3.0, 7.0, 4.6), 18.0, 5)]);
    let xml = write_slide(&p, None, None, &opts("F")).unwrap().xml;
    assert_eq!(xml.matches("<a:r>").count(), 5);
    assert_eq!(xml.matches("<a:br/>").count(), 4);
    assert!(xml.contains("<a:t>word0 "));
    assert!(!xml.contains("word119"));
}

#[test]
fn short_text_stays_on_one_run() {
    let p = plan(vec![text("Kravis Hall", Rect::new(0.5, 3.0, 7.0, 4.0), 18.0, 2)]);
    let xml = write_slide(&p, None, None, &opts("F")).unwrap().xml;
    assert!(xml.contains("<a:t>Kravis Hall</a:t>"));
    assert!(!xml.contains("<a:br/>"));
}

#[test]
fn line_spacing_matches_the_raster_pitch() {
    let p = plan(vec![text("a b", Rect::new(0.5, 3.0, 7.0, 4.0), 18.0, 2)]);
    let xml = write_slide(&p, None, None, &opts("F")).unwrap().xml;
    // 36 px font + 8 px gap = 44 px = 22 pt.
    assert!(xml.contains(r#"<a:lnSpc><a:spcPts val="2200"/></a:lnSpc>"#));
}

#[test]
fn jpeg_photo_is_embedded_as_is() {
    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(60, 30, image::Rgb([90, 40, 10])))
        .write_to(&mut std::io::Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .unwrap();
    let p = plan(vec![DrawOp::RectPhoto {
        rect: Rect::new(0.0, 0.0, 3.0, 3.0),
    }]);
    let part = write_slide(&p, Some(&jpeg), None, &opts("F")).unwrap();
    assert_eq!(part.media.len(), 1);
    assert_eq!(part.media[0].name, "image1.jpeg");
    assert_eq!(part.media[0].bytes, jpeg);
    // 60x30 into a square trims a quarter from each side.
    assert!(part.xml.contains(r#"<a:srcRect l="25000" t="0" r="25000" b="0"/>"#));
}

#[test]
fn png_photo_is_embedded_as_is_and_only_once() {
    let photo = photo_png();
    let p = plan(vec![
        DrawOp::RectPhoto {
            rect: Rect::new(0.0, 0.0, 3.0, 3.0),
        },
        DrawOp::CirclePhoto {
            rect: Rect::new(8.0, 1.0, 11.0, 4.0),
            ring: 0.08,
            ring_color: Rgba8::WHITE,
        },
    ]);
    let part = write_slide(&p, Some(&photo), None, &opts("F")).unwrap();
    assert_eq!(part.media.len(), 1);
    assert_eq!(part.media[0].bytes, photo);
    assert_eq!(part.xml.matches(r#"r:embed="rId2""#).count(), 2);
}

#[test]
fn other_photo_containers_are_stored_as_png() {
    let mut bmp = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3])))
        .write_to(&mut std::io::Cursor::new(&mut bmp), ImageFormat::Bmp)
        .unwrap();
    let p = plan(vec![DrawOp::RectPhoto {
        rect: Rect::new(0.0, 0.0, 1.0, 1.0),
    }]);
    let part = write_slide(&p, Some(&bmp), None, &opts("F")).unwrap();
    assert_eq!(part.media[0].name, "image1.png");
    assert_eq!(&part.media[0].bytes[..4], b"\x89PNG");
}
