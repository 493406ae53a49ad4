use super::*;
use crate::foundation::config::FontConfig;
use crate::layout::plan::compile_slide_as;
use crate::layout::resolve::LayoutKind;

fn opts() -> RasterOpts {
    RasterOpts::default().with_fonts(FontConfig::builtin_only())
}

fn photo() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(64, 48, |x, y| {
        image::Rgba([(x * 4) as u8, (y * 5) as u8, 128, 255])
    });
    crate::assets::decode::encode_png_rgba(&img).unwrap()
}

fn slide() -> SlideData {
    SlideData::builder("Quantum sensing lab opens", "New facility for precision measurement.")
        .caption("Research")
        .author_name("Dr. Ada Park")
        .publication_link("https://example.edu/news/lab")
        .image(photo())
        .event_date("May 2")
        .event_time("4 PM")
        .event_location("Main Hall")
        .build()
}

#[test]
fn every_layout_renders_at_full_resolution() {
    let r = RasterRenderer::png(opts());
    let s = slide();
    for layout in LayoutKind::ALL {
        let plan = compile_slide_as(&s, layout);
        let img = r.render_plan(&plan, s.image()).unwrap();
        assert_eq!(img.dimensions(), (1920, 1080), "{}", layout.name());
    }
}

#[test]
fn encoders_emit_their_signatures() {
    let s = slide();
    let png = RasterRenderer::png(opts()).render(&s).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let jpg = RasterRenderer::jpeg(opts()).render(&s).unwrap();
    assert_eq!(&jpg[..3], &[0xFF, 0xD8, 0xFF]);
}

#[test]
fn output_is_opaque_and_deterministic() {
    let r = RasterRenderer::png(opts());
    let s = SlideData::builder("Plain", "Text only slide").build();
    let a = r.render(&s).unwrap();
    let b = r.render(&s).unwrap();
    assert_eq!(a, b);
    let decoded = image::load_from_memory(&a).unwrap();
    assert!(!decoded.color().has_alpha());
}

#[test]
fn background_gradient_fills_the_corners() {
    let s = SlideData::builder("H", "D").build();
    let colors = s.colors();
    let img = RasterRenderer::png(opts()).render_image(&s).unwrap();
    let tl = img.get_pixel(0, 0).0;
    let br = img.get_pixel(1919, 1079).0;
    assert_eq!(tl, [colors.background.r, colors.background.g, colors.background.b]);
    assert_eq!(br, [colors.gradient_end.r, colors.gradient_end.g, colors.gradient_end.b]);
}

#[test]
fn undecodable_photo_is_an_error_for_photo_layouts() {
    let s = SlideData::builder("H", "D").image(vec![0u8; 16]).build();
    let r = RasterRenderer::png(opts());
    let plan = compile_slide_as(&s, LayoutKind::FullHero);
    assert!(matches!(
        r.render_plan(&plan, s.image()),
        Err(crate::foundation::error::SlideError::ImageDecode(_))
    ));
}
