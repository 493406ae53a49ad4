use std::io::{Cursor, Read};

use super::*;
use crate::layout::plan::compile_slide_as;
use crate::layout::resolve::LayoutKind;

fn photo() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(30, 40, |x, y| image::Rgba([x as u8 * 8, y as u8 * 6, 90, 255]));
    crate::assets::decode::encode_png_rgba(&img).unwrap()
}

fn slide_xml(bytes: &[u8]) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut s = String::new();
    zip.by_name("ppt/slides/slide1.xml")
        .unwrap()
        .read_to_string(&mut s)
        .unwrap();
    s
}

#[test]
fn every_layout_packages() {
    let slide = SlideData::builder("Headline", "Description")
        .caption("Caption")
        .author_name("A. Person")
        .publication_link("https://example.org")
        .image(photo())
        .event_date("June 1")
        .build();
    let r = DocumentRenderer::default();
    for layout in LayoutKind::ALL {
        let bytes = r
            .render_plan(&compile_slide_as(&slide, layout), &slide)
            .unwrap();
        assert_eq!(&bytes[..2], b"PK", "{}", layout.name());
        let xml = slide_xml(&bytes);
        assert!(xml.contains("<a:t>Headline</a:t>"), "{}", layout.name());
    }
}

#[test]
fn configured_font_family_reaches_text_runs() {
    let slide = SlideData::builder("H", "D").build();
    let r = DocumentRenderer::new(DocumentOpts::default().with_font_family("Inter"));
    let xml = slide_xml(&r.render(&slide).unwrap());
    assert!(xml.contains(r#"<a:latin typeface="Inter"/>"#));
    assert_eq!(r.format(), ExportFormat::Pptx);
}
