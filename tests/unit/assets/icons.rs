use super::*;

const KINDS: [IconKind; 4] = [
    IconKind::Calendar,
    IconKind::Clock,
    IconKind::MapPin,
    IconKind::Microphone,
];

#[test]
fn svg_carries_stroke_color() {
    let svg = icon_svg(IconKind::Clock, Rgba8::rgb(0xB9, 0xD9, 0xEB));
    assert!(svg.contains(r##"stroke="#B9D9EB""##), "{svg}");
    assert!(svg.contains(r#"stroke-opacity="1.0000""#), "{svg}");
}

#[test]
fn every_icon_rasterizes_with_ink() {
    for kind in KINDS {
        let img = rasterize_icon(kind, Rgba8::WHITE, 48, 48).unwrap();
        assert_eq!((img.width, img.height), (48, 48));
        assert_eq!(img.rgba8_premul.len(), 48 * 48 * 4);
        assert!(
            img.rgba8_premul.chunks_exact(4).any(|px| px[3] > 0),
            "{kind:?} drew nothing"
        );
        assert!(
            img.rgba8_premul.chunks_exact(4).any(|px| px[3] == 0),
            "{kind:?} filled everything"
        );
    }
}
