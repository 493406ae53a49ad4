use super::*;

#[test]
fn hex_parsing_accepts_common_forms() {
    assert_eq!(Rgba8::from_hex("#003DA5").unwrap(), Rgba8::rgb(0x00, 0x3d, 0xa5));
    assert_eq!(Rgba8::from_hex("009bdb").unwrap(), Rgba8::rgb(0x00, 0x9b, 0xdb));
    assert_eq!(
        Rgba8::from_hex("#00000080").unwrap(),
        Rgba8::BLACK.with_alpha(0x80)
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zz0000").is_err());
}

#[test]
fn hex_output_is_upper_case_without_hash() {
    assert_eq!(Rgba8::rgb(0, 0x9b, 0xdb).to_hex(), "009BDB");
}

#[test]
fn premul_rounds() {
    assert_eq!(Rgba8::WHITE.with_alpha(128).to_premul(), [128, 128, 128, 128]);
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn lerp_endpoints() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(200, 100, 50);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(100, 50, 25));
}

#[test]
fn unit_conversions_share_proportions() {
    let full = Rect::new(0.0, 0.0, CANVAS_WIDTH_IN, CANVAS_HEIGHT_IN);
    let px = rect_to_px(full);
    assert!((px.x1 - 1920.0).abs() < 1e-9);
    assert!((px.y1 - 1080.0).abs() < 1e-9);

    let emu = rect_to_emu(full);
    assert_eq!(emu.cx, SLIDE_WIDTH_EMU);
    assert_eq!(emu.cy, SLIDE_HEIGHT_EMU);

    assert!((pt_to_px(36.0) - 72.0).abs() < 1e-9);
}
