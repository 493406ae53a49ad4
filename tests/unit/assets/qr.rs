use super::*;

#[test]
fn native_code_has_quiet_zone_and_finder() {
    let img = qr_modules("https://example.com").unwrap();
    assert_eq!(img.width(), img.height());
    assert_eq!(img.width() % MODULE_PX, 0);
    // Quiet zone is white, the top-left finder pattern starts right after it.
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    let edge = BORDER * MODULE_PX;
    assert_eq!(img.get_pixel(edge, edge).0, [0, 0, 0, 255]);
}

#[test]
fn resized_to_target() {
    let img = qr_image("https://example.com/a/much/longer/path?q=1", 173).unwrap();
    assert_eq!(img.dimensions(), (173, 173));
}

#[test]
fn same_url_same_pixels() {
    let a = qr_image("https://example.com", 120).unwrap();
    let b = qr_image("https://example.com", 120).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn oversized_payload_is_an_encode_error() {
    let url = "x".repeat(8000);
    let err = qr_image(&url, 100).unwrap_err();
    assert!(matches!(err, SlideError::Encode(_)), "{err}");
}
