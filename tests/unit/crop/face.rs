use super::*;

fn photo(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(w, h, |x, y| image::Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
    crate::assets::decode::encode_png_rgb(&img).unwrap()
}

#[test]
fn face_centered_on_square_image() {
    let face = FaceDetection::at(0.5, 0.3, 0.2);
    let w = compute_crop(1000, 1000, &face);
    assert_eq!(w.method, CropMethod::FaceCentered);
    // ratio 0.8 -> 800px window, pushed down into the image after the headroom shift.
    assert_eq!(
        w.bounds,
        CropBounds {
            left: 100,
            top: 0,
            right: 900,
            bottom: 800
        }
    );
    assert_eq!(w.bounds.width(), w.bounds.height());
}

#[test]
fn huge_face_clamps_to_shorter_side() {
    let face = FaceDetection::at(0.9, 0.9, 0.95);
    let w = compute_crop(1200, 900, &face);
    assert_eq!(w.bounds.width(), 900);
    assert_eq!(w.bounds.height(), 900);
    assert!(w.bounds.right <= 1200 && w.bounds.bottom <= 900);
    assert_eq!(w.bounds.right, 1200);
}

#[test]
fn tiny_face_keeps_minimum_ratio() {
    let face = FaceDetection::at(0.5, 0.5, 0.01);
    let w = compute_crop(2000, 2000, &face);
    assert_eq!(w.bounds.width(), 1400);
}

#[test]
fn small_images_use_whole_short_side_floor() {
    let face = FaceDetection::at(0.5, 0.5, 0.1);
    let w = compute_crop(400, 300, &face);
    // 0.7 * 300 = 210, floor is min(500, 300) = 300.
    assert_eq!(w.bounds.width(), 300);
    assert_eq!((w.bounds.top, w.bounds.bottom), (0, 300));
}

#[test]
fn no_face_is_centered_square() {
    let w = compute_crop(1000, 600, &FaceDetection::none());
    assert_eq!(w.method, CropMethod::Center);
    assert_eq!(
        w.bounds,
        CropBounds {
            left: 200,
            top: 0,
            right: 800,
            bottom: 600
        }
    );
}

#[test]
fn out_of_range_detection_is_clamped() {
    let face = FaceDetection {
        has_face: true,
        face_center_x: 3.0,
        face_center_y: -1.0,
        face_size: f64::NAN,
    };
    let w = compute_crop(1000, 1000, &face);
    assert!(w.bounds.right <= 1000 && w.bounds.bottom <= 1000);
    assert_eq!(w.bounds.width(), w.bounds.height());
}

#[test]
fn detection_json_defaults() {
    let face: FaceDetection = serde_json::from_str(r#"{"has_face": true}"#).unwrap();
    assert_eq!(face, FaceDetection { has_face: true, ..FaceDetection::default() });
    let none: FaceDetection = serde_json::from_str("{}").unwrap();
    assert!(!none.has_face);
}

#[test]
fn crop_to_face_outputs_square_jpeg() {
    let out = crop_to_face(&photo(320, 200), &FaceDetection::at(0.3, 0.4, 0.3), 64).unwrap();
    assert_eq!(&out.jpeg[..2], &[0xFF, 0xD8]);
    let img = image::load_from_memory(&out.jpeg).unwrap();
    assert_eq!((img.width(), img.height()), (64, 64));
    assert_eq!(out.info.original_width, 320);
    assert_eq!(out.info.crop_method, CropMethod::FaceCentered);
    assert!(out.info.was_cropped);

    let json = serde_json::to_value(&out.info).unwrap();
    assert_eq!(json["crop_method"], "face_centered");
    assert_eq!(json["crop_bounds"]["bottom"], 200);
}

#[test]
fn crop_rejects_bad_input() {
    let err = crop_to_face(b"nope", &FaceDetection::none(), 100).unwrap_err();
    assert!(matches!(err, SlideError::ImageDecode(_)));
    let err = crop_to_face(&photo(10, 10), &FaceDetection::none(), 0).unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));
}
