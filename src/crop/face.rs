//! Face-aware square cropping for portrait photos.
//!
//! [`compute_crop`] is the pure geometry: a centered square when no face is known, otherwise a
//! window sized so the face fills about a quarter of it, nudged down to leave headroom, and
//! shifted back inside the image when it would cross an edge. [`crop_to_face`] runs that window
//! over real pixels and produces a JPEG.

use image::imageops::{self, FilterType};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::assets::decode::{decode_rgba, encode_jpeg};
use crate::foundation::error::{SlideError, SlideResult};

/// Output edge length used when the caller does not pick one.
pub const DEFAULT_OUTPUT_SIZE: u32 = 800;

/// JPEG quality of cropped portraits.
pub const CROP_JPEG_QUALITY: u8 = 95;

const TARGET_FACE_RATIO: f64 = 0.25;
const MIN_CROP_RATIO: f64 = 0.7;
const MAX_CROP_RATIO: f64 = 1.0;
const MIN_CROP_PX: u32 = 500;
const HEADROOM_SHIFT: f64 = 0.05;

/// Result of an external face detector, all positions as fractions of the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceDetection {
    /// Whether a face was found at all.
    pub has_face: bool,
    /// Horizontal face center, 0 = left edge.
    pub face_center_x: f64,
    /// Vertical face center, 0 = top edge.
    pub face_center_y: f64,
    /// Share of the image the face occupies.
    pub face_size: f64,
}

impl Default for FaceDetection {
    fn default() -> Self {
        Self {
            has_face: false,
            face_center_x: 0.5,
            face_center_y: 0.5,
            face_size: 0.3,
        }
    }
}

impl FaceDetection {
    /// No face; cropping falls back to a centered square.
    pub fn none() -> Self {
        Self::default()
    }

    /// A detected face, with every value clamped into `[0, 1]`.
    pub fn at(center_x: f64, center_y: f64, size: f64) -> Self {
        Self {
            has_face: true,
            face_center_x: center_x,
            face_center_y: center_y,
            face_size: size,
        }
        .sanitized()
    }

    fn sanitized(self) -> Self {
        let d = Self::default();
        let unit = |v: f64, fallback: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback };
        Self {
            has_face: self.has_face,
            face_center_x: unit(self.face_center_x, d.face_center_x),
            face_center_y: unit(self.face_center_y, d.face_center_y),
            face_size: unit(self.face_size, d.face_size),
        }
    }
}

/// How the crop window was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMethod {
    /// Largest centered square.
    Center,
    /// Square framed around a detected face.
    FaceCentered,
}

/// Pixel window, right and bottom exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBounds {
    /// First column.
    pub left: u32,
    /// First row.
    pub top: u32,
    /// One past the last column.
    pub right: u32,
    /// One past the last row.
    pub bottom: u32,
}

impl CropBounds {
    /// Window width.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Window height.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Crop decision for an image of known size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CropWindow {
    /// Strategy used.
    pub method: CropMethod,
    /// Square window inside the image.
    pub bounds: CropBounds,
}

/// Audit record of one crop, suitable for JSON display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropInfo {
    /// Source width in pixels.
    pub original_width: u32,
    /// Source height in pixels.
    pub original_height: u32,
    /// Always true once a crop ran.
    pub was_cropped: bool,
    /// Strategy used.
    pub crop_method: CropMethod,
    /// Window taken from the source.
    pub crop_bounds: CropBounds,
    /// Edge length of the square output.
    pub output_size: u32,
}

/// Cropped portrait plus its audit record.
#[derive(Clone, Debug)]
pub struct CroppedPhoto {
    /// JPEG bytes.
    pub jpeg: Vec<u8>,
    /// What was done.
    pub info: CropInfo,
}

/// Pick the square crop window for a `width`x`height` image.
pub fn compute_crop(width: u32, height: u32, face: &FaceDetection) -> CropWindow {
    let min_dim = width.min(height);
    if !face.has_face {
        let left = (width - min_dim) / 2;
        let top = (height - min_dim) / 2;
        return CropWindow {
            method: CropMethod::Center,
            bounds: CropBounds {
                left,
                top,
                right: left + min_dim,
                bottom: top + min_dim,
            },
        };
    }

    let face = face.sanitized();
    let (w, h) = (i64::from(width), i64::from(height));

    let ratio = (face.face_size / TARGET_FACE_RATIO).clamp(MIN_CROP_RATIO, MAX_CROP_RATIO);
    let crop = ((f64::from(min_dim) * ratio) as i64).max(i64::from(MIN_CROP_PX.min(min_dim)));

    let center_x = (face.face_center_x * f64::from(width)) as i64;
    let shift = (crop as f64 * HEADROOM_SHIFT) as i64;
    let center_y = (face.face_center_y * f64::from(height)) as i64 + shift;

    let half = crop / 2;
    let mut left = center_x - half;
    let mut top = center_y - half;
    let mut right = left + crop;
    let mut bottom = top + crop;

    if left < 0 {
        right -= left;
        left = 0;
    }
    if top < 0 {
        bottom -= top;
        top = 0;
    }
    if right > w {
        left -= right - w;
        right = w;
    }
    if bottom > h {
        top -= bottom - h;
        bottom = h;
    }
    left = left.max(0);
    top = top.max(0);
    right = right.min(w);
    bottom = bottom.min(h);

    let (actual_w, actual_h) = (right - left, bottom - top);
    let side = actual_w.min(actual_h);
    if actual_w > side {
        left += (actual_w - side) / 2;
    }
    if actual_h > side {
        top += (actual_h - side) / 2;
    }

    // Every value is inside [0, width] x [0, height] here.
    let px = |v: i64| v as u32;
    CropWindow {
        method: CropMethod::FaceCentered,
        bounds: CropBounds {
            left: px(left),
            top: px(top),
            right: px(left + side),
            bottom: px(top + side),
        },
    }
}

/// Decode `bytes`, crop around `face`, resample to `output_size` square and encode as JPEG.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn crop_to_face(
    bytes: &[u8],
    face: &FaceDetection,
    output_size: u32,
) -> SlideResult<CroppedPhoto> {
    if output_size == 0 {
        return Err(SlideError::validation("crop output size must be > 0"));
    }
    let rgb = DynamicImage::ImageRgba8(decode_rgba(bytes)?).to_rgb8();
    let (width, height) = rgb.dimensions();
    let window = compute_crop(width, height, face);
    let b = window.bounds;
    if b.width() == 0 || b.height() == 0 {
        return Err(SlideError::decode(format!("image has no pixels ({width}x{height})")));
    }

    let cropped = imageops::crop_imm(&rgb, b.left, b.top, b.width(), b.height()).to_image();
    let resized = imageops::resize(&cropped, output_size, output_size, FilterType::Lanczos3);
    let jpeg = encode_jpeg(&resized, CROP_JPEG_QUALITY)?;
    tracing::debug!(method = ?window.method, ?b, "cropped photo");

    Ok(CroppedPhoto {
        jpeg,
        info: CropInfo {
            original_width: width,
            original_height: height,
            was_cropped: true,
            crop_method: window.method,
            crop_bounds: b,
            output_size,
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/crop/face.rs"]
mod tests;
