//! Photo decoding, cropping and encoding shared by both renderers.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ImageEncoder, ImageFormat, RgbImage, RgbaImage};

use crate::foundation::error::{SlideError, SlideResult};

/// Raster image in premultiplied RGBA8 form, ready for compositing.
#[derive(Clone, Debug)]
pub(crate) struct PreparedImage {
    /// Width in pixels.
    pub(crate) width: u32,
    /// Height in pixels.
    pub(crate) height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub(crate) rgba8_premul: Vec<u8>,
}

impl PreparedImage {
    pub(crate) fn from_straight(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul,
        }
    }

    pub(crate) fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba8_premul,
        }
    }

    /// Undo premultiplication for encoders that expect straight alpha.
    pub(crate) fn to_straight(&self) -> SlideResult<RgbaImage> {
        let mut out = self.rgba8_premul.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        RgbaImage::from_raw(self.width, self.height, out)
            .ok_or_else(|| SlideError::encode("pixel buffer does not match its dimensions"))
    }
}

/// Decode photo bytes of any supported container into straight RGBA8.
pub(crate) fn decode_rgba(bytes: &[u8]) -> SlideResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|e| SlideError::decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Width and height read from the container header without decoding pixels.
pub(crate) fn header_dimensions(bytes: &[u8], format: ImageFormat) -> SlideResult<(u32, u32)> {
    image::ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| SlideError::decode(e.to_string()))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Fractions trimmed from each edge of a source image.
///
/// The document backend writes these straight into a picture's `srcRect`; the raster backend
/// turns them into a pixel window, so both show the same part of the photo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Insets {
    pub(crate) left: f64,
    pub(crate) top: f64,
    pub(crate) right: f64,
    pub(crate) bottom: f64,
}

impl Insets {
    pub(crate) const NONE: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Center crop of a `src_w`x`src_h` image to the aspect ratio of `dst_w`x`dst_h`.
    pub(crate) fn cover(src_w: u32, src_h: u32, dst_w: f64, dst_h: f64) -> Self {
        if src_w == 0 || src_h == 0 || dst_w <= 0.0 || dst_h <= 0.0 {
            return Self::NONE;
        }
        let src_aspect = f64::from(src_w) / f64::from(src_h);
        let dst_aspect = dst_w / dst_h;
        if src_aspect > dst_aspect {
            let trim = (1.0 - dst_aspect / src_aspect) / 2.0;
            Self {
                left: trim,
                right: trim,
                ..Self::NONE
            }
        } else if src_aspect < dst_aspect {
            let trim = (1.0 - src_aspect / dst_aspect) / 2.0;
            Self {
                top: trim,
                bottom: trim,
                ..Self::NONE
            }
        } else {
            Self::NONE
        }
    }

    /// Pixel window `(x, y, w, h)` of these insets on a `width`x`height` image.
    pub(crate) fn window(self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let (w, h) = (f64::from(width), f64::from(height));
        let x0 = (self.left * w).round() as u32;
        let y0 = (self.top * h).round() as u32;
        let x1 = ((1.0 - self.right) * w).round() as u32;
        let y1 = ((1.0 - self.bottom) * h).round() as u32;
        let x0 = x0.min(width.saturating_sub(1));
        let y0 = y0.min(height.saturating_sub(1));
        (x0, y0, x1.saturating_sub(x0).max(1), y1.saturating_sub(y0).max(1))
    }
}

/// Cover-crop `img` to the aspect of `w`x`h` and resample to exactly that size.
pub(crate) fn cover_resize(img: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    let (w, h) = (w.max(1), h.max(1));
    let insets = Insets::cover(img.width(), img.height(), f64::from(w), f64::from(h));
    let (x, y, cw, ch) = insets.window(img.width(), img.height());
    let view = imageops::crop_imm(img, x, y, cw, ch).to_image();
    if view.dimensions() == (w, h) {
        return view;
    }
    imageops::resize(&view, w, h, FilterType::Lanczos3)
}

/// Blend black over `img` with alpha rising linearly from 0 on the first row to `max_alpha`
/// on the last.
pub(crate) fn darken_bottom(img: &mut RgbaImage, max_alpha: u8) {
    let h = img.height();
    let span = f64::from(h.saturating_sub(1).max(1));
    for (y, row) in img.rows_mut().enumerate() {
        let a = (f64::from(max_alpha) * y as f64 / span).round() as u16;
        let keep = 255 - a.min(255);
        for px in row {
            for c in &mut px.0[..3] {
                *c = ((u16::from(*c) * keep + 127) / 255) as u8;
            }
        }
    }
}

/// Composite straight-alpha `img` over opaque white.
pub(crate) fn flatten_on_white(img: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (dst, src) in out.pixels_mut().zip(img.pixels()) {
        let a = u16::from(src.0[3]);
        for i in 0..3 {
            let c = u16::from(src.0[i]);
            dst.0[i] = ((c * a + 255 * (255 - a) + 127) / 255) as u8;
        }
    }
    out
}

/// Lossless PNG with the encoder's strongest compression.
pub(crate) fn encode_png_rgba(img: &RgbaImage) -> SlideResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new_with_quality(Cursor::new(&mut out), CompressionType::Best, PngFilter::Adaptive)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| SlideError::encode(format!("png: {e}")))?;
    Ok(out)
}

pub(crate) fn encode_png_rgb(img: &RgbImage) -> SlideResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new_with_quality(Cursor::new(&mut out), CompressionType::Best, PngFilter::Adaptive)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| SlideError::encode(format!("png: {e}")))?;
    Ok(out)
}

pub(crate) fn encode_jpeg(img: &RgbImage, quality: u8) -> SlideResult<Vec<u8>> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode_image(img)
        .map_err(|e| SlideError::encode(format!("jpeg: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
