use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};

use crate::foundation::error::{SlideError, SlideResult};

/// Pixels per module before resampling.
const MODULE_PX: u32 = 10;
/// Quiet zone, in modules.
const BORDER: u32 = 2;

/// Render `url` as a black-on-white QR code at its native module resolution.
pub(crate) fn qr_modules(url: &str) -> SlideResult<RgbaImage> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
        .map_err(|e| SlideError::encode(format!("qr code for {url:?}: {e}")))?;
    let width = code.width() as u32;
    let colors = code.to_colors();
    let side = (width + 2 * BORDER) * MODULE_PX;

    let mut img = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = i as u32 % width + BORDER;
        let my = i as u32 / width + BORDER;
        for y in my * MODULE_PX..(my + 1) * MODULE_PX {
            for x in mx * MODULE_PX..(mx + 1) * MODULE_PX {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }
    Ok(img)
}

/// QR code for `url` resampled to a `size_px` square.
pub(crate) fn qr_image(url: &str, size_px: u32) -> SlideResult<RgbaImage> {
    let img = qr_modules(url)?;
    let size_px = size_px.max(1);
    if img.width() == size_px {
        return Ok(img);
    }
    Ok(imageops::resize(&img, size_px, size_px, FilterType::Lanczos3))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/qr.rs"]
mod tests;
