//! Layout constants shared by both backends.
//!
//! Every position is in inches on the 13.333x7.5 logical canvas; font sizes are points.
//! The raster backend maps them to 1920x1080 pixels and the document backend to EMU, so a
//! change here moves the element identically in both outputs.

use crate::foundation::core::Rect;
use crate::model::catalog::TextAlign;

/// Branding line drawn on every layout.
pub const BRAND_TEXT: &str = "Columbia Business School";
/// Label under every QR code.
pub const QR_LABEL: &str = "Scan for more";

/// Axis-aligned box in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Slot {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) w: f64,
    pub(crate) h: f64,
}

impl Slot {
    pub(crate) const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub(crate) const fn square(x: f64, y: f64, side: f64) -> Self {
        Self::new(x, y, side, side)
    }

    pub(crate) fn at_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub(crate) fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Text box plus typography.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextSlot {
    pub(crate) slot: Slot,
    pub(crate) size_pt: f64,
    pub(crate) bold: bool,
    pub(crate) max_lines: usize,
    pub(crate) align: TextAlign,
}

const fn text(slot: Slot, size_pt: f64, bold: bool, max_lines: usize, align: TextAlign) -> TextSlot {
    TextSlot {
        slot,
        size_pt,
        bold,
        max_lines,
        align,
    }
}

const L: TextAlign = TextAlign::Left;
const C: TextAlign = TextAlign::Center;
const R: TextAlign = TextAlign::Right;

pub(crate) const CANVAS: Slot = Slot::new(0.0, 0.0, 13.333, 7.5);

pub(crate) const QR_LABEL_PT: f64 = 10.0;
pub(crate) const QR_LABEL_GAP: f64 = 0.05;
pub(crate) const QR_LABEL_PAD: f64 = 0.4;
pub(crate) const QR_LABEL_H: f64 = 0.3;

/// Label box centered under a QR slot.
pub(crate) fn qr_label_slot(qr: Slot) -> TextSlot {
    text(
        Slot::new(
            qr.x - QR_LABEL_PAD,
            qr.y + qr.h + QR_LABEL_GAP,
            qr.w + 2.0 * QR_LABEL_PAD,
            QR_LABEL_H,
        ),
        QR_LABEL_PT,
        false,
        1,
        C,
    )
}

pub(crate) const EVENT_PT: f64 = 10.0;
pub(crate) const EVENT_STEP: f64 = 0.3;
pub(crate) const EVENT_ICON: f64 = 0.17;
pub(crate) const EVENT_TEXT_DX: f64 = 0.26;
pub(crate) const EVENT_LINE_H: f64 = 0.25;
pub(crate) const EVENT_INLINE_SEP: &str = " \u{b7} ";

/// Maximum overlay alpha at the bottom edge of full-bleed photos.
pub(crate) const OVERLAY_MAX_ALPHA: u8 = 204;

pub(crate) mod split_text {
    use super::*;

    pub(crate) const CAPTION: TextSlot = text(Slot::new(0.6, 0.5, 8.0, 0.4), 12.0, false, 1, L);
    pub(crate) const HEADLINE: TextSlot = text(Slot::new(0.6, 1.2, 8.0, 1.6), 36.0, true, 3, L);
    pub(crate) const HEADLINE_Y_NO_CAPTION: f64 = 0.8;
    pub(crate) const DESCRIPTION_DY: f64 = 1.8;
    pub(crate) const DESCRIPTION: TextSlot =
        text(Slot::new(0.6, 3.0, 8.0, 1.6), 18.0, false, 5, L);
    pub(crate) const EVENT: Slot = Slot::new(0.6, 4.75, 8.0, 0.9);
    pub(crate) const AUTHOR: TextSlot = text(Slot::new(0.6, 6.0, 8.0, 0.5), 16.0, true, 1, L);
    pub(crate) const BRAND: TextSlot = text(Slot::new(0.6, 6.8, 4.0, 0.4), 11.0, false, 1, L);
    pub(crate) const PHOTO: Slot = Slot::square(9.5, 2.0, 3.0);
    pub(crate) const RING: f64 = 8.0 / 144.0;
    pub(crate) const QR: Slot = Slot::square(10.4, 5.5, 1.2);
}

pub(crate) mod hero {
    use super::*;

    pub(crate) const CAPTION: TextSlot = text(Slot::new(0.556, 3.0, 9.5, 0.35), 11.0, false, 1, L);
    pub(crate) const HEADLINE: TextSlot =
        text(Slot::new(0.556, 3.45, 10.0, 1.3), 36.0, true, 2, L);
    pub(crate) const DESCRIPTION: TextSlot =
        text(Slot::new(0.556, 4.85, 9.0, 0.95), 14.0, false, 2, L);
    pub(crate) const AUTHOR: TextSlot = text(Slot::new(0.556, 6.05, 7.0, 0.4), 14.0, true, 1, L);
    pub(crate) const BRAND: TextSlot = text(Slot::new(0.556, 6.6, 5.0, 0.35), 10.0, false, 1, L);
    pub(crate) const QR: Slot = Slot::square(11.35, 5.3, 1.2);
}

pub(crate) mod split_image {
    use super::*;

    const X: f64 = 7.083;
    const W: f64 = 5.833;

    pub(crate) const PHOTO: Slot = Slot::new(0.0, 0.0, 6.6665, 7.5);
    pub(crate) const CAPTION: TextSlot = text(Slot::new(X, 0.6, W, 0.35), 11.0, false, 1, L);
    pub(crate) const HEADLINE: TextSlot = text(Slot::new(X, 1.1, W, 1.6), 30.0, true, 3, L);
    pub(crate) const DESCRIPTION: TextSlot = text(Slot::new(X, 2.8, W, 1.3), 12.0, false, 5, L);
    pub(crate) const EVENT: Slot = Slot::new(X, 4.3, W, 0.9);
    pub(crate) const AUTHOR: TextSlot = text(Slot::new(X, 6.1, 4.2, 0.4), 14.0, true, 1, L);
    pub(crate) const BRAND: TextSlot = text(Slot::new(X, 6.6, 4.2, 0.35), 10.0, false, 1, L);
    pub(crate) const QR: Slot = Slot::square(11.6, 5.35, 1.1);
}

pub(crate) mod circular {
    use super::*;

    pub(crate) const CAPTION: TextSlot = text(Slot::new(1.667, 0.45, 10.0, 0.35), 11.0, false, 1, C);
    pub(crate) const PHOTO: Slot = Slot::square(5.556, 0.95, 2.222);
    pub(crate) const RING: f64 = 6.0 / 144.0;
    pub(crate) const AUTHOR: TextSlot = text(Slot::new(1.667, 3.35, 10.0, 0.45), 24.0, true, 1, C);
    pub(crate) const HEADLINE: TextSlot =
        text(Slot::new(1.667, 3.85, 10.0, 0.85), 24.0, true, 2, C);
    pub(crate) const DESCRIPTION: TextSlot =
        text(Slot::new(2.5, 4.75, 8.333, 0.5), 12.0, false, 2, C);
    pub(crate) const EVENT: TextSlot = text(Slot::new(1.667, 5.3, 10.0, 0.3), EVENT_PT, false, 1, C);
    pub(crate) const QR: Slot = Slot::square(5.2, 5.75, 0.95);
    pub(crate) const BRAND: TextSlot = text(Slot::new(6.4, 6.05, 3.5, 0.35), 10.0, false, 1, L);
}

pub(crate) mod text_only {
    use super::*;

    pub(crate) const CAPTION: TextSlot = text(Slot::new(1.0, 0.9, 11.333, 0.4), 12.0, false, 1, C);
    pub(crate) const HEADLINE: TextSlot =
        text(Slot::new(1.5, 1.5, 10.333, 1.75), 36.0, true, 3, C);
    pub(crate) const DESCRIPTION: TextSlot =
        text(Slot::new(2.0, 3.45, 9.333, 0.8), 14.0, false, 3, C);
    pub(crate) const EVENT: TextSlot = text(Slot::new(1.667, 4.5, 10.0, 0.3), EVENT_PT, false, 1, C);
    pub(crate) const AUTHOR: TextSlot = text(Slot::new(1.0, 5.8, 4.8, 0.4), 14.0, true, 1, R);
    pub(crate) const QR: Slot = Slot::square(6.117, 5.4, 1.1);
    pub(crate) const BRAND: TextSlot = text(Slot::new(7.55, 5.8, 4.8, 0.35), 10.0, false, 1, L);
}

pub(crate) mod media_vertical {
    use super::*;

    const X: f64 = 0.695;
    const W: f64 = 7.344;

    pub(crate) const CARD: Slot = Slot::new(0.417, 0.417, 7.9, 6.666);
    pub(crate) const PHOTO: Slot = Slot::new(0.417, 0.417, 7.9, 2.666);
    pub(crate) const CONTENT_Y_PHOTO: f64 = 3.36;
    pub(crate) const CONTENT_Y_NO_PHOTO: f64 = 0.75;
    pub(crate) const CAPTION: TextSlot = text(Slot::new(X, 0.0, W, 0.3), 9.0, false, 1, L);
    pub(crate) const HEADLINE_DY: f64 = 0.4;
    pub(crate) const HEADLINE: TextSlot = text(Slot::new(X, 0.0, W, 1.0), 24.0, true, 2, L);
    pub(crate) const DESCRIPTION_DY: f64 = 1.5;
    pub(crate) const DESCRIPTION: TextSlot = text(Slot::new(X, 0.0, W, 1.6), 12.0, false, 5, L);
    pub(crate) const FEATURED: TextSlot = text(Slot::new(8.75, 0.75, 4.166, 1.2), 24.0, true, 2, C);
    pub(crate) const QR: Slot = Slot::square(10.233, 4.9, 1.2);
    pub(crate) const BRAND: TextSlot = text(Slot::new(8.75, 6.75, 4.166, 0.35), 10.0, false, 1, C);
}

pub(crate) mod media_wide {
    use super::*;

    const X: f64 = 5.75;
    const W: f64 = 7.166;

    pub(crate) const PHOTO: Slot = Slot::new(0.0, 0.0, 5.333, 7.5);
    pub(crate) const CAPTION: TextSlot = text(Slot::new(X, 0.6, W, 0.3), 10.0, false, 1, L);
    pub(crate) const HEADLINE: TextSlot = text(Slot::new(X, 1.05, W, 1.6), 30.0, true, 3, L);
    pub(crate) const DESCRIPTION: TextSlot = text(Slot::new(X, 3.0, W, 1.2), 12.0, false, 5, L);
    pub(crate) const AUTHOR: TextSlot = text(Slot::new(X, 6.1, 4.5, 0.4), 12.0, true, 1, L);
    pub(crate) const BRAND: TextSlot = text(Slot::new(X, 6.6, 4.5, 0.35), 10.0, false, 1, L);
    pub(crate) const QR: Slot = Slot::square(11.6, 5.35, 1.1);
}

pub(crate) mod congrats {
    use super::*;

    const X: f64 = 5.75;

    pub(crate) const PHOTO: Slot = Slot::new(1.167, 2.0, 3.0, 3.5);
    pub(crate) const FRAME_INSET: f64 = 0.18;
    pub(crate) const FRAME_STROKE: f64 = 6.0 / 144.0;
    pub(crate) const CORNER_LEN: f64 = 0.167;
    pub(crate) const CORNER_THICK: f64 = 3.0 / 144.0;
    pub(crate) const CORNER_OUTSET: f64 = 4.0 / 144.0;
    pub(crate) const CAPTION: TextSlot = text(Slot::new(X, 1.3, 7.0, 0.45), 12.0, true, 1, L);
    pub(crate) const HONOREE: TextSlot = text(Slot::new(X, 1.85, 7.0, 1.2), 36.0, true, 2, L);
    pub(crate) const HEADLINE: TextSlot = text(Slot::new(X, 3.1, 7.0, 1.0), 30.0, true, 2, L);
    pub(crate) const DESCRIPTION: TextSlot = text(Slot::new(X, 4.15, 7.0, 0.9), 12.0, false, 4, L);
    pub(crate) const BRAND: TextSlot = text(Slot::new(X, 6.1, 5.0, 0.35), 10.0, false, 1, L);
    pub(crate) const QR: Slot = Slot::square(11.6, 5.35, 1.1);
}

pub(crate) mod podcast {
    use super::*;

    const X: f64 = 5.75;
    const W: f64 = 7.166;

    pub(crate) const ARTWORK: Slot = Slot::square(0.417, 1.5, 4.5);
    pub(crate) const MIC: Slot = Slot::square(1.917, 3.0, 1.5);
    pub(crate) const CAPTION: TextSlot = text(Slot::new(X, 0.6, W, 0.3), 10.0, false, 1, L);
    pub(crate) const HEADLINE: TextSlot = text(Slot::new(X, 1.05, W, 1.6), 30.0, true, 3, L);
    pub(crate) const DESCRIPTION: TextSlot = text(Slot::new(X, 3.0, W, 1.2), 12.0, false, 5, L);
    pub(crate) const HOST_LABEL: TextSlot = text(Slot::new(X, 6.05, 0.7, 0.4), 12.0, false, 1, L);
    pub(crate) const HOST: TextSlot = text(Slot::new(6.45, 6.05, 4.0, 0.4), 12.0, true, 1, L);
    pub(crate) const BRAND: TextSlot = text(Slot::new(X, 6.6, 4.5, 0.35), 10.0, false, 1, L);
    pub(crate) const QR: Slot = Slot::square(11.6, 5.35, 1.1);
}
