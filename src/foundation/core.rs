pub use kurbo::{Point, Rect};

/// Logical slide width in inches (16:9).
pub const CANVAS_WIDTH_IN: f64 = 13.333;
/// Logical slide height in inches (16:9).
pub const CANVAS_HEIGHT_IN: f64 = 7.5;

/// Raster output width in pixels.
pub const RASTER_WIDTH: u32 = 1920;
/// Raster output height in pixels.
pub const RASTER_HEIGHT: u32 = 1080;

/// Presentation slide width in EMU (16:9 widescreen).
pub const SLIDE_WIDTH_EMU: i64 = 12_192_000;
/// Presentation slide height in EMU (16:9 widescreen).
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a replaced alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if !s.is_ascii() {
            return Err("hex color must be ascii".to_owned());
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }

    /// Upper-case `RRGGBB` without the leading `#`, as used by DrawingML.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Placement of a shape in presentation units (EMU).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmuRect {
    /// Left offset.
    pub x: i64,
    /// Top offset.
    pub y: i64,
    /// Width.
    pub cx: i64,
    /// Height.
    pub cy: i64,
}

/// Map an inch-space rect onto the 1920x1080 raster canvas.
pub fn rect_to_px(r: Rect) -> Rect {
    let sx = f64::from(RASTER_WIDTH) / CANVAS_WIDTH_IN;
    let sy = f64::from(RASTER_HEIGHT) / CANVAS_HEIGHT_IN;
    Rect::new(r.x0 * sx, r.y0 * sy, r.x1 * sx, r.y1 * sy)
}

/// Map an inch-space rect onto the widescreen slide in EMU.
///
/// Coordinates are taken as fractions of the logical canvas so both backends agree
/// proportionally even though 13.333in is not exactly 12192000 EMU.
pub fn rect_to_emu(r: Rect) -> EmuRect {
    let fx = |v: f64| (v / CANVAS_WIDTH_IN * SLIDE_WIDTH_EMU as f64).round() as i64;
    let fy = |v: f64| (v / CANVAS_HEIGHT_IN * SLIDE_HEIGHT_EMU as f64).round() as i64;
    let x = fx(r.x0);
    let y = fy(r.y0);
    EmuRect {
        x,
        y,
        cx: (fx(r.x1) - x).max(0),
        cy: (fy(r.y1) - y).max(0),
    }
}

/// Length along the x axis in EMU.
pub fn len_to_emu(v: f64) -> i64 {
    (v / CANVAS_WIDTH_IN * SLIDE_WIDTH_EMU as f64).round() as i64
}

/// Font points to raster pixels (144 px per inch, 72 pt per inch).
pub fn pt_to_px(pt: f64) -> f64 {
    pt * (f64::from(RASTER_HEIGHT) / CANVAS_HEIGHT_IN) / 72.0
}

/// Length in inches to raster pixels along the y axis.
pub fn len_to_px(v: f64) -> f64 {
    v * f64::from(RASTER_HEIGHT) / CANVAS_HEIGHT_IN
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
