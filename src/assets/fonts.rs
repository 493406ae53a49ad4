//! Font lookup, text shaping and word wrapping for the raster backend.
//!
//! Fonts are located through [`FontConfig`], shaped with `parley`, and memoized per
//! (size, weight) for the lifetime of one [`FontBook`]. When no candidate file can be read the
//! book hands out [`Font::Bitmap`] and text is drawn with a built-in 5x7 pixel font, so a
//! missing font never fails a render.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use crate::foundation::config::FontConfig;
use crate::foundation::core::{pt_to_px, rect_to_px};
use crate::foundation::error::{SlideError, SlideResult};
use crate::layout::plan::TextBlock;

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Parley contexts bound to exactly one font file.
struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
}

impl TextLayoutEngine {
    fn with_font(font_bytes: &[u8]) -> SlideResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SlideError::validation("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlideError::validation("registered font family has no name"))?
            .to_string();
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Shape one unwrapped line.
    fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// A loaded outline face: its shaping contexts plus the glyph source for drawing.
struct Face {
    engine: TextLayoutEngine,
    data: vello_cpu::peniko::FontData,
}

/// Font handle for one (size, weight) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Font {
    /// Shaped with the outline face of this weight.
    Outline { bold: bool, size_px: f32 },
    /// Built-in pixel font.
    Bitmap { size_px: f32 },
}

impl Font {
    pub(crate) fn size_px(self) -> f32 {
        match self {
            Self::Outline { size_px, .. } | Self::Bitmap { size_px } => size_px,
        }
    }

    /// Baseline-to-baseline distance of wrapped lines.
    pub(crate) fn line_height(self) -> f64 {
        f64::from(self.size_px()) + LINE_GAP_PX
    }
}

/// Extra leading added to the font size between wrapped lines, in pixels.
pub(crate) const LINE_GAP_PX: f64 = 8.0;

/// Per-render font cache.
pub(crate) struct FontBook {
    config: FontConfig,
    faces: HashMap<bool, Option<Face>>,
    fonts: HashMap<(u32, bool), Font>,
}

impl FontBook {
    pub(crate) fn new(config: FontConfig) -> Self {
        Self {
            config,
            faces: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Font for `size_px` and weight, loading the face on first use.
    pub(crate) fn font(&mut self, size_px: f32, bold: bool) -> Font {
        let key = (size_px.to_bits(), bold);
        if let Some(font) = self.fonts.get(&key) {
            return *font;
        }
        let font = if self.face(bold).is_some() {
            Font::Outline { bold, size_px }
        } else {
            Font::Bitmap { size_px }
        };
        self.fonts.insert(key, font);
        font
    }

    fn face(&mut self, bold: bool) -> Option<&mut Face> {
        if !self.faces.contains_key(&bold) {
            let loaded = load_face(&self.config, bold);
            if loaded.is_none() {
                tracing::warn!(bold, "no usable font file found, using built-in bitmap font");
            }
            self.faces.insert(bold, loaded);
        }
        self.faces.get_mut(&bold).and_then(Option::as_mut)
    }

    /// Advance width of `text` in pixels.
    pub(crate) fn measure(&mut self, font: Font, text: &str) -> f64 {
        match font {
            Font::Outline { bold, size_px } => match self.face(bold) {
                Some(face) => {
                    f64::from(face.engine.layout_line(text, size_px, TextBrushRgba8::default()).width())
                }
                None => bitmap_width(text, size_px),
            },
            Font::Bitmap { size_px } => bitmap_width(text, size_px),
        }
    }

    /// Font and kept lines of a plan text block, wrapped to the block's whole-pixel width.
    ///
    /// Both backends break and truncate text here, so a block holds the same lines in every
    /// output format.
    pub(crate) fn wrap_block(&mut self, block: &TextBlock) -> (Font, Vec<String>) {
        let font = self.font(pt_to_px(block.size_pt) as f32, block.bold);
        let p = rect_to_px(block.rect);
        let width = (p.x1.round() - p.x0.round()).max(1.0);
        let lines = wrap_words(&block.text, width, block.max_lines, |s| self.measure(font, s));
        (font, lines)
    }

    /// Shape one line for drawing, returning the layout and the face's glyph source.
    pub(crate) fn shape(
        &mut self,
        bold: bool,
        size_px: f32,
        text: &str,
        brush: TextBrushRgba8,
    ) -> SlideResult<(parley::Layout<TextBrushRgba8>, vello_cpu::peniko::FontData)> {
        let face = self
            .face(bold)
            .ok_or_else(|| SlideError::validation("no outline face loaded"))?;
        let layout = face.engine.layout_line(text, size_px, brush);
        Ok((layout, face.data.clone()))
    }
}

fn load_face(config: &FontConfig, bold: bool) -> Option<Face> {
    config.candidates(bold).find_map(|path| match read_face(path) {
        Ok(face) => {
            tracing::debug!(path = %path.display(), bold, "loaded font");
            Some(face)
        }
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "font candidate skipped");
            None
        }
    })
}

fn read_face(path: &Path) -> SlideResult<Face> {
    let bytes = std::fs::read(path)
        .map_err(|e| SlideError::validation(format!("read font '{}': {e}", path.display())))?;
    let engine = TextLayoutEngine::with_font(&bytes)?;
    let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
    Ok(Face { engine, data })
}

/// Greedy whitespace word wrap.
///
/// Words are added to the current line while `measure` of the joined line fits `max_width`; a
/// word that alone overflows still gets a line of its own. At most `max_lines` lines are kept.
pub(crate) fn wrap_words(
    text: &str,
    max_width: f64,
    max_lines: usize,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.truncate(max_lines);
    lines
}

/// Cell advance of the bitmap font in font units (5 columns plus one gap).
pub(crate) const BITMAP_ADVANCE: f64 = 6.0;
/// Font units per em of the bitmap font (7 rows plus one gap).
pub(crate) const BITMAP_EM: f64 = 8.0;

pub(crate) fn bitmap_width(text: &str, size_px: f32) -> f64 {
    let unit = f64::from(size_px) / BITMAP_EM;
    text.chars().count() as f64 * BITMAP_ADVANCE * unit
}

/// Column bitmaps of one character, bit 0 at the top row.
pub(crate) fn bitmap_glyph(ch: char) -> [u8; 5] {
    match ch {
        '\u{b7}' => [0x00, 0x00, 0x08, 0x00, 0x00],
        ' '..='~' => BITMAP_GLYPHS[(ch as usize) - 0x20],
        _ if ch.is_whitespace() => BITMAP_GLYPHS[0],
        _ => BITMAP_GLYPHS[('?' as usize) - 0x20],
    }
}

#[rustfmt::skip]
const BITMAP_GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00],
    [0x14, 0x7F, 0x14, 0x7F, 0x14], [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x36, 0x49, 0x56, 0x20, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00], [0x00, 0x1C, 0x22, 0x41, 0x00],
    [0x00, 0x41, 0x22, 0x1C, 0x00], [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], [0x08, 0x08, 0x3E, 0x08, 0x08],
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x60, 0x60, 0x00, 0x00],
    [0x20, 0x10, 0x08, 0x04, 0x02], [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4B, 0x31], [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39], [0x3C, 0x4A, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1E], [0x00, 0x36, 0x36, 0x00, 0x00],
    [0x00, 0x56, 0x36, 0x00, 0x00], [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14],
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06], [0x32, 0x49, 0x79, 0x41, 0x3E],
    [0x7E, 0x11, 0x11, 0x11, 0x7E], [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x22, 0x1C], [0x7F, 0x49, 0x49, 0x49, 0x41], [0x7F, 0x09, 0x09, 0x09, 0x01],
    [0x3E, 0x41, 0x49, 0x49, 0x7A], [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41], [0x7F, 0x40, 0x40, 0x40, 0x40],
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], [0x7F, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31], [0x01, 0x01, 0x7F, 0x01, 0x01], [0x3F, 0x40, 0x40, 0x40, 0x3F],
    [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x3F, 0x40, 0x38, 0x40, 0x3F], [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x07, 0x08, 0x70, 0x08, 0x07], [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x00],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x7F, 0x00], [0x04, 0x02, 0x01, 0x02, 0x04],
    [0x40, 0x40, 0x40, 0x40, 0x40], [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78],
    [0x7F, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20], [0x38, 0x44, 0x44, 0x48, 0x7F],
    [0x38, 0x54, 0x54, 0x54, 0x18], [0x08, 0x7E, 0x09, 0x01, 0x02], [0x0C, 0x52, 0x52, 0x52, 0x3E],
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], [0x20, 0x40, 0x44, 0x3D, 0x00],
    [0x7F, 0x10, 0x28, 0x44, 0x00], [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x18, 0x04, 0x78],
    [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], [0x7C, 0x14, 0x14, 0x14, 0x08],
    [0x08, 0x14, 0x14, 0x18, 0x7C], [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3F, 0x44, 0x40, 0x20], [0x3C, 0x40, 0x40, 0x20, 0x7C], [0x1C, 0x20, 0x40, 0x20, 0x1C],
    [0x3C, 0x40, 0x30, 0x40, 0x3C], [0x44, 0x28, 0x10, 0x28, 0x44], [0x0C, 0x50, 0x50, 0x50, 0x3C],
    [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], [0x00, 0x00, 0x7F, 0x00, 0x00],
    [0x00, 0x41, 0x36, 0x08, 0x00], [0x08, 0x04, 0x08, 0x10, 0x08],
];

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
