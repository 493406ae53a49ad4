use crate::foundation::core::Rgba8;
use crate::model::catalog::{TemplateStyle, resolve_style};
use crate::model::slide::SlideData;

/// Legacy color palette keyed only by template id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Template id (`template1`..`template3`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Background (gradient start) color.
    pub background: Rgba8,
    /// Gradient end color.
    pub gradient_end: Rgba8,
    /// Text color.
    pub text: Rgba8,
    /// Accent color.
    pub accent: Rgba8,
}

impl TemplateConfig {
    /// Hard-coded default palette ("CBS Blue").
    pub const DEFAULT: TemplateConfig = LEGACY[0];
}

const LEGACY: [TemplateConfig; 3] = [
    TemplateConfig {
        id: "template1",
        name: "CBS Blue",
        background: Rgba8::rgb(0x00, 0x3d, 0xa5),
        gradient_end: Rgba8::rgb(0x00, 0x52, 0xcc),
        text: Rgba8::rgb(0xff, 0xff, 0xff),
        accent: Rgba8::rgb(0x00, 0x9b, 0xdb),
    },
    TemplateConfig {
        id: "template2",
        name: "Dark Theme",
        background: Rgba8::rgb(0x1a, 0x1a, 0x1a),
        gradient_end: Rgba8::rgb(0x2d, 0x2d, 0x2d),
        text: Rgba8::rgb(0xff, 0xff, 0xff),
        accent: Rgba8::rgb(0x00, 0x9b, 0xdb),
    },
    TemplateConfig {
        id: "template3",
        name: "Light Theme",
        background: Rgba8::rgb(0xf8, 0xf9, 0xfa),
        gradient_end: Rgba8::rgb(0xe9, 0xec, 0xef),
        text: Rgba8::rgb(0x18, 0x1a, 0x1c),
        accent: Rgba8::rgb(0x00, 0x3d, 0xa5),
    },
];

/// Legacy palette for `id`, if one exists.
pub fn legacy_template(id: &str) -> Option<&'static TemplateConfig> {
    LEGACY.iter().find(|t| t.id == id.trim())
}

/// Every legacy palette, in id order.
pub fn legacy_templates() -> &'static [TemplateConfig] {
    &LEGACY
}

/// Colors and layout metadata both renderers draw with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSet {
    /// Name of the style or palette the colors came from.
    pub name: &'static str,
    /// Background (gradient start) color.
    pub background: Rgba8,
    /// Gradient end color.
    pub gradient_end: Rgba8,
    /// Text color.
    pub text: Rgba8,
    /// Accent color.
    pub accent: Rgba8,
    /// Category-scoped style, when one resolved.
    pub style: Option<&'static TemplateStyle>,
}

impl From<&'static TemplateStyle> for ColorSet {
    fn from(s: &'static TemplateStyle) -> Self {
        Self {
            name: s.name,
            background: s.background(),
            gradient_end: s.gradient_end(),
            text: s.text(),
            accent: s.accent(),
            style: Some(s),
        }
    }
}

impl From<&TemplateConfig> for ColorSet {
    fn from(t: &TemplateConfig) -> Self {
        Self {
            name: t.name,
            background: t.background,
            gradient_end: t.gradient_end,
            text: t.text,
            accent: t.accent,
            style: None,
        }
    }
}

/// Resolve colors for a (category, template id) pair.
///
/// Category-scoped style first, then the legacy palette by template id, then
/// [`TemplateConfig::DEFAULT`]. Never fails.
pub fn resolve_colors_for(category: &str, template_id: &str) -> ColorSet {
    if let Some(style) = resolve_style(category, template_id) {
        return ColorSet::from(style);
    }
    if let Some(legacy) = legacy_template(template_id) {
        tracing::debug!(template_id, "no category style; using legacy palette");
        return ColorSet::from(legacy);
    }
    tracing::debug!(category, template_id, "unknown template; using default palette");
    ColorSet::from(&TemplateConfig::DEFAULT)
}

/// Resolve the colors a slide renders with.
pub fn resolve_colors(slide: &SlideData) -> ColorSet {
    resolve_colors_for(slide.category(), slide.template_id())
}

#[cfg(test)]
#[path = "../../tests/unit/model/palette.rs"]
mod tests;
