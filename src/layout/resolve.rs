use serde::Serialize;

use crate::model::catalog::{ImagePosition, LayoutType, TemplateStyle};

/// The nine spatial arrangements both renderers implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Photo as full-bleed background with a dark bottom gradient.
    FullHero,
    /// Text left, circular portrait right (default).
    SplitTextPrimary,
    /// Photo fills the left half, text right.
    SplitImagePrimary,
    /// Centered circular portrait with centered text.
    CircularSpeaker,
    /// Centered text, no photo.
    TextOnly,
    /// White card with photo on top plus a featured column.
    MediaVertical,
    /// Photo panel left, story right.
    MediaWide,
    /// Framed honoree portrait.
    CongratsFramed,
    /// Square episode artwork with episode details.
    Podcast,
}

impl LayoutKind {
    /// Every layout, in resolver precedence order with the default last.
    pub const ALL: [LayoutKind; 9] = [
        LayoutKind::FullHero,
        LayoutKind::SplitImagePrimary,
        LayoutKind::CircularSpeaker,
        LayoutKind::TextOnly,
        LayoutKind::MediaVertical,
        LayoutKind::MediaWide,
        LayoutKind::CongratsFramed,
        LayoutKind::Podcast,
        LayoutKind::SplitTextPrimary,
    ];

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FullHero => "full_hero",
            Self::SplitTextPrimary => "split_text_primary",
            Self::SplitImagePrimary => "split_image_primary",
            Self::CircularSpeaker => "circular_speaker",
            Self::TextOnly => "text_only",
            Self::MediaVertical => "media_vertical",
            Self::MediaWide => "media_wide",
            Self::CongratsFramed => "congrats_framed",
            Self::Podcast => "podcast",
        }
    }
}

/// Select the layout for a resolved style; no style means [`LayoutKind::SplitTextPrimary`].
pub fn resolve_layout(style: Option<&TemplateStyle>) -> LayoutKind {
    match style {
        Some(s) => resolve_layout_tags(s.layout_type, s.image_position),
        None => LayoutKind::SplitTextPrimary,
    }
}

/// Precedence rules over the raw tags. First match wins.
pub fn resolve_layout_tags(layout: LayoutType, position: ImagePosition) -> LayoutKind {
    use ImagePosition as P;
    use LayoutType as L;

    let podcast = matches!(layout, L::PodcastStandard | L::PodcastFeature);

    if layout == L::FullHero || position == P::Full {
        LayoutKind::FullHero
    } else if layout == L::SplitImagePrimary
        || (position == P::Left && layout != L::MediaWide && !podcast)
    {
        LayoutKind::SplitImagePrimary
    } else if layout == L::EventSpeaker || matches!(position, P::Circular | P::Center) {
        LayoutKind::CircularSpeaker
    } else if position == P::None {
        LayoutKind::TextOnly
    } else if layout == L::MediaVertical {
        LayoutKind::MediaVertical
    } else if layout == L::MediaWide {
        LayoutKind::MediaWide
    } else if layout == L::CongratsFramed {
        LayoutKind::CongratsFramed
    } else if podcast {
        LayoutKind::Podcast
    } else {
        LayoutKind::SplitTextPrimary
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolve.rs"]
mod tests;
