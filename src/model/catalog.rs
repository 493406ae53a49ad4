//! Static template catalog.
//!
//! Seven content categories, each with an ordered list of [`TemplateStyle`]s. The catalog is
//! plain `static` data; lookups never allocate and never fail. Unknown category keys resolve
//! to [`Category::DEFAULT`].

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Content category scoping which templates are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Faculty research highlights.
    ResearchSpotlight,
    /// General student-facing screens.
    StudentScreens,
    /// Talks, panels and other events.
    Events,
    /// Press coverage.
    MediaMention,
    /// Awards and honors.
    Congratulations,
    /// Podcast episodes.
    Podcast,
    /// General announcements.
    Announcement,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Category; 7] = [
        Category::ResearchSpotlight,
        Category::StudentScreens,
        Category::Events,
        Category::MediaMention,
        Category::Congratulations,
        Category::Podcast,
        Category::Announcement,
    ];

    /// Category used when a key is unknown.
    pub const DEFAULT: Category = Category::ResearchSpotlight;

    /// Stable snake_case key.
    pub fn key(self) -> &'static str {
        match self {
            Self::ResearchSpotlight => "research_spotlight",
            Self::StudentScreens => "student_screens",
            Self::Events => "events",
            Self::MediaMention => "media_mention",
            Self::Congratulations => "congratulations",
            Self::Podcast => "podcast",
            Self::Announcement => "announcement",
        }
    }

    /// Parse a key; `-` and `_` are interchangeable and case is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        let norm = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.key() == norm)
    }

    /// Parse a key, falling back to [`Category::DEFAULT`].
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Self::DEFAULT)
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        self.templates().name
    }

    /// The category's catalog entry.
    pub fn templates(self) -> &'static CategoryTemplates {
        &CATALOG[self as usize]
    }
}

/// Layout family a template asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    /// Photo covers the whole slide.
    FullHero,
    /// Text on the left, portrait on the right.
    SplitTextPrimary,
    /// Photo fills the left half.
    SplitImagePrimary,
    /// Centered circular portrait.
    EventSpeaker,
    /// No photo at all.
    TextOnly,
    /// White media card with photo on top.
    MediaVertical,
    /// Wide media layout with photo panel on the left.
    MediaWide,
    /// Framed honoree portrait.
    CongratsFramed,
    /// Podcast artwork, standard variant.
    PodcastStandard,
    /// Podcast artwork, feature variant.
    PodcastFeature,
}

impl LayoutType {
    /// Stable snake_case key.
    pub fn key(self) -> &'static str {
        match self {
            Self::FullHero => "full_hero",
            Self::SplitTextPrimary => "split_text_primary",
            Self::SplitImagePrimary => "split_image_primary",
            Self::EventSpeaker => "event_speaker",
            Self::TextOnly => "text_only",
            Self::MediaVertical => "media_vertical",
            Self::MediaWide => "media_wide",
            Self::CongratsFramed => "congrats_framed",
            Self::PodcastStandard => "podcast_standard",
            Self::PodcastFeature => "podcast_feature",
        }
    }
}

/// Where a template places its photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    /// Right-hand side.
    Right,
    /// Left-hand side.
    Left,
    /// Full bleed.
    Full,
    /// Top of a card.
    Top,
    /// Circular portrait.
    Circular,
    /// Centered.
    Center,
    /// No photo.
    None,
}

/// Relative photo size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    /// Small.
    Small,
    /// Medium.
    Medium,
    /// Large.
    Large,
    /// Full canvas.
    Full,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// One named visual style within a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateStyle {
    /// Identifier, unique within its category.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description for template pickers.
    pub description: &'static str,
    /// Requested layout family.
    pub layout_type: LayoutType,
    /// Background (gradient start) color, `#RRGGBB`.
    pub background_color: &'static str,
    /// Gradient end color, `#RRGGBB`.
    pub gradient_end_color: &'static str,
    /// Primary text color, `#RRGGBB`.
    pub text_color: &'static str,
    /// Accent color, `#RRGGBB`.
    pub accent_color: &'static str,
    /// Photo placement.
    pub image_position: ImagePosition,
    /// Photo size class.
    pub image_size: ImageSize,
    /// Text alignment.
    pub text_alignment: TextAlign,
}

impl TemplateStyle {
    /// Parsed background color.
    pub fn background(&self) -> Rgba8 {
        parse_or_black(self.background_color)
    }

    /// Parsed gradient end color.
    pub fn gradient_end(&self) -> Rgba8 {
        parse_or_black(self.gradient_end_color)
    }

    /// Parsed text color.
    pub fn text(&self) -> Rgba8 {
        parse_or_black(self.text_color)
    }

    /// Parsed accent color.
    pub fn accent(&self) -> Rgba8 {
        parse_or_black(self.accent_color)
    }
}

fn parse_or_black(hex: &str) -> Rgba8 {
    Rgba8::from_hex(hex).unwrap_or(Rgba8::BLACK)
}

/// A category mapped to its display name and ordered templates.
#[derive(Debug)]
pub struct CategoryTemplates {
    /// Owning category.
    pub category: Category,
    /// Display name.
    pub name: &'static str,
    /// Templates in presentation order.
    pub templates: &'static [TemplateStyle],
}

impl CategoryTemplates {
    /// Template with `id`, if the category has one.
    pub fn find(&self, id: &str) -> Option<&'static TemplateStyle> {
        self.templates.iter().find(|t| t.id == id)
    }
}

const CBS_BLUE: [&str; 4] = ["#003DA5", "#0052CC", "#FFFFFF", "#009bdb"];
const DARK: [&str; 4] = ["#1a1a1a", "#2d2d2d", "#FFFFFF", "#009bdb"];
const LIGHT: [&str; 4] = ["#f8f9fa", "#e9ecef", "#181a1c", "#003DA5"];
const SKY: [&str; 4] = ["#0052CC", "#009bdb", "#FFFFFF", "#FFD100"];
const NAVY: [&str; 4] = ["#0b1f3a", "#003DA5", "#FFFFFF", "#7ec8f0"];
const GOLD: [&str; 4] = ["#14213d", "#1f3563", "#FFFFFF", "#d4a017"];
const STUDIO: [&str; 4] = ["#111827", "#1f2937", "#FFFFFF", "#009bdb"];

#[allow(clippy::too_many_arguments)]
const fn tpl(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    layout_type: LayoutType,
    image_position: ImagePosition,
    image_size: ImageSize,
    text_alignment: TextAlign,
    colors: [&'static str; 4],
) -> TemplateStyle {
    TemplateStyle {
        id,
        name,
        description,
        layout_type,
        background_color: colors[0],
        gradient_end_color: colors[1],
        text_color: colors[2],
        accent_color: colors[3],
        image_position,
        image_size,
        text_alignment,
    }
}

use ImagePosition as P;
use ImageSize as S;
use LayoutType as L;
use TextAlign as A;

static RESEARCH: [TemplateStyle; 3] = [
    tpl(
        "research_classic",
        "Classic Spotlight",
        "Headline and summary with a circular faculty portrait on the right",
        L::SplitTextPrimary,
        P::Right,
        S::Medium,
        A::Left,
        CBS_BLUE,
    ),
    tpl(
        "research_hero",
        "Hero Image",
        "Full-bleed photo with text over a dark gradient",
        L::FullHero,
        P::Full,
        S::Full,
        A::Left,
        DARK,
    ),
    tpl(
        "research_feature",
        "Feature Split",
        "Photo fills the left half, text on the right",
        L::SplitImagePrimary,
        P::Left,
        S::Large,
        A::Left,
        LIGHT,
    ),
];

static STUDENT: [TemplateStyle; 3] = [
    tpl(
        "student_bold",
        "Bold Statement",
        "Large centered type without a photo",
        L::TextOnly,
        P::None,
        S::Small,
        A::Center,
        SKY,
    ),
    tpl(
        "student_photo",
        "Photo Split",
        "Student photo on the left with details on the right",
        L::SplitImagePrimary,
        P::Left,
        S::Large,
        A::Left,
        CBS_BLUE,
    ),
    tpl(
        "student_hero",
        "Campus Hero",
        "Full-bleed campus photo",
        L::FullHero,
        P::Full,
        S::Full,
        A::Left,
        DARK,
    ),
];

static EVENTS: [TemplateStyle; 3] = [
    tpl(
        "event_speaker",
        "Speaker Spotlight",
        "Centered circular speaker portrait with event details",
        L::EventSpeaker,
        P::Circular,
        S::Medium,
        A::Center,
        NAVY,
    ),
    tpl(
        "event_classic",
        "Event Classic",
        "Event details on the left with the speaker on the right",
        L::SplitTextPrimary,
        P::Right,
        S::Medium,
        A::Left,
        CBS_BLUE,
    ),
    tpl(
        "event_minimal",
        "Event Minimal",
        "Centered event announcement without a photo",
        L::TextOnly,
        P::None,
        S::Small,
        A::Center,
        DARK,
    ),
];

static MEDIA: [TemplateStyle; 3] = [
    tpl(
        "media_card",
        "Media Card",
        "Article card with the photo on top and a featured byline",
        L::MediaVertical,
        P::Top,
        S::Medium,
        A::Left,
        CBS_BLUE,
    ),
    tpl(
        "media_wide",
        "Media Wide",
        "Photo panel on the left with the story on the right",
        L::MediaWide,
        P::Left,
        S::Large,
        A::Left,
        LIGHT,
    ),
    tpl(
        "media_hero",
        "Media Hero",
        "Full-bleed press photo",
        L::FullHero,
        P::Full,
        S::Full,
        A::Left,
        DARK,
    ),
];

static CONGRATS: [TemplateStyle; 2] = [
    tpl(
        "congrats_framed",
        "Framed Honoree",
        "Framed portrait with the honoree's name in large type",
        L::CongratsFramed,
        P::Right,
        S::Large,
        A::Left,
        GOLD,
    ),
    tpl(
        "congrats_portrait",
        "Portrait Circle",
        "Centered circular portrait",
        L::SplitTextPrimary,
        P::Center,
        S::Medium,
        A::Center,
        CBS_BLUE,
    ),
];

static PODCAST: [TemplateStyle; 2] = [
    tpl(
        "podcast_standard",
        "Podcast Standard",
        "Episode artwork on the left with episode details",
        L::PodcastStandard,
        P::Left,
        S::Large,
        A::Left,
        STUDIO,
    ),
    tpl(
        "podcast_feature",
        "Podcast Feature",
        "Episode artwork with an accented host line",
        L::PodcastFeature,
        P::Left,
        S::Large,
        A::Left,
        NAVY,
    ),
];

static ANNOUNCEMENT: [TemplateStyle; 3] = [
    tpl(
        "announcement_bold",
        "Bold Announcement",
        "Centered headline without a photo",
        L::TextOnly,
        P::None,
        S::Small,
        A::Center,
        CBS_BLUE,
    ),
    tpl(
        "announcement_split",
        "Announcement Split",
        "Text on the left with an optional portrait",
        L::SplitTextPrimary,
        P::Right,
        S::Medium,
        A::Left,
        DARK,
    ),
    tpl(
        "announcement_hero",
        "Announcement Hero",
        "Full-bleed photo announcement",
        L::FullHero,
        P::Full,
        S::Full,
        A::Left,
        DARK,
    ),
];

static CATALOG: [CategoryTemplates; 7] = [
    CategoryTemplates {
        category: Category::ResearchSpotlight,
        name: "Research Spotlight",
        templates: &RESEARCH,
    },
    CategoryTemplates {
        category: Category::StudentScreens,
        name: "Student Screens",
        templates: &STUDENT,
    },
    CategoryTemplates {
        category: Category::Events,
        name: "Events",
        templates: &EVENTS,
    },
    CategoryTemplates {
        category: Category::MediaMention,
        name: "Media Mention",
        templates: &MEDIA,
    },
    CategoryTemplates {
        category: Category::Congratulations,
        name: "Congratulations",
        templates: &CONGRATS,
    },
    CategoryTemplates {
        category: Category::Podcast,
        name: "Podcast",
        templates: &PODCAST,
    },
    CategoryTemplates {
        category: Category::Announcement,
        name: "Announcements",
        templates: &ANNOUNCEMENT,
    },
];

/// Catalog entry for a category key, falling back to the default category.
pub fn category_templates(category: &str) -> &'static CategoryTemplates {
    Category::resolve(category).templates()
}

/// Style whose id matches `template_id` within `category`'s templates.
///
/// Unknown categories are looked up in the default category.
pub fn resolve_style(category: &str, template_id: &str) -> Option<&'static TemplateStyle> {
    category_templates(category).find(template_id.trim())
}

/// Template listing record for pickers and the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateListing {
    /// Template id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// Layout-type tag.
    pub layout_type: LayoutType,
    /// Background color.
    pub background_color: &'static str,
    /// Gradient end color.
    pub gradient_end_color: &'static str,
    /// Text color.
    pub text_color: &'static str,
    /// Accent color.
    pub accent_color: &'static str,
    /// Photo placement.
    pub image_position: ImagePosition,
    /// Photo size class.
    pub image_size: ImageSize,
    /// Text alignment.
    pub text_alignment: TextAlign,
}

impl From<&TemplateStyle> for TemplateListing {
    fn from(t: &TemplateStyle) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            layout_type: t.layout_type,
            background_color: t.background_color,
            gradient_end_color: t.gradient_end_color,
            text_color: t.text_color,
            accent_color: t.accent_color,
            image_position: t.image_position,
            image_size: t.image_size,
            text_alignment: t.text_alignment,
        }
    }
}

/// Ordered template listing for a category key (unknown keys use the default category).
pub fn list_templates(category: &str) -> Vec<TemplateListing> {
    category_templates(category)
        .templates
        .iter()
        .map(TemplateListing::from)
        .collect()
}

/// Category listing record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    /// Category key.
    pub id: Category,
    /// Display name.
    pub name: &'static str,
    /// Number of templates offered.
    pub template_count: usize,
}

/// Every category with its display name, in catalog order.
pub fn list_categories() -> Vec<CategoryListing> {
    Category::ALL
        .into_iter()
        .map(|c| CategoryListing {
            id: c,
            name: c.display_name(),
            template_count: c.templates().templates.len(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/model/catalog.rs"]
mod tests;
