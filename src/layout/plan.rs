//! Backend-agnostic slide plan.
//!
//! A [`SlidePlan`] is the ordered list of draw operations for one slide, in inch space. Both
//! renderers execute the same plan; neither re-derives geometry.

use serde::Serialize;

use crate::foundation::core::{Rect, Rgba8};
use crate::layout::geometry::{self as g, Slot, TextSlot};
use crate::layout::resolve::LayoutKind;
use crate::model::catalog::TextAlign;
use crate::model::palette::ColorSet;
use crate::model::slide::{EventField, SlideData};

/// What a text block shows; used for debugging and parity checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Small upper-case label.
    Caption,
    /// Main title.
    Headline,
    /// Body text.
    Description,
    /// One event detail line.
    Event,
    /// Author / speaker name.
    Author,
    /// Honoree name on congratulations slides.
    Honoree,
    /// "Featured: ..." line on media cards.
    Featured,
    /// "Host:" label.
    HostLabel,
    /// Podcast host name.
    Host,
    /// Institutional branding.
    Brand,
    /// Label under the QR code.
    QrLabel,
}

/// Vector icon drawn next to event details or as artwork filler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Event date.
    Calendar,
    /// Event time.
    Clock,
    /// Event location.
    MapPin,
    /// Podcast artwork placeholder.
    Microphone,
}

/// A word-wrapped run of text in a box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextBlock {
    /// Semantic role.
    pub role: TextRole,
    /// Text, already case-transformed.
    pub text: String,
    /// Box in inches; lines start at the top edge.
    pub rect: Rect,
    /// Font size in points.
    pub size_pt: f64,
    /// Bold weight.
    pub bold: bool,
    /// Fill color, alpha included.
    #[serde(serialize_with = "ser_color")]
    pub color: Rgba8,
    /// Horizontal alignment within the box.
    pub align: TextAlign,
    /// Lines kept after wrapping.
    pub max_lines: usize,
}

/// One drawing step in inch space.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Two-stop gradient from the top-left to the bottom-right corner of `rect`.
    Gradient {
        /// Filled area.
        rect: Rect,
        /// Color at the top-left corner.
        #[serde(serialize_with = "ser_color")]
        start: Rgba8,
        /// Color at the bottom-right corner.
        #[serde(serialize_with = "ser_color")]
        end: Rgba8,
    },
    /// The slide photo covering the canvas, darkened by a linear ramp toward the bottom.
    FullBleedPhoto {
        /// Overlay alpha at the bottom edge (0 at the top).
        overlay_max_alpha: u8,
    },
    /// Solid rectangle.
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        #[serde(serialize_with = "ser_color")]
        color: Rgba8,
    },
    /// Rectangle outline drawn inside `rect`.
    FrameRect {
        /// Outer edge.
        rect: Rect,
        /// Stroke width in inches.
        stroke: f64,
        /// Stroke color.
        #[serde(serialize_with = "ser_color")]
        color: Rgba8,
    },
    /// Text block.
    Text(TextBlock),
    /// Slide photo, center-cropped square and masked to a circle inside a solid ring.
    CirclePhoto {
        /// Bounding square of the photo (ring excluded).
        rect: Rect,
        /// Ring width in inches, drawn outside `rect`.
        ring: f64,
        /// Ring color.
        #[serde(serialize_with = "ser_color")]
        ring_color: Rgba8,
    },
    /// Slide photo cover-cropped into `rect`.
    RectPhoto {
        /// Target area.
        rect: Rect,
    },
    /// Icon scaled into `rect`.
    Icon {
        /// Which icon.
        kind: IconKind,
        /// Target area.
        rect: Rect,
        /// Stroke color.
        #[serde(serialize_with = "ser_color")]
        color: Rgba8,
    },
    /// QR code for `url` filling `rect`.
    Qr {
        /// Encoded URL.
        url: String,
        /// Target square.
        rect: Rect,
    },
}

/// Ordered draw operations for one slide.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlidePlan {
    /// Layout the plan was compiled for.
    pub layout: LayoutKind,
    /// Draw operations, back to front.
    pub ops: Vec<DrawOp>,
}

impl SlidePlan {
    /// First text block with `role`.
    pub fn text(&self, role: TextRole) -> Option<&TextBlock> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text(t) if t.role == role => Some(t),
            _ => None,
        })
    }

    /// Bounding box of the photo element, if the plan draws one.
    pub fn photo_rect(&self) -> Option<Rect> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::CirclePhoto { rect, .. } | DrawOp::RectPhoto { rect } => Some(*rect),
            DrawOp::FullBleedPhoto { .. } => Some(g::CANVAS.rect()),
            _ => None,
        })
    }

    /// Square of the QR code, if the plan draws one.
    pub fn qr_rect(&self) -> Option<Rect> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Qr { rect, .. } => Some(*rect),
            _ => None,
        })
    }

    /// Whether any step needs the slide photo.
    pub fn uses_photo(&self) -> bool {
        self.ops.iter().any(|op| {
            matches!(
                op,
                DrawOp::FullBleedPhoto { .. } | DrawOp::CirclePhoto { .. } | DrawOp::RectPhoto { .. }
            )
        })
    }
}

fn ser_color<S: serde::Serializer>(c: &Rgba8, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("#{}{:02X}", c.to_hex(), c.a))
}

/// Compile a slide into its plan using its resolved layout and colors.
pub fn compile_slide(slide: &SlideData) -> SlidePlan {
    compile_slide_as(slide, slide.layout())
}

/// Compile a slide into the plan for an explicit layout.
pub fn compile_slide_as(slide: &SlideData, layout: LayoutKind) -> SlidePlan {
    let mut b = PlanBuilder {
        slide,
        colors: slide.colors(),
        ops: Vec::new(),
    };
    match layout {
        LayoutKind::SplitTextPrimary => b.split_text_primary(),
        LayoutKind::FullHero => b.full_hero(),
        LayoutKind::SplitImagePrimary => b.split_image_primary(),
        LayoutKind::CircularSpeaker => b.circular_speaker(),
        LayoutKind::TextOnly => b.text_only(),
        LayoutKind::MediaVertical => b.media_vertical(),
        LayoutKind::MediaWide => b.media_wide(),
        LayoutKind::CongratsFramed => b.congrats_framed(),
        LayoutKind::Podcast => b.podcast(),
    }
    SlidePlan {
        layout,
        ops: b.ops,
    }
}

const DARK_TEXT: Rgba8 = Rgba8::rgb(0x18, 0x1a, 0x1c);
const PLACEHOLDER_LIGHT: Rgba8 = Rgba8::rgb(0xe5, 0xe7, 0xeb);
const PLACEHOLDER_DARK: Rgba8 = Rgba8::rgb(0x37, 0x41, 0x51);

struct PlanBuilder<'a> {
    slide: &'a SlideData,
    colors: ColorSet,
    ops: Vec<DrawOp>,
}

impl PlanBuilder<'_> {
    fn has_photo(&self) -> bool {
        self.slide.image().is_some()
    }

    fn background(&mut self) {
        self.ops.push(DrawOp::Gradient {
            rect: g::CANVAS.rect(),
            start: self.colors.background,
            end: self.colors.gradient_end,
        });
    }

    fn text(&mut self, role: TextRole, slot: TextSlot, text: impl Into<String>, color: Rgba8) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text(TextBlock {
            role,
            text,
            rect: slot.slot.rect(),
            size_pt: slot.size_pt,
            bold: slot.bold,
            color,
            align: slot.align,
            max_lines: slot.max_lines,
        }));
    }

    fn caption(&mut self, slot: TextSlot, color: Rgba8) {
        let slide = self.slide;
        if let Some(c) = slide.caption() {
            self.text(TextRole::Caption, slot, c.to_uppercase(), color);
        }
    }

    fn headline(&mut self, slot: TextSlot, color: Rgba8) {
        let h = self.slide.headline().to_owned();
        self.text(TextRole::Headline, slot, h, color);
    }

    fn description(&mut self, slot: TextSlot, color: Rgba8) {
        let d = self.slide.description().to_owned();
        self.text(TextRole::Description, slot, d, color);
    }

    fn author(&mut self, role: TextRole, slot: TextSlot, color: Rgba8) {
        let slide = self.slide;
        if let Some(a) = slide.author_name() {
            self.text(role, slot, a.to_owned(), color);
        }
    }

    fn brand(&mut self, slot: TextSlot, color: Rgba8) {
        self.text(TextRole::Brand, slot, g::BRAND_TEXT, color);
    }

    /// Icon + text line per event field, stacked downward from `area`'s top-left corner.
    fn event_stack(&mut self, area: Slot) {
        let text_color = self.colors.text.with_alpha(230);
        let icon_color = self.colors.accent;
        let slide = self.slide;
        for (i, (field, value)) in slide.event().lines().into_iter().enumerate() {
            let y = area.y + g::EVENT_STEP * i as f64;
            let icon_y = y + (g::EVENT_LINE_H - g::EVENT_ICON) / 2.0;
            self.ops.push(DrawOp::Icon {
                kind: match field {
                    EventField::Date => IconKind::Calendar,
                    EventField::Time => IconKind::Clock,
                    EventField::Location => IconKind::MapPin,
                },
                rect: Slot::square(area.x, icon_y, g::EVENT_ICON).rect(),
                color: icon_color,
            });
            let slot = TextSlot {
                slot: Slot::new(
                    area.x + g::EVENT_TEXT_DX,
                    y,
                    area.w - g::EVENT_TEXT_DX,
                    g::EVENT_LINE_H,
                ),
                size_pt: g::EVENT_PT,
                bold: false,
                max_lines: 1,
                align: TextAlign::Left,
            };
            self.text(TextRole::Event, slot, value, text_color);
        }
    }

    /// All event fields on one centered line.
    fn event_inline(&mut self, slot: TextSlot) {
        let joined = self
            .slide
            .event()
            .lines()
            .into_iter()
            .map(|(_, v)| v)
            .collect::<Vec<_>>()
            .join(g::EVENT_INLINE_SEP);
        let color = self.colors.text.with_alpha(230);
        self.text(TextRole::Event, slot, joined, color);
    }

    fn circle_photo(&mut self, slot: Slot, ring: f64) {
        if self.has_photo() {
            self.ops.push(DrawOp::CirclePhoto {
                rect: slot.rect(),
                ring,
                ring_color: self.colors.accent,
            });
        }
    }

    fn rect_photo(&mut self, slot: Slot, placeholder: Option<Rgba8>) {
        if self.has_photo() {
            self.ops.push(DrawOp::RectPhoto { rect: slot.rect() });
        } else if let Some(color) = placeholder {
            self.ops.push(DrawOp::FillRect {
                rect: slot.rect(),
                color,
            });
        }
    }

    fn qr(&mut self, slot: Slot, label_color: Rgba8) {
        let Some(url) = self.slide.publication_link() else {
            return;
        };
        self.ops.push(DrawOp::Qr {
            url: url.to_owned(),
            rect: slot.rect(),
        });
        self.text(
            TextRole::QrLabel,
            g::qr_label_slot(slot),
            g::QR_LABEL,
            label_color,
        );
    }

    fn split_text_primary(&mut self) {
        use g::split_text as k;
        let text = self.colors.text;
        self.background();
        self.caption(k::CAPTION, text.with_alpha(200));
        let headline_y = if self.slide.caption().is_some() {
            k::HEADLINE.slot.y
        } else {
            k::HEADLINE_Y_NO_CAPTION
        };
        let headline = TextSlot {
            slot: k::HEADLINE.slot.at_y(headline_y),
            ..k::HEADLINE
        };
        let description = TextSlot {
            slot: k::DESCRIPTION.slot.at_y(headline_y + k::DESCRIPTION_DY),
            ..k::DESCRIPTION
        };
        self.headline(headline, text);
        self.description(description, text);
        self.event_stack(k::EVENT);
        self.author(TextRole::Author, k::AUTHOR, self.colors.accent);
        self.brand(k::BRAND, text.with_alpha(180));
        self.circle_photo(k::PHOTO, k::RING);
        self.qr(k::QR, text.with_alpha(180));
    }

    fn full_hero(&mut self) {
        use g::hero as k;
        let white = Rgba8::WHITE;
        self.background();
        if self.has_photo() {
            self.ops.push(DrawOp::FullBleedPhoto {
                overlay_max_alpha: g::OVERLAY_MAX_ALPHA,
            });
        }
        self.caption(k::CAPTION, white.with_alpha(204));
        self.headline(k::HEADLINE, white);
        self.description(k::DESCRIPTION, white.with_alpha(230));
        self.author(TextRole::Author, k::AUTHOR, self.colors.accent);
        self.brand(k::BRAND, white.with_alpha(153));
        self.qr(k::QR, white.with_alpha(204));
    }

    fn split_image_primary(&mut self) {
        use g::split_image as k;
        let text = self.colors.text;
        self.background();
        self.caption(k::CAPTION, text.with_alpha(200));
        self.headline(k::HEADLINE, text);
        self.description(k::DESCRIPTION, text.with_alpha(230));
        self.event_stack(k::EVENT);
        self.author(TextRole::Author, k::AUTHOR, self.colors.accent);
        self.brand(k::BRAND, text.with_alpha(153));
        self.rect_photo(k::PHOTO, None);
        self.qr(k::QR, text.with_alpha(180));
    }

    fn circular_speaker(&mut self) {
        use g::circular as k;
        let text = self.colors.text;
        self.background();
        self.caption(k::CAPTION, text.with_alpha(200));
        self.headline(k::HEADLINE, text);
        self.description(k::DESCRIPTION, text.with_alpha(230));
        self.event_inline(k::EVENT);
        self.author(TextRole::Author, k::AUTHOR, self.colors.accent);
        self.brand(k::BRAND, text.with_alpha(180));
        self.circle_photo(k::PHOTO, k::RING);
        self.qr(k::QR, text.with_alpha(180));
    }

    fn text_only(&mut self) {
        use g::text_only as k;
        let text = self.colors.text;
        self.background();
        self.caption(k::CAPTION, text.with_alpha(200));
        self.headline(k::HEADLINE, text);
        self.description(k::DESCRIPTION, text.with_alpha(230));
        self.event_inline(k::EVENT);
        self.author(TextRole::Author, k::AUTHOR, self.colors.accent);
        self.brand(k::BRAND, text.with_alpha(180));
        self.qr(k::QR, text.with_alpha(180));
    }

    fn media_vertical(&mut self) {
        use g::media_vertical as k;
        let text = self.colors.text;
        self.background();
        self.ops.push(DrawOp::FillRect {
            rect: k::CARD.rect(),
            color: Rgba8::WHITE,
        });
        let top = if self.has_photo() {
            k::CONTENT_Y_PHOTO
        } else {
            k::CONTENT_Y_NO_PHOTO
        };
        let at = |slot: TextSlot, y: f64| TextSlot {
            slot: slot.slot.at_y(y),
            ..slot
        };
        self.caption(at(k::CAPTION, top), DARK_TEXT.with_alpha(153));
        self.headline(at(k::HEADLINE, top + k::HEADLINE_DY), DARK_TEXT);
        self.description(
            at(k::DESCRIPTION, top + k::DESCRIPTION_DY),
            DARK_TEXT.with_alpha(204),
        );
        let slide = self.slide;
        if let Some(a) = slide.author_name() {
            let line = format!("Featured: {a}");
            self.text(TextRole::Featured, k::FEATURED, line, self.colors.accent);
        }
        self.brand(k::BRAND, text.with_alpha(180));
        self.rect_photo(k::PHOTO, None);
        self.qr(k::QR, text.with_alpha(180));
    }

    fn media_wide(&mut self) {
        use g::media_wide as k;
        let text = self.colors.text;
        self.background();
        self.caption(k::CAPTION, self.colors.accent.with_alpha(204));
        self.headline(k::HEADLINE, text);
        self.description(k::DESCRIPTION, text.with_alpha(204));
        self.author(TextRole::Author, k::AUTHOR, self.colors.accent);
        self.brand(k::BRAND, text.with_alpha(153));
        self.rect_photo(k::PHOTO, Some(PLACEHOLDER_LIGHT));
        self.qr(k::QR, text.with_alpha(180));
    }

    fn congrats_framed(&mut self) {
        use g::congrats as k;
        let text = self.colors.text;
        let accent = self.colors.accent;
        self.background();
        self.caption(k::CAPTION, accent);
        self.headline(k::HEADLINE, accent);
        self.description(k::DESCRIPTION, text.with_alpha(230));
        self.author(TextRole::Honoree, k::HONOREE, text);
        self.brand(k::BRAND, text.with_alpha(153));
        if self.has_photo() {
            let photo = k::PHOTO.rect();
            let frame = photo.inflate(k::FRAME_INSET, k::FRAME_INSET);
            self.ops.push(DrawOp::FrameRect {
                rect: frame,
                stroke: k::FRAME_STROKE,
                color: accent,
            });
            for rect in corner_accents(frame.inflate(k::CORNER_OUTSET, k::CORNER_OUTSET)) {
                self.ops.push(DrawOp::FillRect {
                    rect,
                    color: accent,
                });
            }
            self.ops.push(DrawOp::RectPhoto { rect: photo });
        }
        self.qr(k::QR, text.with_alpha(180));
    }

    fn podcast(&mut self) {
        use g::podcast as k;
        let text = self.colors.text;
        self.background();
        self.caption(k::CAPTION, text.with_alpha(153));
        self.headline(k::HEADLINE, text);
        self.description(k::DESCRIPTION, text.with_alpha(204));
        if self.slide.author_name().is_some() {
            self.text(TextRole::HostLabel, k::HOST_LABEL, "Host:", text.with_alpha(153));
            self.author(TextRole::Host, k::HOST, self.colors.accent);
        }
        self.brand(k::BRAND, text.with_alpha(153));
        if self.has_photo() {
            self.ops.push(DrawOp::RectPhoto {
                rect: k::ARTWORK.rect(),
            });
        } else {
            self.ops.push(DrawOp::FillRect {
                rect: k::ARTWORK.rect(),
                color: PLACEHOLDER_DARK,
            });
            self.ops.push(DrawOp::Icon {
                kind: IconKind::Microphone,
                rect: k::MIC.rect(),
                color: Rgba8::WHITE.with_alpha(128),
            });
        }
        self.qr(k::QR, text.with_alpha(180));
    }
}

/// Eight thin bars forming L-shaped accents at the corners of `outer`.
fn corner_accents(outer: Rect) -> [Rect; 8] {
    let len = g::congrats::CORNER_LEN;
    let t = g::congrats::CORNER_THICK;
    let (x0, y0, x1, y1) = (outer.x0, outer.y0, outer.x1, outer.y1);
    [
        Rect::new(x0, y0, x0 + len, y0 + t),
        Rect::new(x0, y0, x0 + t, y0 + len),
        Rect::new(x1 - len, y0, x1, y0 + t),
        Rect::new(x1 - t, y0, x1, y0 + len),
        Rect::new(x0, y1 - t, x0 + len, y1),
        Rect::new(x0, y1 - len, x0 + t, y1),
        Rect::new(x1 - len, y1 - t, x1, y1),
        Rect::new(x1 - t, y1 - len, x1, y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
