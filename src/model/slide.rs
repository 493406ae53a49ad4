use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::export::service::suggested_file_name;
use crate::layout::resolve::{LayoutKind, resolve_layout};
use crate::model::catalog::{Category, TemplateStyle, resolve_style};
use crate::model::palette::{ColorSet, resolve_colors};
use crate::render::backend::ExportFormat;

/// Free-text event fields shown by event-capable layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event date, e.g. "March 14, 2026".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Event time, e.g. "6:00 PM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Event location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Which event field a line came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventField {
    /// Date line.
    Date,
    /// Time line.
    Time,
    /// Location line.
    Location,
}

impl EventDetails {
    /// Return `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.location.is_none()
    }

    /// Present fields in display order (date, time, location).
    pub fn lines(&self) -> Vec<(EventField, &str)> {
        [
            (EventField::Date, self.date.as_deref()),
            (EventField::Time, self.time.as_deref()),
            (EventField::Location, self.location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(f, v)| v.map(|v| (f, v)))
        .collect()
    }

    fn normalized(self) -> Self {
        Self {
            date: clean_opt(self.date),
            time: clean_opt(self.time),
            location: clean_opt(self.location),
        }
    }
}

/// Immutable content of one slide.
///
/// Built with [`SlideData::builder`]. Text is trimmed on construction and blank optional
/// fields become `None`. Photo bytes are shared, so cloning a slide to render several
/// formats concurrently does not copy the image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlideFields")]
pub struct SlideData {
    headline: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publication_link: Option<String>,
    #[serde(skip)]
    image: Option<Arc<[u8]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_description: Option<String>,
    template_id: String,
    category: String,
    #[serde(skip_serializing_if = "EventDetails::is_empty")]
    event: EventDetails,
}

/// Template id used when none is given.
pub const DEFAULT_TEMPLATE_ID: &str = "template1";

impl SlideData {
    /// Start building a slide from its two required fields.
    pub fn builder(headline: impl Into<String>, description: impl Into<String>) -> SlideDataBuilder {
        SlideDataBuilder {
            inner: SlideData {
                headline: headline.into(),
                description: description.into(),
                caption: None,
                author_name: None,
                publication_link: None,
                image: None,
                image_description: None,
                template_id: DEFAULT_TEMPLATE_ID.to_owned(),
                category: Category::DEFAULT.key().to_owned(),
                event: EventDetails::default(),
            },
        }
    }

    /// Main display text.
    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// Supporting body text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Small label shown above the headline.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Author, speaker, honoree or host name depending on layout.
    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    /// URL encoded into the QR code.
    pub fn publication_link(&self) -> Option<&str> {
        self.publication_link.as_deref()
    }

    /// Raw photo bytes.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// AI-derived description of the photo.
    pub fn image_description(&self) -> Option<&str> {
        self.image_description.as_deref()
    }

    /// Template id as given.
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Category key as given (may be unknown; resolution falls back).
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Event fields.
    pub fn event(&self) -> &EventDetails {
        &self.event
    }

    /// Category-scoped style, if the (category, template id) pair resolves.
    pub fn style(&self) -> Option<&'static TemplateStyle> {
        resolve_style(&self.category, &self.template_id)
    }

    /// Colors after the full fallback chain.
    pub fn colors(&self) -> ColorSet {
        resolve_colors(self)
    }

    /// Layout both renderers use for this slide.
    pub fn layout(&self) -> LayoutKind {
        resolve_layout(self.style())
    }

    /// Download name for this slide in `format`, e.g. `slide_Big_News.png`.
    pub fn suggested_file_name(&self, format: ExportFormat) -> String {
        suggested_file_name(&self.headline, format.file_extension())
    }

    /// Copy of this slide with different photo bytes.
    pub fn with_image(&self, image: impl Into<Arc<[u8]>>) -> Self {
        Self {
            image: Some(image.into()),
            ..self.clone()
        }
    }
}

/// Builder for [`SlideData`].
#[derive(Clone, Debug)]
pub struct SlideDataBuilder {
    inner: SlideData,
}

impl SlideDataBuilder {
    /// Set the caption.
    pub fn caption(mut self, v: impl Into<String>) -> Self {
        self.inner.caption = Some(v.into());
        self
    }

    /// Set the author name.
    pub fn author_name(mut self, v: impl Into<String>) -> Self {
        self.inner.author_name = Some(v.into());
        self
    }

    /// Set the publication link.
    pub fn publication_link(mut self, v: impl Into<String>) -> Self {
        self.inner.publication_link = Some(v.into());
        self
    }

    /// Set the photo bytes.
    pub fn image(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.inner.image = Some(bytes.into());
        self
    }

    /// Set the photo description.
    pub fn image_description(mut self, v: impl Into<String>) -> Self {
        self.inner.image_description = Some(v.into());
        self
    }

    /// Set the template id.
    pub fn template_id(mut self, v: impl Into<String>) -> Self {
        self.inner.template_id = v.into();
        self
    }

    /// Set the category key.
    pub fn category(mut self, v: impl Into<String>) -> Self {
        self.inner.category = v.into();
        self
    }

    /// Set the event date.
    pub fn event_date(mut self, v: impl Into<String>) -> Self {
        self.inner.event.date = Some(v.into());
        self
    }

    /// Set the event time.
    pub fn event_time(mut self, v: impl Into<String>) -> Self {
        self.inner.event.time = Some(v.into());
        self
    }

    /// Set the event location.
    pub fn event_location(mut self, v: impl Into<String>) -> Self {
        self.inner.event.location = Some(v.into());
        self
    }

    /// Replace all event fields.
    pub fn event(mut self, event: EventDetails) -> Self {
        self.inner.event = event;
        self
    }

    /// Finish, trimming text and dropping blank optionals.
    pub fn build(self) -> SlideData {
        let s = self.inner;
        let template_id = s.template_id.trim();
        let category = s.category.trim();
        SlideData {
            headline: s.headline.trim().to_owned(),
            description: s.description.trim().to_owned(),
            caption: clean_opt(s.caption),
            author_name: clean_opt(s.author_name),
            publication_link: clean_opt(s.publication_link),
            image: s.image.filter(|b| !b.is_empty()),
            image_description: clean_opt(s.image_description),
            template_id: if template_id.is_empty() {
                DEFAULT_TEMPLATE_ID.to_owned()
            } else {
                template_id.to_owned()
            },
            category: if category.is_empty() {
                Category::DEFAULT.key().to_owned()
            } else {
                category.to_owned()
            },
            event: s.event.normalized(),
        }
    }
}

fn clean_opt(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
struct SlideFields {
    headline: String,
    description: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    publication_link: Option<String>,
    #[serde(default)]
    image_description: Option<String>,
    #[serde(default)]
    template_id: Option<String>,
    #[serde(default, alias = "slide_category")]
    category: Option<String>,
    #[serde(default)]
    event: EventDetails,
    #[serde(default)]
    event_date: Option<String>,
    #[serde(default)]
    event_time: Option<String>,
    #[serde(default)]
    event_location: Option<String>,
}

impl From<SlideFields> for SlideData {
    fn from(f: SlideFields) -> Self {
        let mut event = f.event;
        event.date = event.date.or(f.event_date);
        event.time = event.time.or(f.event_time);
        event.location = event.location.or(f.event_location);

        let mut b = SlideData::builder(f.headline, f.description).event(event);
        b.inner.caption = f.caption;
        b.inner.author_name = f.author_name;
        b.inner.publication_link = f.publication_link;
        b.inner.image_description = f.image_description;
        if let Some(id) = f.template_id {
            b = b.template_id(id);
        }
        if let Some(c) = f.category {
            b = b.category(c);
        }
        b.build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/slide.rs"]
mod tests;
