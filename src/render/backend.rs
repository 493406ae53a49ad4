use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::foundation::config::{DocumentOpts, RasterOpts};
use crate::foundation::error::{SlideError, SlideResult};
use crate::model::slide::SlideData;

/// Output formats a slide can be exported to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Editable presentation document.
    Pptx,
    /// Lossless raster image.
    Png,
    /// Lossy raster image.
    Jpg,
}

impl ExportFormat {
    /// Every format, in key order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Jpg, ExportFormat::Png, ExportFormat::Pptx];

    /// Canonical lookup key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Png => "image/png",
            Self::Jpg => "image/jpeg",
        }
    }

    /// File extension including the leading dot.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Pptx => ".pptx",
            Self::Png => ".png",
            Self::Jpg => ".jpg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = SlideError;

    /// Parse a format key; `jpeg` is accepted for [`ExportFormat::Jpg`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pptx" => Ok(Self::Pptx),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            _ => Err(SlideError::unsupported_format(s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A backend that turns one slide into encoded file bytes.
///
/// Renderers hold only options; every call builds its own canvas or document, so one instance
/// can serve concurrent exports.
pub trait SlideRenderer: Send + Sync {
    /// Format this renderer produces.
    fn format(&self) -> ExportFormat;

    /// MIME type of [`SlideRenderer::render`] output.
    fn content_type(&self) -> &'static str {
        self.format().content_type()
    }

    /// File extension of [`SlideRenderer::render`] output.
    fn file_extension(&self) -> &'static str {
        self.format().file_extension()
    }

    /// Render and encode `slide`.
    fn render(&self, slide: &SlideData) -> SlideResult<Vec<u8>>;
}

/// Create the built-in renderer for `format`.
pub fn create_renderer(
    format: ExportFormat,
    raster: &RasterOpts,
    document: &DocumentOpts,
) -> Box<dyn SlideRenderer> {
    match format {
        ExportFormat::Pptx => Box::new(crate::render::document::DocumentRenderer::new(
            document.clone(),
        )),
        ExportFormat::Png => Box::new(crate::render::raster::RasterRenderer::png(raster.clone())),
        ExportFormat::Jpg => Box::new(crate::render::raster::RasterRenderer::jpeg(raster.clone())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
