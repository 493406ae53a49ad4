/// Convenience result type used across slideforge.
pub type SlideResult<T> = Result<T, SlideError>;

/// Top-level error taxonomy for rendering and export calls.
///
/// Style resolution and missing fonts never produce errors; they degrade to defaults.
/// Everything listed here is fatal to the single call that raised it.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// The requested export format has no registered renderer.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Source photo bytes could not be decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// PNG/JPEG/QR encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Presentation packaging (ZIP/XML) failed.
    #[error("document error: {0}")]
    Document(String),

    /// Invalid caller-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::UnsupportedFormat`] value.
    pub fn unsupported_format(key: impl Into<String>) -> Self {
        Self::UnsupportedFormat(key.into())
    }

    /// Build a [`SlideError::ImageDecode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`SlideError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SlideError::Document`] value.
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Build a [`SlideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` for [`SlideError::UnsupportedFormat`].
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}

impl From<zip::result::ZipError> for SlideError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::document(e.to_string())
    }
}

impl From<std::fmt::Error> for SlideError {
    fn from(e: std::fmt::Error) -> Self {
        Self::document(format!("xml formatting failed: {e}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
