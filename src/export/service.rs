//! Format-keyed dispatch over the registered renderers.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::foundation::config::{DocumentOpts, RasterOpts};
use crate::foundation::error::{SlideError, SlideResult};
use crate::model::slide::SlideData;
use crate::render::backend::{ExportFormat, SlideRenderer, create_renderer};

/// One rendered file with everything a caller needs to store or send it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    /// Format the bytes are encoded in.
    pub format: ExportFormat,
    /// Encoded file content.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// MIME type.
    pub content_type: &'static str,
    /// Extension including the leading dot.
    pub file_extension: &'static str,
    /// Suggested file name derived from the headline.
    pub file_name: String,
}

/// Registry of one renderer per [`ExportFormat`].
///
/// Every call renders fresh; nothing is cached between exports.
#[derive(Clone)]
pub struct ExportService {
    renderers: HashMap<ExportFormat, Arc<dyn SlideRenderer>>,
    threads: Option<usize>,
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService")
            .field("formats", &self.supported_formats())
            .field("threads", &self.threads)
            .finish()
    }
}

impl ExportService {
    /// Service with the built-in PPTX, PNG and JPEG renderers at default options.
    pub fn new() -> Self {
        Self::with_opts(RasterOpts::default(), DocumentOpts::default())
    }

    /// Service with the built-in renderers configured by `raster` and `document`.
    pub fn with_opts(raster: RasterOpts, document: DocumentOpts) -> Self {
        let mut svc = Self::empty();
        for format in ExportFormat::ALL {
            svc.renderers
                .insert(format, Arc::from(create_renderer(format, &raster, &document)));
        }
        svc
    }

    /// Service with no renderers registered.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
            threads: None,
        }
    }

    /// Cap the worker threads used by [`ExportService::export_many`]; `None` uses rayon's
    /// default.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Register `renderer` for its format, replacing any previous one.
    pub fn register(&mut self, renderer: impl SlideRenderer + 'static) {
        let format = renderer.format();
        tracing::debug!(format = format.key(), "renderer registered");
        self.renderers.insert(format, Arc::new(renderer));
    }

    /// Registered formats in key order.
    pub fn supported_formats(&self) -> Vec<ExportFormat> {
        let mut formats: Vec<_> = self.renderers.keys().copied().collect();
        formats.sort_by_key(|f| f.key());
        formats
    }

    /// Render `slide` for the format named by `key`.
    pub fn export(&self, slide: &SlideData, key: &str) -> SlideResult<ExportedFile> {
        self.export_format(slide, key.parse()?)
    }

    /// Render `slide` as `format`.
    #[tracing::instrument(level = "info", skip_all, fields(format = format.key(), layout = slide.layout().name()))]
    pub fn export_format(&self, slide: &SlideData, format: ExportFormat) -> SlideResult<ExportedFile> {
        let renderer = self.renderer(format)?;
        let bytes = renderer.render(slide)?;
        tracing::info!(bytes = bytes.len(), "slide exported");
        Ok(ExportedFile {
            format,
            bytes,
            content_type: renderer.content_type(),
            file_extension: renderer.file_extension(),
            file_name: suggested_file_name(slide.headline(), renderer.file_extension()),
        })
    }

    /// Render `slide` for every key in `keys`, in parallel. Results keep the order of `keys`.
    ///
    /// Keys are validated before any rendering starts.
    pub fn export_many(&self, slide: &SlideData, keys: &[&str]) -> SlideResult<Vec<ExportedFile>> {
        let formats = keys
            .iter()
            .map(|k| -> SlideResult<ExportFormat> {
                let format: ExportFormat = k.parse()?;
                self.renderer(format)?;
                Ok(format)
            })
            .collect::<SlideResult<Vec<_>>>()?;

        let pool = build_thread_pool(self.threads)?;
        pool.install(|| {
            formats
                .par_iter()
                .map(|format| self.export_format(slide, *format))
                .collect()
        })
    }

    /// MIME type for the format named by `key`.
    pub fn content_type(&self, key: &str) -> SlideResult<&'static str> {
        let format: ExportFormat = key.parse()?;
        Ok(self.renderer(format)?.content_type())
    }

    /// File extension for the format named by `key`.
    pub fn file_extension(&self, key: &str) -> SlideResult<&'static str> {
        let format: ExportFormat = key.parse()?;
        Ok(self.renderer(format)?.file_extension())
    }

    fn renderer(&self, format: ExportFormat) -> SlideResult<&Arc<dyn SlideRenderer>> {
        self.renderers
            .get(&format)
            .ok_or_else(|| SlideError::unsupported_format(format.key()))
    }
}

fn build_thread_pool(threads: Option<usize>) -> SlideResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlideError::validation("export threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlideError::validation(format!("failed to build rayon thread pool: {e}")))
}

/// `slide_<headline>` plus `extension`, keeping alphanumerics, spaces, `-` and `_` from the
/// first 30 characters of the headline and turning spaces into underscores.
pub fn suggested_file_name(headline: &str, extension: &str) -> String {
    let safe: String = headline
        .chars()
        .take(30)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = safe.trim().replace(' ', "_");
    if safe.is_empty() {
        format!("slide{extension}")
    } else {
        format!("slide_{safe}{extension}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/service.rs"]
mod tests;
