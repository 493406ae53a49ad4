//! Document backend: one editable 16:9 slide in an Office Open XML presentation.

mod package;
mod shapes;

use crate::foundation::config::DocumentOpts;
use crate::foundation::error::SlideResult;
use crate::layout::plan::{SlidePlan, compile_slide};
use crate::model::slide::SlideData;
use crate::render::backend::{ExportFormat, SlideRenderer};

/// PPTX slide renderer.
#[derive(Clone, Debug, Default)]
pub struct DocumentRenderer {
    opts: DocumentOpts,
}

impl DocumentRenderer {
    /// Renderer writing text runs in `opts.font_family`.
    pub fn new(opts: DocumentOpts) -> Self {
        Self { opts }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(layout = plan.layout.name(), ops = plan.ops.len()))]
    pub(crate) fn render_plan(&self, plan: &SlidePlan, slide: &SlideData) -> SlideResult<Vec<u8>> {
        let part = shapes::write_slide(
            plan,
            slide.image(),
            slide.image_description(),
            &self.opts,
        )?;
        let meta = package::PackageMeta {
            title: slide.headline(),
            font_family: &self.opts.font_family,
        };
        let bytes = package::write_package(&part, &meta)?;
        tracing::debug!(media = part.media.len(), bytes = bytes.len(), "document slide packaged");
        Ok(bytes)
    }
}

impl SlideRenderer for DocumentRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pptx
    }

    fn render(&self, slide: &SlideData) -> SlideResult<Vec<u8>> {
        self.render_plan(&compile_slide(slide), slide)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/render/document/mod.rs"]
mod tests;
