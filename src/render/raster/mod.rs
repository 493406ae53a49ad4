//! Raster backend: executes a [`SlidePlan`] on a 1920x1080 `vello_cpu` canvas.

mod canvas;

use image::RgbImage;

use crate::assets::decode::{encode_jpeg, encode_png_rgb, flatten_on_white};
use crate::assets::fonts::FontBook;
use crate::foundation::config::RasterOpts;
use crate::foundation::error::SlideResult;
use crate::layout::plan::{SlidePlan, compile_slide};
use crate::model::slide::SlideData;
use crate::render::backend::{ExportFormat, SlideRenderer};


/// PNG or JPEG slide renderer.
#[derive(Clone, Debug)]
pub struct RasterRenderer {
    format: ExportFormat,
    opts: RasterOpts,
}

impl RasterRenderer {
    /// Lossless PNG output.
    pub fn png(opts: RasterOpts) -> Self {
        Self {
            format: ExportFormat::Png,
            opts,
        }
    }

    /// JPEG output at `opts`' quality.
    pub fn jpeg(opts: RasterOpts) -> Self {
        Self {
            format: ExportFormat::Jpg,
            opts,
        }
    }

    /// Render `slide` to an opaque RGB image.
    pub fn render_image(&self, slide: &SlideData) -> SlideResult<RgbImage> {
        let plan = compile_slide(slide);
        self.render_plan(&plan, slide.image())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(layout = plan.layout.name(), ops = plan.ops.len()))]
    pub(crate) fn render_plan(&self, plan: &SlidePlan, photo: Option<&[u8]>) -> SlideResult<RgbImage> {
        let fonts = FontBook::new(self.opts.fonts.clone());
        let mut canvas = canvas::Canvas::new(fonts, photo);
        for op in &plan.ops {
            canvas.draw(op)?;
        }
        let rgba = canvas.finish().to_straight()?;
        Ok(flatten_on_white(&rgba))
    }
}

impl SlideRenderer for RasterRenderer {
    fn format(&self) -> ExportFormat {
        self.format
    }

    fn render(&self, slide: &SlideData) -> SlideResult<Vec<u8>> {
        let img = self.render_image(slide)?;
        let bytes = match self.format {
            ExportFormat::Jpg => encode_jpeg(&img, self.opts.jpeg_quality)?,
            _ => encode_png_rgb(&img)?,
        };
        tracing::debug!(format = self.format.key(), bytes = bytes.len(), "raster slide encoded");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/render/raster/mod.rs"]
mod tests;
