//! Slideforge renders branded digital-signage slides.
//!
//! A [`SlideData`] record is matched to a [`TemplateStyle`] from the static catalog, resolved
//! to one of nine [`LayoutKind`]s and compiled into a backend-agnostic [`SlidePlan`]. The plan
//! is then drawn either onto a 1920x1080 raster (PNG or JPEG) or into a single-slide PPTX
//! document. [`ExportService`] dispatches by format key; [`crop_to_face`] prepares portrait
//! photos ahead of time.
//!
//! ```no_run
//! use slideforge::{ExportService, SlideData};
//!
//! let slide = SlideData::builder("New lab opens", "A facility for precision measurement.")
//!     .category("research-spotlight")
//!     .template_id("template1")
//!     .build();
//! let file = ExportService::new().export(&slide, "png")?;
//! std::fs::write(&file.file_name, &file.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod crop;
mod export;
mod foundation;
mod layout;
mod model;
mod render;

pub use crate::foundation::config::{
    DocumentOpts, FONT_BOLD_ENV, FONT_ENV, FontConfig, RasterOpts,
};
pub use crate::foundation::core::{
    CANVAS_HEIGHT_IN, CANVAS_WIDTH_IN, EmuRect, Point, RASTER_HEIGHT, RASTER_WIDTH, Rect, Rgba8,
    SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU, len_to_emu, len_to_px, pt_to_px, rect_to_emu, rect_to_px,
};
pub use crate::foundation::error::{SlideError, SlideResult};

pub use crate::model::catalog::{
    Category, CategoryListing, CategoryTemplates, ImagePosition, ImageSize, LayoutType,
    TemplateListing, TemplateStyle, TextAlign, category_templates, list_categories,
    list_templates, resolve_style,
};
pub use crate::model::palette::{
    ColorSet, TemplateConfig, legacy_template, legacy_templates, resolve_colors,
    resolve_colors_for,
};
pub use crate::model::slide::{
    DEFAULT_TEMPLATE_ID, EventDetails, EventField, SlideData, SlideDataBuilder,
};

pub use crate::layout::plan::{
    DrawOp, IconKind, SlidePlan, TextBlock, TextRole, compile_slide, compile_slide_as,
};
pub use crate::layout::resolve::{LayoutKind, resolve_layout, resolve_layout_tags};

pub use crate::crop::face::{
    CROP_JPEG_QUALITY, CropBounds, CropInfo, CropMethod, CropWindow, CroppedPhoto,
    DEFAULT_OUTPUT_SIZE, FaceDetection, compute_crop, crop_to_face,
};

pub use crate::render::backend::{ExportFormat, SlideRenderer, create_renderer};
pub use crate::render::document::DocumentRenderer;
pub use crate::render::raster::RasterRenderer;

pub use crate::export::service::{ExportService, ExportedFile, suggested_file_name};
