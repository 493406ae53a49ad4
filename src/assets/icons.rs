//! Line icons drawn next to event details and as podcast artwork filler.
//!
//! Icons are kept as SVG sources on a 24x24 grid and rasterized with `resvg` at whatever pixel
//! size a backend needs; the document backend embeds them as PNG pictures.

use crate::assets::decode::PreparedImage;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlideError, SlideResult};
use crate::layout::plan::IconKind;

fn icon_body(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Calendar => {
            r#"<rect x="3" y="4" width="18" height="18" rx="2"/><path d="M16 2v4M8 2v4M3 10h18"/>"#
        }
        IconKind::Clock => r#"<circle cx="12" cy="12" r="10"/><path d="M12 6v6l4 2"/>"#,
        IconKind::MapPin => {
            r#"<path d="M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0z"/><circle cx="12" cy="10" r="3"/>"#
        }
        IconKind::Microphone => {
            r#"<rect x="9" y="2" width="6" height="12" rx="3"/><path d="M19 10v1a7 7 0 0 1-14 0v-1M12 18v4M8 22h8"/>"#
        }
    }
}

/// Complete SVG document for `kind` stroked in `color`.
pub(crate) fn icon_svg(kind: IconKind, color: Rgba8) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
            r##"fill="none" stroke="#{}" stroke-opacity="{:.4}" stroke-width="2" "##,
            r#"stroke-linecap="round" stroke-linejoin="round">{}</svg>"#
        ),
        color.to_hex(),
        f64::from(color.a) / 255.0,
        icon_body(kind),
    )
}

/// Rasterize `kind` into a `width`x`height` premultiplied image.
pub(crate) fn rasterize_icon(
    kind: IconKind,
    color: Rgba8,
    width: u32,
    height: u32,
) -> SlideResult<PreparedImage> {
    let svg = icon_svg(kind, color);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
        .map_err(|e| SlideError::encode(format!("parse icon svg: {e}")))?;

    let (width, height) = (width.max(1), height.max(1));
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SlideError::encode("failed to allocate icon pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    Ok(PreparedImage::from_premul(width, height, pixmap.data().to_vec()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icons.rs"]
mod tests;
