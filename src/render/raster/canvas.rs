use std::sync::Arc;

use image::RgbaImage;
use vello_cpu::kurbo::{Affine, Circle, Shape as _};
use vello_cpu::peniko::Color;

use crate::assets::decode::{PreparedImage, cover_resize, darken_bottom, decode_rgba};
use crate::assets::fonts::{
    BITMAP_ADVANCE, BITMAP_EM, Font, FontBook, TextBrushRgba8, bitmap_glyph,
};
use crate::assets::icons::rasterize_icon;
use crate::assets::qr::qr_image;
use crate::foundation::core::{RASTER_HEIGHT, RASTER_WIDTH, Rect, Rgba8, len_to_px, rect_to_px};
use crate::foundation::error::{SlideError, SlideResult};
use crate::layout::plan::{DrawOp, TextBlock};
use crate::model::catalog::TextAlign;

/// Integer pixel box on the raster canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PxBox {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

impl PxBox {
    pub(crate) fn from_inches(r: Rect) -> Self {
        let p = rect_to_px(r);
        let (x0, y0) = (p.x0.round(), p.y0.round());
        let (x1, y1) = (p.x1.round(), p.y1.round());
        Self {
            x: x0 as i32,
            y: y0 as i32,
            w: (x1 - x0).max(1.0) as u32,
            h: (y1 - y0).max(1.0) as u32,
        }
    }

    fn cpu_rect(self) -> vello_cpu::kurbo::Rect {
        vello_cpu::kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.w),
            f64::from(self.y) + f64::from(self.h),
        )
    }
}

/// One render's drawing state: the `vello_cpu` context, its fonts and the decoded photo.
pub(crate) struct Canvas<'a> {
    ctx: vello_cpu::RenderContext,
    fonts: FontBook,
    photo_bytes: Option<&'a [u8]>,
    photo: Option<RgbaImage>,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(fonts: FontBook, photo_bytes: Option<&'a [u8]>) -> Self {
        let mut ctx = vello_cpu::RenderContext::new(RASTER_WIDTH as u16, RASTER_HEIGHT as u16);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(Affine::IDENTITY);
        Self {
            ctx,
            fonts,
            photo_bytes,
            photo: None,
        }
    }

    pub(crate) fn draw(&mut self, op: &DrawOp) -> SlideResult<()> {
        match op {
            DrawOp::Gradient { rect, start, end } => {
                let at = PxBox::from_inches(*rect);
                let img = diagonal_gradient(*start, *end, at.w, at.h);
                self.blit(&img, at.x, at.y)
            }
            DrawOp::FullBleedPhoto { overlay_max_alpha } => {
                let mut img = cover_resize(self.photo()?, RASTER_WIDTH, RASTER_HEIGHT);
                darken_bottom(&mut img, *overlay_max_alpha);
                self.blit(&PreparedImage::from_straight(img), 0, 0)
            }
            DrawOp::FillRect { rect, color } => {
                self.fill(PxBox::from_inches(*rect).cpu_rect(), *color);
                Ok(())
            }
            DrawOp::FrameRect {
                rect,
                stroke,
                color,
            } => {
                let b = PxBox::from_inches(*rect).cpu_rect();
                let s = len_to_px(*stroke).round().max(1.0);
                let edges = [
                    vello_cpu::kurbo::Rect::new(b.x0, b.y0, b.x1, b.y0 + s),
                    vello_cpu::kurbo::Rect::new(b.x0, b.y1 - s, b.x1, b.y1),
                    vello_cpu::kurbo::Rect::new(b.x0, b.y0 + s, b.x0 + s, b.y1 - s),
                    vello_cpu::kurbo::Rect::new(b.x1 - s, b.y0 + s, b.x1, b.y1 - s),
                ];
                for edge in edges {
                    self.fill(edge, *color);
                }
                Ok(())
            }
            DrawOp::Text(block) => self.draw_text(block),
            DrawOp::CirclePhoto {
                rect,
                ring,
                ring_color,
            } => self.draw_circle_photo(*rect, *ring, *ring_color),
            DrawOp::RectPhoto { rect } => {
                let at = PxBox::from_inches(*rect);
                let img = cover_resize(self.photo()?, at.w, at.h);
                self.blit(&PreparedImage::from_straight(img), at.x, at.y)
            }
            DrawOp::Icon { kind, rect, color } => {
                let at = PxBox::from_inches(*rect);
                let img = rasterize_icon(*kind, *color, at.w, at.h)?;
                self.blit(&img, at.x, at.y)
            }
            DrawOp::Qr { url, rect } => {
                let at = PxBox::from_inches(*rect);
                let img = qr_image(url, at.w.min(at.h))?;
                self.blit(&PreparedImage::from_straight(img), at.x, at.y)
            }
        }
    }

    /// Rasterize everything drawn so far into premultiplied RGBA8.
    pub(crate) fn finish(mut self) -> PreparedImage {
        let (w, h) = (RASTER_WIDTH as u16, RASTER_HEIGHT as u16);
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        PreparedImage::from_premul(
            RASTER_WIDTH,
            RASTER_HEIGHT,
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn photo(&mut self) -> SlideResult<&RgbaImage> {
        if self.photo.is_none() {
            let bytes = self
                .photo_bytes
                .ok_or_else(|| SlideError::decode("layout needs a photo but the slide has none"))?;
            self.photo = Some(decode_rgba(bytes)?);
        }
        self.photo
            .as_ref()
            .ok_or_else(|| SlideError::decode("photo cache is empty"))
    }

    fn fill(&mut self, rect: vello_cpu::kurbo::Rect, color: Rgba8) {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx
            .set_paint(Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.ctx.fill_rect(&rect);
    }

    fn blit(&mut self, img: &PreparedImage, x: i32, y: i32) -> SlideResult<()> {
        self.ctx
            .set_transform(Affine::translate((f64::from(x), f64::from(y))));
        self.ctx.set_paint(image_paint(img)?);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(img.width),
            f64::from(img.height),
        ));
        Ok(())
    }

    /// Solid ring first, then the center-cropped photo masked to a circle on top.
    fn draw_circle_photo(&mut self, rect: Rect, ring: f64, ring_color: Rgba8) -> SlideResult<()> {
        let at = PxBox::from_inches(rect);
        let side = at.w.min(at.h);
        let r = f64::from(side) / 2.0;
        let ring_px = len_to_px(ring).round();

        let center = (f64::from(at.x) + r, f64::from(at.y) + r);
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(Color::from_rgba8(
            ring_color.r,
            ring_color.g,
            ring_color.b,
            ring_color.a,
        ));
        self.ctx.fill_path(&Circle::new(center, r + ring_px).to_path(0.1));

        let img = PreparedImage::from_straight(cover_resize(self.photo()?, side, side));
        self.ctx
            .set_transform(Affine::translate((f64::from(at.x), f64::from(at.y))));
        self.ctx.set_paint(image_paint(&img)?);
        self.ctx.fill_path(&Circle::new((r, r), r).to_path(0.1));
        Ok(())
    }

    fn draw_text(&mut self, block: &TextBlock) -> SlideResult<()> {
        let area = PxBox::from_inches(block.rect);
        let (font, lines) = self.fonts.wrap_block(block);

        for (i, line) in lines.iter().enumerate() {
            let width = self.fonts.measure(font, line);
            let left = f64::from(area.x);
            let x = match block.align {
                TextAlign::Left => left,
                TextAlign::Center => left + (f64::from(area.w) - width) / 2.0,
                TextAlign::Right => left + f64::from(area.w) - width,
            };
            let y = f64::from(area.y) + i as f64 * font.line_height();
            match font {
                Font::Outline { bold, size_px } => {
                    self.draw_shaped(line, bold, size_px, x, y, block.color)?
                }
                Font::Bitmap { size_px } => self.draw_bitmap(line, size_px, x, y, block.color),
            }
        }
        Ok(())
    }

    fn draw_shaped(
        &mut self,
        text: &str,
        bold: bool,
        size_px: f32,
        x: f64,
        y: f64,
        color: Rgba8,
    ) -> SlideResult<()> {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let (layout, font) = self.fonts.shape(bold, size_px, text, brush)?;
        self.ctx.set_transform(Affine::translate((x, y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx
                    .set_paint(Color::from_rgba8(brush.r, brush.g, brush.b, brush.a));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn draw_bitmap(&mut self, text: &str, size_px: f32, x: f64, y: f64, color: Rgba8) {
        let unit = f64::from(size_px) / BITMAP_EM;
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx
            .set_paint(Color::from_rgba8(color.r, color.g, color.b, color.a));
        for (i, ch) in text.chars().enumerate() {
            let cell_x = x + i as f64 * BITMAP_ADVANCE * unit;
            for (col, bits) in bitmap_glyph(ch).iter().enumerate() {
                for row in 0u8..7 {
                    if (*bits >> row) & 1 == 0 {
                        continue;
                    }
                    let gx = cell_x + col as f64 * unit;
                    let gy = y + f64::from(row) * unit;
                    self.ctx
                        .fill_rect(&vello_cpu::kurbo::Rect::new(gx, gy, gx + unit, gy + unit));
                }
            }
        }
    }
}

/// Two-stop blend from the top-left to the bottom-right corner, premultiplied.
pub(crate) fn diagonal_gradient(start: Rgba8, end: Rgba8, w: u32, h: u32) -> PreparedImage {
    let (w, h) = (w.max(1), h.max(1));
    let wx = f64::from(w.max(2) - 1);
    let hy = f64::from(h.max(2) - 1);
    let mut bytes = Vec::with_capacity((w as usize) * (h as usize) * 4);
    for y in 0..h {
        for x in 0..w {
            let t = (f64::from(x) / wx + f64::from(y) / hy) / 2.0;
            bytes.extend_from_slice(&start.lerp(end, t).to_premul());
        }
    }
    PreparedImage::from_premul(w, h, bytes)
}

fn image_paint(img: &PreparedImage) -> SlideResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> SlideResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlideError::encode("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlideError::encode("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize).saturating_mul(height as usize).saturating_mul(4) {
        return Err(SlideError::encode("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../../tests/unit/render/raster/canvas.rs"]
mod tests;
