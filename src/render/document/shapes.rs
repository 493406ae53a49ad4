//! Slide XML for one [`SlidePlan`].
use std::fmt::Write as FmtWrite;

use image::{ImageFormat, RgbaImage};

use crate::assets::decode::{
    Insets, cover_resize, darken_bottom, decode_rgba, encode_png_rgba, header_dimensions,
};
use crate::assets::fonts::{FontBook, LINE_GAP_PX};
use crate::assets::icons::rasterize_icon;
use crate::assets::qr::qr_image;
use crate::foundation::config::DocumentOpts;
use crate::foundation::core::{
    EmuRect, RASTER_HEIGHT, RASTER_WIDTH, Rect, Rgba8, len_to_emu, pt_to_px, rect_to_emu,
    rect_to_px,
};
use crate::foundation::error::{SlideError, SlideResult};
use crate::layout::geometry::CANVAS;
use crate::layout::plan::{DrawOp, SlidePlan, TextBlock};
use crate::model::catalog::TextAlign;

/// Escape XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// An embedded image and its part name under `ppt/media/`.
#[derive(Clone, Debug)]
pub(crate) struct Media {
    pub(crate) name: String,
    pub(crate) bytes: Vec<u8>,
}

/// Serialized slide: `p:sld` XML plus the media it references.
///
/// Relationship `rId1` is the slide layout; media `i` is `rId{i + 2}`.
#[derive(Clone, Debug)]
pub(crate) struct SlidePart {
    pub(crate) xml: String,
    pub(crate) media: Vec<Media>,
}

pub(crate) fn media_rel_id(index: usize) -> String {
    format!("rId{}", index + 2)
}

struct SlideWriter<'a> {
    tree: String,
    next_id: u32,
    media: Vec<Media>,
    font_family: &'a str,
    fonts: FontBook,
    photo_bytes: Option<&'a [u8]>,
    photo_alt: &'a str,
    photo: Option<RgbaImage>,
    photo_media: Option<(String, u32, u32)>,
}

/// Write every op of `plan` as a shape, back to front.
pub(crate) fn write_slide(
    plan: &SlidePlan,
    photo: Option<&[u8]>,
    photo_alt: Option<&str>,
    opts: &DocumentOpts,
) -> SlideResult<SlidePart> {
    let mut w = SlideWriter {
        tree: String::with_capacity(8192),
        next_id: 2,
        media: Vec::new(),
        font_family: &opts.font_family,
        fonts: FontBook::new(opts.fonts.clone()),
        photo_bytes: photo,
        photo_alt: photo_alt.unwrap_or("Slide photo"),
        photo: None,
        photo_media: None,
    };
    for op in &plan.ops {
        w.op(op)?;
    }

    let mut xml = String::with_capacity(w.tree.len() + 1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(concat!(
        r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#
    ));
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(concat!(
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
        r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
    ));
    xml.push_str(&w.tree);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    Ok(SlidePart {
        xml,
        media: w.media,
    })
}

impl<'a> SlideWriter<'a> {
    fn op(&mut self, op: &DrawOp) -> SlideResult<()> {
        match op {
            DrawOp::Gradient { rect, start, end } => self.gradient_rect(*rect, *start, *end),
            DrawOp::FullBleedPhoto { overlay_max_alpha } => {
                let mut img = cover_resize(self.photo()?, RASTER_WIDTH, RASTER_HEIGHT);
                darken_bottom(&mut img, *overlay_max_alpha);
                let rid = self.embed(&img)?;
                let alt = self.photo_alt.to_owned();
                self.picture(&rid, CANVAS.rect(), Insets::NONE, "rect", &alt)
            }
            DrawOp::FillRect { rect, color } => {
                let id = self.id();
                let e = rect_to_emu(*rect);
                self.open_sp(id, "Rectangle", e, "rect")?;
                self.solid_fill(*color)?;
                self.tree.push_str("<a:ln><a:noFill/></a:ln></p:spPr></p:sp>");
                Ok(())
            }
            DrawOp::FrameRect {
                rect,
                stroke,
                color,
            } => {
                // Lines straddle the geometry edge; inset by half the stroke to stay inside `rect`.
                let half = stroke / 2.0;
                let inner = Rect::new(rect.x0 + half, rect.y0 + half, rect.x1 - half, rect.y1 - half);
                let id = self.id();
                self.open_sp(id, "Frame", rect_to_emu(inner), "rect")?;
                self.tree.push_str("<a:noFill/>");
                write!(self.tree, r#"<a:ln w="{}">"#, len_to_emu(*stroke))?;
                self.solid_fill(*color)?;
                self.tree.push_str("</a:ln></p:spPr></p:sp>");
                Ok(())
            }
            DrawOp::Text(block) => self.text_box(block),
            DrawOp::CirclePhoto {
                rect,
                ring,
                ring_color,
            } => {
                let id = self.id();
                self.open_sp(id, "Photo Ring", rect_to_emu(rect.inflate(*ring, *ring)), "ellipse")?;
                self.solid_fill(*ring_color)?;
                self.tree.push_str("<a:ln><a:noFill/></a:ln></p:spPr></p:sp>");

                let (rid, w, h) = self.embed_photo()?;
                let insets = Insets::cover(w, h, rect.width(), rect.height());
                let alt = self.photo_alt.to_owned();
                self.picture(&rid, *rect, insets, "ellipse", &alt)
            }
            DrawOp::RectPhoto { rect } => {
                let (rid, w, h) = self.embed_photo()?;
                let insets = Insets::cover(w, h, rect.width(), rect.height());
                let alt = self.photo_alt.to_owned();
                self.picture(&rid, *rect, insets, "rect", &alt)
            }
            DrawOp::Icon { kind, rect, color } => {
                let (w, h) = px_size(*rect);
                let img = rasterize_icon(*kind, *color, w, h)?.to_straight()?;
                let rid = self.embed(&img)?;
                self.picture(&rid, *rect, Insets::NONE, "rect", "Icon")
            }
            DrawOp::Qr { url, rect } => {
                let (w, h) = px_size(*rect);
                let img = qr_image(url, w.min(h))?;
                let rid = self.embed(&img)?;
                let alt = format!("QR code: {url}");
                self.picture(&rid, *rect, Insets::NONE, "rect", &alt)
            }
        }
    }

    fn id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn photo_bytes(&self) -> SlideResult<&'a [u8]> {
        self.photo_bytes
            .ok_or_else(|| SlideError::decode("layout needs a photo but the slide has none"))
    }

    fn photo(&mut self) -> SlideResult<&RgbaImage> {
        if self.photo.is_none() {
            let bytes = self.photo_bytes()?;
            self.photo = Some(decode_rgba(bytes)?);
        }
        self.photo
            .as_ref()
            .ok_or_else(|| SlideError::decode("photo cache is empty"))
    }

    fn embed(&mut self, img: &RgbaImage) -> SlideResult<String> {
        let bytes = encode_png_rgba(img)?;
        Ok(self.push_media("png", bytes))
    }

    /// Embed the photo uncropped, once per slide; pictures crop it with `srcRect`.
    ///
    /// PNG and JPEG sources are stored as they are. Other containers are decoded and stored
    /// as PNG.
    fn embed_photo(&mut self) -> SlideResult<(String, u32, u32)> {
        if let Some(embedded) = &self.photo_media {
            return Ok(embedded.clone());
        }
        let bytes = self.photo_bytes()?;
        let embedded = match image::guess_format(bytes) {
            Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => {
                let (w, h) = header_dimensions(bytes, format)?;
                let ext = if format == ImageFormat::Png { "png" } else { "jpeg" };
                (self.push_media(ext, bytes.to_vec()), w, h)
            }
            _ => {
                let img = self.photo()?;
                let (w, h) = img.dimensions();
                let png = encode_png_rgba(img)?;
                (self.push_media("png", png), w, h)
            }
        };
        self.photo_media = Some(embedded.clone());
        Ok(embedded)
    }

    fn push_media(&mut self, extension: &str, bytes: Vec<u8>) -> String {
        let index = self.media.len();
        self.media.push(Media {
            name: format!("image{}.{extension}", index + 1),
            bytes,
        });
        media_rel_id(index)
    }

    fn xfrm(&mut self, e: EmuRect) -> SlideResult<()> {
        write!(
            self.tree,
            r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            e.x, e.y, e.cx, e.cy
        )?;
        Ok(())
    }

    /// Opens `p:sp` up to and including the preset geometry inside `p:spPr`.
    fn open_sp(&mut self, id: u32, name: &str, e: EmuRect, geom: &str) -> SlideResult<()> {
        write!(
            self.tree,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name} {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>"#
        )?;
        self.xfrm(e)?;
        write!(self.tree, r#"<a:prstGeom prst="{geom}"><a:avLst/></a:prstGeom>"#)?;
        Ok(())
    }

    fn srgb(&mut self, c: Rgba8) -> SlideResult<()> {
        if c.a == 255 {
            write!(self.tree, r#"<a:srgbClr val="{}"/>"#, c.to_hex())?;
        } else {
            write!(
                self.tree,
                r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr>"#,
                c.to_hex(),
                alpha_val(c.a)
            )?;
        }
        Ok(())
    }

    fn solid_fill(&mut self, c: Rgba8) -> SlideResult<()> {
        self.tree.push_str("<a:solidFill>");
        self.srgb(c)?;
        self.tree.push_str("</a:solidFill>");
        Ok(())
    }

    /// Borderless rectangle with a two-stop gradient running top-left to bottom-right.
    ///
    /// A scaled 45 degree angle follows the shape's own diagonal, like the raster blend.
    fn gradient_rect(&mut self, rect: Rect, start: Rgba8, end: Rgba8) -> SlideResult<()> {
        let id = self.id();
        self.open_sp(id, "Background", rect_to_emu(rect), "rect")?;
        self.tree.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0">"#);
        self.srgb(start)?;
        self.tree.push_str(r#"</a:gs><a:gs pos="100000">"#);
        self.srgb(end)?;
        self.tree.push_str(r#"</a:gs></a:gsLst><a:lin ang="2700000" scaled="1"/></a:gradFill>"#);
        self.tree.push_str("<a:ln><a:noFill/></a:ln></p:spPr></p:sp>");
        Ok(())
    }

    fn text_box(&mut self, block: &TextBlock) -> SlideResult<()> {
        let id = self.id();
        write!(
            self.tree,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Text Box {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>"#
        )?;
        self.xfrm(rect_to_emu(block.rect))?;
        self.tree.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

        self.tree.push_str("<p:txBody>");
        self.tree.push_str(
            r#"<a:bodyPr wrap="square" lIns="0" tIns="0" rIns="0" bIns="0" rtlCol="0" anchor="t"><a:noAutofit/></a:bodyPr>"#,
        );
        self.tree.push_str("<a:lstStyle/><a:p>");
        let algn = match block.align {
            TextAlign::Left => "l",
            TextAlign::Center => "ctr",
            TextAlign::Right => "r",
        };
        // Same baseline pitch as the raster backend's `Font::line_height`.
        let pitch_pt = block.size_pt + LINE_GAP_PX / pt_to_px(1.0);
        write!(
            self.tree,
            r#"<a:pPr algn="{algn}"><a:lnSpc><a:spcPts val="{}"/></a:lnSpc></a:pPr>"#,
            (pitch_pt * 100.0).round() as u32
        )?;
        let (_, lines) = self.fonts.wrap_block(block);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.tree.push_str("<a:br/>");
            }
            self.tree.push_str("<a:r>");
            self.run_props(block)?;
            write!(self.tree, "<a:t>{}</a:t>", escape_xml(line))?;
            self.tree.push_str("</a:r>");
        }
        self.tree.push_str("</a:p></p:txBody></p:sp>");
        Ok(())
    }

    fn run_props(&mut self, block: &TextBlock) -> SlideResult<()> {
        write!(
            self.tree,
            r#"<a:rPr lang="en-US" sz="{}" b="{}" dirty="0">"#,
            (block.size_pt * 100.0).round() as u32,
            u8::from(block.bold)
        )?;
        self.solid_fill(block.color)?;
        write!(
            self.tree,
            r#"<a:latin typeface="{}"/>"#,
            escape_xml(self.font_family)
        )?;
        self.tree.push_str("</a:rPr>");
        Ok(())
    }

    fn picture(
        &mut self,
        rel_id: &str,
        rect: Rect,
        crop: Insets,
        geom: &str,
        descr: &str,
    ) -> SlideResult<()> {
        let id = self.id();
        write!(
            self.tree,
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}" descr="{}"/>"#,
            escape_xml(descr)
        )?;
        self.tree.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
        write!(self.tree, r#"<p:blipFill><a:blip r:embed="{rel_id}"/>"#)?;
        if crop != Insets::NONE {
            write!(
                self.tree,
                r#"<a:srcRect l="{}" t="{}" r="{}" b="{}"/>"#,
                per_mille(crop.left),
                per_mille(crop.top),
                per_mille(crop.right),
                per_mille(crop.bottom)
            )?;
        }
        self.tree.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>");
        self.xfrm(rect_to_emu(rect))?;
        write!(
            self.tree,
            r#"<a:prstGeom prst="{geom}"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
        )?;
        Ok(())
    }
}

/// DrawingML alpha in 1/1000 of a percent.
pub(crate) fn alpha_val(a: u8) -> u32 {
    (f64::from(a) / 255.0 * 100_000.0).round() as u32
}

/// Crop fraction in 1/1000 of a percent.
fn per_mille(f: f64) -> i64 {
    (f * 100_000.0).round() as i64
}

fn px_size(rect: Rect) -> (u32, u32) {
    let p = rect_to_px(rect);
    (
        p.width().round().max(1.0) as u32,
        p.height().round().max(1.0) as u32,
    )
}

#[cfg(test)]
#[path = "../../../tests/unit/render/document/shapes.rs"]
mod tests;
