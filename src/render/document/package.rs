//! Presentation package: the fixed parts around one slide, zipped.
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::foundation::core::{SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
use crate::foundation::error::{SlideError, SlideResult};
use crate::render::document::shapes::{Media, SlidePart, escape_xml, media_rel_id};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOC: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_APP: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

pub(crate) const CONTENT_TYPES: &str = "[Content_Types].xml";
pub(crate) const SLIDE_PART: &str = "ppt/slides/slide1.xml";

/// Metadata written into the core and app property parts.
#[derive(Clone, Debug)]
pub(crate) struct PackageMeta<'a> {
    pub(crate) title: &'a str,
    pub(crate) font_family: &'a str,
}

/// Zip the slide and every fixed part into a `.pptx` byte buffer.
pub(crate) fn write_package(slide: &SlidePart, meta: &PackageMeta<'_>) -> SlideResult<Vec<u8>> {
    let mut zip = PartWriter::new();
    zip.add(CONTENT_TYPES, content_types())?;
    zip.add("_rels/.rels", package_rels())?;
    zip.add("docProps/core.xml", core_props(meta.title)?)?;
    zip.add("docProps/app.xml", app_props())?;
    zip.add("ppt/presentation.xml", presentation()?)?;
    zip.add("ppt/_rels/presentation.xml.rels", presentation_rels())?;
    zip.add("ppt/slideMasters/slideMaster1.xml", slide_master())?;
    zip.add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        rels(&[
            ("rId1", REL_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            ("rId2", REL_THEME, "../theme/theme1.xml"),
        ]),
    )?;
    zip.add("ppt/slideLayouts/slideLayout1.xml", slide_layout())?;
    zip.add(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        rels(&[("rId1", REL_MASTER, "../slideMasters/slideMaster1.xml")]),
    )?;
    zip.add("ppt/theme/theme1.xml", theme(meta.font_family)?)?;
    zip.add(SLIDE_PART, slide.xml.clone())?;
    zip.add("ppt/slides/_rels/slide1.xml.rels", slide_rels(&slide.media))?;
    for m in &slide.media {
        zip.add_bytes(&format!("ppt/media/{}", m.name), &m.bytes)?;
    }
    zip.finish()
}

/// Deflated entries with a fixed 1980-01-01 timestamp.
struct PartWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl PartWriter {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn add(&mut self, name: &str, xml: String) -> SlideResult<()> {
        self.add_bytes(name, xml.as_bytes())
    }

    fn add_bytes(&mut self, name: &str, bytes: &[u8]) -> SlideResult<()> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        self.zip.start_file(name, options)?;
        self.zip
            .write_all(bytes)
            .map_err(|e| SlideError::document(format!("write part '{name}': {e}")))?;
        Ok(())
    }

    fn finish(self) -> SlideResult<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

fn content_types() -> String {
    let mut xml = String::with_capacity(1536);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
    xml.push_str(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#);
    for (part, ct) in [
        (
            "/ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        (
            "/ppt/slides/slide1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
        ),
        (
            "/ppt/theme/theme1.xml",
            "application/vnd.openxmlformats-officedocument.theme+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ] {
        xml.push_str(r#"<Override PartName=""#);
        xml.push_str(part);
        xml.push_str(r#"" ContentType=""#);
        xml.push_str(ct);
        xml.push_str(r#""/>"#);
    }
    xml.push_str("</Types>");
    xml
}

fn rels(entries: &[(&str, &str, &str)]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Relationships xmlns=""#);
    xml.push_str(NS_PKG_RELS);
    xml.push_str(r#"">"#);
    for (id, ty, target) in entries {
        xml.push_str(r#"<Relationship Id=""#);
        xml.push_str(id);
        xml.push_str(r#"" Type=""#);
        xml.push_str(ty);
        xml.push_str(r#"" Target=""#);
        xml.push_str(target);
        xml.push_str(r#""/>"#);
    }
    xml.push_str("</Relationships>");
    xml
}

fn package_rels() -> String {
    rels(&[
        ("rId1", REL_OFFICE_DOC, "ppt/presentation.xml"),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_APP, "docProps/app.xml"),
    ])
}

fn presentation_rels() -> String {
    rels(&[
        ("rId1", REL_MASTER, "slideMasters/slideMaster1.xml"),
        ("rId2", REL_SLIDE, "slides/slide1.xml"),
        ("rId3", REL_THEME, "theme/theme1.xml"),
    ])
}

fn slide_rels(media: &[Media]) -> String {
    let targets: Vec<(String, String)> = media
        .iter()
        .enumerate()
        .map(|(i, m)| (media_rel_id(i), format!("../media/{}", m.name)))
        .collect();
    let mut entries = vec![("rId1", REL_LAYOUT, "../slideLayouts/slideLayout1.xml")];
    for (id, target) in &targets {
        entries.push((id.as_str(), REL_IMAGE, target.as_str()));
    }
    rels(&entries)
}

/// Core properties without timestamps so identical slides zip to identical bytes.
fn core_props(title: &str) -> SlideResult<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
        r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
    xml.push_str("<dc:creator>slideforge</dc:creator>");
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

fn app_props() -> String {
    let mut xml = String::with_capacity(384);
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    xml.push_str("<Application>slideforge</Application>");
    xml.push_str("<PresentationFormat>Widescreen</PresentationFormat>");
    xml.push_str("<Slides>1</Slides>");
    xml.push_str("</Properties>");
    xml
}

fn presentation() -> SlideResult<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">"#
    )?;
    xml.push_str("<p:sldMasterIdLst>");
    xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
    xml.push_str("</p:sldMasterIdLst>");
    xml.push_str(r#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>"#);
    write!(
        xml,
        r#"<p:sldSz cx="{SLIDE_WIDTH_EMU}" cy="{SLIDE_HEIGHT_EMU}"/>"#
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

const EMPTY_TREE: &str = concat!(
    "<p:spTree>",
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    "</p:spTree>"
);

fn slide_master() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<p:sldMaster xmlns:a=""#);
    xml.push_str(NS_A);
    xml.push_str(r#"" xmlns:r=""#);
    xml.push_str(NS_R);
    xml.push_str(r#"" xmlns:p=""#);
    xml.push_str(NS_P);
    xml.push_str(r#"">"#);
    xml.push_str("<p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>");
    xml.push_str(EMPTY_TREE);
    xml.push_str("</p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
        r#"hlink="hlink" folHlink="folHlink"/>"#
    ));
    xml.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#);
    xml.push_str("</p:sldMaster>");
    xml
}

fn slide_layout() -> String {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<p:sldLayout xmlns:a=""#);
    xml.push_str(NS_A);
    xml.push_str(r#"" xmlns:r=""#);
    xml.push_str(NS_R);
    xml.push_str(r#"" xmlns:p=""#);
    xml.push_str(NS_P);
    xml.push_str(r#"" type="blank" preserve="1">"#);
    xml.push_str(r#"<p:cSld name="Blank">"#);
    xml.push_str(EMPTY_TREE);
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}

/// Office-default color and format schemes with `font_family` as both theme fonts.
fn theme(font_family: &str) -> SlideResult<String> {
    let font = escape_xml(font_family);
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<a:theme xmlns:a="{NS_A}" name="slideforge">"#)?;
    xml.push_str(r#"<a:themeElements><a:clrScheme name="slideforge">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (name, hex) in [
        ("dk2", "44546A"),
        ("lt2", "E7E6E6"),
        ("accent1", "4472C4"),
        ("accent2", "ED7D31"),
        ("accent3", "A5A5A5"),
        ("accent4", "FFC000"),
        ("accent5", "5B9BD5"),
        ("accent6", "70AD47"),
        ("hlink", "0563C1"),
        ("folHlink", "954F72"),
    ] {
        write!(xml, r#"<a:{name}><a:srgbClr val="{hex}"/></a:{name}>"#)?;
    }
    xml.push_str("</a:clrScheme>");
    write!(
        xml,
        concat!(
            r#"<a:fontScheme name="slideforge">"#,
            r#"<a:majorFont><a:latin typeface="{0}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="{0}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>"
        ),
        font
    )?;
    xml.push_str(r#"<a:fmtScheme name="slideforge">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for w in [6350, 12700, 19050] {
        write!(
            xml,
            r#"<a:ln w="{w}"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#
        )?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");
    xml.push_str("</a:themeElements></a:theme>");
    Ok(xml)
}

#[cfg(test)]
#[path = "../../../tests/unit/render/document/package.rs"]
mod tests;
