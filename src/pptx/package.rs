//! OOXML package assembly.
//!
//! Besides the slides, a presentation that PowerPoint, Keynote and
//! LibreOffice all open needs a fixed set of supporting parts:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml, docProps/app.xml
//! ppt/presentation.xml (+ _rels)
//! ppt/presProps.xml, ppt/tableStyles.xml
//! ppt/slideMasters/slideMaster1.xml (+ _rels)
//! ppt/slideLayouts/slideLayout1.xml (+ _rels)
//! ppt/theme/theme1.xml
//! ppt/slides/slideN.xml (+ _rels)
//! ppt/media/imageN.{png,jpeg}
//! ```

use super::slide::{Slide, NS_DECL, SP_TREE_START};
use super::{emu, escape_xml};
use crate::color::HexColor;
use crate::error::ExportError;
use std::fmt::{self, Write as FmtWrite};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CT_MAIN: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_MASTER: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_LAYOUT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str = "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_TABLE_STYLES: &str = "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_PKG: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Document properties written to `docProps/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocProps {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub language: String,
}

impl Default for DocProps {
    fn default() -> Self {
        Self {
            title: String::new(),
            subject: String::new(),
            author: "mdexport".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// Colors and fonts of the embedded theme part.
///
/// Slides use explicit colors everywhere, so the scheme only matters for
/// content the user adds afterwards in an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeScheme {
    pub name: String,
    pub dark1: HexColor,
    pub light1: HexColor,
    pub dark2: HexColor,
    pub light2: HexColor,
    pub accents: [HexColor; 6],
    pub major_font: String,
    pub minor_font: String,
}

impl Default for ThemeScheme {
    fn default() -> Self {
        let grey = HexColor::from_rgb(0x80, 0x80, 0x80);
        Self {
            name: "Office".to_string(),
            dark1: HexColor::BLACK,
            light1: HexColor::WHITE,
            dark2: HexColor::from_rgb(0x44, 0x54, 0x6A),
            light2: HexColor::from_rgb(0xE7, 0xE6, 0xE6),
            accents: [grey; 6],
            major_font: "Calibri Light".to_string(),
            minor_font: "Calibri".to_string(),
        }
    }
}

/// A presentation being assembled in memory.
#[derive(Debug, Clone)]
pub struct Presentation {
    /// Slide width in inches.
    pub width: f64,
    /// Slide height in inches.
    pub height: f64,
    pub props: DocProps,
    pub theme: ThemeScheme,
    slides: Vec<Slide>,
}

impl Presentation {
    /// A 16:9 deck (10in × 5.625in).
    pub fn new(props: DocProps, theme: ThemeScheme) -> Self {
        Self {
            width: 10.0,
            height: 5.625,
            props,
            theme,
            slides: Vec::new(),
        }
    }

    /// Append a slide and return it for filling.
    pub fn add_slide(&mut self, slide: Slide) -> &mut Slide {
        self.slides.push(slide);
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialise the whole package as `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        // Media are numbered across the whole deck.
        let mut media: Vec<(String, &[u8])> = Vec::new();
        let mut slide_media: Vec<Vec<String>> = Vec::with_capacity(self.slides.len());
        for slide in &self.slides {
            let mut names = Vec::new();
            for pic in slide.pictures() {
                let name = format!("image{}.{}", media.len() + 1, pic.format.extension());
                media.push((name.clone(), pic.data.as_slice()));
                names.push(name);
            }
            slide_media.push(names);
        }

        put(&mut zip, "[Content_Types].xml", self.content_types_xml()?.as_bytes())?;
        put(&mut zip, "_rels/.rels", root_rels_xml()?.as_bytes())?;
        put(&mut zip, "docProps/core.xml", self.core_xml()?.as_bytes())?;
        put(&mut zip, "docProps/app.xml", self.app_xml()?.as_bytes())?;
        put(&mut zip, "ppt/presentation.xml", self.presentation_xml()?.as_bytes())?;
        put(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            self.presentation_rels_xml()?.as_bytes(),
        )?;
        put(&mut zip, "ppt/presProps.xml", pres_props_xml()?.as_bytes())?;
        put(&mut zip, "ppt/tableStyles.xml", table_styles_xml().as_bytes())?;
        put(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            slide_master_xml()?.as_bytes(),
        )?;
        put(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            rels_xml(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId2", "theme", "../theme/theme1.xml"),
            ])?
            .as_bytes(),
        )?;
        put(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            slide_layout_xml()?.as_bytes(),
        )?;
        put(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            rels_xml(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")])?.as_bytes(),
        )?;
        put(&mut zip, "ppt/theme/theme1.xml", self.theme_xml()?.as_bytes())?;

        for (i, (slide, names)) in self.slides.iter().zip(&slide_media).enumerate() {
            let n = i + 1;
            put(&mut zip, &format!("ppt/slides/slide{n}.xml"), slide.to_xml()?.as_bytes())?;

            let mut rels = vec![(
                "rId1".to_string(),
                "slideLayout",
                "../slideLayouts/slideLayout1.xml".to_string(),
            )];
            for (k, media_name) in names.iter().enumerate() {
                rels.push((format!("rId{}", k + 2), "image", format!("../media/{media_name}")));
            }
            let borrowed: Vec<(&str, &str, &str)> = rels
                .iter()
                .map(|(id, kind, target)| (id.as_str(), *kind, target.as_str()))
                .collect();
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{n}.xml.rels"),
                rels_xml(&borrowed)?.as_bytes(),
            )?;
        }

        for (name, data) in &media {
            put(&mut zip, &format!("ppt/media/{name}"), data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> Result<String, fmt::Error> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECL);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
        xml.push_str(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#);

        let overrides = [
            ("/ppt/presentation.xml", CT_MAIN),
            ("/ppt/presProps.xml", CT_PRES_PROPS),
            ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
            ("/ppt/slideMasters/slideMaster1.xml", CT_MASTER),
            ("/ppt/slideLayouts/slideLayout1.xml", CT_LAYOUT),
            ("/ppt/theme/theme1.xml", CT_THEME),
            ("/docProps/core.xml", CT_CORE),
            ("/docProps/app.xml", CT_APP),
        ];
        for (part, ct) in overrides {
            write!(xml, r#"<Override PartName="{part}" ContentType="{ct}"/>"#)?;
        }
        for n in 1..=self.slides.len() {
            write!(
                xml,
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{CT_SLIDE}"/>"#
            )?;
        }
        xml.push_str("</Types>");
        Ok(xml)
    }

    fn core_xml(&self) -> Result<String, fmt::Error> {
        let p = &self.props;
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECL);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(&p.title))?;
        write!(xml, "<dc:subject>{}</dc:subject>", escape_xml(&p.subject))?;
        write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(&p.author))?;
        write!(xml, "<dc:language>{}</dc:language>", escape_xml(&p.language))?;
        write!(xml, "<cp:lastModifiedBy>{}</cp:lastModifiedBy>", escape_xml(&p.author))?;
        xml.push_str("<cp:revision>1</cp:revision></cp:coreProperties>");
        Ok(xml)
    }

    fn app_xml(&self) -> Result<String, fmt::Error> {
        let mut xml = String::with_capacity(512);
        xml.push_str(XML_DECL);
        xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
        write!(
            xml,
            "<Application>mdexport</Application><PresentationFormat>On-screen Show (16:9)</PresentationFormat><Slides>{}</Slides>",
            self.slides.len()
        )?;
        xml.push_str("<AppVersion>16.0000</AppVersion></Properties>");
        Ok(xml)
    }

    fn presentation_xml(&self) -> Result<String, fmt::Error> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECL);
        write!(xml, r#"<p:presentation {NS_DECL} saveSubsetFonts="1">"#)?;
        xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for i in 0..self.slides.len() {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    256 + i,
                    slide_rel_id(i)
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            emu(self.width),
            emu(self.height)
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");
        Ok(xml)
    }

    fn presentation_rels_xml(&self) -> Result<String, fmt::Error> {
        let mut rels: Vec<(String, &str, String)> = vec![
            ("rId1".into(), "slideMaster", "slideMasters/slideMaster1.xml".into()),
            ("rId2".into(), "theme", "theme/theme1.xml".into()),
            ("rId3".into(), "presProps", "presProps.xml".into()),
            ("rId4".into(), "tableStyles", "tableStyles.xml".into()),
        ];
        for i in 0..self.slides.len() {
            rels.push((slide_rel_id(i), "slide", format!("slides/slide{}.xml", i + 1)));
        }
        let borrowed: Vec<(&str, &str, &str)> = rels
            .iter()
            .map(|(id, kind, target)| (id.as_str(), *kind, target.as_str()))
            .collect();
        rels_xml(&borrowed)
    }

    fn theme_xml(&self) -> Result<String, fmt::Error> {
        let t = &self.theme;
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECL);
        write!(
            xml,
            r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="{}"><a:themeElements>"#,
            escape_xml(&t.name)
        )?;

        write!(xml, r#"<a:clrScheme name="{}">"#, escape_xml(&t.name))?;
        let slots = [
            ("dk1", t.dark1),
            ("lt1", t.light1),
            ("dk2", t.dark2),
            ("lt2", t.light2),
            ("accent1", t.accents[0]),
            ("accent2", t.accents[1]),
            ("accent3", t.accents[2]),
            ("accent4", t.accents[3]),
            ("accent5", t.accents[4]),
            ("accent6", t.accents[5]),
            ("hlink", t.accents[0]),
            ("folHlink", t.accents[1]),
        ];
        for (slot, color) in slots {
            write!(xml, r#"<a:{slot}><a:srgbClr val="{color}"/></a:{slot}>"#)?;
        }
        xml.push_str("</a:clrScheme>");

        write!(xml, r#"<a:fontScheme name="{}">"#, escape_xml(&t.name))?;
        for (tag, font) in [("majorFont", &t.major_font), ("minorFont", &t.minor_font)] {
            let font = escape_xml(font);
            write!(
                xml,
                r#"<a:{tag}><a:latin typeface="{font}"/><a:ea typeface="{font}"/><a:cs typeface=""/></a:{tag}>"#
            )?;
        }
        xml.push_str("</a:fontScheme>");

        xml.push_str(FORMAT_SCHEME);
        xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
        Ok(xml)
    }
}

/// Store one part, deflated.
fn put(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, data: &[u8]) -> Result<(), ExportError> {
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    zip.start_file(name, options)?;
    zip.write_all(data)
        .map_err(|e| ExportError::Package(format!("{name}: {e}")))
}

fn slide_rel_id(index: usize) -> String {
    // rId1–rId4 are taken by master, theme and the two property parts.
    format!("rId{}", index + 5)
}

fn rels_xml(rels: &[(&str, &str, &str)]) -> Result<String, fmt::Error> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);
    xml.push_str(XML_DECL);
    write!(xml, r#"<Relationships xmlns="{REL_PKG}">"#)?;
    for (id, kind, target) in rels {
        write!(
            xml,
            r#"<Relationship Id="{id}" Type="{REL_BASE}/{kind}" Target="{}"/>"#,
            escape_xml(target)
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn root_rels_xml() -> Result<String, fmt::Error> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    write!(xml, r#"<Relationships xmlns="{REL_PKG}">"#)?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/>"#
    )?;
    xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
    write!(
        xml,
        r#"<Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/>"#
    )?;
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn pres_props_xml() -> Result<String, fmt::Error> {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECL);
    write!(xml, "<p:presentationPr {NS_DECL}/>")?;
    Ok(xml)
}

fn table_styles_xml() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

fn slide_master_xml() -> Result<String, fmt::Error> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(xml, "<p:sldMaster {NS_DECL}><p:cSld>")?;
    xml.push_str(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str(SP_TREE_START);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#);
    xml.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#);
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

fn slide_layout_xml() -> Result<String, fmt::Error> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(xml, r#"<p:sldLayout {NS_DECL} type="blank" preserve="1"><p:cSld name="Blank">"#)?;
    xml.push_str(SP_TREE_START);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
    Ok(xml)
}

/// Minimal format scheme: each list needs three entries.
const FORMAT_SCHEME: &str = concat!(
    r#"<a:fmtScheme name="mdexport">"#,
    r#"<a:fillStyleLst>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"</a:fillStyleLst>"#,
    r#"<a:lnStyleLst>"#,
    r#"<a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"</a:lnStyleLst>"#,
    r#"<a:effectStyleLst>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"</a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"</a:bgFillStyleLst>"#,
    r#"</a:fmtScheme>"#,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pptx::shape::{Crop, Frame, ImageFormat, Picture, Shape};
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    fn deck(slides: usize) -> Presentation {
        let mut pres = Presentation::new(
            DocProps {
                title: "Q3 <Review>".into(),
                ..Default::default()
            },
            ThemeScheme::default(),
        );
        for _ in 0..slides {
            pres.add_slide(Slide::new());
        }
        pres
    }

    #[test]
    fn package_contains_required_parts() {
        let bytes = deck(2).to_bytes().unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn presentation_lists_slides_and_size() {
        let bytes = deck(3).to_bytes().unwrap();
        let xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId5"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId7"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId7""#) && rels.contains("slides/slide3.xml"));
        let ct = read_part(&bytes, "[Content_Types].xml");
        assert_eq!(ct.matches(CT_SLIDE).count(), 3);
    }

    #[test]
    fn core_props_are_escaped() {
        let bytes = deck(1).to_bytes().unwrap();
        assert!(read_part(&bytes, "docProps/core.xml").contains("Q3 &lt;Review&gt;"));
    }

    #[test]
    fn media_numbered_across_slides() {
        let mut pres = deck(0);
        let pic = |format| {
            Shape::Picture(Picture {
                frame: Frame::new(0.0, 0.0, 1.0, 1.0),
                data: vec![1, 2, 3],
                format,
                crop: Crop::default(),
                description: String::new(),
            })
        };
        pres.add_slide(Slide::new()).add(pic(ImageFormat::Png));
        pres.add_slide(Slide::new()).add(pic(ImageFormat::Jpeg));
        let bytes = pres.to_bytes().unwrap();
        let rels = read_part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains(r#"Id="rId2""#) && rels.contains("../media/image2.jpeg"), "{rels}");
        assert_eq!(read_part(&bytes, "ppt/media/image1.png").len(), 3);
    }

    #[test]
    fn theme_carries_fonts_and_colors() {
        let mut pres = deck(1);
        pres.theme.major_font = "Playfair Display".into();
        pres.theme.accents[0] = HexColor::from_rgb(0xF4, 0xA9, 0x00);
        let xml = read_part(&pres.to_bytes().unwrap(), "ppt/theme/theme1.xml");
        assert!(xml.contains(r#"<a:majorFont><a:latin typeface="Playfair Display"/>"#));
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="F4A900"/></a:accent1>"#));
    }
}
