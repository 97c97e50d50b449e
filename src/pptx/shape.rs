//! Slide shapes and their DrawingML serialisation.

use super::{emu, emu_pt, escape_xml};
use crate::color::HexColor;
use std::fmt::{self, Write as FmtWrite};

/// Position and size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    fn write_xfrm(&self, xml: &mut String, rotation_deg: f64) -> fmt::Result {
        if rotation_deg != 0.0 {
            // 60000ths of a degree
            write!(xml, r#"<a:xfrm rot="{}">"#, (rotation_deg * 60_000.0).round() as i64)?;
        } else {
            xml.push_str("<a:xfrm>");
        }
        write!(xml, r#"<a:off x="{}" y="{}"/>"#, emu(self.x), emu(self.y))?;
        write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, emu(self.w), emu(self.h))?;
        xml.push_str("</a:xfrm>");
        Ok(())
    }
}

/// Preset outline of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Geometry {
    #[default]
    Rect,
    RoundRect,
    Ellipse,
}

impl Geometry {
    fn preset(self) -> &'static str {
        match self {
            Geometry::Rect => "rect",
            Geometry::RoundRect => "roundRect",
            Geometry::Ellipse => "ellipse",
        }
    }
}

/// Outline stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: HexColor,
    pub width_pt: f64,
}

/// Outer drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: HexColor,
    pub blur_pt: f64,
    pub offset_pt: f64,
    pub angle_deg: f64,
    /// 0.0 (invisible) to 1.0 (solid).
    pub opacity: f64,
}

impl Default for Shadow {
    /// Soft shadow used under cards.
    fn default() -> Self {
        Self {
            color: HexColor::BLACK,
            blur_pt: 8.0,
            offset_pt: 3.0,
            angle_deg: 135.0,
            opacity: 0.14,
        }
    }
}

/// Fill, outline, shadow and rotation of a geometric shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    pub geometry: Geometry,
    pub fill: Option<HexColor>,
    /// Fill transparency, 0.0 (opaque) to 1.0 (invisible).
    pub fill_transparency: f64,
    pub line: Option<LineStyle>,
    pub shadow: Option<Shadow>,
    pub rotation_deg: f64,
}

impl ShapeStyle {
    /// Solid fill with a matching hairline outline.
    pub fn solid(geometry: Geometry, color: HexColor) -> Self {
        Self {
            geometry,
            fill: Some(color),
            line: Some(LineStyle {
                color,
                width_pt: 0.75,
            }),
            ..Default::default()
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// List marker in front of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletKind {
    #[default]
    None,
    Dot,
    Numbered,
}

/// One paragraph of a text box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub bullet: BulletKind,
}

impl Paragraph {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bullet: BulletKind::None,
        }
    }
}

/// Run formatting shared by every paragraph in a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub size_pt: f64,
    pub bold: bool,
    pub color: HexColor,
    pub align: Align,
    /// Line spacing as a multiple of single spacing.
    pub line_spacing: Option<f64>,
    pub space_after_pt: Option<f64>,
    pub language: String,
}

impl TextStyle {
    pub fn new(font: &str, size_pt: f64, color: HexColor) -> Self {
        Self {
            font: font.to_string(),
            size_pt,
            bold: false,
            color,
            align: Align::Left,
            line_spacing: None,
            space_after_pt: None,
            language: "en-US".to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn line_spacing(mut self, multiple: f64) -> Self {
        self.line_spacing = Some(multiple);
        self
    }

    pub fn space_after(mut self, points: f64) -> Self {
        self.space_after_pt = Some(points);
        self
    }

    pub fn language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }
}

/// A frameless text box with zero insets.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
    pub style: TextStyle,
}

impl TextBox {
    /// One paragraph per line of `text`.
    pub fn new(frame: Frame, text: &str, style: TextStyle) -> Self {
        Self {
            frame,
            paragraphs: text.lines().map(Paragraph::plain).collect(),
            style,
        }
    }

    /// One bulleted paragraph per item.
    pub fn list<S: AsRef<str>>(frame: Frame, items: &[S], bullet: BulletKind, style: TextStyle) -> Self {
        Self {
            frame,
            paragraphs: items
                .iter()
                .map(|t| Paragraph {
                    text: t.as_ref().to_string(),
                    bullet,
                })
                .collect(),
            style,
        }
    }
}

/// Encoded image formats that PowerPoint embeds directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Fractions (0.0–1.0) trimmed from each edge of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Crop {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Crop {
    /// Crop that scales an `img_w`×`img_h` image to cover `frame` without
    /// distortion, trimming the overflow evenly from both sides.
    pub fn cover(img_w: u32, img_h: u32, frame: &Frame) -> Self {
        if img_w == 0 || img_h == 0 || frame.w <= 0.0 || frame.h <= 0.0 {
            return Self::default();
        }
        let img_ratio = f64::from(img_w) / f64::from(img_h);
        let box_ratio = frame.w / frame.h;
        if img_ratio > box_ratio {
            let side = (1.0 - box_ratio / img_ratio) / 2.0;
            Self {
                left: side,
                right: side,
                ..Self::default()
            }
        } else {
            let side = (1.0 - img_ratio / box_ratio) / 2.0;
            Self {
                top: side,
                bottom: side,
                ..Self::default()
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

/// An embedded image.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub frame: Frame,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub crop: Crop,
    pub description: String,
}

/// Anything placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Geometric { frame: Frame, style: ShapeStyle },
    Text(TextBox),
    Picture(Picture),
}

impl Shape {
    pub fn geometric(frame: Frame, style: ShapeStyle) -> Self {
        Shape::Geometric { frame, style }
    }

    /// Serialise as a `<p:sp>` or `<p:pic>` element. `rel_id` is the slide
    /// relationship of a picture's media part and is ignored otherwise.
    pub(crate) fn write_xml(&self, xml: &mut String, id: u32, rel_id: Option<&str>) -> fmt::Result {
        match self {
            Shape::Geometric { frame, style } => write_geometric(xml, id, frame, style),
            Shape::Text(text) => write_text_box(xml, id, text),
            Shape::Picture(pic) => write_picture(xml, id, pic, rel_id.unwrap_or("rId0")),
        }
    }
}

fn write_solid_fill(xml: &mut String, color: HexColor, alpha: f64) -> fmt::Result {
    if alpha < 1.0 {
        write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{color}"><a:alpha val="{}"/></a:srgbClr></a:solidFill>"#,
            (alpha.clamp(0.0, 1.0) * 100_000.0).round() as i64
        )
    } else {
        write!(xml, r#"<a:solidFill><a:srgbClr val="{color}"/></a:solidFill>"#)
    }
}

fn write_geometric(xml: &mut String, id: u32, frame: &Frame, style: &ShapeStyle) -> fmt::Result {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{id}" name="Shape {id}"/>"#)?;
    xml.push_str("<p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>");
    frame.write_xfrm(xml, style.rotation_deg)?;
    write!(xml, r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#, style.geometry.preset())?;

    match style.fill {
        Some(color) => write_solid_fill(xml, color, 1.0 - style.fill_transparency)?,
        None => xml.push_str("<a:noFill/>"),
    }

    match style.line {
        Some(line) => {
            write!(xml, r#"<a:ln w="{}">"#, emu_pt(line.width_pt))?;
            write_solid_fill(xml, line.color, 1.0)?;
            xml.push_str("</a:ln>");
        }
        None => xml.push_str("<a:ln><a:noFill/></a:ln>"),
    }

    if let Some(shadow) = style.shadow {
        write!(
            xml,
            r#"<a:effectLst><a:outerShdw blurRad="{}" dist="{}" dir="{}" algn="tl" rotWithShape="0">"#,
            emu_pt(shadow.blur_pt),
            emu_pt(shadow.offset_pt),
            (shadow.angle_deg * 60_000.0).round() as i64
        )?;
        write!(
            xml,
            r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr></a:outerShdw></a:effectLst>"#,
            shadow.color,
            (shadow.opacity.clamp(0.0, 1.0) * 100_000.0).round() as i64
        )?;
    }

    xml.push_str("</p:spPr></p:sp>");
    Ok(())
}

fn write_text_box(xml: &mut String, id: u32, text: &TextBox) -> fmt::Result {
    let style = &text.style;
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{id}" name="Text {id}"/>"#)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>"#);
    text.frame.write_xfrm(xml, 0.0)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);
    xml.push_str(
        r#"<p:txBody><a:bodyPr wrap="square" lIns="0" tIns="0" rIns="0" bIns="0" rtlCol="0" anchor="t"><a:noAutofit/></a:bodyPr><a:lstStyle/>"#,
    );

    for para in &text.paragraphs {
        write_paragraph(xml, para, style)?;
    }
    if text.paragraphs.is_empty() {
        // A text body needs at least one paragraph.
        write!(xml, r#"<a:p><a:endParaRPr lang="{}" dirty="0"/></a:p>"#, escape_xml(&style.language))?;
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_paragraph(xml: &mut String, para: &Paragraph, style: &TextStyle) -> fmt::Result {
    let indent = match para.bullet {
        BulletKind::None => String::new(),
        _ => format!(r#" marL="{}" indent="-{}""#, emu(0.28), emu(0.28)),
    };
    write!(xml, r#"<a:p><a:pPr algn="{}"{indent}>"#, style.align.attr())?;
    if let Some(multiple) = style.line_spacing {
        write!(
            xml,
            r#"<a:lnSpc><a:spcPct val="{}"/></a:lnSpc>"#,
            (multiple * 100_000.0).round() as i64
        )?;
    }
    if let Some(points) = style.space_after_pt {
        write!(
            xml,
            r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
            (points * 100.0).round() as i64
        )?;
    }
    match para.bullet {
        BulletKind::None => xml.push_str("<a:buNone/>"),
        BulletKind::Dot => xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="•"/>"#),
        BulletKind::Numbered => xml.push_str(r#"<a:buAutoNum type="arabicPeriod"/>"#),
    }
    xml.push_str("</a:pPr>");

    let lang = escape_xml(&style.language);
    write!(
        xml,
        r#"<a:r><a:rPr lang="{lang}" sz="{}" b="{}" dirty="0">"#,
        (style.size_pt * 100.0).round() as i64,
        if style.bold { 1 } else { 0 }
    )?;
    write_solid_fill(xml, style.color, 1.0)?;
    let font = escape_xml(&style.font);
    write!(
        xml,
        r#"<a:latin typeface="{font}"/><a:ea typeface="{font}"/><a:cs typeface="{font}"/></a:rPr>"#
    )?;
    write!(xml, "<a:t>{}</a:t></a:r></a:p>", escape_xml(&para.text))
}

fn write_picture(xml: &mut String, id: u32, pic: &Picture, rel_id: &str) -> fmt::Result {
    xml.push_str("<p:pic><p:nvPicPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{id}" name="Picture {id}" descr="{}"/>"#,
        escape_xml(&pic.description)
    )?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
    write!(xml, r#"<p:blipFill><a:blip r:embed="{rel_id}"/>"#)?;
    if !pic.crop.is_empty() {
        let pct = |f: f64| (f.clamp(0.0, 1.0) * 100_000.0).round() as i64;
        write!(
            xml,
            r#"<a:srcRect l="{}" t="{}" r="{}" b="{}"/>"#,
            pct(pic.crop.left),
            pct(pic.crop.top),
            pct(pic.crop.right),
            pct(pic.crop.bottom)
        )?;
    }
    xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>");
    pic.frame.write_xfrm(xml, 0.0)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
    Ok(())
}
