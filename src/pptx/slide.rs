//! A single slide: background color plus shapes in z-order.

use super::shape::{Picture, Shape};
use crate::color::HexColor;
use std::fmt::{self, Write as FmtWrite};

pub(crate) const NS_DECL: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// Opening of a `<p:spTree>` (the mandatory group properties).
pub(crate) const SP_TREE_START: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub background: Option<HexColor>,
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(color: HexColor) -> Self {
        Self {
            background: Some(color),
            shapes: Vec::new(),
        }
    }

    /// Append a shape on top of everything added so far.
    pub fn add(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    /// Pictures in shape order. Their media relationships are numbered in
    /// this order, starting at `rId2` (`rId1` is the layout).
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Picture(p) => Some(p),
            _ => None,
        })
    }

    /// Serialise as `ppt/slides/slideN.xml`.
    pub(crate) fn to_xml(&self) -> Result<String, fmt::Error> {
        let mut xml = String::with_capacity(4096 + self.shapes.len() * 512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, "<p:sld {NS_DECL}><p:cSld>")?;

        if let Some(bg) = self.background {
            write!(
                xml,
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{bg}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#
            )?;
        }

        xml.push_str(SP_TREE_START);
        let mut picture_no = 0usize;
        for (i, shape) in self.shapes.iter().enumerate() {
            // id 1 is the group itself
            let id = (i + 2) as u32;
            if let Shape::Picture(_) = shape {
                picture_no += 1;
                let rel = format!("rId{}", picture_no + 1);
                shape.write_xml(&mut xml, id, Some(&rel))?;
            } else {
                shape.write_xml(&mut xml, id, None)?;
            }
        }
        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pptx::shape::{Crop, Frame, Geometry, ImageFormat, ShapeStyle};

    fn picture() -> Shape {
        Shape::Picture(Picture {
            frame: Frame::new(0.0, 0.0, 1.0, 1.0),
            data: vec![0],
            format: ImageFormat::Png,
            crop: Crop::default(),
            description: String::new(),
        })
    }

    #[test]
    fn background_and_shape_ids() {
        let mut slide = Slide::with_background(HexColor::from_rgb(0x34, 0x2D, 0x29));
        slide
            .add(Shape::geometric(
                Frame::new(0.0, 0.0, 0.18, 5.625),
                ShapeStyle::solid(Geometry::Rect, HexColor::WHITE),
            ))
            .add(picture());
        let xml = slide.to_xml().unwrap();
        assert!(xml.contains(r#"<a:srgbClr val="342D29"/>"#));
        assert!(xml.contains(r#"<p:cNvPr id="2" name="Shape 2"/>"#));
        assert!(xml.contains(r#"<p:cNvPr id="3" name="Picture 3""#));
        assert!(xml.contains(r#"r:embed="rId2""#));
        assert!(xml.ends_with("</p:sld>"));
    }

    #[test]
    fn pictures_are_numbered_in_order() {
        let mut slide = Slide::new();
        slide.add(picture()).add(picture());
        assert_eq!(slide.pictures().count(), 2);
        let xml = slide.to_xml().unwrap();
        assert!(xml.contains(r#"r:embed="rId3""#));
        assert!(!xml.contains("<p:bg>"));
    }
}
