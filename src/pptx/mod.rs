//! Minimal PresentationML writer.
//!
//! Produces a `.pptx` package with one slide master, one blank layout, one
//! theme and any number of slides built from absolutely positioned shapes.
//! That is all the deck layout needs: it never uses placeholders, tables or
//! charts.
//!
//! ## Structure
//!
//! - [`shape`]: geometry, text boxes and pictures, each able to write its own
//!   `<p:sp>`/`<p:pic>` element
//! - [`slide`]: a background plus an ordered shape list
//! - [`package`]: the zip container and every fixed part around the slides
//!
//! Coordinates are given in inches and converted to EMU on output.

pub mod package;
pub mod shape;
pub mod slide;

pub use package::{DocProps, Presentation, ThemeScheme};
pub use shape::{
    Align, BulletKind, Crop, Frame, Geometry, ImageFormat, LineStyle, Paragraph, Picture, Shadow,
    Shape, ShapeStyle, TextBox, TextStyle,
};
pub use slide::Slide;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMU per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Inches to EMU, rounded to the nearest unit.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Points to EMU.
pub fn emu_pt(points: f64) -> i64 {
    (points * EMU_PER_POINT as f64).round() as i64
}

/// Escape XML special characters and drop control characters that XML 1.0
/// cannot represent.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}
