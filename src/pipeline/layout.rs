//! Slide layout: turns a [`ParsedDocument`] into a [`Presentation`].
//!
//! The deck always has the same skeleton:
//!
//! ```text
//!  1  title (dark, no footer)
//!  2  executive summary        text card + theme tags
//!  3  key findings             ≤ 4 cards, 2×2
//!  4  "Detailed Analysis"      divider (dark)
//!  …  one slide per analysis   ≤ 5; intro, ≤ 6 bullets, side panel
//!  …  areas of consensus       ≤ 8 bullets
//!  …  areas of debate          ≤ 8 bullets
//!  …  sources                  ≤ 6 rows
//!  …  gaps & next steps (dark)
//! ```
//!
//! Capacities are fixed. Whatever does not fit is dropped and reported as a
//! [`Truncation`]; empty sections render a placeholder instead of an empty
//! card.

use super::document::{KeyFinding, ParsedDocument, Source};
use super::images::{find_slide_image, load_slide_image};
use super::parse::{split_intro_and_bullets, strip_md};
use crate::color::HexColor;
use crate::output::Truncation;
use crate::palette::{FontPair, Palette};
use crate::pptx::{
    Align, BulletKind, Crop, DocProps, Frame, Geometry, LineStyle, Picture, Presentation, Shadow,
    Shape, ShapeStyle, Slide, TextBox, TextStyle, ThemeScheme,
};
use std::path::Path;
use tracing::{debug, warn};

pub const SLIDE_W: f64 = 10.0;
pub const SLIDE_H: f64 = 5.625;
pub const MARGIN: f64 = 0.65;

pub const MAX_KEY_FINDINGS: usize = 4;
pub const MAX_ANALYSES: usize = 5;
pub const MAX_ANALYSIS_BULLETS: usize = 6;
pub const MAX_PANEL_BULLETS: usize = 3;
pub const MAX_LIST_BULLETS: usize = 8;
pub const MAX_SOURCES: usize = 6;

pub const MISSING: &str = "(missing)";
pub const NO_SUMMARY: &str = "(no Executive Summary provided)";
pub const NO_BODY: &str = "(no body text)";

/// Inputs to the layout besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions<'a> {
    /// Theme slug, shown on the title slide.
    pub theme_label: &'a str,
    /// Display name of the loaded theme, if one was loaded. Preferred over
    /// the slug on the summary slide.
    pub theme_name: Option<&'a str>,
    pub images_dir: Option<&'a Path>,
    pub language: &'a str,
    pub author: &'a str,
}

/// The laid-out deck and the content that did not fit.
#[derive(Debug, Clone)]
pub struct Layout {
    pub presentation: Presentation,
    pub truncations: Vec<Truncation>,
}

/// Lay out every slide of the deck.
pub fn render_deck(
    doc: &ParsedDocument,
    palette: &Palette,
    fonts: &FontPair,
    opts: &LayoutOptions<'_>,
) -> Layout {
    let props = DocProps {
        title: doc.title.clone(),
        subject: "Deep Research deck".to_string(),
        author: opts.author.to_string(),
        language: opts.language.to_string(),
    };
    let mut deck = Deck {
        pres: Presentation::new(props, theme_scheme(palette, fonts)),
        palette,
        fonts,
        opts,
        footer: doc.footer_label(),
        page: 0,
        truncations: Vec::new(),
    };

    deck.title_slide(doc);
    deck.summary_slide(doc);
    deck.findings_slide(&doc.key_findings);
    deck.divider_slide();

    deck.note_cut("analysis slides", doc.analyses.len(), MAX_ANALYSES);
    for (i, analysis) in doc.analyses.iter().take(MAX_ANALYSES).enumerate() {
        let title = if analysis.title.is_empty() {
            format!("Analysis {}", i + 1)
        } else {
            analysis.title.clone()
        };
        deck.analysis_slide(&title, &analysis.body);
    }

    deck.list_slide("Areas of Consensus", "consensus bullets", &doc.consensus);
    deck.list_slide("Areas of Debate", "debate bullets", &doc.debate);
    deck.sources_slide(&doc.sources);
    deck.gaps_slide(&doc.gaps);

    debug!(
        "Laid out {} slides ({} truncations)",
        deck.pres.slide_count(),
        deck.truncations.len()
    );
    Layout {
        presentation: deck.pres,
        truncations: deck.truncations,
    }
}

/// Theme part colors and fonts derived from the slide palette.
fn theme_scheme(palette: &Palette, fonts: &FontPair) -> ThemeScheme {
    ThemeScheme {
        name: palette.theme_name.clone(),
        dark1: palette.text,
        light1: HexColor::WHITE,
        dark2: palette.dark,
        light2: palette.bg,
        accents: [
            palette.accent1,
            palette.accent2,
            palette.accent1.mix(HexColor::WHITE, 0.40),
            palette.accent2.mix(HexColor::WHITE, 0.40),
            palette.accent1.mix(HexColor::BLACK, 0.30),
            palette.accent2.mix(HexColor::BLACK, 0.30),
        ],
        major_font: fonts.header.clone(),
        minor_font: fonts.body.clone(),
    }
}

/// Alternate between the two accents.
fn accent(palette: &Palette, i: usize) -> HexColor {
    if i % 2 == 0 {
        palette.accent1
    } else {
        palette.accent2
    }
}

struct Deck<'a> {
    pres: Presentation,
    palette: &'a Palette,
    fonts: &'a FontPair,
    opts: &'a LayoutOptions<'a>,
    footer: String,
    page: usize,
    truncations: Vec<Truncation>,
}

impl Deck<'_> {
    // ── Building blocks ──────────────────────────────────────────────────

    fn header_style(&self, size: f64, color: HexColor) -> TextStyle {
        TextStyle::new(&self.fonts.header, size, color).language(self.opts.language)
    }

    fn body_style(&self, size: f64, color: HexColor) -> TextStyle {
        TextStyle::new(&self.fonts.body, size, color).language(self.opts.language)
    }

    fn note_cut(&mut self, what: &str, len: usize, cap: usize) {
        if len > cap {
            warn!("{what}: {len} items, only {cap} fit; dropping {}", len - cap);
            self.truncations.push(Truncation {
                what: what.to_string(),
                kept: cap,
                dropped: len - cap,
            });
        }
    }

    /// New slide with background, side bar, dot motif and (unless hidden)
    /// footer. Returns the slide's page number.
    fn new_slide(&mut self, dark: bool, footer: bool) -> (Slide, usize) {
        self.page += 1;
        let p = self.palette;
        let mut slide = Slide::with_background(if dark { p.dark } else { p.bg });

        let bar = if dark { p.accent1 } else { p.accent2 };
        slide.add(Shape::geometric(
            Frame::new(0.0, 0.0, 0.18, SLIDE_H),
            ShapeStyle::solid(Geometry::Rect, bar),
        ));

        let dots = [
            (SLIDE_W - 1.55, 0.45, p.accent2),
            (SLIDE_W - 1.15, 0.40, p.accent1),
            (SLIDE_W - 0.78, 0.50, p.accent2),
            (SLIDE_W - 1.30, 0.68, p.accent1),
            (SLIDE_W - 0.92, 0.72, p.accent2),
        ];
        for (x, y, color) in dots {
            let mut style = ShapeStyle::solid(Geometry::Ellipse, color);
            style.rotation_deg = 18.0;
            slide.add(Shape::geometric(Frame::new(x, y, 0.22, 0.14), style));
        }

        if footer {
            let (left, right) = if dark {
                (p.bg.mix(HexColor::WHITE, 0.35), p.bg.mix(HexColor::WHITE, 0.30))
            } else {
                let muted = p.text.mix(HexColor::WHITE, 0.25);
                (muted, muted)
            };
            slide.add(Shape::Text(TextBox::new(
                Frame::new(0.35, SLIDE_H - 0.42, 6.5, 0.3),
                &self.footer,
                self.body_style(10.0, left),
            )));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(SLIDE_W - 0.95, SLIDE_H - 0.45, 0.6, 0.3),
                &self.page.to_string(),
                self.body_style(10.0, right).align(Align::Right),
            )));
        }

        (slide, self.page)
    }

    fn h1(&self, slide: &mut Slide, title: &str, subtitle: &str) {
        let p = self.palette;
        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.55, 0.62, SLIDE_W - 1.2, 0.6),
            title,
            self.header_style(34.0, p.text).bold(),
        )));
        if !subtitle.is_empty() {
            slide.add(Shape::Text(TextBox::new(
                Frame::new(0.55, 1.2, SLIDE_W - 1.2, 0.4),
                subtitle,
                self.body_style(14.0, p.text.mix(HexColor::WHITE, 0.35)),
            )));
        }
    }

    fn card(&self, slide: &mut Slide, frame: Frame, fill: Option<HexColor>, line: Option<HexColor>) {
        let p = self.palette;
        slide.add(Shape::geometric(
            frame,
            ShapeStyle {
                fill: Some(fill.unwrap_or(p.card)),
                line: Some(LineStyle {
                    color: line.unwrap_or_else(|| p.text.mix(HexColor::WHITE, 0.80)),
                    width_pt: 0.7,
                }),
                shadow: Some(Shadow::default()),
                ..Default::default()
            },
        ));
    }

    fn bullets<S: AsRef<str>>(&self, slide: &mut Slide, items: &[S], frame: Frame) {
        let style = self.body_style(16.0, self.palette.text).space_after(6.0);
        slide.add(Shape::Text(TextBox::list(frame, items, BulletKind::Dot, style)));
    }

    fn push(&mut self, slide: Slide) {
        self.pres.add_slide(slide);
    }

    // ── Slides ───────────────────────────────────────────────────────────

    fn title_slide(&mut self, doc: &ParsedDocument) {
        let p = self.palette;
        let (mut slide, _) = self.new_slide(true, false);

        let title = strip_md(&doc.title).replace("（Deep Research）", "");
        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.55, 1.5, SLIDE_W - 1.2, 1.4),
            title.trim(),
            self.header_style(46.0, p.bg_text).bold(),
        )));

        slide.add(Shape::geometric(
            Frame::new(0.55, 3.25, 6.7, 0.55),
            ShapeStyle {
                fill: Some(p.accent2),
                fill_transparency: 0.12,
                ..Default::default()
            },
        ));
        let subtitle = format!(
            "Date: {}  ·  Theme: {}",
            doc.date.as_deref().unwrap_or("—"),
            self.opts.theme_label
        );
        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.75, 3.33, 6.3, 0.4),
            &subtitle,
            self.body_style(16.0, p.bg_text),
        )));
        self.push(slide);
    }

    fn summary_slide(&mut self, doc: &ParsedDocument) {
        let p = self.palette;
        let (mut slide, _) = self.new_slide(false, true);
        self.h1(&mut slide, "Executive Summary", "The core conclusion, up front.");

        self.card(&mut slide, Frame::new(MARGIN, 1.75, 6.3, 3.2), None, None);
        let summary = if doc.executive_summary.is_empty() {
            NO_SUMMARY
        } else {
            &doc.executive_summary
        };
        slide.add(Shape::Text(TextBox::new(
            Frame::new(MARGIN + 0.35, 1.95, 5.6, 2.8),
            summary,
            self.body_style(16.0, p.text).line_spacing(1.1),
        )));

        self.card(
            &mut slide,
            Frame::new(7.2, 1.75, 2.15, 3.2),
            Some(p.card.mix(p.accent1, 0.06)),
            None,
        );
        slide.add(Shape::Text(TextBox::new(
            Frame::new(7.42, 1.95, 1.75, 0.35),
            "Theme",
            self.header_style(16.0, p.text).bold(),
        )));

        let tags = [
            self.opts.theme_name.unwrap_or(self.opts.theme_label),
            "Consistent palette",
            "Structured content",
            "Verifiable output",
        ];
        let mut y = 2.38;
        for (i, tag) in tags.iter().enumerate() {
            let c = accent(p, i);
            slide.add(Shape::geometric(
                Frame::new(7.42, y, 1.75, 0.42),
                ShapeStyle {
                    geometry: Geometry::RoundRect,
                    fill: Some(c.mix(HexColor::WHITE, 0.45)),
                    line: Some(LineStyle {
                        color: c.mix(HexColor::WHITE, 0.10),
                        width_pt: 1.0,
                    }),
                    ..Default::default()
                },
            ));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(7.42, y + 0.08, 1.75, 0.3),
                tag,
                self.body_style(12.0, p.text).align(Align::Center),
            )));
            y += 0.55;
        }
        self.push(slide);
    }

    fn findings_slide(&mut self, findings: &[KeyFinding]) {
        let p = self.palette;
        let (mut slide, _) = self.new_slide(false, true);
        self.h1(&mut slide, "Key Findings", "The most important points, one card each.");

        let placeholder = [KeyFinding {
            title: Some(MISSING.to_string()),
            body: "Add \"- \" bullets under Key Findings.".to_string(),
        }];
        let items = if findings.is_empty() { &placeholder[..] } else { findings };
        self.note_cut("key findings", items.len(), MAX_KEY_FINDINGS);

        let grid = [(MARGIN, 1.75), (5.35, 1.75), (MARGIN, 3.55), (5.35, 3.55)];
        for (i, (item, (x, y))) in items.iter().zip(grid).enumerate() {
            self.card(&mut slide, Frame::new(x, y, 4.0, 1.55), None, None);
            slide.add(Shape::geometric(
                Frame::new(x + 0.25, y + 0.28, 0.55, 0.55),
                ShapeStyle::solid(Geometry::Ellipse, accent(p, i)),
            ));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(x + 0.25, y + 0.34, 0.55, 0.45),
                &(i + 1).to_string(),
                self.header_style(18.0, p.bg_text).align(Align::Center),
            )));
            let title = item
                .title
                .clone()
                .unwrap_or_else(|| format!("Finding {}", i + 1));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(x + 0.92, y + 0.25, 2.95, 0.4),
                &title,
                self.header_style(17.0, p.text).bold(),
            )));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(x + 0.92, y + 0.68, 2.95, 0.95),
                &item.body,
                self.body_style(13.0, p.text.mix(HexColor::WHITE, 0.20)),
            )));
        }
        self.push(slide);
    }

    fn divider_slide(&mut self) {
        let p = self.palette;
        let (mut slide, _) = self.new_slide(true, true);
        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.55, 2.05, SLIDE_W - 1.2, 0.8),
            "Detailed Analysis",
            self.header_style(42.0, p.bg_text).bold(),
        )));
        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.55, 2.95, 8.5, 0.5),
            "One slide per subsection: narrative on the left, key points on the right.",
            self.body_style(16.0, p.bg_text.mix(HexColor::BLACK, 0.05)),
        )));
        self.push(slide);
    }

    fn analysis_slide(&mut self, title: &str, body: &str) {
        let p = self.palette;
        let (mut slide, page) = self.new_slide(false, true);
        self.h1(&mut slide, title, "");

        self.card(&mut slide, Frame::new(MARGIN, 1.8, 6.0, 3.25), None, None);
        let split = split_intro_and_bullets(body);
        let intro = if split.intro.is_empty() { NO_BODY } else { &split.intro };
        let intro_h = if split.bullets.is_empty() { 2.85 } else { 1.1 };
        slide.add(Shape::Text(TextBox::new(
            Frame::new(MARGIN + 0.35, 2.02, 5.3, intro_h),
            intro,
            self.body_style(15.0, p.text).line_spacing(1.12),
        )));

        let bullets: Vec<String> = split.bullets.iter().map(|b| strip_md(b)).collect();
        if !bullets.is_empty() {
            self.note_cut(
                &format!("bullets in analysis '{title}'"),
                bullets.len(),
                MAX_ANALYSIS_BULLETS,
            );
            let shown = &bullets[..bullets.len().min(MAX_ANALYSIS_BULLETS)];
            self.bullets(&mut slide, shown, Frame::new(MARGIN + 0.45, 3.06, 5.1, 2.0));
        }

        let panel_points: Vec<String> = if bullets.is_empty() {
            vec![strip_md(title)]
        } else {
            bullets.iter().take(MAX_PANEL_BULLETS).cloned().collect()
        };
        self.right_panel(&mut slide, page, &panel_points);
        self.push(slide);
    }

    /// Illustration for `page` if one is available, else up to three
    /// mini-bullets.
    fn right_panel(&self, slide: &mut Slide, page: usize, points: &[String]) {
        let p = self.palette;
        let (x, y, w, h) = (6.85, 1.8, 2.5, 3.25);
        self.card(
            slide,
            Frame::new(x, y, w, h),
            Some(p.card.mix(p.accent2, 0.05)),
            None,
        );

        let image = self.opts.images_dir.and_then(|dir| {
            let path = find_slide_image(dir, page)?;
            match load_slide_image(&path) {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!("{e}; using the bullet panel instead");
                    None
                }
            }
        });

        if let Some(img) = image {
            slide.add(Shape::Text(TextBox::new(
                Frame::new(x + 0.2, y + 0.22, w - 0.4, 0.3),
                "Illustration",
                self.header_style(12.0, p.text).bold(),
            )));
            let frame = Frame::new(x + 0.18, y + 0.58, w - 0.36, h - 0.95);
            let caption = img
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            slide.add(Shape::Picture(Picture {
                crop: Crop::cover(img.width, img.height, &frame),
                frame,
                data: img.data,
                format: img.format,
                description: caption.clone(),
            }));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(x + 0.2, y + h - 0.34, w - 0.4, 0.28),
                &caption,
                self.body_style(10.0, p.text.mix(HexColor::WHITE, 0.30)),
            )));
            return;
        }

        slide.add(Shape::Text(TextBox::new(
            Frame::new(x + 0.2, y + 0.22, w - 0.4, 0.4),
            "Key points",
            self.header_style(16.0, p.text).bold(),
        )));
        let mut yy = y + 0.75;
        for (k, point) in points.iter().take(MAX_PANEL_BULLETS).enumerate() {
            slide.add(Shape::geometric(
                Frame::new(x + 0.2, yy + 0.05, 0.16, 0.16),
                ShapeStyle::solid(Geometry::Ellipse, accent(p, k)),
            ));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(x + 0.42, yy, w - 0.62, 0.3),
                point,
                self.body_style(13.0, p.text.mix(HexColor::WHITE, 0.15)),
            )));
            yy += 0.48;
        }
    }

    fn list_slide(&mut self, heading: &str, what: &str, items: &[String]) {
        let (mut slide, _) = self.new_slide(false, true);
        self.h1(&mut slide, heading, "");
        self.card(
            &mut slide,
            Frame::new(MARGIN, 1.75, SLIDE_W - 1.35, 3.4),
            None,
            None,
        );
        self.note_cut(what, items.len(), MAX_LIST_BULLETS);
        let frame = Frame::new(MARGIN + 0.45, 2.05, SLIDE_W - 2.2, 2.85);
        if items.is_empty() {
            self.bullets(&mut slide, &[MISSING], frame);
        } else {
            self.bullets(&mut slide, &items[..items.len().min(MAX_LIST_BULLETS)], frame);
        }
        self.push(slide);
    }

    fn sources_slide(&mut self, sources: &[Source]) {
        let p = self.palette;
        let (mut slide, _) = self.new_slide(false, true);
        self.h1(&mut slide, "Sources", "(by citation number)");
        self.card(
            &mut slide,
            Frame::new(MARGIN, 1.55, SLIDE_W - 1.35, 3.65),
            None,
            None,
        );

        let placeholder = [Source {
            id: "1".to_string(),
            title: MISSING.to_string(),
            url: String::new(),
        }];
        let list = if sources.is_empty() { &placeholder[..] } else { sources };
        self.note_cut("sources", list.len(), MAX_SOURCES);

        let (y0, row_h) = (1.7, 0.62);
        for (i, source) in list.iter().take(MAX_SOURCES).enumerate() {
            let y = y0 + i as f64 * row_h;
            slide.add(Shape::geometric(
                Frame::new(MARGIN + 0.35, y + 0.04, 0.42, 0.42),
                ShapeStyle::solid(Geometry::RoundRect, accent(p, i)),
            ));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(MARGIN + 0.35, y + 0.12, 0.42, 0.3),
                &source.id,
                self.header_style(12.0, p.bg_text).align(Align::Center),
            )));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(MARGIN + 0.85, y, 7.9, 0.28),
                &source.title,
                self.body_style(12.0, p.text),
            )));
            slide.add(Shape::Text(TextBox::new(
                Frame::new(MARGIN + 0.85, y + 0.27, 7.9, 0.25),
                &source.url,
                self.body_style(10.0, p.text.mix(HexColor::WHITE, 0.35)),
            )));
        }
        self.push(slide);
    }

    fn gaps_slide(&mut self, gaps: &[String]) {
        let p = self.palette;
        let (mut slide, _) = self.new_slide(true, true);
        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.55, 0.8, SLIDE_W - 1.2, 0.7),
            "Gaps & Next Steps",
            self.header_style(38.0, p.bg_text).bold(),
        )));
        self.card(
            &mut slide,
            Frame::new(MARGIN, 1.7, SLIDE_W - 1.35, 3.35),
            Some(p.dark.mix(HexColor::WHITE, 0.06)),
            Some(p.bg_text.mix(HexColor::BLACK, 0.55)),
        );
        slide.add(Shape::Text(TextBox::new(
            Frame::new(MARGIN + 0.45, 1.95, SLIDE_W - 2.2, 0.35),
            "Where the research should go next:",
            self.header_style(16.0, p.bg_text).bold(),
        )));

        let steps: Vec<&str> = if gaps.is_empty() {
            vec![MISSING]
        } else {
            gaps.iter().map(String::as_str).collect()
        };
        slide.add(Shape::Text(TextBox::list(
            Frame::new(MARGIN + 0.45, 2.35, SLIDE_W - 2.2, 2.3),
            &steps,
            BulletKind::Numbered,
            self.body_style(16.0, p.bg_text.mix(HexColor::BLACK, 0.02))
                .space_after(10.0),
        )));

        slide.add(Shape::Text(TextBox::new(
            Frame::new(0.55, SLIDE_H - 0.55, SLIDE_W - 1.2, 0.3),
            &format!("(Theme: {} / theme-factory)", p.theme_name),
            self.body_style(10.0, p.bg_text.mix(HexColor::BLACK, 0.12)),
        )));
        self.push(slide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::document::{parse_document, AnalysisSection};

    fn opts() -> LayoutOptions<'static> {
        LayoutOptions {
            theme_label: "golden-hour",
            theme_name: None,
            images_dir: None,
            language: "en-US",
            author: "tests",
        }
    }

    fn texts(slide: &Slide) -> Vec<String> {
        slide
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text(t) => Some(
                    t.paragraphs
                        .iter()
                        .map(|p| p.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
                _ => None,
            })
            .collect()
    }

    fn layout(doc: &ParsedDocument) -> Layout {
        render_deck(doc, &Palette::fallback(), &FontPair::default(), &opts())
    }

    #[test]
    fn empty_document_gets_skeleton_with_placeholders() {
        let (doc, _) = parse_document("");
        let out = layout(&doc);
        let slides = out.presentation.slides();
        assert_eq!(slides.len(), 8);
        assert!(texts(&slides[1]).iter().any(|t| t == NO_SUMMARY));
        assert!(texts(&slides[2]).iter().any(|t| t == MISSING));
        assert!(texts(&slides[4]).iter().any(|t| t == MISSING));
        assert!(texts(&slides[7]).iter().any(|t| t == MISSING));
        assert!(out.truncations.is_empty());
    }

    #[test]
    fn one_slide_per_analysis_capped_at_five() {
        let (mut doc, _) = parse_document("# T\n");
        doc.analyses = (0..7)
            .map(|i| AnalysisSection {
                title: format!("A{i}"),
                body: "intro".into(),
            })
            .collect();
        let out = layout(&doc);
        assert_eq!(out.presentation.slide_count(), 8 + MAX_ANALYSES);
        assert_eq!(
            out.truncations,
            [Truncation {
                what: "analysis slides".into(),
                kept: 5,
                dropped: 2
            }]
        );
    }

    #[test]
    fn list_overflow_is_recorded() {
        let (mut doc, _) = parse_document("# T\n");
        doc.consensus = (0..11).map(|i| format!("c{i}")).collect();
        let out = layout(&doc);
        let t = out
            .truncations
            .iter()
            .find(|t| t.what == "consensus bullets")
            .unwrap();
        assert_eq!((t.kept, t.dropped), (8, 3));
        let consensus = texts(&out.presentation.slides()[4]);
        assert!(consensus.iter().any(|t| t.starts_with("c0\nc1") && t.ends_with("c7")));
    }

    #[test]
    fn title_slide_has_no_footer_and_strips_suffix() {
        let (doc, _) = parse_document("# 咖啡（Deep Research）\n生成日期：2025-03-01\n");
        let out = layout(&doc);
        let title = texts(&out.presentation.slides()[0]);
        assert_eq!(title[0], "咖啡");
        assert_eq!(title[1], "Date: 2025-03-01  ·  Theme: golden-hour");
        assert_eq!(title.len(), 2);
        // Second slide carries title • date and page 2.
        let summary = texts(&out.presentation.slides()[1]);
        assert!(summary.contains(&"咖啡（Deep Research） • 2025-03-01".to_string()));
        assert!(summary.contains(&"2".to_string()));
    }

    #[test]
    fn analysis_panel_uses_first_three_bullets() {
        let (mut doc, _) = parse_document("# T\n");
        doc.analyses = vec![AnalysisSection {
            title: "Supply".into(),
            body: "Beans.\n- a\n- b\n- c\n- d".into(),
        }];
        let out = layout(&doc);
        let slide = texts(&out.presentation.slides()[4]);
        assert!(slide.contains(&"a\nb\nc\nd".to_string()));
        assert!(slide.contains(&"Key points".to_string()));
        assert!(slide.contains(&"c".to_string()));
        assert!(!slide.contains(&"d".to_string()));
    }

    #[test]
    fn analysis_image_found_by_page_number() {
        use image::{DynamicImage, Rgba, RgbaImage};
        let dir = tempfile::tempdir().unwrap();
        // The single analysis slide is page 5.
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 255])))
            .save_with_format(dir.path().join("slide-05.png"), image::ImageFormat::Png)
            .unwrap();
        let (mut doc, _) = parse_document("# T\n");
        doc.analyses = vec![AnalysisSection {
            title: "Art".into(),
            body: "Body.".into(),
        }];
        let options = LayoutOptions {
            images_dir: Some(dir.path()),
            ..opts()
        };
        let out = render_deck(&doc, &Palette::fallback(), &FontPair::default(), &options);
        let slide = &out.presentation.slides()[4];
        assert_eq!(slide.pictures().count(), 1);
        assert!(texts(slide).contains(&"slide-05.png".to_string()));
    }

    #[test]
    fn unreadable_image_falls_back_to_bullets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("slide-05.png"), b"nope").unwrap();
        let (mut doc, _) = parse_document("# T\n");
        doc.analyses = vec![AnalysisSection {
            title: "Art".into(),
            body: String::new(),
        }];
        let options = LayoutOptions {
            images_dir: Some(dir.path()),
            ..opts()
        };
        let out = render_deck(&doc, &Palette::fallback(), &FontPair::default(), &options);
        let slide = &out.presentation.slides()[4];
        assert_eq!(slide.pictures().count(), 0);
        let t = texts(slide);
        assert!(t.contains(&NO_BODY.to_string()));
        assert!(t.contains(&"Art".to_string()));
    }

    #[test]
    fn summary_tag_prefers_loaded_theme_name() {
        let (doc, _) = parse_document("# T\n");
        let out = layout(&doc);
        assert!(texts(&out.presentation.slides()[1]).contains(&"golden-hour".to_string()));

        let options = LayoutOptions {
            theme_name: Some("Golden Hour"),
            ..opts()
        };
        let out = render_deck(&doc, &Palette::fallback(), &FontPair::default(), &options);
        let summary = texts(&out.presentation.slides()[1]);
        assert!(summary.contains(&"Golden Hour".to_string()));
        assert!(!summary.contains(&"golden-hour".to_string()));
    }
}
