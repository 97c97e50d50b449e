//! Structured-content parsers for section bodies.
//!
//! Every function here is total: text that does not have the expected shape
//! yields an empty collection (or the input unchanged), never an error. The
//! layout stage turns empties into visible placeholders.

use super::document::{AnalysisSection, KeyFinding, Source};
use super::sections::DATE_MARKER;
use once_cell::sync::Lazy;
use regex::Regex;

/// `**label**：body` or `**label**: body`. Only these two separators count.
static RE_BOLD_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*[：:]\s*(.+)$").unwrap());

/// Sub-heading boundary inside "Detailed Analysis". The leading `^` also
/// catches a block that opens the section.
static RE_SUBHEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\r?\n)###\s+").unwrap());

/// `[n] Title. https://url`
static RE_SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d+)\]\s+(.+?)\.\s+(https?://\S+)\s*$").unwrap());

const BULLET: &str = "- ";

/// Remove `**` and backticks, then trim.
pub fn strip_md(text: &str) -> String {
    text.replace("**", "").replace('`', "").trim().to_string()
}

/// Trim each line, drop blank lines and the generation-date line, rejoin.
pub fn normalize_paragraphs(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(DATE_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bodies of every `- ` line, in order. Other lines are skipped.
pub fn parse_bullets(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter_map(|l| l.strip_prefix(BULLET))
        .map(|b| b.trim().to_string())
        .collect()
}

/// Split a `**label**: body` bullet into title and body.
///
/// An unmatched bullet comes back whole as the body, untouched.
pub fn split_bold_prefix(bullet: &str) -> KeyFinding {
    match RE_BOLD_PREFIX.captures(bullet) {
        Some(caps) => KeyFinding {
            title: Some(strip_md(&caps[1])),
            body: strip_md(&caps[2]),
        },
        None => KeyFinding {
            title: None,
            body: bullet.to_string(),
        },
    }
}

/// One [`AnalysisSection`] per `### ` block.
///
/// The first line of a block is its title; the rest is normalised with
/// [`normalize_paragraphs`]. Text before the first `### ` forms a block of
/// its own, titled by its first line.
pub fn parse_detailed_analysis(raw: &str) -> Vec<AnalysisSection> {
    RE_SUBHEADING
        .split(raw)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let (first, rest) = block.split_once('\n').unwrap_or((block, ""));
            AnalysisSection {
                title: strip_md(first),
                body: strip_md(&normalize_paragraphs(rest)),
            }
        })
        .collect()
}

/// Parse citation lines. Returns the sources and the number of non-blank
/// lines that did not match.
pub fn parse_sources(raw: &str) -> (Vec<Source>, usize) {
    let mut sources = Vec::new();
    let mut dropped = 0;
    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match RE_SOURCE.captures(line) {
            Some(caps) => sources.push(Source {
                id: caps[1].to_string(),
                title: strip_md(&caps[2]),
                url: strip_md(&caps[3]),
            }),
            None => dropped += 1,
        }
    }
    (sources, dropped)
}

/// Prose lines before the first bullet, and the bullets after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroAndBullets {
    pub intro: String,
    pub bullets: Vec<String>,
}

/// Split a block into its introductory prose and its bullet list.
///
/// Non-bullet lines that appear after the first bullet are discarded.
pub fn split_intro_and_bullets(text: &str) -> IntroAndBullets {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let Some(first_bullet) = lines.iter().position(|l| l.starts_with(BULLET)) else {
        return IntroAndBullets {
            intro: lines.join("\n"),
            bullets: Vec::new(),
        };
    };
    IntroAndBullets {
        intro: lines[..first_bullet].join("\n").trim().to_string(),
        bullets: lines[first_bullet..]
            .iter()
            .filter_map(|l| l.strip_prefix(BULLET))
            .map(|b| b.trim().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_skip_non_bullet_lines() {
        assert_eq!(parse_bullets("- a\n  not a bullet\n- b"), ["a", "b"]);
    }

    #[test]
    fn bullets_need_the_space() {
        assert_eq!(parse_bullets("-a\n* b\n  - c  \r\n"), ["c"]);
    }

    #[test]
    fn bold_prefix_half_and_full_width() {
        let half = split_bold_prefix("**Demand**: rising in `Q3`");
        assert_eq!(half.title.as_deref(), Some("Demand"));
        assert_eq!(half.body, "rising in Q3");

        let full = split_bold_prefix("**渠道**：下沉市场");
        assert_eq!(full.title.as_deref(), Some("渠道"));
        assert_eq!(full.body, "下沉市场");
    }

    #[test]
    fn bold_prefix_other_separators_do_not_split() {
        let dash = split_bold_prefix("**Demand** — rising");
        assert_eq!(dash.title, None);
        assert_eq!(dash.body, "**Demand** — rising");
    }

    #[test]
    fn analysis_two_blocks() {
        let got = parse_detailed_analysis("### First\nbody one\n### Second\nbody two");
        assert_eq!(
            got,
            [
                AnalysisSection {
                    title: "First".into(),
                    body: "body one".into()
                },
                AnalysisSection {
                    title: "Second".into(),
                    body: "body two".into()
                },
            ]
        );
    }

    #[test]
    fn analysis_body_is_normalised() {
        let raw = "### **Pricing**\r\n\r\n  Line one  \n生成日期：2025-01-01\n\n- point `a`\n";
        let got = parse_detailed_analysis(raw);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "Pricing");
        assert_eq!(got[0].body, "Line one\n- point a");
    }

    #[test]
    fn analysis_empty_input() {
        assert!(parse_detailed_analysis("  \n ").is_empty());
    }

    #[test]
    fn source_line_accepted() {
        let (sources, dropped) = parse_sources("[1] Example Title. https://example.com/path");
        assert_eq!(dropped, 0);
        assert_eq!(
            sources,
            [Source {
                id: "1".into(),
                title: "Example Title".into(),
                url: "https://example.com/path".into(),
            }]
        );
    }

    #[test]
    fn source_line_rejected_and_counted() {
        let (sources, dropped) = parse_sources(
            "not a source line\n\n[2] No url here.\n[x] Bad id. https://a.b\n[3] Ok. http://c.d/e",
        );
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id, "3");
        assert_eq!(dropped, 3);
    }

    #[test]
    fn intro_then_bullets() {
        let got = split_intro_and_bullets("Lead in.\nMore prose.\n- one\nstray\n- two");
        assert_eq!(got.intro, "Lead in.\nMore prose.");
        assert_eq!(got.bullets, ["one", "two"]);
    }

    #[test]
    fn intro_without_bullets() {
        let got = split_intro_and_bullets("\n just prose \n");
        assert_eq!(got.intro, "just prose");
        assert!(got.bullets.is_empty());
    }

    #[test]
    fn strip_md_removes_decoration() {
        assert_eq!(strip_md("  **bold** and `code` "), "bold and code");
    }

    #[test]
    fn normalize_drops_blank_and_date_lines() {
        assert_eq!(
            normalize_paragraphs(" a \n\n生成日期：2025-01-01\n b"),
            "a\nb"
        );
    }
}
