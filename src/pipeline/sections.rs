//! Heading-delimited section slicing.
//!
//! A report is read as a fixed sequence of literal `## ` headings. Each
//! section is the text between its heading and the next one in the sequence.
//! Slicing is plain substring search: it has no notion of heading levels,
//! code blocks or prose, so a heading string quoted inside a paragraph is
//! matched just like a real heading.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Title used when the report has no `# ` line.
pub const DEFAULT_TITLE: &str = "Deep Research";

/// Marker that introduces the optional generation-date line.
pub const DATE_MARKER: &str = "生成日期：";

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

static RE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^生成日期：\s*([0-9-]+)\s*$").unwrap());

/// The seven report sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ExecutiveSummary,
    KeyFindings,
    DetailedAnalysis,
    Consensus,
    Debate,
    Sources,
    Gaps,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::ExecutiveSummary,
        SectionKind::KeyFindings,
        SectionKind::DetailedAnalysis,
        SectionKind::Consensus,
        SectionKind::Debate,
        SectionKind::Sources,
        SectionKind::Gaps,
    ];

    /// The literal heading line that opens the section.
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "## Executive Summary",
            SectionKind::KeyFindings => "## Key Findings",
            SectionKind::DetailedAnalysis => "## Detailed Analysis",
            SectionKind::Consensus => "## Areas of Consensus",
            SectionKind::Debate => "## Areas of Debate",
            SectionKind::Sources => "## Sources",
            SectionKind::Gaps => "## Gaps and Further Research",
        }
    }

    /// The section whose heading ends this one. `None` for the last section,
    /// which runs to the end of the document.
    pub fn next(self) -> Option<SectionKind> {
        let idx = Self::ALL.iter().position(|k| *k == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Slice this section out of `doc`.
    pub fn slice(self, doc: &str) -> &str {
        section_between(doc, self.heading(), self.next().map(SectionKind::heading))
    }
}

/// Text between the first occurrence of `start` and the first subsequent
/// occurrence of `end`, trimmed.
///
/// Returns `""` when `start` does not occur. When `end` is `None` or does not
/// occur after `start`, the rest of the document is returned.
pub fn section_between<'a>(doc: &'a str, start: &str, end: Option<&str>) -> &'a str {
    let Some(start_idx) = doc.find(start) else {
        return "";
    };
    let after = &doc[start_idx + start.len()..];
    let body = match end.and_then(|e| after.find(e)) {
        Some(end_idx) => &after[..end_idx],
        None => after,
    };
    body.trim()
}

/// First `# ` heading, or `None` when the report has none.
pub fn extract_title(doc: &str) -> Option<String> {
    RE_TITLE
        .captures(doc)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Value of the `生成日期：YYYY-MM-DD` line, if present.
pub fn extract_date(doc: &str) -> Option<String> {
    RE_DATE
        .captures(doc)
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty())
}
