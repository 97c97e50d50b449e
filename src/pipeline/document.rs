//! The structured report model and the pass that builds it.

use super::parse::{
    normalize_paragraphs, parse_bullets, parse_detailed_analysis, parse_sources,
    split_bold_prefix, strip_md,
};
use super::sections::{extract_date, extract_title, SectionKind, DEFAULT_TITLE};
use crate::output::{Diagnostics, SectionReport};
use serde::Serialize;
use tracing::debug;

/// One bullet from "Key Findings".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFinding {
    pub title: Option<String>,
    pub body: String,
}

/// One `### ` block from "Detailed Analysis".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSection {
    pub title: String,
    pub body: String,
}

/// One citation from "Sources".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Everything the deck is rendered from. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub title: String,
    pub date: Option<String>,
    pub executive_summary: String,
    pub key_findings: Vec<KeyFinding>,
    pub analyses: Vec<AnalysisSection>,
    pub consensus: Vec<String>,
    pub debate: Vec<String>,
    pub sources: Vec<Source>,
    pub gaps: Vec<String>,
}

/// Parse a report. Never fails; what is missing shows up in the returned
/// [`Diagnostics`].
pub fn parse_document(md: &str) -> (ParsedDocument, Diagnostics) {
    let section = |kind: SectionKind| kind.slice(md);
    let plain_bullets = |kind: SectionKind| -> Vec<String> {
        parse_bullets(section(kind)).iter().map(|b| strip_md(b)).collect()
    };

    let title = extract_title(md);
    let date = extract_date(md);
    let (sources, dropped_source_lines) = parse_sources(section(SectionKind::Sources));

    let doc = ParsedDocument {
        title: title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        date: date.clone(),
        executive_summary: strip_md(&normalize_paragraphs(section(
            SectionKind::ExecutiveSummary,
        ))),
        key_findings: parse_bullets(section(SectionKind::KeyFindings))
            .iter()
            .map(|b| split_bold_prefix(b))
            .collect(),
        analyses: parse_detailed_analysis(section(SectionKind::DetailedAnalysis)),
        consensus: plain_bullets(SectionKind::Consensus),
        debate: plain_bullets(SectionKind::Debate),
        sources,
        gaps: plain_bullets(SectionKind::Gaps),
    };

    let sections = SectionKind::ALL
        .iter()
        .map(|&kind| SectionReport {
            section: kind,
            heading: kind.heading(),
            found: md.contains(kind.heading()),
            items: doc.item_count(kind),
        })
        .collect();

    let diagnostics = Diagnostics {
        title_found: title.is_some(),
        date_found: date.is_some(),
        sections,
        dropped_source_lines,
        truncations: Vec::new(),
    };

    debug!(
        "Parsed '{}': {} findings, {} analyses, {} sources",
        doc.title,
        doc.key_findings.len(),
        doc.analyses.len(),
        doc.sources.len()
    );

    (doc, diagnostics)
}

impl ParsedDocument {
    /// Number of extracted entries for `kind`. The executive summary counts
    /// its non-empty lines.
    pub fn item_count(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::ExecutiveSummary => self.executive_summary.lines().count(),
            SectionKind::KeyFindings => self.key_findings.len(),
            SectionKind::DetailedAnalysis => self.analyses.len(),
            SectionKind::Consensus => self.consensus.len(),
            SectionKind::Debate => self.debate.len(),
            SectionKind::Sources => self.sources.len(),
            SectionKind::Gaps => self.gaps.len(),
        }
    }

    /// `title • date` (or just the title) for slide footers.
    pub fn footer_label(&self) -> String {
        let title = strip_md(&self.title);
        match &self.date {
            Some(date) => format!("{title} • {date}"),
            None => title,
        }
    }
}
