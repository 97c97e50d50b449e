//! Output types returned by the conversion entry points.

use crate::palette::{FontPair, Palette};
use crate::pipeline::document::ParsedDocument;
use crate::pipeline::sections::SectionKind;
use serde::Serialize;
use std::path::PathBuf;

/// Non-fatal findings about how well the input matched the report layout.
///
/// Nothing here stops a conversion; callers decide whether to surface it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub title_found: bool,
    pub date_found: bool,
    /// One entry per expected section, in document order.
    pub sections: Vec<SectionReport>,
    /// Non-blank lines under "Sources" that were not citations.
    pub dropped_source_lines: usize,
    /// Content cut because a slide has a fixed capacity.
    pub truncations: Vec<Truncation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub section: SectionKind,
    pub heading: &'static str,
    pub found: bool,
    pub items: usize,
}

/// A list that was longer than its slide allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncation {
    /// Which list was cut, e.g. `"key findings"`.
    pub what: String,
    pub kept: usize,
    pub dropped: usize,
}

impl Diagnostics {
    /// One human-readable line per problem, for logging.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.title_found {
            out.push("no '# ' title line; using the default title".to_string());
        }
        for s in self.sections.iter().filter(|s| !s.found) {
            out.push(format!("section '{}' not found", s.heading));
        }
        for s in self.sections.iter().filter(|s| s.found && s.items == 0) {
            out.push(format!("section '{}' has no usable content", s.heading));
        }
        if self.dropped_source_lines > 0 {
            out.push(format!(
                "{} line(s) under '## Sources' did not match '[n] Title. https://…' and were skipped",
                self.dropped_source_lines
            ));
        }
        for t in &self.truncations {
            out.push(format!(
                "{}: kept {}, dropped {}",
                t.what, t.kept, t.dropped
            ));
        }
        out
    }

    pub fn is_clean(&self) -> bool {
        self.warnings().is_empty()
    }
}

/// A rendered slide deck plus everything that went into it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckOutput {
    /// The `.pptx` package.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub document: ParsedDocument,
    pub palette: Palette,
    pub fonts: FontPair,
    pub diagnostics: Diagnostics,
    pub slide_count: usize,
}

/// Result of a PDF conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOutput {
    pub output_path: PathBuf,
    pub bytes_written: u64,
    /// Whether page-numbering front matter was injected (false when the
    /// document already configured its own).
    pub page_numbering_injected: bool,
    pub duration_ms: u64,
}

/// Result of generating the images of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePackOutput {
    /// Files written by this run, in plan order.
    pub written: Vec<PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
}
