//! YAML front-matter: splitting, page-numbering injection, print settings.
//!
//! Print options live under a `chrome:` key (or `puppeteer:`, for documents
//! written for other markdown-to-PDF tools). When a document has neither,
//! [`inject_page_numbering`] adds a `chrome:` block that turns on the footer
//! with the file name and page counter. A document that already has one is
//! left exactly as written.

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Keys that carry print settings, in lookup order.
pub const PRINT_KEYS: [&str; 2] = ["chrome", "puppeteer"];

/// Page margins as CSS lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: "1cm".to_string(),
            bottom: "1.5cm".to_string(),
            left: "1cm".to_string(),
            right: "1cm".to_string(),
        }
    }
}

/// Page setup read from the front-matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintSettings {
    /// Draw the footer (file name left, `page / pages` right).
    pub display_header_footer: bool,
    /// Text in the bottom-left margin box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_label: Option<String>,
    pub margin: Margins,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub landscape: bool,
    /// CSS page size keyword: `A4`, `Letter`, `Legal`, …
    pub format: String,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            display_header_footer: false,
            footer_label: None,
            margin: Margins::default(),
            landscape: false,
            format: "Letter".to_string(),
        }
    }
}

impl PrintSettings {
    /// The footer block injected into documents that have none.
    pub fn page_numbering(filename: &str) -> Self {
        Self {
            display_header_footer: true,
            footer_label: Some(filename.to_string()),
            ..Self::default()
        }
    }

    /// Settings from the first truthy print key, or the defaults.
    pub fn from_front_matter(data: &Mapping) -> Result<Self, ExportError> {
        let Some(block) = PRINT_KEYS
            .iter()
            .filter_map(|k| data.get(*k))
            .find(|v| is_truthy(v))
        else {
            return Ok(Self::default());
        };
        if !block.is_mapping() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(block.clone())
            .map_err(|e| ExportError::FrontMatter(format!("print settings: {e}")))
    }
}

/// Split `content` into its front-matter YAML (without fences) and body.
///
/// Front-matter must open on the very first line with `---` and close with a
/// line that is exactly `---`. Anything else is all body.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Front-matter as a YAML mapping, plus the body. No front-matter gives an
/// empty mapping.
pub fn parse_front_matter(content: &str) -> Result<(Mapping, &str), ExportError> {
    let (yaml, body) = split_front_matter(content);
    let Some(yaml) = yaml else {
        return Ok((Mapping::new(), body));
    };
    let data = match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(m)) => m,
        Ok(Value::Null) => Mapping::new(),
        Ok(_) => {
            return Err(ExportError::FrontMatter(
                "front-matter must be a key/value mapping".into(),
            ))
        }
        Err(e) => return Err(ExportError::FrontMatter(e.to_string())),
    };
    Ok((data, body))
}

/// Add a page-numbering `chrome:` block unless the document already has a
/// truthy `chrome` or `puppeteer` key. Other keys are preserved.
pub fn inject_page_numbering(content: &str, filename: &str) -> Result<String, ExportError> {
    let (mut data, body) = parse_front_matter(content)?;
    if PRINT_KEYS
        .iter()
        .any(|k| data.get(*k).is_some_and(is_truthy))
    {
        return Ok(content.to_string());
    }

    let block = serde_yaml::to_value(PrintSettings::page_numbering(filename))
        .map_err(|e| ExportError::Internal(format!("serialize print settings: {e}")))?;
    data.insert(Value::from("chrome"), block);
    let yaml = serde_yaml::to_string(&Value::Mapping(data))
        .map_err(|e| ExportError::Internal(format!("serialize front-matter: {e}")))?;
    Ok(format!("---\n{yaml}---\n{body}"))
}

/// YAML truthiness the way front-matter users expect it: null, `false`, zero
/// and the empty string are off.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_requires_fence_on_first_line() {
        assert_eq!(
            split_front_matter("---\ntitle: A\n---\n# Body\n"),
            (Some("title: A\n"), "# Body\n")
        );
        assert_eq!(split_front_matter("\n---\na: 1\n---\n").0, None);
        assert_eq!(split_front_matter("---\nunclosed: 1\n").0, None);
        assert_eq!(split_front_matter("---\r\na: 1\r\n---\r\nx").1, "x");
    }

    #[test]
    fn injects_footer_into_plain_document() {
        let out = inject_page_numbering("# Hello\n", "notes.md").unwrap();
        assert!(out.starts_with("---\n"));
        let (data, body) = parse_front_matter(&out).unwrap();
        assert_eq!(body, "# Hello\n");
        let settings = PrintSettings::from_front_matter(&data).unwrap();
        assert_eq!(settings, PrintSettings::page_numbering("notes.md"));
        assert_eq!(settings.margin.bottom, "1.5cm");
    }

    #[test]
    fn keeps_existing_keys_when_merging() {
        let out = inject_page_numbering("---\ntitle: Report\n---\nbody", "r.md").unwrap();
        let (data, body) = parse_front_matter(&out).unwrap();
        assert_eq!(data.get("title").and_then(Value::as_str), Some("Report"));
        assert!(data.get("chrome").is_some());
        assert_eq!(body, "body");
    }

    #[test]
    fn existing_print_block_is_left_alone() {
        for doc in [
            "---\nchrome:\n  landscape: true\n---\nbody",
            "---\npuppeteer:\n  format: A4\n---\nbody",
        ] {
            assert_eq!(inject_page_numbering(doc, "x.md").unwrap(), doc);
        }
    }

    #[test]
    fn falsy_print_key_is_overridden() {
        let out = inject_page_numbering("---\nchrome: false\n---\nbody", "x.md").unwrap();
        let (data, _) = parse_front_matter(&out).unwrap();
        assert!(PrintSettings::from_front_matter(&data).unwrap().display_header_footer);
    }

    #[test]
    fn print_settings_from_user_block() {
        let (data, _) = parse_front_matter(
            "---\npuppeteer:\n  landscape: true\n  format: A4\n  margin:\n    top: 2cm\n---\n",
        )
        .unwrap();
        let s = PrintSettings::from_front_matter(&data).unwrap();
        assert!(s.landscape);
        assert!(!s.display_header_footer);
        assert_eq!(s.format, "A4");
        assert_eq!(s.margin.top, "2cm");
        assert_eq!(s.margin.left, "1cm");
    }

    #[test]
    fn invalid_yaml_is_front_matter_error() {
        let err = parse_front_matter("---\n: : :\n  - [\n---\n").unwrap_err();
        assert!(matches!(err, ExportError::FrontMatter(_)));
        let err = parse_front_matter("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, ExportError::FrontMatter(_)));
    }
}
