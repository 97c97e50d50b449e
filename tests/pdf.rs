//! Integration tests for the PDF printer.
//!
//! The front-matter and HTML stages run everywhere. Printing needs a real
//! Chromium-family browser, so those tests are gated behind the
//! `E2E_ENABLED` environment variable.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test pdf -- --nocapture

use mdexport::pdf::frontmatter::parse_front_matter;
use mdexport::pdf::{inject_page_numbering, render_html, PrintSettings};
use mdexport::{convert_pdf, default_pdf_path, PdfConfig};

// ── Test helpers ─────────────────────────────────────────────────────────────

const NOTES: &str = "\
---
title: Field Notes
---
# Field Notes

Line one
line two

```mermaid
graph LR
  A --> B
```

Energy: $E = mc^2$

| k | v |
|---|---|
| a | 1 |
";

/// Skip unless E2E_ENABLED is set and a browser can be found.
macro_rules! e2e_skip_unless_browser {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run browser tests");
            return;
        }
        match chrome_locate::locate_browser() {
            Ok(p) => p,
            Err(e) => {
                println!("SKIP — {e}");
                return;
            }
        }
    }};
}

// ── Offline tests ────────────────────────────────────────────────────────────

#[test]
fn full_page_for_typical_notes() {
    let prepared = inject_page_numbering(NOTES, "notes.md").unwrap();
    let (data, body) = parse_front_matter(&prepared).unwrap();
    assert_eq!(data.get("title").and_then(|v| v.as_str()), Some("Field Notes"));

    let settings = PrintSettings::from_front_matter(&data).unwrap();
    assert!(settings.display_header_footer);

    let html = render_html("Field Notes", body, &settings, &PdfConfig::default());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Field Notes</title>"));
    assert!(html.contains("Line one<br />"));
    assert!(html.contains("<pre class=\"mermaid\">"));
    assert!(html.contains("mermaid.esm.min.mjs"));
    assert!(html.contains(r"\(E = mc^2\)"));
    assert!(html.contains("katex.min.js"));
    assert!(html.contains("<table>"));
    assert!(html.contains("@bottom-left { content: \"notes.md\""));
    assert!(html.contains("counter(pages)"));
    // Front-matter never leaks into the body.
    assert!(!html.contains("displayHeaderFooter"));
}

#[test]
fn user_print_block_disables_default_footer() {
    let doc = "---\nchrome:\n  format: A4\n---\nhello\n";
    let prepared = inject_page_numbering(doc, "x.md").unwrap();
    assert_eq!(prepared, doc);
    let (data, body) = parse_front_matter(&prepared).unwrap();
    let settings = PrintSettings::from_front_matter(&data).unwrap();
    let html = render_html("x", body, &settings, &PdfConfig::default());
    assert!(html.contains("size: A4;"));
    assert!(!html.contains("@bottom-left"));
}

#[test]
fn default_output_next_to_input() {
    let p = default_pdf_path(std::path::Path::new("docs/guide.md"));
    assert_eq!(p, std::path::PathBuf::from("docs/guide.pdf"));
}

// ── Browser tests ────────────────────────────────────────────────────────────

#[tokio::test]
async fn prints_pdf_and_cleans_up() {
    let browser = e2e_skip_unless_browser!();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.md");
    std::fs::write(&input, NOTES).unwrap();

    let config = PdfConfig::builder()
        .browser_path(browser)
        .virtual_time_budget_ms(3_000)
        .build()
        .unwrap();
    let out = convert_pdf(&input, None, &config).await.unwrap();

    assert!(out.page_numbering_injected);
    assert_eq!(out.output_path.file_name().unwrap(), "notes.pdf");
    let bytes = std::fs::read(&out.output_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(bytes.len() as u64, out.bytes_written);

    // Only the input and the PDF remain; the temp page is gone.
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["notes.md", "notes.pdf"]);
}

#[tokio::test]
async fn explicit_output_path() {
    let browser = e2e_skip_unless_browser!();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.md");
    std::fs::write(&input, "# A\n\nplain text\n").unwrap();
    let output = dir.path().join("pdfs/custom.pdf");

    let config = PdfConfig::builder()
        .browser_path(browser)
        .mermaid(false)
        .math(false)
        .build()
        .unwrap();
    let out = convert_pdf(&input, Some(&output), &config).await.unwrap();
    assert_eq!(out.output_path, output);
    assert!(output.is_file());
}
