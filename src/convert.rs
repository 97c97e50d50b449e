//! Conversion entry points.
//!
//! ## Why a pure `build_deck`?
//!
//! Everything between "markdown string" and "pptx bytes" is deterministic and
//! needs no runtime. [`build_deck`] exposes that core directly so callers can
//! inspect the parsed document and diagnostics without touching disk, and the
//! file-level [`convert_deck`] is a thin async shell around it: read, build,
//! write atomically.

use crate::config::{DeckConfig, PdfConfig};
use crate::error::ExportError;
use crate::output::{DeckOutput, PdfOutput};
use crate::palette::{derive_palette, FontPair};
use crate::pdf::frontmatter::{inject_page_numbering, parse_front_matter, PrintSettings};
use crate::pdf::html::render_html;
use crate::pdf::print::{self, PrintJob};
use crate::pipeline::document::parse_document;
use crate::pipeline::layout::{render_deck, LayoutOptions};
use crate::theme::load_theme;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

// ── Deck ─────────────────────────────────────────────────────────────────

/// Turn a Deep Research markdown report into a `.pptx` package in memory.
///
/// Never fails on content: missing sections become placeholders and are
/// reported in [`DeckOutput::diagnostics`]. Fails only when the theme file
/// exists but cannot be read, or packaging fails.
pub fn build_deck(markdown: &str, config: &DeckConfig) -> Result<DeckOutput, ExportError> {
    let theme = match &config.theme_path {
        Some(path) => {
            let theme = load_theme(path)?;
            if theme.is_none() {
                warn!(
                    "Theme file {} not found; using the built-in palette",
                    path.display()
                );
            }
            theme
        }
        None => None,
    };
    let palette = derive_palette(theme.as_ref());
    let fonts = FontPair::select(theme.as_ref().map(|t| &t.fonts), config.use_theme_fonts);
    debug!(
        "Palette '{}', fonts {} / {}",
        palette.theme_name, fonts.header, fonts.body
    );

    let (document, mut diagnostics) = parse_document(markdown);
    let layout = render_deck(
        &document,
        &palette,
        &fonts,
        &LayoutOptions {
            theme_label: &config.theme_label,
            theme_name: theme.as_ref().map(|t| t.name.as_str()),
            images_dir: config.images_dir.as_deref(),
            language: &config.language,
            author: &config.author,
        },
    );
    diagnostics.truncations = layout.truncations;

    for warning in diagnostics.warnings() {
        warn!("{warning}");
    }

    let slide_count = layout.presentation.slide_count();
    let bytes = layout.presentation.to_bytes()?;
    info!("Built deck: {} slides, {} bytes", slide_count, bytes.len());

    Ok(DeckOutput {
        bytes,
        document,
        palette,
        fonts,
        diagnostics,
        slide_count,
    })
}

/// Read `input`, build the deck and write it to `output`.
///
/// The output is written atomically (temp file + rename), so a failed run
/// never leaves a truncated `.pptx` behind.
pub async fn convert_deck(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &DeckConfig,
) -> Result<DeckOutput, ExportError> {
    let input = input.as_ref();
    let output = output.as_ref();
    let start = Instant::now();
    info!("Converting {} → {}", input.display(), output.display());

    let markdown = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| ExportError::from_input_io(input.to_path_buf(), e))?;

    // Image decoding and zip compression are CPU-bound.
    let config_owned = config.clone();
    let deck = tokio::task::spawn_blocking(move || build_deck(&markdown, &config_owned))
        .await
        .map_err(|e| ExportError::Internal(format!("Deck task panicked: {e}")))??;

    write_atomic(output, &deck.bytes).await?;
    info!(
        "Wrote {} ({} slides) in {}ms",
        output.display(),
        deck.slide_count,
        start.elapsed().as_millis()
    );
    Ok(deck)
}

/// Synchronous wrapper around [`convert_deck`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_deck_sync(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &DeckConfig,
) -> Result<DeckOutput, ExportError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExportError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_deck(input, output, config))
}

pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let write_err = |source| ExportError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, bytes).await.map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }
    Ok(())
}

// ── PDF ──────────────────────────────────────────────────────────────────

/// `report.md` → `report.pdf`, next to the input.
pub fn default_pdf_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Canonicalise `input` and check that it is a readable file.
///
/// Callers run this before any expensive setup so a mistyped path is
/// reported as such.
pub async fn resolve_input(input: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let input = input.as_ref();
    let path = tokio::fs::canonicalize(input)
        .await
        .map_err(|e| ExportError::from_input_io(input.to_path_buf(), e))?;
    let meta = tokio::fs::metadata(&path)
        .await
        .map_err(|e| ExportError::from_input_io(path.clone(), e))?;
    if !meta.is_file() {
        return Err(ExportError::FileNotFound { path });
    }
    Ok(path)
}

/// Print the markdown file `input` to PDF.
///
/// `output` defaults to [`default_pdf_path`]. The browser comes from
/// `config.browser_path` if set, otherwise from `chrome-locate`.
pub async fn convert_pdf(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &PdfConfig,
) -> Result<PdfOutput, ExportError> {
    let start = Instant::now();
    let input = resolve_input(input).await?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_pdf_path(&input));

    let browser = match &config.browser_path {
        Some(path) => chrome_locate::check_explicit("browser_path", path)?,
        None => chrome_locate::locate_browser()?,
    };
    debug!("Using browser {}", browser.display());

    let content = tokio::fs::read_to_string(&input)
        .await
        .map_err(|e| ExportError::from_input_io(input.clone(), e))?;
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let prepared = inject_page_numbering(&content, &filename)?;
    let page_numbering_injected = prepared != content;
    let (front_matter, body) = parse_front_matter(&prepared)?;
    let settings = PrintSettings::from_front_matter(&front_matter)?;
    let title = front_matter
        .get("title")
        .and_then(|v| v.as_str())
        .unwrap_or(&filename)
        .to_string();
    let html = render_html(&title, body, &settings, config);

    let source_dir = input.parent().unwrap_or_else(|| Path::new("."));
    let html_file = print::write_temp_html(source_dir, &filename, &html).await?;
    let job = PrintJob {
        browser: &browser,
        html_path: html_file.path(),
        virtual_time_budget_ms: config.virtual_time_budget_ms,
    };
    let bytes_written = print::print_to_pdf(&job, &output).await?;
    drop(html_file);

    info!(
        "Created {} ({} bytes) in {}ms",
        output.display(),
        bytes_written,
        start.elapsed().as_millis()
    );
    if config.open_after {
        print::open_file(&output);
    }

    Ok(PdfOutput {
        output_path: output,
        bytes_written,
        page_numbering_injected,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pdf_path_swaps_extension() {
        assert_eq!(
            default_pdf_path(Path::new("/docs/report.md")),
            PathBuf::from("/docs/report.pdf")
        );
        assert_eq!(
            default_pdf_path(Path::new("/docs/notes")),
            PathBuf::from("/docs/notes.pdf")
        );
    }

    #[test]
    fn build_deck_with_missing_theme_uses_fallback() {
        let config = DeckConfig::builder()
            .theme_path("/nonexistent/theme.md")
            .build()
            .unwrap();
        let out = build_deck("# Title\n", &config).unwrap();
        assert_eq!(out.palette, crate::palette::Palette::fallback());
        assert_eq!(out.slide_count, 8);
        assert!(out.bytes.starts_with(b"PK"));
    }

    #[test]
    fn build_deck_uses_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let theme = dir.path().join("ocean.md");
        std::fs::write(
            &theme,
            "# Ocean Depths\n\n- **Deep Navy**: `#1A2332`\n- **Teal**: `#2D8B8B`\n\
             - **Seafoam**: `#A8DADC`\n- **Cream**: `#F1FAEE`\n\n\
             - **Headers**: DejaVu Sans Bold\n- **Body Text**: DejaVu Sans\n",
        )
        .unwrap();
        let config = DeckConfig::builder()
            .theme_path(&theme)
            .use_theme_fonts(true)
            .build()
            .unwrap();
        let out = build_deck("# T\n", &config).unwrap();
        assert_eq!(out.palette.theme_name, "Ocean Depths");
        assert_eq!(out.palette.accent1.to_string(), "2D8B8B");
        assert_eq!(out.fonts.header, "DejaVu Sans Bold");

        let mut zip = zip::ZipArchive::new(std::io::Cursor::new(&out.bytes)).unwrap();
        let mut summary = String::new();
        std::io::Read::read_to_string(
            &mut zip.by_name("ppt/slides/slide2.xml").unwrap(),
            &mut summary,
        )
        .unwrap();
        assert!(summary.contains("Ocean Depths"));
    }

    #[tokio::test]
    async fn convert_pdf_missing_input_is_file_not_found() {
        let err = convert_pdf("/no/such/file.md", None, &PdfConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::FileNotFound { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn resolve_input_rejects_missing_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(dir.path().join("typo.md")).await.unwrap_err();
        assert!(matches!(err, ExportError::FileNotFound { .. }), "{err:?}");
        let err = resolve_input(dir.path()).await.unwrap_err();
        assert!(matches!(err, ExportError::FileNotFound { .. }), "{err:?}");

        let md = dir.path().join("a.md");
        std::fs::write(&md, "# A\n").unwrap();
        assert!(resolve_input(&md).await.unwrap().is_absolute());
    }

    #[tokio::test]
    async fn convert_pdf_bad_browser_path() {
        let dir = tempfile::tempdir().unwrap();
        let md = dir.path().join("a.md");
        std::fs::write(&md, "# A\n").unwrap();
        let config = PdfConfig::builder()
            .browser_path("/no/such/chrome")
            .build()
            .unwrap();
        let err = convert_pdf(&md, None, &config).await.unwrap_err();
        assert!(matches!(err, ExportError::BrowserNotFound(_)), "{err:?}");
        // Nothing left behind in the source directory.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
