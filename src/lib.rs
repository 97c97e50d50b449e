//! # mdexport
//!
//! Turn markdown into things people present and print: themed `.pptx` decks
//! from Deep Research reports, and paginated PDFs from any markdown file.
//!
//! ## Why this crate?
//!
//! Research reports follow a fixed outline (summary, findings, analysis,
//! consensus, debate, sources, gaps). That outline maps one-to-one onto a
//! slide skeleton, so a deck can be laid out without a template engine or an
//! office suite: this crate writes the PresentationML package directly. For
//! PDFs it renders HTML and lets a headless Chromium-family browser handle
//! pagination, diagrams and math.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Deck
//!  ├─ 1. Theme    theme-factory markdown → 7-role palette + fonts
//!  ├─ 2. Parse    literal `## ` sections → ParsedDocument + Diagnostics
//!  ├─ 3. Layout   fixed-capacity slides, per-page illustrations
//!  └─ 4. Package  PresentationML zip, written atomically
//!
//! Illustrations (optional, feeds Deck step 3)
//!  ├─ 1. Plan      one prompt per analysis slide → JSON
//!  └─ 2. Generate  image gateway → slide-NN.png
//!
//! PDF
//!  ├─ 1. Front-matter  inject page numbering unless configured
//!  ├─ 2. HTML          pulldown-cmark + mermaid/KaTeX/highlight.js
//!  └─ 3. Print         headless browser, temp files cleaned on drop
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdexport::{convert_deck, DeckConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DeckConfig::builder()
//!         .theme_path("themes/golden-hour.md")
//!         .build()?;
//!     let deck = convert_deck("report.md", "report.pptx", &config).await?;
//!     for warning in deck.diagnostics.warnings() {
//!         eprintln!("warning: {warning}");
//!     }
//!     eprintln!("{} slides", deck.slide_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pptx`, `md2pptx-images` and `md2pdf` binaries (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! mdexport = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod imagepack;
pub mod output;
pub mod palette;
pub mod pdf;
pub mod pipeline;
pub mod pptx;
pub mod theme;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    DeckConfig, DeckConfigBuilder, ImageGenConfig, ImageGenConfigBuilder, PdfConfig,
    PdfConfigBuilder,
};
pub use convert::{
    build_deck, convert_deck, convert_deck_sync, convert_pdf, default_pdf_path, resolve_input,
};
pub use error::ExportError;
pub use output::{
    DeckOutput, Diagnostics, ImagePackOutput, PdfOutput, SectionReport, Truncation,
};
pub use palette::{derive_palette, FontPair, Palette};
pub use pipeline::document::{parse_document, ParsedDocument};
pub use theme::{load_theme, parse_theme, ThemeDescriptor};
