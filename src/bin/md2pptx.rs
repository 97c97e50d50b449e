//! CLI binary for the Deep Research deck builder.
//!
//! A thin shim over the library crate that maps CLI flags to `DeckConfig`,
//! resolves the per-user theme directory and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use mdexport::theme::default_theme_path;
use mdexport::{convert_deck, DeckConfig};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Default theme (golden-hour)
  md2pptx --in report.md --out report.pptx

  # Another theme-factory theme, with illustrations
  md2pptx --in report.md --out report.pptx --theme ocean-depths --images-dir images/

  # A theme file anywhere on disk, using its fonts
  md2pptx --in report.md --out report.pptx --theme-file ./my-theme.md --theme-fonts

  # Inspect what was parsed without opening PowerPoint
  md2pptx --in report.md --out report.pptx --dump-json > parsed.json

INPUT LAYOUT:
  # <Title>
  生成日期：<date>
  ## Executive Summary / ## Key Findings / ## Detailed Analysis (### per slide)
  ## Areas of Consensus / ## Areas of Debate / ## Sources / ## Gaps and Further Research

  Missing sections render placeholder text and are reported as warnings.

IMAGES:
  --images-dir is searched for slide-NN.png|jpg|jpeg|webp, where NN is the
  two-digit page number of an analysis slide (the first one is slide-05).

ENVIRONMENT VARIABLES:
  MD2PPTX_THEMES_DIR      Theme directory (default ~/.agents/skills/theme-factory/themes)
  RUST_LOG                Log filter, overrides -v/-q
"#;

/// Turn a Deep Research markdown report into a themed PowerPoint deck.
#[derive(Parser, Debug)]
#[command(
    name = "md2pptx",
    version,
    about = "Turn a Deep Research markdown report into a themed PowerPoint deck",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input markdown report.
    #[arg(long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Output .pptx path.
    #[arg(long = "out", value_name = "PATH")]
    output: PathBuf,

    /// theme-factory theme slug.
    #[arg(long, env = "MD2PPTX_THEME", default_value = "golden-hour")]
    theme: String,

    /// Theme markdown file; overrides --theme lookup.
    #[arg(long, value_name = "PATH")]
    theme_file: Option<PathBuf>,

    /// Directory holding the theme-factory themes.
    #[arg(long, env = "MD2PPTX_THEMES_DIR", value_name = "DIR")]
    themes_dir: Option<PathBuf>,

    /// Directory with slide-NN.{png,jpg,jpeg,webp} illustrations.
    #[arg(long, value_name = "DIR")]
    images_dir: Option<PathBuf>,

    /// Ignore --images-dir.
    #[arg(long)]
    no_images: bool,

    /// Use the theme's fonts instead of Segoe UI.
    #[arg(long)]
    theme_fonts: bool,

    /// Language tag for slide text.
    #[arg(long, env = "MD2PPTX_LANG", default_value = "zh-CN")]
    lang: String,

    /// Print the parsed document, palette and diagnostics as JSON on stdout.
    #[arg(long)]
    dump_json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PPTX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PPTX_QUIET")]
    quiet: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dump<'a> {
    output: &'a PathBuf,
    #[serde(flatten)]
    deck: &'a mdexport::DeckOutput,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let theme_path = match &cli.theme_file {
        Some(path) => path.clone(),
        None => match &cli.themes_dir {
            Some(dir) => dir.join(format!("{}.md", cli.theme)),
            None => {
                let home = dirs::home_dir().context("Cannot determine home directory")?;
                default_theme_path(&home, &cli.theme)
            }
        },
    };
    tracing::debug!("Theme file: {}", theme_path.display());

    let mut builder = DeckConfig::builder()
        .theme_path(&theme_path)
        .theme_label(&cli.theme)
        .use_theme_fonts(cli.theme_fonts)
        .language(&cli.lang);
    if let Some(dir) = cli.images_dir.as_ref().filter(|_| !cli.no_images) {
        builder = builder.images_dir(dir);
    }
    let config = builder.build().context("Invalid options")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let deck = convert_deck(&cli.input, &cli.output, &config)
        .await
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    if cli.dump_json {
        let dump = Dump {
            output: &cli.output,
            deck: &deck,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&dump).context("Failed to serialise output")?
        );
    } else {
        println!("{}", cli.output.display());
    }

    if !cli.quiet {
        let warnings = deck.diagnostics.warnings().len();
        eprintln!(
            "{}  {} slides  {}  →  {}",
            if warnings == 0 { green("✔") } else { yellow("⚠") },
            deck.slide_count,
            dim(&format!("{warnings} warning(s)")),
            bold(&cli.output.display().to_string()),
        );
    }

    Ok(())
}
