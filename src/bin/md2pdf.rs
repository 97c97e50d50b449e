//! CLI binary for the markdown PDF printer.
//!
//! A thin shim over the library crate that maps CLI flags to `PdfConfig`,
//! checks for a browser up front and shows a spinner while it prints.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mdexport::{convert_pdf, resolve_input, PdfConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Creates notes.pdf next to notes.md
  md2pdf notes.md

  # Custom output name, open when done
  md2pdf notes.md out/notes.pdf --open

  # Plain rendering, no CDN scripts
  md2pdf notes.md --no-mermaid --no-math --no-highlight

PAGE NUMBERS:
  Unless the front-matter has a `chrome:` or `puppeteer:` block, every page
  gets a footer with the file name (left) and "page / pages" (right). A
  front-matter block such as

    ---
    chrome:
      format: A4
      landscape: true
      margin: { top: 2cm, bottom: 2cm, left: 1.5cm, right: 1.5cm }
    ---

  replaces the defaults.

ENVIRONMENT VARIABLES:
  CHROME_PATH                 Browser executable (Chrome, Chromium, Edge)
  PUPPETEER_EXECUTABLE_PATH   Same, checked after CHROME_PATH
  RUST_LOG                    Log filter, overrides -v/-q
"#;

/// Convert markdown to PDF with diagrams, math and page numbers.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Convert markdown to PDF with diagrams, math and page numbers",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to print.
    input: PathBuf,

    /// Output PDF (default: input with .pdf extension).
    output: Option<PathBuf>,

    /// Output PDF; same as the second positional argument.
    #[arg(short = 'o', value_name = "PATH", conflicts_with = "output")]
    output_flag: Option<PathBuf>,

    /// Open the PDF when done.
    #[arg(short = 'O', long)]
    open: bool,

    /// Leave ```mermaid fences as code.
    #[arg(long)]
    no_mermaid: bool,

    /// Do not render $…$ math.
    #[arg(long)]
    no_math: bool,

    /// Do not syntax-highlight code.
    #[arg(long)]
    no_highlight: bool,

    /// Milliseconds of virtual time granted to page scripts.
    #[arg(long, env = "MD2PDF_BUDGET_MS", default_value_t = 10_000)]
    budget_ms: u64,

    /// Disable the spinner.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit 1 here, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", red("Error:"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner is the feedback when it is shown; keep INFO logs out of it.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Input check ──────────────────────────────────────────────────────
    let input = resolve_input(&cli.input).await?;

    // ── Browser check ────────────────────────────────────────────────────
    // Before any work, so a missing browser fails fast with the remedy.
    let browser = chrome_locate::locate_browser()?;

    let config = PdfConfig::builder()
        .browser_path(browser)
        .open_after(cli.open)
        .mermaid(!cli.no_mermaid)
        .math(!cli.no_math)
        .highlight(!cli.no_highlight)
        .virtual_time_budget_ms(cli.budget_ms)
        .build()
        .context("Invalid options")?;

    let output = cli.output_flag.as_deref().or(cli.output.as_deref());

    // ── Run conversion ───────────────────────────────────────────────────
    let spinner = show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Printing");
        bar.set_message(cli.input.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let result = convert_pdf(&input, output, &config).await;
    if let Some(bar) = &spinner {
        bar.finish_and_clear();
    }
    let pdf = result.with_context(|| format!("Failed to print {}", cli.input.display()))?;

    println!("Created: {}", pdf.output_path.display());
    if !cli.quiet {
        eprintln!(
            "{}  {}",
            green("✔"),
            dim(&format!(
                "{} bytes in {}ms",
                pdf.bytes_written, pdf.duration_ms
            )),
        );
    }
    Ok(())
}
