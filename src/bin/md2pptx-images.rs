//! CLI binary for slide illustration packs.
//!
//! `make-plan` writes one image prompt per analysis slide of a report;
//! `generate` turns a plan into `slide-NN.png` files for `md2pptx --images-dir`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdexport::imagepack::{generate_images, read_plan, write_plan, DEFAULT_START_SLIDE};
use mdexport::ImageGenConfig;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # 1. Plan prompts for the analysis slides (offline)
  md2pptx-images make-plan --in report.md --theme ocean-depths --out images.json

  # 2. Review or edit images.json, then generate
  md2pptx-images generate --plan images.json --out-dir images/

  # 3. Build the deck with the illustrations
  md2pptx --in report.md --out report.pptx --theme ocean-depths --images-dir images/

GATEWAY:
  POST <base-url>/v1/images/generations with {model, prompt, n, size, resolution}.
  Task replies are polled at <base-url>/v1/tasks/<id>; URL and b64_json
  replies are saved directly. Existing files are kept unless --overwrite.

ENVIRONMENT VARIABLES:
  GEMINI_BASE_URL   Gateway root (same as --base-url)
  GEMINI_API_KEY    API key (same as --key)
  GEMINI_MODEL      Model (same as --model)
  RUST_LOG          Log filter, overrides -v/-q
"#;

/// Plan and generate slide illustrations for md2pptx.
#[derive(Parser, Debug)]
#[command(
    name = "md2pptx-images",
    version,
    about = "Plan and generate slide illustrations for md2pptx",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "MD2PPTX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "MD2PPTX_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an image plan (JSON) from a Deep Research report.
    #[command(name = "make-plan", alias = "plan")]
    MakePlan {
        /// Input markdown report.
        #[arg(long = "in", value_name = "PATH")]
        input: PathBuf,

        /// Output plan JSON.
        #[arg(long = "out", value_name = "PATH")]
        output: PathBuf,

        /// theme-factory theme slug, used for the style hint.
        #[arg(long, env = "MD2PPTX_THEME", default_value = "golden-hour")]
        theme: String,

        /// Page number of the first analysis slide.
        #[arg(long, default_value_t = DEFAULT_START_SLIDE)]
        analysis_start_slide: usize,
    },

    /// Generate the images of a plan.
    Generate {
        /// Plan JSON written by make-plan.
        #[arg(long, value_name = "PATH")]
        plan: PathBuf,

        /// Output directory.
        #[arg(long, value_name = "DIR", default_value = "images")]
        out_dir: PathBuf,

        /// Gateway root URL.
        #[arg(long, env = "GEMINI_BASE_URL", hide_env_values = true)]
        base_url: Option<String>,

        /// API key.
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Image model.
        #[arg(long, env = "GEMINI_MODEL", default_value = mdexport::config::DEFAULT_IMAGE_MODEL)]
        model: String,

        /// Seconds between task status polls.
        #[arg(long, default_value_t = 1.5)]
        poll_interval: f64,

        /// Seconds before a task is abandoned.
        #[arg(long, default_value_t = 180)]
        timeout: u64,

        /// Regenerate images that already exist.
        #[arg(long)]
        overwrite: bool,
    },
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

    match cli.command {
        Command::MakePlan {
            input,
            output,
            theme,
            analysis_start_slide,
        } => {
            let plan = write_plan(&input, &output, &theme, analysis_start_slide)
                .await
                .with_context(|| format!("Failed to plan {}", input.display()))?;
            println!("Wrote plan: {}", output.display());
            if !cli.quiet {
                eprintln!(
                    "{}  {}",
                    green("✔"),
                    dim(&format!("{} image(s)", plan.images.len()))
                );
            }
        }
        Command::Generate {
            plan,
            out_dir,
            base_url,
            key,
            model,
            poll_interval,
            timeout,
            overwrite,
        } => {
            let config = ImageGenConfig::builder()
                .base_url(base_url.unwrap_or_default())
                .api_key(key.unwrap_or_default())
                .model(model)
                .poll_interval_ms((poll_interval.max(0.0) * 1000.0).round() as u64)
                .task_timeout_secs(timeout)
                .overwrite(overwrite)
                .build()
                .context("Invalid options")?;
            let image_plan = read_plan(&plan).await?;
            let out = generate_images(&image_plan, &out_dir, &config)
                .await
                .context("Image generation failed")?;
            for path in &out.written {
                println!("{}", path.display());
            }
            if !cli.quiet {
                eprintln!(
                    "{}  {}",
                    green("✔"),
                    dim(&format!(
                        "{} written, {} skipped",
                        out.written.len(),
                        out.skipped.len()
                    ))
                );
            }
        }
    }

    Ok(())
}
