//! Exit-code and output contract of the binaries.
//!
//! Each test runs a built binary as a subprocess. None of them needs a
//! browser or network access.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// ── Test helpers ─────────────────────────────────────────────────────────────

const REPORT: &str = "\
# Tea Trade（Deep Research）
生成日期：2025-04-02

## Executive Summary
Premium tea keeps growing.

## Key Findings
- **Matcha**: demand doubled.

## Detailed Analysis
### Supply
Droughts cut yields.
- Kenya output down

### Prices
Auction prices rose.

## Areas of Consensus
- Climate risk

## Areas of Debate
- Tariffs

## Sources
[1] Tea Board Report. https://example.org/tea

## Gaps and Further Research
- Retail margins
";

fn md2pptx() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_md2pptx"));
    cmd.env_remove("MD2PPTX_THEME").env("RUST_LOG", "error");
    cmd
}

fn md2pdf() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_md2pdf"));
    cmd.env("RUST_LOG", "error");
    cmd
}

fn md2pptx_images() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_md2pptx-images"));
    cmd.env_remove("GEMINI_BASE_URL")
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env("RUST_LOG", "error");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("binary should spawn")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn write_report(dir: &Path) -> PathBuf {
    let path = dir.join("report.md");
    std::fs::write(&path, REPORT).unwrap();
    path
}

// ── md2pptx ──────────────────────────────────────────────────────────────────

#[test]
fn md2pptx_missing_required_flags_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(md2pptx().arg("--out").arg(dir.path().join("x.pptx")));
    assert_eq!(out.status.code(), Some(2), "{}", stderr(&out));
    assert!(stderr(&out).contains("--in"), "{}", stderr(&out));

    let out = run(md2pptx().arg("--in").arg(dir.path().join("x.md")));
    assert_eq!(out.status.code(), Some(2), "{}", stderr(&out));
}

#[test]
fn md2pptx_missing_input_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");
    let out = run(md2pptx()
        .env("MD2PPTX_THEMES_DIR", dir.path())
        .arg("--in")
        .arg(dir.path().join("nope.md"))
        .arg("--out")
        .arg(&output));
    assert_eq!(out.status.code(), Some(1), "{}", stderr(&out));
    assert!(stderr(&out).contains("not found"), "{}", stderr(&out));
    assert!(!output.exists());
}

#[test]
fn md2pptx_writes_deck_and_prints_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path());
    let output = dir.path().join("out/deck.pptx");
    let out = run(md2pptx()
        .env("MD2PPTX_THEMES_DIR", dir.path())
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .arg("--quiet"));
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert_eq!(stdout(&out).trim(), output.display().to_string());
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn md2pptx_dump_json_reports_parse() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path());
    let output = dir.path().join("deck.pptx");
    let out = run(md2pptx()
        .env("MD2PPTX_THEMES_DIR", dir.path())
        .args(["--lang", "en-US", "--dump-json", "-q", "--in"])
        .arg(&input)
        .arg("--out")
        .arg(&output));
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["slideCount"], 10);
    assert_eq!(json["document"]["analyses"][1]["title"], "Prices");
    assert_eq!(json["palette"]["themeName"], "Fallback");
}

// ── md2pdf ───────────────────────────────────────────────────────────────────

#[test]
fn md2pdf_without_arguments_exits_1() {
    let out = run(&mut md2pdf());
    assert_eq!(out.status.code(), Some(1), "{}", stderr(&out));
}

#[test]
fn md2pdf_missing_input_exits_1_before_browser_lookup() {
    let dir = tempfile::tempdir().unwrap();
    // An unusable browser override must not mask the input error.
    let out = run(md2pdf()
        .env("CHROME_PATH", dir.path().join("no-browser"))
        .env("PATH", "")
        .arg(dir.path().join("missing.md"))
        .arg("--no-progress"));
    assert_eq!(out.status.code(), Some(1), "{}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("Input file not found"), "{err}");
    assert!(!err.contains("Chrome/Chromium not found"), "{err}");
}

#[test]
fn md2pdf_help_exits_0() {
    let out = run(md2pdf().arg("--help"));
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("PAGE NUMBERS"));
}

// ── md2pptx-images ───────────────────────────────────────────────────────────

#[test]
fn make_plan_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path());
    let plan = dir.path().join("images.json");
    let out = run(md2pptx_images()
        .args(["make-plan", "--theme", "ocean-depths", "--in"])
        .arg(&input)
        .arg("--out")
        .arg(&plan));
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert!(stdout(&out).contains("Wrote plan:"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&plan).unwrap()).unwrap();
    assert_eq!(json["theme"], "ocean-depths");
    assert_eq!(json["images"][0]["name"], "slide-05");
    assert_eq!(json["images"][1]["slide_number"], 6);
}

#[test]
fn generate_without_credentials_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("images.json");
    std::fs::write(&plan, r#"{"images":[{"prompt":"x"}]}"#).unwrap();
    let out = run(md2pptx_images()
        .arg("generate")
        .arg("--plan")
        .arg(&plan)
        .arg("--out-dir")
        .arg(dir.path().join("images")));
    assert_eq!(out.status.code(), Some(1), "{}", stderr(&out));
    assert!(stderr(&out).contains("GEMINI_BASE_URL"), "{}", stderr(&out));
}

#[test]
fn unknown_subcommand_exits_2() {
    let out = run(md2pptx_images().arg("paint"));
    assert_eq!(out.status.code(), Some(2));
}
