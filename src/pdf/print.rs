//! Headless-browser printing.
//!
//! The HTML page is written next to the source markdown so that relative
//! image paths resolve. The browser prints into a private temporary
//! directory, and the PDF is then moved to its destination. Both temporary
//! locations are removed on drop, on success and on failure alike.
//!
//! ## Why a child process?
//!
//! `--headless --print-to-pdf` is the one interface every Chrome, Chromium
//! and Edge build shares. It needs no DevTools protocol client and no
//! version pinning.

use crate::error::ExportError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};
use url::Url;

/// Lines of browser stderr kept in [`ExportError::BrowserFailed`].
const STDERR_TAIL_LINES: usize = 20;

/// A print request: one HTML file, one browser.
#[derive(Debug, Clone)]
pub struct PrintJob<'a> {
    pub browser: &'a Path,
    pub html_path: &'a Path,
    pub virtual_time_budget_ms: u64,
}

/// Write `html` to a hidden temp file `.~<name>*.html` in `dir`.
///
/// The file is deleted when the returned handle drops.
pub async fn write_temp_html(
    dir: &Path,
    name: &str,
    html: &str,
) -> Result<tempfile::NamedTempFile, ExportError> {
    let tmp = tempfile::Builder::new()
        .prefix(&format!(".~{name}"))
        .suffix(".html")
        .tempfile_in(dir)
        .map_err(|source| ExportError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    tokio::fs::write(tmp.path(), html)
        .await
        .map_err(|source| ExportError::OutputWriteFailed {
            path: tmp.path().to_path_buf(),
            source,
        })?;
    debug!("Wrote print page {}", tmp.path().display());
    Ok(tmp)
}

/// Command-line arguments for one print run.
pub fn browser_args(
    job: &PrintJob<'_>,
    pdf_path: &Path,
    profile_dir: &Path,
) -> Result<Vec<String>, ExportError> {
    Ok(vec![
        "--headless".to_string(),
        "--disable-gpu".to_string(),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--no-pdf-header-footer".to_string(),
        format!("--user-data-dir={}", profile_dir.display()),
        format!("--virtual-time-budget={}", job.virtual_time_budget_ms),
        format!("--print-to-pdf={}", pdf_path.display()),
        file_url(job.html_path)?,
    ])
}

/// Print `job` and move the PDF to `dest`. Returns the PDF size in bytes.
///
/// Awaits the browser with no timeout; the virtual time budget bounds how
/// long page scripts may run.
pub async fn print_to_pdf(job: &PrintJob<'_>, dest: &Path) -> Result<u64, ExportError> {
    let scratch = tempfile::tempdir().map_err(|e| {
        ExportError::Internal(format!("Failed to create temporary directory: {e}"))
    })?;
    let pdf_path = scratch.path().join("out.pdf");
    let profile_dir = scratch.path().join("profile");

    let args = browser_args(job, &pdf_path, &profile_dir)?;
    info!("Printing with {}", job.browser.display());
    debug!("Browser args: {:?}", args);

    let output = Command::new(job.browser)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ExportError::BrowserLaunchFailed {
            path: job.browser.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        return Err(ExportError::BrowserFailed {
            status: output.status.to_string(),
            stderr: stderr_tail(&output.stderr),
        });
    }
    if !pdf_path.is_file() {
        return Err(ExportError::BrowserNoOutput { path: pdf_path });
    }

    move_file(&pdf_path, dest).await
}

/// Move `from` to `to`, creating parent directories. Falls back to copying
/// through a sibling temp file when the rename crosses filesystems, so `to`
/// is never partially written.
pub async fn move_file(from: &Path, to: &Path) -> Result<u64, ExportError> {
    let write_err = |source| ExportError::OutputWriteFailed {
        path: to.to_path_buf(),
        source,
    };

    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    if tokio::fs::rename(from, to).await.is_err() {
        let staging = staging_path(to);
        tokio::fs::copy(from, &staging).await.map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&staging, to).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(write_err(e));
        }
    }

    let len = tokio::fs::metadata(to).await.map_err(write_err)?.len();
    Ok(len)
}

/// Launch the platform viewer on `path` without waiting for it.
pub fn open_file(path: &Path) {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/c", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else {
        std::process::Command::new("xdg-open")
    };
    cmd.arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Err(e) = cmd.spawn() {
        warn!("Could not open {}: {e}", path.display());
    }
}

fn staging_path(to: &Path) -> PathBuf {
    let mut name = to.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    to.with_file_name(name)
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n")
}

/// `file://` URL for an absolute path.
///
/// Windows verbatim paths (`\\?\C:\...`, as returned by `canonicalize`)
/// come out as plain drive URLs.
pub fn file_url(path: &Path) -> Result<String, ExportError> {
    Url::from_file_path(path).map(String::from).map_err(|()| {
        ExportError::Internal(format!(
            "Cannot express '{}' as a file URL: path is not absolute",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn file_url_encodes_spaces_and_unicode() {
        assert_eq!(
            file_url(Path::new("/tmp/my notes/报告.html")).unwrap(),
            "file:///tmp/my%20notes/%E6%8A%A5%E5%91%8A.html"
        );
    }

    #[cfg(windows)]
    #[test]
    fn file_url_handles_drive_and_verbatim_paths() {
        assert_eq!(
            file_url(Path::new(r"C:\Users\a\x.html")).unwrap(),
            "file:///C:/Users/a/x.html"
        );
        assert_eq!(
            file_url(Path::new(r"\\?\C:\Users\a\x.html")).unwrap(),
            "file:///C:/Users/a/x.html"
        );
    }

    #[test]
    fn file_url_rejects_relative_paths() {
        let err = file_url(Path::new("notes/x.html")).unwrap_err();
        assert!(matches!(err, ExportError::Internal(_)), "{err:?}");
    }

    #[tokio::test]
    async fn file_url_of_canonical_temp_path_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("my page.html");
        std::fs::write(&html, "<p>x</p>").unwrap();
        let canonical = tokio::fs::canonicalize(&html).await.unwrap();
        let url = Url::parse(&file_url(&canonical).unwrap()).unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.to_file_path().unwrap(), canonical);
    }

    #[cfg(unix)]
    #[test]
    fn args_carry_budget_and_output() {
        let job = PrintJob {
            browser: Path::new("/usr/bin/chromium"),
            html_path: Path::new("/docs/.~a.md1234.html"),
            virtual_time_budget_ms: 2500,
        };
        let args =
            browser_args(&job, Path::new("/tmp/x/out.pdf"), Path::new("/tmp/x/profile")).unwrap();
        assert_eq!(args[0], "--headless");
        assert!(args.contains(&"--no-pdf-header-footer".to_string()));
        assert!(args.contains(&"--virtual-time-budget=2500".to_string()));
        assert!(args.contains(&"--print-to-pdf=/tmp/x/out.pdf".to_string()));
        assert_eq!(args.last().unwrap(), "file:///docs/.~a.md1234.html");
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let text: String = (0..30).map(|i| format!("line {i}\n")).collect();
        let tail = stderr_tail(text.as_bytes());
        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 29"));
    }

    #[tokio::test]
    async fn temp_html_is_hidden_and_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = write_temp_html(dir.path(), "doc.md", "<p>x</p>").await.unwrap();
        let name = tmp.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".~doc.md") && name.ends_with(".html"), "{name}");
        assert_eq!(std::fs::read_to_string(tmp.path()).unwrap(), "<p>x</p>");
        let path = tmp.path().to_path_buf();
        drop(tmp);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn move_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.pdf");
        std::fs::write(&from, b"%PDF-1.7").unwrap();
        let to = dir.path().join("nested/out/b.pdf");
        assert_eq!(move_file(&from, &to).await.unwrap(), 8);
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn missing_browser_is_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("p.html");
        std::fs::write(&html, "<p>x</p>").unwrap();
        let job = PrintJob {
            browser: Path::new("/definitely/not/a/browser"),
            html_path: &html,
            virtual_time_budget_ms: 1000,
        };
        let err = print_to_pdf(&job, &dir.path().join("o.pdf")).await.unwrap_err();
        assert!(matches!(err, ExportError::BrowserLaunchFailed { .. }));
    }
}
