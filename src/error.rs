//! Error types for the mdexport library.
//!
//! Two distinct failure modes exist:
//!
//! * [`ExportError`] — **Fatal**: the conversion cannot proceed at all
//!   (input missing, theme unreadable, browser not installed, output not
//!   writable). Returned as `Err(ExportError)` from the `convert*` functions.
//!
//! * Content mismatches — **Non-fatal**: a heading is absent, a source line
//!   does not match the citation pattern, a list is longer than a slide can
//!   hold. These never become errors; they are recorded in
//!   [`crate::output::Diagnostics`] and the output degrades to placeholders.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mdexport library.
#[derive(Debug, Error)]
pub enum ExportError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input file exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Theme errors ──────────────────────────────────────────────────────
    /// The theme file exists but reading it failed.
    ///
    /// A *missing* theme file is not an error; the fallback palette is used.
    #[error("Failed to read theme file '{path}': {source}")]
    ThemeReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Deck errors ───────────────────────────────────────────────────────
    /// Writing the PresentationML package failed.
    #[error("Failed to assemble presentation package: {0}")]
    Package(String),

    /// A slide illustration could not be read or decoded.
    #[error("Failed to read image '{path}': {detail}")]
    ImageReadFailed { path: PathBuf, detail: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// No Chromium-family browser could be found.
    #[error("{0}")]
    BrowserNotFound(#[from] chrome_locate::LocateError),

    /// The browser process could not be started.
    #[error("Failed to launch browser '{path}': {source}")]
    BrowserLaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser exited with a non-zero status.
    #[error("Browser exited with {status} while printing PDF\n{stderr}")]
    BrowserFailed { status: String, stderr: String },

    /// The browser exited cleanly but produced no PDF.
    #[error("Browser finished but no PDF was written to '{path}'")]
    BrowserNoOutput { path: PathBuf },

    /// The markdown front-matter is not valid YAML.
    #[error("Invalid front-matter: {0}")]
    FrontMatter(String),

    // ── Illustration errors ───────────────────────────────────────────────
    /// The image plan is malformed or has nothing to generate.
    #[error("Invalid image plan: {0}")]
    PlanInvalid(String),

    /// An image API request failed or answered in an unknown shape.
    #[error("Image API request to '{url}' failed: {reason}")]
    ImageApiFailed { url: String, reason: String },

    /// An image task did not finish in time.
    #[error("Image task '{task}' did not finish within {secs}s\nIncrease --timeout.")]
    ImageTaskTimeout { task: String, secs: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Package(e.to_string())
    }
}

impl From<std::fmt::Error> for ExportError {
    fn from(e: std::fmt::Error) -> Self {
        ExportError::Package(format!("XML formatting failed: {e}"))
    }
}

impl ExportError {
    /// Map an I/O error from opening `path` onto the matching input variant.
    pub(crate) fn from_input_io(path: PathBuf, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => ExportError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => ExportError::PermissionDenied { path },
            _ => ExportError::InputReadFailed { path, source: e },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = ExportError::FileNotFound {
            path: PathBuf::from("/tmp/report.md"),
        };
        assert!(e.to_string().contains("/tmp/report.md"));
    }

    #[test]
    fn browser_failed_display() {
        let e = ExportError::BrowserFailed {
            status: "exit status: 21".into(),
            stderr: "crashpad".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("exit status: 21"), "got: {msg}");
        assert!(msg.contains("crashpad"), "got: {msg}");
    }

    #[test]
    fn browser_not_found_keeps_remediation() {
        let e: ExportError = chrome_locate::LocateError::NotFound { checked: 3 }.into();
        assert!(e.to_string().contains("CHROME_PATH"));
    }

    #[test]
    fn io_kind_mapping() {
        let p = PathBuf::from("x.md");
        let nf = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            ExportError::from_input_io(p.clone(), nf),
            ExportError::FileNotFound { .. }
        ));
        let pd = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            ExportError::from_input_io(p.clone(), pd),
            ExportError::PermissionDenied { .. }
        ));
        let other = std::io::Error::new(std::io::ErrorKind::InvalidData, "utf8");
        assert!(matches!(
            ExportError::from_input_io(p, other),
            ExportError::InputReadFailed { .. }
        ));
    }

    #[test]
    fn image_task_timeout_has_hint() {
        let e = ExportError::ImageTaskTimeout {
            task: "t-1".into(),
            secs: 180,
        };
        let msg = e.to_string();
        assert!(msg.contains("t-1") && msg.contains("180s"), "got: {msg}");
        assert!(msg.contains("--timeout"), "got: {msg}");
    }
}
