//! # chrome-locate
//!
//! Find a locally installed Chromium-family browser (Chrome, Chromium or
//! Edge) that can print HTML to PDF in headless mode.
//!
//! ## How it works
//!
//! [`locate_browser`] walks an ordered candidate list and returns the first
//! path that exists on disk:
//!
//! 1. `CHROME_PATH`, then `PUPPETEER_EXECUTABLE_PATH`.
//! 2. Well-known install locations for the current platform (system-wide
//!    and, on Windows, per-user under `%LOCALAPPDATA%`).
//! 3. Executables on `PATH` (`google-chrome`, `chromium`, `msedge`, …).
//!
//! The answer is cached for the lifetime of the process.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrome_locate::locate_browser;
//!
//! let chrome = locate_browser().expect("no browser installed");
//! println!("printing with {}", chrome.display());
//! ```
//!
//! ## Environment variable overrides
//!
//! - `CHROME_PATH` — path to the browser executable.
//! - `PUPPETEER_EXECUTABLE_PATH` — honoured for compatibility with
//!   Node-based tooling that already sets it.
//!
//! An override that names a missing file is skipped like any other
//! candidate.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variables consulted before any platform location.
pub const ENV_OVERRIDES: [&str; 2] = ["CHROME_PATH", "PUPPETEER_EXECUTABLE_PATH"];

/// Executable names looked up on `PATH` as a last resort.
pub const PATH_NAMES: [&str; 6] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "msedge",
];

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by chrome-locate operations.
#[derive(Error, Debug)]
pub enum LocateError {
    /// No candidate path exists on this machine.
    #[error(
        "Chrome/Chromium not found (checked {checked} locations).\n\
Install Chrome or Edge, or set CHROME_PATH to the browser executable path."
    )]
    NotFound { checked: usize },

    /// A path passed to [`check_explicit`] does not exist.
    ///
    /// Stale `CHROME_PATH`/`PUPPETEER_EXECUTABLE_PATH` values do not produce
    /// this; [`locate_browser`] moves on to the next candidate.
    #[error("{var} is set to '{path}' but no such file exists")]
    BadOverride { var: &'static str, path: PathBuf },
}

// ── Candidate list ───────────────────────────────────────────────────────────

/// Where a candidate path came from. Used for logging by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Env(&'static str),
    Platform,
    SearchPath,
}

/// A possible browser location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub source: CandidateSource,
}

fn platform_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = [
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files\Chromium\Application\chrome.exe",
        r"C:\Program Files (x86)\Chromium\Application\chrome.exe",
        r"C:\Program Files\Microsoft\Edge\Application\msedge.exe",
        r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    // Per-user installs on Windows live under %LOCALAPPDATA%.
    if cfg!(windows) {
        if let Some(local) = dirs::data_local_dir() {
            paths.push(local.join("Google").join("Chrome").join("Application").join("chrome.exe"));
            paths.push(local.join("Chromium").join("Application").join("chrome.exe"));
            paths.push(local.join("Microsoft").join("Edge").join("Application").join("msedge.exe"));
        }
    }

    paths
}

/// Build the ordered candidate list.
///
/// `env` resolves an environment variable; it is injected so the ordering
/// can be tested without touching the real process environment.
pub fn candidates_with(env: impl Fn(&str) -> Option<String>) -> Vec<Candidate> {
    let mut out = Vec::new();

    for var in ENV_OVERRIDES {
        if let Some(value) = env(var).filter(|v| !v.is_empty()) {
            out.push(Candidate {
                path: PathBuf::from(value),
                source: CandidateSource::Env(var),
            });
        }
    }

    out.extend(platform_paths().into_iter().map(|path| Candidate {
        path,
        source: CandidateSource::Platform,
    }));

    for name in PATH_NAMES {
        if let Ok(path) = which::which(name) {
            out.push(Candidate {
                path,
                source: CandidateSource::SearchPath,
            });
        }
    }

    out
}

/// Build the ordered candidate list from the real process environment.
pub fn candidates() -> Vec<Candidate> {
    candidates_with(|var| std::env::var(var).ok())
}

/// Return the first candidate that exists according to `exists`.
pub fn first_existing(
    candidates: &[Candidate],
    exists: impl Fn(&Path) -> bool,
) -> Result<PathBuf, LocateError> {
    candidates
        .iter()
        .find(|c| exists(&c.path))
        .map(|c| c.path.clone())
        .ok_or(LocateError::NotFound {
            checked: candidates.len(),
        })
}

// ── Thread-safe singleton path cache ─────────────────────────────────────────

static RESOLVED_PATH: OnceLock<PathBuf> = OnceLock::new();

// ── Public API ───────────────────────────────────────────────────────────────

/// Locate a browser executable, caching the answer for the process.
///
/// # Thread safety
///
/// Safe to call from multiple threads; concurrent first calls may both walk
/// the candidate list but agree on the result.
pub fn locate_browser() -> Result<PathBuf, LocateError> {
    if let Some(path) = RESOLVED_PATH.get() {
        return Ok(path.clone());
    }

    let path = first_existing(&candidates(), Path::exists)?;
    let _ = RESOLVED_PATH.set(path.clone());
    Ok(path)
}

/// Validate an explicitly configured browser path.
///
/// Used when a caller bypasses discovery (e.g. a `--browser` flag). The
/// variable name only shapes the error message.
pub fn check_explicit(var: &'static str, path: &Path) -> Result<PathBuf, LocateError> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(LocateError::BadOverride {
            var,
            path: path.to_path_buf(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_come_first_in_declared_order() {
        let list = candidates_with(|var| match var {
            "CHROME_PATH" => Some("/opt/chrome".into()),
            "PUPPETEER_EXECUTABLE_PATH" => Some("/opt/puppeteer-chrome".into()),
            _ => None,
        });
        assert_eq!(list[0].path, PathBuf::from("/opt/chrome"));
        assert_eq!(list[0].source, CandidateSource::Env("CHROME_PATH"));
        assert_eq!(list[1].path, PathBuf::from("/opt/puppeteer-chrome"));
        assert_eq!(list[2].source, CandidateSource::Platform);
    }

    #[test]
    fn empty_override_is_ignored() {
        let list = candidates_with(|var| (var == "CHROME_PATH").then(String::new));
        assert!(list.iter().all(|c| c.source != CandidateSource::Env("CHROME_PATH")));
    }

    #[test]
    fn first_existing_respects_order() {
        let list = vec![
            Candidate {
                path: PathBuf::from("/a"),
                source: CandidateSource::Platform,
            },
            Candidate {
                path: PathBuf::from("/b"),
                source: CandidateSource::Platform,
            },
            Candidate {
                path: PathBuf::from("/c"),
                source: CandidateSource::Platform,
            },
        ];
        let found = first_existing(&list, |p| p != Path::new("/a")).unwrap();
        assert_eq!(found, PathBuf::from("/b"));
    }

    #[test]
    fn not_found_mentions_remediation() {
        let err = first_existing(&[], |_| true).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CHROME_PATH"), "got: {msg}");
        assert!(msg.contains("checked 0"), "got: {msg}");
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = check_explicit("--browser", Path::new("/definitely/not/chrome")).unwrap_err();
        assert!(err.to_string().contains("--browser"));
    }

    #[test]
    fn stale_env_override_falls_through() {
        let list = candidates_with(|var| (var == "CHROME_PATH").then(|| "/gone/chrome".into()));
        assert_eq!(list[0].source, CandidateSource::Env("CHROME_PATH"));
        let fallback = list[1].path.clone();
        let found = first_existing(&list, |p| p == fallback.as_path()).unwrap();
        assert_eq!(found, fallback);
    }
}
