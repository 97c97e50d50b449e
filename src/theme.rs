//! Theme description loader.
//!
//! A theme is a small markdown file from a theme-factory style collection:
//!
//! ```markdown
//! # Golden Hour
//!
//! ## Color Palette
//! - **Mustard Yellow**: `#F4A900`
//! - **Terracotta**: `#C1666B`
//!
//! ## Typography
//! - **Headers**: Playfair Display
//! - **Body Text**: Lato
//! ```
//!
//! Only lines matching the patterns below are read; everything else is
//! ignored. Color order is preserved because palette selection picks the
//! first name match.

use crate::color::HexColor;
use crate::error::ExportError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One named color from the theme file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColor {
    pub name: String,
    pub hex: HexColor,
}

/// Font preferences declared by the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub header_font: Option<String>,
    pub body_font: Option<String>,
}

/// Parsed theme file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub name: String,
    pub colors: Vec<ThemeColor>,
    pub fonts: ThemeFonts,
}

static RE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)\s*$").unwrap());

static RE_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\s+\*\*([^*]+)\*\*:\s+`(#[0-9a-fA-F]{6})`").unwrap());

static RE_HEADER_FONT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)-[ \t]+\*\*Headers\*\*:[ \t]+(.+?)\s*$").unwrap());

static RE_BODY_FONT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)-[ \t]+\*\*Body Text\*\*:[ \t]+(.+?)\s*$").unwrap());

/// Parse theme markdown. Never fails; unmatched lines are skipped.
pub fn parse_theme(raw: &str) -> ThemeDescriptor {
    let colors = raw
        .lines()
        .filter_map(|line| RE_COLOR.captures(line))
        .filter_map(|caps| {
            let hex = caps[2].parse::<HexColor>().ok()?;
            Some(ThemeColor {
                name: caps[1].trim().to_string(),
                hex,
            })
        })
        .collect();

    let capture = |re: &Regex| {
        re.captures(raw)
            .map(|c| c[1].trim().to_string())
            .filter(|s| !s.is_empty())
    };

    ThemeDescriptor {
        name: capture(&RE_NAME).unwrap_or_else(|| "Theme".to_string()),
        colors,
        fonts: ThemeFonts {
            header_font: capture(&RE_HEADER_FONT),
            body_font: capture(&RE_BODY_FONT),
        },
    }
}

/// Load and parse the theme at `path`.
///
/// Returns `Ok(None)` when the file does not exist — callers fall back to
/// the built-in palette. Any other read failure is fatal.
pub fn load_theme(path: &Path) -> Result<Option<ThemeDescriptor>, ExportError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let theme = parse_theme(&raw);
            debug!(
                "Loaded theme '{}' ({} colors) from {}",
                theme.name,
                theme.colors.len(),
                path.display()
            );
            Ok(Some(theme))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No theme file at {}", path.display());
            Ok(None)
        }
        Err(source) => Err(ExportError::ThemeReadFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Conventional location of a theme-factory theme under `home`:
/// `<home>/.agents/skills/theme-factory/themes/<slug>.md`.
pub fn default_theme_path(home: &Path, slug: &str) -> PathBuf {
    themes_dir(home).join(format!("{slug}.md"))
}

/// Directory holding theme-factory themes under `home`.
pub fn themes_dir(home: &Path) -> PathBuf {
    home.join(".agents")
        .join("skills")
        .join("theme-factory")
        .join("themes")
}
