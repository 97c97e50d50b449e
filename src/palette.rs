//! Semantic palette derivation.
//!
//! Theme files name their colors freely ("Mustard Yellow", "Deep Navy",
//! "Seafoam"). The slide layout needs seven roles instead: two accents, a
//! page background, a card fill, body text, a dark slide background and text
//! that sits on dark slides. [`derive_palette`] maps one onto the other by
//! keyword matching with fixed mix ratios, falling back to a built-in warm
//! palette when no usable theme is present.

use crate::color::HexColor;
use crate::theme::{ThemeDescriptor, ThemeFonts};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// The seven-role palette consumed by every slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub theme_name: String,
    pub accent1: HexColor,
    pub accent2: HexColor,
    pub bg: HexColor,
    pub card: HexColor,
    pub text: HexColor,
    pub dark: HexColor,
    pub bg_text: HexColor,
}

const FALLBACK_ACCENT1: HexColor = HexColor::from_rgb(0xF4, 0xA9, 0x00);
const FALLBACK_ACCENT2: HexColor = HexColor::from_rgb(0xC1, 0x66, 0x6B);
const FALLBACK_SAND: HexColor = HexColor::from_rgb(0xD4, 0xB8, 0x96);
const FALLBACK_TEXT: HexColor = HexColor::from_rgb(0x4A, 0x40, 0x3A);

static RE_ACCENT1: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"electric|mustard|teal|blue|gold|accent|primary").unwrap());
static RE_ACCENT2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"cyan|terracotta|seafoam|rose|secondary|highlight").unwrap());
static RE_BACKGROUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"white|cream|beige|light|background").unwrap());
static RE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"dark|charcoal|chocolate|navy|text").unwrap());

impl Palette {
    /// Built-in warm palette used when no theme (or a one-color theme) is
    /// available.
    pub fn fallback() -> Self {
        Self {
            theme_name: "Fallback".to_string(),
            accent1: FALLBACK_ACCENT1,
            accent2: FALLBACK_ACCENT2,
            bg: FALLBACK_SAND.mix(HexColor::WHITE, 0.68),
            card: HexColor::WHITE.mix(FALLBACK_SAND, 0.12),
            text: FALLBACK_TEXT,
            dark: FALLBACK_TEXT.mix(HexColor::BLACK, 0.30),
            bg_text: HexColor::WHITE.mix(FALLBACK_SAND, 0.08),
        }
    }
}

/// Derive the palette for `theme`. Total and deterministic.
pub fn derive_palette(theme: Option<&ThemeDescriptor>) -> Palette {
    let theme = match theme {
        Some(t) if t.colors.len() >= 2 => t,
        _ => return Palette::fallback(),
    };

    let by_name = |re: &Regex| {
        theme
            .colors
            .iter()
            .find(|c| re.is_match(&c.name.to_lowercase()))
            .map(|c| c.hex)
    };
    let first = theme.colors[0].hex;
    let second = theme.colors[1].hex;

    let accent1 = by_name(&RE_ACCENT1).unwrap_or(first);
    let accent2 = by_name(&RE_ACCENT2).unwrap_or(second);
    let bg_base = by_name(&RE_BACKGROUND).unwrap_or_else(|| first.mix(HexColor::WHITE, 0.85));
    let text_base = by_name(&RE_TEXT).unwrap_or_else(|| first.mix(HexColor::BLACK, 0.65));

    Palette {
        theme_name: theme.name.clone(),
        accent1,
        accent2,
        bg: bg_base.mix(HexColor::WHITE, 0.25),
        card: HexColor::WHITE.mix(bg_base, 0.10),
        text: text_base,
        dark: text_base.mix(HexColor::BLACK, 0.28),
        bg_text: HexColor::WHITE.mix(bg_base, 0.06),
    }
}

/// Header/body typefaces used on every slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontPair {
    pub header: String,
    pub body: String,
}

impl FontPair {
    pub const DEFAULT_HEADER: &'static str = "Segoe UI Semibold";
    pub const DEFAULT_BODY: &'static str = "Segoe UI";

    /// Pick the typefaces for the deck.
    ///
    /// Theme fonts are often web fonts that the presenting machine does not
    /// have, so they are only honoured when `use_theme_fonts` is set; each
    /// missing slot falls back to the default pair.
    pub fn select(theme_fonts: Option<&ThemeFonts>, use_theme_fonts: bool) -> Self {
        let pick = |slot: Option<&String>, default: &str| match slot {
            Some(font) if use_theme_fonts => font.clone(),
            _ => default.to_string(),
        };
        let fonts = theme_fonts.cloned().unwrap_or_default();
        Self {
            header: pick(fonts.header_font.as_ref(), Self::DEFAULT_HEADER),
            body: pick(fonts.body_font.as_ref(), Self::DEFAULT_BODY),
        }
    }
}

impl Default for FontPair {
    fn default() -> Self {
        Self::select(None, false)
    }
}
