//! Configuration for deck and PDF conversion.
//!
//! Each tool has one config struct with public, documented fields and a
//! builder that validates on [`build`](DeckConfigBuilder::build). Nothing in
//! here touches the filesystem or the environment: the binaries resolve
//! per-user paths (theme directory, browser) and inject the results.
//!
//! # Design choice: builder over constructor
//! Most callers change one or two knobs. The builder lets them set only those
//! and rely on the documented defaults for the rest.

use crate::error::ExportError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

// ── Deck ─────────────────────────────────────────────────────────────────

/// Configuration for a markdown-to-slides conversion.
///
/// # Example
/// ```rust
/// use mdexport::DeckConfig;
///
/// let config = DeckConfig::builder()
///     .theme_path("/themes/golden-hour.md")
///     .images_dir("images/")
///     .build()
///     .unwrap();
/// assert!(!config.use_theme_fonts);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckConfig {
    /// Theme markdown file. Default: None (built-in palette).
    ///
    /// A path that does not exist is not an error; the built-in palette is
    /// used and the theme label still appears on the slides.
    pub theme_path: Option<PathBuf>,

    /// Name shown on the title and summary slides, usually the theme slug.
    /// Default: "golden-hour".
    pub theme_label: String,

    /// Directory searched for `slide-NN.{png,jpg,jpeg,webp}` illustrations.
    /// Default: None (no images).
    pub images_dir: Option<PathBuf>,

    /// Use the theme's header/body fonts instead of the platform-safe pair.
    /// Default: false.
    ///
    /// Theme fonts are often web fonts that a presenting machine lacks, which
    /// makes PowerPoint substitute something with different metrics.
    pub use_theme_fonts: bool,

    /// `dc:creator` of the package. Default: "mdexport".
    pub author: String,

    /// Language tag on every text run. Default: "zh-CN".
    pub language: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            theme_path: None,
            theme_label: "golden-hour".to_string(),
            images_dir: None,
            use_theme_fonts: false,
            author: "mdexport".to_string(),
            language: "zh-CN".to_string(),
        }
    }
}

impl DeckConfig {
    pub fn builder() -> DeckConfigBuilder {
        DeckConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DeckConfig`].
#[derive(Debug)]
pub struct DeckConfigBuilder {
    config: DeckConfig,
}

impl DeckConfigBuilder {
    pub fn theme_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.theme_path = Some(path.into());
        self
    }

    pub fn theme_label(mut self, label: impl Into<String>) -> Self {
        self.config.theme_label = label.into();
        self
    }

    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.images_dir = Some(dir.into());
        self
    }

    pub fn use_theme_fonts(mut self, v: bool) -> Self {
        self.config.use_theme_fonts = v;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config.author = author.into();
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.language = lang.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DeckConfig, ExportError> {
        let c = &self.config;
        if c.theme_label.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "Theme label must not be empty".into(),
            ));
        }
        if c.language.trim().is_empty() || c.language.contains(char::is_whitespace) {
            return Err(ExportError::InvalidConfig(format!(
                "Language must be a tag like 'en-US', got '{}'",
                c.language
            )));
        }
        Ok(self.config)
    }
}

// ── PDF ──────────────────────────────────────────────────────────────────

/// Configuration for a markdown-to-PDF conversion.
///
/// # Example
/// ```rust
/// use mdexport::PdfConfig;
///
/// let config = PdfConfig::builder()
///     .mermaid(false)
///     .virtual_time_budget_ms(500)
///     .build()
///     .unwrap();
/// assert_eq!(config.virtual_time_budget_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfConfig {
    /// Browser executable. Default: None (discover with `chrome-locate`).
    pub browser_path: Option<PathBuf>,

    /// Launch the platform viewer on the finished PDF. Default: false.
    pub open_after: bool,

    /// Render ```` ```mermaid ```` fences as diagrams. Default: true.
    pub mermaid: bool,

    /// Render `$…$` and `$$…$$` with KaTeX. Default: true.
    pub math: bool,

    /// Syntax-highlight fenced code. Default: true.
    pub highlight: bool,

    /// Treat a single newline as a line break. Default: true.
    pub break_on_single_newline: bool,

    /// Virtual time the browser grants page scripts before printing, in
    /// milliseconds. Range: 1000–120000. Default: 10000.
    ///
    /// Mermaid and KaTeX render asynchronously from a CDN. Chrome's virtual
    /// time budget fast-forwards timers and waits for network idle, so a
    /// generous budget costs little on simple pages.
    pub virtual_time_budget_ms: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            browser_path: None,
            open_after: false,
            mermaid: true,
            math: true,
            highlight: true,
            break_on_single_newline: true,
            virtual_time_budget_ms: 10_000,
        }
    }
}

impl PdfConfig {
    pub fn builder() -> PdfConfigBuilder {
        PdfConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PdfConfig`].
#[derive(Debug)]
pub struct PdfConfigBuilder {
    config: PdfConfig,
}

impl PdfConfigBuilder {
    pub fn browser_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.browser_path = Some(path.into());
        self
    }

    pub fn open_after(mut self, v: bool) -> Self {
        self.config.open_after = v;
        self
    }

    pub fn mermaid(mut self, v: bool) -> Self {
        self.config.mermaid = v;
        self
    }

    pub fn math(mut self, v: bool) -> Self {
        self.config.math = v;
        self
    }

    pub fn highlight(mut self, v: bool) -> Self {
        self.config.highlight = v;
        self
    }

    pub fn break_on_single_newline(mut self, v: bool) -> Self {
        self.config.break_on_single_newline = v;
        self
    }

    pub fn virtual_time_budget_ms(mut self, ms: u64) -> Self {
        self.config.virtual_time_budget_ms = ms.clamp(1_000, 120_000);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PdfConfig, ExportError> {
        let c = &self.config;
        if !(1_000..=120_000).contains(&c.virtual_time_budget_ms) {
            return Err(ExportError::InvalidConfig(format!(
                "Virtual time budget must be 1000–120000 ms, got {}",
                c.virtual_time_budget_ms
            )));
        }
        if let Some(path) = &c.browser_path {
            if path.as_os_str().is_empty() {
                return Err(ExportError::InvalidConfig(
                    "Browser path must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Slide illustrations ──────────────────────────────────────────────────

/// Model requested when neither the caller nor the plan names one.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Configuration for generating slide illustrations from an image plan.
///
/// `base_url` and `api_key` have no usable default; [`build`](ImageGenConfigBuilder::build)
/// rejects a config without them.
///
/// # Example
/// ```rust
/// use mdexport::ImageGenConfig;
///
/// let config = ImageGenConfig::builder()
///     .base_url("https://gateway.example/")
///     .api_key("sk-test")
///     .poll_interval_ms(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "https://gateway.example");
/// assert_eq!(config.poll_interval_ms, 100);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ImageGenConfig {
    /// Gateway root; `/v1/images/generations` is appended. Trailing slashes
    /// are dropped. Required.
    pub base_url: String,

    /// Sent as `Authorization: Bearer`, `X-Api-Key` and `X-Goog-Api-Key`,
    /// since gateways disagree on which one they read. Required.
    #[serde(skip)]
    pub api_key: String,

    /// Default: [`DEFAULT_IMAGE_MODEL`].
    pub model: String,

    /// Delay between task status polls. Default: 1500 ms.
    pub poll_interval_ms: u64,

    /// Give up on a task after this long. Default: 180 s.
    pub task_timeout_secs: u64,

    /// Per-request HTTP timeout. Default: 120 s.
    pub request_timeout_secs: u64,

    /// Regenerate images whose file already exists. Default: false.
    pub overwrite: bool,
}

impl fmt::Debug for ImageGenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageGenConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("task_timeout_secs", &self.task_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("overwrite", &self.overwrite)
            .finish()
    }
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            poll_interval_ms: 1_500,
            task_timeout_secs: 180,
            request_timeout_secs: 120,
            overwrite: false,
        }
    }
}

impl ImageGenConfig {
    pub fn builder() -> ImageGenConfigBuilder {
        ImageGenConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ImageGenConfig`].
#[derive(Debug)]
pub struct ImageGenConfigBuilder {
    config: ImageGenConfig,
}

impl ImageGenConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into().trim().to_string();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Clamped to 100–60000 ms.
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms.clamp(100, 60_000);
        self
    }

    /// Clamped to 1–3600 s.
    pub fn task_timeout_secs(mut self, secs: u64) -> Self {
        self.config.task_timeout_secs = secs.clamp(1, 3_600);
        self
    }

    /// Clamped to 1–600 s.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.clamp(1, 600);
        self
    }

    pub fn overwrite(mut self, v: bool) -> Self {
        self.config.overwrite = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ImageGenConfig, ExportError> {
        let c = &self.config;
        if c.base_url.is_empty() {
            return Err(ExportError::InvalidConfig(
                "Missing image API base URL (set GEMINI_BASE_URL or pass --base-url)".into(),
            ));
        }
        if !(c.base_url.starts_with("http://") || c.base_url.starts_with("https://")) {
            return Err(ExportError::InvalidConfig(format!(
                "Image API base URL must start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        if c.api_key.is_empty() {
            return Err(ExportError::InvalidConfig(
                "Missing image API key (set GEMINI_API_KEY or pass --key)".into(),
            ));
        }
        if c.model.trim().is_empty() {
            return Err(ExportError::InvalidConfig("Model must not be empty".into()));
        }
        Ok(self.config)
    }
}
