//! Markdown → PDF through a headless Chromium-family browser.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ frontmatter ──▶ html ──▶ print ──▶ PDF
//!              (footer block,   (pulldown-  (browser child
//!               print settings)  cmark)      process)
//! ```
//!
//! 1. [`frontmatter`] — inject the page-numbering block unless the document
//!    brings its own, then read the print settings back out
//! 2. [`html`]        — standalone page with GitHub-light CSS, `@page`
//!    footer and the scripts the content needs
//! 3. [`print`]       — temp files, the browser run, moving the result

pub mod frontmatter;
pub mod html;
pub mod print;

pub use frontmatter::{inject_page_numbering, PrintSettings};
pub use html::render_html;
pub use print::open_file;
