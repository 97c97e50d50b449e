//! Pipeline stages for markdown-to-slides conversion.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested on plain strings without touching the filesystem.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ sections ──▶ parse ──▶ document ──▶ layout ──▶ pptx
//!            (slice by ##)  (lists)   (model +     (slides)   (zip)
//!                                     diagnostics)     ▲
//!                                                      │
//!                                            images (slide-NN.*)
//! ```
//!
//! 1. [`sections`] — locate the title, the date line and the seven `## `
//!    sections by their literal headings
//! 2. [`parse`]    — bullets, bold-prefixed findings, `### ` subsections,
//!    citations
//! 3. [`document`] — assemble the [`ParsedDocument`](document::ParsedDocument)
//!    and record what was found
//! 4. [`layout`]   — place every shape on fixed-capacity slides; the only
//!    stage that reads images
//! 5. [`images`]   — find and decode per-page illustrations

pub mod document;
pub mod images;
pub mod layout;
pub mod parse;
pub mod sections;
