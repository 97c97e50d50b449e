//! Markdown → standalone HTML page, ready for the browser to print.
//!
//! pulldown-cmark does the markdown. A small event filter in front of its
//! HTML writer handles what a print page needs on top of CommonMark:
//!
//! * ```` ```mermaid ```` fences become `<pre class="mermaid">` so Mermaid can
//!   replace them with diagrams
//! * `$…$` / `$$…$$` become `\(…\)` / `\[…\]` spans for KaTeX auto-render
//! * single newlines become `<br>` when soft breaks are hard
//!
//! The page footer is drawn by CSS `@page` margin boxes rather than by the
//! browser's own header/footer template, which cannot be styled from a
//! command line.

use super::frontmatter::PrintSettings;
use crate::config::PdfConfig;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::fmt::Write as _;
use v_htmlescape::escape;

const MERMAID_SCRIPT: &str = r#"<script type="module">
import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";
mermaid.initialize({ startOnLoad: true, theme: "default" });
</script>"#;

const KATEX_SCRIPT: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16/dist/katex.min.css">
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16/dist/katex.min.js"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16/dist/contrib/auto-render.min.js"
  onload="renderMathInElement(document.body, {delimiters: [{left: '\\[', right: '\\]', display: true}, {left: '\\(', right: '\\)', display: false}], throwOnError: false});"></script>"#;

const HIGHLIGHT_SCRIPT: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@highlightjs/cdn-assets@11/styles/github.min.css">
<script defer src="https://cdn.jsdelivr.net/npm/@highlightjs/cdn-assets@11/highlight.min.js"
  onload="hljs.highlightAll();"></script>"#;

/// GitHub-light body styles.
const BASE_CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
       font-size: 16px; line-height: 1.6; color: #1f2328; background: #ffffff;
       max-width: 980px; margin: 0 auto; padding: 0; word-wrap: break-word;
       -webkit-print-color-adjust: exact; print-color-adjust: exact; }
h1, h2, h3, h4, h5, h6 { margin-top: 24px; margin-bottom: 16px; font-weight: 600; line-height: 1.25; }
h1 { font-size: 2em; padding-bottom: .3em; border-bottom: 1px solid #d1d9e0; }
h2 { font-size: 1.5em; padding-bottom: .3em; border-bottom: 1px solid #d1d9e0; }
h3 { font-size: 1.25em; }
p, blockquote, ul, ol, dl, table, pre { margin-top: 0; margin-bottom: 16px; }
a { color: #0969da; text-decoration: none; }
blockquote { padding: 0 1em; color: #59636e; border-left: .25em solid #d1d9e0; }
code { padding: .2em .4em; font-size: 85%; background: #eff1f3; border-radius: 6px;
       font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; }
pre { padding: 16px; overflow: auto; font-size: 85%; line-height: 1.45; background: #f6f8fa; border-radius: 6px; }
pre code { padding: 0; background: transparent; font-size: 100%; }
pre.mermaid { background: transparent; text-align: center; }
table { border-spacing: 0; border-collapse: collapse; display: block; width: max-content; max-width: 100%; overflow: auto; }
th, td { padding: 6px 13px; border: 1px solid #d1d9e0; }
th { font-weight: 600; }
tr:nth-child(2n) { background: #f6f8fa; }
img { max-width: 100%; }
hr { height: .25em; padding: 0; margin: 24px 0; background: #d1d9e0; border: 0; }
ul.contains-task-list { list-style: none; padding-left: 1em; }
.footnote-definition { font-size: 85%; color: #59636e; }
pre, table, img, .mermaid { break-inside: avoid; }
"#;

/// What the rendered body turned out to need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub mermaid: bool,
    pub math: bool,
    pub code: bool,
}

/// Render the markdown `body` into HTML fragments, reporting which script
/// features it uses. Only features enabled in `config` are produced.
pub fn render_body(body: &str, config: &PdfConfig) -> (String, Features) {
    let mut opts = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    if config.math {
        opts.insert(Options::ENABLE_MATH);
    }

    let mut features = Features::default();
    let mut events: Vec<Event> = Vec::new();
    // Source of the mermaid fence being collected.
    let mut mermaid: Option<String> = None;

    for event in Parser::new_ext(body, opts) {
        if let Some(src) = mermaid.as_mut() {
            match event {
                Event::Text(t) => src.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let src = mermaid.take().unwrap_or_default();
                    events.push(Event::Html(CowStr::from(format!(
                        "<pre class=\"mermaid\">{}</pre>\n",
                        escape(&src)
                    ))));
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                if config.mermaid && lang.as_ref() == "mermaid" =>
            {
                features.mermaid = true;
                mermaid = Some(String::new());
            }
            Event::Start(Tag::CodeBlock(_)) => {
                features.code = true;
                events.push(event);
            }
            Event::InlineMath(m) => {
                features.math = true;
                events.push(Event::InlineHtml(CowStr::from(format!(
                    "<span class=\"math\">\\({}\\)</span>",
                    escape(&m)
                ))));
            }
            Event::DisplayMath(m) => {
                features.math = true;
                events.push(Event::InlineHtml(CowStr::from(format!(
                    "<span class=\"math math-display\">\\[{}\\]</span>",
                    escape(&m)
                ))));
            }
            Event::SoftBreak if config.break_on_single_newline => events.push(Event::HardBreak),
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    (out, features)
}

/// A complete HTML document for `body`, with page CSS and the scripts it
/// needs.
pub fn render_html(title: &str, body: &str, settings: &PrintSettings, config: &PdfConfig) -> String {
    let (content, features) = render_body(body, config);

    let mut page = String::with_capacity(content.len() + BASE_CSS.len() + 2048);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{}</title>", escape(title));
    page.push_str("<style>");
    page.push_str(BASE_CSS);
    page.push_str(&page_css(settings));
    page.push_str("</style>\n");
    if features.math {
        page.push_str(KATEX_SCRIPT);
        page.push('\n');
    }
    if features.code && config.highlight {
        page.push_str(HIGHLIGHT_SCRIPT);
        page.push('\n');
    }
    page.push_str("</head>\n<body>\n<article class=\"markdown-body\">\n");
    page.push_str(&content);
    page.push_str("</article>\n");
    if features.mermaid {
        page.push_str(MERMAID_SCRIPT);
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");
    page
}

/// `@page` rule: size, margins and the footer boxes.
pub fn page_css(settings: &PrintSettings) -> String {
    let m = &settings.margin;
    let mut css = String::new();
    let orientation = if settings.landscape { " landscape" } else { "" };
    let _ = write!(
        css,
        "\n@page {{ size: {}{orientation}; margin: {} {} {} {};",
        css_ident(&settings.format),
        css_ident(&m.top),
        css_ident(&m.right),
        css_ident(&m.bottom),
        css_ident(&m.left),
    );
    if settings.display_header_footer {
        let label = settings.footer_label.as_deref().unwrap_or_default();
        let _ = write!(
            css,
            "\n  @bottom-left {{ content: \"{}\"; font-size: 8px; color: #666; \
             font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, sans-serif; }}\
             \n  @bottom-right {{ content: counter(page) \" / \" counter(pages); font-size: 9px; \
             font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, sans-serif; }}",
            css_string(label)
        );
    }
    css.push_str("\n}\n");
    css
}

/// Escape text for a double-quoted CSS string inside a `<style>` element.
fn css_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("\\3C "),
            '\n' | '\r' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Keep only characters that can appear in a CSS length or size keyword.
fn css_ident(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '%'))
        .collect()
}
