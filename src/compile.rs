//! The compile driver: one Google Docs HTML export in, every output out.

use serde::Serialize;

use crate::directive::{self, Metadata};
use crate::dom::{Dom, NodeId, parse_document, serialize};
use crate::embed::Embed;
use crate::error::{Error, Result};
use crate::finish;
use crate::normalize::{normalize, remove_tail};
use crate::util::{decode_text, extract_meta_charset, word_count};
use crate::warnings::document_warnings;

/// Knobs for [`compile_with`].
///
/// ```
/// use newsdoc::CompileOptions;
///
/// let options = CompileOptions::new().toc_limit(20).end_marker(None::<String>);
/// assert_eq!(options.toc_limit, 20);
/// assert!(options.end_marker.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Most headings listed in a generated table of contents.
    pub toc_limit: usize,
    /// Text of the paragraph that ends the story. It and everything after it
    /// are dropped. `None` keeps the whole document.
    pub end_marker: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            toc_limit: 100,
            end_marker: Some("###".to_string()),
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toc_limit(mut self, limit: usize) -> Self {
        self.toc_limit = limit;
        self
    }

    pub fn end_marker<S: Into<String>>(mut self, marker: Option<S>) -> Self {
        self.end_marker = marker.map(Into::into);
        self
    }
}

/// Everything produced from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    pub metadata: Metadata,
    /// Published embeds, numbered from 1 in reading order.
    pub embeds: Vec<Embed>,
    /// HTML for partners pasting into a rich-text editor.
    pub rich_text: String,
    /// HTML for partners publishing the embed code themselves.
    pub raw_html: String,
    /// Markdown for the newsroom's static site.
    pub markdown: String,
    pub warnings: Vec<String>,
    pub word_count: usize,
}

/// Compile with [`CompileOptions::default`].
///
/// ```
/// let html = "<html><body>\
///     <table><tr><td>Metadata</td></tr><tr><td>Hed</td><td>Hello</td></tr></table>\
///     <p>Body text</p>\
/// </body></html>";
/// let bundle = newsdoc::compile(html).unwrap();
/// assert_eq!(bundle.metadata.hed, "Hello");
/// assert!(bundle.embeds.is_empty());
/// assert_eq!(bundle.markdown, "Body text\n");
/// assert_eq!(bundle.word_count, 2);
/// ```
pub fn compile(html: &str) -> Result<Bundle> {
    compile_with(html, &CompileOptions::default())
}

/// Compile raw bytes, honoring a `<meta charset>` declaration when the input
/// is not UTF-8.
pub fn compile_bytes(bytes: &[u8], options: &CompileOptions) -> Result<Bundle> {
    let html = decode_text(bytes, extract_meta_charset(bytes));
    compile_with(&html, options)
}

/// Compile a Google Docs HTML export.
pub fn compile_with(html: &str, options: &CompileOptions) -> Result<Bundle> {
    let mut dom = parse_document(html);
    let body = dom.body().ok_or(Error::MissingBody)?;

    if let Some(data) = dom.select(dom.document(), |d, id| d.is_tag(id, "data")) {
        return Err(Error::UnexpectedDataElement(serialize::outer_html(&dom, data)));
    }

    if let Some(marker) = &options.end_marker {
        remove_tail(&mut dom, body, marker);
    }

    let scanned = directive::scan(&mut dom, body, options.toc_limit)?;
    let mut metadata = scanned.metadata;
    if metadata.internal_id.is_empty() {
        metadata.internal_id = document_title(&dom);
    }

    normalize(&mut dom, body);

    let mut warnings = scanned.warnings;
    warnings.extend(document_warnings(&dom, body));

    let mut rich = dom.clone();
    finish::rich_text(&mut rich, body)?;
    let word_count = word_count(&rich.text_content(body));
    let rich_text = serialize::inner_html_blocks(&rich, body);

    let mut raw = dom.clone();
    finish::raw_html(&mut raw, body)?;
    let raw_html = serialize::inner_html_blocks(&raw, body);

    let markdown = finish::markdown(&mut dom, body)?;

    tracing::debug!(
        embeds = scanned.embeds.len(),
        warnings = warnings.len(),
        word_count,
        "compiled document"
    );

    Ok(Bundle {
        metadata,
        embeds: scanned.embeds,
        rich_text,
        raw_html,
        markdown,
        warnings,
        word_count,
    })
}

/// Trimmed text of the document's `<title>`.
fn document_title(dom: &Dom) -> String {
    dom.select(dom.document(), |d, id| d.is_tag(id, "title"))
        .map(|title: NodeId| dom.text_content(title).trim().to_string())
        .unwrap_or_default()
}
