//! Authoring warnings.
//!
//! Warnings are advisory messages for editors. They never stop compilation
//! and are returned in detection order, without deduplication.

mod balanced;

use std::sync::LazyLock;

use regex::Regex;

pub use balanced::is_balanced;

use crate::dom::{Dom, NodeId};
use crate::util::truncate;

/// Display length for quoted document text in warnings.
const QUOTE_LEN: usize = 17;

/// Bold paragraphs shorter than this are not mistaken for headings.
const FAKE_HEADING_MIN_CHARS: usize = 3;

static TK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bTK\b").expect("valid regex"));

pub const LINE_BREAK_WARNING: &str = "Document contains <br> line breaks. Are you sure you want to use a line break? In Google Docs, select View > Show non-printing characters to see them.";

/// Checks on pasted embed code for embed number `n`.
pub fn embed_warnings(n: usize, html: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    if !html.is_ascii() {
        warnings.push(format!("Embed #{n} contains unusual characters."));
    }
    if !is_balanced(html) {
        warnings.push(format!("Embed #{n} seems to contain unbalanced HTML."));
    }
    warnings
}

/// Whole-document checks on the normalized body.
pub fn document_warnings(dom: &Dom, body: NodeId) -> Vec<String> {
    let mut warnings = fake_headings(dom, body);
    warnings.extend(placeholder_text(dom, body));
    if dom.select(body, |d, id| d.is_tag(id, "br")).is_some() {
        warnings.push(LINE_BREAK_WARNING.to_string());
    }
    warnings
}

/// Top-level paragraphs set entirely in bold.
fn fake_headings(dom: &Dom, body: NodeId) -> Vec<String> {
    dom.children(body)
        .filter(|&p| dom.is_tag(p, "p"))
        .filter(|&p| {
            let (Some(first), Some(last)) = (dom.first_child(p), dom.last_child(p)) else {
                return false;
            };
            first == last && (dom.is_tag(first, "b") || dom.is_tag(first, "strong"))
        })
        .filter_map(|p| {
            let text = dom.text_content(p);
            (text.trim().chars().count() >= FAKE_HEADING_MIN_CHARS).then(|| {
                format!(
                    "Paragraph beginning {:?} looks like a header, but does not use H-tag.",
                    truncate(&text, QUOTE_LEN)
                )
            })
        })
        .collect()
}

/// The first text node still holding a "TK" (to come) placeholder.
fn placeholder_text(dom: &Dom, body: NodeId) -> Option<String> {
    let node = dom.select(body, |d, id| d.text(id).is_some_and(|t| TK_RE.is_match(t)))?;
    let text = dom.text(node)?;
    Some(format!(
        "Text {:?} contains \"TK\". Did you mean to remove it?",
        truncate(text, QUOTE_LEN)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn warnings_for(html: &str) -> Vec<String> {
        let dom = parse_fragment(html);
        document_warnings(&dom, dom.document())
    }

    #[test]
    fn test_embed_warnings() {
        assert!(embed_warnings(1, "<div></div>").is_empty());
        assert_eq!(
            embed_warnings(2, "<div>café"),
            vec![
                "Embed #2 contains unusual characters.".to_string(),
                "Embed #2 seems to contain unbalanced HTML.".to_string(),
            ]
        );
    }

    #[test]
    fn test_fake_heading() {
        let warnings = warnings_for("<p><strong>This paragraph is way too long</strong></p><p><b>Hi</b></p>");
        assert_eq!(
            warnings,
            vec![
                "Paragraph beginning \"This paragrap…\" looks like a header, but does not use H-tag."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_bold_with_trailing_text_is_fine() {
        assert!(warnings_for("<p><b>Lead-in:</b> the rest of the paragraph.</p>").is_empty());
    }

    #[test]
    fn test_tk_first_only() {
        let warnings = warnings_for("<p>Quote TK here</p><p>and tk again</p><p>TKO is fine</p>");
        assert_eq!(
            warnings,
            vec!["Text \"Quote TK here\" contains \"TK\". Did you mean to remove it?".to_string()]
        );
    }

    #[test]
    fn test_line_break() {
        let warnings = warnings_for("<p>one<br>two</p>");
        assert_eq!(warnings, vec![LINE_BREAK_WARNING.to_string()]);
    }
}
