//! Mutable HTML document tree.
//!
//! Documents are parsed with html5ever into an index-linked arena ([`Dom`]).
//! Every later stage works on node ids and mutates the arena in place.
//!
//! ```
//! use newsdoc::dom::{parse_fragment, serialize};
//!
//! let dom = parse_fragment("<p>Hello <b>there</b></p>");
//! let html = serialize::inner_html(&dom, dom.document());
//! assert_eq!(html, "<p>Hello <b>there</b></p>");
//! ```

mod arena;
pub mod serialize;
mod table;
pub mod tags;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, Dom, Node, NodeData, NodeId, html_name};
pub use table::TableRows;
pub use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document as html5ever_parse;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;

/// Parse a complete HTML document.
pub fn parse_document(html: &str) -> Dom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever_parse(DomSink::new(), opts)
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse an HTML fragment.
///
/// The fragment is parsed as the body of a minimal document, then the body's
/// children are moved under the document root of a fresh [`Dom`].
pub fn parse_fragment(html: &str) -> Dom {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    let parsed = parse_document(&wrapped);
    match parsed.body() {
        Some(body) => parsed.fragment(body),
        None => Dom::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_keeps_leading_script_in_body() {
        let dom = parse_fragment(r#"<script src="x.js"></script><div>hi</div>"#);
        let children: Vec<_> = dom.children(dom.document()).collect();
        assert_eq!(children.len(), 2);
        assert!(dom.is_tag(children[0], "script"));
        assert!(dom.is_tag(children[1], "div"));
    }

    #[test]
    fn test_document_has_body() {
        let dom = parse_document("<p>text</p>");
        let body = dom.body().expect("html5ever always synthesizes a body");
        assert_eq!(dom.text_content(body), "text");
    }
}
