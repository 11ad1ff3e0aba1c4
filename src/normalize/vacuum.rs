//! Minify: comment removal and whitespace collapsing.
//!
//! Works on the tree directly. Element pairs are already balanced by the
//! parser, so nothing has to be re-serialized.

use crate::dom::{Dom, NodeData, NodeId, tags};

/// Drop comments, collapse whitespace runs, and trim text at block edges.
///
/// Whitespace-only text between block boundaries disappears entirely.
/// Content of `pre`, `code`, `textarea`, `script` and `style` is untouched.
pub fn minify(dom: &mut Dom, root: NodeId) {
    let comments = dom.select_all(root, |d, id| {
        d.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Comment(_)))
    });
    for comment in comments {
        dom.detach(comment);
    }

    // Top-down: a text node's trimming depends on its ancestors' siblings,
    // which must already be final when it is visited.
    let mut parents = vec![root];
    parents.extend(dom.select_all(root, |d, id| d.is_element(id)));
    for parent in parents {
        minify_children(dom, parent);
    }
}

fn minify_children(dom: &mut Dom, parent: NodeId) {
    let preformatted = dom
        .closest(parent, |d, id| {
            d.element_name(id).is_some_and(tags::preserves_whitespace)
        })
        .is_some();
    if preformatted {
        return;
    }

    let texts: Vec<_> = dom
        .children(parent)
        .filter(|&id| dom.is_text(id))
        .collect();

    for id in texts {
        let Some(text) = dom.text(id) else {
            continue;
        };
        let mut collapsed = collapse_whitespace(text);
        if at_block_start(dom, id) {
            collapsed = collapsed.trim_start_matches(' ').to_string();
        }
        if at_block_end(dom, id) {
            collapsed = collapsed.trim_end_matches(' ').to_string();
        }

        if collapsed.is_empty() {
            dom.detach(id);
        } else if let Some(existing) = dom.text_mut(id) {
            *existing = collapsed;
        }
    }
}

fn is_html_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

/// Replace every run of HTML whitespace with a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_html_space(c) {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn is_boundary(dom: &Dom, id: NodeId) -> bool {
    dom.element_name(id).is_some_and(tags::is_block)
}

fn in_inline_parent(dom: &Dom, id: NodeId) -> Option<NodeId> {
    dom.parent(id)
        .filter(|&p| dom.element_name(p).is_some_and(tags::is_inline))
}

/// Whether nothing but block boundaries precede `id` in its block.
fn at_block_start(dom: &Dom, id: NodeId) -> bool {
    let mut current = id;
    loop {
        if let Some(prev) = dom.prev_sibling(current) {
            return is_boundary(dom, prev);
        }
        match in_inline_parent(dom, current) {
            Some(parent) => current = parent,
            None => return true,
        }
    }
}

/// Whether nothing but block boundaries follow `id` in its block.
fn at_block_end(dom: &Dom, id: NodeId) -> bool {
    let mut current = id;
    loop {
        if let Some(next) = dom.next_sibling(current) {
            return is_boundary(dom, next);
        }
        match in_inline_parent(dom, current) {
            Some(parent) => current = parent,
            None => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_fragment, serialize};

    fn minified(html: &str) -> String {
        let mut dom = parse_fragment(html);
        let root = dom.document();
        minify(&mut dom, root);
        serialize::inner_html(&dom, root)
    }

    #[test]
    fn test_drops_whitespace_between_blocks() {
        assert_eq!(
            minified("<div>\n  <p>One</p>\n  <p>Two</p>\n</div>"),
            "<div><p>One</p><p>Two</p></div>"
        );
    }

    #[test]
    fn test_keeps_inline_spacing() {
        assert_eq!(
            minified("<p>  Hello\n   <b>big</b>   world  </p>"),
            "<p>Hello <b>big</b> world</p>"
        );
    }

    #[test]
    fn test_trims_through_inline_parents() {
        assert_eq!(
            minified("<p><b>  bold start</b> tail </p>"),
            "<p><b>bold start</b> tail</p>"
        );
    }

    #[test]
    fn test_removes_comments() {
        assert_eq!(minified("<p>a<!-- note -->b</p>"), "<p>ab</p>");
    }

    #[test]
    fn test_preformatted_untouched() {
        assert_eq!(
            minified("<pre>  keep\n  this  </pre>"),
            "<pre>  keep\n  this  </pre>"
        );
    }
}
