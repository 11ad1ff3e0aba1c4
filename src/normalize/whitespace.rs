//! Line-break and space normalization inside text nodes.

use crate::dom::{Dom, NodeId, tags};

/// Fold adjacent text nodes together, then rewrite their whitespace:
/// CR and LF become spaces, vertical tab and U+2029 become the U+2028 soft
/// break, and space runs fold to one. Text under `pre`, `code` and the other
/// whitespace-preserving elements is left alone.
pub fn normalize_whitespace(dom: &mut Dom, root: NodeId) {
    coalesce_text(dom, root);

    let texts = dom.select_all(root, |d, id| d.is_text(id));
    for id in texts {
        let preformatted = dom
            .closest(id, |d, n| d.element_name(n).is_some_and(tags::preserves_whitespace))
            .is_some();
        if preformatted {
            continue;
        }
        if let Some(text) = dom.text_mut(id) {
            *text = replace_whitespace(text);
        }
    }
}

fn coalesce_text(dom: &mut Dom, root: NodeId) {
    let texts = dom.select_all(root, |d, id| {
        d.is_text(id) && !d.prev_sibling(id).is_some_and(|prev| d.is_text(prev))
    });
    for first in texts {
        while let Some(next) = dom.next_sibling(first).filter(|&n| dom.is_text(n)) {
            let tail = dom.text(next).unwrap_or_default().to_string();
            if let Some(text) = dom.text_mut(first) {
                text.push_str(&tail);
            }
            dom.detach(next);
        }
    }
}

fn replace_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let c = match c {
            '\r' | '\n' => ' ',
            '\x0b' | '\u{2029}' => '\u{2028}',
            c => c,
        };
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(c);
    }
    out
}
