//! Removal passes: empty paragraphs, highlight marks, and the story tail.

use crate::dom::{Dom, NodeData, NodeId, tags};

/// Delete every `<p>` that holds nothing but whitespace and empty inline
/// wrappers.
pub fn remove_empty_paragraphs(dom: &mut Dom, root: NodeId) {
    let empty = dom.select_all(root, |d, id| d.is_tag(id, "p") && is_empty(d, id));
    for p in empty {
        dom.detach(p);
    }
}

fn is_empty(dom: &Dom, id: NodeId) -> bool {
    dom.descendants(id).into_iter().all(|node| {
        match dom.get(node).map(|n| &n.data) {
            Some(NodeData::Text(text)) => text.trim().is_empty(),
            Some(NodeData::Element { name, .. }) => tags::is_inline(name.local.as_ref()),
            _ => false,
        }
    })
}

/// Replace every `<mark>` with its children.
pub fn strip_marks(dom: &mut Dom, root: NodeId) {
    let marks = dom.select_all(root, |d, id| d.is_tag(id, "mark"));
    for mark in marks {
        dom.unnest(mark);
    }
}

/// Remove the first top-level node reading exactly `marker` and every
/// sibling after it. Tables never count as the marker.
///
/// Returns whether anything was removed.
pub fn remove_tail(dom: &mut Dom, root: NodeId, marker: &str) -> bool {
    let start = dom.children(root).find(|&child| {
        !dom.is_tag(child, "table") && dom.text_content(child).trim() == marker
    });
    let Some(start) = start else {
        return false;
    };

    let mut doomed = vec![start];
    let mut cursor = dom.next_sibling(start);
    while let Some(id) = cursor {
        doomed.push(id);
        cursor = dom.next_sibling(id);
    }
    tracing::debug!(removed = doomed.len(), "removed story tail");
    for id in doomed {
        dom.detach(id);
    }
    true
}
