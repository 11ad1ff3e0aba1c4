//! Adjacent inline sibling merging.

use crate::dom::{Dom, NodeId, tags};

/// Merge adjacent inline siblings that share a tag and attribute list.
///
/// Google Docs splits formatting runs freely, so one bold phrase often
/// arrives as several consecutive `<b>` elements:
/// ```html
/// <b>Hello, </b><b>World</b>
/// ```
/// becomes
/// ```html
/// <b>Hello, World</b>
/// ```
///
/// Matches are collected first, then merged right-to-left so chains of three
/// or more collapse into the leftmost element. Merging can make the children
/// of the merged elements adjacent, so passes repeat until nothing changes.
pub fn merge_siblings(dom: &mut Dom, root: NodeId) {
    loop {
        let mergeable = dom.select_all(root, |d, id| {
            d.next_sibling(id)
                .is_some_and(|next| can_merge(d, id, next))
        });
        if mergeable.is_empty() {
            return;
        }

        for id in mergeable.into_iter().rev() {
            if let Some(next) = dom.next_sibling(id).filter(|&n| can_merge(dom, id, n)) {
                dom.adopt_children(id, next);
                dom.detach(next);
            }
        }
    }
}

fn can_merge(dom: &Dom, left: NodeId, right: NodeId) -> bool {
    let Some(tag) = dom.element_name(left) else {
        return false;
    };
    tags::is_inline(tag) && dom.element_name(right) == Some(tag) && dom.attrs(left) == dom.attrs(right)
}
