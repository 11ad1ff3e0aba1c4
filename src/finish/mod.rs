//! Finishers: turning the intermediate tree into each output.
//!
//! After scanning and normalization the body still holds `<data>`
//! placeholders. Each finisher runs on its own copy of the tree and resolves
//! every placeholder for its audience:
//!
//! | Placeholder     | Rich text        | Raw HTML         | Markdown                 |
//! |-----------------|------------------|------------------|--------------------------|
//! | `spl`           | removed          | removed          | recognized shortcodes    |
//! | `spl-text`      | removed          | removed          | pre-rendered Markdown    |
//! | `partner-text`  | literal HTML     | literal HTML     | expanded into the tree   |
//! | raw embed       | red placeholder  | literal HTML     | recognized shortcodes    |
//! | partner embed   | red placeholder  | literal HTML     | literal HTML             |
//! | table of contents | red placeholder | literal HTML    | literal HTML             |
//! | image           | red placeholder  | red placeholder  | `picture` shortcode      |
//!
//! Images reserved for the newsroom site are removed from both partner
//! outputs. A placeholder that survives a finisher is an internal error.

mod markdown;
mod raw;
mod rich;

pub use markdown::markdown;
pub use raw::raw_html;
pub use rich::rich_text;

use crate::dom::{Dom, NodeId, serialize};
use crate::embed::{DataTag, DataTagKind, data_tags};
use crate::error::{Error, Result};

/// Detach every placeholder of `kind`.
fn remove_tags(dom: &mut Dom, root: NodeId, kind: DataTagKind) {
    for (id, _) in data_tags(dom, root, kind) {
        dom.detach(id);
    }
}

/// Swap a placeholder for literal HTML.
fn replace_with_raw(dom: &mut Dom, id: NodeId, html: String) {
    let raw = dom.create_raw(html);
    dom.replace_with(id, raw);
}

/// Replace every placeholder of `kind` with literal HTML built from its value.
fn replace_tags<F>(dom: &mut Dom, root: NodeId, kind: DataTagKind, mut render: F)
where
    F: FnMut(DataTag) -> String,
{
    for (id, tag) in data_tags(dom, root, kind) {
        let html = render(tag);
        replace_with_raw(dom, id, html);
    }
}

/// The red "Embed #N" heading partners see where an embed goes.
fn embed_placeholder(dom: &mut Dom, id: NodeId, n: usize) {
    let heading = dom.new_element("h2", &[("style", "color: red;")]);
    dom.append_text(heading, &format!("Embed #{n}"));
    dom.replace_with(id, heading);
}

/// Fail if any `<data>` element is still in the tree.
fn ensure_resolved(dom: &Dom, root: NodeId) -> Result<()> {
    match dom.select(root, |d, id| d.is_tag(id, "data")) {
        Some(leftover) => Err(Error::UnresolvedPlaceholder(serialize::outer_html(
            dom, leftover,
        ))),
        None => Ok(()),
    }
}
