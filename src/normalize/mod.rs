//! Structural cleanup that turns a parsed document into the canonical tree.
//!
//! ## Pipeline Order
//!
//! 1. **Minify** - drop comments, collapse whitespace, trim block edges
//! 2. **Strip marks** - unwrap `<mark>` highlights
//! 3. **Empty paragraphs** - delete `<p>` with no visible content
//! 4. **Merge** - coalesce adjacent identical inline siblings
//! 5. **Whitespace** - join text nodes, fold line breaks and space runs
//!
//! Marks are unwrapped before merging so runs split by a highlight still
//! merge, and empty paragraphs go before merging so inline runs separated
//! only by an empty paragraph merge too. Running the whole pipeline twice
//! gives the same tree as running it once.

mod merge;
mod prune;
mod vacuum;
mod whitespace;

pub use merge::merge_siblings;
pub use prune::{remove_empty_paragraphs, remove_tail, strip_marks};
pub use vacuum::minify;
pub use whitespace::normalize_whitespace;

use crate::dom::{Dom, NodeId};

/// Run every normalization pass over the subtree at `root`.
pub fn normalize(dom: &mut Dom, root: NodeId) {
    minify(dom, root);
    strip_marks(dom, root);
    remove_empty_paragraphs(dom, root);
    merge_siblings(dom, root);
    normalize_whitespace(dom, root);
}
