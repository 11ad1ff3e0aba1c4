//! Image directive tables.

use crate::dom::{Dom, TableRows};
use crate::embed::{ImageDescriptor, ImageKind};

/// Read an image table. Returns `None` when the table has no `path` row.
///
/// Unparsable `width` / `height` values read as 0.
pub fn read_image(dom: &Dom, rows: &TableRows, kind: ImageKind) -> Option<ImageDescriptor> {
    let path = rows.value_text(dom, "path");
    if path.is_empty() {
        return None;
    }
    let number = |name: &str| rows.value_text(dom, name).parse::<u32>().unwrap_or(0);

    let description = match rows.value_text(dom, "description") {
        d if d.is_empty() => rows.value_text(dom, "alt"),
        d => d,
    };

    Some(ImageDescriptor {
        path,
        credit: rows.value_text(dom, "credit"),
        caption: rows.value_text(dom, "caption"),
        description,
        width: number("width"),
        height: number("height"),
        kind,
    })
}
