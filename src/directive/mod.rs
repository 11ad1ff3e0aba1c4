//! Directive tables.
//!
//! Editors steer the compiler with ordinary Google Docs tables whose first
//! cell names what the table is for: story metadata, an embed, an image, a
//! table of contents, and so on. [`scan`] walks every such table in reading
//! order, lifts out what it describes, and leaves a `<data>` placeholder (or
//! nothing) in its place.

mod image;
mod metadata;
mod toc;

pub use image::read_image;
pub use metadata::Metadata;
pub use toc::{TocHeader, build_toc, collect_headers};

use crate::dom::{Dom, NodeId, TableRows, serialize};
use crate::embed::{DataTag, DataTagKind, Embed, EmbedValue, ImageKind};
use crate::error::Result;
use crate::markdown::blockize;
use crate::normalize::normalize;
use crate::warnings::{embed_warnings, is_balanced};

/// What a table's label asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Raw,
    SpotlightRaw,
    SpotlightText,
    PartnerRaw,
    PartnerText,
    Image(ImageKind),
    Metadata,
    Comment,
    /// An ordinary data table; only its label row is dropped.
    Table,
    Toc,
    Unknown,
}

impl Directive {
    /// Interpret a lowercased, trimmed table label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "html" | "embed" | "raw" | "script" => Directive::Raw,
            "spl" | "spl-embed" => Directive::SpotlightRaw,
            "spl-text" => Directive::SpotlightText,
            "partner-embed" => Directive::PartnerRaw,
            "partner-text" => Directive::PartnerText,
            "metadata" | "info" => Directive::Metadata,
            "comment" | "ignore" | "note" => Directive::Comment,
            "table" => Directive::Table,
            "toc" | "table of contents" => Directive::Toc,
            other => ImageKind::from_label(other).map_or(Directive::Unknown, Directive::Image),
        }
    }
}

/// Everything the directive tables contributed.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub metadata: Metadata,
    pub embeds: Vec<Embed>,
    pub warnings: Vec<String>,
}

/// Process every directive table under `body`, in document order.
///
/// Embed numbers start at 1 and advance once per published embed, so they
/// follow reading order. Images marked for the newsroom site only reuse the
/// current number without advancing it.
pub fn scan(dom: &mut Dom, body: NodeId, toc_limit: usize) -> Result<ScanOutput> {
    let mut out = ScanOutput::default();
    let mut n = 1;

    let tables = dom.select_all(body, |d, id| d.is_tag(id, "table"));
    for table in tables {
        // An earlier directive may have taken this table with it.
        if dom.closest(table, |_, id| id == body).is_none() {
            continue;
        }

        let rows = TableRows::new(dom, table);
        let label = rows.label(dom);
        let directive = Directive::from_label(&label);
        tracing::trace!(n, label = %label, ?directive, "directive table");

        let embed = match directive {
            Directive::Raw | Directive::PartnerRaw => {
                let html = rows.text_at(dom, 1, 0);
                out.warnings.extend(embed_warnings(n, &html));
                Some(if directive == Directive::Raw {
                    EmbedValue::Raw(html)
                } else {
                    EmbedValue::PartnerRaw(html)
                })
            }
            Directive::SpotlightRaw => {
                let html = rows.text_at(dom, 1, 0);
                if !html.contains("{{<") && !is_balanced(&html) {
                    out.warnings
                        .push("Spotlight PA embed seems to contain unbalanced HTML.".to_string());
                }
                replace_with_tag(dom, table, &DataTag::new(DataTagKind::SpotlightRaw, html));
                None
            }
            Directive::SpotlightText => {
                let markdown = render_cell(dom, &rows, blockize);
                replace_with_tag(dom, table, &DataTag::new(DataTagKind::SpotlightText, markdown));
                None
            }
            Directive::PartnerText => {
                let html = render_cell(dom, &rows, serialize::inner_html_blocks);
                replace_with_tag(dom, table, &DataTag::new(DataTagKind::PartnerText, html));
                None
            }
            Directive::Image(kind) => {
                match read_image(dom, &rows, kind) {
                    None => {
                        dom.detach(table);
                        out.warnings.push(format!("Table {n} missing image"));
                    }
                    Some(image) => {
                        if image.description.trim().is_empty() {
                            out.warnings
                                .push(format!("Image embed #{n} missing alt description."));
                        }
                        let embed = Embed::new(n, EmbedValue::Image(image));
                        replace_with_tag(dom, table, &DataTag::for_embed(&embed)?);
                        if kind != ImageKind::Spl {
                            out.embeds.push(embed);
                            n += 1;
                        }
                    }
                }
                None
            }
            Directive::Metadata => {
                out.metadata.apply_table(dom, &rows);
                dom.detach(table);
                None
            }
            Directive::Comment => {
                dom.detach(table);
                None
            }
            Directive::Table => {
                if let Some(row) = rows
                    .at(0, 0)
                    .and_then(|cell| dom.closest(cell, |d, id| d.is_tag(id, "tr")))
                {
                    dom.detach(row);
                }
                None
            }
            Directive::Toc => Some(EmbedValue::Toc(build_toc(dom, body, &rows, toc_limit))),
            Directive::Unknown => {
                out.warnings
                    .push(format!("Unrecognized table type: {label:?}"));
                dom.detach(table);
                None
            }
        };

        if let Some(value) = embed {
            let embed = Embed::new(n, value);
            replace_with_tag(dom, table, &DataTag::for_embed(&embed)?);
            out.embeds.push(embed);
            n += 1;
        }
    }

    tracing::debug!(
        embeds = out.embeds.len(),
        warnings = out.warnings.len(),
        "scanned directive tables"
    );
    Ok(out)
}

fn replace_with_tag(dom: &mut Dom, table: NodeId, tag: &DataTag) {
    let element = tag.to_element(dom);
    dom.replace_with(table, element);
}

/// Clean a copy of the table's content cell and render it with `render`.
fn render_cell<F>(dom: &Dom, rows: &TableRows, render: F) -> String
where
    F: FnOnce(&Dom, NodeId) -> String,
{
    let Some(cell) = rows.at(1, 0) else {
        return String::new();
    };
    let mut fragment = dom.fragment(cell);
    let root = fragment.document();
    normalize(&mut fragment, root);
    render(&fragment, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;
    use crate::embed::data_tags;

    fn scanned(body: &str) -> (Dom, NodeId, ScanOutput) {
        let mut dom = parse_document(&format!("<html><body>{body}</body></html>"));
        let body = dom.body().expect("body");
        let out = scan(&mut dom, body, 100).expect("scan");
        (dom, body, out)
    }

    fn table(label: &str, rows: &[(&str, &str)]) -> String {
        let mut html = format!("<table><tr><td>{label}</td></tr>");
        for (k, v) in rows {
            html.push_str(&format!("<tr><td>{k}</td><td>{v}</td></tr>"));
        }
        html.push_str("</table>");
        html
    }

    #[test]
    fn test_labels() {
        assert_eq!(Directive::from_label("script"), Directive::Raw);
        assert_eq!(Directive::from_label("spl-embed"), Directive::SpotlightRaw);
        assert_eq!(
            Directive::from_label("photo-left"),
            Directive::Image(ImageKind::Left)
        );
        assert_eq!(Directive::from_label("table of contents"), Directive::Toc);
        assert_eq!(Directive::from_label("sidebar"), Directive::Unknown);
    }

    #[test]
    fn test_raw_embed_numbering() {
        let (dom, body, out) = scanned(
            "<table><tr><td>html</td></tr><tr><td>&lt;div&gt;one&lt;/div&gt;</td></tr></table>\
             <p>between</p>\
             <table><tr><td>embed</td></tr><tr><td>&lt;div&gt;two</td></tr></table>",
        );
        assert_eq!(out.embeds.len(), 2);
        assert_eq!(out.embeds[0], Embed::new(1, EmbedValue::Raw("<div>one</div>".into())));
        assert_eq!(out.embeds[1].n, 2);
        assert_eq!(
            out.warnings,
            vec!["Embed #2 seems to contain unbalanced HTML.".to_string()]
        );
        assert_eq!(data_tags(&dom, body, DataTagKind::DbEmbed).len(), 2);
        assert!(dom.select(body, |d, id| d.is_tag(id, "table")).is_none());
    }

    #[test]
    fn test_metadata_and_comments_removed() {
        let html = format!(
            "{}{}<p>Body</p>",
            table("Metadata", &[("hed", "Hello"), ("byline", "by Sam")]),
            table("note", &[("anything", "goes")]),
        );
        let (dom, body, out) = scanned(&html);
        assert_eq!(out.metadata.hed, "Hello");
        assert_eq!(out.metadata.byline, "Sam");
        assert!(out.embeds.is_empty());
        assert!(out.warnings.is_empty());
        assert_eq!(serialize::inner_html(&dom, body), "<p>Body</p>");
    }

    #[test]
    fn test_image_missing_path() {
        let (dom, body, out) = scanned(&table("photo", &[("credit", "Jane")]));
        assert!(out.embeds.is_empty());
        assert_eq!(out.warnings, vec!["Table 1 missing image".to_string()]);
        assert_eq!(serialize::inner_html(&dom, body), "");
    }

    #[test]
    fn test_spl_image_does_not_consume_number() {
        let html = format!(
            "{}{}",
            table("spl-photo", &[("path", "a.jpg"), ("alt", "A")]),
            table("photo", &[("path", "b.jpg")]),
        );
        let (dom, body, out) = scanned(&html);
        assert_eq!(out.embeds.len(), 1);
        assert_eq!(out.embeds[0].n, 1);
        assert_eq!(
            out.warnings,
            vec!["Image embed #1 missing alt description.".to_string()]
        );
        let tags = data_tags(&dom, body, DataTagKind::DbEmbed);
        assert_eq!(tags.len(), 2);
        assert!(tags[0].1.embed().expect("embed").is_internal_image());
    }

    #[test]
    fn test_spotlight_text_is_rendered() {
        let (dom, body, _) = scanned(
            "<table><tr><td>spl-text</td></tr><tr><td><p>Hello <b>there</b></p><p>Again</p></td></tr></table>",
        );
        let tags = data_tags(&dom, body, DataTagKind::SpotlightText);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].1.value, "Hello <b>there</b>\n\nAgain\n");
    }

    #[test]
    fn test_spotlight_raw_warning() {
        let (_, _, out) = scanned(&table("spl", &[]).replace(
            "</table>",
            "<tr><td>&lt;div&gt;</td></tr></table>",
        ));
        assert_eq!(
            out.warnings,
            vec!["Spotlight PA embed seems to contain unbalanced HTML.".to_string()]
        );
    }

    #[test]
    fn test_plain_table_keeps_data_rows() {
        let (dom, body, out) = scanned(&table("table", &[("a", "b")]));
        assert!(out.warnings.is_empty());
        assert_eq!(
            serialize::inner_html(&dom, body),
            "<table><tbody><tr><td>a</td><td>b</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_unknown_label() {
        let (_, _, out) = scanned(&table("Sidebar", &[]));
        assert_eq!(
            out.warnings,
            vec!["Unrecognized table type: \"sidebar\"".to_string()]
        );
    }

    #[test]
    fn test_toc_embed() {
        let html = format!("{}<h2>First</h2><p>x</p>", table("toc", &[]));
        let (dom, body, out) = scanned(&html);
        assert_eq!(out.embeds.len(), 1);
        match &out.embeds[0].value {
            EmbedValue::Toc(html) => assert!(html.contains("href=\"#spl-heading-1\"")),
            other => panic!("expected toc, got {other:?}"),
        }
        let h2 = dom.select(body, |d, id| d.is_tag(id, "h2")).expect("h2");
        assert_eq!(dom.get_attr(h2, "id"), Some("spl-heading-1"));
    }
}
