//! Table of contents generation.

use crate::dom::{Dom, NodeId, TableRows, serialize, tags};

const DEFAULT_TITLE: &str = "Table of Contents";

/// Deeper than any heading, so the first entry always starts at the root list.
const BELOW_H6: u8 = 7;

/// A heading collected for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocHeader {
    pub text: String,
    pub id: String,
    pub depth: u8,
}

/// Give every heading under `root` an `spl-heading-N` id and collect them in
/// document order. Whitespace in the entry text, line and paragraph
/// separators included, collapses to single spaces.
pub fn collect_headers(dom: &mut Dom, root: NodeId) -> Vec<TocHeader> {
    let headings = dom.select_all(root, |d, id| {
        d.element_name(id).and_then(tags::heading_level).is_some()
    });

    headings
        .into_iter()
        .enumerate()
        .filter_map(|(i, heading)| {
            let depth = dom.element_name(heading).and_then(tags::heading_level)?;
            let id = format!("spl-heading-{}", i + 1);
            dom.set_attr(heading, "id", &id);
            Some(TocHeader {
                text: collapse_whitespace(&dom.text_content(heading)),
                id,
                depth,
            })
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the `<div><h3>title</h3><ul>...</ul></div>` fragment for a `toc`
/// table, tagging the document's headings with anchor ids on the way.
///
/// Nesting follows heading depth: a deeper heading opens a nested list under
/// the previous item (creating an empty item when there is none), a
/// shallower one climbs back out one list per level and stays at the root
/// list when there is nowhere left to climb. At most `limit` entries are
/// listed; the rest collapse into a final "More…" item.
pub fn build_toc(dom: &mut Dom, root: NodeId, rows: &TableRows, limit: usize) -> String {
    let headers = collect_headers(dom, root);

    let title = [rows.text_at(dom, 0, 1), rows.text_at(dom, 1, 0)]
        .into_iter()
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let mut toc = Dom::new();
    let container = toc.new_element("div", &[]);
    toc.append(toc.document(), container);
    let h3 = toc.new_element("h3", &[]);
    toc.append_text(h3, &title);
    toc.append(container, h3);
    let root_list = toc.new_element("ul", &[]);
    toc.append(container, root_list);

    let mut current = root_list;
    let mut last_depth = BELOW_H6;

    for (i, header) in headers.iter().enumerate() {
        if i >= limit {
            let more = toc.new_element("li", &[]);
            toc.append_text(more, "More…");
            toc.append(current, more);
            break;
        }

        for _ in header.depth..last_depth {
            current = toc
                .parent(current)
                .and_then(|p| toc.closest(p, |d, n| d.is_tag(n, "ul")))
                .unwrap_or(current);
        }
        for _ in last_depth..header.depth {
            let item = match toc.last_child(current).filter(|&c| toc.is_tag(c, "li")) {
                Some(item) => item,
                None => {
                    let item = toc.new_element("li", &[]);
                    toc.append(current, item);
                    item
                }
            };
            let nested = toc.new_element("ul", &[]);
            toc.append(item, nested);
            current = nested;
        }

        let item = toc.new_element("li", &[]);
        let p = toc.new_element("p", &[]);
        let href = format!("#{}", header.id);
        let link = toc.new_element("a", &[("href", &href)]);
        toc.append_text(link, &header.text);
        toc.append(p, link);
        toc.append(item, p);
        toc.append(current, item);

        last_depth = header.depth;
    }

    serialize::outer_html(&toc, container)
}
