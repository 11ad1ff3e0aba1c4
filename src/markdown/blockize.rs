//! Block-level Markdown rendering of a normalized tree.

use crate::dom::{Dom, NodeId, serialize, tags};

/// Render the children of `root` as Markdown blocks.
///
/// Paragraphs, headings and lists become Markdown; every other node is kept
/// as literal HTML, which Markdown passes through. Blocks are separated by a
/// blank line and the output ends with a single newline. Trailing newlines
/// inside a block are dropped, and blank blocks are skipped.
///
/// ```
/// use newsdoc::dom::parse_fragment;
/// use newsdoc::markdown::blockize;
///
/// let dom = parse_fragment("<h2>Title</h2><p>Some <b>bold</b> text</p><ol><li>one</li><li>two</li></ol>");
/// assert_eq!(
///     blockize(&dom, dom.document()),
///     "## Title\n\nSome <b>bold</b> text\n\n1. one\n2. two\n"
/// );
/// ```
pub fn blockize(dom: &Dom, root: NodeId) -> String {
    let blocks: Vec<String> = dom
        .children(root)
        .map(|child| block_lines(dom, child).join("\n"))
        .map(|block| block.trim_end_matches('\n').to_string())
        .filter(|block| !block.trim().is_empty())
        .collect();
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// Lines of one block. Only lists produce more than one line.
fn block_lines(dom: &Dom, id: NodeId) -> Vec<String> {
    let Some(tag) = dom.element_name(id).filter(|t| tags::is_markdown_block(t)) else {
        return vec![serialize::outer_html(dom, id)];
    };

    match tag {
        "ul" | "ol" => list_lines(dom, id, tag == "ol"),
        "p" => vec![contents(dom, id)],
        _ => {
            if dom.get_attr(id, "id").is_some() {
                return vec![substitute(&serialize::outer_html(dom, id))];
            }
            let level = tags::heading_level(tag).unwrap_or(1);
            vec![format!("{} {}", "#".repeat(level.into()), contents(dom, id))]
        }
    }
}

fn contents(dom: &Dom, id: NodeId) -> String {
    substitute(serialize::inner_html(dom, id).trim())
}

fn substitute(html: &str) -> String {
    html.replace('\u{2028}', "<br/>")
}

/// Text, inline elements and line breaks flow together on one line.
fn is_inline_content(dom: &Dom, id: NodeId) -> bool {
    dom.is_text(id)
        || dom
            .element_name(id)
            .is_some_and(|tag| tags::is_inline(tag) || tag == "br")
}

fn list_lines(dom: &Dom, list: NodeId, ordered: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut counter = 0;

    for item in dom.children(list) {
        counter += 1;
        let marker = if ordered {
            format!("{counter}. ")
        } else {
            "- ".to_string()
        };
        let indent = " ".repeat(marker.len());

        let item_lines = item_lines(dom, item);
        for (i, line) in item_lines.into_iter().enumerate() {
            let prefix = if i == 0 { &marker } else { &indent };
            lines.push(format!("{prefix}{line}"));
        }
    }
    lines
}

/// Lines inside one list item, before the marker is added.
fn item_lines(dom: &Dom, item: NodeId) -> Vec<String> {
    let mut lines = Vec::new();
    let mut run = String::new();

    let flush = |run: &mut String, lines: &mut Vec<String>| {
        let line = substitute(run.trim());
        if !line.is_empty() {
            lines.push(line);
        }
        run.clear();
    };

    for child in dom.children(item) {
        if is_inline_content(dom, child) {
            run.push_str(&serialize::outer_html(dom, child));
        } else {
            flush(&mut run, &mut lines);
            lines.extend(block_lines(dom, child));
        }
    }
    flush(&mut run, &mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn md(html: &str) -> String {
        let dom = parse_fragment(html);
        blockize(&dom, dom.document())
    }

    #[test]
    fn test_paragraphs_and_headings() {
        assert_eq!(
            md("<h1>Top</h1><p> One </p><h6>Small</h6>"),
            "# Top\n\nOne\n\n###### Small\n"
        );
    }

    #[test]
    fn test_heading_with_id_kept_literal() {
        assert_eq!(
            md("<h2 id=\"spl-heading-1\">Anchored</h2>"),
            "<h2 id=\"spl-heading-1\">Anchored</h2>\n"
        );
    }

    #[test]
    fn test_heading_with_id_soft_break() {
        assert_eq!(
            md("<h2 id=\"spl-heading-1\">One\u{2028}Two</h2>"),
            "<h2 id=\"spl-heading-1\">One<br/>Two</h2>\n"
        );
    }

    #[test]
    fn test_raw_block_trailing_newlines() {
        let mut dom = parse_fragment("<p>Body</p>");
        let root = dom.document();
        let raw = dom.create_raw("Site only\n".to_string());
        dom.append(root, raw);
        assert_eq!(blockize(&dom, root), "Body\n\nSite only\n");
    }

    #[test]
    fn test_empty_blocks_skipped() {
        let mut dom = parse_fragment("<p>a</p><p>b</p>");
        let root = dom.document();
        let second = dom.last_child(root).expect("second paragraph");
        let raw = dom.create_raw(String::new());
        dom.insert_before(second, raw);
        assert_eq!(blockize(&dom, root), "a\n\nb\n");
    }

    #[test]
    fn test_non_block_passthrough() {
        assert_eq!(
            md("<div class=\"x\">Hi</div><p>a</p>"),
            "<div class=\"x\">Hi</div>\n\na\n"
        );
    }

    #[test]
    fn test_substitutions() {
        assert_eq!(
            md("<p>one\u{2028}two\u{a0}three</p>"),
            "one<br/>two&nbsp;three\n"
        );
    }

    #[test]
    fn test_list_item_inline_run() {
        assert_eq!(
            md("<ul><li>Read <a href=\"/x\">this</a> now</li><li><b>Bold</b></li></ul>"),
            "- Read <a href=\"/x\">this</a> now\n- <b>Bold</b>\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(md(""), "\n");
    }
}
