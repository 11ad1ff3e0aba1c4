//! Markdown block rendering of lists and mixed content.

use newsdoc::dom::parse_fragment;
use newsdoc::markdown::blockize;

fn md(html: &str) -> String {
    let dom = parse_fragment(html);
    blockize(&dom, dom.document())
}

#[test]
fn test_nested_unordered_list() {
    let html = "<p>Shopping:</p>\
        <ul>\
        <li>Fruit<ul><li>Apple</li><li>Pear</li></ul></li>\
        <li>Vegetables</li>\
        <li>Bread</li>\
        </ul>\
        <p>That is all.</p>";
    assert_eq!(
        md(html),
        "Shopping:\n\n- Fruit\n  - Apple\n  - Pear\n- Vegetables\n- Bread\n\nThat is all.\n"
    );
}

#[test]
fn test_ordered_list_indents_by_marker_width() {
    let html = "<ol>\
        <li>One</li><li>Two</li><li>Three</li><li>Four</li><li>Five</li>\
        <li>Six</li><li>Seven</li><li>Eight</li><li>Nine</li>\
        <li>Ten<ul><li>nested</li></ul></li>\
    </ol>";
    let out = md(html);
    assert!(out.starts_with("1. One\n2. Two\n"));
    assert!(out.ends_with("10. Ten\n    - nested\n"));
}

#[test]
fn test_ordered_inside_unordered() {
    let html = "<ul><li>Steps<ol><li>Open</li><li>Close</li></ol></li></ul>";
    assert_eq!(md(html), "- Steps\n  1. Open\n  2. Close\n");
}

#[test]
fn test_list_item_with_paragraphs() {
    let html = "<ul><li><p>First para</p><p>Second para</p></li></ul>";
    assert_eq!(md(html), "- First para\n  Second para\n");
}

#[test]
fn test_list_is_one_block() {
    let html = "<p>Intro</p><ul><li>a</li><li>b</li></ul><p>Outro</p>";
    assert_eq!(md(html), "Intro\n\n- a\n- b\n\nOutro\n");
}

#[test]
fn test_line_breaks_inside_items() {
    let html = "<ul><li>line one\u{2028}line two</li></ul>";
    assert_eq!(md(html), "- line one<br/>line two\n");
}

#[test]
fn test_deterministic() {
    let html = "<h3>Hi</h3><ol><li>x<ul><li>y</li></ul></li></ol><div>raw</div>";
    assert_eq!(md(html), md(html));
    assert_eq!(md(html), "### Hi\n\n1. x\n   - y\n\n<div>raw</div>\n");
}
