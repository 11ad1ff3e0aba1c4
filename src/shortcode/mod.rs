//! Rewriting raw embed HTML into static-site shortcodes.
//!
//! The site generator understands a handful of `{{<tag k="v">}}` shortcodes
//! for widgets it knows how to render natively. [`recognize`] looks for
//! those widgets in a blob of pasted embed code and emits one shortcode per
//! match. Anything unrecognized is wrapped whole in an opaque
//! `{{<embed/raw srcdoc="...">}}` so no embed is ever lost.

mod widgets;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::dom::parse_fragment;

pub use widgets::{CATALOG, Recognizer};

/// A shortcode invocation with its attributes kept in key order.
///
/// Repeating a key appends another value; repeated values are written in
/// the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode {
    tag: String,
    attrs: BTreeMap<String, Vec<String>>,
}

impl Shortcode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Add the attribute only when `value` is non-empty.
    pub fn attr_if(self, key: impl Into<String>, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.attr(key, value)
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{<{}", self.tag)?;
        for (key, values) in &self.attrs {
            for value in values {
                write!(f, " {}=\"{}\"", key, escape_attr(value))?;
            }
        }
        f.write_str(">}}")
    }
}

/// Escape a shortcode attribute value.
///
/// Newlines become the literal sequence `&#10;` so a shortcode always fits
/// on one line.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(c),
        }
    }
    out
}

static FUNDRAISEUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^\s*<a href="#(\w+)" style="display: none"></a>\s*$"##).expect("valid regex")
});

/// Rewrite raw embed HTML as shortcodes.
///
/// - empty input stays empty;
/// - text that already contains a shortcode passes through unchanged, so
///   `recognize(recognize(x)) == recognize(x)`;
/// - every element matched by a widget in [`CATALOG`] yields one shortcode,
///   newline-joined in source order;
/// - with no matches the whole input becomes `{{<embed/raw srcdoc="...">}}`.
///
/// ```
/// use newsdoc::shortcode::recognize;
///
/// let html = r#"<div data-tf-live="01HFS5TP"></div><script src="//embed.typeform.com/next/embed.js"></script>"#;
/// assert_eq!(recognize(html), r#"{{<typeform id="01HFS5TP">}}"#);
/// assert_eq!(recognize("Hello"), r#"{{<embed/raw srcdoc="Hello">}}"#);
/// ```
pub fn recognize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.contains("{{<") && raw.contains(">}}") {
        return raw.to_string();
    }
    if let Some(caps) = FUNDRAISEUP_RE.captures(raw) {
        return Shortcode::new("fundraiseup")
            .attr("id", &caps[1])
            .to_string();
    }

    let dom = parse_fragment(raw);
    let found: Vec<String> = dom
        .descendants(dom.document())
        .into_iter()
        .filter_map(|id| CATALOG.iter().find_map(|recognizer| recognizer(&dom, id)))
        .map(|shortcode| shortcode.to_string())
        .collect();

    tracing::trace!(widgets = found.len(), "recognized embed widgets");

    if found.is_empty() {
        Shortcode::new("embed/raw").attr("srcdoc", raw).to_string()
    } else {
        found.join("\n")
    }
}
