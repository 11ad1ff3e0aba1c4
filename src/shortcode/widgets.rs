//! Catalog of recognized third-party widgets.
//!
//! Each recognizer inspects one element and either claims it, returning the
//! shortcode to emit, or passes. Recognizers are independent; the first one
//! in [`CATALOG`] that claims an element wins.

use std::sync::LazyLock;

use url::Url;

use super::Shortcode;
use crate::dom::{Dom, NodeId};

/// A widget recognizer.
pub type Recognizer = fn(&Dom, NodeId) -> Option<Shortcode>;

/// Every widget the site can render natively.
pub static CATALOG: &[Recognizer] = &[
    spotlight_widget,
    vimeo,
    youtube,
    flourish,
    datawrapper,
    scribd,
    typeform,
    dewey,
];

/// Newsroom widgets the site generator has templates for.
const SPOTLIGHT_WIDGETS: &[&str] = &[
    "embeds/cta",
    "embeds/donate",
    "embeds/newsletter",
    "embeds/tips",
];

static BASE_URL: LazyLock<Option<Url>> = LazyLock::new(|| Url::parse("https://localhost/").ok());

/// Parse an absolute or site-relative URL.
fn parse_url(src: &str) -> Option<Url> {
    Url::parse(src)
        .ok()
        .or_else(|| BASE_URL.as_ref()?.join(src).ok())
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn iframe_src(dom: &Dom, id: NodeId) -> Option<&str> {
    if dom.is_tag(id, "iframe") {
        dom.get_attr(id, "src")
    } else {
        None
    }
}

/// `<div data-spl-embed-version="1" data-spl-src=".../embeds/TAG/?k=v">`
fn spotlight_widget(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    if !dom.is_tag(id, "div") || dom.get_attr(id, "data-spl-embed-version") != Some("1") {
        return None;
    }
    let url = parse_url(dom.get_attr(id, "data-spl-src")?)?;
    let path = url.path().trim_matches('/');
    if !SPOTLIGHT_WIDGETS.contains(&path) {
        tracing::debug!(path, "ignoring unknown newsroom widget");
        return None;
    }
    let tag = path.strip_prefix("embeds/").unwrap_or(path);

    let shortcode = url
        .query_pairs()
        .fold(Shortcode::new(format!("embed/{tag}")), |code, (k, v)| {
            code.attr(k.into_owned(), v.into_owned())
        });
    Some(shortcode)
}

/// `<iframe src="https://player.vimeo.com/video/ID?h=SECRET">`
fn vimeo(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    let src = iframe_src(dom, id)?;
    if !src.starts_with("https://player.vimeo.com/video/") {
        return None;
    }
    let url = parse_url(src)?;
    let video = url.path().strip_prefix("/video/")?;
    let secret = query_value(&url, "h").unwrap_or_default();
    Some(
        Shortcode::new("vimeo")
            .attr("id", video)
            .attr_if("secret", &secret),
    )
}

/// `<iframe src="https://www.youtube.com/embed/ID?start=N">`, including the
/// privacy-enhanced `youtube-nocookie.com` host.
fn youtube(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    let src = iframe_src(dom, id)?;
    if !src.starts_with("https://www.youtube.com/embed/")
        && !src.starts_with("https://www.youtube-nocookie.com/embed/")
    {
        return None;
    }
    let url = parse_url(src)?;
    let video = url.path().strip_prefix("/embed/")?;
    let start = query_value(&url, "start").unwrap_or_default();
    Some(
        Shortcode::new("youtube")
            .attr("id", video)
            .attr_if("start", &start)
            .attr("loading", "lazy"),
    )
}

/// `<div class="flourish-embed" data-src="visualisation/ID">`
fn flourish(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    if !dom.is_tag(id, "div") || !dom.get_attr(id, "class")?.contains("flourish-embed") {
        return None;
    }
    let src = dom.get_attr(id, "data-src").unwrap_or_default();
    Some(Shortcode::new("flourish").attr("src", src))
}

/// `<iframe src="https://datawrapper.dwcdn.net/ID/N/" height="H">`
fn datawrapper(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    let src = iframe_src(dom, id)?;
    if !src.contains("datawrapper.dwcdn.net") {
        return None;
    }
    let height = dom.get_attr(id, "height").unwrap_or_default();
    Some(
        Shortcode::new("datawrapper")
            .attr("src", src)
            .attr("height", height),
    )
}

/// `<iframe src="https://www.scribd.com/embeds/...">`
fn scribd(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    let src = iframe_src(dom, id)?;
    src.starts_with("https://www.scribd.com/embeds/")
        .then(|| Shortcode::new("scribd").attr("src", src))
}

/// `<div data-tf-live="FORM_ID">`
fn typeform(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    if !dom.is_tag(id, "div") {
        return None;
    }
    let form = dom.get_attr(id, "data-tf-live").filter(|v| !v.is_empty())?;
    Some(Shortcode::new("typeform").attr("id", form))
}

/// The Dewey chat assistant loader script.
fn dewey(dom: &Dom, id: NodeId) -> Option<Shortcode> {
    if !dom.is_tag(id, "script") {
        return None;
    }
    dom.text_content(id)
        .contains("app.askdewey.co")
        .then(|| Shortcode::new("dewey-assistant"))
}
