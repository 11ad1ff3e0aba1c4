//! Story metadata collected from `metadata` / `info` tables.

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, TableRows};
use crate::util::slugify_url;

/// Frontmatter for the story. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub internal_id: String,
    pub byline: String,
    pub budget: String,
    pub hed: String,
    pub description: String,
    pub lede_image: String,
    pub lede_image_credit: String,
    pub lede_image_caption: String,
    pub lede_image_description: String,
    pub url_slug: String,
    pub blurb: String,
    pub link_title: String,
    pub seo_title: String,
    pub og_title: String,
    pub twitter_title: String,
    pub eyebrow: String,
    pub layout: String,
}

/// Replace `slot` only when the table supplied a non-empty value.
fn overlay(slot: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value;
    }
}

fn strip_byline_prefix(byline: String) -> String {
    for prefix in ["By ", "by "] {
        if let Some(rest) = byline.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    byline
}

/// Last path segment of a URL, slugified.
fn slug_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    slugify_url(last)
}

impl Metadata {
    /// Overlay the rows of one metadata table onto `self`.
    ///
    /// Each field takes the first non-empty row among its accepted names.
    /// Fields the table does not mention keep their earlier value.
    pub fn apply_table(&mut self, dom: &Dom, rows: &TableRows) {
        let pick = |names: &[&str]| {
            names
                .iter()
                .map(|name| rows.value_text(dom, name))
                .find(|value| !value.is_empty())
        };

        overlay(&mut self.internal_id, pick(&["slug", "internal id"]));
        overlay(
            &mut self.byline,
            pick(&["byline", "authors", "author", "by"]).map(strip_byline_prefix),
        );
        overlay(&mut self.budget, pick(&["budget"]));
        overlay(&mut self.hed, pick(&["hed", "title", "headline", "hedline"]));
        overlay(
            &mut self.description,
            pick(&["seo description", "description", "desc"]),
        );
        overlay(
            &mut self.lede_image,
            pick(&["lede image path", "lead image path", "path"]),
        );
        overlay(
            &mut self.lede_image_credit,
            pick(&["lede image credit", "lead image credit", "credit"]),
        );
        overlay(
            &mut self.lede_image_caption,
            pick(&["lede image caption", "lead image caption", "caption"]),
        );
        overlay(
            &mut self.lede_image_description,
            pick(&[
                "lede image description",
                "lead image description",
                "lede image alt",
                "lead image alt",
                "alt",
            ]),
        );
        overlay(
            &mut self.url_slug,
            pick(&["url", "keywords"]).map(|url| slug_from_url(&url)),
        );
        overlay(&mut self.blurb, pick(&["blurb", "summary"]));
        overlay(&mut self.link_title, pick(&["link title"]));
        overlay(
            &mut self.seo_title,
            pick(&["seo hed", "seo title", "seo headline", "seo hedline"]),
        );
        overlay(&mut self.og_title, pick(&["facebook hed", "facebook title"]));
        overlay(
            &mut self.twitter_title,
            pick(&["twitter hed", "twitter title"]),
        );
        overlay(&mut self.eyebrow, pick(&["eyebrow", "kicker"]));
        overlay(&mut self.layout, pick(&["layout"]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn apply(metadata: &mut Metadata, html: &str) {
        let dom = parse_fragment(html);
        let table = dom
            .select(dom.document(), |d, id| d.is_tag(id, "table"))
            .expect("table");
        metadata.apply_table(&dom, &TableRows::new(&dom, table));
    }

    #[test]
    fn test_aliases_and_derived_fields() {
        let mut metadata = Metadata::default();
        apply(
            &mut metadata,
            "<table><tr><td>Metadata</td></tr>\
             <tr><td>Title</td><td>Hello</td></tr>\
             <tr><td>Author</td><td>By Jane Doe</td></tr>\
             <tr><td>URL</td><td>https://example.com/news/The-PA-Budget/</td></tr>\
             <tr><td>Kicker</td><td>Politics</td></tr></table>",
        );
        assert_eq!(metadata.hed, "Hello");
        assert_eq!(metadata.byline, "Jane Doe");
        assert_eq!(metadata.url_slug, "pennsylvania-budget");
        assert_eq!(metadata.eyebrow, "Politics");
        assert_eq!(metadata.budget, "");
    }

    #[test]
    fn test_first_non_empty_alias_wins() {
        let mut metadata = Metadata::default();
        apply(
            &mut metadata,
            "<table><tr><td>info</td></tr>\
             <tr><td>hed</td><td> </td></tr>\
             <tr><td>headline</td><td>Backup</td></tr>\
             <tr><td>title</td><td>Preferred</td></tr></table>",
        );
        assert_eq!(metadata.hed, "Preferred");
    }

    #[test]
    fn test_later_tables_overlay() {
        let mut metadata = Metadata::default();
        apply(
            &mut metadata,
            "<table><tr><td>metadata</td></tr><tr><td>hed</td><td>First</td></tr>\
             <tr><td>blurb</td><td>Kept</td></tr></table>",
        );
        apply(
            &mut metadata,
            "<table><tr><td>metadata</td></tr><tr><td>hed</td><td>Second</td></tr></table>",
        );
        assert_eq!(metadata.hed, "Second");
        assert_eq!(metadata.blurb, "Kept");
    }
}
