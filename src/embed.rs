//! Embeds and the placeholder elements that carry them through the tree.
//!
//! An [`Embed`] is a numbered artifact lifted out of the document: raw HTML,
//! an image, or a generated table of contents. While the document is being
//! compiled each one sits in the tree as a `<data type="db-embed">` element
//! (a [`DataTag`]) holding the embed's JSON, until a finisher swaps it for
//! its final rendering.

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, NodeId};
use crate::error::Result;

/// A numbered embed. `n` counts from 1 in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub n: usize,
    #[serde(flatten)]
    pub value: EmbedValue,
}

/// Payload of an embed, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum EmbedValue {
    /// Third-party HTML (scripts, iframes, widgets).
    Raw(String),
    Image(ImageDescriptor),
    /// Generated table of contents fragment.
    Toc(String),
    /// HTML shown only to partner outlets.
    #[serde(alias = "partner-embed")]
    PartnerRaw(String),
}

impl EmbedValue {
    /// The JSON `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            EmbedValue::Raw(_) => "raw",
            EmbedValue::Image(_) => "image",
            EmbedValue::Toc(_) => "toc",
            EmbedValue::PartnerRaw(_) => "partner-raw",
        }
    }
}

impl Embed {
    pub fn new(n: usize, value: EmbedValue) -> Self {
        Self { n, value }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether this embed is an image reserved for the newsroom's own site.
    pub fn is_internal_image(&self) -> bool {
        matches!(&self.value, EmbedValue::Image(img) if img.kind == ImageKind::Spl)
    }
}

/// Placement of an image, taken from the directive label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Shown everywhere (`photo`, `image`, ...).
    #[default]
    All,
    /// Newsroom site only; never sent to partners.
    Spl,
    /// Partner outlets only.
    Partner,
    Wide,
    Left,
    Right,
}

impl ImageKind {
    /// Kind for an image directive label, or `None` if `label` is not one.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "photo" | "image" | "photograph" | "illustration" | "illo" => Some(ImageKind::All),
            "spl-photo" | "spl-image" => Some(ImageKind::Spl),
            "partner-photo" | "partner-image" => Some(ImageKind::Partner),
            "picture-wide" | "photo-wide" => Some(ImageKind::Wide),
            "picture-left" | "photo-left" => Some(ImageKind::Left),
            "picture-right" | "photo-right" => Some(ImageKind::Right),
            _ => None,
        }
    }
}

/// An image embed. `width == 0` means the dimensions are unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub path: String,
    pub credit: String,
    pub caption: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub kind: ImageKind,
}

/// Kinds of placeholder elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTagKind {
    /// Raw HTML for the newsroom site only.
    SpotlightRaw,
    /// Pre-rendered Markdown for the newsroom site only.
    SpotlightText,
    /// Block HTML for partners only.
    PartnerText,
    /// A serialized [`Embed`].
    DbEmbed,
}

impl DataTagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DataTagKind::SpotlightRaw => "spl",
            DataTagKind::SpotlightText => "spl-text",
            DataTagKind::PartnerText => "partner-text",
            DataTagKind::DbEmbed => "db-embed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spl" => Some(DataTagKind::SpotlightRaw),
            "spl-text" => Some(DataTagKind::SpotlightText),
            "partner-text" => Some(DataTagKind::PartnerText),
            "db-embed" => Some(DataTagKind::DbEmbed),
            _ => None,
        }
    }
}

/// A `<data type=".." value="..">` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTag {
    pub kind: DataTagKind,
    pub value: String,
}

impl DataTag {
    pub fn new(kind: DataTagKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Placeholder carrying the JSON of `embed`.
    pub fn for_embed(embed: &Embed) -> Result<Self> {
        Ok(Self::new(DataTagKind::DbEmbed, embed.to_json()?))
    }

    /// Decode the embed held by a `db-embed` placeholder.
    pub fn embed(&self) -> Result<Embed> {
        Embed::from_json(&self.value)
    }

    /// Create the detached `<data>` element for this placeholder.
    pub fn to_element(&self, dom: &mut Dom) -> NodeId {
        dom.new_element(
            "data",
            &[("type", self.kind.as_str()), ("value", &self.value)],
        )
    }

    /// Read a placeholder back from a `<data>` element.
    pub fn from_element(dom: &Dom, id: NodeId) -> Option<Self> {
        if !dom.is_tag(id, "data") {
            return None;
        }
        let kind = DataTagKind::parse(dom.get_attr(id, "type")?)?;
        let value = dom.get_attr(id, "value").unwrap_or_default();
        Some(Self::new(kind, value))
    }
}

/// Every placeholder of `kind` under `root`, in document order.
pub fn data_tags(dom: &Dom, root: NodeId, kind: DataTagKind) -> Vec<(NodeId, DataTag)> {
    dom.select_all(root, |d, id| d.is_tag(id, "data"))
        .into_iter()
        .filter_map(|id| DataTag::from_element(dom, id).map(|tag| (id, tag)))
        .filter(|(_, tag)| tag.kind == kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_json_shape() {
        let embed = Embed::new(
            1,
            EmbedValue::Image(ImageDescriptor {
                path: "2024/01/cat.jpg".into(),
                credit: "Jane Doe".into(),
                caption: "A cat".into(),
                description: "Orange cat".into(),
                width: 1200,
                height: 800,
                kind: ImageKind::All,
            }),
        );
        assert_eq!(
            embed.to_json().unwrap(),
            r#"{"n":1,"type":"image","value":{"path":"2024/01/cat.jpg","credit":"Jane Doe","caption":"A cat","description":"Orange cat","width":1200,"height":800,"kind":"all"}}"#
        );
    }

    #[test]
    fn test_partner_embed_alias() {
        let embed = Embed::from_json(r#"{"n":3,"type":"partner-embed","value":"<p>x</p>"}"#).unwrap();
        assert_eq!(embed.value, EmbedValue::PartnerRaw("<p>x</p>".into()));
        assert!(embed.to_json().unwrap().contains(r#""type":"partner-raw""#));
    }

    #[test]
    fn test_unknown_type_is_error() {
        let err = Embed::from_json(r#"{"n":1,"type":"video","value":"x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_image_kind_defaults() {
        let embed = Embed::from_json(
            r#"{"n":2,"type":"image","value":{"path":"p","credit":"","caption":"","description":"","width":0,"height":0}}"#,
        )
        .unwrap();
        assert!(!embed.is_internal_image());
        match embed.value {
            EmbedValue::Image(img) => assert_eq!(img.kind, ImageKind::All),
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_data_tag_element_round_trip() {
        let mut dom = Dom::new();
        let tag = DataTag::new(DataTagKind::SpotlightText, "Some *text*\n");
        let el = tag.to_element(&mut dom);
        dom.append(dom.document(), el);

        assert_eq!(DataTag::from_element(&dom, el), Some(tag));
        assert_eq!(data_tags(&dom, dom.document(), DataTagKind::SpotlightText).len(), 1);
        assert!(data_tags(&dom, dom.document(), DataTagKind::DbEmbed).is_empty());
    }

    #[test]
    fn test_image_label_kinds() {
        assert_eq!(ImageKind::from_label("illo"), Some(ImageKind::All));
        assert_eq!(ImageKind::from_label("spl-image"), Some(ImageKind::Spl));
        assert_eq!(ImageKind::from_label("photo-right"), Some(ImageKind::Right));
        assert_eq!(ImageKind::from_label("metadata"), None);
    }
}
