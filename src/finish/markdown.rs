use crate::dom::{Dom, NodeId, parse_fragment};
use crate::embed::{DataTagKind, EmbedValue, ImageDescriptor, data_tags};
use crate::error::Result;
use crate::markdown::blockize;
use crate::shortcode::{Shortcode, recognize};

use super::{ensure_resolved, replace_tags, replace_with_raw};

/// Resolve placeholders for the newsroom's own static site and render the
/// result as Markdown.
pub fn markdown(dom: &mut Dom, root: NodeId) -> Result<String> {
    replace_tags(dom, root, DataTagKind::SpotlightText, |tag| tag.value);
    replace_tags(dom, root, DataTagKind::SpotlightRaw, |tag| recognize(&tag.value));

    for (id, tag) in data_tags(dom, root, DataTagKind::PartnerText) {
        expand_in_place(dom, id, &tag.value);
    }

    for (id, tag) in data_tags(dom, root, DataTagKind::DbEmbed) {
        let embed = tag.embed()?;
        let html = match embed.value {
            EmbedValue::Raw(html) => recognize(&html),
            EmbedValue::PartnerRaw(html) | EmbedValue::Toc(html) => html,
            EmbedValue::Image(image) => picture(&image).to_string(),
        };
        replace_with_raw(dom, id, html);
    }

    ensure_resolved(dom, root)?;
    Ok(blockize(dom, root))
}

/// Parse `html` and put its nodes where `id` was. The newlines between
/// blocks are dropped.
fn expand_in_place(dom: &mut Dom, id: NodeId, html: &str) {
    let fragment = parse_fragment(html);
    for child in fragment.children(fragment.document()) {
        if fragment.text(child).is_some_and(|t| t.trim().is_empty()) {
            continue;
        }
        let copy = dom.import(&fragment, child);
        dom.insert_before(id, copy);
    }
    dom.detach(id);
}

/// The `picture` shortcode for an image embed. Ratio attributes are only
/// written when the dimensions are known.
fn picture(image: &ImageDescriptor) -> Shortcode {
    let code = Shortcode::new("picture")
        .attr("src", &image.path)
        .attr("description", image.description.trim())
        .attr("caption", image.caption.trim())
        .attr("credit", image.credit.trim());
    if image.width == 0 {
        return code;
    }
    code.attr("width-ratio", image.width.to_string())
        .attr("height-ratio", image.height.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{DataTag, Embed, ImageKind};

    fn finish(tags: &[DataTag]) -> String {
        let mut dom = parse_fragment("<p>Intro</p>");
        let root = dom.document();
        for tag in tags {
            let el = tag.to_element(&mut dom);
            dom.append(root, el);
        }
        markdown(&mut dom, root).unwrap()
    }

    #[test]
    fn test_picture_shortcode() {
        let image = ImageDescriptor {
            path: "2024/cat.jpg".into(),
            credit: " Jane ".into(),
            caption: "A \"cat\"".into(),
            description: "Orange cat".into(),
            width: 1200,
            height: 800,
            kind: ImageKind::Wide,
        };
        assert_eq!(
            picture(&image).to_string(),
            r#"{{<picture caption="A &#34;cat&#34;" credit="Jane" description="Orange cat" height-ratio="800" src="2024/cat.jpg" width-ratio="1200">}}"#
        );

        let no_size = ImageDescriptor {
            path: "x.jpg".into(),
            ..Default::default()
        };
        assert_eq!(
            picture(&no_size).to_string(),
            r#"{{<picture caption="" credit="" description="" src="x.jpg">}}"#
        );
    }

    #[test]
    fn test_markdown_finisher() {
        let out = finish(&[
            DataTag::new(DataTagKind::SpotlightText, "Site *only*\n"),
            DataTag::new(DataTagKind::PartnerText, "<p>Partner <i>copy</i></p>\n"),
            DataTag::for_embed(&Embed::new(
                1,
                EmbedValue::Raw(
                    r#"<div data-spl-embed-version="1" data-spl-src="https://www.spotlightpa.org/embeds/cta/?eyebrow=Hi"></div>"#
                        .into(),
                ),
            ))
            .unwrap(),
            DataTag::new(DataTagKind::SpotlightRaw, "<marquee>hi</marquee>"),
        ]);
        assert_eq!(
            out,
            "Intro\n\nSite *only*\n\nPartner <i>copy</i>\n\n{{<embed/cta eyebrow=\"Hi\">}}\n\n{{<embed/raw srcdoc=\"&lt;marquee&gt;hi&lt;/marquee&gt;\">}}\n"
        );
    }
}
