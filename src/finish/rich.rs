use crate::dom::{Dom, NodeId};
use crate::embed::{DataTagKind, data_tags};
use crate::error::Result;

use super::{embed_placeholder, ensure_resolved, remove_tags, replace_tags};

/// Resolve placeholders for partners who paste the story into a rich-text
/// editor. Every embed becomes a red "Embed #N" heading.
pub fn rich_text(dom: &mut Dom, root: NodeId) -> Result<()> {
    remove_tags(dom, root, DataTagKind::SpotlightText);
    remove_tags(dom, root, DataTagKind::SpotlightRaw);
    replace_tags(dom, root, DataTagKind::PartnerText, |tag| tag.value);

    for (id, tag) in data_tags(dom, root, DataTagKind::DbEmbed) {
        let embed = tag.embed()?;
        if embed.is_internal_image() {
            dom.detach(id);
        } else {
            embed_placeholder(dom, id, embed.n);
        }
    }

    ensure_resolved(dom, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_fragment, serialize};
    use crate::embed::{DataTag, Embed, EmbedValue, ImageDescriptor, ImageKind};

    #[test]
    fn test_rich_text() {
        let mut dom = parse_fragment("<p>Intro</p>");
        let root = dom.document();
        let tags = [
            DataTag::new(DataTagKind::SpotlightRaw, "<div>site only</div>"),
            DataTag::new(DataTagKind::PartnerText, "<p>For partners</p>\n"),
            DataTag::for_embed(&Embed::new(1, EmbedValue::Raw("<script></script>".into())))
                .unwrap(),
            DataTag::for_embed(&Embed::new(
                2,
                EmbedValue::Image(ImageDescriptor {
                    path: "a.jpg".into(),
                    kind: ImageKind::Spl,
                    ..Default::default()
                }),
            ))
            .unwrap(),
        ];
        for tag in &tags {
            let el = tag.to_element(&mut dom);
            dom.append(root, el);
        }

        rich_text(&mut dom, root).unwrap();
        assert_eq!(
            serialize::inner_html(&dom, root),
            "<p>Intro</p><p>For partners</p>\n<h2 style=\"color: red;\">Embed #1</h2>"
        );
    }
}
