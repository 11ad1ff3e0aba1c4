use crate::dom::{Dom, NodeId};
use crate::embed::{DataTagKind, EmbedValue, ImageKind, data_tags};
use crate::error::Result;

use super::{embed_placeholder, ensure_resolved, remove_tags, replace_tags, replace_with_raw};

/// Resolve placeholders for partners who publish the HTML directly.
///
/// Embed code goes in as-is; images still become placeholders, since the
/// partner has to upload the file themselves.
pub fn raw_html(dom: &mut Dom, root: NodeId) -> Result<()> {
    remove_tags(dom, root, DataTagKind::SpotlightText);
    remove_tags(dom, root, DataTagKind::SpotlightRaw);
    replace_tags(dom, root, DataTagKind::PartnerText, |tag| tag.value);

    for (id, tag) in data_tags(dom, root, DataTagKind::DbEmbed) {
        let embed = tag.embed()?;
        match embed.value {
            EmbedValue::Image(image) if image.kind == ImageKind::Spl => dom.detach(id),
            EmbedValue::Image(_) => embed_placeholder(dom, id, embed.n),
            EmbedValue::Raw(html) | EmbedValue::Toc(html) | EmbedValue::PartnerRaw(html) => {
                replace_with_raw(dom, id, html)
            }
        }
    }

    ensure_resolved(dom, root)
}
