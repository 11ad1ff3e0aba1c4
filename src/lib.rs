//! # newsdoc
//!
//! A compiler for newsroom stories written in Google Docs.
//!
//! Editors write a story in an ordinary document, using small tables to
//! attach metadata, images, embed code and a table of contents. `newsdoc`
//! takes the document's HTML export and produces, in one pass:
//!
//! - story [`Metadata`] and the numbered list of [`Embed`]s;
//! - rich-text HTML for partners who paste into a CMS editor;
//! - raw HTML for partners who publish the embed code as well;
//! - Markdown with shortcodes for the newsroom's static site;
//! - authoring warnings and a word count.
//!
//! ## Quick Start
//!
//! ```
//! let html = r#"<html><body>
//!   <table><tr><td>metadata</td></tr><tr><td>hed</td><td>Bridge reopens</td></tr></table>
//!   <p>The bridge reopened on Monday.</p>
//!   <table><tr><td>embed</td></tr><tr><td>&lt;iframe src="https://www.youtube.com/embed/abc123"&gt;&lt;/iframe&gt;</td></tr></table>
//! </body></html>"#;
//!
//! let bundle = newsdoc::compile(html).unwrap();
//! assert_eq!(bundle.metadata.hed, "Bridge reopens");
//! assert_eq!(bundle.embeds.len(), 1);
//! assert_eq!(
//!     bundle.markdown,
//!     "The bridge reopened on Monday.\n\n{{<youtube id=\"abc123\" loading=\"lazy\">}}\n"
//! );
//! assert!(bundle.rich_text.contains("Embed #1"));
//! ```
//!
//! ## Pipeline
//!
//! 1. Parse the export into an arena [`dom::Dom`] and drop the story tail.
//! 2. [`directive::scan`] replaces directive tables with `<data>` placeholders.
//! 3. [`normalize::normalize`] cleans the tree into canonical form.
//! 4. [`warnings`] inspects the canonical tree.
//! 5. Each [`finish`]er resolves the placeholders on its own copy.

pub mod compile;
pub mod directive;
pub mod dom;
pub mod embed;
pub mod error;
pub mod finish;
pub mod markdown;
pub mod normalize;
pub mod shortcode;
pub mod util;
pub mod warnings;

pub use compile::{Bundle, CompileOptions, compile, compile_bytes, compile_with};
pub use directive::Metadata;
pub use embed::{Embed, EmbedValue, ImageDescriptor, ImageKind};
pub use error::{Error, Result};
