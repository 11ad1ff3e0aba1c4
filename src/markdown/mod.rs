//! Markdown rendering for the static site.
//!
//! Only paragraphs, headings and lists are converted. Inline markup inside
//! them stays HTML, which the site generator renders as-is.

mod blockize;

pub use blockize::blockize;
