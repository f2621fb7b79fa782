//! Inline scanning of markdown source.
//!
//! Only wiki links are recognised here; everything else is left for the
//! markdown renderer.

pub mod cursor;
pub mod wikilink;

pub use wikilink::{WikiLink, WikiLinks, parse_wiki_links, rewrite_wiki_links};
