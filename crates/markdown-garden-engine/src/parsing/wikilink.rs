use std::ops::Range;

use super::cursor::Cursor;
use crate::slug::normalize;

/// A resolved wiki-style reference, `[[target]]` or `[[target|display]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Trimmed page name as written.
    pub target: String,
    /// Link text; the target when no alias was given.
    pub display: String,
    /// Normalized identifier of the target page.
    pub slug: String,
}

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: char = '|';

    /// Builds a link from the text between `[[` and `]]`.
    ///
    /// Only the first `|` separates target from display text.
    pub fn from_inner(inner: &str) -> Self {
        let (target, display) = match inner.split_once(Self::ALIAS) {
            Some((target, display)) => (target.trim(), display.trim()),
            None => (inner.trim(), ""),
        };
        let display = if display.is_empty() { target } else { display };

        Self {
            target: target.to_string(),
            display: display.to_string(),
            slug: normalize(target),
        }
    }

    /// Site-relative path of the linked page.
    pub fn href(&self) -> String {
        format!("/{}", self.slug)
    }

    /// Standard markdown link form, `[display](/slug)`.
    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.display, self.href())
    }
}

/// Iterator over the wiki-link tokens of a text, in source order.
///
/// Yields the byte range of each whole token alongside the parsed link.
/// Tokens whose target normalizes to an empty slug are skipped and stay
/// part of the surrounding text.
pub struct WikiLinks<'a> {
    cur: Cursor<'a>,
}

impl<'a> WikiLinks<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            cur: Cursor::new(text),
        }
    }
}

impl Iterator for WikiLinks<'_> {
    type Item = (Range<usize>, WikiLink);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.cur.eof() {
            let start = self.cur.pos();
            if let Some(inner) = try_scan_token(&mut self.cur) {
                let link = WikiLink::from_inner(self.cur.slice(inner.start, inner.end));
                if link.slug.is_empty() {
                    continue;
                }
                return Some((start..self.cur.pos(), link));
            }
            self.cur.bump();
        }
        None
    }
}

/// Attempts to scan a token starting at the current position.
///
/// A token is `[[`, one or more bytes other than `]`, then `]]`. The first
/// `]` ends the inner text, so `[[a]b]]` is not a token at all. On failure the
/// cursor is restored and `None` returned; on success the cursor sits after
/// the closing `]]` and the inner byte range is returned.
fn try_scan_token(cur: &mut Cursor<'_>) -> Option<Range<usize>> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(WikiLink::OPEN.len());
    let inner_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(b']') {
        cur.bump();
    }
    let inner_end = cur.pos();

    if inner_end == inner_start || !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(inner_start..inner_end)
}

/// Collects every wiki link in `text`.
pub fn parse_wiki_links(text: &str) -> Vec<WikiLink> {
    WikiLinks::new(text).map(|(_, link)| link).collect()
}

/// Rewrites `[[page]]` and `[[page|text]]` tokens into markdown links.
///
/// Single left-to-right pass; text outside tokens is copied unchanged and
/// rewritten output is never rescanned. Unterminated tokens are left as
/// they are.
///
/// ```
/// use markdown_garden_engine::rewrite_wiki_links;
///
/// assert_eq!(
///     rewrite_wiki_links("See [[My Page]] now"),
///     "See [My Page](/my-page) now"
/// );
/// ```
pub fn rewrite_wiki_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut text_start = 0;

    for (range, link) in WikiLinks::new(text) {
        out.push_str(&text[text_start..range.start]);
        out.push_str(&link.to_markdown());
        text_start = range.end;
    }

    out.push_str(&text[text_start..]);
    out
}
