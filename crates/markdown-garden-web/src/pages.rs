//! HTML page assembly.
//!
//! Pages are plain strings: a shared layout wrapping an `<article>`. All
//! text taken from file names or node identifiers is escaped here; document
//! bodies come pre-rendered from the engine.

use std::collections::HashSet;

use html_escape::{encode_double_quoted_attribute, encode_text};
use markdown_garden_engine::{Document, MarkdownFile, WikiLink, page_title, render_markdown};

const SITE_TITLE: &str = "Markdown Viewer";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
header { padding: 16px; border-bottom: 1px solid #eee; display: flex; justify-content: center; }
.search-container { position: relative; width: 100%; max-width: 400px; }
#search-input { width: 100%; padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; box-sizing: border-box; }
#search-results { position: absolute; top: 100%; left: 0; right: 0; background: white; border: 1px solid #ddd; border-top: none; z-index: 999; max-height: 300px; overflow-y: auto; }
#search-results a { display: block; padding: 8px 12px; color: inherit; text-decoration: none; border-bottom: 1px solid #eee; }
#search-results a:hover, #search-results a.selected { background: #f5f5f5; }
main { max-width: 800px; margin: 0 auto; padding: 16px; }
nav.links { margin-top: 2rem; border-top: 1px solid #eee; font-size: 0.9em; }
a.missing { color: #b33; }
"#;

// Queries go to /x/search; arrow keys move the selection, Enter follows it.
const SEARCH_SCRIPT: &str = r#"
(() => {
  const input = document.getElementById('search-input');
  const results = document.getElementById('search-results');
  let selected = -1;
  let pending;

  const links = () => Array.from(results.querySelectorAll('a'));
  const select = (index) => {
    links().forEach((a, i) => a.classList.toggle('selected', i === index));
    selected = index;
  };

  input.addEventListener('input', () => {
    clearTimeout(pending);
    pending = setTimeout(async () => {
      const response = await fetch('/x/search?q=' + encodeURIComponent(input.value));
      if (!response.ok) return;
      const body = await response.json();
      results.replaceChildren(...body.results.map((hit) => {
        const a = document.createElement('a');
        a.href = hit.href;
        a.textContent = hit.id;
        return a;
      }));
      results.hidden = body.results.length === 0;
      selected = -1;
    }, 100);
  });

  input.addEventListener('keydown', (e) => {
    const count = links().length;
    if (results.hidden || count === 0) return;
    if (e.key === 'ArrowDown') {
      e.preventDefault();
      select(Math.min(selected + 1, count - 1));
    } else if (e.key === 'ArrowUp') {
      e.preventDefault();
      select(selected > 0 ? selected - 1 : -1);
    } else if (e.key === 'Enter' && selected >= 0) {
      e.preventDefault();
      window.location.href = links()[selected].href;
    } else if (e.key === 'Escape') {
      results.hidden = true;
      select(-1);
      input.blur();
    }
  });
})();
"#;

fn search_header() -> String {
    format!(
        r#"<header>
<div class="search-container">
<input id="search-input" type="text" placeholder="Search pages..." autocomplete="off" data-testid="search-input">
<div id="search-results" data-testid="search-results" hidden></div>
</div>
</header>
<script>{SEARCH_SCRIPT}</script>
"#
    )
}

/// Wraps an article in the shared page layout.
///
/// The search box is left out when `with_search` is false, i.e. when the
/// graph has nothing to search.
pub fn layout(title: Option<&str>, article: &str, with_search: bool) -> String {
    let title = match title {
        Some(title) => format!("{} | {SITE_TITLE}", encode_text(title)),
        None => SITE_TITLE.to_string(),
    };
    let header = if with_search {
        search_header()
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="View markdown files in your directory">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{header}<main>
<article>
{article}</article>
</main>
</body>
</html>
"#
    )
}

fn link(href: &str, text: &str, class: Option<&str>) -> String {
    let class = class
        .map(|c| format!(r#" class="{}""#, encode_double_quoted_attribute(c)))
        .unwrap_or_default();
    format!(
        r#"<a href="{}"{class}>{}</a>"#,
        encode_double_quoted_attribute(href),
        encode_text(text)
    )
}

/// Body of a document page: the rendered markdown followed by the pages it
/// links to, each listed once. `exists` reports whether a linked page is in
/// the garden.
pub fn document_article<F>(document: &Document, links: &[WikiLink], exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut article = render_markdown(&document.content);

    if !links.is_empty() {
        let mut seen = HashSet::new();
        article.push_str("<nav class=\"links\">\n<h2>Links</h2>\n<ul>\n");
        for wiki_link in links {
            if !seen.insert(wiki_link.slug.as_str()) {
                continue;
            }
            let class = (!exists(wiki_link.slug.as_str())).then_some("missing");
            article.push_str("<li>");
            article.push_str(&link(&wiki_link.href(), &wiki_link.display, class));
            article.push_str("</li>\n");
        }
        article.push_str("</ul>\n</nav>\n");
    }

    article
}

/// Title for a document page: its first heading, else the file name.
pub fn document_title(document: &Document) -> String {
    page_title(&document.content).unwrap_or_else(|| document.file.display_name().to_string())
}

pub fn missing_home_article() -> String {
    "<h1>Not Found</h1>\n<p>The requested markdown file could not be found.</p>\n".to_string()
}

/// Lists every page of the graph. Pages backed by a file show its name and
/// relative path; the rest show their identifier.
pub fn all_pages_article<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a MarkdownFile>)>,
{
    let mut article = String::from(
        "<h1>All Markdown Files</h1>\n<p>This page lists all markdown files in the directory.</p>\n<ul>\n",
    );
    for (name, file) in pages {
        article.push_str("<li>");
        match file {
            Some(file) => {
                article.push_str(&link(&format!("/{name}"), file.display_name(), None));
                article.push_str(&format!(
                    " <small>({})</small>",
                    encode_text(file.relative_path().as_str())
                ));
            }
            None => article.push_str(&link(&format!("/{name}"), name, None)),
        }
        article.push_str("</li>\n");
    }
    article.push_str("</ul>\n");
    article
}

pub fn not_found() -> String {
    layout(Some("Not Found"), &missing_home_article(), false)
}

pub fn server_error() -> String {
    layout(
        Some("Error"),
        "<h1>Something went wrong</h1>\n<p>The page could not be loaded.</p>\n",
        false,
    )
}
