use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::parsing::rewrite_wiki_links;

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

const SAFE_PROTOCOLS: [&str; 6] = ["http", "https", "mailto", "irc", "ircs", "xmpp"];

/// Keeps relative URLs and URLs with a known-safe protocol; any other
/// destination (`javascript:`, `data:` and so on) becomes empty.
fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    let safe = match url.find(':') {
        None => true,
        Some(colon) => {
            let scheme = &url[..colon];
            scheme.contains(['/', '?', '#'])
                || SAFE_PROTOCOLS
                    .iter()
                    .any(|protocol| scheme.eq_ignore_ascii_case(protocol))
        }
    };

    if safe { url } else { CowStr::Borrowed("") }
}

/// Renders a markdown document to an HTML fragment.
///
/// Wiki links are rewritten to ordinary links first. Raw HTML in the source
/// is emitted as escaped text, never as markup, and link or image
/// destinations with an unsafe protocol are dropped.
pub fn render_markdown(content: &str) -> String {
    let rewritten = rewrite_wiki_links(content);
    let events = Parser::new_ext(&rewritten, parser_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(rewritten.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Plain text of the first level-one heading, if the document has one.
pub fn page_title(content: &str) -> Option<String> {
    let rewritten = rewrite_wiki_links(content);
    let mut in_title = false;
    let mut title = String::new();

    for event in Parser::new_ext(&rewritten, parser_options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_title = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => break,
            Event::Text(text) | Event::Code(text) if in_title => title.push_str(&text),
            _ => {}
        }
    }

    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_wiki_links_as_anchors() {
        assert_eq!(
            render_markdown("See [[My Page]] now"),
            "<p>See <a href=\"/my-page\">My Page</a> now</p>\n"
        );
    }

    #[test]
    fn renders_heading_and_aliased_link() {
        let html = render_markdown("# Title\n\nSee [[Other Page|other]].\n");
        insta::assert_snapshot!(html, @r#"
        <h1>Title</h1>
        <p>See <a href="/other-page">other</a>.</p>
        "#);
    }

    #[test]
    fn raw_html_block_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_link_destinations_are_dropped() {
        assert_eq!(
            render_markdown("[click](javascript:alert(document.cookie))"),
            "<p><a href=\"\">click</a></p>\n"
        );
        assert!(!render_markdown("[x](JavaScript:void(0))").contains("JavaScript:"));
        assert!(!render_markdown("[x](vbscript:msgbox)").contains("vbscript:"));
        assert!(!render_markdown("<javascript:alert(1)>").contains("href=\"javascript:"));
    }

    #[test]
    fn data_image_sources_are_dropped() {
        let html = render_markdown("![pixel](data:image/png;base64,AAAA)");
        assert!(html.contains(r#"src="""#));
        assert!(!html.contains("data:"));
    }

    #[test]
    fn safe_link_destinations_are_kept() {
        assert!(render_markdown("[a](https://example.com/x)").contains(r#"href="https://example.com/x""#));
        assert!(render_markdown("[b](mailto:me@example.com)").contains(r#"href="mailto:me@example.com""#));
        assert!(render_markdown("[c](notes/page?at=10:30)").contains(r#"href="notes/page?at=10:30""#));
        assert!(render_markdown("[[Some Page]]").contains(r#"href="/some-page""#));
    }

    #[test]
    fn inline_html_is_escaped() {
        let html = render_markdown("some <b>bold</b> text");
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn tables_are_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn unterminated_wiki_link_stays_text() {
        assert_eq!(render_markdown("[[open"), "<p>[[open</p>\n");
    }

    #[test]
    fn title_from_first_h1() {
        let content = "intro\n\n## Not this\n\n# The `Real` Title\n\n# Second\n";
        assert_eq!(page_title(content), Some("The Real Title".to_string()));
    }

    #[test]
    fn title_uses_wiki_link_text() {
        assert_eq!(
            page_title("# About [[Rust Lang|Rust]]"),
            Some("About Rust".to_string())
        );
    }

    #[test]
    fn no_title_without_h1() {
        assert_eq!(page_title("just text\n\n## sub"), None);
        assert_eq!(page_title(""), None);
    }
}
