//! Markdown-to-HTML rendering contract and the pulldown-cmark adapter.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Converts post markdown into HTML that is safe to inject into the page.
pub trait MarkdownRenderer {
    /// Renders `markdown`. Identical input must produce identical output.
    fn render_to_safe_html(&self, markdown: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
/// CommonMark renderer that escapes raw HTML and neutralizes script URLs.
pub struct PulldownMarkdownRenderer;

impl MarkdownRenderer for PulldownMarkdownRenderer {
    fn render_to_safe_html(&self, markdown: &str) -> String {
        let normalized = markdown.replace("\r\n", "\n");
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);

        let events = Parser::new_ext(&normalized, options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_url(dest_url),
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
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            other => other,
        });

        let mut out = String::with_capacity(normalized.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:text/html"]
        .iter()
        .any(|blocked| scheme.starts_with(blocked))
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Returns the text of the first `# ` heading, or `fallback` when there is none.
pub fn extract_title(markdown: &str, fallback: &str) -> String {
    markdown
        .lines()
        .find_map(|line| {
            let rest = line.trim_start().strip_prefix('#')?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let title = rest.trim();
            (!title.is_empty()).then(|| title.to_string())
        })
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_common_markdown() {
        let html = PulldownMarkdownRenderer.render_to_safe_html("# Title\n\nSome **bold** `code`.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        let html = PulldownMarkdownRenderer.render_to_safe_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains("class=\"language-rust\""));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = PulldownMarkdownRenderer
            .render_to_safe_html("<script>alert(1)</script>\n\ntext <img src=x onerror=y>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_links_are_neutralized() {
        let html = PulldownMarkdownRenderer.render_to_safe_html("[x](javascript:alert(1))");
        assert!(html.contains("href=\"#\""));
    }

    #[test]
    fn rendering_is_idempotent() {
        let input = "## A\n\n- one\n- two\n\n[link](https://example.com)";
        let first = PulldownMarkdownRenderer.render_to_safe_html(input);
        let second = PulldownMarkdownRenderer.render_to_safe_html(input);
        assert_eq!(first, second);
    }

    #[test]
    fn extracts_first_h1() {
        assert_eq!(extract_title("intro\n  #  Hello World  \n# Second", "f.md"), "Hello World");
        assert_eq!(extract_title("##no space", "f.md"), "f.md");
        assert_eq!(extract_title("", "f.md"), "f.md");
    }
}
