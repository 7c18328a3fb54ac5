//! Markdown rendering
//!
//! Converts post content from Markdown to HTML using pulldown-cmark.
//! Fenced code blocks keep their language hint as a `language-*` class so
//! the client can highlight them.
//!
//! # Example
//!
//! ```
//! use pressa::services::markdown::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! let html = renderer.render("# Hello World\n\nThis is **bold** text.");
//! assert!(html.contains("<h1>"));
//! assert!(html.contains("<strong>"));
//! ```

use pulldown_cmark::{html, Options, Parser};

/// A thread-safe Markdown renderer.
///
/// Supports the common Markdown features plus tables, task lists and
/// strikethrough. Punctuation is left exactly as authored.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Renders Markdown text to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Heading 1");
        assert!(html.contains("<h1>"));
        assert!(html.contains("Heading 1"));
        assert!(html.contains("</h1>"));
    }

    #[test]
    fn test_render_multiple_headings() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<h2>"));
        assert!(html.contains("<h3>"));
        assert!(html.contains("<h4>"));
        assert!(html.contains("<h5>"));
        assert!(html.contains("<h6>"));
    }

    #[test]
    fn test_render_bold_and_italic() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("This is **bold** and *italic* text.");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_render_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("This is ~~strikethrough~~ text.");
        assert!(html.contains("<del>strikethrough</del>"));
    }

    #[test]
    fn test_render_unordered_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- Item 1\n- Item 2\n- Item 3");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>"));
        assert!(html.contains("Item 2"));
        assert!(html.contains("</ul>"));
    }

    #[test]
    fn test_render_ordered_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("1. First\n2. Second\n3. Third");
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>"));
        assert!(html.contains("Second"));
        assert!(html.contains("</ol>"));
    }

    #[test]
    fn test_render_link() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[Example](https://example.com)");
        assert!(html.contains("<a href=\"https://example.com\">Example</a>"));
    }

    #[test]
    fn test_render_image() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![Alt text](https://example.com/image.png)");
        assert!(html.contains("<img"));
        assert!(html.contains("src=\"https://example.com/image.png\""));
        assert!(html.contains("alt=\"Alt text\""));
    }

    #[test]
    fn test_render_blockquote() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("> This is a quote");
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("This is a quote"));
        assert!(html.contains("</blockquote>"));
    }

    #[test]
    fn test_render_inline_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Use `code` here");
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_render_code_block_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nlet x = 1;\n```");
        assert!(html.contains("<pre>"));
        assert!(html.contains("<code>"));
        assert!(html.contains("let x = 1;"));
    }

    #[test]
    fn test_render_code_block_keeps_language_class() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_render_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>"));
        assert!(html.contains("<td>"));
        assert!(html.contains("</table>"));
    }

    #[test]
    fn test_render_task_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- [x] Done\n- [ ] Todo");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("checked"));
        assert!(html.contains("Done"));
        assert!(html.contains("Todo"));
    }

    #[test]
    fn test_render_escapes_html_in_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<script>alert('xss')</script>\n```");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_keeps_punctuation_as_authored() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("\"quotes\" -- and dashes...");
        assert!(html.contains("\"quotes\" -- and dashes..."));
    }

    #[test]
    fn test_render_empty_input() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("");
        assert!(html.is_empty());
    }

    #[test]
    fn test_render_complex_document() {
        let renderer = MarkdownRenderer::new();
        let markdown = r#"
# Title

This is a **bold** and *italic* paragraph.

## Code Example

```rust
fn hello() {
    println!("Hello, world!");
}
```

### List

- Item 1
- Item 2

> A quote

[Link](https://example.com)
"#;
        let html = renderer.render(markdown);
        assert!(html.contains("<h1>"));
        assert!(html.contains("<h2>"));
        assert!(html.contains("<h3>"));
        assert!(html.contains("<strong>"));
        assert!(html.contains("<em>"));
        assert!(html.contains("<pre"));
        assert!(html.contains("<ul>"));
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<a href="));
    }

    #[test]
    fn test_renderer_default() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("plain text");
        assert!(html.contains("plain text"));
    }
}
