//! Markdown-lite renderer
//!
//! Oracle replies and dynamic pages arrive as a constrained markdown subset:
//! headings (levels 1-3), bullet items, and paragraphs with `**bold**` spans.
//! `parse` turns a newline-delimited string into typed blocks, one block per
//! line, with no multi-line state. `render_html` maps those blocks onto
//! Telegram HTML.

use std::sync::OnceLock;

use regex::Regex;

use crate::utils::helpers::escape_html;

/// A span inside a paragraph line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Strong(String),
}

/// A classified display block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Bullet(String),
    Paragraph(Vec<Span>),
}

/// Lazy `**...**` alternation; a stray `**` without a closing pair is not
/// matched and renders literally.
fn strong_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*.*?\*\*").expect("literal pattern"))
}

/// Parse a markdown-lite string into display blocks.
///
/// Every line produces exactly one block; an empty line is an empty
/// paragraph. Classification is per line by prefix, in the same order the
/// Switch renderer applies it.
pub fn parse(content: &str) -> Vec<Block> {
    content.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("### ") {
        return Block::Heading {
            level: 3,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Block::Heading {
            level: 1,
            text: rest.to_string(),
        };
    }

    let trimmed = line.trim();
    if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
        return Block::Bullet(trimmed[2..].to_string());
    }

    Block::Paragraph(split_spans(line))
}

/// Split a paragraph line into plain and strong spans, original order
/// preserved.
fn split_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in strong_pattern().find_iter(line) {
        if m.start() > last {
            spans.push(Span::Plain(line[last..m.start()].to_string()));
        }
        spans.push(Span::Strong(line[m.start() + 2..m.end() - 2].to_string()));
        last = m.end();
    }

    if last < line.len() {
        spans.push(Span::Plain(line[last..].to_string()));
    }

    spans
}

/// Render blocks as Telegram HTML, one line per block.
pub fn render_html(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            Block::Heading { level: 3, text } => format!("<b><i>{}</i></b>", escape_html(text)),
            Block::Heading { text, .. } => format!("<b>{}</b>", escape_html(text)),
            Block::Bullet(text) => format!("• {}", escape_html(text)),
            Block::Paragraph(spans) => spans
                .iter()
                .map(|span| match span {
                    Span::Plain(text) => escape_html(text),
                    Span::Strong(text) => format!("<b>{}</b>", escape_html(text)),
                })
                .collect::<Vec<_>>()
                .join(""),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience wrapper: parse and render in one step.
pub fn to_html(content: &str) -> String {
    render_html(&parse(content))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            parse("# X"),
            vec![Block::Heading {
                level: 1,
                text: "X".to_string()
            }]
        );
        assert_eq!(
            parse("## The Descent"),
            vec![Block::Heading {
                level: 2,
                text: "The Descent".to_string()
            }]
        );
        assert_eq!(
            parse("### Coaching Insight"),
            vec![Block::Heading {
                level: 3,
                text: "Coaching Insight".to_string()
            }]
        );
    }

    #[test]
    fn test_bullet_markers_with_whitespace() {
        assert_eq!(parse("- item"), vec![Block::Bullet("item".to_string())]);
        assert_eq!(parse("* item"), vec![Block::Bullet("item".to_string())]);
        assert_eq!(parse("   - item  "), vec![Block::Bullet("item".to_string())]);
    }

    #[test]
    fn test_paragraph_strong_spans() {
        assert_eq!(
            parse("a **b** c"),
            vec![Block::Paragraph(vec![
                Span::Plain("a ".to_string()),
                Span::Strong("b".to_string()),
                Span::Plain(" c".to_string()),
            ])]
        );
    }

    #[test]
    fn test_stray_delimiter_renders_literally() {
        assert_eq!(
            parse("a ** b"),
            vec![Block::Paragraph(vec![Span::Plain("a ** b".to_string())])]
        );
        // three markers: first pair matches, the stray trailing one is plain
        assert_eq!(
            parse("**a** b **"),
            vec![Block::Paragraph(vec![
                Span::Strong("a".to_string()),
                Span::Plain(" b **".to_string()),
            ])]
        );
    }

    #[test]
    fn test_empty_line_is_empty_paragraph() {
        assert_eq!(parse(""), vec![Block::Paragraph(vec![])]);
    }

    #[test]
    fn test_multi_line_document() {
        let blocks = parse("### The Path is Open\nplain text\n\n- one\n**done**");
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], Block::Heading { level: 3, .. }));
        assert!(matches!(blocks[2], Block::Paragraph(ref spans) if spans.is_empty()));
        assert_eq!(blocks[3], Block::Bullet("one".to_string()));
    }

    #[test]
    fn test_render_html_escapes_and_bolds() {
        let html = to_html("## A <b>\nx **y & z** w");
        assert_eq!(html, "<b>A &lt;b&gt;</b>\nx <b>y &amp; z</b> w");
    }

    proptest! {
        /// Block count always equals the number of newline-delimited lines.
        #[test]
        fn block_count_equals_line_count(lines in prop::collection::vec("[ -~]{0,40}", 0..20)) {
            let content = lines.join("\n");
            prop_assert_eq!(parse(&content).len(), content.split('\n').count());
        }

        /// Parsing never panics on arbitrary input.
        #[test]
        fn parse_is_total(content in "\\PC*") {
            let _ = parse(&content);
        }
    }
}
