//! Content formatters.
//!
//! Two interchangeable strategies exist: a safe pre-wrapped block that shows
//! text verbatim, and a partial markdown conversion (headings, bold, inline
//! code, bullet lists, paragraphs). Neither is canonical.

use once_cell::sync::Lazy;
use regex::Regex;

const EMPTY_CONTENT_TEXT: &str = "No content";

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,3})\s+(.*)$").expect("valid heading regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").expect("valid bullet regex"));

/// Replaceable lesson content formatter.
pub trait ContentFormatter {
    fn format(&self, content: &str) -> String;
}

/// Escapes `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escaped text inside a whitespace-preserving `<pre>` block.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeTextFormatter;

impl ContentFormatter for SafeTextFormatter {
    fn format(&self, content: &str) -> String {
        let text = if content.is_empty() {
            EMPTY_CONTENT_TEXT
        } else {
            content
        };
        format!(
            "<pre style=\"white-space:pre-wrap; margin:0; font-family:inherit; line-height:1.75\">{}</pre>",
            escape_html(text)
        )
    }
}

/// Partial markdown-to-HTML conversion over escaped text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl ContentFormatter for MarkdownFormatter {
    fn format(&self, content: &str) -> String {
        if content.trim().is_empty() {
            return format!("<p>{EMPTY_CONTENT_TEXT}</p>");
        }

        let mut blocks: Vec<String> = Vec::new();
        let mut paragraph: Vec<String> = Vec::new();
        let mut list: Vec<String> = Vec::new();

        for raw_line in content.lines() {
            let line = escape_html(raw_line);

            if line.trim().is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                flush_list(&mut list, &mut blocks);
                continue;
            }

            if let Some(caps) = HEADING_RE.captures(&line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                flush_list(&mut list, &mut blocks);
                let level = caps[1].len();
                blocks.push(format!("<h{level}>{}</h{level}>", inline(&caps[2])));
                continue;
            }

            if let Some(caps) = BULLET_RE.captures(&line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                list.push(format!("<li>{}</li>", inline(&caps[1])));
                continue;
            }

            flush_list(&mut list, &mut blocks);
            paragraph.push(inline(line.trim()));
        }

        flush_paragraph(&mut paragraph, &mut blocks);
        flush_list(&mut list, &mut blocks);
        blocks.join("\n")
    }
}

fn inline(text: &str) -> String {
    let with_code = INLINE_CODE_RE.replace_all(text, "<code>$1</code>");
    BOLD_RE
        .replace_all(&with_code, "<strong>$1</strong>")
        .into_owned()
}

fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    blocks.push(format!("<p>{}</p>", paragraph.join("<br>")));
    paragraph.clear();
}

fn flush_list(list: &mut Vec<String>, blocks: &mut Vec<String>) {
    if list.is_empty() {
        return;
    }
    blocks.push(format!("<ul>{}</ul>", list.concat()));
    list.clear();
}
