//! Rendering of rich article content (Quill delta documents) to HTML and plain text.
//!
//! A delta document is `{"ops": [...]}` where each op inserts either a text run
//! or an embed, optionally with formatting attributes. Newlines terminate lines
//! and carry the line-level format (header, list, alignment, ...); every other
//! character carries inline formatting (bold, colour, link, ...).
//!
//! The produced HTML is *not* trusted: callers must pass it through
//! [`crate::sanitize::sanitize`] before storing it.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Longest colour/background value accepted from an inline attribute.
const MAX_STYLE_VALUE_LEN: usize = 64;

/// Alignments expressible on a line (Quill omits `left`, the default).
const VALID_ALIGNMENTS: &[&str] = &["center", "right", "justify"];

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct Delta {
    pub ops: Vec<Op>,
}

/// A single delta operation. Documents only contain inserts; `retain` and
/// `delete` ops (change deltas) are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct Op {
    #[serde(default)]
    pub insert: Option<Insert>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Map<String, Value>),
}

/// HTML and plain-text renderings of one rich-content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub html: String,
    pub plain: String,
}

/// Parse a serialized delta document.
pub fn parse(raw: &str) -> Result<Delta, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Serialization(format!("Rich content is not a valid delta: {e}")))
}

/// Parse `raw` and render it in one step.
pub fn render(raw: &str) -> Result<RenderedContent, CoreError> {
    let delta = parse(raw)?;
    Ok(RenderedContent {
        html: delta.to_html(),
        plain: delta.to_plain_text(),
    })
}

impl Delta {
    /// Concatenation of all text inserts, embeds omitted.
    pub fn to_plain_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match &op.insert {
                Some(Insert::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Render the document as an HTML fragment of block elements.
    pub fn to_html(&self) -> String {
        let empty = Map::new();
        let mut lines: Vec<(String, &Map<String, Value>)> = Vec::new();
        let mut current = String::new();

        for op in &self.ops {
            match &op.insert {
                Some(Insert::Text(text)) => {
                    let mut parts = text.split('\n');
                    if let Some(first) = parts.next() {
                        push_inline(&mut current, first, &op.attributes);
                    }
                    for part in parts {
                        lines.push((std::mem::take(&mut current), &op.attributes));
                        push_inline(&mut current, part, &op.attributes);
                    }
                }
                Some(Insert::Embed(embed)) => push_embed(&mut current, embed),
                None => {}
            }
        }
        if !current.is_empty() {
            lines.push((current, &empty));
        }

        let mut html = String::new();
        let mut open_list: Option<&'static str> = None;
        for (inline, format) in lines {
            let list_tag = list_tag(format);
            if open_list != list_tag {
                if let Some(tag) = open_list {
                    html.push_str(&format!("</{tag}>"));
                }
                if let Some(tag) = list_tag {
                    html.push_str(&format!("<{tag}>"));
                }
                open_list = list_tag;
            }

            let content = if inline.is_empty() { "<br>" } else { inline.as_str() };
            let style = align_style(format);
            let block = if list_tag.is_some() {
                "li".to_string()
            } else if let Some(level) = header_level(format) {
                format!("h{level}")
            } else if is_set(format, "blockquote") {
                "blockquote".to_string()
            } else if is_set(format, "code-block") {
                "pre".to_string()
            } else {
                "p".to_string()
            };
            html.push_str(&format!("<{block}{style}>{content}</{block}>"));
        }
        if let Some(tag) = open_list {
            html.push_str(&format!("</{tag}>"));
        }
        html
    }
}

// ---------------------------------------------------------------------------
// Inline formatting
// ---------------------------------------------------------------------------

fn push_inline(out: &mut String, text: &str, attrs: &Map<String, Value>) {
    if text.is_empty() {
        return;
    }
    let mut html = escape_html(text);

    if is_set(attrs, "code") {
        html = format!("<code>{html}</code>");
    }
    if is_set(attrs, "bold") {
        html = format!("<strong>{html}</strong>");
    }
    if is_set(attrs, "italic") {
        html = format!("<em>{html}</em>");
    }
    if is_set(attrs, "underline") {
        html = format!("<u>{html}</u>");
    }
    if is_set(attrs, "strike") {
        html = format!("<s>{html}</s>");
    }
    match text_attr(attrs, "script") {
        Some("sub") => html = format!("<sub>{html}</sub>"),
        Some("super") => html = format!("<sup>{html}</sup>"),
        _ => {}
    }

    let mut styles = Vec::new();
    if let Some(color) = text_attr(attrs, "color").filter(|v| is_safe_style_value(v)) {
        styles.push(format!("color: {color}"));
    }
    if let Some(bg) = text_attr(attrs, "background").filter(|v| is_safe_style_value(v)) {
        styles.push(format!("background-color: {bg}"));
    }
    if !styles.is_empty() {
        html = format!("<span style=\"{}\">{html}</span>", styles.join("; "));
    }

    if let Some(href) = text_attr(attrs, "link") {
        html = format!("<a href=\"{}\">{html}</a>", escape_html(href));
    }

    out.push_str(&html);
}

fn push_embed(out: &mut String, embed: &Map<String, Value>) {
    if let Some(src) = embed.get("image").and_then(Value::as_str) {
        out.push_str(&format!("<img src=\"{}\">", escape_html(src)));
    }
}

// ---------------------------------------------------------------------------
// Line formatting
// ---------------------------------------------------------------------------

fn list_tag(format: &Map<String, Value>) -> Option<&'static str> {
    match text_attr(format, "list") {
        Some("ordered") => Some("ol"),
        Some("bullet" | "checked" | "unchecked") => Some("ul"),
        _ => None,
    }
}

fn header_level(format: &Map<String, Value>) -> Option<u64> {
    format
        .get("header")
        .and_then(Value::as_u64)
        .filter(|level| (1..=6).contains(level))
}

fn align_style(format: &Map<String, Value>) -> String {
    match text_attr(format, "align") {
        Some(align) if VALID_ALIGNMENTS.contains(&align) => {
            format!(" style=\"text-align: {align}\"")
        }
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// An attribute counts as set when present with any value other than
/// `false`/`null` (Quill uses both `true` and strings such as `"plain"`).
fn is_set(attrs: &Map<String, Value>, key: &str) -> bool {
    !matches!(attrs.get(key), None | Some(Value::Null) | Some(Value::Bool(false)))
}

fn text_attr<'a>(attrs: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(Value::as_str)
}

fn is_safe_style_value(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_STYLE_VALUE_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
