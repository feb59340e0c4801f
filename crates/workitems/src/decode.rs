//! Rich-document tree → plain text.
//!
//! Text runs are concatenated in document order. Paragraphs end with exactly
//! one newline so adjacent paragraphs never fuse and blank lines never pile up.
//! Every other node contributes only its children's text. The final string
//! has whitespace runs before a newline collapsed and is trimmed.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Body, Node};

#[allow(clippy::unwrap_used)]
static WHITESPACE_BEFORE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\n").unwrap());

/// Decodes optional content into plain text.
///
/// Absent content yields an empty string and bare text passes through
/// unchanged.
pub fn decode(body: Option<&Body>) -> String {
    match body {
        None => String::new(),
        Some(Body::Text(text)) => text.clone(),
        Some(Body::Rich(node)) => to_plain_text(node),
    }
}

/// Flattens a tree into normalized plain text.
pub fn to_plain_text(node: &Node) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    let collapsed = WHITESPACE_BEFORE_NEWLINE.replace_all(&out, "\n");
    collapsed.trim().to_string()
}

fn collect(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Paragraph { content } => {
            for child in content {
                collect(child, out);
            }
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        other => {
            for child in other.children() {
                collect(child, out);
            }
        }
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
