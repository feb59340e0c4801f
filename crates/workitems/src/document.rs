//! The tracker's rich-document tree.
//!
//! [`Node`] is a closed tagged union over the six block and inline kinds the
//! encoder produces, plus the `doc` root. On the wire every node is a JSON
//! object discriminated by `type`:
//!
//! ```text
//! { type: "doc", version: 1, content: [ <block>... ] }
//! { type: "heading", attrs: { level: 1|2 }, content: [ {type: "text", text} ] }
//! { type: "paragraph", content: [ {type: "text", text, marks?: [{type: "strong"}]} ... ] }
//! { type: "orderedList" | "bulletList", content: [ listItem... ] }
//! { type: "listItem", content: [ paragraph ] }
//! ```
//!
//! Content fetched from the tracker may contain node types outside this set
//! (tables, panels, mentions, ...). Those deserialize into
//! [`Node::Unsupported`], which keeps its children so nested text still
//! decodes. Unknown marks are dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version written on every `doc` root.
pub const DOCUMENT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A node of the rich-document tree.
///
/// Children are semantically ordered; every operation in this crate preserves
/// that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum Node {
    /// Root node; owns the block sequence.
    Document { version: u32, content: Vec<Node> },
    /// Heading; the encoder only emits levels 1 and 2.
    Heading { level: u8, content: Vec<Node> },
    /// Paragraph of text runs.
    Paragraph { content: Vec<Node> },
    /// Numbered list of [`Node::ListItem`]s.
    OrderedList { content: Vec<Node> },
    /// Bulleted list of [`Node::ListItem`]s.
    BulletList { content: Vec<Node> },
    /// List entry wrapping one [`Node::Paragraph`].
    ListItem { content: Vec<Node> },
    /// Text run, optionally emphasised.
    Text { text: String, marks: Vec<Mark> },
    /// Any node type outside the recognized set, kept for its children.
    Unsupported {
        node_type: String,
        attrs: Option<Value>,
        content: Vec<Node>,
    },
}

impl Node {
    /// Wraps `blocks` in a `doc` root, or returns `None` when there are none.
    ///
    /// An empty document is never materialised; absence stands in for it.
    pub fn document(blocks: Vec<Node>) -> Option<Node> {
        if blocks.is_empty() {
            None
        } else {
            Some(Node::Document {
                version: DOCUMENT_VERSION,
                content: blocks,
            })
        }
    }

    /// A heading holding a single text run.
    pub fn heading(level: u8, text: impl Into<String>) -> Node {
        Node::Heading {
            level,
            content: vec![Node::text(text)],
        }
    }

    /// A paragraph holding a single text run.
    pub fn paragraph(text: impl Into<String>) -> Node {
        Node::Paragraph {
            content: vec![Node::text(text)],
        }
    }

    /// A list item holding a single-run paragraph.
    pub fn list_item(text: impl Into<String>) -> Node {
        Node::ListItem {
            content: vec![Node::paragraph(text)],
        }
    }

    /// A plain text run.
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// A bold text run.
    pub fn strong(text: impl Into<String>) -> Node {
        Node::Text {
            text: text.into(),
            marks: vec![Mark::Strong],
        }
    }

    /// Returns the node's children in order. Text runs have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { content, .. }
            | Node::Heading { content, .. }
            | Node::Paragraph { content }
            | Node::OrderedList { content }
            | Node::BulletList { content }
            | Node::ListItem { content }
            | Node::Unsupported { content, .. } => content,
            Node::Text { .. } => &[],
        }
    }

    /// Returns the wire `type` tag of this node.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Document { .. } => "doc",
            Node::Heading { .. } => "heading",
            Node::Paragraph { .. } => "paragraph",
            Node::OrderedList { .. } => "orderedList",
            Node::BulletList { .. } => "bulletList",
            Node::ListItem { .. } => "listItem",
            Node::Text { .. } => "text",
            Node::Unsupported { node_type, .. } => node_type,
        }
    }
}

/// Emphasis applied to a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Bold.
    Strong,
}

impl Mark {
    fn from_type(mark_type: &str) -> Option<Self> {
        match mark_type {
            "strong" => Some(Mark::Strong),
            _ => None,
        }
    }

    fn type_name(self) -> &'static str {
        match self {
            Mark::Strong => "strong",
        }
    }
}

// ---------------------------------------------------------------------------
// Body — plain or rich content
// ---------------------------------------------------------------------------

/// Content that is either already plain text or a rich-document tree.
///
/// Serialized untagged: a JSON string is [`Body::Text`], a JSON object with a
/// `type` field is [`Body::Rich`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    /// Plain (or markdown-flavoured) text.
    Text(String),
    /// A rich-document tree, normally a `doc` root.
    Rich(Node),
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Node> for Body {
    fn from(node: Node) -> Self {
        Body::Rich(node)
    }
}

// ---------------------------------------------------------------------------
// Wire representation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMark {
    #[serde(rename = "type")]
    mark_type: String,
}

/// Flat JSON shape shared by every node type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<RawMark>,
}

impl RawNode {
    fn new(node_type: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            node_type: node_type.into(),
            version: None,
            attrs: None,
            content: Some(content),
            text: None,
            marks: Vec::new(),
        }
    }
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let content = raw.content.unwrap_or_default();
        match raw.node_type.as_str() {
            "doc" => Node::Document {
                version: raw.version.unwrap_or(DOCUMENT_VERSION),
                content,
            },
            "heading" => {
                let level = raw
                    .attrs
                    .as_ref()
                    .and_then(|attrs| attrs.get("level"))
                    .and_then(Value::as_u64)
                    .and_then(|level| u8::try_from(level).ok())
                    .unwrap_or(1);
                Node::Heading { level, content }
            }
            "paragraph" => Node::Paragraph { content },
            "orderedList" => Node::OrderedList { content },
            "bulletList" => Node::BulletList { content },
            "listItem" => Node::ListItem { content },
            "text" => Node::Text {
                text: raw.text.unwrap_or_default(),
                marks: raw
                    .marks
                    .iter()
                    .filter_map(|mark| Mark::from_type(&mark.mark_type))
                    .collect(),
            },
            _ => Node::Unsupported {
                node_type: raw.node_type,
                attrs: raw.attrs,
                content,
            },
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Document { version, content } => RawNode {
                version: Some(version),
                ..RawNode::new("doc", content)
            },
            Node::Heading { level, content } => RawNode {
                attrs: Some(serde_json::json!({ "level": level })),
                ..RawNode::new("heading", content)
            },
            Node::Paragraph { content } => RawNode::new("paragraph", content),
            Node::OrderedList { content } => RawNode::new("orderedList", content),
            Node::BulletList { content } => RawNode::new("bulletList", content),
            Node::ListItem { content } => RawNode::new("listItem", content),
            Node::Text { text, marks } => RawNode {
                content: None,
                text: Some(text),
                marks: marks
                    .into_iter()
                    .map(|mark| RawMark {
                        mark_type: mark.type_name().to_string(),
                    })
                    .collect(),
                ..RawNode::new("text", Vec::new())
            },
            Node::Unsupported {
                node_type,
                attrs,
                content,
            } => RawNode {
                attrs,
                content: (!content.is_empty()).then_some(content),
                ..RawNode::new(node_type, Vec::new())
            },
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
