//! Draft work-item trees.
//!
//! A [`DraftTicket`] tree is produced once by whatever drafts the tickets (a
//! text-generation service, a JSON file, a test) and consumed read-only by the
//! [`crate::CreationOrchestrator`].
//!
//! JSON shape:
//!
//! ```json
//! {
//!   "type": "Epic",
//!   "summary": "Checkout redesign",
//!   "description": "Plain text or a rich-document object",
//!   "suggestedId": "SHOP-E1",
//!   "children": [
//!     { "type": "Story", "summary": "...", "acceptanceCriteria": "...", "children": [] }
//!   ]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{Body, Node};
use crate::encode::encode;
use crate::errors::DraftError;

// ---------------------------------------------------------------------------
// Ticket kinds
// ---------------------------------------------------------------------------

/// The closed set of work-item kinds.
///
/// Serializes with the tracker's spelling. Deserialization goes through
/// [`FromStr`], so `"subtask"` or `"story"` are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TicketKind {
    /// Large initiative grouping stories, tasks and bugs.
    Epic,
    /// User-facing increment of value.
    Story,
    /// Standard unit of work.
    Task,
    /// Piece of a story, task or bug; always created under a parent.
    #[serde(rename = "Sub-task")]
    SubTask,
    /// Defect to fix.
    Bug,
}

impl TicketKind {
    /// Returns the tracker's spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketKind::Epic => "Epic",
            TicketKind::Story => "Story",
            TicketKind::Task => "Task",
            TicketKind::SubTask => "Sub-task",
            TicketKind::Bug => "Bug",
        }
    }

    /// Returns `true` for kinds that carry acceptance criteria.
    pub fn accepts_acceptance_criteria(&self) -> bool {
        matches!(self, TicketKind::Story | TicketKind::Task)
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketKind {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "epic" => Ok(TicketKind::Epic),
            "story" => Ok(TicketKind::Story),
            "task" => Ok(TicketKind::Task),
            "sub-task" | "subtask" => Ok(TicketKind::SubTask),
            "bug" => Ok(TicketKind::Bug),
            _ => Err(DraftError::UnknownKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for TicketKind {
    type Error = DraftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Draft nodes
// ---------------------------------------------------------------------------

/// A proposed, not-yet-created work item and its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTicket {
    #[serde(rename = "type")]
    pub kind: TicketKind,
    pub summary: String,
    /// Plain or already-encoded body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Body>,
    /// Only forwarded for stories and tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<String>,
    /// Advisory identifier; the tracker assigns the real key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_id: Option<String>,
    #[serde(default)]
    pub children: Vec<DraftTicket>,
}

impl DraftTicket {
    pub fn new(kind: TicketKind, summary: impl Into<String>) -> Self {
        Self {
            kind,
            summary: summary.into(),
            description: None,
            acceptance_criteria: None,
            suggested_id: None,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<Body>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_acceptance_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.acceptance_criteria = Some(criteria.into());
        self
    }

    pub fn with_suggested_id(mut self, suggested_id: impl Into<String>) -> Self {
        self.suggested_id = Some(suggested_id.into());
        self
    }

    pub fn with_child(mut self, child: DraftTicket) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DraftTicket::subtree_len)
            .sum::<usize>()
    }

    /// Checks the structural contract of this subtree.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.summary.trim().is_empty() {
            return Err(DraftError::EmptySummary { kind: self.kind });
        }
        if self.kind == TicketKind::SubTask {
            if let Some(suggested_id) = &self.suggested_id {
                return Err(DraftError::SuggestedIdOnSubTask {
                    summary: self.summary.clone(),
                    suggested_id: suggested_id.clone(),
                });
            }
        }
        self.children.iter().try_for_each(DraftTicket::validate)
    }

    /// The description as a rich document, encoding plain text on the way.
    ///
    /// Blank text and empty documents are absent. A rich body that is not a
    /// `doc` root is wrapped in one.
    pub fn description_document(&self) -> Option<Node> {
        match self.description.as_ref()? {
            Body::Text(text) => encode(text),
            Body::Rich(Node::Document { content, .. }) if content.is_empty() => None,
            Body::Rich(node @ Node::Document { .. }) => Some(node.clone()),
            Body::Rich(node) => Node::document(vec![node.clone()]),
        }
    }

    /// Acceptance criteria, if this kind carries them and they are not blank.
    pub fn effective_acceptance_criteria(&self) -> Option<&str> {
        if !self.kind.accepts_acceptance_criteria() {
            return None;
        }
        self.acceptance_criteria
            .as_deref()
            .filter(|criteria| !criteria.trim().is_empty())
    }
}

#[cfg(test)]
#[path = "draft_tests.rs"]
mod tests;
