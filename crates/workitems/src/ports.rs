//! Port traits implemented by infrastructure crates.
//!
//! The orchestrator depends only on [`ItemCreator`]; the `tracker` crate
//! supplies the REST implementation and tests supply recording stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::Node;
use crate::errors::CreateItemError;
use crate::{IssueId, IssueKey, TicketKind};

/// Everything needed to create one work item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRequest {
    pub kind: TicketKind,
    pub summary: String,
    /// Encoded description; `None` when the draft had no usable body.
    pub description: Option<Node>,
    /// Present only for stories and tasks.
    pub acceptance_criteria: Option<String>,
    /// Key of the immediate parent. Set only for sub-tasks.
    pub parent_key: Option<IssueKey>,
    /// Key of the nearest enclosing epic, if any.
    pub epic_key: Option<IssueKey>,
}

/// Identity assigned by the tracker to a newly created item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub key: IssueKey,
    pub id: IssueId,
}

/// Creates a single work item in the external tracker.
///
/// Implementations must be safe to share across tasks. A returned error is
/// recorded against the node; it never aborts the surrounding run.
#[async_trait]
pub trait ItemCreator: Send + Sync {
    async fn create_item(&self, request: ItemRequest) -> Result<CreatedItem, CreateItemError>;
}
