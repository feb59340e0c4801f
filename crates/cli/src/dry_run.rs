//! In-process [`ItemCreator`] for `create --dry-run`.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;
use workitems::{CreateItemError, CreatedItem, IssueId, IssueKey, ItemCreator, ItemRequest};

/// Assigns sequential keys `<prefix>-1, <prefix>-2, ...` without touching the
/// network and logs what would have been sent.
pub struct DryRunCreator {
    prefix: String,
    next: AtomicUsize,
}

impl DryRunCreator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl ItemCreator for DryRunCreator {
    async fn create_item(&self, request: ItemRequest) -> Result<CreatedItem, CreateItemError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        let key = IssueKey::new(format!("{}-{n}", self.prefix))
            .ok_or_else(|| CreateItemError::new("dry-run key prefix is empty"))?;
        let id = IssueId::new(n.to_string())
            .ok_or_else(|| CreateItemError::new("dry-run id is empty"))?;
        info!(
            %key,
            kind = %request.kind,
            summary = %request.summary,
            parent = ?request.parent_key.as_ref().map(IssueKey::as_str),
            epic = ?request.epic_key.as_ref().map(IssueKey::as_str),
            "Dry run: would create ticket"
        );
        Ok(CreatedItem { key, id })
    }
}
