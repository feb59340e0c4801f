//! Error and retry-policy types for the work-item domain.
//!
//! Two very different kinds of failure exist here:
//!
//! - [`DraftError`] is a contract violation in the draft tree handed to the
//!   orchestrator. It is the only error that escapes
//!   [`crate::CreationOrchestrator::create`], and it is raised before any item
//!   is created.
//! - [`CreateItemError`] is a per-node failure reported by an
//!   [`crate::ItemCreator`] implementation. The orchestrator always recovers
//!   from it locally by pruning the failed node's subtree.
//!
//! [`RetryPolicy`] lets a port implementation classify its failures so callers
//! may layer their own retry schedule on top. The orchestrator never retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TicketKind;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt (e.g. derived from a
        /// `Retry-After` header). `None` leaves the schedule to the caller.
        after: Option<Duration>,
    },
    /// The operation must not be retried without changing the request.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Draft contract violations
// ---------------------------------------------------------------------------

/// A malformed draft tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A draft node has a blank summary.
    #[error("{kind} draft has an empty summary")]
    EmptySummary {
        /// Kind of the offending node.
        kind: TicketKind,
    },

    /// A sub-task carries a suggested identifier, which only top-level items
    /// may propose.
    #[error("Sub-task \"{summary}\" must not carry a suggested id ({suggested_id})")]
    SuggestedIdOnSubTask {
        /// Summary of the offending sub-task.
        summary: String,
        /// The identifier it proposed.
        suggested_id: String,
    },

    /// A ticket kind string outside the closed set.
    #[error("invalid ticket type: '{0}' (valid types are: Epic, Story, Task, Sub-task, Bug)")]
    UnknownKind(String),
}

// ---------------------------------------------------------------------------
// Per-item creation failures
// ---------------------------------------------------------------------------

/// A failure reported by an [`crate::ItemCreator`] for a single item.
///
/// Carries a human-readable message; the orchestrator prefixes it with the
/// node's kind and summary when recording it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CreateItemError {
    message: String,
    retry_policy: RetryPolicy,
}

impl CreateItemError {
    /// Creates a non-retryable error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retry_policy: RetryPolicy::NonRetryable,
        }
    }

    /// Creates an error the caller may retry after the given delay.
    pub fn retryable(message: impl Into<String>, after: Option<Duration>) -> Self {
        Self {
            message: message.into(),
            retry_policy: RetryPolicy::Retryable { after },
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the retry classification.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns `true` if the failure is transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self.retry_policy, RetryPolicy::Retryable { .. })
    }
}
