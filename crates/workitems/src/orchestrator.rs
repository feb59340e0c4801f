//! Hierarchical creation of draft trees.
//!
//! [`CreationOrchestrator::create`] walks the draft forest depth-first in
//! pre-order and creates one item at a time through the [`ItemCreator`] port.
//! A child is only attempted after its parent was created, because it may need
//! the parent's key:
//!
//! - an `Epic`'s key becomes the epic context of every descendant until
//!   another `Epic` starts a new one;
//! - a `Sub-task` is linked to the key of its immediate parent;
//! - other kinds inherit the ambient epic context and have no parent link.
//!
//! ```text
//! Pending ──create ok──▶ Created ──▶ children become Pending
//!    │
//!    └──create failed──▶ Failed  ──▶ whole subtree Skipped
//! ```
//!
//! Failures are recorded per node and never escape; sibling branches keep
//! going. The aggregate result tells full, partial and total failure apart.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::draft::{DraftTicket, TicketKind};
use crate::errors::{CreateItemError, DraftError};
use crate::ports::{CreatedItem, ItemCreator, ItemRequest};
use crate::{CreationRunId, IssueKey};

/// Summaries longer than this are cut in failure messages.
const SUMMARY_DISPLAY_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one attempted node.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationOutcome {
    Created(CreatedItem),
    Failed(CreateItemError),
}

/// A successfully created ticket as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTicket {
    pub key: IssueKey,
    pub summary: String,
    #[serde(rename = "type")]
    pub kind: TicketKind,
}

/// A node whose creation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationFailure {
    pub kind: TicketKind,
    pub summary: String,
    pub reason: String,
}

impl std::fmt::Display for CreationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to create {} \"{}\": {}",
            self.kind,
            truncate(&self.summary, SUMMARY_DISPLAY_LIMIT),
            self.reason
        )
    }
}

/// Aggregate result of a creation run.
///
/// Serializes as `{ success, message, createdTickets }`. Failures and the
/// skipped count are available to Rust callers but are not part of the wire
/// shape; their text is already folded into `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub success: bool,
    pub message: String,
    pub created_tickets: Vec<CreatedTicket>,
    #[serde(skip)]
    pub failures: Vec<CreationFailure>,
    /// Descendants of failed nodes that were never attempted.
    #[serde(skip)]
    pub skipped: usize,
}

impl AggregateResult {
    fn nothing_to_create() -> Self {
        Self {
            success: true,
            message: "Nothing to create".to_string(),
            created_tickets: Vec::new(),
            failures: Vec::new(),
            skipped: 0,
        }
    }

    fn from_tally(tally: Tally) -> Self {
        let Tally {
            created,
            failures,
            skipped,
        } = tally;
        let errors = failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        let message = match (created.len(), failures.len()) {
            (n, 0) => format!("Successfully created {n} {}", plural(n)),
            (0, _) => format!("Failed to create any tickets: {errors}"),
            (n, f) => {
                let mut message = format!(
                    "Created {n} {} with {f} {}: {errors}",
                    plural(n),
                    if f == 1 { "failure" } else { "failures" }
                );
                if skipped > 0 {
                    message.push_str(&format!(" ({skipped} dependent tickets skipped)"));
                }
                message
            }
        };

        Self {
            success: failures.is_empty(),
            message,
            created_tickets: created,
            failures,
            skipped,
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "ticket"
    } else {
        "tickets"
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}

#[derive(Debug, Default)]
struct Tally {
    created: Vec<CreatedTicket>,
    failures: Vec<CreationFailure>,
    skipped: usize,
}

// ---------------------------------------------------------------------------
// Link context
// ---------------------------------------------------------------------------

/// Keys threaded from an already-created ancestor down to a child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LinkContext {
    parent_key: Option<IssueKey>,
    epic_key: Option<IssueKey>,
}

impl LinkContext {
    /// Context for a `child` of the node created under `self` as `kind`/`key`.
    fn for_child(&self, kind: TicketKind, key: &IssueKey, child: TicketKind) -> LinkContext {
        let epic_key = if kind == TicketKind::Epic {
            Some(key.clone())
        } else {
            self.epic_key.clone()
        };
        match child {
            TicketKind::Epic => LinkContext::default(),
            TicketKind::SubTask => LinkContext {
                parent_key: Some(key.clone()),
                epic_key,
            },
            TicketKind::Story | TicketKind::Task | TicketKind::Bug => LinkContext {
                parent_key: None,
                epic_key,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Creates draft trees through an [`ItemCreator`].
#[derive(Clone)]
pub struct CreationOrchestrator {
    creator: Arc<dyn ItemCreator>,
}

impl CreationOrchestrator {
    pub fn new(creator: Arc<dyn ItemCreator>) -> Self {
        Self { creator }
    }

    /// Creates every node of `roots`, parents before children.
    ///
    /// Returns `Err` only when the draft violates its contract, in which case
    /// nothing is created. Per-node failures are reported in the result.
    #[instrument(skip_all, fields(run_id = %CreationRunId::new_random(), roots = roots.len()))]
    pub async fn create(&self, roots: &[DraftTicket]) -> Result<AggregateResult, DraftError> {
        roots.iter().try_for_each(DraftTicket::validate)?;

        if roots.is_empty() {
            info!("No draft tickets supplied");
            return Ok(AggregateResult::nothing_to_create());
        }

        let mut tally = Tally::default();
        let mut pending: Vec<(&DraftTicket, LinkContext)> = roots
            .iter()
            .rev()
            .map(|root| (root, LinkContext::default()))
            .collect();

        while let Some((node, context)) = pending.pop() {
            match self.attempt(node, &context).await {
                CreationOutcome::Created(item) => {
                    info!(
                        key = %item.key,
                        id = %item.id,
                        kind = %node.kind,
                        "Created ticket"
                    );
                    for child in node.children.iter().rev() {
                        let child_context = context.for_child(node.kind, &item.key, child.kind);
                        pending.push((child, child_context));
                    }
                    tally.created.push(CreatedTicket {
                        key: item.key,
                        summary: node.summary.clone(),
                        kind: node.kind,
                    });
                }
                CreationOutcome::Failed(error) => {
                    let failure = CreationFailure {
                        kind: node.kind,
                        summary: node.summary.clone(),
                        reason: error.message().to_string(),
                    };
                    warn!(retryable = error.is_retryable(), "{failure}");
                    let descendants = node.subtree_len() - 1;
                    if descendants > 0 {
                        debug!(descendants, "Skipping subtree of failed ticket");
                    }
                    tally.skipped += descendants;
                    tally.failures.push(failure);
                }
            }
        }

        let result = AggregateResult::from_tally(tally);
        info!(
            created = result.created_tickets.len(),
            failed = result.failures.len(),
            skipped = result.skipped,
            "Creation run finished"
        );
        Ok(result)
    }

    async fn attempt(&self, node: &DraftTicket, context: &LinkContext) -> CreationOutcome {
        if node.kind == TicketKind::SubTask && context.parent_key.is_none() {
            return CreationOutcome::Failed(CreateItemError::new(
                "a Sub-task needs a parent ticket to attach to",
            ));
        }
        if let Some(suggested_id) = &node.suggested_id {
            debug!(
                suggested_id = %suggested_id,
                "Tracker assigns its own key; suggested id is advisory"
            );
        }

        let request = ItemRequest {
            kind: node.kind,
            summary: node.summary.clone(),
            description: node.description_document(),
            acceptance_criteria: node.effective_acceptance_criteria().map(str::to_string),
            parent_key: context.parent_key.clone(),
            epic_key: context.epic_key.clone(),
        };
        match self.creator.create_item(request).await {
            Ok(item) => CreationOutcome::Created(item),
            Err(error) => CreationOutcome::Failed(error),
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
