//! Core domain for Ticketforge.
//!
//! This crate turns narrative text into the issue tracker's rich-document
//! format and back, and creates hierarchies of drafted work items through a
//! port trait. Infrastructure crates implement the traits defined here; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`document`] | Rich-document node tree and its JSON wire shape |
//! | [`encode`] | Markdown-flavoured text → rich document |
//! | [`decode`] | Rich document → normalized plain text |
//! | [`draft`] | Draft work-item trees and ticket kinds |
//! | [`orchestrator`] | Parent-before-child creation with key propagation |
//! | [`ports`] | The [`ItemCreator`] port |
//! | [`identifiers`] | Newtype identifiers (`IssueKey`, `ProjectKey`, ...) |
//! | [`errors`] | Draft contract errors and per-item creation errors |

pub mod decode;
pub mod document;
pub mod draft;
pub mod encode;
pub mod errors;
pub mod identifiers;
pub mod orchestrator;
pub mod ports;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use decode::{decode, to_plain_text};
pub use document::{Body, Mark, Node, DOCUMENT_VERSION};
pub use draft::{DraftTicket, TicketKind};
pub use encode::encode;
pub use errors::{CreateItemError, DraftError, RetryPolicy};
pub use identifiers::{CreationRunId, IssueId, IssueKey, ProjectKey};
pub use orchestrator::{
    AggregateResult, CreatedTicket, CreationFailure, CreationOrchestrator, CreationOutcome,
};
pub use ports::{CreatedItem, ItemCreator, ItemRequest};
