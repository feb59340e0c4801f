//! Ticketforge issue-tracker infrastructure adapter.
//!
//! Implements the [`workitems::ItemCreator`] port against a Jira-style REST
//! API (`/rest/api/3/issue`) using [`reqwest`], and fetches existing issue
//! descriptions so they can be redisplayed as plain text.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Request
//! shaping, authentication and response/error parsing live here; the
//! [`workitems`] crate never sees them. There is deliberately no retry loop:
//! failures are classified with [`workitems::RetryPolicy`] and handed back.
//!
//! ## Field mapping
//!
//! | Request field | Tracker field |
//! |---------------|---------------|
//! | `parent_key` (sub-tasks) | `parent.key` |
//! | `epic_key` | [`FieldMapping::epic_link_field`] if set, else `parent.key` |
//! | `acceptance_criteria` | [`FieldMapping::acceptance_criteria_field`] if set, else appended to the description |

mod client;
mod errors;
mod payload;

pub use client::{FetchedIssue, TrackerClient, TrackerSettings};
pub use errors::TrackerError;
pub use payload::FieldMapping;
