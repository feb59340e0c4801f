//! Newtype domain identifiers.
//!
//! Every tracker-assigned or configured identity is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging (for
//! example) an [`IssueKey`] such as `PROJ-42` with the numeric [`IssueId`]
//! `10042` the tracker assigns to the same issue, even though both travel as
//! strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is blank.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — tracker-assigned
// ---------------------------------------------------------------------------

string_id! {
    /// The human-visible key the tracker assigns to a created issue
    /// (e.g. `"PROJ-42"`).
    ///
    /// Keys are what children reference when linking to their parent or epic.
    IssueKey
}

string_id! {
    /// The tracker's internal identifier for an issue (e.g. `"10042"`).
    IssueId
}

// ---------------------------------------------------------------------------
// Identifiers — configured
// ---------------------------------------------------------------------------

string_id! {
    /// The key of the tracker project new issues are created in (e.g. `"PROJ"`).
    ProjectKey
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single invocation of the creation orchestrator.
///
/// Generated fresh for every `create` call and recorded on its tracing span so
/// all per-node events from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreationRunId(Uuid);

impl CreationRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CreationRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
