//! Request bodies and response shapes of the tracker REST API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use workitems::{
    encode, Body, CreatedItem, IssueId, IssueKey, ItemRequest, Node, ProjectKey, TicketKind,
};

use crate::errors::TrackerError;

/// Heading inserted above acceptance criteria folded into the description.
const ACCEPTANCE_CRITERIA_HEADING: &str = "Acceptance Criteria";

/// Where project-specific links and fields live.
///
/// Company-managed projects keep the epic link and acceptance criteria in
/// custom fields (`customfield_NNNNN`); team-managed projects use `parent`
/// for epics and have no dedicated criteria field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Custom field holding the epic key. `None` links epics through `parent`.
    #[serde(default)]
    pub epic_link_field: Option<String>,
    /// Custom field for acceptance criteria. `None` appends them to the
    /// description under an "Acceptance Criteria" heading.
    #[serde(default)]
    pub acceptance_criteria_field: Option<String>,
}

/// Builds the JSON body of `POST /rest/api/3/issue`.
pub(crate) fn create_issue_body(
    project: &ProjectKey,
    request: &ItemRequest,
    mapping: &FieldMapping,
) -> Value {
    let mut fields = Map::new();
    fields.insert("project".into(), json!({ "key": project.as_str() }));
    fields.insert("summary".into(), json!(request.summary));
    fields.insert("issuetype".into(), json!({ "name": request.kind.as_str() }));

    let mut description = request.description.clone();
    if let Some(criteria) = &request.acceptance_criteria {
        match &mapping.acceptance_criteria_field {
            Some(field) => {
                if let Some(document) = encode(criteria) {
                    fields.insert(field.clone(), json!(document));
                }
            }
            None => description = with_acceptance_criteria(description, criteria),
        }
    }
    if let Some(document) = description {
        fields.insert("description".into(), json!(document));
    }

    match request.kind {
        TicketKind::SubTask => {
            if let Some(parent) = &request.parent_key {
                fields.insert("parent".into(), json!({ "key": parent.as_str() }));
            }
        }
        _ => {
            if let Some(epic) = &request.epic_key {
                match &mapping.epic_link_field {
                    Some(field) => {
                        fields.insert(field.clone(), json!(epic.as_str()));
                    }
                    None => {
                        fields.insert("parent".into(), json!({ "key": epic.as_str() }));
                    }
                }
            }
        }
    }

    json!({ "fields": fields })
}

/// Appends a level-2 "Acceptance Criteria" section to `description`.
fn with_acceptance_criteria(description: Option<Node>, criteria: &str) -> Option<Node> {
    let Some(Node::Document {
        content: criteria_blocks,
        ..
    }) = encode(criteria)
    else {
        return description;
    };

    let mut blocks = match description {
        Some(Node::Document { content, .. }) => content,
        Some(other) => vec![other],
        None => Vec::new(),
    };
    blocks.push(Node::heading(2, ACCEPTANCE_CRITERIA_HEADING));
    blocks.extend(criteria_blocks);
    Node::document(blocks)
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body of a successful `POST /rest/api/3/issue`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateIssueResponse {
    id: String,
    key: String,
}

impl TryFrom<CreateIssueResponse> for CreatedItem {
    type Error = TrackerError;

    fn try_from(response: CreateIssueResponse) -> Result<Self, Self::Error> {
        let key = IssueKey::new(response.key)
            .ok_or_else(|| TrackerError::UnexpectedResponse("created issue has no key".into()))?;
        let id = IssueId::new(response.id)
            .ok_or_else(|| TrackerError::UnexpectedResponse("created issue has no id".into()))?;
        Ok(CreatedItem { key, id })
    }
}

/// Body of `GET /rest/api/3/issue/{key}?fields=summary,description`.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    pub(crate) key: String,
    pub(crate) fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueFields {
    #[serde(default)]
    pub(crate) summary: String,
    #[serde(default)]
    pub(crate) description: Option<Body>,
}

/// Jira's error envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

/// Human-readable message for a failed call.
///
/// Prefers the tracker's own error list; falls back to the raw body and then
/// to the status' reason phrase.
pub(crate) fn api_error_message(status: u16, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let messages: Vec<String> = parsed
        .error_messages
        .into_iter()
        .chain(
            parsed
                .errors
                .into_iter()
                .map(|(field, message)| format!("{field}: {message}")),
        )
        .collect();
    if !messages.is_empty() {
        return messages.join("; ");
    }

    let body = body.trim();
    if !body.is_empty() && !body.starts_with('{') && !body.starts_with('<') {
        return body.to_string();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
