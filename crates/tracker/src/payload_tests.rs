#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn project() -> ProjectKey {
    ProjectKey::new("PROJ").unwrap()
}

fn request(kind: TicketKind) -> ItemRequest {
    ItemRequest {
        kind,
        summary: "Do the thing".into(),
        description: None,
        acceptance_criteria: None,
        parent_key: None,
        epic_key: None,
    }
}

fn custom_fields() -> FieldMapping {
    FieldMapping {
        epic_link_field: Some("customfield_10014".into()),
        acceptance_criteria_field: Some("customfield_10020".into()),
    }
}

#[test]
fn minimal_body_has_project_summary_and_type() {
    let body = create_issue_body(&project(), &request(TicketKind::Bug), &FieldMapping::default());
    assert_eq!(
        body,
        json!({
            "fields": {
                "project": { "key": "PROJ" },
                "summary": "Do the thing",
                "issuetype": { "name": "Bug" }
            }
        })
    );
}

#[test]
fn sub_task_links_parent_not_epic() {
    let mut sub_task = request(TicketKind::SubTask);
    sub_task.parent_key = IssueKey::new("PROJ-2");
    sub_task.epic_key = IssueKey::new("PROJ-1");

    let body = create_issue_body(&project(), &sub_task, &custom_fields());

    assert_eq!(body["fields"]["issuetype"]["name"], "Sub-task");
    assert_eq!(body["fields"]["parent"], json!({ "key": "PROJ-2" }));
    assert!(body["fields"].get("customfield_10014").is_none());
}

#[parameterized(
    team_managed = { FieldMapping::default(), "parent", json!({ "key": "PROJ-1" }) },
    epic_link_field = { custom_fields(), "customfield_10014", json!("PROJ-1") },
)]
fn story_links_epic(mapping: FieldMapping, field: &str, expected: Value) {
    let mut story = request(TicketKind::Story);
    story.epic_key = IssueKey::new("PROJ-1");

    let body = create_issue_body(&project(), &story, &mapping);

    assert_eq!(body["fields"][field], expected);
}

#[test]
fn description_is_sent_as_rich_document() {
    let mut bug = request(TicketKind::Bug);
    bug.description = encode("Crashes on save");

    let body = create_issue_body(&project(), &bug, &FieldMapping::default());

    assert_eq!(
        body["fields"]["description"],
        json!({
            "type": "doc",
            "version": 1,
            "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "Crashes on save" }] }]
        })
    );
}

#[test]
fn acceptance_criteria_go_to_custom_field_when_mapped() {
    let mut story = request(TicketKind::Story);
    story.acceptance_criteria = Some("- works offline".into());

    let body = create_issue_body(&project(), &story, &custom_fields());

    assert!(body["fields"].get("description").is_none());
    assert_eq!(
        body["fields"]["customfield_10020"]["content"][0]["type"],
        "bulletList"
    );
}

#[test]
fn acceptance_criteria_are_appended_to_description_otherwise() {
    let mut story = request(TicketKind::Story);
    story.description = encode("As a user I want offline mode");
    story.acceptance_criteria = Some("- works offline".into());

    let body = create_issue_body(&project(), &story, &FieldMapping::default());
    let description: Node = serde_json::from_value(body["fields"]["description"].clone()).unwrap();

    assert_eq!(
        description,
        Node::document(vec![
            Node::paragraph("As a user I want offline mode"),
            Node::heading(2, "Acceptance Criteria"),
            Node::BulletList {
                content: vec![Node::list_item("works offline")]
            },
        ])
        .unwrap()
    );
}

#[test]
fn blank_acceptance_criteria_leave_description_alone() {
    assert_eq!(with_acceptance_criteria(None, "   "), None);
}

#[test]
fn created_response_maps_to_domain_identity() {
    let response: CreateIssueResponse =
        serde_json::from_str(r#"{"id":"10042","key":"PROJ-42","self":"https://x/rest/api/3/issue/10042"}"#)
            .unwrap();
    let item = CreatedItem::try_from(response).unwrap();
    assert_eq!(item.key.as_str(), "PROJ-42");
    assert_eq!(item.id.as_str(), "10042");
}

#[test]
fn created_response_without_key_is_rejected() {
    let response: CreateIssueResponse = serde_json::from_str(r#"{"id":"1","key":""}"#).unwrap();
    assert!(matches!(
        CreatedItem::try_from(response),
        Err(TrackerError::UnexpectedResponse(_))
    ));
}

#[test]
fn fetched_issue_with_null_description_parses() {
    let response: IssueResponse =
        serde_json::from_str(r#"{"key":"PROJ-1","fields":{"summary":"S","description":null}}"#)
            .unwrap();
    assert_eq!(response.key, "PROJ-1");
    assert_eq!(response.fields.summary, "S");
    assert_eq!(response.fields.description, None);
}

#[parameterized(
    error_messages = { 400, r#"{"errorMessages":["Project does not exist"],"errors":{}}"#, "Project does not exist" },
    field_errors = { 400, r#"{"errorMessages":[],"errors":{"summary":"required","issuetype":"invalid"}}"#, "issuetype: invalid; summary: required" },
    plain_text = { 502, "upstream unavailable", "upstream unavailable" },
    html = { 503, "<html>busy</html>", "Service Unavailable" },
    empty = { 401, "", "Unauthorized" },
)]
fn error_messages_are_readable(status: u16, body: &str, expected: &str) {
    assert_eq!(api_error_message(status, body), expected);
}
