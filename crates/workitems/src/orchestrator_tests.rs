#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn key(value: &str) -> IssueKey {
    IssueKey::new(value).unwrap()
}

fn failure(kind: TicketKind, summary: &str, reason: &str) -> CreationFailure {
    CreationFailure {
        kind,
        summary: summary.to_string(),
        reason: reason.to_string(),
    }
}

fn ticket(key_value: &str, kind: TicketKind) -> CreatedTicket {
    CreatedTicket {
        key: key(key_value),
        summary: format!("{kind} {key_value}"),
        kind,
    }
}

#[test]
fn epic_starts_epic_context_for_non_epic_children() {
    let root = LinkContext::default();
    let epic = key("P-1");

    assert_eq!(
        root.for_child(TicketKind::Epic, &epic, TicketKind::Story),
        LinkContext {
            parent_key: None,
            epic_key: Some(epic.clone())
        }
    );
    assert_eq!(
        root.for_child(TicketKind::Epic, &epic, TicketKind::SubTask),
        LinkContext {
            parent_key: Some(epic.clone()),
            epic_key: Some(epic.clone())
        }
    );
}

#[test]
fn nested_epic_gets_no_context() {
    let ambient = LinkContext {
        parent_key: None,
        epic_key: Some(key("P-1")),
    };
    assert_eq!(
        ambient.for_child(TicketKind::Epic, &key("P-2"), TicketKind::Epic),
        LinkContext::default()
    );
    assert_eq!(
        ambient.for_child(TicketKind::Story, &key("P-2"), TicketKind::Epic),
        LinkContext::default()
    );
}

#[test]
fn non_epic_passes_ambient_epic_through() {
    let ambient = LinkContext {
        parent_key: None,
        epic_key: Some(key("P-1")),
    };
    assert_eq!(
        ambient.for_child(TicketKind::Story, &key("P-2"), TicketKind::Task),
        LinkContext {
            parent_key: None,
            epic_key: Some(key("P-1"))
        }
    );
    assert_eq!(
        ambient.for_child(TicketKind::Story, &key("P-2"), TicketKind::SubTask),
        LinkContext {
            parent_key: Some(key("P-2")),
            epic_key: Some(key("P-1"))
        }
    );
}

#[parameterized(
    short = { "Fix login", "Fix login" },
    exactly_limit = { "12345678901234567890123456789012345678901234567890", "12345678901234567890123456789012345678901234567890" },
    over_limit = { "123456789012345678901234567890123456789012345678901", "12345678901234567890123456789012345678901234567890..." },
    multibyte = { "ééééééééééééééééééééééééééééééééééééééééééééééééééé", "éééééééééééééééééééééééééééééééééééééééééééééééééé..." },
)]
fn summaries_are_truncated_in_failures(summary: &str, shown: &str) {
    let text = failure(TicketKind::Task, summary, "boom").to_string();
    assert_eq!(text, format!("Failed to create Task \"{shown}\": boom"));
}

#[test]
fn all_created_reports_count() {
    let result = AggregateResult::from_tally(Tally {
        created: vec![
            ticket("P-1", TicketKind::Epic),
            ticket("P-2", TicketKind::Story),
        ],
        failures: vec![],
        skipped: 0,
    });
    assert!(result.success);
    assert_eq!(result.message, "Successfully created 2 tickets");
}

#[test]
fn single_ticket_message_is_singular() {
    let result = AggregateResult::from_tally(Tally {
        created: vec![ticket("P-1", TicketKind::Bug)],
        failures: vec![],
        skipped: 0,
    });
    assert_eq!(result.message, "Successfully created 1 ticket");
}

#[test]
fn partial_failure_reports_count_and_reasons() {
    let result = AggregateResult::from_tally(Tally {
        created: vec![ticket("P-1", TicketKind::Epic)],
        failures: vec![
            failure(TicketKind::Story, "A", "no permission"),
            failure(TicketKind::Bug, "B", "bad field"),
        ],
        skipped: 3,
    });
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Created 1 ticket with 2 failures: \
         Failed to create Story \"A\": no permission; \
         Failed to create Bug \"B\": bad field \
         (3 dependent tickets skipped)"
    );
}

#[test]
fn total_failure_reports_reasons() {
    let result = AggregateResult::from_tally(Tally {
        created: vec![],
        failures: vec![failure(TicketKind::Epic, "E", "timeout")],
        skipped: 4,
    });
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Failed to create any tickets: Failed to create Epic \"E\": timeout"
    );
    assert_eq!(result.skipped, 4);
}

#[test]
fn result_serializes_to_wire_shape() {
    let result = AggregateResult::from_tally(Tally {
        created: vec![ticket("P-7", TicketKind::SubTask)],
        failures: vec![],
        skipped: 0,
    });
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "success": true,
            "message": "Successfully created 1 ticket",
            "createdTickets": [{ "key": "P-7", "summary": "Sub-task P-7", "type": "Sub-task" }]
        })
    );
}
