#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn blocks(text: &str) -> Vec<Node> {
    match encode(text) {
        Some(Node::Document { version, content }) => {
            assert_eq!(version, 1);
            content
        }
        other => panic!("expected a document, got {other:?}"),
    }
}

#[parameterized(
    empty = { "" },
    spaces = { "   " },
    newlines = { "\n\n\n" },
    mixed = { " \t\n  \r\n " },
)]
fn blank_input_is_absent(text: &str) {
    assert_eq!(encode(text), None);
}

#[parameterized(
    h2 = { "## Steps", Line::Heading(2, "Steps") },
    h1 = { "# Title", Line::Heading(1, "Title") },
    h3_is_paragraph = { "### Deep", Line::Paragraph("### Deep") },
    hash_without_space = { "#tag", Line::Paragraph("#tag") },
    ordered = { "3. third", Line::ListItem(ListKind::Ordered, "third") },
    ordered_multi_digit = { "12. twelfth", Line::ListItem(ListKind::Ordered, "twelfth") },
    ordered_without_space = { "1.5 litres", Line::Paragraph("1.5 litres") },
    dash = { "- item", Line::ListItem(ListKind::Bullet, "item") },
    star = { "* item", Line::ListItem(ListKind::Bullet, "item") },
    dash_without_space = { "-item", Line::Paragraph("-item") },
    plain = { "just words", Line::Paragraph("just words") },
    blank = { "", Line::Blank },
)]
fn classify_lines(line: &str, expected: Line<'_>) {
    assert_eq!(classify(line), expected);
}

#[test]
fn lines_are_trimmed_before_classification() {
    assert_eq!(
        blocks("   ## Indented heading  \n\t- bullet  "),
        vec![
            Node::heading(2, "Indented heading"),
            Node::BulletList {
                content: vec![Node::list_item("bullet")]
            },
        ]
    );
}

#[test]
fn consecutive_ordered_items_share_one_list() {
    assert_eq!(
        blocks("1. a\n2. b"),
        vec![Node::OrderedList {
            content: vec![Node::list_item("a"), Node::list_item("b")]
        }]
    );
}

#[test]
fn switching_list_kind_starts_a_new_list() {
    assert_eq!(
        blocks("- x\n1. y"),
        vec![
            Node::BulletList {
                content: vec![Node::list_item("x")]
            },
            Node::OrderedList {
                content: vec![Node::list_item("y")]
            },
        ]
    );
}

#[test]
fn paragraph_between_items_closes_the_list() {
    assert_eq!(
        blocks("- a\nnote\n- b"),
        vec![
            Node::BulletList {
                content: vec![Node::list_item("a")]
            },
            Node::paragraph("note"),
            Node::BulletList {
                content: vec![Node::list_item("b")]
            },
        ]
    );
}

#[test]
fn blank_line_closes_the_list() {
    assert_eq!(
        blocks("1. a\n\n2. b"),
        vec![
            Node::OrderedList {
                content: vec![Node::list_item("a")]
            },
            Node::OrderedList {
                content: vec![Node::list_item("b")]
            },
        ]
    );
}

#[test]
fn heading_closes_the_list() {
    assert_eq!(
        blocks("* a\n# Next\n* b"),
        vec![
            Node::BulletList {
                content: vec![Node::list_item("a")]
            },
            Node::heading(1, "Next"),
            Node::BulletList {
                content: vec![Node::list_item("b")]
            },
        ]
    );
}

#[test]
fn mixed_bug_report_keeps_source_order() {
    let text = "\
## Summary
Login fails on Safari.

## Steps to reproduce
1. Open the login page
2. Enter valid credentials
3. Press submit

## Notes
- Chrome works
* Firefox works
";
    assert_eq!(
        blocks(text),
        vec![
            Node::heading(2, "Summary"),
            Node::paragraph("Login fails on Safari."),
            Node::heading(2, "Steps to reproduce"),
            Node::OrderedList {
                content: vec![
                    Node::list_item("Open the login page"),
                    Node::list_item("Enter valid credentials"),
                    Node::list_item("Press submit"),
                ]
            },
            Node::heading(2, "Notes"),
            Node::BulletList {
                content: vec![
                    Node::list_item("Chrome works"),
                    Node::list_item("Firefox works"),
                ]
            },
        ]
    );
}
