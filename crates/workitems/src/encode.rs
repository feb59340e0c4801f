//! Markdown-flavoured text → rich-document tree.
//!
//! Only a small line-oriented subset is recognized. Each line is trimmed and
//! classified by prefix, in priority order:
//!
//! | Prefix | Block |
//! |--------|-------|
//! | `## ` | level-2 heading |
//! | `# ` | level-1 heading |
//! | `<digits>. ` | ordered-list item |
//! | `- ` or `* ` | bullet-list item |
//! | anything else | paragraph with the trimmed line as its only text run |
//!
//! Blank lines emit nothing. Consecutive items of the same list kind share one
//! list node; any other line, blank ones included, closes the open list.
//! Nothing here fails: unrecognized syntax degrades to a paragraph.

use crate::document::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Bullet,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading(u8, &'a str),
    ListItem(ListKind, &'a str),
    Paragraph(&'a str),
}

/// Encodes `text` into a `doc` node, or `None` when no line produced a block.
pub fn encode(text: &str) -> Option<Node> {
    let mut blocks = Vec::new();
    let mut open_list: Option<(ListKind, Vec<Node>)> = None;

    for raw in text.lines() {
        match classify(raw.trim()) {
            Line::ListItem(kind, item) => {
                if !matches!(open_list, Some((open_kind, _)) if open_kind == kind) {
                    close_list(&mut open_list, &mut blocks);
                    open_list = Some((kind, Vec::new()));
                }
                if let Some((_, items)) = open_list.as_mut() {
                    items.push(Node::list_item(item));
                }
            }
            Line::Heading(level, heading) => {
                close_list(&mut open_list, &mut blocks);
                blocks.push(Node::heading(level, heading));
            }
            Line::Paragraph(paragraph) => {
                close_list(&mut open_list, &mut blocks);
                blocks.push(Node::paragraph(paragraph));
            }
            Line::Blank => close_list(&mut open_list, &mut blocks),
        }
    }
    close_list(&mut open_list, &mut blocks);

    Node::document(blocks)
}

fn close_list(open_list: &mut Option<(ListKind, Vec<Node>)>, blocks: &mut Vec<Node>) {
    if let Some((kind, items)) = open_list.take() {
        blocks.push(match kind {
            ListKind::Ordered => Node::OrderedList { content: items },
            ListKind::Bullet => Node::BulletList { content: items },
        });
    }
}

/// Classifies an already-trimmed line.
fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Line::Heading(2, rest.trim());
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Line::Heading(1, rest.trim());
    }
    if let Some(rest) = strip_ordinal(line) {
        return Line::ListItem(ListKind::Ordered, rest.trim());
    }
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        return Line::ListItem(ListKind::Bullet, rest.trim());
    }
    Line::Paragraph(line)
}

/// Strips a leading `<digits>. ` prefix.
fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

#[cfg(test)]
#[path = "encode_tests.rs"]
mod tests;
