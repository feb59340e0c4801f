//! Loading draft files for `create`.

use workitems::DraftTicket;

/// Parses a draft file holding either one root ticket or a list of roots.
///
/// The top-level shape is chosen from the first non-whitespace character, so
/// a mistake inside a draft is reported with serde's own message and position.
pub fn parse_drafts(text: &str) -> Result<Vec<DraftTicket>, serde_json::Error> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str(text)
    } else {
        serde_json::from_str::<DraftTicket>(text).map(|root| vec![root])
    }
}

#[cfg(test)]
#[path = "drafts_tests.rs"]
mod tests;
