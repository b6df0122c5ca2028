//! Multi-field aggregation and ranked filter-sort

use tracing::{debug, trace};

use crate::score::fuzzy_score;
use crate::text::FoldedText;
use crate::types::{Candidate, NO_MATCH};

/// An item that can be scored against a filter
pub trait ScorableText {
    /// Text that is always compared
    fn text(&self) -> &str;

    /// Alternate text, compared when present and non-empty
    fn alt_text(&self) -> Option<&str> {
        None
    }

    /// Score assigned by the last ranking
    fn score(&self) -> u32;

    /// Store the aggregated score
    fn set_score(&mut self, score: u32);
}

impl ScorableText for Candidate {
    fn text(&self) -> &str {
        &self.primary_text
    }

    fn alt_text(&self) -> Option<&str> {
        self.secondary_text.as_deref()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

/// Best score of `filter` across `fields`, shifted up by one
///
/// Returns `NO_MATCH` when no field matches. Any match, including the
/// weakest one an empty filter produces, returns at least 1.
#[must_use]
pub fn score_across_fields(filter: &str, fields: &[&str]) -> u32 {
    let filter = FoldedText::new(filter);
    best_field_score(&filter, fields.iter().copied())
}

fn best_field_score<'a>(filter: &FoldedText, fields: impl IntoIterator<Item = &'a str>) -> u32 {
    let mut top = NO_MATCH;
    for field in fields {
        let target = FoldedText::new(field);
        let Some(found) = fuzzy_score(filter, 0, &target, 0, true) else {
            continue;
        };

        // Shift so a zero-scored real match stays distinguishable from `NO_MATCH`
        let score = found.score + 1;
        if score > top {
            top = score;
        }
    }
    top
}

/// Score every item against `filter` and order them by descending score
///
/// The sort is stable: items with equal scores keep their input order, so an
/// upstream alphabetical ordering survives an empty or non-discriminating filter.
#[must_use]
pub fn filter_and_rank<T: ScorableText>(filter: &str, mut items: Vec<T>) -> Vec<T> {
    let folded = FoldedText::new(filter);
    let mut matched = 0_usize;

    for item in &mut items {
        let score = match item.alt_text().filter(|alt| !alt.is_empty()) {
            Some(alt) => best_field_score(&folded, [item.text(), alt]),
            None => best_field_score(&folded, [item.text()]),
        };
        trace!(text = item.text(), score, "Scored item");
        if score != NO_MATCH {
            matched += 1;
        }
        item.set_score(score);
    }

    items.sort_by(|a, b| b.score().cmp(&a.score()));

    debug!(filter, items = items.len(), matched, "Ranked items");
    items
}

/// Drop items that did not match the last ranking
pub fn retain_matches<T: ScorableText>(items: &mut Vec<T>) {
    items.retain(|item| item.score() != NO_MATCH);
}
