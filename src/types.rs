//! Common types and constants for `SeqRank`

use arrayvec::ArrayVec;

/// Maximum number of characters of a filter or target that take part in scoring
pub const MAX_TEXT_LENGTH: usize = 128;

/// Aggregated score reserved for "no field matched"
pub const NO_MATCH: u32 = 0;

/// Maximum number of lines read from candidate input
pub const MAX_CANDIDATES: usize = 100_000;

/// A successful sequence match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyScore {
    /// Raw match quality, higher is better
    pub score:   u32,
    /// Absolute character positions in the target, one per filter character
    pub matches: ArrayVec<usize, MAX_TEXT_LENGTH>,
}

/// An item ranked against a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text that is always compared
    pub primary_text:   String,
    /// Optional alternate text, compared when present
    pub secondary_text: Option<String>,
    /// Aggregated score, only meaningful after ranking
    pub score:          u32,
}

impl Candidate {
    /// Create an unscored candidate
    pub fn new(primary_text: impl Into<String>) -> Self {
        Self { primary_text: primary_text.into(), secondary_text: None, score: NO_MATCH }
    }

    /// Attach alternate text to the candidate
    #[must_use]
    pub fn with_secondary(mut self, secondary_text: impl Into<String>) -> Self {
        self.secondary_text = Some(secondary_text.into());
        self
    }
}

const _: () = {
    assert!(MAX_TEXT_LENGTH > 0);
    assert!(MAX_CANDIDATES > 0);
    assert!(NO_MATCH == 0);
};
