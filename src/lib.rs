//! `SeqRank` - Fuzzy sequential matching and stable ranking for entity pickers.

#![deny(missing_debug_implementations)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]

pub mod error;
pub mod input;
#[cfg(feature = "cli")]
pub mod logging;
pub mod rank;
pub mod score;
pub mod text;
pub mod types;

pub use rank::{filter_and_rank, retain_matches, score_across_fields, ScorableText};
pub use score::{fuzzy_score, score_sequence};
pub use text::FoldedText;
pub use types::{Candidate, FuzzyScore, NO_MATCH};
