//! Error types for `SeqRank`

use arrayvec::ArrayString;
use thiserror::Error;

use crate::types::MAX_CANDIDATES;

/// Maximum length of error messages
pub const MAX_ERROR_LENGTH: usize = 256;

/// Custom result type for `SeqRank` operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for `SeqRank`
///
/// Matching itself never fails: a missing match is `None` or `NO_MATCH`.
/// These errors come from reading candidate input.
#[derive(Debug, Error)]
pub enum Error {
    /// IO operation failed
    #[error("Error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of input was not valid UTF-8
    #[error("Error: Line {line} is not valid UTF-8")]
    InvalidUtf8 {
        /// One-based line number
        line: usize,
    },

    /// Input contained no candidates
    #[error("Error: No candidates to rank")]
    EmptyInput,

    /// Input exceeded the candidate limit
    #[error("Error: Maximum candidate count of 100,000 exceeded")]
    TooManyCandidates,

    /// Input error with fixed-size message buffer
    #[error("Error: {0}")]
    Input(Box<ArrayString<MAX_ERROR_LENGTH>>),
}

impl Error {
    /// Create a new input error
    ///
    /// Messages longer than `MAX_ERROR_LENGTH` are truncated.
    pub fn input(msg: &str) -> Self {
        let mut buf = ArrayString::new();
        for c in msg.chars() {
            if buf.try_push(c).is_err() {
                break;
            }
        }
        Self::Input(Box::new(buf))
    }

    /// Get a user-friendly error message with action items
    #[must_use]
    pub fn user_message(&self) -> ArrayString<MAX_ERROR_LENGTH> {
        let mut msg = ArrayString::new();
        match self {
            Self::Io(e) => {
                let _ = msg.try_push_str(&format!(
                    "Error: {e}\nTip: Check the input path and file permissions"
                ));
            },
            Self::InvalidUtf8 { line } => {
                let _ = msg.try_push_str(&format!(
                    "Error: Line {line} is not valid UTF-8\nTip: Convert the input to UTF-8 first"
                ));
            },
            Self::EmptyInput => {
                let _ = msg.try_push_str(
                    "Error: No candidates to rank\nTip: Provide one candidate per line, with an \
                     optional tab-separated alternate text",
                );
            },
            Self::TooManyCandidates => {
                let _ = msg.try_push_str(&format!(
                    "Error: Too many candidates (max {MAX_CANDIDATES})\nTip: Pre-filter the input"
                ));
            },
            Self::Input(input_msg) => {
                let _ = msg.try_push_str("Error: ");
                let _ = msg.try_push_str(input_msg);
            },
        }
        msg
    }
}
