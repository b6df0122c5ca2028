//! Candidate input parsing

use std::io::BufRead;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Candidate, MAX_CANDIDATES};

/// Separator between primary and secondary text on an input line
pub const FIELD_SEPARATOR: char = '\t';

/// Parse one candidate per line
///
/// A tab separates the primary text from the optional secondary text; a
/// blank secondary counts as absent. Blank lines are skipped.
///
/// # Errors
/// Returns error if:
/// - Reading fails
/// - A line is not valid UTF-8
/// - More than `MAX_CANDIDATES` candidates are read
pub fn parse_candidates<R: BufRead>(mut reader: R) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    let mut raw = Vec::new();
    let mut line_no = 0;

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line_no += 1;

        let line = std::str::from_utf8(&raw).map_err(|_| Error::InvalidUtf8 { line: line_no })?;
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        if candidates.len() >= MAX_CANDIDATES {
            return Err(Error::TooManyCandidates);
        }
        candidates.push(parse_line(line));
    }

    debug!(lines = line_no, candidates = candidates.len(), "Parsed candidate input");
    Ok(candidates)
}

fn parse_line(line: &str) -> Candidate {
    match line.split_once(FIELD_SEPARATOR) {
        Some((primary, secondary)) if !secondary.trim().is_empty() => {
            Candidate::new(primary).with_secondary(secondary)
        },
        Some((primary, _)) => Candidate::new(primary),
        None => Candidate::new(line),
    }
}

/// Order candidates alphabetically, ignoring case
///
/// This is the baseline a ranking preserves among tied scores.
pub fn sort_alphabetically(candidates: &mut [Candidate]) {
    candidates.sort_by_cached_key(|c| c.primary_text.to_lowercase());
}
