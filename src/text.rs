//! Case folding and word-boundary classification

use arrayvec::ArrayVec;

use crate::types::MAX_TEXT_LENGTH;

/// Text prepared for matching: original characters alongside their lowercase fold
///
/// # Design
/// - Folding happens once, not per comparison
/// - `chars` and `folded` always have equal length, so positions line up
/// - Only the first `MAX_TEXT_LENGTH` characters are kept; `truncated` records the cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedText {
    /// Original characters
    chars:     ArrayVec<char, MAX_TEXT_LENGTH>,
    /// Lowercase fold of each character
    folded:    ArrayVec<char, MAX_TEXT_LENGTH>,
    /// Characters past `MAX_TEXT_LENGTH` were dropped
    truncated: bool,
}

impl FoldedText {
    /// Fold `text`, truncating it to `MAX_TEXT_LENGTH` characters
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut chars = ArrayVec::new();
        let mut folded = ArrayVec::new();
        let mut rest = text.chars();
        for c in rest.by_ref().take(MAX_TEXT_LENGTH) {
            chars.push(c);
            folded.push(fold(c));
        }
        let truncated = rest.next().is_some();

        assert_eq!(chars.len(), folded.len(), "Folded text must stay aligned");
        Self { chars, folded, truncated }
    }

    /// Returns true if characters past `MAX_TEXT_LENGTH` were dropped
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of characters kept
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if no characters were kept
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Original characters
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Lowercase characters
    #[must_use]
    pub fn folded(&self) -> &[char] {
        &self.folded
    }
}

/// Lowercase a single character, keeping one character per input character
#[must_use]
pub fn fold(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    c.to_lowercase().next().unwrap_or(c)
}

/// Check if a character separates words
#[must_use]
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(c, '\u{2010}'..='\u{2015}' | '\u{00b7}' | '\u{2026}')
}

/// Check if `pos` starts a word: the start of the text or right after a separator
#[must_use]
pub fn is_word_start(chars: &[char], pos: usize) -> bool {
    assert!(pos == 0 || pos < chars.len(), "Position out of range");
    pos == 0 || is_word_separator(chars[pos - 1])
}

/// Wrap each matched character of `target` in `open`/`close` markers
///
/// Consecutive matches share one pair of markers.
#[must_use]
pub fn highlight(target: &str, matches: &[usize], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(target.len() + matches.len() * (open.len() + close.len()));
    let mut pending = matches.iter().copied().peekable();
    let mut inside = false;

    for (pos, c) in target.chars().enumerate() {
        let hit = pending.peek() == Some(&pos);
        if hit {
            pending.next();
        }
        match (hit, inside) {
            (true, false) => {
                out.push_str(open);
                inside = true;
            },
            (false, true) => {
                out.push_str(close);
                inside = false;
            },
            _ => {},
        }
        out.push(c);
    }
    if inside {
        out.push_str(close);
    }
    out
}
