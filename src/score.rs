//! Character-sequence scorer
//!
//! Finds the best order-preserving alignment of a filter inside a target and
//! scores it. Scoring is per matched character:
//!
//! - `BASE_SCORE`, plus `EXACT_CASE_BONUS` when the case is identical
//! - first filter character: when placed on the first occurrence of that
//!   character, `TEXT_START_BONUS` at position 0 or `WORD_START_BONUS` after a
//!   separator; any other placement takes a leading penalty of up to `MAX_PENALTY`
//! - later characters: `CONSECUTIVE_BONUS` when adjacent to the previous match,
//!   otherwise a gap penalty of up to `MAX_PENALTY`
//!
//! Penalties never reach `BASE_SCORE`, so every non-empty match scores at least 1.
//! Start bonuses depend only on the text up to the first occurrence of the
//! leading filter character, so inserting unmatched characters after the first
//! matched character can only lengthen gaps and never raises the best score.

use arrayvec::ArrayVec;

use crate::text::{is_word_start, FoldedText};
use crate::types::{FuzzyScore, MAX_TEXT_LENGTH};

/// Score for any matched character
pub const BASE_SCORE: u32 = 4;

/// Bonus for a character matched with identical case
pub const EXACT_CASE_BONUS: u32 = 1;

/// Bonus for a match starting at the first character of the target
pub const TEXT_START_BONUS: u32 = 8;

/// Bonus for a match starting right after a word separator
pub const WORD_START_BONUS: u32 = 5;

/// Bonus for a character directly following the previous match
pub const CONSECUTIVE_BONUS: u32 = 5;

/// Largest leading or gap penalty
pub const MAX_PENALTY: u32 = 3;

/// Links skipping at least `FAR_LINK - 1` characters all carry `MAX_PENALTY`
const FAR_LINK: usize = MAX_PENALTY as usize + 1;

const _: () = {
    assert!(MAX_PENALTY < BASE_SCORE);
    assert!(TEXT_START_BONUS > WORD_START_BONUS);
};

/// Score `filter` against `target` with fuzzy matching from the start of both
///
/// Returns `None` when the filter's characters do not all appear in order,
/// or when the filter is longer than `MAX_TEXT_LENGTH` characters.
/// An empty filter always matches with score 0.
#[must_use]
pub fn score_sequence(filter: &str, target: &str) -> Option<u32> {
    let filter = FoldedText::new(filter);
    let target = FoldedText::new(target);
    fuzzy_score(&filter, 0, &target, 0, true).map(|found| found.score)
}

/// Score `filter[filter_start..]` against `target[target_start..]`
///
/// With `fuzzy` unset the filter must appear as a contiguous run.
/// Positions in the returned matches are absolute indices into `target`.
/// A truncated filter never matches: its dropped characters cannot be covered.
///
/// # Panics
/// Panics if either start offset is past the end of its text.
#[must_use]
pub fn fuzzy_score(
    filter: &FoldedText,
    filter_start: usize,
    target: &FoldedText,
    target_start: usize,
    fuzzy: bool,
) -> Option<FuzzyScore> {
    assert!(filter_start <= filter.len(), "Filter offset out of range");
    assert!(target_start <= target.len(), "Target offset out of range");

    let pattern = &filter.folded()[filter_start..];
    let word = &target.folded()[target_start..];

    if filter.is_truncated() {
        return None;
    }
    if pattern.is_empty() {
        return Some(FuzzyScore { score: 0, matches: ArrayVec::new() });
    }
    if pattern.len() > word.len() || !is_subsequence(pattern, word) {
        return None;
    }

    Alignment::new(filter, filter_start, target, target_start, fuzzy).solve()
}

/// Check that every character of `pattern` appears in `word`, in order
fn is_subsequence(pattern: &[char], word: &[char]) -> bool {
    let mut rest = word.iter();
    pattern.iter().all(|p| rest.any(|w| w == p))
}

/// Penalty for skipping `skipped` characters, capped at `MAX_PENALTY`
fn penalty(skipped: usize) -> u32 {
    u32::try_from(skipped).map_or(MAX_PENALTY, |s| s.min(MAX_PENALTY))
}

/// Dynamic programme over (filter position, target position)
///
/// `best[i * cols + j]` is the best score of matching the first `i + 1`
/// pattern characters with pattern character `i` placed at word position `j`.
/// `from` records the word position chosen for pattern character `i - 1`.
struct Alignment<'a> {
    filter:       &'a FoldedText,
    filter_start: usize,
    target:       &'a FoldedText,
    target_start: usize,
    fuzzy:        bool,
    /// Word position of the first occurrence of the leading pattern character
    lead:         Option<usize>,
    rows:         usize,
    cols:         usize,
    best:         Vec<Option<u32>>,
    from:         Vec<usize>,
}

impl<'a> Alignment<'a> {
    fn new(
        filter: &'a FoldedText,
        filter_start: usize,
        target: &'a FoldedText,
        target_start: usize,
        fuzzy: bool,
    ) -> Self {
        let rows = filter.len() - filter_start;
        let cols = target.len() - target_start;
        assert!(rows <= MAX_TEXT_LENGTH && cols <= MAX_TEXT_LENGTH);
        let lead = filter.folded().get(filter_start).and_then(|first| {
            target.folded()[target_start..].iter().position(|c| c == first)
        });

        Self {
            filter,
            filter_start,
            target,
            target_start,
            fuzzy,
            lead,
            rows,
            cols,
            best: vec![None; rows * cols],
            from: vec![0; rows * cols],
        }
    }

    /// Score of pattern character `i` placed at word position `j`, before links
    fn char_score(&self, i: usize, j: usize) -> Option<u32> {
        let p = self.filter_start + i;
        let w = self.target_start + j;
        if self.filter.folded()[p] != self.target.folded()[w] {
            return None;
        }
        let exact =
            if self.filter.chars()[p] == self.target.chars()[w] { EXACT_CASE_BONUS } else { 0 };
        Some(BASE_SCORE + exact)
    }

    /// Score of the first pattern character placed at word position `j`
    ///
    /// Only the first occurrence can earn a start bonus; later restarts are
    /// penalized by distance like any other mid-text start.
    fn first_score(&self, j: usize) -> Option<u32> {
        let base = self.char_score(0, j)?;
        let w = self.target_start + j;
        let score = if self.lead != Some(j) {
            base - penalty(w)
        } else if w == 0 {
            base + TEXT_START_BONUS
        } else if is_word_start(self.target.chars(), w) {
            base + WORD_START_BONUS
        } else {
            base - penalty(w)
        };
        Some(score)
    }

    /// Score contributed by linking a previous match at `k` to a match at `j`
    fn link(prev: u32, k: usize, j: usize, char_score: u32) -> u32 {
        let skipped = j - k - 1;
        if skipped == 0 {
            prev + char_score + CONSECUTIVE_BONUS
        } else {
            prev + char_score - penalty(skipped)
        }
    }

    fn solve(mut self) -> Option<FuzzyScore> {
        for j in 0..self.cols {
            self.best[j] = self.first_score(j);
        }

        for i in 1..self.rows {
            let prev_row = (i - 1) * self.cols;
            let row = i * self.cols;
            // Best cell at least `MAX_PENALTY + 1` positions back; earliest wins ties
            let mut far: Option<(u32, usize)> = None;

            for j in i..self.cols {
                if j >= FAR_LINK {
                    let k = j - FAR_LINK;
                    if let Some(score) = self.best[prev_row + k] {
                        if far.is_none_or(|(top, _)| score > top) {
                            far = Some((score, k));
                        }
                    }
                }

                let Some(here) = self.char_score(i, j) else {
                    continue;
                };

                let mut pick: Option<(u32, usize)> = None;
                let mut consider = |k: usize, prev: Option<u32>| {
                    if let Some(prev) = prev {
                        let score = Self::link(prev, k, j, here);
                        if pick.is_none_or(|(top, _)| score > top) {
                            pick = Some((score, k));
                        }
                    }
                };

                if self.fuzzy {
                    if let Some((score, k)) = far {
                        consider(k, Some(score));
                    }
                    for back in (1..FAR_LINK).rev() {
                        if let Some(k) = j.checked_sub(back) {
                            consider(k, self.best[prev_row + k]);
                        }
                    }
                } else {
                    consider(j - 1, self.best[prev_row + j - 1]);
                }

                if let Some((score, k)) = pick {
                    self.best[row + j] = Some(score);
                    self.from[row + j] = k;
                }
            }
        }

        self.backtrack()
    }

    fn backtrack(&self) -> Option<FuzzyScore> {
        let last_row = (self.rows - 1) * self.cols;
        let mut end: Option<(u32, usize)> = None;
        for j in 0..self.cols {
            if let Some(score) = self.best[last_row + j] {
                if end.is_none_or(|(top, _)| score > top) {
                    end = Some((score, j));
                }
            }
        }
        let (score, mut j) = end?;

        let mut positions = [0usize; MAX_TEXT_LENGTH];
        for i in (0..self.rows).rev() {
            positions[i] = self.target_start + j;
            if i > 0 {
                j = self.from[i * self.cols + j];
            }
        }

        let mut matches = ArrayVec::new();
        matches.extend(positions[..self.rows].iter().copied());
        Some(FuzzyScore { score, matches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(filter: &str, target: &str) -> Option<u32> {
        score_sequence(filter, target)
    }

    fn matches(filter: &str, target: &str) -> Vec<usize> {
        let filter = FoldedText::new(filter);
        let target = FoldedText::new(target);
        fuzzy_score(&filter, 0, &target, 0, true).unwrap().matches.to_vec()
    }

    #[test]
    fn test_sequence_in_order() {
        assert!(score("chdr", "chandelier").unwrap() > 0);
        assert_eq!(matches("chdr", "chandelier"), vec![0, 1, 4, 9]);
    }

    #[test]
    fn test_missing_character_rejected() {
        assert_eq!(score("xyz", "chandelier"), None);
        assert_eq!(score("rc", "chandelier"), None);
        assert_eq!(score("chandeliers", "chandelier"), None);
        assert_eq!(score("a", ""), None);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(score("", "chandelier"), Some(0));
        assert_eq!(score("", ""), Some(0));
        let filter = FoldedText::new("");
        let target = FoldedText::new("kitchen");
        let found = fuzzy_score(&filter, 0, &target, 0, false).unwrap();
        assert_eq!(found.score, 0);
        assert!(found.matches.is_empty());
    }

    #[test]
    fn test_non_empty_match_scores_at_least_one() {
        for (filter, target) in [("r", "chandelier"), ("ae", "xxxxxxxaxxxxxxxe"), ("z", "az")] {
            assert!(score(filter, target).unwrap() >= 1, "{filter} in {target}");
        }
    }

    #[test]
    fn test_matches_are_ordered_and_equal_case_insensitively() {
        for (filter, target) in [
            ("chdr", "chandelier"),
            ("LR", "light.living_room"),
            ("kit", "Kitchen Light"),
            ("aaa", "banana bread"),
        ] {
            let positions = matches(filter, target);
            let chars: Vec<char> = target.chars().collect();
            assert_eq!(positions.len(), filter.chars().count());
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            for (p, f) in positions.iter().zip(filter.chars()) {
                assert!(chars[*p].eq_ignore_ascii_case(&f));
            }
        }
    }

    #[test]
    fn test_contiguous_beats_spread() {
        assert!(score("abc", "abcxxxxx").unwrap() > score("abc", "axbxcxxx").unwrap());
        assert!(score("ab", "xabx").unwrap() > score("ab", "xaxb").unwrap());
    }

    #[test]
    fn test_gap_insertion_never_increases_score() {
        let filter = "chdr";
        let mut previous = score(filter, "chdr").unwrap();
        for target in ["chdxr", "chdxxr", "chdxxxr", "chdxxxxr", "chdxxxxxxxxr"] {
            let current = score(filter, target).unwrap();
            assert!(current <= previous, "{target}: {current} > {previous}");
            previous = current;
        }
        assert!(score(filter, "chandelier").unwrap() <= score(filter, "chdelier").unwrap());
    }

    #[test]
    fn test_separator_insertion_does_not_open_better_start() {
        assert_eq!(score("ab", "aqqqab"), Some(15));
        assert!(score("ab", "aqqq ab").unwrap() <= score("ab", "aqqqab").unwrap());
        assert!(score("ab", "aqqq-ab").unwrap() <= score("ab", "aqqqab").unwrap());
    }

    /// Every target up to `len` characters over `alphabet`
    fn all_targets(alphabet: &[char], len: usize) -> Vec<String> {
        let mut targets = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..len {
            let mut next = Vec::new();
            for prefix in &frontier {
                for c in alphabet {
                    let mut t = prefix.clone();
                    t.push(*c);
                    next.push(t);
                }
            }
            targets.extend(next.iter().cloned());
            frontier = next;
        }
        targets
    }

    #[test]
    fn test_insertion_between_matches_exhaustive() {
        let alphabet = ['a', 'A', 'b', 'q', ' '];
        let inserts = [' ', '-', '_', '.', '/', 'q', 'Q', 'z'];
        let filters = ["a", "b", "ab", "ba", "aa", "Ab", "aab", "aba"];
        let targets = all_targets(&alphabet, 5);

        for filter in filters {
            let folded_filter = FoldedText::new(filter);
            for target in &targets {
                let folded_target = FoldedText::new(target);
                let Some(found) = fuzzy_score(&folded_filter, 0, &folded_target, 0, true)
                else {
                    continue;
                };
                let chars: Vec<char> = target.chars().collect();

                for pair in found.matches.windows(2) {
                    for at in pair[0] + 1..=pair[1] {
                        for c in inserts {
                            let mut widened = chars.clone();
                            widened.insert(at, c);
                            let widened: String = widened.into_iter().collect();
                            let after = score(filter, &widened)
                                .unwrap_or_else(|| panic!("{filter:?} lost {widened:?}"));
                            assert!(
                                after <= found.score,
                                "{filter:?}: {target:?} scored {} but {widened:?} scored {after}",
                                found.score
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_case_scores_higher() {
        assert!(score("Kit", "Kitchen").unwrap() > score("Kit", "kitchen").unwrap());
        assert!(score("kit", "kitchen").unwrap() > score("kit", "KITCHEN").unwrap());
        assert!(score("LR", "LivingRoom").unwrap() >= score("LR", "livingroom").unwrap());
    }

    #[test]
    fn test_start_and_word_boundary_bonus() {
        let at_start = score("liv", "living room").unwrap();
        let at_word = score("liv", "the living room").unwrap();
        let mid_word = score("liv", "oliver").unwrap();
        assert!(at_start > at_word);
        assert!(at_word > mid_word);

        for separator in [' ', '-', '_', '.', '/'] {
            let target = format!("x{separator}room");
            assert!(score("room", &target).unwrap() > score("room", "xyroom").unwrap());
        }
    }

    #[test]
    fn test_earlier_start_scores_higher() {
        assert!(score("r", "xr").unwrap() > score("r", "xxxr").unwrap());
        assert!(score("r", "xxxr").unwrap() == score("r", "xxxxxxr").unwrap());
    }

    #[test]
    fn test_prefers_word_start_alignment() {
        assert_eq!(matches("liv", "the living room"), vec![4, 5, 6]);
        assert_eq!(matches("room", "light.living_room"), vec![13, 14, 15, 16]);
    }

    #[test]
    fn test_restart_earns_no_start_bonus() {
        assert_eq!(matches("liv", "light.living_room"), vec![0, 1, 8]);
        assert!(score("liv", "living_room").unwrap() > score("liv", "light.living_room").unwrap());
    }

    #[test]
    fn test_strict_mode_requires_contiguous_run() {
        let filter = FoldedText::new("dlr");
        let target = FoldedText::new("chandelier");
        assert!(fuzzy_score(&filter, 0, &target, 0, false).is_none());
        assert!(fuzzy_score(&filter, 0, &target, 0, true).is_some());

        let filter = FoldedText::new("del");
        let found = fuzzy_score(&filter, 0, &target, 0, false).unwrap();
        assert_eq!(found.matches.to_vec(), vec![4, 5, 6]);
        assert_eq!(Some(found.score), score("del", "chandelier"));
    }

    #[test]
    fn test_offsets_are_absolute() {
        let filter = FoldedText::new("xlight");
        let target = FoldedText::new("light.light");
        let found = fuzzy_score(&filter, 1, &target, 1, true).unwrap();
        assert_eq!(found.matches.to_vec(), vec![6, 7, 8, 9, 10]);
        let whole = fuzzy_score(&filter, 1, &target, 0, true).unwrap();
        assert_eq!(whole.matches.to_vec(), vec![0, 1, 2, 3, 4]);
        assert!(whole.score > found.score);
    }

    #[test]
    fn test_offset_at_end() {
        let filter = FoldedText::new("ab");
        let target = FoldedText::new("ab");
        assert_eq!(fuzzy_score(&filter, 2, &target, 2, true).map(|f| f.score), Some(0));
        assert!(fuzzy_score(&filter, 0, &target, 2, true).is_none());
    }

    #[test]
    #[should_panic(expected = "Target offset out of range")]
    fn test_offset_past_end_panics() {
        let filter = FoldedText::new("a");
        let target = FoldedText::new("a");
        let _ = fuzzy_score(&filter, 0, &target, 5, true);
    }

    #[test]
    fn test_deterministic() {
        let first = score("kit", "Kitchen Light kit");
        for _ in 0..10 {
            assert_eq!(score("kit", "Kitchen Light kit"), first);
        }
        assert_eq!(matches("a", "aaa"), vec![0]);
    }

    #[test]
    fn test_filter_at_length_limit() {
        let target = "a".repeat(MAX_TEXT_LENGTH);
        let filter = "a".repeat(MAX_TEXT_LENGTH);
        assert!(score(&filter, &target).is_some());

        let missing_last = format!("{}z", "a".repeat(MAX_TEXT_LENGTH - 1));
        assert_eq!(score(&missing_last, &target), None);
    }

    #[test]
    fn test_filter_over_length_limit_never_matches() {
        let target = "a".repeat(MAX_TEXT_LENGTH);
        let missing_past_limit = format!("{}z", "a".repeat(MAX_TEXT_LENGTH));
        assert_eq!(score(&missing_past_limit, &target), None);

        let too_long = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert_eq!(score(&too_long, &"a".repeat(MAX_TEXT_LENGTH + 10)), None);

        let filter = FoldedText::new(&too_long);
        let folded_target = FoldedText::new(&target);
        assert!(fuzzy_score(&filter, 0, &folded_target, 0, false).is_none());
        assert!(fuzzy_score(&filter, MAX_TEXT_LENGTH, &folded_target, 0, true).is_none());
    }

    #[test]
    fn test_long_text_truncated() {
        let target = format!("{}z", "a".repeat(MAX_TEXT_LENGTH));
        assert_eq!(score("z", &target), None);
        assert!(score("a", &target).is_some());
    }

    #[test]
    fn test_unicode_case_folding() {
        assert!(score("über", "Übersicht").is_some());
        assert!(score("ÜBER", "übersicht").is_some());
        assert!(score("ΣΟ", "σοφία").is_some());
    }
}
