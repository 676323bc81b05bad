//! Fuzzy matching algorithms and implementations.
//!
//! This module provides the boundary-aware abbreviation algorithm and the
//! general purpose matcher it falls back to for input it does not handle.

/// Abbreviation matching algorithm
pub mod abbrev;
/// General purpose fallback matcher
pub mod fallback;

/// Character index into a candidate
pub type IndexType = usize;
/// Score reported to callers, higher is better
pub type ScoreType = i64;

/// Matched character indices, one per pattern character, ascending.
pub type MatchIndices = Vec<IndexType>;

/// Trait for fuzzy matching text patterns against choices
pub trait FuzzyMatcher: Send + Sync {
    /// fuzzy match choice with pattern, and return the score & matched indices of characters
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)>;

    /// fuzzy match choice with pattern, and return the score of matching
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType> {
        self.fuzzy_indices(choice, pattern).map(|(score, _)| score)
    }

    /// Fuzzy match and return (score, begin_char_index, end_char_index).
    ///
    /// `begin` is the character index of the first matched pattern character,
    /// `end` is the character index of the last matched pattern character.
    fn fuzzy_match_range(&self, choice: &str, pattern: &str) -> Option<(ScoreType, usize, usize)> {
        self.fuzzy_indices(choice, pattern).map(|(score, indices)| {
            let begin = indices.first().copied().unwrap_or(0);
            let end = indices.last().copied().unwrap_or(0);
            (score, begin, end)
        })
    }
}
