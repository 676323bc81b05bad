//! General purpose matcher for input the abbreviation matcher does not handle.
//!
//! Wraps `SkimMatcherV2` from the [fuzzy-matcher](https://crates.io/crates/fuzzy-matcher)
//! crate, which works on any Unicode text and reports character indices.
//!
//! # Example:
//! ```
//! use skim_abbrev::fuzzy_matcher::FuzzyMatcher;
//! use skim_abbrev::fuzzy_matcher::fallback::SkimFallback;
//!
//! let matcher = SkimFallback::default();
//! let (_score, indices) = matcher.fuzzy_indices("Hello, 世界", "h世").unwrap();
//! assert_eq!(indices, [0, 7]);
//! ```

use ::fuzzy_matcher::FuzzyMatcher as _;
use ::fuzzy_matcher::skim::SkimMatcherV2;

use crate::CaseMatching;
use crate::fuzzy_matcher::{FuzzyMatcher, MatchIndices, ScoreType};
use crate::util::{map_char_indices_to_original, normalize_with_char_mapping};

/// Fallback matcher built on `SkimMatcherV2`
pub struct SkimFallback {
    matcher: SkimMatcherV2,
    normalize: bool,
}

impl Default for SkimFallback {
    fn default() -> Self {
        Self::new(CaseMatching::default(), false)
    }
}

impl SkimFallback {
    /// Creates a fallback matcher.
    ///
    /// With `normalize`, accents are stripped from both text and pattern
    /// before matching; indices still refer to the original text.
    pub fn new(case: CaseMatching, normalize: bool) -> Self {
        let matcher = SkimMatcherV2::default();
        let matcher = match case {
            CaseMatching::Respect => matcher.respect_case(),
            CaseMatching::Ignore => matcher.ignore_case(),
            CaseMatching::Smart => matcher.smart_case(),
        };
        debug!("Initialized fallback matcher, case: {case:?}, normalize: {normalize}");
        Self { matcher, normalize }
    }
}

impl FuzzyMatcher for SkimFallback {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)> {
        if !self.normalize {
            return self.matcher.fuzzy_indices(choice, pattern);
        }
        let (choice, mapping) = normalize_with_char_mapping(choice);
        let (pattern, _) = normalize_with_char_mapping(pattern);
        let (score, indices) = self.matcher.fuzzy_indices(&choice, &pattern)?;
        Some((score, map_char_indices_to_original(&indices, &mapping)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_unicode() {
        let matcher = SkimFallback::default();
        let (_, indices) = matcher.fuzzy_indices("Hello, 世界", "H世").unwrap();
        assert_eq!(indices, [0, 7]);
        assert!(matcher.fuzzy_indices("Hello, 世界", "x").is_none());
    }

    #[test]
    fn respects_case() {
        let matcher = SkimFallback::new(CaseMatching::Respect, false);
        assert!(matcher.fuzzy_match("abc", "ABC").is_none());
        assert!(matcher.fuzzy_match("ABC", "ABC").is_some());

        let matcher = SkimFallback::new(CaseMatching::Ignore, false);
        assert!(matcher.fuzzy_match("abc", "ABC").is_some());
    }

    #[test]
    fn normalizes_accents() {
        let plain = SkimFallback::new(CaseMatching::Ignore, false);
        assert!(plain.fuzzy_match("café", "cafe").is_none());

        let normalized = SkimFallback::new(CaseMatching::Ignore, true);
        let (_, indices) = normalized.fuzzy_indices("café", "cafe").unwrap();
        assert_eq!(indices, [0, 1, 2, 3]);
        let (_, indices) = normalized.fuzzy_indices("naïve café", "ie").unwrap();
        assert_eq!(indices.len(), 2);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}
