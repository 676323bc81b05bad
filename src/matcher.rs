//! This module contains the output adapter around the abbreviation search
use std::cell::RefCell;
use std::fmt::{Display, Error, Formatter};

use thread_local::ThreadLocal;

use crate::debug::DebugLog;
use crate::fuzzy_matcher::abbrev::{InputCache, match_abbrev};
use crate::fuzzy_matcher::{FuzzyMatcher, MatchIndices, ScoreType};
use crate::{AbbrevError, AbbrevOptions, CaseMatching, SkimFallback};

/// Externally reported score of a match with no penalty at all.
pub const SCORE_BASELINE: ScoreType = 1000;

/// Where a pattern matched a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Character index of the first matched character
    pub start: usize,
    /// One past the character index of the last matched character
    pub end: usize,
    /// Match quality, higher is better
    pub score: ScoreType,
    /// Matched character indices in ascending order, when requested
    pub positions: Option<MatchIndices>,
}

impl MatchSpan {
    fn from_indices(score: ScoreType, indices: MatchIndices, with_pos: bool) -> Self {
        let start = indices.first().copied().unwrap_or(0);
        let end = indices.last().map_or(0, |last| last + 1);
        Self {
            start,
            end,
            score,
            positions: with_pos.then_some(indices),
        }
    }
}

//------------------------------------------------------------------------------
/// Builder for [`AbbrevMatcher`]
#[derive(Default)]
pub struct AbbrevMatcherBuilder {
    options: AbbrevOptions,
    case: CaseMatching,
    normalize: bool,
    fallback: Option<Box<dyn FuzzyMatcher>>,
}

impl AbbrevMatcherBuilder {
    /// Sets the abbreviation options
    pub fn options(mut self, options: AbbrevOptions) -> Self {
        self.options = options;
        self
    }

    /// Case matching of the default fallback matcher
    pub fn case(mut self, case: CaseMatching) -> Self {
        self.case = case;
        self
    }

    /// Unicode normalization in the default fallback matcher
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Replaces the default fallback matcher
    pub fn fallback(mut self, fallback: Box<dyn FuzzyMatcher>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Validates the options and opens the debug log if requested
    pub fn build(self) -> Result<AbbrevMatcher, AbbrevError> {
        self.options.validate()?;
        let debug_log = if self.options.debug {
            Some(DebugLog::open(&self.options.debug_file)?)
        } else {
            None
        };
        let fallback = self
            .fallback
            .unwrap_or_else(|| Box::new(SkimFallback::new(self.case, self.normalize)));
        debug!("Initialized abbrev matcher: {:?}", self.options);
        Ok(AbbrevMatcher {
            options: self.options,
            fallback,
            debug_log,
            cache: ThreadLocal::new(),
        })
    }
}

//==============================================================================
/// Abbreviation matcher with a general purpose fallback
///
/// ASCII candidates are matched with the abbreviation search; the internal
/// penalty is reported as `1000 - penalty` so that higher scores are better.
/// Non-ASCII text and empty patterns go to the fallback matcher, whose result
/// is returned unchanged. A non-ASCII pattern never matches ASCII text.
///
/// One matcher can be shared by reference across worker threads: every thread
/// gets its own [`InputCache`].
pub struct AbbrevMatcher {
    options: AbbrevOptions,
    fallback: Box<dyn FuzzyMatcher>,
    debug_log: Option<DebugLog>,
    cache: ThreadLocal<RefCell<InputCache>>,
}

impl AbbrevMatcher {
    /// Returns a default builder for chaining
    pub fn builder() -> AbbrevMatcherBuilder {
        AbbrevMatcherBuilder::default()
    }

    /// The options this matcher was built with
    pub fn options(&self) -> &AbbrevOptions {
        &self.options
    }

    /// Matches `pattern` against `text`.
    ///
    /// `Ok(None)` means no match. Positions are only filled in when `with_pos`
    /// is set.
    pub fn run(&self, text: &str, pattern: &str, with_pos: bool) -> Result<Option<MatchSpan>, AbbrevError> {
        if pattern.is_empty() || !text.is_ascii() {
            trace!("delegating {pattern:?} in {text:?} to the fallback matcher");
            return Ok(self
                .fallback
                .fuzzy_indices(text, pattern)
                .map(|(score, indices)| MatchSpan::from_indices(score, indices, with_pos)));
        }
        if !pattern.is_ascii() {
            // no ASCII character can match it
            return Ok(None);
        }

        let mut cache = self.cache.get_or(|| RefCell::new(InputCache::default())).borrow_mut();
        let Some(found) = match_abbrev(text.as_bytes(), pattern.as_bytes(), &self.options, &mut cache)? else {
            return Ok(None);
        };

        if let Some(log) = &self.debug_log {
            log.record(pattern, found.score, text, &found.positions);
        }

        let score = SCORE_BASELINE - ScoreType::from(found.score);
        Ok(Some(MatchSpan::from_indices(score, found.positions, with_pos)))
    }
}

impl FuzzyMatcher for AbbrevMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)> {
        match self.run(choice, pattern, true) {
            Ok(span) => span.map(|span| (span.score, span.positions.unwrap_or_default())),
            Err(e) => {
                error!("abbrev matching failed on {choice:?}: {e}");
                None
            }
        }
    }
}

impl Display for AbbrevMatcher {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Abbrev: {:?})", self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbbrevOptionsBuilder;

    fn matcher() -> AbbrevMatcher {
        AbbrevMatcher::builder().build().unwrap()
    }

    #[test]
    fn reports_span_and_inverted_score() {
        let span = matcher().run("FooBarQux", "fbq", true).unwrap().unwrap();
        assert_eq!(
            span,
            MatchSpan {
                start: 0,
                end: 7,
                score: 996,
                positions: Some(vec![0, 3, 6]),
            }
        );
    }

    #[test]
    fn positions_only_when_requested() {
        let span = matcher().run("some_fbq", "fbq", false).unwrap().unwrap();
        assert_eq!((span.start, span.end, span.score), (5, 8, 994));
        assert_eq!(span.positions, None);
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(matcher().run("FooBarQux", "fbx", true).unwrap(), None);
        assert_eq!(matcher().run("", "a", true).unwrap(), None);
    }

    #[test]
    fn non_ascii_text_goes_to_fallback() {
        let span = matcher().run("Hello, 世界", "H世", true).unwrap().unwrap();
        let expected = SkimFallback::default().fuzzy_indices("Hello, 世界", "H世").unwrap();
        assert_eq!(span.score, expected.0);
        assert_eq!(span.positions, Some(expected.1));
        assert_eq!((span.start, span.end), (0, 8));
    }

    #[test]
    fn non_ascii_pattern_on_ascii_text_never_matches() {
        let matcher = AbbrevMatcher::builder()
            .case(CaseMatching::Ignore)
            .normalize(true)
            .build()
            .unwrap();
        assert_eq!(matcher.run("cafe", "café", true).unwrap(), None);
        assert_eq!(matcher.run("FooBarQux", "fbé", true).unwrap(), None);
        assert_eq!(matcher.fuzzy_indices("cafe", "café"), None);
        // non-ASCII text still goes to the fallback
        assert!(matcher.run("café", "café", true).unwrap().is_some());
    }

    #[test]
    fn fallback_result_is_unchanged() {
        // the fallback also matches inside words, which the abbreviation search refuses
        assert!(matcher().run("xfoo", "f", true).unwrap().is_none());
        let span = matcher().run("xfoo é", "f", true).unwrap().unwrap();
        assert_eq!(span.positions, Some(vec![1]));
        assert_eq!((span.start, span.end), (1, 2));
    }

    #[test]
    fn normalization_reaches_fallback() {
        let matcher = AbbrevMatcher::builder()
            .case(CaseMatching::Ignore)
            .normalize(true)
            .build()
            .unwrap();
        let span = matcher.run("café", "cafe", true).unwrap().unwrap();
        assert_eq!(span.positions, Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn custom_fallback() {
        struct Never;
        impl FuzzyMatcher for Never {
            fn fuzzy_indices(&self, _choice: &str, _pattern: &str) -> Option<(ScoreType, MatchIndices)> {
                None
            }
        }
        let matcher = AbbrevMatcher::builder().fallback(Box::new(Never)).build().unwrap();
        assert!(matcher.run("naïve", "n", true).unwrap().is_none());
        assert!(matcher.run("FooBarQux", "", true).unwrap().is_none());
        assert!(matcher.run("FooBarQux", "fbq", true).unwrap().is_some());
    }

    #[test]
    fn configuration_error_is_returned() {
        let options = AbbrevOptionsBuilder::default()
            .sub_word_separators("")
            .build()
            .unwrap();
        let matcher = AbbrevMatcher::builder().options(options).build().unwrap();
        let err = matcher.run("foo.bar", "fb", true).unwrap_err();
        assert!(matches!(err, AbbrevError::UnclassifiableCharacter { ch: '.', .. }));
        // the trait object path swallows it
        assert_eq!(matcher.fuzzy_indices("foo.bar", "fb"), None);
    }

    #[test]
    fn build_rejects_invalid_options() {
        let options = AbbrevOptions {
            max_match_span: 0,
            ..AbbrevOptions::default()
        };
        assert!(matches!(
            AbbrevMatcher::builder().options(options).build(),
            Err(AbbrevError::InvalidSpan)
        ));
    }

    #[test]
    fn fuzzy_matcher_trait() {
        let matcher = matcher();
        assert_eq!(matcher.fuzzy_indices("foo bar qux", "fbq"), Some((994, vec![0, 4, 8])));
        assert_eq!(matcher.fuzzy_match("Foo BarQux", "fbq"), Some(995));
        assert_eq!(matcher.fuzzy_match_range("some_fbq", "fbq"), Some((994, 5, 7)));
    }

    #[test]
    fn shared_across_threads() {
        let matcher = matcher();
        let inputs = ["FooBarQux", "foo bar qux", "some_fbq", "xyz"];
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| inputs.map(|input| matcher.fuzzy_match(input, "fbq"))))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), [Some(996), Some(994), Some(994), None]);
            }
        });
    }
}
