//! Configuration for the abbreviation matcher.
//!
//! Options are built once, before a batch of matches, and then shared by
//! reference with every matching call. They are never mutated while a batch is
//! running, so there is nothing to synchronize.

use std::path::PathBuf;

use derive_builder::Builder;

use crate::AbbrevError;

/// Separators used by the `file-paths` option.
pub const PATH_SEPARATORS: &str = "\\/";
/// Sub-word separators used unless configured otherwise.
pub const DEFAULT_SUB_WORD_SEPARATORS: &str = "_-";
/// Where the `debug` option appends its log.
pub const DEFAULT_DEBUG_FILE: &str = ".abbrev.debug";
/// Default maximum distance between the first and the last matched character.
pub const DEFAULT_MAX_MATCH_SPAN: usize = 180;

/// Penalties charged by the pattern matcher
///
/// The final score of a match is the sum of the penalties charged along the
/// chosen alignment, so smaller is better.
/// Sums saturate at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalties {
    /// Charged when the first pattern character is matched in place, without
    /// scanning ahead to a boundary
    pub first_char: u32,
    /// Matching on a sub-word start
    pub sub_word_start: u32,
    /// Matching on a word start
    pub word_start: u32,
    /// Matching a sub-word start after a word start was skipped
    pub skipped_word_start: u32,
    /// Matching a sub-word start after a sub-word start was skipped
    pub skipped_sub_word_start: u32,
    /// Each word start left after the match, and each later word a pattern
    /// character jumps to, when `prefer_last_word` is set
    pub not_last_word: u32,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            first_char: 2,
            sub_word_start: 1,
            word_start: 2,
            skipped_word_start: 5,
            skipped_sub_word_start: 5,
            not_last_word: 20,
        }
    }
}

/// Abbreviation matcher options
///
/// Use [`AbbrevOptions::parse`] for the comma separated option string, or
/// [`AbbrevOptionsBuilder`] to set individual fields.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
pub struct AbbrevOptions {
    /// Use the abbreviation matcher unless another algorithm is requested
    pub use_by_default: bool,
    /// Penalize matches that do not end in the last word of the candidate
    pub prefer_last_word: bool,
    /// Characters that separate words
    #[builder(setter(into))]
    pub word_separators: String,
    /// Characters that separate sub-words inside a word
    #[builder(setter(into))]
    pub sub_word_separators: String,
    /// Append every successful match to `debug_file`
    pub debug: bool,
    /// Path of the debug log
    #[builder(setter(into))]
    pub debug_file: PathBuf,
    /// Stop at the first alignment found instead of searching for the best one
    ///
    /// The score is still the sum of the penalties along that alignment, so it
    /// varies from candidate to candidate instead of being a constant 1000.
    /// Word starts after the match are not charged.
    pub first_match_only: bool,
    /// Maximum distance between the first and the last matched character
    pub max_match_span: usize,
    /// Scoring weights
    pub penalties: Penalties,
}

impl Default for AbbrevOptions {
    fn default() -> Self {
        Self {
            use_by_default: true,
            prefer_last_word: false,
            word_separators: String::new(),
            sub_word_separators: DEFAULT_SUB_WORD_SEPARATORS.to_string(),
            debug: false,
            debug_file: PathBuf::from(DEFAULT_DEBUG_FILE),
            first_match_only: false,
            max_match_span: DEFAULT_MAX_MATCH_SPAN,
            penalties: Penalties::default(),
        }
    }
}

impl AbbrevOptionsBuilder {
    /// Builds and validates the options
    pub fn build(&mut self) -> Result<AbbrevOptions, AbbrevError> {
        let options = self
            .final_build()
            .map_err(|e| AbbrevError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

impl AbbrevOptions {
    /// Parses a comma separated list of options, starting from the defaults.
    ///
    /// * **no-default**: do not use the abbreviation matcher unless requested
    /// * **debug**: append each match to the debug log
    /// * **file-paths**: words are path components, prefer matching the last one
    /// * **fast**: accept the first alignment found
    ///
    /// Unknown options are ignored.
    pub fn parse(args: &str) -> Self {
        let mut options = Self::default();
        for token in args.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token {
                "no-default" => options.use_by_default = false,
                "debug" => options.debug = true,
                "file-paths" => {
                    options.word_separators = PATH_SEPARATORS.to_string();
                    options.prefer_last_word = true;
                }
                "fast" => options.first_match_only = true,
                other => warn!("ignoring unknown abbrev option {other:?}"),
            }
        }
        debug!("parsed abbrev options {args:?}: {options:?}");
        options
    }

    /// Checks the separator sets and the span cap.
    ///
    /// Both separator sets may be empty; such options only work on candidates
    /// made of letters and digits.
    pub fn validate(&self) -> Result<(), AbbrevError> {
        if let Some(ch) = self
            .word_separators
            .chars()
            .chain(self.sub_word_separators.chars())
            .find(|ch| !ch.is_ascii() || ch.is_ascii_alphanumeric())
        {
            return Err(AbbrevError::InvalidSeparator(ch));
        }
        if self.max_match_span == 0 {
            return Err(AbbrevError::InvalidSpan);
        }
        Ok(())
    }

    pub(crate) fn is_word_separator(&self, ch: u8) -> bool {
        self.word_separators.as_bytes().contains(&ch)
    }

    pub(crate) fn is_sub_word_separator(&self, ch: u8) -> bool {
        self.sub_word_separators.as_bytes().contains(&ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_gives_defaults() {
        assert_eq!(AbbrevOptions::parse(""), AbbrevOptions::default());
        let options = AbbrevOptions::default();
        assert!(options.use_by_default);
        assert_eq!(options.sub_word_separators, "_-");
        assert!(options.word_separators.is_empty());
        assert_eq!(options.max_match_span, 180);
    }

    #[test]
    fn parse_file_paths() {
        let options = AbbrevOptions::parse("file-paths");
        assert_eq!(options.word_separators, "\\/");
        assert!(options.prefer_last_word);
        assert!(!options.first_match_only);
    }

    #[test]
    fn parse_all_tokens() {
        let options = AbbrevOptions::parse("no-default,debug, fast ,file-paths");
        assert!(!options.use_by_default);
        assert!(options.debug);
        assert!(options.first_match_only);
        assert!(options.prefer_last_word);
    }

    #[test]
    fn parse_ignores_unknown_tokens() {
        assert_eq!(AbbrevOptions::parse("bogus,,other"), AbbrevOptions::default());
        assert!(AbbrevOptions::parse("bogus,fast").first_match_only);
    }

    #[test]
    fn parse_starts_from_defaults() {
        let first = AbbrevOptions::parse("fast,file-paths");
        assert!(first.first_match_only);
        let second = AbbrevOptions::parse("debug");
        assert!(!second.first_match_only);
        assert!(!second.prefer_last_word);
        assert!(second.word_separators.is_empty());
    }

    #[test]
    fn builder_defaults() {
        let options = AbbrevOptionsBuilder::default().build().unwrap();
        assert_eq!(options, AbbrevOptions::default());
    }

    #[test]
    fn builder_sets_fields() {
        let options = AbbrevOptionsBuilder::default()
            .word_separators(" /")
            .max_match_span(12usize)
            .first_match_only(true)
            .build()
            .unwrap();
        assert_eq!(options.word_separators, " /");
        assert_eq!(options.max_match_span, 12);
        assert!(options.first_match_only);
        assert_eq!(options.sub_word_separators, "_-");
    }

    #[test]
    fn builder_rejects_bad_separators() {
        let err = AbbrevOptionsBuilder::default()
            .sub_word_separators("_x")
            .build()
            .unwrap_err();
        assert!(matches!(err, AbbrevError::InvalidSeparator('x')));

        let err = AbbrevOptionsBuilder::default()
            .word_separators("/é")
            .build()
            .unwrap_err();
        assert!(matches!(err, AbbrevError::InvalidSeparator('é')));
    }

    #[test]
    fn builder_rejects_zero_span() {
        let err = AbbrevOptionsBuilder::default().max_match_span(0usize).build().unwrap_err();
        assert!(matches!(err, AbbrevError::InvalidSpan));
    }

    #[test]
    fn builder_allows_empty_separator_sets() {
        let options = AbbrevOptionsBuilder::default()
            .sub_word_separators("")
            .build()
            .unwrap();
        assert!(options.sub_word_separators.is_empty());
        assert!(options.word_separators.is_empty());
    }

    #[test]
    fn default_penalties() {
        let penalties = Penalties::default();
        assert_eq!(penalties.first_char, 2);
        assert_eq!(penalties.sub_word_start, 1);
        assert_eq!(penalties.word_start, 2);
        assert_eq!(penalties.skipped_word_start, 5);
        assert_eq!(penalties.skipped_sub_word_start, 5);
        assert_eq!(penalties.not_last_word, 20);
        // landing on a boundary is always cheaper than skipping past one
        assert!(penalties.word_start < penalties.skipped_word_start);
        assert!(penalties.sub_word_start < penalties.skipped_sub_word_start);
    }
}
