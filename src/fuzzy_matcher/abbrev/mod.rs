//! Boundary-aware abbreviation matching.
//!
//! A pattern matches a candidate when its characters appear, in order and
//! ignoring ASCII case, at positions the search is willing to consider: the
//! character right after the previous match, or a later word/sub-word
//! boundary. Among all such alignments the one with the lowest total penalty
//! wins.
//!
//! # Example:
//! ```
//! use skim_abbrev::AbbrevOptions;
//! use skim_abbrev::fuzzy_matcher::abbrev::{InputCache, match_abbrev};
//!
//! let options = AbbrevOptions::default();
//! let mut cache = InputCache::new(b"FooBarQux".len());
//!
//! let m = match_abbrev(b"FooBarQux", b"fbq", &options, &mut cache).unwrap().unwrap();
//! assert_eq!(m.positions, [0, 3, 6]);
//! assert_eq!(m.score, 4);
//!
//! assert!(match_abbrev(b"FooBarQux", b"fbx", &options, &mut cache).unwrap().is_none());
//! ```

mod classify;
mod search;

pub use self::classify::{BoundaryKind, CharClass, Classifier, InputCache};
pub use self::search::AbbrevMatch;

use self::search::Search;
use crate::{AbbrevError, AbbrevOptions};

/// Finds the cheapest alignment of `pattern` inside `input`.
///
/// Both slices are expected to be ASCII; callers route anything else to a
/// general purpose matcher. `cache` is reset for `input` and can be reused for
/// the next candidate.
///
/// Returns `Ok(None)` when there is no match, and an error only when the
/// options cannot classify a character of `input`.
pub fn match_abbrev(
    input: &[u8],
    pattern: &[u8],
    options: &AbbrevOptions,
    cache: &mut InputCache,
) -> Result<Option<AbbrevMatch>, AbbrevError> {
    cache.reset(input.len());
    if pattern.len() > input.len() {
        return Ok(None);
    }
    let pattern = pattern.to_ascii_lowercase();
    let classifier = Classifier::new(input, options, cache);
    let result = Search::new(input, &pattern, options, classifier).run()?;
    trace!(
        "abbrev {:?} in {:?}: {:?}",
        String::from_utf8_lossy(&pattern),
        String::from_utf8_lossy(input),
        result
    );
    Ok(result)
}
