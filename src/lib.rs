//! Abbreviation matching for fuzzy finders.
//!
//! `skim-abbrev` decides whether a short query is an *abbreviation* of a
//! candidate line: the query characters must appear in order inside the
//! candidate, and the alignment is scored by how well it lands on word and
//! sub-word starts (`camelCase` humps, `snake_case` segments, path
//! components, digit runs). Lower internal penalties mean better matches; the
//! [`AbbrevMatcher`] flips them into the usual "higher is better" score so
//! callers can rank candidates the same way they rank any other
//! [`FuzzyMatcher`].
//!
//! Text that is not pure ASCII, and empty queries, are delegated to a general
//! purpose fuzzy matcher ([`SkimFallback`] by default).
//!
//! # Examples
//!
//! ```
//! use skim_abbrev::prelude::*;
//!
//! let matcher = AbbrevMatcher::builder().build().unwrap();
//!
//! let span = matcher.run("FooBarQux", "fbq", true).unwrap().unwrap();
//! assert_eq!(span.start, 0);
//! assert_eq!(span.end, 7);
//! assert_eq!(span.positions, Some(vec![0, 3, 6]));
//!
//! assert!(matcher.run("FooBarQux", "fbx", true).unwrap().is_none());
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::error::AbbrevError;
pub use crate::fuzzy_matcher::FuzzyMatcher;
pub use crate::fuzzy_matcher::fallback::SkimFallback;
pub use crate::matcher::{AbbrevMatcher, AbbrevMatcherBuilder, MatchSpan};
pub use crate::options::{AbbrevOptions, AbbrevOptionsBuilder, Penalties};

mod debug;
mod error;
pub mod fuzzy_matcher;
mod matcher;
pub mod options;
pub mod prelude;
pub mod util;

//------------------------------------------------------------------------------
/// Case sensitivity used by the fallback matcher
///
/// The abbreviation matcher itself always folds ASCII case.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
pub enum CaseMatching {
    /// Case-sensitive matching
    Respect,
    /// Case-insensitive matching
    Ignore,
    /// Smart case: case-insensitive unless query contains uppercase
    #[default]
    Smart,
}

//------------------------------------------------------------------------------
/// Matching algorithm to use for a batch of candidates
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
pub enum Algorithm {
    /// Boundary-aware abbreviation matching
    Abbrev,
    /// The general purpose fuzzy matcher only
    Fallback,
}

impl Algorithm {
    /// Picks the algorithm for a batch.
    ///
    /// An explicit request always wins. Otherwise the abbreviation matcher is
    /// used unless the options were parsed with `no-default`.
    pub fn resolve(requested: Option<Algorithm>, options: &AbbrevOptions) -> Algorithm {
        match requested {
            Some(algorithm) => algorithm,
            None if options.use_by_default => Algorithm::Abbrev,
            None => Algorithm::Fallback,
        }
    }
}
