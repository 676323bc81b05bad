//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! types and traits with a single `use skim_abbrev::prelude::*;` statement.

pub use crate::fuzzy_matcher::abbrev::{AbbrevMatch, BoundaryKind, CharClass, InputCache, match_abbrev};
pub use crate::fuzzy_matcher::{IndexType, MatchIndices, ScoreType};
pub use crate::*;
