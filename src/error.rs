use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the abbreviation matcher
///
/// A well-formed ASCII candidate under valid options either matches or does
/// not; every variant here points at a configuration problem the caller has to
/// fix. Retrying the same call yields the same error.
#[derive(Error, Debug)]
pub enum AbbrevError {
    /// Neither separator set accounts for a character of the candidate
    #[error("could not determine the character class of {ch:?} at index {index}, no separator set covers it")]
    UnclassifiableCharacter {
        /// The offending character
        ch: char,
        /// Its index in the candidate
        index: usize,
    },
    /// A separator set contains a letter, a digit or a non-ASCII character
    #[error("invalid separator {0:?}, separators must be ASCII and neither letters nor digits")]
    InvalidSeparator(char),
    /// The maximum match span is zero
    #[error("the maximum match span must be at least 1")]
    InvalidSpan,
    /// The options builder failed
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// The debug log could not be opened
    #[error("could not open debug log {}: {source}", path.display())]
    DebugLog {
        /// Path of the debug log
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}
