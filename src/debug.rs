//! Append-only log of abbreviation matches, enabled by the `debug` option.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::AbbrevError;
use crate::fuzzy_matcher::IndexType;
use crate::util::wrap_matches_with;

/// One line per successful match, shared by every worker of a batch.
#[derive(Debug)]
pub(crate) struct DebugLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl DebugLog {
    pub(crate) fn open(path: &Path) -> Result<Self, AbbrevError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AbbrevError::DebugLog {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("appending abbrev matches to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Records `pattern` matching `input` with the raw penalty `score`.
    ///
    /// Write failures are logged and otherwise ignored.
    pub(crate) fn record(&self, pattern: &str, score: u32, input: &str, positions: &[IndexType]) {
        let line = format!(
            "pattern: '{pattern}' score: {score} input: '{}'\n",
            wrap_matches_with(input, positions, "{", "}")
        );
        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("could not write to {}: {e}", self.path.display());
        }
    }
}
