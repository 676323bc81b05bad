//! Backtracking search for the cheapest abbreviation alignment.
//!
//! Each level of recursion places one pattern character, so the call depth is
//! bounded by the pattern length. The width of the search is bounded by the
//! maximum match span. Nothing is memoized across branches.

use super::classify::{BoundaryKind, Classifier};
use crate::fuzzy_matcher::MatchIndices;
use crate::{AbbrevError, AbbrevOptions};

/// A successful alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbrevMatch {
    /// Sum of penalties, lower is better
    pub score: u32,
    /// Candidate index of each pattern character, strictly increasing
    pub positions: MatchIndices,
}

pub(super) struct Search<'a> {
    input: &'a [u8],
    /// ASCII-lowercased pattern
    pattern: &'a [u8],
    options: &'a AbbrevOptions,
    classifier: Classifier<'a>,
}

impl<'a> Search<'a> {
    pub(super) fn new(
        input: &'a [u8],
        pattern: &'a [u8],
        options: &'a AbbrevOptions,
        classifier: Classifier<'a>,
    ) -> Self {
        Self {
            input,
            pattern,
            options,
            classifier,
        }
    }

    pub(super) fn run(mut self) -> Result<Option<AbbrevMatch>, AbbrevError> {
        self.step(0, 0, None)
    }

    /// Best alignment of `pattern[pat_idx..]` inside `input[input_idx..]`.
    ///
    /// `first_matched` is the candidate index of the first pattern character,
    /// once placed.
    fn step(
        &mut self,
        input_idx: usize,
        pat_idx: usize,
        first_matched: Option<usize>,
    ) -> Result<Option<AbbrevMatch>, AbbrevError> {
        if pat_idx == self.pattern.len() {
            let score = self.not_last_word_penalty(input_idx)?;
            return Ok(Some(AbbrevMatch {
                score,
                positions: vec![0; self.pattern.len()],
            }));
        }
        if input_idx == self.input.len() || self.exceeds_span(input_idx, first_matched) {
            return Ok(None);
        }

        let options = self.options;
        let penalties = &options.penalties;
        let pat_ch = self.pattern[pat_idx];
        let mut best: Option<AbbrevMatch> = None;

        // match the current character in place
        if self.input[input_idx].to_ascii_lowercase() == pat_ch {
            let (first, penalty) = match first_matched {
                Some(first) => (first, 0),
                None => (input_idx, penalties.first_char),
            };
            if let Some(mut found) = self.step(input_idx + 1, pat_idx + 1, Some(first))? {
                found.score = found.score.saturating_add(penalty);
                found.positions[pat_idx] = input_idx;
                if options.first_match_only {
                    return Ok(Some(found));
                }
                best = Some(found);
            }
        }

        // or jump ahead to a later boundary
        let mut skipped = BoundaryKind::NoBoundary;
        note_skipped(&mut skipped, self.classifier.boundary_at(input_idx)?);

        let mut accumulated = 0;
        for i in input_idx + 1..self.input.len() {
            if self.exceeds_span(i, first_matched) {
                break;
            }
            let boundary = self.classifier.boundary_at(i)?;
            if boundary == BoundaryKind::NoBoundary {
                continue;
            }
            let char_penalty = boundary.match_penalty(penalties);

            if self.input[i].to_ascii_lowercase() == pat_ch {
                let first = first_matched.unwrap_or(i);
                if let Some(mut found) = self.step(i + 1, pat_idx + 1, Some(first))? {
                    let mut extra = 0;
                    if options.prefer_last_word && pat_idx > 0 && boundary == BoundaryKind::WordStart {
                        extra = penalties.not_last_word;
                    }
                    if boundary == BoundaryKind::SubWordStart {
                        extra = extra.saturating_add(match skipped {
                            BoundaryKind::WordStart => penalties.skipped_word_start,
                            BoundaryKind::SubWordStart => penalties.skipped_sub_word_start,
                            _ => 0,
                        });
                    }
                    found.score = found
                        .score
                        .saturating_add(accumulated)
                        .saturating_add(char_penalty)
                        .saturating_add(extra);
                    found.positions[pat_idx] = i;
                    if options.first_match_only {
                        return Ok(Some(found));
                    }
                    if best.as_ref().is_none_or(|best| found.score < best.score) {
                        best = Some(found);
                    }
                }
            }

            note_skipped(&mut skipped, boundary);
            if pat_idx > 0 {
                accumulated = accumulated.saturating_add(char_penalty);
            }
        }

        Ok(best)
    }

    fn exceeds_span(&self, index: usize, first_matched: Option<usize>) -> bool {
        first_matched.is_some_and(|first| index + 1 - first > self.options.max_match_span)
    }

    /// Penalty for every word start after the end of the match.
    fn not_last_word_penalty(&mut self, start: usize) -> Result<u32, AbbrevError> {
        if !self.options.prefer_last_word || self.options.first_match_only {
            return Ok(0);
        }
        let mut penalty: u32 = 0;
        for i in start..self.input.len() {
            if self.classifier.boundary_at(i)? == BoundaryKind::WordStart {
                penalty = penalty.saturating_add(self.options.penalties.not_last_word);
            }
        }
        Ok(penalty)
    }
}

/// Once a word start was skipped, later skips count as word starts.
fn note_skipped(skipped: &mut BoundaryKind, boundary: BoundaryKind) {
    match boundary {
        BoundaryKind::WordStart => *skipped = BoundaryKind::WordStart,
        BoundaryKind::SubWordStart if *skipped != BoundaryKind::WordStart => *skipped = BoundaryKind::SubWordStart,
        _ => {}
    }
}
