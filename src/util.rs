//! Helpers shared by the matchers, the debug log and the CLI.

use unicode_normalization::UnicodeNormalization;

use crate::fuzzy_matcher::IndexType;

/// Wraps every matched character of `line` in `open` and `close`.
///
/// `indices` are character indices in ascending order.
pub fn wrap_matches_with(line: &str, indices: &[IndexType], open: &str, close: &str) -> String {
    let mut ret = String::with_capacity(line.len() + indices.len() * (open.len() + close.len()));
    let mut peekable = indices.iter().peekable();
    for (idx, ch) in line.chars().enumerate() {
        if peekable.next_if(|&&next| next == idx).is_some() {
            ret.push_str(open);
            ret.push(ch);
            ret.push_str(close);
        } else {
            ret.push(ch);
        }
    }
    ret
}

/// Wraps every matched character of `line` in brackets: `[F]oo[B]ar`.
pub fn wrap_matches(line: &str, indices: &[IndexType]) -> String {
    wrap_matches_with(line, indices, "[", "]")
}

/// Normalize a string and return a mapping from normalized char indices to original char indices.
///
/// Returns (normalized_string, mapping) where mapping[i] gives the original char index
/// for the i-th character in the normalized string.
pub fn normalize_with_char_mapping(s: &str) -> (String, Vec<usize>) {
    let mut normalized = String::new();
    let mut mapping = Vec::new();

    for (orig_char_idx, orig_char) in s.chars().enumerate() {
        for decomposed_char in orig_char.nfd() {
            if !unicode_normalization::char::is_combining_mark(decomposed_char) {
                normalized.push(decomposed_char);
                mapping.push(orig_char_idx);
            }
        }
    }

    (normalized, mapping)
}

/// Map character indices from normalized string back to original string.
///
/// Several normalized characters can come from the same original one, the
/// result keeps a single index for each.
pub fn map_char_indices_to_original(normalized_indices: &[IndexType], char_mapping: &[usize]) -> Vec<IndexType> {
    let mut original: Vec<IndexType> = normalized_indices
        .iter()
        .filter_map(|&idx| char_mapping.get(idx).copied())
        .collect();
    original.dedup();
    original
}
