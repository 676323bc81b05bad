//! Character classes and word boundaries of a candidate.

use crate::{AbbrevError, AbbrevOptions, Penalties};

/// Class of a single candidate character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// No character, i.e. an index outside the candidate
    NoChar,
    /// A word separator
    WordSeparator,
    /// A sub-word separator
    SubWordSeparator,
    /// `a-z`
    Lower,
    /// `A-Z`
    Upper,
    /// `0-9`
    Digit,
}

impl CharClass {
    fn is_letter(self) -> bool {
        matches!(self, CharClass::Lower | CharClass::Upper)
    }
}

/// What a candidate position means for word structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Inside a word or sub-word
    NoBoundary,
    /// First character of a word
    WordStart,
    /// First character of a sub-word (camelCase hump, snake_case segment...)
    SubWordStart,
    /// A sub-word separator, or a digit
    SubWordSeparator,
    /// A word separator
    WordSeparator,
}

impl BoundaryKind {
    /// Penalty for matching a pattern character on this boundary
    pub fn match_penalty(self, penalties: &Penalties) -> u32 {
        match self {
            BoundaryKind::SubWordStart => penalties.sub_word_start,
            BoundaryKind::WordStart => penalties.word_start,
            _ => 0,
        }
    }
}

/// Per-candidate memo of classes and boundaries
///
/// Entries are filled on first use. A cache belongs to one candidate at a
/// time: [`InputCache::reset`] must be called before switching candidates.
#[derive(Debug, Default)]
pub struct InputCache {
    classes: Vec<Option<CharClass>>,
    boundaries: Vec<Option<BoundaryKind>>,
}

impl InputCache {
    /// Creates an empty cache for a candidate of `len` characters
    pub fn new(len: usize) -> Self {
        let mut cache = Self::default();
        cache.reset(len);
        cache
    }

    /// Forgets everything and resizes for a candidate of `len` characters
    pub fn reset(&mut self, len: usize) {
        self.classes.clear();
        self.classes.resize(len, None);
        self.boundaries.clear();
        self.boundaries.resize(len, None);
    }

    /// Number of candidate characters this cache is sized for
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the cache is sized for an empty candidate
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Classifies positions of one ASCII candidate, memoizing into an
/// [`InputCache`]
pub struct Classifier<'a> {
    input: &'a [u8],
    options: &'a AbbrevOptions,
    cache: &'a mut InputCache,
}

impl<'a> Classifier<'a> {
    /// Binds a candidate to a cache. The cache is reset if it was sized for
    /// another length.
    pub fn new(input: &'a [u8], options: &'a AbbrevOptions, cache: &'a mut InputCache) -> Self {
        if cache.len() != input.len() {
            cache.reset(input.len());
        }
        Self { input, options, cache }
    }

    /// Class of the character at `index`, `NoChar` when out of range
    pub fn class_at(&mut self, index: usize) -> Result<CharClass, AbbrevError> {
        let Some(&ch) = self.input.get(index) else {
            return Ok(CharClass::NoChar);
        };
        if let Some(class) = self.cache.classes[index] {
            return Ok(class);
        }
        let class = match ch {
            b'a'..=b'z' => CharClass::Lower,
            b'A'..=b'Z' => CharClass::Upper,
            b'0'..=b'9' => CharClass::Digit,
            _ => separator_class(ch, self.options).ok_or(AbbrevError::UnclassifiableCharacter {
                ch: char::from(ch),
                index,
            })?,
        };
        self.cache.classes[index] = Some(class);
        Ok(class)
    }

    /// Boundary kind at `index`, which must be inside the candidate
    pub fn boundary_at(&mut self, index: usize) -> Result<BoundaryKind, AbbrevError> {
        if let Some(boundary) = self.cache.boundaries[index] {
            return Ok(boundary);
        }
        let curr = self.class_at(index)?;
        let prev = match index.checked_sub(1) {
            Some(prev) => self.class_at(prev)?,
            None => CharClass::NoChar,
        };
        let next = self.class_at(index + 1)?;

        let boundary = boundary_kind(prev, curr, next);
        self.cache.boundaries[index] = Some(boundary);
        Ok(boundary)
    }
}

/// Class of a character that is neither a letter nor a digit.
///
/// Sub-word separators are checked first. Whatever they do not list is a word
/// separator; with no sub-word separators configured, whatever the word
/// separators do not list is a sub-word separator. With both sets empty the
/// character cannot be classified.
fn separator_class(ch: u8, options: &AbbrevOptions) -> Option<CharClass> {
    if !options.sub_word_separators.is_empty() {
        if options.is_sub_word_separator(ch) {
            Some(CharClass::SubWordSeparator)
        } else {
            Some(CharClass::WordSeparator)
        }
    } else if !options.word_separators.is_empty() {
        if options.is_word_separator(ch) {
            Some(CharClass::WordSeparator)
        } else {
            Some(CharClass::SubWordSeparator)
        }
    } else {
        None
    }
}

/// First matching rule wins.
fn boundary_kind(prev: CharClass, curr: CharClass, next: CharClass) -> BoundaryKind {
    use CharClass::*;

    if curr == WordSeparator {
        BoundaryKind::WordSeparator
    } else if prev == NoChar || prev == WordSeparator {
        BoundaryKind::WordStart
    } else if curr == SubWordSeparator {
        BoundaryKind::SubWordSeparator
    } else if prev == SubWordSeparator {
        BoundaryKind::SubWordStart
    } else if curr == Digit {
        // digits split sub-words but never start one
        BoundaryKind::SubWordSeparator
    } else if !prev.is_letter() && curr.is_letter() {
        BoundaryKind::SubWordStart
    } else if prev != Upper && curr == Upper {
        BoundaryKind::SubWordStart
    } else if curr == Upper && next == Lower {
        // "ABCWord": the last capital of a run starts the next word
        BoundaryKind::SubWordStart
    } else {
        BoundaryKind::NoBoundary
    }
}
