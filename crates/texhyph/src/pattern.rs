//! Pattern and exception source compilation.
//!
//! TeX patterns interleave hyphenation weights with letters. `"hy3ph"` means the
//! gap between `y` and `p` carries weight 3; every gap without a digit carries 0.
//! The boundary marker `.` is an ordinary key character, so `".hy3ph"` only matches
//! at the start of a word.

use smallvec::SmallVec;

use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Character used to bracket words before matching.
pub const BOUNDARY: char = '.';

/// Literal hyphen used in exception sources.
pub const HYPHEN: char = '-';

/// Per-gap weights of one pattern. Length is always `key.chars().count() + 1`.
pub type Weights = SmallVec<[u8; 8]>;

/// A compiled hyphenation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Letters of the pattern with the digits removed.
    pub key: String,
    /// Weight of each gap. Index 0 is before the first character, index `n` after the last.
    pub weights: Weights,
}

impl Pattern {
    /// Number of code points in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Compile a pattern-source string such as `"a1b2c"` into key `"abc"` with weights
/// `[0, 1, 2, 0]`.
///
/// # Errors
///
/// [`LoadError::InvalidPatternSyntax`] when the source is empty, contains no letters,
/// holds a character other than a letter, `.` or an ASCII digit, or places two digits
/// next to each other.
pub fn compile_pattern(source: &str) -> Result<Pattern> {
    if source.is_empty() {
        return Err(LoadError::invalid_pattern(source, "empty pattern"));
    }

    let mut key = String::with_capacity(source.len());
    let mut weights = Weights::new();
    let mut pending: Option<u8> = None;

    for ch in source.chars() {
        if ch.is_ascii_digit() {
            if pending.is_some() {
                return Err(LoadError::invalid_pattern(source, "consecutive digits"));
            }
            pending = Some(ch as u8 - b'0');
        } else if ch.is_alphabetic() || ch == BOUNDARY {
            weights.push(pending.take().unwrap_or(0));
            key.push(ch);
        } else {
            return Err(LoadError::invalid_pattern(
                source,
                format!("unexpected character {ch:?}"),
            ));
        }
    }
    weights.push(pending.unwrap_or(0));

    if key.is_empty() {
        return Err(LoadError::invalid_pattern(source, "no letters"));
    }

    debug_assert_eq!(weights.len(), key.chars().count() + 1);
    Ok(Pattern { key, weights })
}

/// Split an exception source like `"as-so-ciate"` into its bare lookup key and the
/// hyphenated form as authored.
///
/// The bare key must be a single word as [`segment`](crate::segment()) would produce
/// it, and every hyphen must sit between two letters.
///
/// # Errors
///
/// [`LoadError::InvalidException`] when the source holds a non-letter other than `-`,
/// starts or ends with a hyphen, doubles a hyphen, or has no letters at all.
pub fn compile_exception(source: &str) -> Result<(String, String)> {
    let mut bare = String::with_capacity(source.len());
    let mut after_letter = false;

    for ch in source.chars() {
        if ch == HYPHEN {
            if !after_letter {
                return Err(LoadError::invalid_exception(
                    source,
                    "hyphen must sit between two letters",
                ));
            }
            after_letter = false;
        } else if ch.is_alphabetic() {
            bare.push(ch);
            after_letter = true;
        } else {
            return Err(LoadError::invalid_exception(
                source,
                format!("unexpected character {ch:?}"),
            ));
        }
    }

    if bare.is_empty() {
        return Err(LoadError::invalid_exception(source, "no letters"));
    }
    if !after_letter {
        return Err(LoadError::invalid_exception(
            source,
            "hyphen must sit between two letters",
        ));
    }
    Ok((bare, source.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
