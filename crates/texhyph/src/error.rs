use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors raised while loading hyphenation data.
///
/// Hyphenating text never fails; everything here happens at load time.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no pattern data supplied for language {language:?}")]
    MissingInput { language: String },

    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPatternSyntax { pattern: String, reason: String },

    #[error("invalid exception {entry:?}: {reason}")]
    InvalidException { entry: String, reason: String },

    #[error("unrecognized section {name:?} at line {line}")]
    UnrecognizedSection { name: String, line: usize },

    #[error("entry at line {line} appears before any `patterns` or `exceptions` header")]
    EntryOutsideSection { line: usize },

    #[error("unterminated string starting at line {line}")]
    UnterminatedString { line: usize },

    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment { line: usize },

    #[error("unexpected character {ch:?} at line {line}")]
    UnexpectedCharacter { ch: char, line: usize },
}

impl LoadError {
    #[must_use]
    pub fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPatternSyntax {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_exception(entry: &str, reason: impl Into<String>) -> Self {
        Self::InvalidException {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }

    /// Line number for errors that come from the pattern-file grammar.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnrecognizedSection { line, .. }
            | Self::EntryOutsideSection { line }
            | Self::UnterminatedString { line }
            | Self::UnterminatedComment { line }
            | Self::UnexpectedCharacter { line, .. } => Some(*line),
            _ => None,
        }
    }
}
