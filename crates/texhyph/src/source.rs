//! Pattern-file grammar.
//!
//! A pattern file is a flat token stream: the identifiers `patterns` and `exceptions`
//! switch the current section, and every quoted string that follows is an entry of
//! that section.
//!
//! ```text
//! // US English (excerpt)
//! patterns
//!     "hy3ph" "he2n" "hena4" `hen5at`
//! exceptions
//!     "ta-ble" "as-so-ciate"
//! ```
//!
//! Double-quoted strings understand `\"` and `\\`; back-quoted strings are raw and may
//! span lines. `//` and `/* */` comments, whitespace and commas are ignored.
//!
//! Any other token outside a string is an error. Readers that silently skip stray
//! punctuation or bare digits accept files this parser rejects with
//! [`LoadError::UnexpectedCharacter`]; a skipped token is usually a typo in a
//! pattern, so it is reported with its line.

use std::borrow::Cow;
use std::io::Read;
use std::str::FromStr;

use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// A named list in a pattern file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Patterns,
    Exceptions,
}

impl Section {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Patterns => "patterns",
            Self::Exceptions => "exceptions",
        }
    }
}

impl FromStr for Section {
    type Err = LoadError;

    /// Unknown names fail with [`LoadError::UnrecognizedSection`] at line 0, meaning
    /// the name did not come from a file.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "patterns" => Ok(Self::Patterns),
            "exceptions" => Ok(Self::Exceptions),
            other => Err(LoadError::UnrecognizedSection {
                name: other.to_string(),
                line: 0,
            }),
        }
    }
}

/// Raw pattern and exception strings, quotes already stripped, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSource {
    patterns: Vec<String>,
    exceptions: Vec<String>,
}

impl PatternSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    pub fn push_entry(&mut self, section: Section, entry: impl Into<String>) {
        match section {
            Section::Patterns => self.patterns.push(entry.into()),
            Section::Exceptions => self.exceptions.push(entry.into()),
        }
    }

    /// Append entries under a section named by `tag`.
    ///
    /// # Errors
    ///
    /// [`LoadError::UnrecognizedSection`] when `tag` is neither `patterns` nor
    /// `exceptions`.
    pub fn push<I>(&mut self, tag: &str, entries: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let section: Section = tag.parse()?;
        for entry in entries {
            self.push_entry(section, entry);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse pattern-file text.
///
/// # Errors
///
/// Grammar errors carry the 1-based line where the offending token starts.
pub fn parse_pattern_source(input: &str) -> Result<PatternSource> {
    let mut lexer = Lexer::new(input);
    let mut source = PatternSource::new();
    let mut section = None;

    loop {
        match lexer.next_token()? {
            Token::Eof => break,
            Token::Ident { name, line } => {
                section = Some(name.parse::<Section>().map_err(|_| {
                    LoadError::UnrecognizedSection {
                        name: name.to_string(),
                        line,
                    }
                })?);
            }
            Token::Entry { text, line } => {
                let Some(current) = section else {
                    return Err(LoadError::EntryOutsideSection { line });
                };
                source.push_entry(current, text);
            }
        }
    }

    Ok(source)
}

/// Read and parse a whole pattern file.
///
/// # Errors
///
/// [`LoadError::Io`] on read failure (including invalid UTF-8), otherwise as
/// [`parse_pattern_source`].
pub fn read_pattern_source<R: Read>(mut reader: R) -> Result<PatternSource> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_pattern_source(&text)
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Ident { name: &'a str, line: usize },
    Entry { text: Cow<'a, str>, line: usize },
    Eof,
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    idx: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            idx: 0,
            line: 1,
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>> {
        loop {
            let Some(b) = self.peek_n_bytes(0) else {
                return Ok(Token::Eof);
            };
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b',' => self.advance_byte(),
                b'/' if self.peek_n_bytes(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.peek_n_bytes(1) == Some(b'*') => self.skip_block_comment()?,
                b'"' => return self.lex_quoted(),
                b'`' => return self.lex_raw(),
                _ => {
                    let ch = self.input[self.idx..].chars().next().unwrap_or('\0');
                    if is_ident_start(ch) {
                        return Ok(self.lex_identifier());
                    }
                    return Err(LoadError::UnexpectedCharacter {
                        ch,
                        line: self.line,
                    });
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(b) = self.peek_n_bytes(0) {
            if b == b'\n' {
                break;
            }
            self.advance_byte();
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let line = self.line;
        self.advance_byte(); // /
        self.advance_byte(); // *
        while let Some(b) = self.peek_n_bytes(0) {
            if b == b'*' && self.peek_n_bytes(1) == Some(b'/') {
                self.advance_byte();
                self.advance_byte();
                return Ok(());
            }
            self.advance_byte();
        }
        Err(LoadError::UnterminatedComment { line })
    }

    fn lex_quoted(&mut self) -> Result<Token<'a>> {
        let line = self.line;
        self.advance_byte();
        let content_start = self.idx;
        let mut escaped = false;
        while let Some(b) = self.peek_n_bytes(0) {
            match b {
                b'"' => {
                    let raw = &self.input[content_start..self.idx];
                    self.advance_byte();
                    let text = if escaped {
                        Cow::Owned(unescape(raw))
                    } else {
                        Cow::Borrowed(raw)
                    };
                    return Ok(Token::Entry { text, line });
                }
                b'\\' => {
                    escaped = true;
                    self.advance_byte();
                    if self.peek_n_bytes(0).is_some_and(|b| b != b'\n') {
                        self.advance_byte();
                    }
                }
                b'\n' => break,
                _ => self.advance_byte(),
            }
        }
        Err(LoadError::UnterminatedString { line })
    }

    fn lex_raw(&mut self) -> Result<Token<'a>> {
        let line = self.line;
        self.advance_byte();
        let content_start = self.idx;
        while let Some(b) = self.peek_n_bytes(0) {
            if b == b'`' {
                let text = Cow::Borrowed(&self.input[content_start..self.idx]);
                self.advance_byte();
                return Ok(Token::Entry { text, line });
            }
            self.advance_byte();
        }
        Err(LoadError::UnterminatedString { line })
    }

    fn lex_identifier(&mut self) -> Token<'a> {
        let start_idx = self.idx;
        let end = self.input[start_idx..]
            .char_indices()
            .find(|&(_, c)| !is_ident_continue(c))
            .map_or(self.input.len(), |(offset, _)| start_idx + offset);
        self.idx = end;
        Token::Ident {
            name: &self.input[start_idx..end],
            line: self.line,
        }
    }

    fn advance_byte(&mut self) {
        if self.idx >= self.bytes.len() {
            return;
        }
        if self.bytes[self.idx] == b'\n' {
            self.line += 1;
        }
        self.idx += 1;
    }

    fn peek_n_bytes(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.idx + n).copied()
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
