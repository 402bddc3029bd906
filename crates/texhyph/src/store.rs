//! Per-language pattern and exception tables.

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

use crate::error::{LoadError, Result};
use crate::pattern::{compile_exception, compile_pattern};
use crate::source::PatternSource;
use crate::trie::{PatternTrie, PrefixMatches};

// ---------------------------------------------------------------------------
// Pattern store
// ---------------------------------------------------------------------------

/// Compiled hyphenation data for one language.
///
/// A store is filled once by [`PatternStore::load_patterns`] and is read-only from then
/// on. Loading needs `&mut self`, so it cannot overlap with lookups; a loaded store is
/// `Send + Sync` and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    language: String,
    patterns: PatternTrie,
    /// Bare word -> hyphenated form as authored.
    exceptions: FxHashMap<String, String>,
}

impl PatternStore {
    /// An empty store with no language.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store tagged with `language`.
    #[must_use]
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// `true` until patterns have been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Bulk-load pattern and exception sources for `language`.
    ///
    /// - Same language with patterns already present: nothing happens.
    /// - Different language: the previous tables are replaced wholesale.
    /// - Any error leaves the store exactly as it was before the call.
    ///
    /// Duplicate keys keep the last value seen.
    ///
    /// # Errors
    ///
    /// [`LoadError::InvalidPatternSyntax`] or [`LoadError::InvalidException`] for a
    /// malformed entry, [`LoadError::MissingInput`] when `patterns` is empty.
    pub fn load_patterns<P, E>(&mut self, language: &str, patterns: P, exceptions: E) -> Result<()>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let _span = debug_span!("texhyph.load", language).entered();

        let same_language = self.language == language;
        if same_language && !self.patterns.is_empty() {
            debug!(
                patterns = self.patterns.len(),
                "patterns already loaded, skipping reload"
            );
            return Ok(());
        }

        let mut trie = PatternTrie::new();
        for source in patterns {
            trie.insert(compile_pattern(source.as_ref())?);
        }
        if trie.is_empty() {
            return Err(LoadError::MissingInput {
                language: language.to_string(),
            });
        }

        let mut table = FxHashMap::default();
        for source in exceptions {
            let (bare, hyphenated) = compile_exception(source.as_ref())?;
            table.insert(bare, hyphenated);
        }

        if !same_language && !self.patterns.is_empty() {
            debug!(previous = %self.language, "language changed, resetting tables");
        }

        self.language = language.to_string();
        self.patterns = trie;
        self.exceptions = table;
        debug!(
            patterns = self.patterns.len(),
            exceptions = self.exceptions.len(),
            "hyphenation tables loaded"
        );
        Ok(())
    }

    /// Load the two sections of a parsed pattern file.
    ///
    /// # Errors
    ///
    /// Same as [`PatternStore::load_patterns`].
    pub fn load_source(&mut self, language: &str, source: &PatternSource) -> Result<()> {
        self.load_patterns(language, source.patterns(), source.exceptions())
    }

    /// Every stored pattern whose key is a prefix of `query[start..]`, as
    /// `(key_len, weights)` pairs. Offsets are in code points; an offset at or past the
    /// end yields nothing.
    #[must_use]
    pub fn match_substrings<'a>(&'a self, query: &'a [char], start: usize) -> PrefixMatches<'a> {
        self.patterns.prefix_matches(query.get(start..).unwrap_or_default())
    }

    /// Weights of the pattern whose key is exactly `key`.
    #[must_use]
    pub fn pattern(&self, key: &str) -> Option<&[u8]> {
        self.patterns.get(key)
    }

    /// Hyphenated form of `bare`, matched exactly and case-sensitively.
    #[must_use]
    pub fn lookup_exception(&self, bare: &str) -> Option<&str> {
        self.exceptions.get(bare).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
