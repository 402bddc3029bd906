//! Liang scoring and text-level hyphen insertion.
//!
//! # Scoring
//!
//! ```text
//! word → ".word." → every suffix walked through the trie
//!      → per-gap maximum over all matching patterns
//!      → odd level after a character = break allowed
//! ```
//!
//! Levels combine by maximum, so a longer pattern carrying an even level vetoes a
//! break that a shorter pattern marked odd. Parity, not magnitude, decides.
//!
//! Breaks are never placed after the last two characters of a word. There is no
//! minimum on the left side, and words of one or two characters never break.

use smallvec::SmallVec;
use tracing::trace;

use crate::error::Result;
use crate::pattern::{BOUNDARY, HYPHEN};
use crate::segment::{SegmentKind, segment};
use crate::source::PatternSource;
use crate::store::PatternStore;

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Plain hyphen marker.
pub const HYPHEN_MARKER: &str = "-";

/// HTML soft-hyphen entity, for output that will be rendered as HTML.
pub const SOFT_HYPHEN_ENTITY: &str = "&shy;";

type Scratch<T> = SmallVec<[T; 32]>;

// ---------------------------------------------------------------------------
// Hyphenator
// ---------------------------------------------------------------------------

/// Inserts hyphenation markers into text using one language's [`PatternStore`].
///
/// A `Hyphenator` only reads its store, so a single instance can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Hyphenator {
    store: PatternStore,
}

impl Hyphenator {
    #[must_use]
    pub fn new(store: PatternStore) -> Self {
        Self { store }
    }

    /// Build a store for `language` from a parsed pattern file.
    ///
    /// # Errors
    ///
    /// Any error from [`PatternStore::load_source`].
    pub fn from_source(language: &str, source: &PatternSource) -> Result<Self> {
        let mut store = PatternStore::new();
        store.load_source(language, source)?;
        Ok(Self::new(store))
    }

    #[must_use]
    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> PatternStore {
        self.store
    }

    /// Hyphenate every word of `text`, inserting `marker` at each break.
    ///
    /// Words found in the exception list are emitted as authored, with their hyphens
    /// replaced by `marker`. Everything that is not a letter passes through untouched.
    /// The flag is always `true`: there is no failure mode once patterns are loaded.
    #[must_use]
    pub fn hyphenate(&self, text: &str, marker: &str) -> (String, bool) {
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        for run in segment(text) {
            match run.kind {
                SegmentKind::Word => self.push_word(run.text, marker, &mut out),
                SegmentKind::Other => out.push_str(run.text),
            }
        }
        (out, true)
    }

    /// Hyphenate one word from the patterns alone, ignoring exceptions.
    #[must_use]
    pub fn hyphenate_word(&self, word: &str, marker: &str) -> String {
        let mut out = String::with_capacity(word.len() + marker.len() * 4);
        self.push_scored(word, marker, &mut out);
        out
    }

    /// Per-gap levels of `word`: entry `g` is the level of the gap after the `g`-th
    /// character. The result has one entry per character.
    #[must_use]
    pub fn markers(&self, word: &str) -> Vec<u8> {
        let levels = self.levels(word);
        levels[1..levels.len() - 1].to_vec()
    }

    fn push_word(&self, word: &str, marker: &str, out: &mut String) {
        if let Some(authored) = self.store.lookup_exception(word) {
            trace!(word, "hyphenated from exception list");
            for ch in authored.chars() {
                if ch == HYPHEN {
                    out.push_str(marker);
                } else {
                    out.push(ch);
                }
            }
            return;
        }
        trace!(word, "hyphenated from patterns");
        self.push_scored(word, marker, out);
    }

    fn push_scored(&self, word: &str, marker: &str, out: &mut String) {
        let levels = self.levels(word);
        let markers = &levels[1..levels.len() - 1];
        // Never break between or after the last two characters.
        let limit = markers.len().saturating_sub(2);
        for (gap, ch) in word.chars().enumerate() {
            out.push(ch);
            if gap < limit && markers[gap] % 2 == 1 {
                out.push_str(marker);
            }
        }
    }

    /// Levels over the bracketed word. `levels[k]` holds the gap following the `k`-th
    /// character of `.word.`, so the gap before the leading boundary is dropped.
    fn levels(&self, word: &str) -> Scratch<u8> {
        let mut bracketed: Scratch<char> = Scratch::with_capacity(word.len() + 2);
        bracketed.push(BOUNDARY);
        bracketed.extend(word.chars());
        bracketed.push(BOUNDARY);

        let mut levels: Scratch<u8> = smallvec::smallvec![0; bracketed.len()];
        for start in 0..bracketed.len() {
            for (_, weights) in self.store.match_substrings(&bracketed, start) {
                // weights[i] is the gap before bracketed[start + i].
                for (i, &weight) in weights.iter().enumerate() {
                    let Some(slot) = (start + i).checked_sub(1) else {
                        continue;
                    };
                    if let Some(level) = levels.get_mut(slot) {
                        *level = (*level).max(weight);
                    }
                }
            }
        }
        levels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    /// Entries of the US English TeX table that apply to "hyphenation".
    const KNUTH_PATTERNS: &[&str] = &[
        "hy3ph", "he2n", "hena4", "hen5at", "1na", "n2at", "1tio", "2io", "o2n",
    ];

    fn hyphenator(patterns: &[&str], exceptions: &[&str]) -> Hyphenator {
        let mut store = PatternStore::new();
        store.load_patterns("en", patterns, exceptions).unwrap();
        Hyphenator::new(store)
    }

    fn knuth() -> Hyphenator {
        hyphenator(KNUTH_PATTERNS, &["ta-ble", "as-so-ciate"])
    }

    #[test]
    fn hyphenation_example() {
        let h = knuth();
        assert_eq!(h.hyphenate_word("hyphenation", "-"), "hy-phen-ation");
        assert_eq!(h.hyphenate("hyphenation", "-"), ("hy-phen-ation".to_string(), true));
    }

    #[test]
    fn markers_align_with_gaps_after_characters() {
        let h = knuth();
        // h y p h e n a t i o n
        assert_eq!(
            h.markers("hyphenation"),
            vec![0, 3, 0, 0, 2, 5, 4, 2, 0, 2, 0]
        );
    }

    #[test]
    fn even_level_vetoes_shorter_odd_pattern() {
        let odd = hyphenator(&["b1c"], &[]);
        assert_eq!(odd.hyphenate_word("abcde", "-"), "ab-cde");

        let vetoed = hyphenator(&["b1c", "ab2cd"], &[]);
        assert_eq!(vetoed.hyphenate_word("abcde", "-"), "abcde");

        let shifted = hyphenator(&["b1c", "ab2cd", "bc3d"], &[]);
        assert_eq!(shifted.markers("abcde"), vec![0, 2, 3, 0, 0]);
        assert_eq!(shifted.hyphenate_word("abcde", "-"), "abc-de");
    }

    #[test]
    fn max_over_all_prefix_matches() {
        // Both keys start at the same offset and weigh the same gap.
        let low_long = hyphenator(&["a1b", "a2bc"], &[]);
        assert_eq!(low_long.markers("abcde"), vec![2, 0, 0, 0, 0]);
        assert_eq!(low_long.hyphenate_word("abcde", "-"), "abcde");

        let high_short = hyphenator(&["a3b", "a2bc"], &[]);
        assert_eq!(high_short.markers("abcde"), vec![3, 0, 0, 0, 0]);
        assert_eq!(high_short.hyphenate_word("abcde", "-"), "a-bcde");
    }

    #[test]
    fn leading_weight_lands_before_first_key_character() {
        let h = hyphenator(&["2b", "1c"], &[]);
        assert_eq!(h.markers("abcde"), vec![2, 1, 0, 0, 0]);
        assert_eq!(h.hyphenate_word("abcde", "-"), "ab-cde");
    }

    #[test]
    fn boundary_patterns_anchor_to_word_edges() {
        let h = hyphenator(&[".a1b", "d1e."], &[]);
        assert_eq!(h.markers("abcde"), vec![1, 0, 0, 1, 0]);
        assert_eq!(h.markers("xabcde"), vec![0, 0, 0, 0, 1, 0]);
        assert_eq!(h.hyphenate_word("abcde", "-"), "a-bcde");
    }

    #[test]
    fn last_two_gaps_never_break() {
        let h = hyphenator(&["1a1b1c1d1e1f"], &[]);
        // Only the single six-letter key matches; its first weight falls before the word.
        assert_eq!(h.hyphenate_word("abcdef", "-"), "a-b-c-d-ef");
    }

    #[test]
    fn short_words_never_break() {
        let h = hyphenator(&["a1", "b1", "c1"], &[]);
        assert_eq!(h.hyphenate_word("a", "-"), "a");
        assert_eq!(h.hyphenate_word("ab", "-"), "ab");
        assert_eq!(h.hyphenate_word("abc", "-"), "a-bc");
        assert_eq!(h.hyphenate_word("", "-"), "");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let h = knuth();
        assert_eq!(h.hyphenate_word("HYPHENATION", "-"), "HYPHENATION");
    }

    #[test]
    fn exception_wins_over_patterns() {
        let h = hyphenator(&["a1b", "b1l"], &["tab-le"]);
        assert_eq!(h.hyphenate("table", "-").0, "tab-le");
    }

    #[test]
    fn exception_marker_is_substituted() {
        let h = knuth();
        assert_eq!(h.hyphenate("associate", SOFT_HYPHEN_ENTITY).0, "as&shy;so&shy;ciate");
        assert_eq!(h.hyphenate("associate", "").0, "associate");
    }

    #[test]
    fn text_continues_after_exception() {
        let h = knuth();
        let (out, ok) = h.hyphenate("a table, then hyphenation.", "=");
        assert!(ok);
        assert_eq!(out, "a ta=ble, then hy=phen=ation.");
    }

    #[test]
    fn exception_lookup_is_exact() {
        let h = knuth();
        assert_eq!(h.hyphenate("Table tables", "-").0, "Table tables");
    }

    #[test]
    fn non_letters_pass_through() {
        let h = knuth();
        let text = "123 -- ... \t\n ?! 4.5";
        assert_eq!(h.hyphenate(text, "-"), (text.to_string(), true));
    }

    #[test]
    fn empty_store_changes_nothing() {
        let h = Hyphenator::new(PatternStore::new());
        assert_eq!(h.hyphenate("hyphenation", "-").0, "hyphenation");
    }

    #[test]
    fn from_source_loads_sections() {
        let mut src = PatternSource::new();
        src.push("patterns", KNUTH_PATTERNS.iter().copied()).unwrap();
        src.push("exceptions", ["ta-ble"]).unwrap();
        let h = Hyphenator::from_source("en", &src).unwrap();
        assert_eq!(h.store().language(), "en");
        assert_eq!(h.hyphenate("table hyphenation", "-").0, "ta-ble hy-phen-ation");
    }

    #[test]
    fn shared_across_threads() {
        let h = knuth();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| h.hyphenate("hyphenation table", "-").0))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), "hy-phen-ation ta-ble");
            }
        });
    }

    #[traced_test]
    #[test]
    fn word_paths_are_traced() {
        let h = knuth();
        let _ = h.hyphenate("table hyphenation", "-");
        assert!(logs_contain("hyphenated from exception list"));
        assert!(logs_contain("hyphenated from patterns"));
    }
}
