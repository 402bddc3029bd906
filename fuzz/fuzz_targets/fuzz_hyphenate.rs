#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use texhyph::{Hyphenator, PatternStore};

#[derive(Arbitrary, Debug)]
struct Input {
    patterns: Vec<String>,
    exceptions: Vec<String>,
    text: String,
    marker: String,
}

fuzz_target!(|input: Input| {
    let mut store = PatternStore::new();
    if store
        .load_patterns("fuzz", &input.patterns, &input.exceptions)
        .is_err()
    {
        return;
    }
    let hyphenator = Hyphenator::new(store);
    let (out, ok) = hyphenator.hyphenate(&input.text, &input.marker);
    assert!(ok);
    // With an empty marker both exceptions and patterns must reproduce the input.
    if input.marker.is_empty() {
        assert_eq!(out, input.text);
    }
});
