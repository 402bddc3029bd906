#![no_main]

use libfuzzer_sys::fuzz_target;
use texhyph::{PatternStore, parse_pattern_source};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(source) = parse_pattern_source(text) {
        let mut store = PatternStore::new();
        let _ = store.load_source("fuzz", &source);
    }
});
