#![forbid(unsafe_code)]

//! Liang/TeX pattern hyphenation.
//!
//! Load a language's pattern table and exception list into a [`PatternStore`], wrap it
//! in a [`Hyphenator`], then insert break markers into any text:
//!
//! ```
//! use texhyph::{Hyphenator, PatternStore};
//!
//! let mut store = PatternStore::new();
//! store
//!     .load_patterns(
//!         "en",
//!         ["hy3ph", "he2n", "hena4", "hen5at", "1na", "n2at", "1tio", "2io", "o2n"],
//!         ["ta-ble"],
//!     )
//!     .unwrap();
//! let hyphenator = Hyphenator::new(store);
//!
//! let (out, _) = hyphenator.hyphenate("hyphenation table", "-");
//! assert_eq!(out, "hy-phen-ation ta-ble");
//! ```

pub mod error;
pub mod hyphenator;
pub mod pattern;
pub mod segment;
pub mod source;
pub mod store;
pub mod trie;

pub use error::{LoadError, Result};
pub use hyphenator::{HYPHEN_MARKER, Hyphenator, SOFT_HYPHEN_ENTITY};
pub use pattern::{Pattern, compile_exception, compile_pattern};
pub use segment::{Segment, SegmentKind, segment};
pub use source::{PatternSource, Section, parse_pattern_source, read_pattern_source};
pub use store::PatternStore;
