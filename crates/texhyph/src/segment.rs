//! Word / non-word run classification.
//!
//! A word is a maximal run of alphabetic code points (`char::is_alphabetic`). Every
//! other code point is its own one-character run. The runs tile the input exactly.

/// Kind of a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Word,
    Other,
}

/// A contiguous slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl Segment<'_> {
    #[must_use]
    pub fn is_word(&self) -> bool {
        self.kind == SegmentKind::Word
    }
}

/// Split `text` into word and non-word runs.
#[must_use]
pub fn segment(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Iterator returned by [`segment`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let (kind, end) = if first.is_alphabetic() {
            let end = self
                .rest
                .char_indices()
                .find(|&(_, c)| !c.is_alphabetic())
                .map_or(self.rest.len(), |(idx, _)| idx);
            (SegmentKind::Word, end)
        } else {
            (SegmentKind::Other, first.len_utf8())
        };
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Segment { kind, text })
    }
}
