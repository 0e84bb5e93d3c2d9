#![forbid(unsafe_code)]

//! Word segmentation of plain text.
//!
//! A line is split into contiguous [`WordRegion`]s separated by runs of
//! spaces and tabs. Leading separators belong to the first region so that
//! indentation survives when the region is sliced back out of the text.
//!
//! # Example
//! ```
//! use boxtext_text::segment::{WordRegion, segment_words};
//!
//! let words = segment_words("  hello   world");
//! assert_eq!(words, vec![WordRegion::new(0, 7), WordRegion::new(10, 15)]);
//! ```

use std::sync::Arc;

/// Characters that separate words.
pub const SEPARATORS: [char; 2] = [' ', '\t'];

#[inline]
fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Half-open byte range `[begin, end)` of one word in a plain string.
///
/// Both offsets always fall on `char` boundaries, so a region can be used to
/// slice the string it was produced from. Equality is structural only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordRegion {
    pub begin: usize,
    pub end: usize,
}

impl WordRegion {
    #[inline]
    #[must_use]
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Slice this region out of the text it was produced from.
    #[inline]
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.begin..self.end]
    }
}

/// Split plain text into word regions.
///
/// Empty and separator-only input yield no regions.
#[must_use]
pub fn segment_words(text: &str) -> Vec<WordRegion> {
    let mut words = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut leading = true;

    for (idx, c) in text.char_indices() {
        if is_separator(c) {
            if let Some(start) = word_start.take() {
                words.push(WordRegion::new(start, idx));
            }
        } else if word_start.is_none() {
            // The first word reaches back to offset 0 to keep indentation.
            word_start = Some(if leading { 0 } else { idx });
            leading = false;
        }
    }

    if let Some(start) = word_start {
        words.push(WordRegion::new(start, text.len()));
    }

    words
}

/// Plain text together with its word regions.
///
/// This is the structural key component shared by the min-width and wrap
/// caches. The text is part of the value so that equal offsets taken from
/// different strings never compare equal. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentedText {
    plain: Arc<str>,
    words: Arc<[WordRegion]>,
}

impl SegmentedText {
    /// Segment `plain` from scratch.
    #[must_use]
    pub fn new(plain: &str) -> Self {
        let words = segment_words(plain);
        Self {
            plain: Arc::from(plain),
            words: Arc::from(words),
        }
    }

    #[inline]
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub(crate) fn shared_plain(&self) -> Arc<str> {
        Arc::clone(&self.plain)
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[WordRegion] {
        &self.words
    }

    /// Slice `[begin, end)` of the plain text.
    #[inline]
    #[must_use]
    pub fn span(&self, begin: usize, end: usize) -> &str {
        &self.plain[begin..end]
    }

    /// Iterate over the word texts.
    pub fn iter_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|w| w.slice(&self.plain))
    }

    /// Byte range covering all words, if any.
    #[must_use]
    pub fn content_range(&self) -> Option<(usize, usize)> {
        match (self.words.first(), self.words.last()) {
            (Some(first), Some(last)) => Some((first.begin, last.end)),
            _ => None,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn regions_are_ordered_and_disjoint(s in "[a-c \t]{0,40}") {
            let words = segment_words(&s);
            for w in &words {
                prop_assert!(w.begin < w.end);
                prop_assert!(w.end <= s.len());
            }
            for pair in words.windows(2) {
                prop_assert!(pair[0].end < pair[1].begin);
            }
        }

        #[test]
        fn words_have_no_inner_separators(s in "[a-c \t]{0,40}") {
            for (i, w) in segment_words(&s).iter().enumerate() {
                let text = w.slice(&s);
                let body = if i == 0 { text.trim_start_matches(SEPARATORS) } else { text };
                prop_assert!(!body.contains(SEPARATORS));
                prop_assert!(!body.is_empty());
            }
        }

        #[test]
        fn first_region_starts_at_zero(s in "[ \t]{0,4}[a-c]{1,5}[a-c \t]{0,20}") {
            let words = segment_words(&s);
            prop_assert_eq!(words[0].begin, 0);
        }

        #[test]
        fn words_match_whitespace_split(s in "[a-c \t]{0,40}") {
            let ours: Vec<String> = segment_words(&s)
                .iter()
                .map(|w| w.slice(&s).trim_start_matches(SEPARATORS).to_string())
                .collect();
            let std: Vec<String> = s.split(SEPARATORS).filter(|p| !p.is_empty()).map(String::from).collect();
            prop_assert_eq!(ours, std);
        }
    }
}
