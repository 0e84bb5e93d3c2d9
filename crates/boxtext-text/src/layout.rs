#![forbid(unsafe_code)]

//! Greedy word wrapping and minimum-width measurement with memoization.
//!
//! [`LayoutEngine`] answers the questions a diagram element asks about its
//! text: how narrow can I get ([`min_width`](LayoutEngine::min_width)), does
//! this fit on one line ([`fits_without_wrap`](LayoutEngine::fits_without_wrap)),
//! how tall is it at this width ([`wrapped_height`](LayoutEngine::wrapped_height))
//! and which lines do I draw ([`wrap`](LayoutEngine::wrap)).
//!
//! Every query parses markup, segments the plain text into words, and then
//! measures through a [`TextMeasure`] oracle. Three bounded LRU caches sit in
//! front of the expensive steps:
//!
//! | Cache       | Key                                          | Value              |
//! |-------------|----------------------------------------------|--------------------|
//! | `words`     | plain text                                   | [`SegmentedText`]  |
//! | `min_width` | segmented text + font snapshot + flags       | `f64`              |
//! | `wrap`      | segmented text + width + font snapshot + flags | [`LayoutResult`] |
//!
//! Cache values are pure functions of their keys, so the caches are never
//! invalidated; removing them would only change latency.
//!
//! # Example
//! ```
//! use boxtext_text::{FixedAdvanceMetrics, LayoutEngine};
//!
//! let engine = LayoutEngine::default();
//! let metrics = FixedAdvanceMetrics::cells();
//!
//! // One cell of end buffer ('n') is reserved on every line.
//! let result = engine.wrap("hello world", 7.0, &metrics, false).unwrap();
//! let lines: Vec<&str> = result.lines().iter().map(|l| l.plain()).collect();
//! assert_eq!(lines, vec!["hello", "world"]);
//! assert_eq!(result.height(), 2.0);
//! ```

use crate::cache::{CacheStats, SharedLru};
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::markup::parse_markup;
use crate::measure::TextMeasure;
use crate::segment::SegmentedText;
use crate::styled::StyledText;
use boxtext_style::{MeasureContext, StyleFlags};
use std::sync::Arc;
use tracing::{debug, debug_span};
use unicode_segmentation::UnicodeSegmentation;

/// Wrapped lines of one input line plus their total height.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    lines: Vec<StyledText>,
    height: f64,
    truncated: bool,
}

impl LayoutResult {
    /// Lines in reading order.
    #[must_use]
    pub fn lines(&self) -> &[StyledText] {
        &self.lines
    }

    /// Sum of the line advances (with spacing) of all lines.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.lines.len() == 1
    }

    /// Whether some word had to be cut because it was wider than a line.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MinWidthKey {
    text: SegmentedText,
    context: MeasureContext,
    flags: StyleFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WrapKey {
    text: SegmentedText,
    width_bits: u64,
    context: MeasureContext,
    flags: StyleFlags,
}

impl WrapKey {
    fn new(text: SegmentedText, width: f64, context: MeasureContext, flags: StyleFlags) -> Self {
        Self {
            text,
            width_bits: width.to_bits(),
            context,
            flags,
        }
    }
}

/// Statistics for all three engine caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineCacheStats {
    pub words: CacheStats,
    pub min_width: CacheStats,
    pub wrap: CacheStats,
}

/// Text layout engine owning the segmentation, min-width and wrap caches.
///
/// All queries take `&self`; share one engine between threads with an `Arc`.
#[derive(Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    words: SharedLru<Arc<str>, SegmentedText>,
    min_widths: SharedLru<MinWidthKey, f64>,
    wraps: SharedLru<WrapKey, Arc<LayoutResult>>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// Create an engine with empty caches sized by `config`.
    ///
    /// Fields that fail [`LayoutConfig::validate`] fall back to their defaults.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        let config = config.sanitized();
        Self {
            words: SharedLru::new("words", config.word_cache_capacity),
            min_widths: SharedLru::new("min_width", config.min_width_cache_capacity),
            wraps: SharedLru::new("wrap", config.wrap_cache_capacity),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Width reserved at the end of every line so no glyph is clipped.
    pub fn end_buffer<M: TextMeasure + ?Sized>(&self, measure: &M) -> f64 {
        let mut buf = [0u8; 4];
        measure.text_width(self.config.end_buffer_glyph.encode_utf8(&mut buf))
    }

    fn segmented(&self, plain: &str) -> SegmentedText {
        if let Some(seg) = self.words.get(plain) {
            return seg;
        }
        let seg = SegmentedText::new(plain);
        self.words.insert(seg.shared_plain(), seg.clone());
        seg
    }

    /// Minimum width needed to draw `text` without cutting any word.
    ///
    /// This is the widest word plus the end buffer plus a small epsilon.
    /// Wrapping at the returned width never splits a word.
    pub fn min_width<M: TextMeasure + ?Sized>(&self, text: &str, measure: &M) -> f64 {
        let styled = parse_markup(text);
        let seg = self.segmented(styled.plain());
        let key = MinWidthKey {
            text: seg.clone(),
            context: measure.style_snapshot(),
            flags: styled.flags(),
        };
        self.min_widths.get_or_insert_with(key, || {
            let widest = seg
                .iter_words()
                .map(|word| measure.text_width(word))
                .fold(0.0, f64::max);
            widest + self.end_buffer(measure) + self.config.epsilon
        })
    }

    /// Minimum width needed to draw every line in `lines`.
    pub fn min_width_lines<L, M>(&self, lines: &[L], measure: &M) -> f64
    where
        L: AsRef<str>,
        M: TextMeasure + ?Sized,
    {
        lines
            .iter()
            .map(|line| self.min_width(line.as_ref(), measure))
            .fold(0.0, f64::max)
    }

    /// Whether `text` fits on a single line of `width`.
    ///
    /// Uses a cached wrap result when one exists; otherwise measures the span
    /// a single wrapped line would cover and applies the same predicate the
    /// wrapper uses. The two paths agree only if `measure` never reports a
    /// shorter width for a longer prefix of the same text.
    pub fn fits_without_wrap<M: TextMeasure + ?Sized>(
        &self,
        text: &str,
        width: f64,
        measure: &M,
    ) -> bool {
        let styled = parse_markup(text);
        let seg = self.segmented(styled.plain());
        let Some((begin, end)) = seg.content_range() else {
            return true;
        };

        let key = WrapKey::new(seg.clone(), width, measure.style_snapshot(), styled.flags());
        if let Some(cached) = self.wraps.get(&key) {
            return cached.is_single_line() && !cached.is_truncated();
        }

        let usable = width - self.end_buffer(measure);
        usable > 0.0 && measure.text_width(seg.span(begin, end)) <= usable
    }

    /// Whether word wrapping can make `text` fit into `width`.
    pub fn fits_with_word_wrap<M: TextMeasure + ?Sized>(
        &self,
        text: &str,
        width: f64,
        measure: &M,
    ) -> bool {
        self.min_width(text, measure) < width
    }

    /// Greedily wrap `text` into the fewest lines that fit `width`.
    ///
    /// A word wider than a whole line is cut into fitting pieces unless
    /// `strict` is set, in which case [`LayoutError::WordTooWide`] is
    /// returned. Identical inputs return the same cached result.
    ///
    /// # Errors
    /// - [`LayoutError::InvalidArgument`] if the text has words and `width`
    ///   does not exceed the end buffer.
    /// - [`LayoutError::WordTooWide`] in strict mode.
    pub fn wrap<M: TextMeasure + ?Sized>(
        &self,
        text: &str,
        width: f64,
        measure: &M,
        strict: bool,
    ) -> Result<Arc<LayoutResult>> {
        let styled = parse_markup(text);
        let flags = styled.flags();
        let seg = self.segmented(styled.plain());
        let key = WrapKey::new(seg.clone(), width, measure.style_snapshot(), flags);

        if let Some(cached) = self.wraps.get(&key) {
            if strict && cached.is_truncated() {
                // Cached by a lenient caller; recompute to report the word.
                return self.compute_wrap(&seg, flags, width, measure, true).map(Arc::new);
            }
            return Ok(cached);
        }

        let result = Arc::new(self.compute_wrap(&seg, flags, width, measure, strict)?);
        self.wraps.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// Wrapped lines of `text`, see [`wrap`](Self::wrap).
    pub fn wrap_lines<M: TextMeasure + ?Sized>(
        &self,
        text: &str,
        width: f64,
        measure: &M,
        strict: bool,
    ) -> Result<Vec<StyledText>> {
        Ok(self.wrap(text, width, measure, strict)?.lines().to_vec())
    }

    /// Height of `text` once wrapped to `width`.
    pub fn wrapped_height<M: TextMeasure + ?Sized>(
        &self,
        text: &str,
        width: f64,
        measure: &M,
    ) -> Result<f64> {
        Ok(self.wrap(text, width, measure, false)?.height())
    }

    /// Total height of all `lines`, each wrapped to `width`.
    pub fn wrapped_height_lines<L, M>(&self, lines: &[L], width: f64, measure: &M) -> Result<f64>
    where
        L: AsRef<str>,
        M: TextMeasure + ?Sized,
    {
        lines.iter().try_fold(0.0, |total, line| {
            Ok(total + self.wrapped_height(line.as_ref(), width, measure)?)
        })
    }

    fn compute_wrap<M: TextMeasure + ?Sized>(
        &self,
        seg: &SegmentedText,
        flags: StyleFlags,
        width: f64,
        measure: &M,
        strict: bool,
    ) -> Result<LayoutResult> {
        let line_height = measure.line_advance_height_with_spacing();
        let words = seg.words();
        let Some(last) = words.last() else {
            return Ok(LayoutResult {
                lines: vec![StyledText::new("", flags)],
                height: line_height,
                truncated: false,
            });
        };

        let end_buffer = self.end_buffer(measure);
        let usable = width - end_buffer;
        if usable.is_nan() || usable <= 0.0 {
            return Err(LayoutError::InvalidArgument { width, end_buffer });
        }

        let _span = debug_span!("boxtext.wrap", words = words.len(), width).entered();

        let mut lines = Vec::new();
        let mut truncated = false;
        let mut line_start = words[0].begin;
        let mut line_first = 0;
        let mut i = 0;

        while i < words.len() {
            if measure.text_width(seg.span(line_start, words[i].end)) <= usable {
                i += 1;
                continue;
            }

            if line_first == i {
                let word = seg.span(line_start, words[i].end);
                if strict {
                    return Err(LayoutError::WordTooWide {
                        word: word.to_string(),
                        width,
                    });
                }
                let cut = line_start + fitting_prefix_len(word, usable, measure);
                debug!(
                    word_len = word.len(),
                    kept = cut - line_start,
                    width,
                    "truncating word wider than line"
                );
                lines.push(StyledText::new(seg.span(line_start, cut), flags));
                truncated = true;
                if cut < words[i].end {
                    line_start = cut;
                } else {
                    // A single cluster wider than the line was emitted whole.
                    i += 1;
                    line_start = words.get(i).map_or(cut, |next| next.begin);
                    line_first = i;
                }
            } else {
                lines.push(StyledText::new(
                    seg.span(line_start, words[i - 1].end),
                    flags,
                ));
                line_start = words[i].begin;
                line_first = i;
            }
        }
        if line_start < last.end {
            lines.push(StyledText::new(seg.span(line_start, last.end), flags));
        }

        let height = lines.len() as f64 * line_height;
        Ok(LayoutResult {
            lines,
            height,
            truncated,
        })
    }

    /// Hit/miss statistics of the three caches.
    #[must_use]
    pub fn cache_stats(&self) -> EngineCacheStats {
        EngineCacheStats {
            words: self.words.stats(),
            min_width: self.min_widths.stats(),
            wrap: self.wraps.stats(),
        }
    }

    /// Drop every cached entry and reset statistics.
    pub fn clear_caches(&self) {
        self.words.clear();
        self.min_widths.clear();
        self.wraps.clear();
    }
}

/// Byte length of the longest grapheme-aligned prefix of `word` that fits.
///
/// Walks back from the end one cluster at a time. Always keeps at least the
/// first cluster so wrapping makes progress.
fn fitting_prefix_len<M: TextMeasure + ?Sized>(word: &str, usable: f64, measure: &M) -> usize {
    word.grapheme_indices(true)
        .rev()
        .map(|(idx, _)| idx)
        .take_while(|&idx| idx > 0)
        .find(|&idx| measure.text_width(&word[..idx]) <= usable)
        .unwrap_or_else(|| word.graphemes(true).next().map_or(word.len(), str::len))
}
