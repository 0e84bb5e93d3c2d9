#![forbid(unsafe_code)]

//! Measurement and drawing seams.
//!
//! The layout engine never talks to a font backend directly. It asks a
//! [`TextMeasure`] oracle for widths and line heights, and renders through a
//! [`DrawSurface`]. Both are evaluated against whatever font state is
//! currently active on the backend; [`TextMeasure::style_snapshot`] captures
//! that state so results can be cached.
//!
//! Two deterministic implementations ship with the crate:
//! - [`FixedAdvanceMetrics`] - every display cell has the same advance
//! - [`RecordingSurface`] - collects [`DrawCall`]s instead of drawing

use crate::styled::StyledText;
use boxtext_core::HorizontalAlignment;
use boxtext_style::MeasureContext;
use unicode_width::UnicodeWidthStr;

/// Measurement oracle backed by the active font.
///
/// Implementations shared between threads must tolerate concurrent calls.
pub trait TextMeasure {
    /// Width of `text` rendered in the active font.
    fn text_width(&self, text: &str) -> f64;

    /// Distance from the top of a line to its baseline.
    fn line_advance_height(&self) -> f64;

    /// Distance from one baseline to the next, including line spacing.
    fn line_advance_height_with_spacing(&self) -> f64;

    /// Snapshot of the active font state.
    fn style_snapshot(&self) -> MeasureContext;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    #[inline]
    fn text_width(&self, text: &str) -> f64 {
        (**self).text_width(text)
    }

    #[inline]
    fn line_advance_height(&self) -> f64 {
        (**self).line_advance_height()
    }

    #[inline]
    fn line_advance_height_with_spacing(&self) -> f64 {
        (**self).line_advance_height_with_spacing()
    }

    #[inline]
    fn style_snapshot(&self) -> MeasureContext {
        (**self).style_snapshot()
    }
}

/// A target that draws already-wrapped lines.
pub trait DrawSurface: TextMeasure {
    /// Draw one line with its baseline at `y`.
    ///
    /// `align` selects which point of the line is anchored at `x`: its left
    /// edge, its center, or its right edge.
    fn print(&mut self, line: &StyledText, x: f64, y: f64, align: HorizontalAlignment);
}

/// Measurement oracle where every display cell advances by the same amount.
///
/// Wide characters (CJK, most emoji) count as two cells, combining marks as
/// zero, following `unicode-width`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedAdvanceMetrics {
    advance: f64,
    line_height: f64,
    line_spacing: f64,
    context: MeasureContext,
}

impl FixedAdvanceMetrics {
    /// Create metrics with the given cell advance and line height.
    #[must_use]
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
            line_spacing: 0.0,
            context: MeasureContext::default(),
        }
    }

    /// One unit per cell and per line: terminal-style measurement.
    #[must_use]
    pub fn cells() -> Self {
        Self::new(1.0, 1.0).context(MeasureContext::new("Monospaced", 1.0))
    }

    /// Extra space between consecutive lines.
    #[must_use]
    pub fn line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Font snapshot reported to the layout engine.
    #[must_use]
    pub fn context(mut self, context: MeasureContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn advance(&self) -> f64 {
        self.advance
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self::cells()
    }
}

impl TextMeasure for FixedAdvanceMetrics {
    fn text_width(&self, text: &str) -> f64 {
        text.width() as f64 * self.advance
    }

    fn line_advance_height(&self) -> f64 {
        self.line_height
    }

    fn line_advance_height_with_spacing(&self) -> f64 {
        self.line_height + self.line_spacing
    }

    fn style_snapshot(&self) -> MeasureContext {
        self.context.clone()
    }
}

/// One recorded [`DrawSurface::print`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub line: StyledText,
    pub x: f64,
    pub y: f64,
    pub align: HorizontalAlignment,
}

/// Surface that records draw calls and measures with an inner oracle.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface<M = FixedAdvanceMetrics> {
    metrics: M,
    calls: Vec<DrawCall>,
}

impl<M: TextMeasure> RecordingSurface<M> {
    #[must_use]
    pub fn new(metrics: M) -> Self {
        Self {
            metrics,
            calls: Vec::new(),
        }
    }

    /// Draw calls in the order they were made.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Plain text of every drawn line.
    #[must_use]
    pub fn drawn_text(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.line.plain()).collect()
    }

    #[must_use]
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Drop recorded calls, keeping the metrics.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    #[must_use]
    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }
}

impl<M: TextMeasure> TextMeasure for RecordingSurface<M> {
    fn text_width(&self, text: &str) -> f64 {
        self.metrics.text_width(text)
    }

    fn line_advance_height(&self) -> f64 {
        self.metrics.line_advance_height()
    }

    fn line_advance_height_with_spacing(&self) -> f64 {
        self.metrics.line_advance_height_with_spacing()
    }

    fn style_snapshot(&self) -> MeasureContext {
        self.metrics.style_snapshot()
    }
}

impl<M: TextMeasure> DrawSurface for RecordingSurface<M> {
    fn print(&mut self, line: &StyledText, x: f64, y: f64, align: HorizontalAlignment) {
        self.calls.push(DrawCall {
            line: line.clone(),
            x,
            y,
            align,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtext_style::StyleFlags;

    #[test]
    fn cells_measure_display_width() {
        let m = FixedAdvanceMetrics::cells();
        assert_eq!(m.text_width("hello"), 5.0);
        assert_eq!(m.text_width(""), 0.0);
        assert_eq!(m.text_width("日本"), 4.0);
        assert_eq!(m.text_width("e\u{0301}"), 1.0);
    }

    #[test]
    fn advance_scales_width() {
        let m = FixedAdvanceMetrics::new(7.5, 16.0);
        assert_eq!(m.text_width("ab"), 15.0);
        assert_eq!(m.advance(), 7.5);
    }

    #[test]
    fn line_heights() {
        let m = FixedAdvanceMetrics::new(1.0, 12.0).line_spacing(3.0);
        assert_eq!(m.line_advance_height(), 12.0);
        assert_eq!(m.line_advance_height_with_spacing(), 15.0);
    }

    #[test]
    fn snapshot_reflects_context() {
        let ctx = MeasureContext::new("Serif", 20.0);
        let m = FixedAdvanceMetrics::new(1.0, 1.0).context(ctx.clone());
        assert_eq!(m.style_snapshot(), ctx);
        assert_ne!(FixedAdvanceMetrics::cells().style_snapshot(), ctx);
    }

    #[test]
    fn reference_impl_delegates() {
        let m = FixedAdvanceMetrics::new(2.0, 3.0);
        let r = &m;
        assert_eq!(TextMeasure::text_width(&r, "abc"), 6.0);
        assert_eq!(TextMeasure::line_advance_height(&r), 3.0);
    }

    #[test]
    fn recording_surface_collects_calls() {
        let mut surface = RecordingSurface::new(FixedAdvanceMetrics::cells());
        let line = StyledText::new("hi", StyleFlags::BOLD);
        surface.print(&line, 1.0, 2.0, HorizontalAlignment::Center);
        assert_eq!(surface.calls().len(), 1);
        assert_eq!(surface.calls()[0], DrawCall {
            line,
            x: 1.0,
            y: 2.0,
            align: HorizontalAlignment::Center,
        });
        assert_eq!(surface.drawn_text(), vec!["hi"]);
        assert_eq!(surface.text_width("abc"), 3.0);

        surface.clear();
        assert!(surface.calls().is_empty());
    }
}
