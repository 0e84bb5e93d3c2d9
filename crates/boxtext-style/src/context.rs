#![forbid(unsafe_code)]

//! Snapshot of the font state text is measured against.
//!
//! The measurement oracle hands out a [`MeasureContext`] describing whatever
//! font is active on the drawing surface. Two contexts compare equal iff they
//! would produce identical width and height measurements, which is what lets
//! the layout caches use the snapshot as part of their keys without ever
//! invalidating entries.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Default font family name.
pub const DEFAULT_FAMILY: &str = "SansSerif";
/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
/// Regular font weight.
pub const WEIGHT_REGULAR: u16 = 400;

/// Immutable, value-comparable font snapshot.
///
/// Floating point fields compare and hash by bit pattern, so `0.0` and `-0.0`
/// are distinct and a `NaN` size equals itself. Both are harmless for cache
/// keys: at worst a snapshot misses the cache.
#[derive(Debug, Clone)]
pub struct MeasureContext {
    family: Arc<str>,
    size: f64,
    weight: u16,
    letter_spacing: f64,
}

impl MeasureContext {
    /// Create a context for `family` at `size` points, regular weight.
    #[must_use]
    pub fn new(family: impl Into<Arc<str>>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: WEIGHT_REGULAR,
            letter_spacing: 0.0,
        }
    }

    /// Set the font weight (100..=900).
    #[must_use]
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    /// Set extra spacing added after each glyph.
    #[must_use]
    pub fn letter_spacing(mut self, spacing: f64) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn font_weight(&self) -> u16 {
        self.weight
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.letter_spacing
    }
}

impl Default for MeasureContext {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

impl PartialEq for MeasureContext {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.size.to_bits() == other.size.to_bits()
            && self.weight == other.weight
            && self.letter_spacing.to_bits() == other.letter_spacing.to_bits()
    }
}

impl Eq for MeasureContext {}

impl Hash for MeasureContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
        self.weight.hash(state);
        self.letter_spacing.to_bits().hash(state);
    }
}
