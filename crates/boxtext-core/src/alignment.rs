#![forbid(unsafe_code)]

//! Horizontal and vertical alignment of text inside a box.
//!
//! Both enums are closed; every consumer resolves them with an exhaustive
//! `match`, so adding a variant is a compile error until each site handles it.

use std::fmt;

/// Horizontal text alignment.
///
/// The same value is handed to the drawing primitive, which anchors the draw
/// point at the left edge, the center, or the right edge of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    #[default]
    /// Align text to the left.
    Left,
    /// Center text horizontally.
    Center,
    /// Align text to the right.
    Right,
}

impl HorizontalAlignment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Offset of the anchor point from the left edge of a box `width` wide.
    #[inline]
    #[must_use]
    pub fn anchor_offset(self, width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => width / 2.0,
            Self::Right => width,
        }
    }
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Align text to the top (default).
    #[default]
    Top,
    /// Center text vertically.
    Center,
    /// Align text to the bottom.
    Bottom,
}

impl VerticalAlignment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    /// Shift of the text block given the unused vertical `slack`.
    #[inline]
    #[must_use]
    pub fn offset(self, slack: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => slack / 2.0,
            Self::Bottom => slack,
        }
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
