#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Diagram coordinates are floating point drawing units with the origin at
//! the top-left corner and Y growing downwards.

/// The rectangular region a block of text is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in drawing units.
    pub width: f64,
    /// Height in drawing units.
    pub height: f64,
}

impl TextBox {
    /// Create a new box.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
