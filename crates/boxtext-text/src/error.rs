#![forbid(unsafe_code)]

//! Errors reported by the layout engine.

use std::fmt;

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while wrapping or rendering text.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The width leaves no room once the end buffer is reserved.
    ///
    /// Always a caller configuration bug: no text could ever fit.
    InvalidArgument { width: f64, end_buffer: f64 },
    /// A single word does not fit the usable width and strict mode was requested.
    WordTooWide { word: String, width: f64 },
    /// The wrapped text needs more height than the box provides.
    InsufficientHeight { needed: f64, available: f64 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { width, end_buffer } => write!(
                f,
                "width {width} must be larger than the end buffer {end_buffer}"
            ),
            Self::WordTooWide { word, width } => {
                write!(f, "word '{word}' is too wide for width {width}")
            }
            Self::InsufficientHeight { needed, available } => write!(
                f,
                "text needs height {needed} but only {available} is available"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
