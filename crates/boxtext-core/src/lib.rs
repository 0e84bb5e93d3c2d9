#![forbid(unsafe_code)]

//! Core: geometry and alignment primitives shared by the text layout crates.

pub mod alignment;
pub mod geometry;

pub use alignment::{HorizontalAlignment, VerticalAlignment};
pub use geometry::TextBox;
