#![forbid(unsafe_code)]

//! Style primitives for boxed diagram text.
//!
//! - [`StyleFlags`] - the set of format labels applied uniformly to a line
//! - [`MeasureContext`] - value-comparable snapshot of the active font state
//!
//! # Example
//! ```
//! use boxtext_style::{MeasureContext, StyleFlags};
//!
//! let a = StyleFlags::BOLD | StyleFlags::UNDERLINE;
//! let b = StyleFlags::UNDERLINE | StyleFlags::BOLD;
//! assert_eq!(a, b);
//!
//! let ctx = MeasureContext::new("Serif", 12.0).weight(700);
//! assert_eq!(ctx, MeasureContext::new("Serif", 12.0).weight(700));
//! ```

pub mod context;
pub mod flags;

pub use context::MeasureContext;
pub use flags::StyleFlags;
