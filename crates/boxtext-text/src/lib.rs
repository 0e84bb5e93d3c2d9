#![forbid(unsafe_code)]

//! Text layout for boxed diagram elements.
//!
//! This crate turns markup-annotated lines into wrapped, measured and aligned
//! draw calls:
//! - [`parse_markup`] - strip style labels and escapes into a [`StyledText`]
//! - [`segment_words`] / [`SegmentedText`] - split plain text into words
//! - [`LayoutEngine`] - minimum width, fit checks, greedy wrapping, heights
//! - [`draw_text`] - render a block aligned inside a [`TextBox`]
//! - [`TextMeasure`] / [`DrawSurface`] - seams to the font backend
//! - [`LayoutConfig`] - cache sizes and measurement constants
//!
//! # Example
//! ```
//! use boxtext_text::{
//!     FixedAdvanceMetrics, HorizontalAlignment, LayoutEngine, RecordingSurface, TextBox,
//!     VerticalAlignment,
//! };
//!
//! let engine = LayoutEngine::default();
//! let metrics = FixedAdvanceMetrics::cells();
//!
//! // Narrowest box that keeps every word whole.
//! let min = engine.min_width("*Order total*", &metrics);
//! assert!(min > 5.0 && min < 7.0);
//!
//! let mut surface = RecordingSurface::new(metrics);
//! engine
//!     .draw_text(
//!         &mut surface,
//!         &["*Order total*", "id: int"],
//!         TextBox::new(0.0, 0.0, 8.0, 5.0),
//!         HorizontalAlignment::Center,
//!         VerticalAlignment::Top,
//!     )
//!     .unwrap();
//! assert_eq!(surface.drawn_text(), vec!["Order", "total", "id: int"]);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod layout;
pub mod markup;
pub mod measure;
pub mod render;
pub mod segment;
pub mod styled;

pub use boxtext_core::{HorizontalAlignment, TextBox, VerticalAlignment};
pub use boxtext_style::{MeasureContext, StyleFlags};
pub use cache::{CacheStats, SharedLru};
pub use config::{ConfigError, ConfigParse, LayoutConfig};
pub use error::{LayoutError, Result};
pub use layout::{EngineCacheStats, LayoutEngine, LayoutResult};
pub use markup::parse_markup;
pub use measure::{DrawCall, DrawSurface, FixedAdvanceMetrics, RecordingSurface, TextMeasure};
pub use render::draw_text;
pub use segment::{SegmentedText, WordRegion, segment_words};
pub use styled::StyledText;
