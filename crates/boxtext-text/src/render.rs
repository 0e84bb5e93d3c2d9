#![forbid(unsafe_code)]

//! Aligned rendering of wrapped text into a bounding box.
//!
//! The drawing primitive anchors each line at its baseline and at the
//! horizontal anchor implied by the alignment it is given. [`draw_text`]
//! computes the block height first, refuses boxes that are too short, then
//! emits one [`DrawSurface::print`] call per wrapped line.

use crate::error::{LayoutError, Result};
use crate::layout::LayoutEngine;
use crate::measure::DrawSurface;
use boxtext_core::{HorizontalAlignment, TextBox, VerticalAlignment};
use tracing::warn;

/// Wrap every line to `bounds.width` and draw the block aligned in `bounds`.
///
/// # Errors
/// - [`LayoutError::InsufficientHeight`] if the wrapped block is taller than
///   `bounds.height`. Nothing is drawn in that case.
/// - Any error from [`LayoutEngine::wrap`].
pub fn draw_text<L, S>(
    engine: &LayoutEngine,
    surface: &mut S,
    lines: &[L],
    bounds: TextBox,
    h_align: HorizontalAlignment,
    v_align: VerticalAlignment,
) -> Result<()>
where
    L: AsRef<str>,
    S: DrawSurface + ?Sized,
{
    let needed = engine.wrapped_height_lines(lines, bounds.width, &*surface)?;
    if needed > bounds.height {
        warn!(
            needed,
            available = bounds.height,
            "text block does not fit its box"
        );
        return Err(LayoutError::InsufficientHeight {
            needed,
            available: bounds.height,
        });
    }

    let x = bounds.x + h_align.anchor_offset(bounds.width);
    let mut y = bounds.y + v_align.offset(bounds.height - needed) + surface.line_advance_height();
    let step = surface.line_advance_height_with_spacing();

    for line in lines {
        let wrapped = engine.wrap(line.as_ref(), bounds.width, &*surface, false)?;
        for sub in wrapped.lines() {
            surface.print(sub, x, y, h_align);
            y += step;
        }
    }
    Ok(())
}

impl LayoutEngine {
    /// See [`draw_text`].
    pub fn draw_text<L, S>(
        &self,
        surface: &mut S,
        lines: &[L],
        bounds: TextBox,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) -> Result<()>
    where
        L: AsRef<str>,
        S: DrawSurface + ?Sized,
    {
        draw_text(self, surface, lines, bounds, h_align, v_align)
    }
}
