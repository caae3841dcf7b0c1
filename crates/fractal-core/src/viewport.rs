// File: crates/fractal-core/src/viewport.rs
// View state: zoom/offset transitions and resolution to a visible index range.

use std::ops::Range;

use crate::geometry::clamp;
use crate::types::{ZOOM_MAX, ZOOM_MIN};

/// Half-open index range `[start, end)` into the raw record sequence.
/// Always derived from view state, never stored as ground truth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub start: usize,
    pub end: usize,
}

impl Viewport {
    /// Resolve the visible range.
    ///
    /// `stride_px` is the horizontal footprint of one unit at zoom 1 (body
    /// width plus spacing). Offsets past the data yield an empty range.
    pub fn resolve(len: usize, zoom: f64, offset: f64, canvas_width_px: f64, stride_px: f64) -> Self {
        let zoom = zoom.max(ZOOM_MIN);
        let count = (canvas_width_px / (stride_px * zoom)).floor();
        let count = if count.is_finite() && count > 0.0 { count as usize } else { 0 };
        // Past the end the range collapses to `len..len` instead of inverting.
        let start = if offset.is_finite() && offset > 0.0 { (offset.floor() as usize).min(len) } else { 0 };
        let end = len.min(start.saturating_add(count));
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize { self.end.saturating_sub(self.start) }
    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }
    #[inline]
    pub fn range(&self) -> Range<usize> { self.start..self.end }
}

/// Continuous zoom/pan pair. Zoom is clamped to `[ZOOM_MIN, ZOOM_MAX]`;
/// offset is unbounded here, the resolver is the only bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    zoom: f64,
    offset: f64,
}

impl Default for ViewState {
    fn default() -> Self { Self { zoom: 1.0, offset: 0.0 } }
}

impl ViewState {
    pub fn zoom(&self) -> f64 { self.zoom }
    pub fn offset(&self) -> f64 { self.offset }

    /// Set zoom, clamped. NaN leaves the current zoom unchanged.
    pub fn set_zoom(&mut self, level: f64) -> f64 {
        if !level.is_nan() {
            self.zoom = clamp(level, ZOOM_MIN, ZOOM_MAX);
        }
        self.zoom
    }

    /// Shift the offset by `delta` records. Non-finite deltas are ignored.
    pub fn pan(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.offset += delta;
        }
        self.offset
    }

    pub fn viewport(&self, len: usize, canvas_width_px: f64, stride_px: f64) -> Viewport {
        Viewport::resolve(len, self.zoom, self.offset, canvas_width_px, stride_px)
    }
}
