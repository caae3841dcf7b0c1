// File: crates/fractal-core/src/metrics.rs
// Summary: Price-range and pixel-scale metrics for a visible slice, with an invalidate-on-change cache.

use std::ops::Range;

use crate::record::Record;
use crate::viewport::Viewport;

/// Floor for the price span so a flat range never divides by zero.
pub const PRICE_EPSILON: f64 = 1e-12;

/// Derived scale facts for one visible slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
    /// Indices of the visible slice within the raw sequence.
    pub visible: Range<usize>,
    pub max_high: f64,
    pub min_low: f64,
    pub px_per_price: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    /// Logical canvas height the metrics were computed for.
    pub canvas_height: f64,
}

impl Metrics {
    /// Compute metrics in one pass over `records[viewport]`.
    ///
    /// Returns `None` (the empty sentinel) iff the visible slice is empty.
    pub fn compute(records: &[Record], viewport: Viewport, canvas_height: f64, padding_top: f64, padding_bottom: f64) -> Option<Self> {
        let visible = viewport.start.min(records.len())..viewport.end.min(records.len());
        let slice = &records[visible.clone()];
        if slice.is_empty() {
            return None;
        }
        let (mut max_high, mut min_low) = (f64::NEG_INFINITY, f64::INFINITY);
        for r in slice {
            max_high = max_high.max(r.high);
            min_low = min_low.min(r.low);
        }
        let span = max_high - min_low;
        let span = if span.is_finite() && span > PRICE_EPSILON { span } else { 1.0 };
        // A canvas shorter than its paddings still gets a positive scale.
        let plot = (canvas_height - padding_top - padding_bottom).max(1.0);
        Some(Self {
            visible,
            max_high,
            min_low,
            px_per_price: plot / span,
            padding_top,
            padding_bottom,
            canvas_height,
        })
    }

    /// Map a price to a logical y coordinate (y grows downward).
    #[inline]
    pub fn price_to_y(&self, price: f64) -> f32 {
        ((self.canvas_height - self.padding_bottom) - (price - self.min_low) * self.px_per_price) as f32
    }

    /// Y of the chart baseline (bottom of the plot area).
    #[inline]
    pub fn baseline_y(&self) -> f32 {
        (self.canvas_height - self.padding_bottom) as f32
    }

    pub fn slice<'a>(&self, records: &'a [Record]) -> &'a [Record] {
        &records[self.visible.clone()]
    }
}

#[derive(Clone, Debug, Default)]
enum Slot {
    #[default]
    Stale,
    Fresh(Option<Metrics>),
}

/// Single-entry cache. Callers invalidate on load, zoom/offset change,
/// chart-type change and resize; reads in between reuse the stored value.
#[derive(Clone, Debug, Default)]
pub struct MetricsCache {
    slot: Slot,
    computations: u64,
}

impl MetricsCache {
    pub fn new() -> Self { Self::default() }

    pub fn invalidate(&mut self) {
        self.slot = Slot::Stale;
    }

    pub fn is_fresh(&self) -> bool { matches!(self.slot, Slot::Fresh(_)) }

    /// Number of times metrics were actually computed (cache misses).
    pub fn computations(&self) -> u64 { self.computations }

    pub fn get_or_compute(&mut self, compute: impl FnOnce() -> Option<Metrics>) -> Option<&Metrics> {
        if let Slot::Stale = self.slot {
            self.computations += 1;
            self.slot = Slot::Fresh(compute());
        }
        match &self.slot {
            Slot::Fresh(m) => m.as_ref(),
            Slot::Stale => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recs() -> Vec<Record> {
        vec![
            Record::new(1, 100.0, 105.0, 95.0, 102.0),
            Record::new(2, 102.0, 104.0, 100.0, 101.0),
            Record::new(3, 101.0, 103.0, 98.0, 99.0),
        ]
    }

    #[test]
    fn empty_slice_is_sentinel() {
        assert!(Metrics::compute(&recs(), Viewport { start: 3, end: 3 }, 400.0, 30.0, 30.0).is_none());
        assert!(Metrics::compute(&[], Viewport::default(), 400.0, 30.0, 30.0).is_none());
    }

    #[test]
    fn scans_extremes_and_scales() {
        let m = Metrics::compute(&recs(), Viewport { start: 0, end: 3 }, 400.0, 30.0, 30.0).unwrap();
        assert_eq!(m.max_high, 105.0);
        assert_eq!(m.min_low, 95.0);
        assert_eq!(m.px_per_price, 34.0);
        assert_eq!(m.price_to_y(95.0), 370.0);
        assert_eq!(m.price_to_y(105.0), 30.0);
        assert_eq!(m.baseline_y(), 370.0);
    }

    #[test]
    fn flat_range_uses_epsilon_substitute() {
        let flat = vec![Record::new(1, 5.0, 5.0, 5.0, 5.0); 4];
        let m = Metrics::compute(&flat, Viewport { start: 0, end: 4 }, 200.0, 30.0, 30.0).unwrap();
        assert!(m.px_per_price.is_finite() && m.px_per_price > 0.0);
    }

    #[test]
    fn px_per_price_positive_on_tiny_canvas() {
        let m = Metrics::compute(&recs(), Viewport { start: 0, end: 3 }, 10.0, 30.0, 30.0).unwrap();
        assert!(m.px_per_price > 0.0);
    }

    #[test]
    fn cache_reuses_until_invalidated() {
        let data = recs();
        let mut cache = MetricsCache::new();
        let vp = Viewport { start: 0, end: 2 };
        let a = cache.get_or_compute(|| Metrics::compute(&data, vp, 400.0, 30.0, 30.0)).cloned();
        let b = cache.get_or_compute(|| panic!("should be cached")).cloned();
        assert_eq!(a, b);
        assert_eq!(cache.computations(), 1);
        cache.invalidate();
        assert!(!cache.is_fresh());
        cache.get_or_compute(|| None);
        assert_eq!(cache.computations(), 2);
    }
}
