// File: crates/fractal-core/src/lod.rs
// Summary: Level-of-detail bucket aggregation for OHLC records.

use crate::record::Record;

/// One visual unit built from `count` consecutive records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregatedUnit {
    /// Index of the bucket's first record within the visible slice.
    pub offset: usize,
    pub count: usize,
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl AggregatedUnit {
    /// Compose a bucket: open=first.open, close=last.close, high=max high,
    /// low=min low, time=first.time. `None` for an empty bucket.
    pub fn from_bucket(offset: usize, bucket: &[Record]) -> Option<Self> {
        let first = bucket.first()?;
        let last = bucket.last()?;
        let (mut high, mut low) = (first.high, first.low);
        for r in &bucket[1..] {
            high = high.max(r.high);
            low = low.min(r.low);
        }
        Some(Self { offset, count: bucket.len(), time: first.time, open: first.open, high, low, close: last.close })
    }

    #[inline]
    pub fn is_bullish(&self) -> bool { self.close >= self.open }

    pub fn as_record(&self) -> Record {
        Record::new(self.time, self.open, self.high, self.low, self.close)
    }
}

/// Slice `visible` into contiguous buckets of `factor` records (the last may
/// be shorter) and reduce each to one unit. Pure: same input, same output.
pub fn aggregate(visible: &[Record], factor: usize) -> Vec<AggregatedUnit> {
    let factor = factor.max(1);
    visible
        .chunks(factor)
        .enumerate()
        .filter_map(|(i, bucket)| AggregatedUnit::from_bucket(i * factor, bucket))
        .collect()
}

/// Bucket size for the current pixel density:
/// `clamp(floor(min_unit_px / (canvas_width / visible_count)), 1, max_lod)`.
pub fn lod_factor(canvas_width_px: f64, visible_count: usize, min_unit_px: f64, max_lod: usize) -> usize {
    let max_lod = max_lod.max(1);
    if visible_count == 0 || !(canvas_width_px > 0.0) {
        return 1;
    }
    let px_per_unit = canvas_width_px / visible_count as f64;
    let raw = (min_unit_px / px_per_unit).floor();
    if raw.is_finite() && raw >= 1.0 { (raw as usize).min(max_lod) } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Record> {
        vec![
            Record::new(1, 100.0, 105.0, 95.0, 102.0),
            Record::new(2, 102.0, 104.0, 100.0, 101.0),
            Record::new(3, 101.0, 103.0, 98.0, 99.0),
        ]
    }

    #[test]
    fn factor_one_is_identity() {
        let data = scenario();
        let units = aggregate(&data, 1);
        let back: Vec<Record> = units.iter().map(AggregatedUnit::as_record).collect();
        assert_eq!(back, data);
        assert_eq!(units.iter().map(|u| u.offset).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn factor_three_composes_one_bucket() {
        let units = aggregate(&scenario(), 3);
        assert_eq!(units.len(), 1);
        let u = units[0];
        assert_eq!((u.open, u.high, u.low, u.close), (100.0, 105.0, 95.0, 99.0));
        assert_eq!(u.count, 3);
        assert_eq!(u.time, 1);
    }

    #[test]
    fn final_bucket_may_be_short() {
        let data: Vec<Record> = (0..7).map(|i| Record::new(i, i as f64, i as f64 + 1.0, i as f64 - 1.0, i as f64 + 0.5)).collect();
        let units = aggregate(&data, 3);
        assert_eq!(units.iter().map(|u| u.count).collect::<Vec<_>>(), vec![3, 3, 1]);
        assert_eq!(units[2].offset, 6);
        assert_eq!(units[1].high, 6.0);
        assert_eq!(units[1].low, 2.0);
    }

    #[test]
    fn extremes_are_exact() {
        let data: Vec<Record> = (0..50)
            .map(|i| {
                let base = ((i * 37) % 11) as f64;
                Record::new(i, base, base + (i % 5) as f64, base - (i % 3) as f64, base + 0.25)
            })
            .collect();
        for factor in 1..=6 {
            for u in aggregate(&data, factor) {
                let bucket = &data[u.offset..u.offset + u.count];
                assert_eq!(u.high, bucket.iter().map(|r| r.high).fold(f64::NEG_INFINITY, f64::max));
                assert_eq!(u.low, bucket.iter().map(|r| r.low).fold(f64::INFINITY, f64::min));
            }
        }
    }

    #[test]
    fn empty_slice_yields_no_units() {
        assert!(aggregate(&[], 4).is_empty());
    }

    #[test]
    fn lod_factor_follows_density() {
        // 10px per unit: no merging
        assert_eq!(lod_factor(1000.0, 100, 3.0, 5), 1);
        // 1px per unit: 3 records per bucket
        assert_eq!(lod_factor(100.0, 100, 3.0, 5), 3);
        // 0.1px per unit: capped at max_lod
        assert_eq!(lod_factor(10.0, 100, 3.0, 5), 5);
        assert_eq!(lod_factor(100.0, 0, 3.0, 5), 1);
        assert_eq!(lod_factor(0.0, 10, 3.0, 5), 1);
    }
}
