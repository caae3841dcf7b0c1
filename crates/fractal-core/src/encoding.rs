// File: crates/fractal-core/src/encoding.rs
// Summary: Candlestick, line and area drawing strategies over shared metrics and LOD units.

use crate::config::ChartConfig;
use crate::geometry::Rect;
use crate::lod::AggregatedUnit;
use crate::metrics::Metrics;
use crate::surface::Surface;
use crate::types::ChartType;

/// Stroke width for candle wicks.
const WICK_WIDTH: f32 = 1.0;
/// Stroke width for the close-price line.
const LINE_WIDTH: f32 = 2.0;

/// Everything a strategy needs for one paint pass.
pub struct Frame<'a> {
    pub metrics: &'a Metrics,
    pub units: &'a [AggregatedUnit],
    pub config: &'a ChartConfig,
    pub zoom: f64,
}

impl Frame<'_> {
    /// Left edge of the unit whose first record sits at `offset` in the visible slice.
    #[inline]
    pub fn x_of(&self, offset: usize) -> f32 {
        (offset as f64 * self.config.stride() * self.zoom) as f32
    }
}

/// A drawing strategy for one chart type.
pub trait Encoding {
    fn chart_type(&self) -> ChartType;
    fn paint(&self, frame: &Frame<'_>, surface: &mut dyn Surface);
}

/// Strategy table: the renderer for `chart_type`, if it has one.
pub fn encoding_for(chart_type: ChartType) -> Option<&'static dyn Encoding> {
    match chart_type {
        ChartType::Candle => Some(&Candlestick),
        ChartType::Line => Some(&Line),
        ChartType::Area => Some(&Area),
        _ => None,
    }
}

pub struct Candlestick;

impl Encoding for Candlestick {
    fn chart_type(&self) -> ChartType { ChartType::Candle }

    fn paint(&self, frame: &Frame<'_>, surface: &mut dyn Surface) {
        let m = frame.metrics;
        let cfg = frame.config;
        for u in frame.units {
            let x = frame.x_of(u.offset);
            // A bucket covers `count` slots minus one gap.
            let body_w = ((u.count as f64 * cfg.stride() - cfg.spacing) * frame.zoom).max(1.0) as f32;
            let mid = x + body_w * 0.5;
            let color = cfg.colors.candle(u.is_bullish());

            surface.begin_path();
            surface.move_to(mid, m.price_to_y(u.high));
            surface.line_to(mid, m.price_to_y(u.low));
            surface.stroke(color, WICK_WIDTH);

            let (y_open, y_close) = (m.price_to_y(u.open), m.price_to_y(u.close));
            let body_h = (y_open - y_close).abs().max(1.0);
            surface.fill_rect(Rect::from_xywh(x, y_open.min(y_close), body_w, body_h), color);
        }
    }
}

pub struct Line;

impl Line {
    /// Build the close-price path without painting it. Returns the x span
    /// `(first, last)` of the path, or `None` when there is nothing to trace.
    pub fn trace(frame: &Frame<'_>, surface: &mut dyn Surface) -> Option<(f32, f32)> {
        let first = frame.units.first()?;
        let last = frame.units.last()?;
        surface.begin_path();
        for (i, u) in frame.units.iter().enumerate() {
            let (x, y) = (frame.x_of(u.offset), frame.metrics.price_to_y(u.close));
            if i == 0 { surface.move_to(x, y) } else { surface.line_to(x, y) }
        }
        Some((frame.x_of(first.offset), frame.x_of(last.offset)))
    }
}

impl Encoding for Line {
    fn chart_type(&self) -> ChartType { ChartType::Line }

    fn paint(&self, frame: &Frame<'_>, surface: &mut dyn Surface) {
        if Line::trace(frame, surface).is_some() {
            surface.stroke(frame.config.colors.line, LINE_WIDTH);
        }
    }
}

/// Line path stroked, then closed down to the baseline and filled.
pub struct Area;

impl Encoding for Area {
    fn chart_type(&self) -> ChartType { ChartType::Area }

    fn paint(&self, frame: &Frame<'_>, surface: &mut dyn Surface) {
        let Some((first_x, last_x)) = Line::trace(frame, surface) else { return };
        surface.stroke(frame.config.colors.line, LINE_WIDTH);
        let base = frame.metrics.baseline_y();
        surface.line_to(last_x, base);
        surface.line_to(first_x, base);
        surface.close_path();
        surface.fill(frame.config.colors.area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lod::aggregate;
    use crate::record::Record;
    use crate::surface::{DrawOp, RecordingSurface};
    use crate::viewport::Viewport;

    fn fixture() -> (Vec<Record>, Metrics, ChartConfig) {
        let data = vec![
            Record::new(1, 100.0, 105.0, 95.0, 102.0),
            Record::new(2, 102.0, 104.0, 100.0, 101.0),
            Record::new(3, 101.0, 101.0, 98.0, 101.0),
        ];
        let m = Metrics::compute(&data, Viewport { start: 0, end: 3 }, 400.0, 30.0, 30.0).unwrap();
        (data, m, ChartConfig::default())
    }

    #[test]
    fn candle_body_floors_at_one_pixel() {
        let (data, m, cfg) = fixture();
        let units = aggregate(&data, 1);
        let frame = Frame { metrics: &m, units: &units, config: &cfg, zoom: 1.0 };
        let mut s = RecordingSurface::new(300.0, 400.0);
        Candlestick.paint(&frame, &mut s);
        let bodies: Vec<Rect> = s.ops().iter().filter_map(|op| match op { DrawOp::FillRect(r, _) => Some(*r), _ => None }).collect();
        assert_eq!(bodies.len(), 3);
        assert_eq!(bodies[2].height(), 1.0);
        assert_eq!(bodies[1].left, 10.0);
        assert_eq!(bodies[0].width(), 8.0);
    }

    #[test]
    fn line_uses_one_vertex_per_unit() {
        let (data, m, cfg) = fixture();
        let units = aggregate(&data, 1);
        let frame = Frame { metrics: &m, units: &units, config: &cfg, zoom: 1.0 };
        let mut s = RecordingSurface::new(300.0, 400.0);
        Line.paint(&frame, &mut s);
        let moves = s.ops().iter().filter(|op| matches!(op, DrawOp::MoveTo(..))).count();
        let lines = s.ops().iter().filter(|op| matches!(op, DrawOp::LineTo(..))).count();
        assert_eq!((moves, lines), (1, 2));
        assert_eq!(s.ops().last(), Some(&DrawOp::Stroke(cfg.colors.line, 2.0)));
    }

    #[test]
    fn area_closes_to_baseline_after_line() {
        let (data, m, cfg) = fixture();
        let units = aggregate(&data, 1);
        let frame = Frame { metrics: &m, units: &units, config: &cfg, zoom: 1.0 };
        let mut s = RecordingSurface::new(300.0, 400.0);
        Area.paint(&frame, &mut s);
        let ops = s.ops();
        let stroke_at = ops.iter().position(|op| matches!(op, DrawOp::Stroke(..))).unwrap();
        assert_eq!(ops[stroke_at + 1], DrawOp::LineTo(20.0, 370.0));
        assert_eq!(ops[stroke_at + 2], DrawOp::LineTo(0.0, 370.0));
        assert_eq!(ops[stroke_at + 3], DrawOp::ClosePath);
        assert_eq!(ops[stroke_at + 4], DrawOp::Fill(cfg.colors.area));
    }

    #[test]
    fn strategies_cover_three_types() {
        assert!(encoding_for(ChartType::Candle).is_some());
        assert_eq!(encoding_for(ChartType::Area).map(|e| e.chart_type()), Some(ChartType::Area));
        assert!(encoding_for(ChartType::Renko).is_none());
    }
}
