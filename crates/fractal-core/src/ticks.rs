// File: crates/fractal-core/src/ticks.rs
// Summary: Price labels along the right edge of the plot.

use crate::metrics::Metrics;
use crate::surface::Surface;
use crate::theme::Rgba;

const LABEL_COLOR: Rgba = Rgba::rgb(0xaa, 0xaa, 0xaa);
const LABEL_SIZE: f32 = 12.0;
const LABEL_MARGIN: f32 = 8.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PriceTick {
    pub price: f64,
    pub y: f32,
    pub label: String,
}

/// `count` evenly spaced ticks from `min_low` to `max_high`. Fewer than two
/// ticks yields none.
pub fn price_ticks(metrics: &Metrics, count: usize) -> Vec<PriceTick> {
    if count < 2 {
        return Vec::new();
    }
    let step = (metrics.max_high - metrics.min_low) / (count - 1) as f64;
    (0..count)
        .map(|i| metrics.min_low + step * i as f64)
        .map(|price| PriceTick { price, y: metrics.price_to_y(price), label: format!("{price:.2}") })
        .collect()
}

pub fn draw_price_ticks(surface: &mut dyn Surface, ticks: &[PriceTick], width: f64) {
    for t in ticks {
        let x = width as f32 - LABEL_MARGIN - surface.measure_text(&t.label, LABEL_SIZE);
        surface.fill_text(&t.label, x, t.y, LABEL_SIZE, LABEL_COLOR);
    }
}
