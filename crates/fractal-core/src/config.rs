// File: crates/fractal-core/src/config.rs
// Summary: User-facing chart options and their one-time resolution against defaults.

use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::theme::{Palette, Rgba};
use crate::types::{ChartType, CANDLE_WIDTH, MAX_LOD, MIN_UNIT_PX, PADDING, SPACING};

/// Partial options as supplied by the host. Unset fields take defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    #[serde(alias = "chartType")]
    pub chart_type: Option<String>,
    #[serde(alias = "candleWidth")]
    pub candle_width: Option<f64>,
    pub spacing: Option<f64>,
    #[serde(alias = "paddingTop")]
    pub padding_top: Option<f64>,
    #[serde(alias = "paddingBottom")]
    pub padding_bottom: Option<f64>,
    #[serde(alias = "maxLOD", alias = "maxLod")]
    pub max_lod: Option<usize>,
    #[serde(alias = "minUnitPx")]
    pub min_unit_px: Option<f64>,
    #[serde(alias = "priceTicks")]
    pub price_ticks: Option<usize>,
    pub colors: Option<ColorOptions>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub up: Option<String>,
    pub down: Option<String>,
    pub line: Option<String>,
    pub area: Option<String>,
    #[serde(alias = "bg")]
    pub background: Option<String>,
}

impl ChartOptions {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Fully resolved configuration. Built once at engine construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub candle_width: f64,
    pub spacing: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub max_lod: usize,
    pub min_unit_px: f64,
    pub price_ticks: usize,
    pub colors: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            candle_width: CANDLE_WIDTH,
            spacing: SPACING,
            padding_top: PADDING,
            padding_bottom: PADDING,
            max_lod: MAX_LOD,
            min_unit_px: MIN_UNIT_PX,
            price_ticks: 0,
            colors: Palette::default(),
        }
    }
}

impl ChartConfig {
    /// Merge `opts` over the defaults, nested colors included.
    ///
    /// An unknown chart type falls back to candlestick with a warning; numeric
    /// options out of range are rejected.
    pub fn resolve(opts: ChartOptions) -> Result<Self> {
        let d = Self::default();
        let chart_type = match opts.chart_type.as_deref() {
            None => d.chart_type,
            Some(s) => s.parse().unwrap_or_else(|_| {
                tracing::warn!(chart_type = s, "unknown chart type in options; using {}", d.chart_type);
                d.chart_type
            }),
        };
        let colors = resolve_colors(opts.colors.unwrap_or_default(), d.colors)?;
        let cfg = Self {
            chart_type,
            candle_width: positive("candle_width", opts.candle_width.unwrap_or(d.candle_width))?,
            spacing: non_negative("spacing", opts.spacing.unwrap_or(d.spacing))?,
            padding_top: non_negative("padding_top", opts.padding_top.unwrap_or(d.padding_top))?,
            padding_bottom: non_negative("padding_bottom", opts.padding_bottom.unwrap_or(d.padding_bottom))?,
            max_lod: opts.max_lod.unwrap_or(d.max_lod),
            min_unit_px: positive("min_unit_px", opts.min_unit_px.unwrap_or(d.min_unit_px))?,
            price_ticks: opts.price_ticks.unwrap_or(d.price_ticks),
            colors,
        };
        if cfg.max_lod < 1 {
            return Err(EngineError::InvalidConfig("max_lod must be >= 1".into()));
        }
        Ok(cfg)
    }

    /// Horizontal distance between consecutive units at zoom 1.
    #[inline]
    pub fn stride(&self) -> f64 { self.candle_width + self.spacing }
}

fn resolve_colors(c: ColorOptions, d: Palette) -> Result<Palette> {
    let pick = |v: Option<String>, fallback: Rgba| v.map_or(Ok(fallback), |s| Rgba::parse(&s));
    Ok(Palette {
        up: pick(c.up, d.up)?,
        down: pick(c.down, d.down)?,
        line: pick(c.line, d.line)?,
        area: pick(c.area, d.area)?,
        background: pick(c.background, d.background)?,
    })
}

fn positive(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v > 0.0 { Ok(v) } else { Err(EngineError::InvalidConfig(format!("{name} must be a positive number, got {v}"))) }
}

fn non_negative(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v >= 0.0 { Ok(v) } else { Err(EngineError::InvalidConfig(format!("{name} must be >= 0, got {v}"))) }
}
