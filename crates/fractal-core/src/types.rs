// File: crates/fractal-core/src/types.rs
// Summary: Supported chart types and timeframes, plus shared default constants.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Default candle body width in pixels.
pub const CANDLE_WIDTH: f64 = 8.0;
/// Default gap between candles in pixels.
pub const SPACING: f64 = 2.0;
/// Default vertical padding above and below the plot, in pixels.
pub const PADDING: f64 = 30.0;
/// Default upper bound for the LOD bucket size.
pub const MAX_LOD: usize = 5;
/// Narrowest legible unit, in pixels, before adjacent records are merged.
pub const MIN_UNIT_PX: f64 = 3.0;

/// Zoom bounds applied by `set_zoom`.
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 10.0;

/// Chart encodings accepted by the engine.
///
/// Every variant is a valid setter value; only `Candle`, `Line` and `Area`
/// have a renderer; the rest are skipped with a warning at paint time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChartType {
    #[default]
    Candle,
    Line,
    Area,
    HeikinAshi,
    Renko,
    Baseline,
    HollowCandle,
    Ohlc,
}

impl ChartType {
    pub const ALL: [ChartType; 8] = [
        ChartType::Candle,
        ChartType::Line,
        ChartType::Area,
        ChartType::HeikinAshi,
        ChartType::Renko,
        ChartType::Baseline,
        ChartType::HollowCandle,
        ChartType::Ohlc,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ChartType::Candle => "candle",
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::HeikinAshi => "heikin-ashi",
            ChartType::Renko => "renko",
            ChartType::Baseline => "baseline",
            ChartType::HollowCandle => "hollow-candle",
            ChartType::Ohlc => "ohlc",
        }
    }
}

impl FromStr for ChartType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EngineError::InvalidChartType(s.to_string()))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candle period of the loaded dataset. Informational; the engine does not resample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    M1,
    M5,
    H1,
    #[default]
    D1,
    W1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [Timeframe::M1, Timeframe::M5, Timeframe::H1, Timeframe::D1, Timeframe::W1];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::H1 => "1h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1w",
        }
    }
}

impl FromStr for Timeframe {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EngineError::InvalidTimeframe(s.to_string()))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_round_trips_through_str() {
        for t in ChartType::ALL {
            assert_eq!(t.as_str().parse::<ChartType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_values_name_the_offender() {
        let err = "pie".parse::<ChartType>().unwrap_err();
        assert!(err.to_string().contains("pie"));
        let err = "3d".parse::<Timeframe>().unwrap_err();
        assert!(err.to_string().contains("3d"));
    }

    #[test]
    fn defaults_match_layout_constants() {
        assert_eq!(ChartType::default(), ChartType::Candle);
        assert_eq!(Timeframe::default().as_str(), "1d");
    }
}
