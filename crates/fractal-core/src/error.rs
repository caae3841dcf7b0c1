// File: crates/fractal-core/src/error.rs
// Summary: Engine error taxonomy. Degenerate ranges and empty slices are not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid drawing surface: {0}")]
    InvalidSurface(String),

    #[error("invalid data shape: {0}")]
    InvalidDataShape(String),

    #[error("Invalid chart type: {0}")]
    InvalidChartType(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("surface backend error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
