// File: crates/fractal-core/src/lib.rs
// Summary: Core library entry point; exports the chart engine and its building blocks.

pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod interaction;
pub mod lod;
pub mod metrics;
pub mod record;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod theme;
pub mod ticks;
pub mod types;
pub mod viewport;

pub use config::{ChartConfig, ChartOptions, ColorOptions};
pub use encoding::{encoding_for, Area, Candlestick, Encoding, Frame, Line};
pub use engine::{ChartEngine, PaintOutcome};
pub use error::{EngineError, Result};
pub use events::{ChartEvent, EventKind};
pub use interaction::Interaction;
pub use lod::{aggregate, lod_factor, AggregatedUnit};
pub use metrics::{Metrics, MetricsCache};
pub use record::Record;
pub use state::ChartState;
pub use surface::{DrawOp, RecordingSurface, Surface, SurfaceGeometry};
pub use theme::{Palette, Rgba};
pub use types::{ChartType, Timeframe};
pub use viewport::{ViewState, Viewport};
