// File: crates/fractal-core/src/state.rs
// Summary: Data container for the loaded dataset and its descriptive metadata.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::record::Record;
use crate::types::Timeframe;

/// Owns the raw record sequence. Replaced wholesale on every load.
#[derive(Clone, Debug, Default)]
pub struct ChartState {
    records: Vec<Record>,
    symbol: Option<String>,
    timeframe: Timeframe,
    last_updated: Option<DateTime<Utc>>,
}

impl ChartState {
    pub fn new() -> Self { Self::default() }

    pub fn set_records(&mut self, records: Vec<Record>, at: DateTime<Utc>) {
        self.records = records;
        self.last_updated = Some(at);
    }

    pub fn records(&self) -> &[Record] { &self.records }

    pub fn symbol(&self) -> Option<&str> { self.symbol.as_deref() }

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol = Some(symbol.into());
    }

    pub fn timeframe(&self) -> Timeframe { self.timeframe }

    /// Parse and set the timeframe; unknown values are rejected and state is left untouched.
    pub fn set_timeframe(&mut self, timeframe: &str) -> Result<()> {
        self.timeframe = timeframe.parse()?;
        Ok(())
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> { self.last_updated }

    pub fn reset(&mut self) {
        self.records.clear();
        self.symbol = None;
        self.timeframe = Timeframe::default();
    }
}
