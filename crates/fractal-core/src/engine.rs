// File: crates/fractal-core/src/engine.rs
// Summary: ChartEngine: owns data, view state and surface; coordinates one paint pass per frame.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ChartConfig, ChartOptions};
use crate::encoding::{encoding_for, Frame};
use crate::error::Result;
use crate::events::{ChartEvent, EventKind, Listeners};
use crate::geometry::Rect;
use crate::interaction::{drag_to_pan, wheel_to_zoom_step, Interaction};
use crate::lod::{aggregate, lod_factor};
use crate::metrics::{Metrics, MetricsCache};
use crate::record::{normalize, Record};
use crate::scheduler::FrameScheduler;
use crate::state::ChartState;
use crate::surface::{Surface, SurfaceGeometry};
use crate::ticks::{draw_price_ticks, price_ticks};
use crate::types::ChartType;
use crate::viewport::{ViewState, Viewport};

/// What the last paint pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Background cleared, nothing else (no data, or empty visible slice).
    Cleared,
    /// Background cleared, chart type has no renderer; skipped.
    Skipped(ChartType),
    /// Encoding painted `units` units at the given LOD factor.
    Painted { chart_type: ChartType, units: usize, lod: usize },
}

pub struct ChartEngine<S: Surface> {
    surface: S,
    geometry: SurfaceGeometry,
    config: ChartConfig,
    state: ChartState,
    view: ViewState,
    viewport: Viewport,
    metrics: MetricsCache,
    scheduler: FrameScheduler,
    listeners: Listeners,
    paints: u64,
}

impl<S: Surface> ChartEngine<S> {
    /// Build an engine over `surface`. Fails without constructing anything if
    /// the surface geometry is unusable or the options do not resolve.
    pub fn new(surface: S, options: ChartOptions) -> Result<Self> {
        let geometry = surface.geometry();
        geometry.validate()?;
        let config = ChartConfig::resolve(options)?;
        debug!(width = geometry.width, height = geometry.height, scale = geometry.scale_factor, chart_type = %config.chart_type, "engine created");
        Ok(Self {
            surface,
            geometry,
            config,
            state: ChartState::new(),
            view: ViewState::default(),
            viewport: Viewport::default(),
            metrics: MetricsCache::new(),
            scheduler: FrameScheduler::new(),
            listeners: Listeners::default(),
            paints: 0,
        })
    }

    // ---- state transitions --------------------------------------------------

    /// Replace the dataset wholesale and schedule a paint.
    pub fn load(&mut self, records: Vec<Record>) {
        debug!(count = records.len(), "load");
        self.state.set_records(records, Utc::now());
        self.update_viewport();
        self.request_render();
    }

    /// Normalize loosely-typed records and load them. Non-array input is
    /// rejected and the current dataset is left untouched.
    pub fn load_json(&mut self, input: &Value) -> Result<()> {
        let records = normalize(input, Utc::now())?;
        self.load(records);
        Ok(())
    }

    pub fn set_zoom(&mut self, level: f64) {
        let zoom = self.view.set_zoom(level);
        self.update_viewport();
        self.listeners.emit(ChartEvent::Zoom { zoom });
        self.request_render();
    }

    /// Shift the view by `delta` records; no bounds here, the viewport clamps.
    pub fn pan(&mut self, delta: f64) {
        let offset = self.view.pan(delta);
        self.update_viewport();
        self.listeners.emit(ChartEvent::Pan { offset });
        self.request_render();
    }

    /// Resize the backing surface. The new geometry is read once here and the
    /// metrics are invalidated before anything can read them.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.surface.resize(width, height)?;
        self.geometry = self.surface.geometry();
        debug!(width = self.geometry.width, height = self.geometry.height, "resize");
        self.update_viewport();
        self.request_render();
        Ok(())
    }

    /// Switch encoding. Unknown names are rejected with the value in the error.
    pub fn set_chart_type(&mut self, chart_type: &str) -> Result<()> {
        let parsed: ChartType = chart_type.parse()?;
        debug!(from = %self.config.chart_type, to = %parsed, "chart type");
        self.config.chart_type = parsed;
        self.metrics.invalidate();
        self.request_render();
        Ok(())
    }

    pub fn set_timeframe(&mut self, timeframe: &str) -> Result<()> {
        self.state.set_timeframe(timeframe)
    }

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.state.set_symbol(symbol);
    }

    /// Register the listener for `kind`, replacing any previous one.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(ChartEvent) + 'static) {
        self.listeners.set(kind, Box::new(listener));
    }

    pub fn off(&mut self, kind: EventKind) -> bool {
        self.listeners.remove(kind)
    }

    /// Apply a host input event.
    pub fn handle(&mut self, input: Interaction) -> Result<()> {
        match input {
            Interaction::Drag { dx } => self.pan(drag_to_pan(dx)),
            Interaction::Wheel { delta_y } => self.set_zoom(self.view.zoom() * wheel_to_zoom_step(delta_y)),
            Interaction::Resize { width, height } => self.resize(width, height)?,
        }
        Ok(())
    }

    fn update_viewport(&mut self) {
        self.viewport = self.view.viewport(self.state.records().len(), self.geometry.width, self.config.stride());
        self.metrics.invalidate();
    }

    // ---- frame scheduling ---------------------------------------------------

    /// Ask for a paint on the next display refresh. Coalesces with any
    /// request already pending.
    pub fn request_render(&mut self) {
        self.scheduler.request();
    }

    pub fn has_pending_render(&self) -> bool { self.scheduler.is_pending() }

    /// Display-refresh hook. Paints once if anything is pending, using the
    /// latest state. Returns whether a paint ran.
    pub fn frame(&mut self) -> bool {
        if self.scheduler.take() {
            self.render();
            true
        } else {
            false
        }
    }

    // ---- painting -------------------------------------------------------------

    /// Paint now: clear, then dispatch to the current encoding.
    pub fn render(&mut self) -> PaintOutcome {
        self.paints += 1;
        let geo = self.geometry;
        let surface = &mut self.surface;
        surface.save();
        surface.scale(geo.scale_factor as f32, geo.scale_factor as f32);
        surface.fill_rect(Rect::from_ltrb(0.0, 0.0, geo.width as f32, geo.height as f32), self.config.colors.background);

        let outcome = if self.state.records().is_empty() {
            PaintOutcome::Cleared
        } else {
            Self::paint_encoding(
                surface,
                &mut self.metrics,
                &self.config,
                self.state.records(),
                self.viewport,
                geo,
                self.view.zoom(),
            )
        };
        surface.restore();
        outcome
    }

    fn paint_encoding(
        surface: &mut S,
        cache: &mut MetricsCache,
        config: &ChartConfig,
        records: &[Record],
        viewport: Viewport,
        geo: SurfaceGeometry,
        zoom: f64,
    ) -> PaintOutcome {
        let Some(encoding) = encoding_for(config.chart_type) else {
            warn!(chart_type = %config.chart_type, "unsupported chart type; skipping paint");
            return PaintOutcome::Skipped(config.chart_type);
        };
        let Some(metrics) = cache.get_or_compute(|| {
            Metrics::compute(records, viewport, geo.height, config.padding_top, config.padding_bottom)
        }) else {
            return PaintOutcome::Cleared;
        };

        let lod = lod_factor(geo.width, metrics.visible.len(), config.min_unit_px, config.max_lod);
        let units = aggregate(metrics.slice(records), lod);
        if lod > 1 {
            debug!(lod, units = units.len(), "lod aggregation");
        }
        let frame = Frame { metrics, units: &units, config, zoom };
        encoding.paint(&frame, surface);

        if config.price_ticks >= 2 {
            draw_price_ticks(surface, &price_ticks(metrics, config.price_ticks), geo.width);
        }
        PaintOutcome::Painted { chart_type: config.chart_type, units: units.len(), lod }
    }

    // ---- accessors ------------------------------------------------------------

    pub fn zoom(&self) -> f64 { self.view.zoom() }
    pub fn offset(&self) -> f64 { self.view.offset() }
    pub fn viewport(&self) -> Viewport { self.viewport }
    pub fn geometry(&self) -> SurfaceGeometry { self.geometry }
    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn state(&self) -> &ChartState { &self.state }
    pub fn records(&self) -> &[Record] { self.state.records() }

    /// Records inside the current viewport.
    pub fn visible_records(&self) -> &[Record] {
        &self.state.records()[self.viewport.range()]
    }

    /// Metrics for the current viewport, computed on first read after an invalidation.
    pub fn metrics(&mut self) -> Option<&Metrics> {
        let (records, viewport, geo, cfg) = (self.state.records(), self.viewport, self.geometry, &self.config);
        self.metrics.get_or_compute(|| Metrics::compute(records, viewport, geo.height, cfg.padding_top, cfg.padding_bottom))
    }

    pub fn metrics_cache(&self) -> &MetricsCache { &self.metrics }
    pub fn scheduler(&self) -> &FrameScheduler { &self.scheduler }
    /// Number of paint passes executed so far.
    pub fn paints(&self) -> u64 { self.paints }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn into_surface(self) -> S { self.surface }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for ChartEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("geometry", &self.geometry)
            .field("config", &self.config)
            .field("view", &self.view)
            .field("viewport", &self.viewport)
            .field("records", &self.state.records().len())
            .finish()
    }
}
