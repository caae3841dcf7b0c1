// File: crates/fractal-core/src/surface.rs
// Summary: Drawable surface capability consumed by the renderers, plus an in-memory recorder.

use crate::error::{EngineError, Result};
use crate::geometry::Rect;
use crate::theme::Rgba;

/// Logical size of a surface and its display density. Resolved once when
/// the surface is set up and passed explicitly to whoever needs it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    pub width: f64,
    pub height: f64,
    pub scale_factor: f64,
}

impl SurfaceGeometry {
    pub const fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        Self { width, height, scale_factor }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width >= 0.0 && self.height.is_finite() && self.height >= 0.0) {
            return Err(EngineError::InvalidSurface(format!("bad dimensions {}x{}", self.width, self.height)));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(EngineError::InvalidSurface(format!("bad scale factor {}", self.scale_factor)));
        }
        Ok(())
    }

    /// Backing-store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        let px = |v: f64| (v * self.scale_factor).round().max(0.0) as u32;
        (px(self.width), px(self.height))
    }
}

/// 2D drawing primitives in the style of an immediate-mode canvas context.
/// Coordinates are logical pixels after any `scale` in effect.
pub trait Surface {
    fn geometry(&self) -> SurfaceGeometry;
    /// Resize the backing store to a new logical size, keeping the scale factor.
    fn resize(&mut self, width: f64, height: f64) -> Result<()>;

    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, sx: f32, sy: f32);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    fn stroke(&mut self, color: Rgba, width: f32);
    fn fill(&mut self, color: Rgba);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba);

    /// Advance width of `text` at `size`. Backends with real fonts should
    /// override this; the default assumes ~0.6em per glyph.
    fn measure_text(&mut self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.6
    }
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Scale(f32, f32),
    FillRect(Rect, Rgba),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    ClosePath,
    Stroke(Rgba, f32),
    Fill(Rgba),
    FillText(String, f32, f32),
}

/// Surface that only records calls. Useful headless and in tests.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    geometry: SurfaceGeometry,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_scale(width, height, 1.0)
    }

    pub fn with_scale(width: f64, height: f64, scale_factor: f64) -> Self {
        Self { geometry: SurfaceGeometry::new(width, height, scale_factor), ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] { &self.ops }

    pub fn clear_ops(&mut self) { self.ops.clear(); }

    /// Ops other than frame setup (save/scale/restore) and the background clear.
    pub fn content_ops(&self) -> Vec<&DrawOp> {
        let mut seen_clear = false;
        self.ops
            .iter()
            .filter(|op| match op {
                DrawOp::Save | DrawOp::Restore | DrawOp::Scale(..) => false,
                DrawOp::FillRect(..) if !seen_clear => {
                    seen_clear = true;
                    false
                }
                _ => true,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn geometry(&self) -> SurfaceGeometry { self.geometry }

    fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        let next = SurfaceGeometry { width, height, ..self.geometry };
        next.validate()?;
        self.geometry = next;
        Ok(())
    }

    fn save(&mut self) { self.ops.push(DrawOp::Save); }
    fn restore(&mut self) { self.ops.push(DrawOp::Restore); }
    fn scale(&mut self, sx: f32, sy: f32) { self.ops.push(DrawOp::Scale(sx, sy)); }
    fn fill_rect(&mut self, rect: Rect, color: Rgba) { self.ops.push(DrawOp::FillRect(rect, color)); }
    fn begin_path(&mut self) { self.ops.push(DrawOp::BeginPath); }
    fn move_to(&mut self, x: f32, y: f32) { self.ops.push(DrawOp::MoveTo(x, y)); }
    fn line_to(&mut self, x: f32, y: f32) { self.ops.push(DrawOp::LineTo(x, y)); }
    fn close_path(&mut self) { self.ops.push(DrawOp::ClosePath); }
    fn stroke(&mut self, color: Rgba, width: f32) { self.ops.push(DrawOp::Stroke(color, width)); }
    fn fill(&mut self, color: Rgba) { self.ops.push(DrawOp::Fill(color)); }
    fn fill_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Rgba) {
        self.ops.push(DrawOp::FillText(text.to_string(), x, y));
    }
}
