// File: crates/fractal-render-skia/src/lib.rs
// Summary: Skia CPU raster surface implementing the engine's drawing capability, with PNG/RGBA export.

use anyhow::{Context, Result};
use fractal_core::geometry::Rect;
use fractal_core::{EngineError, Rgba, Surface, SurfaceGeometry};
use skia_safe as skia;

/// A raster surface sized in device pixels (`logical * scale_factor`).
/// The scale factor is fixed at construction; drawing happens in logical
/// pixels once the engine applies it with `scale`.
pub struct SkiaSurface {
    surface: skia::Surface,
    geometry: SurfaceGeometry,
    path: skia::Path,
    font: skia::Font,
}

impl SkiaSurface {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Result<Self> {
        let geometry = SurfaceGeometry::new(width, height, scale_factor);
        geometry.validate()?;
        let surface = raster(geometry)?;
        Ok(Self { surface, geometry, path: skia::Path::new(), font: label_font() })
    }

    /// Whether labels render with real glyphs. False when the system font
    /// manager has no families (bare containers).
    pub fn has_glyphs(&self) -> bool {
        self.font.typeface().count_glyphs() > 0
    }

    /// Encode the current contents as PNG.
    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write the current contents to a PNG file, creating parent directories.
    pub fn save_png(&mut self, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Read back unpremultiplied RGBA8 pixels: (pixels, width, height, row stride).
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = self.geometry.device_size();
        let info = skia::ImageInfo::new((w as i32, h as i32), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read_pixels failed");
        }
        Ok((pixels, w, h, stride))
    }
}

fn raster(geometry: SurfaceGeometry) -> Result<skia::Surface> {
    // Skia refuses zero-sized rasters; keep at least one device pixel.
    let (w, h) = geometry.device_size();
    skia::surfaces::raster_n32_premul((w.max(1) as i32, h.max(1) as i32))
        .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))
}

// Default typeface from the system font manager, falling back to Skia's empty font.
fn label_font() -> skia::Font {
    let mgr = skia::FontMgr::default();
    match mgr.legacy_make_typeface(None::<&str>, skia::FontStyle::normal()) {
        Some(typeface) => skia::Font::from_typeface(typeface, 12.0_f32),
        None => {
            tracing::warn!("no system typeface; price labels will not render");
            skia::Font::default()
        }
    }
}

fn to_skia(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn paint(color: Rgba, style: skia::paint::Style) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(style);
    p.set_color(to_skia(color));
    p
}

impl Surface for SkiaSurface {
    fn geometry(&self) -> SurfaceGeometry { self.geometry }

    fn resize(&mut self, width: f64, height: f64) -> fractal_core::Result<()> {
        let next = SurfaceGeometry { width, height, ..self.geometry };
        next.validate()?;
        self.surface = raster(next).map_err(|e| EngineError::Surface(e.to_string()))?;
        self.geometry = next;
        tracing::debug!(width, height, "skia surface resized");
        Ok(())
    }

    fn save(&mut self) {
        self.surface.canvas().save();
    }

    fn restore(&mut self) {
        self.surface.canvas().restore();
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.surface.canvas().scale((sx, sy));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let r = skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom);
        self.surface.canvas().draw_rect(r, &paint(color, skia::paint::Style::Fill));
    }

    fn begin_path(&mut self) {
        self.path = skia::Path::new();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x, y));
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    // The path survives stroke/fill until the next begin_path.
    fn stroke(&mut self, color: Rgba, width: f32) {
        let mut p = paint(color, skia::paint::Style::Stroke);
        p.set_stroke_width(width);
        self.surface.canvas().draw_path(&self.path, &p);
    }

    fn fill(&mut self, color: Rgba) {
        self.surface.canvas().draw_path(&self.path, &paint(color, skia::paint::Style::Fill));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        self.font.set_size(size.max(1.0));
        let p = paint(color, skia::paint::Style::Fill);
        self.surface.canvas().draw_str(text, (x, y), &self.font, &p);
    }

    fn measure_text(&mut self, text: &str, size: f32) -> f32 {
        self.font.set_size(size.max(1.0));
        let (advance, _bounds) = self.font.measure_str(text, None);
        advance
    }
}
