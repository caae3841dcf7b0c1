// File: crates/fractal-render-skia/tests/smoke.rs
// Purpose: End-to-end paint through the engine onto a Skia raster, checked via PNG and RGBA readback.

use fractal_core::{ChartEngine, ChartOptions, Record, Surface};
use fractal_render_skia::SkiaSurface;

fn three() -> Vec<Record> {
    vec![
        Record::new(1, 100.0, 105.0, 95.0, 102.0),
        Record::new(2, 102.0, 104.0, 100.0, 101.0),
        Record::new(3, 101.0, 103.0, 98.0, 99.0),
    ]
}

fn pixel(img: &image::RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn render_smoke_png() {
    let surface = SkiaSurface::new(300.0, 400.0, 1.0).expect("surface");
    let mut engine = ChartEngine::new(surface, ChartOptions::default()).expect("engine");
    engine.load(three());
    assert!(engine.frame());

    let bytes = engine.surface_mut().to_png_bytes().expect("png bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width(), img.height()), (300, 400));
    // top padding is background
    assert_eq!(pixel(&img, 0, 0), [0x12, 0x18, 0x26, 255]);
    // first body spans y 132..200 (open 100 -> close 102), bullish
    assert_eq!(pixel(&img, 2, 166), [0x26, 0xa6, 0x9a, 255]);
    // second body (x 10..18) is bearish
    let y = ((370.0 - (101.5 - 95.0) * 34.0) as u32).min(399);
    assert_eq!(pixel(&img, 12, y), [0xef, 0x53, 0x50, 255]);

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    engine.surface_mut().save_png(&out).expect("save png");
    assert!(std::fs::metadata(&out).expect("output exists").len() > 0);
}

#[test]
fn scale_factor_sizes_backing_store() {
    let surface = SkiaSurface::new(120.0, 80.0, 2.0).expect("surface");
    let mut engine = ChartEngine::new(surface, ChartOptions::default()).expect("engine");
    engine.load(three());
    engine.render();
    let (px, w, h, stride) = engine.surface_mut().to_rgba8().expect("rgba");
    assert_eq!((w, h), (240, 160));
    assert_eq!(stride, 240 * 4);
    assert_eq!(px.len(), stride * h as usize);
    // logical geometry is unchanged
    assert_eq!(engine.viewport().len(), 3);
    // bottom-right corner is background, not left unpainted
    let last = &px[px.len() - 4..];
    assert_eq!(last, &[0x12, 0x18, 0x26, 255]);
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(SkiaSurface::new(100.0, 100.0, 0.0).is_err());
    assert!(SkiaSurface::new(f64::INFINITY, 100.0, 1.0).is_err());
    let mut s = SkiaSurface::new(10.0, 10.0, 1.0).expect("surface");
    assert!(s.resize(-3.0, 10.0).is_err());
    assert_eq!(s.geometry().width, 10.0);
}

#[test]
fn resize_reallocates_and_repaints() {
    let surface = SkiaSurface::new(100.0, 100.0, 1.0).expect("surface");
    let mut engine = ChartEngine::new(surface, ChartOptions::default()).expect("engine");
    engine.load(three());
    engine.frame();
    engine.resize(50.0, 60.0).expect("resize");
    assert!(engine.frame());
    let (_, w, h, _) = engine.surface_mut().to_rgba8().expect("rgba");
    assert_eq!((w, h), (50, 60));
}

#[test]
fn area_fills_below_the_line() {
    let opts = ChartOptions::from_json_str(r##"{ "chartType": "area", "colors": { "area": "#ff000080" } }"##).expect("opts");
    let surface = SkiaSurface::new(300.0, 400.0, 1.0).expect("surface");
    let mut engine = ChartEngine::new(surface, opts).expect("engine");
    engine.load(three());
    engine.render();
    let (px, w, _, stride) = engine.surface_mut().to_rgba8().expect("rgba");
    // inside the polygon, just above the baseline at x=10
    let at = |x: usize, y: usize| &px[y * stride + x * 4..y * stride + x * 4 + 4];
    assert_ne!(at(10, 365), &[0x12, 0x18, 0x26, 255]);
    // right of the last vertex (x=20) nothing is painted
    assert_eq!(at((w - 1) as usize, 365), &[0x12, 0x18, 0x26, 255]);
}

#[test]
fn price_ticks_paint_near_right_edge() {
    let render = |ticks: Option<usize>| {
        let opts = ChartOptions { price_ticks: ticks, ..Default::default() };
        let mut engine = ChartEngine::new(SkiaSurface::new(300.0, 400.0, 1.0).expect("surface"), opts).expect("engine");
        engine.load(three());
        engine.render();
        let glyphs = engine.surface().has_glyphs();
        let (px, _, _, stride) = engine.surface_mut().to_rgba8().expect("rgba");
        (px, stride, glyphs)
    };
    // candles end at x=28; the label column is x 200..300
    let painted_in_label_column = |px: &[u8], stride: usize| {
        (0..400usize).any(|y| (200..300usize).any(|x| px[y * stride + x * 4..y * stride + x * 4 + 4] != [0x12, 0x18, 0x26, 255]))
    };

    let (plain, stride, _) = render(None);
    assert!(!painted_in_label_column(&plain, stride));

    let (ticked, stride, glyphs) = render(Some(3));
    if !glyphs {
        eprintln!("[smoke] no system fonts; skipping label pixel check");
        return;
    }
    assert!(painted_in_label_column(&ticked, stride), "price labels left no pixels at the right edge");
}
