use fractal_core::{ChartEngine, ChartOptions, Record, RecordingSurface};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_engine(n: usize, chart_type: &str) -> ChartEngine<RecordingSurface> {
    let opts = ChartOptions { chart_type: Some(chart_type.to_string()), ..Default::default() };
    let mut engine = ChartEngine::new(RecordingSurface::new(1600.0, 900.0), opts).expect("engine");
    let data = (0..n)
        .map(|i| {
            let p = (i as f64 * 0.01).sin() * 10.0 + 100.0;
            Record::new(i as i64, p, p + 0.8, p - 0.8, p + 0.1)
        })
        .collect();
    engine.load(data);
    engine.set_zoom(0.1);
    engine
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pass");
    for chart_type in ["candle", "line", "area"] {
        group.bench_function(format!("{chart_type}_50k"), |b| {
            let mut engine = build_engine(50_000, chart_type);
            b.iter(|| {
                // pan invalidates metrics so every pass does the full pipeline
                engine.pan(1.0);
                black_box(engine.render());
                engine.surface_mut().clear_ops();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
