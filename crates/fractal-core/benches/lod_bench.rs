use fractal_core::lod::aggregate;
use fractal_core::Record;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_ohlc(n: usize) -> Vec<Record> {
    let mut v = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let h = o + 1.0;
        let l = o - 1.0;
        let c = o + 0.2 * (i as f64 * 0.05).sin();
        price = c;
        v.push(Record::new(i as i64, o, h, l, c));
    }
    v
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lod_aggregate");
    for &n in &[50_000usize, 100_000usize] {
        let data = gen_ohlc(n);
        for &factor in &[1usize, 3usize, 5usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_f{factor}")), &factor, |b, &f| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(aggregate(&d, f)); },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
