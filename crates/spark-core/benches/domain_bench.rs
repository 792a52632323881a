use spark_core::{compute_domain, index_from_client_x, plan_frame, LayoutBox, Series};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn make_series(count: usize, n: usize) -> Vec<Series> {
    (0..count)
        .map(|s| {
            let points = (0..n)
                .map(|i| if i % 97 == 0 { f64::NAN } else { ((i + s * 31) as f64 * 0.003).cos() * 500.0 })
                .collect();
            Series::new(format!("s{s}"), points)
        })
        .collect()
}

fn bench_domain(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_domain");
    for &n in &[1_000usize, 100_000usize] {
        let series = make_series(3, n);
        group.bench_function(format!("series3_{n}"), |b| {
            b.iter(|| black_box(compute_domain(black_box(&series))))
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let series = make_series(3, 10_000);
    c.bench_function("plan_frame_10k", |b| {
        b.iter(|| black_box(plan_frame(800.0, 160.0, black_box(&series))))
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let bounds = LayoutBox::from_ltwh(24.0, 80.0, 800.0, 160.0);
    c.bench_function("index_from_client_x", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for x in 0..900 {
                acc += index_from_client_x(&bounds, 12, black_box(x as f64));
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_domain, bench_plan, bench_hit_test);
criterion_main!(benches);
