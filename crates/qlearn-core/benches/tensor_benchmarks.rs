use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use qlearn_core::Tensor;

fn square(n: usize) -> Tensor {
    Tensor::from_fn((n, n), |(i, j)| ((i * n + j) % 7) as f64 * 0.1)
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for n in [8usize, 32, 64] {
        let a = square(n);
        let b = square(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(&a).multiply(black_box(&b)));
        });
    }
    group.finish();
}

fn bench_elementwise(c: &mut Criterion) {
    let a = square(64);
    let b = square(64);
    c.bench_function("dot_64", |bench| bench.iter(|| black_box(&a).dot(black_box(&b))));
    c.bench_function("transpose_64", |bench| bench.iter(|| black_box(&a).transpose()));
}

criterion_group!(benches, bench_multiply, bench_elementwise);
criterion_main!(benches);
