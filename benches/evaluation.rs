use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::{build_operator_tree, DefaultNumericTypes};
use mathconv::{evaluate_expression, Expression, MathEngine};
use rand::Rng;

const NO_ARGS: [f64; 0] = [];

fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    init_logger();
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let engine = MathEngine::new();

    let expr = "2 + 3";
    let parsed = Expression::parse(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("cached_arithmetic", |b| {
        b.iter(|| engine.evaluate(black_box(expr), &NO_ARGS))
    });

    group.bench_function("uncached_arithmetic", |b| {
        b.iter(|| evaluate_expression(black_box(expr), &NO_ARGS))
    });

    group.bench_function("preparsed_arithmetic", |b| {
        b.iter(|| black_box(&parsed).evaluate(&NO_ARGS))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark complex arithmetic expressions
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    init_logger();
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let engine = MathEngine::new();

    let expr = "(10 + 20) * 3 / (4 - 1) + 5";
    let parsed = Expression::parse(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("cached_complex_arithmetic", |b| {
        b.iter(|| engine.evaluate(black_box(expr), &NO_ARGS))
    });

    group.bench_function("uncached_complex_arithmetic", |b| {
        b.iter(|| evaluate_expression(black_box(expr), &NO_ARGS))
    });

    group.bench_function("preparsed_complex_arithmetic", |b| {
        b.iter(|| black_box(&parsed).evaluate(&NO_ARGS))
    });

    group.bench_function("native_rust_complex_arithmetic", |b| {
        b.iter(|| black_box((10.0 + 20.0) * 3.0 / (4.0 - 1.0) + 5.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark expressions over positional arguments
fn benchmark_parameter_expressions(c: &mut Criterion) {
    init_logger();
    let mut group = c.benchmark_group("Parameter Expression Evaluation");

    let engine = MathEngine::new();
    let args = [5.0, 3.0];

    let meval_fn = "x + y * 2"
        .parse::<meval::Expr>()
        .unwrap()
        .bind2("x", "y")
        .unwrap();

    group.bench_function("cached_braced_parameters", |b| {
        b.iter(|| engine.evaluate(black_box("{0} + {1} * 2"), &args))
    });

    group.bench_function("cached_alias_parameters", |b| {
        b.iter(|| engine.evaluate(black_box("x + y * 2"), &args))
    });

    group.bench_function("meval_bound_parameters", |b| {
        b.iter(|| meval_fn(black_box(5.0), black_box(3.0)))
    });
}

/// Benchmark one expression across many argument rows
fn benchmark_batch_evaluation(c: &mut Criterion) {
    init_logger();
    let mut group = c.benchmark_group("Batch Evaluation");

    let engine = MathEngine::new();
    let mut rng = rand::rng();
    let rows: Vec<Vec<f64>> = (0..10_000)
        .map(|_| {
            vec![
                rng.random_range(0.0..1000.0),
                rng.random_range(1.0..1000.0),
            ]
        })
        .collect();

    group.bench_function("parallel_batch", |b| {
        b.iter(|| engine.evaluate_batch(black_box("(x - y) / y * 100"), &rows))
    });

    group.bench_function("sequential_rows", |b| {
        b.iter(|| {
            rows.iter()
                .map(|row| engine.evaluate(black_box("(x - y) / y * 100"), row))
                .collect::<Vec<_>>()
        })
    });
}

/// Grouping benchmarks
criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_parameter_expressions,
    benchmark_batch_evaluation,
);
criterion_main!(benches);
