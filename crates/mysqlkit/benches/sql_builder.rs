use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mysqlkit::qb::{self, SelectSpec};
use mysqlkit::{Conditions, Values};

/// SELECT with `n` equality terms and `n / 2` LIKE terms, plus ordering and a page.
fn build_select_spec(n: usize) -> SelectSpec {
    let mut conditions = Conditions::new();
    for i in 0..n {
        conditions = conditions.eq(format!("col{i}"), i as i64);
    }
    for i in 0..n / 2 {
        conditions = conditions.like(format!("name{i}"), format!("needle'{i}\\"));
    }
    SelectSpec::new("t")
        .conditions(conditions)
        .order_by_desc("id")
        .page(0, 50)
}

fn build_payload(n: usize) -> Values {
    (0..n)
        .map(|i| (format!("col{i}"), format!("value {i} with 'quotes'")))
        .collect()
}

fn bench_render_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/render_select");

    for n in [1, 5, 10, 50, 100] {
        let spec = build_select_spec(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &spec, |b, spec| {
            b.iter(|| black_box(qb::render_select(spec)));
        });
    }

    group.finish();
}

fn bench_render_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/render_insert");

    for n in [1, 5, 10, 50, 100] {
        let payload = build_payload(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &payload, |b, payload| {
            b.iter(|| black_box(qb::render_insert("t", payload, false)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let spec = build_select_spec(n);
                black_box(spec.to_sql())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_select,
    bench_render_insert,
    bench_build_and_render
);
criterion_main!(benches);
