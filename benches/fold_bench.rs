use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use exprdag::{Expr, ExprKind, num, sym};

fn deep_chain(len: usize) -> Expr {
    let mut expr = num(1);
    for _ in 1..len {
        expr = num(1) + expr;
    }
    expr
}

fn shared_ladder(levels: usize) -> Expr {
    // Each level references the previous one twice: a worst case for naive
    // tree folds, linear for the memoized fold.
    let mut expr = sym("x") + num(1);
    for _ in 0..levels {
        expr = &expr * &expr;
    }
    expr
}

fn eval(expr: &Expr) -> f64 {
    expr.fold(|node, operands: &[&f64]| match node.kind() {
        ExprKind::Number(n) => n.as_f64(),
        ExprKind::Symbol(_) => 2.0,
        ExprKind::Add(..) => operands[0] + operands[1],
        ExprKind::Sub(..) => operands[0] - operands[1],
        ExprKind::Mul(..) => operands[0] * operands[1],
        ExprKind::Div(..) => operands[0] / operands[1],
        ExprKind::Pow(..) => operands[0].powf(*operands[1]),
    })
}

fn bench_numeric_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_fold");

    let chain = deep_chain(10_000);
    group.bench_function("deep_chain_10k", |b| b.iter(|| eval(black_box(&chain))));

    let ladder = shared_ladder(40);
    group.bench_function("shared_ladder_40", |b| b.iter(|| eval(black_box(&ladder))));

    group.finish();
}

fn bench_construction_and_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");

    group.bench_function("build_poly_chain_1k", |b| {
        b.iter(|| {
            let x = sym("x");
            let mut expr = num(0);
            for i in 0..1_000i64 {
                expr = expr + &x * num(i);
            }
            black_box(expr)
        })
    });

    let expr = deep_chain(1_000);
    group.bench_function("display_chain_1k", |b| {
        b.iter(|| black_box(&expr).to_string())
    });

    group.finish();
}

criterion_group!(benches, bench_numeric_fold, bench_construction_and_display);
criterion_main!(benches);
