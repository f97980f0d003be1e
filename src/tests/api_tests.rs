//! End-to-end tests of the public API: checked construction, rendering, and
//! representative fold clients (numeric evaluation, differentiation).

use rustc_hash::FxHashMap;

use crate::{Expr, ExprKind, Number, TypeError, Value, num, sym};

fn eval(expr: &Expr, bindings: &FxHashMap<&str, f64>) -> f64 {
    expr.fold(|node, operands: &[&f64]| match node.kind() {
        ExprKind::Number(n) => n.as_f64(),
        ExprKind::Symbol(s) => bindings.get(s.as_ref()).copied().unwrap_or(f64::NAN),
        ExprKind::Add(..) => operands[0] + operands[1],
        ExprKind::Sub(..) => operands[0] - operands[1],
        ExprKind::Mul(..) => operands[0] * operands[1],
        ExprKind::Div(..) => operands[0] / operands[1],
        ExprKind::Pow(..) => operands[0].powf(*operands[1]),
    })
}

#[test]
fn checked_construction_round_trip() {
    let five = match Expr::number(Value::Int(5)) {
        Ok(e) => e,
        Err(e) => panic!("5 is numeric: {e}"),
    };
    assert_eq!(five.to_string(), "5");
    assert_eq!(five.as_number(), Some(Number::Int(5)));

    let x = match Expr::symbol("x") {
        Ok(e) => e,
        Err(e) => panic!("\"x\" is textual: {e}"),
    };
    assert_eq!(x.to_string(), "x");

    assert!(matches!(
        Expr::number("not a number"),
        Err(TypeError::NotNumeric { .. })
    ));
    assert!(matches!(
        Expr::symbol(Value::Float(1.0)),
        Err(TypeError::NotTextual { .. })
    ));
}

#[test]
fn spec_precedence_renderings() {
    let expr = sym("a") + sym("b") * sym("c");
    assert_eq!(expr.to_string(), "a + b * c");

    let expr = sym("a") * (sym("b") + sym("c"));
    assert_eq!(expr.to_string(), "a * (b + c)");
}

#[test]
fn shared_subexpression_counts_once_and_sums_twice() {
    let shared = num(5);
    let root = &shared + &shared;

    let mut invocations: FxHashMap<u64, usize> = FxHashMap::default();
    let total = root.fold(|node, operands: &[&f64]| {
        *invocations.entry(node.id()).or_insert(0) += 1;
        match node.kind() {
            ExprKind::Number(n) => n.as_f64(),
            _ => operands.iter().map(|r| **r).sum(),
        }
    });

    assert_eq!(total, 10.0);
    assert_eq!(invocations.get(&shared.id()), Some(&1));
    assert_eq!(invocations.len(), 2);
}

#[test]
fn identity_fold_on_bare_number() {
    let seven = num(7);
    let value = seven.fold(|node, _operands: &[&f64]| match node.kind() {
        ExprKind::Number(n) => n.as_f64(),
        _ => f64::NAN,
    });
    assert_eq!(value, 7.0);
}

#[test]
fn numeric_evaluation_with_bindings() {
    // (x + 1) * (x - 1) at x = 6 -> 35
    let x = sym("x");
    let expr = (&x + 1) * (&x - 1);

    let mut bindings = FxHashMap::default();
    bindings.insert("x", 6.0);
    assert_eq!(eval(&expr, &bindings), 35.0);
}

#[test]
fn subtraction_is_left_minus_right() {
    let a = sym("a");
    let b = sym("b");
    let expr = &a - &b;

    let mut bindings = FxHashMap::default();
    bindings.insert("a", 9.0);
    bindings.insert("b", 4.0);
    assert_eq!(eval(&expr, &bindings), 5.0);
}

/// A differentiator is just another fold client: combine each node's
/// derivative from its operands' derivatives, reading the operands
/// themselves off the node.
fn derivative(expr: &Expr, var: &str) -> Expr {
    expr.fold(|node, operand_derivs: &[&Expr]| match node.kind() {
        ExprKind::Number(_) => num(0),
        ExprKind::Symbol(s) => num(i64::from(s.as_ref() == var)),
        ExprKind::Add(..) => operand_derivs[0] + operand_derivs[1],
        ExprKind::Sub(..) => operand_derivs[0] - operand_derivs[1],
        ExprKind::Mul(l, r) => {
            operand_derivs[0] * r.as_ref() + l.as_ref() * operand_derivs[1]
        }
        // Quotient and power rules are omitted; the tests below stay within
        // sums and products.
        _ => num(0),
    })
}

#[test]
fn derivative_client_composes_with_numeric_evaluation() {
    // d/dx (x*x + 3*x) = 2x + 3, which is 7 at x = 2
    let x = sym("x");
    let expr = &x * &x + num(3) * &x;
    let dexpr = derivative(&expr, "x");

    let mut bindings = FxHashMap::default();
    bindings.insert("x", 2.0);
    assert_eq!(eval(&dexpr, &bindings), 7.0);

    // The derivative of a shared subexpression is computed once but
    // contributes per reference.
    let shared = &x * &x;
    let twice = &shared + &shared;
    let dtwice = derivative(&twice, "x");
    assert_eq!(eval(&dtwice, &bindings), 8.0);
}

#[test]
fn deep_right_leaning_chain_evaluates_without_overflow() {
    let mut expr = num(1);
    for _ in 1..100_000 {
        expr = num(1) + expr;
    }
    assert_eq!(eval(&expr, &FxHashMap::default()), 100_000.0);
}

#[test]
fn client_failure_propagates_from_try_fold() {
    #[derive(Debug, PartialEq)]
    struct UnboundSymbol(String);

    let expr = sym("a") + sym("mystery");
    let bindings: FxHashMap<&str, f64> = [("a", 1.0)].into_iter().collect();

    let result: Result<f64, UnboundSymbol> = expr.try_fold(|node, operands| {
        match node.kind() {
            ExprKind::Number(n) => Ok(n.as_f64()),
            ExprKind::Symbol(s) => bindings
                .get(s.as_ref())
                .copied()
                .ok_or_else(|| UnboundSymbol(s.to_string())),
            ExprKind::Add(..) => Ok(operands[0] + operands[1]),
            _ => Ok(f64::NAN),
        }
    });

    assert_eq!(result, Err(UnboundSymbol("mystery".to_string())));
}

#[test]
fn debug_form_asserts_exact_tree_shape() {
    let expr = (sym("a") + num(2)) * sym("b");
    assert_eq!(format!("{expr:?}"), "Mul(Add(\"a\", 2), \"b\")");
}
