//! Textual renderings for expressions.
//!
//! `Display` produces the human-readable arithmetic form with
//! precedence-driven parenthesization; `Debug` produces the structural form
//! (variant names with literal payloads) used by tests asserting exact tree
//! shape. Both run on the postorder fold, so rendering an arbitrarily deep
//! chain cannot overflow the call stack, and a shared subexpression is
//! rendered once and its text reused.

use std::fmt;

use crate::expr::{Expr, ExprKind, Number};

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => {
                if x.is_nan() {
                    write!(f, "NaN")
                } else if x.is_infinite() {
                    if *x > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if x.fract() == 0.0 && x.abs() < 1e10 {
                    // Integral floats render without the fractional part
                    write!(f, "{}", *x as i64)
                } else {
                    write!(f, "{x}")
                }
            }
        }
    }
}

/// Parenthesize a rendered operand iff it is an operator node binding
/// strictly looser than its parent. Equal precedence is never parenthesized;
/// `a - b - c` renders without parentheses regardless of actual grouping,
/// a documented as-is policy rather than a round-trip guarantee.
fn parenthesized(operand: &Expr, rendered: &str, parent_precedence: u8) -> String {
    if operand.is_operator() && operand.precedence() < parent_precedence {
        format!("({rendered})")
    } else {
        rendered.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.fold(|node, operands: &[&String]| match node.kind() {
            ExprKind::Number(n) => n.to_string(),
            ExprKind::Symbol(s) => s.to_string(),
            ExprKind::Add(l, r)
            | ExprKind::Sub(l, r)
            | ExprKind::Mul(l, r)
            | ExprKind::Div(l, r)
            | ExprKind::Pow(l, r) => {
                let precedence = node.precedence();
                // op_symbol is Some for every operator variant
                let token = node.op_symbol().unwrap_or("?");
                format!(
                    "{} {} {}",
                    parenthesized(l, operands[0], precedence),
                    token,
                    parenthesized(r, operands[1], precedence),
                )
            }
        });
        f.write_str(&rendered)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.fold(|node, operands: &[&String]| match node.kind() {
            ExprKind::Number(Number::Int(i)) => i.to_string(),
            ExprKind::Number(Number::Float(x)) => format!("{x:?}"),
            ExprKind::Symbol(s) => format!("{:?}", s.as_ref()),
            ExprKind::Add(..) => format!("Add({}, {})", operands[0], operands[1]),
            ExprKind::Sub(..) => format!("Sub({}, {})", operands[0], operands[1]),
            ExprKind::Mul(..) => format!("Mul({}, {})", operands[0], operands[1]),
            ExprKind::Div(..) => format!("Div({}, {})", operands[0], operands[1]),
            ExprKind::Pow(..) => format!("Pow({}, {})", operands[0], operands[1]),
        });
        f.write_str(&rendered)
    }
}
