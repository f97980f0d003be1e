//! Operator overloading for ergonomic expression building.
//!
//! The arithmetic operators are the algebra's binary combinators: each
//! application allocates a fresh operator node with operands `(lhs, rhs)` in
//! that order and never mutates either input. A right-hand operand that is
//! not already an `Expr` is coerced by wrapping it in a `Number` terminal.
//! Statically numeric right-hand types (`i64`, `f64`, [`Number`])
//! therefore combine infallibly, while a dynamic [`Value`] right-hand side
//! yields a `Result`: a textual value fails with
//! [`TypeError::NotNumeric`], because the coercion always targets `Number`
//! and never infers a symbol.
//!
//! # Example
//! ```
//! use exprdag::{num, sym, Value};
//!
//! let expr = sym("x") * 2 + 1;
//! assert_eq!(expr.to_string(), "x * 2 + 1");
//!
//! // Dynamic right-hand values go through the checked coercion.
//! assert!((sym("x") + Value::Int(1)).is_ok());
//! assert!((sym("x") + Value::Text("y".into())).is_err());
//! ```

use std::ops::{Add, Div, Mul, Sub};

use crate::error::TypeError;
use crate::expr::{Expr, Number, Value};

// Infallible combinators: RHS types that are statically convertible to an
// expression. Borrowed LHS/RHS variants clone the handle, which preserves
// node identity (same id), so `&x + &x` builds a genuinely shared operand.
macro_rules! impl_binary_ops {
    ($rhs:ty, $to_rhs:expr) => {
        impl Add<$rhs> for Expr {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::add_expr(self, $to_rhs(rhs))
            }
        }
        impl Sub<$rhs> for Expr {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                Expr::sub_expr(self, $to_rhs(rhs))
            }
        }
        impl Mul<$rhs> for Expr {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::mul_expr(self, $to_rhs(rhs))
            }
        }
        impl Div<$rhs> for Expr {
            type Output = Expr;
            fn div(self, rhs: $rhs) -> Expr {
                Expr::div_expr(self, $to_rhs(rhs))
            }
        }

        impl Add<$rhs> for &Expr {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::add_expr(self.clone(), $to_rhs(rhs))
            }
        }
        impl Sub<$rhs> for &Expr {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                Expr::sub_expr(self.clone(), $to_rhs(rhs))
            }
        }
        impl Mul<$rhs> for &Expr {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::mul_expr(self.clone(), $to_rhs(rhs))
            }
        }
        impl Div<$rhs> for &Expr {
            type Output = Expr;
            fn div(self, rhs: $rhs) -> Expr {
                Expr::div_expr(self.clone(), $to_rhs(rhs))
            }
        }
    };
}

impl_binary_ops!(Expr, |r: Expr| r);
impl_binary_ops!(&Expr, |r: &Expr| r.clone());
impl_binary_ops!(Number, Expr::from);
// Exactly one integer RHS impl: a second one (say i32) would leave integer
// literals with no unique type to infer when the result type is
// unconstrained.
impl_binary_ops!(i64, Expr::from);
impl_binary_ops!(f64, Expr::from);

// Checked combinators: a dynamic `Value` right-hand side is coerced through
// `Expr::number`, surfacing its type error.
macro_rules! impl_value_ops {
    ($op_trait:ident, $method:ident, $ctor:path) => {
        impl $op_trait<Value> for Expr {
            type Output = Result<Expr, TypeError>;
            fn $method(self, rhs: Value) -> Self::Output {
                Ok($ctor(self, Expr::number(rhs)?))
            }
        }
        impl $op_trait<Value> for &Expr {
            type Output = Result<Expr, TypeError>;
            fn $method(self, rhs: Value) -> Self::Output {
                Ok($ctor(self.clone(), Expr::number(rhs)?))
            }
        }
    };
}

impl_value_ops!(Add, add, Expr::add_expr);
impl_value_ops!(Sub, sub, Expr::sub_expr);
impl_value_ops!(Mul, mul, Expr::mul_expr);
impl_value_ops!(Div, div, Expr::div_expr);
