//! Symbolic expression DAGs with a generic postorder fold
//!
//! A small representation-and-traversal substrate for symbolic-math tools:
//! build immutable arithmetic expression trees (more precisely DAGs - the
//! same subexpression node may be shared by several parents), then fold any
//! client-supplied combining function bottom-up over the structure to get
//! printing, numeric evaluation, differentiation, or any other derived
//! computation.
//!
//! # Features
//! - Natural construction syntax via operator overloading (`+ - * /` and
//!   [`Expr::pow`]) with implicit numeric coercion of right-hand scalars
//! - Checked, dynamically typed constructors ([`Expr::number`] /
//!   [`Expr::symbol`]) surfacing construction type errors
//! - Precedence-aware `Display` and a structural `Debug` form
//! - A single traversal primitive ([`Expr::fold`] / [`Expr::try_fold`]):
//!   explicit-stack postorder, no native recursion, each distinct shared
//!   node combined exactly once per call
//!
//! # Usage
//! ```
//! use exprdag::{ExprKind, num, sym};
//!
//! // (price + 1) * quantity, with `price` shared by both factors
//! let price = sym("price");
//! let expr = (&price + 1) * &price;
//! assert_eq!(expr.to_string(), "(price + 1) * price");
//!
//! // A numeric evaluator is just a fold
//! let value = expr.fold(|node, operands: &[&f64]| match node.kind() {
//!     ExprKind::Number(n) => n.as_f64(),
//!     ExprKind::Symbol(_) => 10.0,
//!     ExprKind::Add(..) => operands[0] + operands[1],
//!     ExprKind::Sub(..) => operands[0] - operands[1],
//!     ExprKind::Mul(..) => operands[0] * operands[1],
//!     ExprKind::Div(..) => operands[0] / operands[1],
//!     ExprKind::Pow(..) => operands[0].powf(*operands[1]),
//! });
//! assert_eq!(value, 110.0);
//! ```
//!
//! Parsing, simplification rules, and concrete evaluators are deliberately
//! not part of this crate; they are clients of the four surfaces above.

mod display;
mod error;
mod expr;
mod fold;
mod ops;
mod symbol;

#[cfg(test)]
mod tests;

pub use error::TypeError;
pub use expr::{Expr, ExprKind, Number, Value};

/// Create a `Number` terminal from a statically numeric value.
///
/// # Example
/// ```
/// use exprdag::num;
///
/// assert_eq!(num(5).to_string(), "5");
/// assert_eq!(num(2.5).to_string(), "2.5");
/// ```
pub fn num(n: impl Into<Number>) -> Expr {
    Expr::from_number(n.into())
}

/// Create a `Symbol` terminal with the given name.
///
/// Names are interned: repeated calls share one allocation while still
/// producing distinct nodes.
///
/// # Example
/// ```
/// use exprdag::sym;
///
/// let x = sym("x");
/// assert_eq!(x.to_string(), "x");
/// ```
pub fn sym(name: impl AsRef<str>) -> Expr {
    Expr::from_name(name.as_ref())
}
