//! Expression nodes for symbolic arithmetic.
//!
//! This module defines:
//! - `Expr` - the central expression node type
//! - `ExprKind` - the closed set of node variants (terminals and operators)
//! - `Number` / `Value` - the scalar payloads of terminal nodes
//!
//! # Architecture
//!
//! ## Node identity
//! Each `Expr` carries a unique `id` assigned from a global counter at
//! construction. Cloning a handle preserves the `id`, so a node referenced by
//! several parents is *the same node* for every consumer keyed on identity
//! (most importantly the postorder fold's memoization). Two independently
//! constructed nodes are distinct even when they hold equal values.
//!
//! ## Structural sharing
//! Operands are `Arc<Expr>`. Combining two expressions never copies their
//! subtrees; it allocates one new parent node holding shared handles. The
//! overall structure is expected to be a DAG - cycles cannot be built through
//! the public constructors and are not guarded against.
//!
//! ## Immutability
//! A node's operands and value are fixed for its lifetime. All "mutation" is
//! construction of new parents.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use crate::error::TypeError;
use crate::symbol::get_or_intern;

// =============================================================================
// EXPRESSION ID COUNTER
// =============================================================================

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Placeholder operand used during `Drop` to swap out children without
/// allocating. Id 0 is reserved for it and never handed out by `next_id`.
static DUMMY_OPERAND: LazyLock<Arc<Expr>> = LazyLock::new(|| {
    Arc::new(Expr {
        id: 0,
        kind: ExprKind::Number(Number::Int(0)),
    })
});

// =============================================================================
// SCALAR PAYLOADS
// =============================================================================

/// The numeric payload of a `Number` terminal: an integer or a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal (e.g. `5`)
    Int(i64),
    /// Floating-point literal (e.g. `2.5`, `1e10`)
    Float(f64),
}

impl Number {
    /// The value as an `f64`, widening integers.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(x) => *x,
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(i64::from(n))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

/// A dynamically typed scalar, the input of the checked constructors.
///
/// `Value` carries the distinction the algebra's type errors are defined
/// over: [`Expr::number`] accepts `Int`/`Float` and rejects `Text`;
/// [`Expr::symbol`] accepts `Text` and rejects the numeric variants. The
/// arithmetic combinators coerce a raw `Value` operand through
/// [`Expr::number`] - always, even for `Text`, which therefore fails with
/// [`TypeError::NotNumeric`] rather than quietly becoming a symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// Textual scalar (a symbol name)
    Text(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(x) => Value::Float(x),
        }
    }
}

// =============================================================================
// EXPR - The main expression type
// =============================================================================

/// A symbolic arithmetic expression node.
///
/// Build terminals with [`num`](crate::num) / [`sym`](crate::sym) (or the
/// checked [`Expr::number`] / [`Expr::symbol`]) and combine them with the
/// overloaded `+ - * /` operators and [`Expr::pow`]. Consume the structure
/// with [`Expr::fold`] / [`Expr::try_fold`].
///
/// # Example
/// ```
/// use exprdag::{num, sym};
///
/// let expr = (sym("a") + sym("b")) * num(2);
/// assert_eq!(expr.to_string(), "(a + b) * 2");
/// ```
#[derive(Clone)]
pub struct Expr {
    /// Unique per-construction id; preserved by `Clone`, the key of node
    /// identity.
    pub(crate) id: u64,
    pub(crate) kind: ExprKind,
}

impl std::ops::Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

/// The kind (structure) of an expression node.
///
/// A closed sum type: two terminal variants and the five binary operators.
/// Operator operands are `Arc<Expr>` for structural sharing.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Numeric literal
    Number(Number),

    /// Named symbol; the name is interned, so equal names share storage
    Symbol(Arc<str>),

    /// Addition (precedence 1)
    Add(Arc<Expr>, Arc<Expr>),

    /// Subtraction (precedence 1)
    Sub(Arc<Expr>, Arc<Expr>),

    /// Multiplication (precedence 2)
    Mul(Arc<Expr>, Arc<Expr>),

    /// Division (precedence 2)
    Div(Arc<Expr>, Arc<Expr>),

    /// Exponentiation (precedence 3)
    Pow(Arc<Expr>, Arc<Expr>),
}

impl ExprKind {
    /// Binding strength: higher binds tighter. Terminals sit above every
    /// operator so they are never parenthesized.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            ExprKind::Add(..) | ExprKind::Sub(..) => 1,
            ExprKind::Mul(..) | ExprKind::Div(..) => 2,
            ExprKind::Pow(..) => 3,
            ExprKind::Number(_) | ExprKind::Symbol(_) => 10,
        }
    }

    /// The display token of an operator node, `None` for terminals.
    #[must_use]
    pub fn op_symbol(&self) -> Option<&'static str> {
        match self {
            ExprKind::Add(..) => Some("+"),
            ExprKind::Sub(..) => Some("-"),
            ExprKind::Mul(..) => Some("*"),
            ExprKind::Div(..) => Some("/"),
            ExprKind::Pow(..) => Some("^"),
            ExprKind::Number(_) | ExprKind::Symbol(_) => None,
        }
    }

    /// Whether this node is an operator (as opposed to a terminal).
    #[inline]
    #[must_use]
    pub fn is_operator(&self) -> bool {
        self.binary_operands().is_some()
    }

    /// The two operands of an operator node, in recorded order.
    #[must_use]
    pub fn binary_operands(&self) -> Option<(&Expr, &Expr)> {
        match self {
            ExprKind::Add(l, r)
            | ExprKind::Sub(l, r)
            | ExprKind::Mul(l, r)
            | ExprKind::Div(l, r)
            | ExprKind::Pow(l, r) => Some((l.as_ref(), r.as_ref())),
            ExprKind::Number(_) | ExprKind::Symbol(_) => None,
        }
    }

    /// Iterate the operands in recorded order (empty for terminals).
    pub fn operands(&self) -> impl Iterator<Item = &Expr> {
        self.binary_operands().into_iter().flat_map(|(l, r)| [l, r])
    }
}

impl Expr {
    /// Wrap a kind in a fresh node with a new unique id.
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            id: next_id(),
            kind,
        }
    }

    /// The node's identity. Clones of one handle share it; independently
    /// constructed nodes never do.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The node's structure.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    // Checked constructors

    /// Create a `Number` terminal from a dynamic scalar.
    ///
    /// # Errors
    /// [`TypeError::NotNumeric`] when `value` is textual.
    ///
    /// # Example
    /// ```
    /// use exprdag::{Expr, Value};
    ///
    /// assert!(Expr::number(5).is_ok());
    /// assert!(Expr::number(2.5).is_ok());
    /// assert!(Expr::number(Value::Text("x".into())).is_err());
    /// ```
    pub fn number(value: impl Into<Value>) -> Result<Expr, TypeError> {
        match value.into() {
            Value::Int(i) => Ok(Expr::new(ExprKind::Number(Number::Int(i)))),
            Value::Float(x) => Ok(Expr::new(ExprKind::Number(Number::Float(x)))),
            text @ Value::Text(_) => Err(TypeError::not_numeric(text)),
        }
    }

    /// Create a `Symbol` terminal from a dynamic scalar.
    ///
    /// # Errors
    /// [`TypeError::NotTextual`] when `value` is numeric.
    pub fn symbol(value: impl Into<Value>) -> Result<Expr, TypeError> {
        match value.into() {
            Value::Text(name) => Ok(Expr::new(ExprKind::Symbol(get_or_intern(&name)))),
            numeric => Err(TypeError::not_textual(numeric)),
        }
    }

    // Infallible internal constructors (the public statically typed paths
    // `num`/`sym` and the `From` impls route through these)

    pub(crate) fn from_number(n: Number) -> Expr {
        Expr::new(ExprKind::Number(n))
    }

    pub(crate) fn from_name(name: &str) -> Expr {
        Expr::new(ExprKind::Symbol(get_or_intern(name)))
    }

    // Operator constructors. Each allocates exactly one new parent node with
    // operands (left, right) in that order; neither operand is touched.

    /// Create an addition node.
    #[must_use]
    pub fn add_expr(left: Expr, right: Expr) -> Expr {
        Expr::new(ExprKind::Add(Arc::new(left), Arc::new(right)))
    }

    /// Create a subtraction node.
    #[must_use]
    pub fn sub_expr(left: Expr, right: Expr) -> Expr {
        Expr::new(ExprKind::Sub(Arc::new(left), Arc::new(right)))
    }

    /// Create a multiplication node.
    #[must_use]
    pub fn mul_expr(left: Expr, right: Expr) -> Expr {
        Expr::new(ExprKind::Mul(Arc::new(left), Arc::new(right)))
    }

    /// Create a division node.
    #[must_use]
    pub fn div_expr(left: Expr, right: Expr) -> Expr {
        Expr::new(ExprKind::Div(Arc::new(left), Arc::new(right)))
    }

    /// Create an exponentiation node.
    #[must_use]
    pub fn pow_expr(base: Expr, exponent: Expr) -> Expr {
        Expr::new(ExprKind::Pow(Arc::new(base), Arc::new(exponent)))
    }

    /// Raise to a power (Rust's `^` is XOR, so exponentiation is a method).
    ///
    /// # Example
    /// ```
    /// use exprdag::sym;
    ///
    /// let expr = sym("x").pow(2);
    /// assert_eq!(expr.to_string(), "x ^ 2");
    /// ```
    #[must_use]
    pub fn pow(&self, exponent: impl Into<Expr>) -> Expr {
        Expr::pow_expr(self.clone(), exponent.into())
    }

    /// Raise to a power given as a dynamic scalar, coercing it through
    /// [`Expr::number`].
    ///
    /// # Errors
    /// [`TypeError::NotNumeric`] when `exponent` is textual.
    pub fn try_pow(&self, exponent: impl Into<Value>) -> Result<Expr, TypeError> {
        Ok(Expr::pow_expr(self.clone(), Expr::number(exponent)?))
    }

    // Accessors

    /// The numeric value if this is a `Number` terminal.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match &self.kind {
            ExprKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The name if this is a `Symbol` terminal.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    // Analysis

    /// Total node occurrences, counting a shared node once per reference.
    ///
    /// Runs on the fold, so it is linear in *distinct* nodes even for heavily
    /// shared DAGs and safe on arbitrarily deep chains.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.fold(|_, operands: &[&usize]| 1 + operands.iter().map(|c| **c).sum::<usize>())
    }

    /// Maximum nesting depth (a terminal has depth 1).
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.fold(|_, operands: &[&usize]| {
            1 + operands.iter().map(|c| **c).max().unwrap_or(0)
        })
    }

    /// Whether the expression mentions the symbol `name`.
    #[must_use]
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.fold(|node, operands: &[&bool]| match &node.kind {
            ExprKind::Symbol(s) => s.as_ref() == name,
            _ => operands.iter().any(|c| **c),
        })
    }

    /// Collect the names of all symbols reachable from this node.
    #[must_use]
    pub fn variables(&self) -> std::collections::HashSet<String> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut names = std::collections::HashSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id) {
                continue;
            }
            match &node.kind {
                ExprKind::Symbol(s) => {
                    names.insert(s.to_string());
                }
                _ => stack.extend(node.operands()),
            }
        }
        names
    }
}

impl From<Number> for Expr {
    fn from(n: Number) -> Self {
        Expr::from_number(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::from_number(Number::from(n))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::from_number(Number::from(n))
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::from_number(Number::from(n))
    }
}

// =============================================================================
// DROP IMPLEMENTATION - Iterative drop to prevent stack overflow
// =============================================================================

impl Drop for Expr {
    fn drop(&mut self) {
        fn drain_operands(kind: &mut ExprKind, queue: &mut Vec<Arc<Expr>>) {
            match kind {
                ExprKind::Add(l, r)
                | ExprKind::Sub(l, r)
                | ExprKind::Mul(l, r)
                | ExprKind::Div(l, r)
                | ExprKind::Pow(l, r) => {
                    let dummy = Arc::clone(&DUMMY_OPERAND);
                    queue.push(std::mem::replace(l, Arc::clone(&dummy)));
                    queue.push(std::mem::replace(r, dummy));
                }
                ExprKind::Number(_) | ExprKind::Symbol(_) => {}
            }
        }

        let mut queue = Vec::new();
        drain_operands(&mut self.kind, &mut queue);

        while let Some(operand) = queue.pop() {
            if let Ok(mut inner) = Arc::try_unwrap(operand) {
                drain_operands(&mut inner.kind, &mut queue);
            }
        }
    }
}
