//! Generic postorder fold over expression DAGs.
//!
//! This is the single traversal primitive every consumer (printers, numeric
//! evaluators, differentiators) is built on: supply a combining function and
//! receive its result at the root, with every operand's result computed
//! first.
//!
//! Three guarantees drive the implementation:
//!
//! - **No native recursion.** The traversal runs on an explicit heap stack of
//!   `(node, expanded)` markers, so depth is bounded by available memory, not
//!   by the call stack. Expression depth is caller-controlled and can be
//!   arbitrary.
//! - **Identity-keyed memoization.** Results are cached in a map keyed by
//!   node id. A node reachable through several parents is combined once and
//!   every parent observes the identical cached result; a naive tree fold
//!   would recompute it per occurrence, exponentially for deeply shared DAGs.
//!   Two structurally equal but distinct nodes are evaluated independently.
//! - **Exactly-once combination.** The stack may briefly hold duplicate
//!   markers for a node shared by several not-yet-expanded parents, but every
//!   pop re-checks the result map and skips nodes already combined.
//!
//! On the duplicate markers: suppressing them with a "scheduled" set instead
//! would be unsound. With operands `(shared, c)` where `c` reaches `shared`
//! again through a longer path, the inner parent would skip pushing the
//! pending `shared`, whose only marker then sits *below* the inner parent in
//! the stack - and the parent would be combined before its operand resolves.
//! Each parent therefore pushes its own markers for unresolved operands, and
//! the result-map check at pop time collapses the duplicates.

use std::convert::Infallible;

use rustc_hash::FxHashMap;

use crate::expr::Expr;

impl Expr {
    /// Fold the DAG bottom-up with a fallible combining function.
    ///
    /// `f` is called once per distinct reachable node, after all of the
    /// node's operands have been combined, receiving the operand results in
    /// recorded operand order. The root is combined last and its result
    /// returned. Extra evaluation inputs (variable bindings, settings) are
    /// closure captures.
    ///
    /// The result cache lives only for this call; folding the same
    /// expression again recomputes every node.
    ///
    /// # Errors
    /// The first error returned by `f` aborts the traversal immediately and
    /// is propagated unchanged; no partial results are kept.
    ///
    /// # Example
    /// ```
    /// use exprdag::{ExprKind, num, sym};
    ///
    /// let expr = sym("x") / num(0);
    /// let result: Result<f64, String> = expr.try_fold(|node, operands| {
    ///     match node.kind() {
    ///         ExprKind::Div(..) if *operands[1] == 0.0 => {
    ///             Err("division by zero".to_string())
    ///         }
    ///         ExprKind::Symbol(_) => Ok(1.0),
    ///         ExprKind::Number(n) => Ok(n.as_f64()),
    ///         _ => Ok(0.0),
    ///     }
    /// });
    /// assert_eq!(result, Err("division by zero".to_string()));
    /// ```
    pub fn try_fold<R, E, F>(&self, mut f: F) -> Result<R, E>
    where
        F: FnMut(&Expr, &[&R]) -> Result<R, E>,
    {
        let mut stack: Vec<(&Expr, bool)> = vec![(self, false)];
        let mut resolved: FxHashMap<u64, R> = FxHashMap::default();

        while let Some((node, expanded)) = stack.pop() {
            // A shared node can be on the stack more than once; the first
            // marker to complete wins and the rest are skipped here.
            if resolved.contains_key(&node.id()) {
                continue;
            }

            if expanded {
                // Second pop: every operand is resolved by now, because the
                // first pop pushed markers for all unresolved operands above
                // this one.
                let result = {
                    let mut operand_results: Vec<&R> = Vec::with_capacity(2);
                    for operand in node.operands() {
                        match resolved.get(&operand.id()) {
                            Some(r) => operand_results.push(r),
                            None => unreachable!("operand combined before its parent"),
                        }
                    }
                    f(node, &operand_results)?
                };
                resolved.insert(node.id(), result);
            } else {
                stack.push((node, true));
                for operand in node.operands() {
                    if !resolved.contains_key(&operand.id()) {
                        stack.push((operand, false));
                    }
                }
            }
        }

        match resolved.remove(&self.id()) {
            Some(result) => Ok(result),
            None => unreachable!("root combined when the stack empties"),
        }
    }

    /// Fold the DAG bottom-up with an infallible combining function.
    ///
    /// Same traversal and sharing guarantees as [`Expr::try_fold`].
    ///
    /// # Example
    /// ```
    /// use exprdag::{ExprKind, num, sym};
    ///
    /// // A tiny numeric evaluator where every symbol is 3.
    /// let expr = (sym("x") + num(1)) * num(2);
    /// let value = expr.fold(|node, operands: &[&f64]| match node.kind() {
    ///     ExprKind::Number(n) => n.as_f64(),
    ///     ExprKind::Symbol(_) => 3.0,
    ///     ExprKind::Add(..) => operands[0] + operands[1],
    ///     ExprKind::Sub(..) => operands[0] - operands[1],
    ///     ExprKind::Mul(..) => operands[0] * operands[1],
    ///     ExprKind::Div(..) => operands[0] / operands[1],
    ///     ExprKind::Pow(..) => operands[0].powf(*operands[1]),
    /// });
    /// assert_eq!(value, 8.0);
    /// ```
    pub fn fold<R, F>(&self, mut f: F) -> R
    where
        F: FnMut(&Expr, &[&R]) -> R,
    {
        let folded: Result<R, Infallible> = self.try_fold(|node, operands| Ok(f(node, operands)));
        match folded {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}
