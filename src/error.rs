use std::fmt;

use crate::Value;

/// Errors raised by the checked terminal constructors.
///
/// These are the only failures the algebra itself produces. Failures of a
/// caller-supplied fold function are a separate, caller-chosen error type
/// threaded through [`Expr::try_fold`](crate::Expr::try_fold). Neither kind
/// is transient; there is no retry or recovery path.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// A `Number` (or an implicit right-hand coercion to one) received a
    /// non-numeric value.
    NotNumeric {
        /// The offending value.
        got: Value,
    },
    /// A `Symbol` received a non-textual value.
    NotTextual {
        /// The offending value.
        got: Value,
    },
}

impl TypeError {
    /// Create a `NotNumeric` error.
    pub fn not_numeric(got: impl Into<Value>) -> Self {
        TypeError::NotNumeric { got: got.into() }
    }

    /// Create a `NotTextual` error.
    pub fn not_textual(got: impl Into<Value>) -> Self {
        TypeError::NotTextual { got: got.into() }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::NotNumeric { got } => {
                write!(f, "Number value must be an integer or a float, got {got}")
            }
            TypeError::NotTextual { got } => {
                write!(f, "Symbol value must be textual, got {got}")
            }
        }
    }
}

impl std::error::Error for TypeError {}
