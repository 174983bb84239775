//! Errors that can occur while evaluating an expression numerically.
//!
//! Evaluation works on the symbolic tree, which no longer carries source spans, so these errors
//! are always created with no spans.

use ariadne::Fmt;
use reshi_attrs::ErrorKind;
use reshi_error::EXPR;

/// An expression was divided by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "division by zero")]
pub struct DivisionByZero;

/// A function was applied to a value outside of its domain, such as `log(-1)` or `asin(2)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined for this value", function),
    help = "only real numbers are supported",
)]
pub struct Domain {
    /// The name of the function or operation.
    pub function: &'static str,
}

/// The expression still contains the free variable, so it has no single value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value here", name),
    help = format!("write an equation with {} to solve for it", "=".fg(EXPR)),
)]
pub struct FreeVariable {
    /// The name of the variable.
    pub name: String,
}

/// The result of the evaluation is too large to represent, or is not a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "the result is too large or undefined")]
pub struct NonFinite;
