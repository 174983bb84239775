use ariadne::Fmt;
use reshi_attrs::ErrorKind;
use reshi_error::EXPR;

/// The equation could not be solved for the variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve this equation for `{}`", variable),
    help = format!(
        "polynomials up to degree 2, polynomials with rational roots, and equations where {} appears once are supported",
        variable.fg(EXPR),
    ),
)]
pub struct CannotSolve {
    /// The variable being solved for.
    pub variable: String,
}
