//! Numerical evaluation of symbolic expressions.
//!
//! [`eval`] computes the value of a [`SymExpr`] as an arbitrary-precision [`Float`] with
//! [`PRECISION`] bits. Only real results are produced: anything that would need a complex number,
//! such as `sqrt(-1)` or `log(-1)`, is an error.
//!
//! ```
//! use reshi_compute::{numerical::eval, symbolic::SymExpr};
//!
//! let half = SymExpr::number((1, 2));
//! assert_eq!(eval(&half, None).unwrap(), 0.5);
//! ```

pub mod error;

use crate::consts::{E, ONE, PI, ZERO};
use crate::primitive::{float, PRECISION};
use crate::symbolic::expr::{Primary, SymExpr};
use error::{DivisionByZero, Domain, FreeVariable, NonFinite};
use reshi_error::Error;
use reshi_parser::symbols::{Const, Func};
use rug::{ops::Pow, Float};

/// Creates an error with no spans.
fn fail(kind: impl reshi_error::ErrorKind + 'static) -> Error {
    Error::new(Vec::new(), kind)
}

/// Checks that the value is finite.
fn finite(value: Float) -> Result<Float, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(fail(NonFinite))
    }
}

/// Evaluates a call to one of the built-in functions.
fn eval_call(func: Func, args: &[SymExpr], value: Option<&Float>) -> Result<Float, Error> {
    let mut values = args.iter()
        .map(|arg| eval(arg, value))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let arg = values.next().unwrap_or_else(|| ZERO.clone());

    let result = match func {
        Func::Sin => arg.sin(),
        Func::Cos => arg.cos(),
        Func::Tan => {
            if arg.clone().cos().is_zero() {
                return Err(fail(Domain { function: "tan" }));
            }
            arg.tan()
        },
        Func::Asin | Func::Acos if arg < -1 || arg > 1 => {
            return Err(fail(Domain { function: func.name() }));
        },
        Func::Asin => arg.asin(),
        Func::Acos => arg.acos(),
        Func::Atan => arg.atan(),
        Func::Log => {
            if arg <= 0 {
                return Err(fail(Domain { function: "log" }));
            }
            arg.ln()
        },
        Func::Sqrt => {
            if arg < 0 {
                return Err(fail(Domain { function: "sqrt" }));
            }
            arg.sqrt()
        },
        Func::Abs => arg.abs(),
    };

    finite(result)
}

/// Evaluates `base^exp`, taking the real root of negative numbers where one exists.
fn eval_power(base: &SymExpr, exp: &SymExpr, value: Option<&Float>) -> Result<Float, Error> {
    let base_value = eval(base, value)?;

    // an odd root of a negative number is real, which the float power function does not know
    if let Some(exp) = exp.as_number() {
        if base_value.is_zero() && *exp < 0 {
            return Err(fail(DivisionByZero));
        }

        if base_value < 0 && *exp.denom() != 1 {
            if exp.denom().is_even() {
                return Err(fail(Domain { function: "sqrt" }));
            }

            let magnitude = Float::with_val(PRECISION, (-base_value).pow(&float(exp)));
            let signed = if exp.numer().is_odd() { -magnitude } else { magnitude };
            return finite(signed);
        }
    }

    let exp_value = eval(exp, value)?;
    if base_value.is_zero() && exp_value < 0 {
        return Err(fail(DivisionByZero));
    }
    if base_value < 0 && !exp_value.is_integer() {
        return Err(fail(Domain { function: "pow" }));
    }

    finite(Float::with_val(PRECISION, base_value.pow(&exp_value)))
}

/// Evaluates the expression numerically, substituting the given value for the free variable.
///
/// Returns an error if the expression contains the free variable and no value is given, or if
/// the value is not a finite real number.
pub fn eval(expr: &SymExpr, value: Option<&Float>) -> Result<Float, Error> {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => Ok(float(n)),
        SymExpr::Primary(Primary::Constant(Const::Pi)) => Ok(PI.clone()),
        SymExpr::Primary(Primary::Constant(Const::E)) => Ok(E.clone()),
        SymExpr::Primary(Primary::Symbol(name)) => value
            .cloned()
            .ok_or_else(|| fail(FreeVariable { name: name.clone() })),
        SymExpr::Primary(Primary::Call(func, args)) => eval_call(*func, args, value),
        SymExpr::Add(terms) => {
            let mut sum = ZERO.clone();
            for term in terms {
                sum += eval(term, value)?;
            }
            finite(sum)
        },
        SymExpr::Mul(factors) => {
            let mut product = ONE.clone();
            for factor in factors {
                product *= eval(factor, value)?;
            }
            finite(product)
        },
        SymExpr::Exp(base, exp) => eval_power(base, exp, value),
    }
}

/// Evaluates the expression and rounds the result to the nearest [`f64`].
pub fn eval_f64(expr: &SymExpr, value: Option<f64>) -> Result<f64, Error> {
    let value = value.map(float);
    eval(expr, value.as_ref()).map(|result| result.to_f64())
}
