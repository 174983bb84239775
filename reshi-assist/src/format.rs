//! Rendering of results as short decimal strings.
//!
//! Numbers are shown the way a calculator would show them: integers without a decimal point, and
//! everything else with at most 12 significant digits and no trailing zeros. Values that are not
//! a single number (because they still contain the variable, or cannot be evaluated to a real
//! number) are shown in symbolic form instead.

use once_cell::sync::Lazy;
use regex::Regex;
use reshi_compute::{numerical::eval, symbolic::SymExpr};
use rug::Integer;

/// A value within this distance of an integer is shown as that integer.
const INTEGER_TOLERANCE: f64 = 1e-12;

/// The number of significant digits shown.
const SIGNIFICANT_DIGITS: i32 = 12;

/// The number of significant digits a value is evaluated to before it is shown.
const EVAL_DIGITS: usize = 15;

/// A plain decimal number, such as `-1.500`.
static PLAIN_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+\.\d+$").expect("valid decimal pattern")
});

/// How a value was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// The value is a single real number, shown in decimal.
    Numeric(String),

    /// The value could not be reduced to a single real number, and is shown as an expression.
    Symbolic(String),
}

impl Rendering {
    /// Returns the rendered text, whichever way it was rendered.
    pub fn into_string(self) -> String {
        match self {
            Self::Numeric(s) | Self::Symbolic(s) => s,
        }
    }
}

/// Removes trailing zeros after the decimal point, and then the point itself if nothing is left
/// after it. Only applies to plain decimals like `2.500`.
fn strip_trailing_zeros(s: String) -> String {
    if PLAIN_DECIMAL.is_match(&s) {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Formats the number with [`SIGNIFICANT_DIGITS`] significant digits, choosing between fixed and
/// scientific notation by the size of the number, and dropping trailing zeros.
fn general_format(f: f64) -> String {
    // the exponent after rounding to the significant digits decides the notation
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, f);
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let exp = exp.parse::<i32>().unwrap_or(0);

    if (-4..SIGNIFICANT_DIGITS).contains(&exp) {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exp) as usize;
        strip_trailing_zeros(format!("{:.*}", decimals, f))
    } else {
        let mantissa = strip_trailing_zeros(mantissa.to_string());
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

/// Formats a floating-point number for display.
///
/// A number within `1e-12` of an integer is shown as that integer. Anything else is shown with 12
/// significant digits and no trailing zeros.
pub fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return if f.is_nan() {
            "nan".to_string()
        } else if f > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    let rounded = f.round();
    if (f - rounded).abs() < INTEGER_TOLERANCE {
        if let Some(n) = Integer::from_f64(rounded) {
            return n.to_string();
        }
    }

    general_format(f)
}

/// Evaluates a constant expression to the nearest [`f64`], by way of [`EVAL_DIGITS`] significant
/// digits.
fn evaluate(value: &SymExpr) -> Option<f64> {
    if !value.is_constant() {
        return None;
    }

    let evaluated = eval(value, None).ok()?;
    let f = evaluated.to_string_radix(10, Some(EVAL_DIGITS)).parse::<f64>().ok()?;
    f.is_finite().then_some(f)
}

/// Renders the value, as a number if it is a single real number, or as an expression otherwise.
pub fn render(value: &SymExpr) -> Rendering {
    match evaluate(value) {
        Some(f) => Rendering::Numeric(format_float(f)),
        None => Rendering::Symbolic(strip_trailing_zeros(value.to_string())),
    }
}

/// Renders the value as a string. See [`render`].
pub fn format_value(value: &SymExpr) -> String {
    render(value).into_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reshi_compute::symbolic::simplify;
    use reshi_parser::{parser::{ast::Expr, Parser}, symbols::SymbolTable};
    use super::*;

    fn render_str(input: &str) -> Rendering {
        let symbols = SymbolTable::standard();
        let expr = Parser::new(input, &symbols).try_parse_full::<Expr>().unwrap();
        render(&simplify(&SymExpr::from(expr)))
    }

    #[test]
    fn integers() {
        assert_eq!(format_float(4.0), "4");
        assert_eq!(format_float(-12.0), "-12");
        assert_eq!(format_float(4.999999999999), "5");
        assert_eq!(format_float(5.0000000000001), "5");
        assert_eq!(format_float(1e20), "100000000000000000000");
    }

    #[test]
    fn integers_survive_formatting_and_parsing() {
        let symbols = SymbolTable::standard();
        let reparse = |value: f64| {
            let text = format_float(value);
            let expr = Parser::new(&text, &symbols).try_parse_full::<Expr>().unwrap();
            simplify(&SymExpr::from(expr))
        };

        assert_eq!(reparse(0.0), SymExpr::number(0));
        assert_eq!(reparse(-7.0), SymExpr::number(-7));
        assert_eq!(reparse(123456789012.0), SymExpr::number(Integer::from(123456789012_i64)));
        assert_eq!(reparse(1e20), SymExpr::number(Integer::from(Integer::u_pow_u(10, 20))));
    }

    #[test]
    fn decimals() {
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(0.1 + 0.2), "0.3");
        assert_eq!(format_float(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_float(-2.25), "-2.25");
        assert_eq!(format_float(123456789012.4), "123456789012");
    }

    #[test]
    fn scientific() {
        assert_eq!(format_float(0.00001234), "1.234e-05");
        assert_eq!(format_float(1234567890123.5), "1.23456789012e+12");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }

    #[test]
    fn trailing_zeros() {
        assert_eq!(strip_trailing_zeros("2.500".to_string()), "2.5");
        assert_eq!(strip_trailing_zeros("3.000".to_string()), "3");
        assert_eq!(strip_trailing_zeros("x + 1.0".to_string()), "x + 1.0");
    }

    #[test]
    fn numbers_are_evaluated() {
        assert_eq!(render_str("2+2"), Rendering::Numeric("4".to_string()));
        assert_eq!(render_str("1/3"), Rendering::Numeric("0.333333333333".to_string()));
        assert_eq!(render_str("sin(pi/6)"), Rendering::Numeric("0.5".to_string()));
        assert_eq!(render_str("sqrt(2)"), Rendering::Numeric("1.41421356237".to_string()));
        assert_eq!(render_str("pi"), Rendering::Numeric("3.14159265359".to_string()));
    }

    #[test]
    fn falls_back_to_symbolic() {
        assert_eq!(render_str("2x + x"), Rendering::Symbolic("3*x".to_string()));
        assert_eq!(render_str("sqrt(-4)"), Rendering::Symbolic("sqrt(-4)".to_string()));
    }
}
