//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use reshi_parser::parser::error::kind::MAX_LITERAL_EXPONENT;
use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates an exact [`Rational`] from a decimal number written in base 10, such as `16`, `3.8112`,
/// `5.`, `.25`, or `2.5E-3`. The fraction is reduced.
///
/// Returns [`None`] if the string contains anything other than digits, at most one decimal point,
/// and an optional signed exponent, or if the exponent is larger than [`MAX_LITERAL_EXPONENT`].
pub fn rational_from_decimal(s: &str) -> Option<Rational> {
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent)?),
        None => (s, 0),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let numerator = Integer::from_str_radix(&digits, 10).ok()?;
    let denominator = Integer::from(Integer::u_pow_u(10, u32::try_from(fraction.len()).ok()?));
    let value = Rational::from((numerator, denominator));

    let scale = Rational::from(Integer::from(Integer::u_pow_u(10, exponent.unsigned_abs())));
    if exponent < 0 {
        Some(value / scale)
    } else {
        Some(value * scale)
    }
}

/// Parses the exponent part of a number literal, such as `5`, `+2`, or `-3`.
fn parse_exponent(s: &str) -> Option<i32> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.parse::<u32>().ok().filter(|m| *m <= MAX_LITERAL_EXPONENT)?;
    let magnitude = i32::try_from(magnitude).ok()?;
    if s.starts_with('-') {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}
