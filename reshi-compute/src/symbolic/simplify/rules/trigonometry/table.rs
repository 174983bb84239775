//! Lookup tables of exact values of the trigonometric functions.
//!
//! The trigonometric functions of certain angles are well-known, and can be written exactly in
//! terms of square roots. The tables here map those angles to their exact values, and back.
//!
//! Angles are normalized before lookup by dividing them by `2pi`, so every key is a fraction of a
//! full turn in the range `[0, 1)`. For example, `pi/6` is stored as `1/12`. Values are stored in
//! the same form the simplifier produces for them, so they can be compared with strict equality.

use crate::primitive::rational;
use crate::symbolic::expr::SymExpr;
use once_cell::sync::Lazy;
use rug::Rational;
use std::collections::HashMap;

/// Creates the number `n/d`.
fn frac(n: i32, d: i32) -> SymExpr {
    SymExpr::number((n, d))
}

/// Creates `c*sqrt(r)`, in simplified form.
fn root(c: (i32, i32), r: i32) -> SymExpr {
    let root = SymExpr::number(r).sqrt();
    if c == (1, 1) {
        root
    } else {
        SymExpr::Mul(vec![SymExpr::number(c), root])
    }
}

/// Builds a table from `(numerator, denominator, value)` triples, where the key is the angle
/// `numerator/denominator` of a full turn.
fn build(entries: Vec<(i32, i32, SymExpr)>) -> HashMap<Rational, SymExpr> {
    entries.into_iter()
        .map(|(n, d, value)| (rational((n, d)), value))
        .collect()
}

/// Exact values of `sin`, keyed by the fraction of a full turn.
pub static SIN_TABLE: Lazy<HashMap<Rational, SymExpr>> = Lazy::new(|| build(vec![
    (0, 1, frac(0, 1)),
    (1, 12, frac(1, 2)),
    (1, 8, root((1, 2), 2)),
    (1, 6, root((1, 2), 3)),
    (1, 4, frac(1, 1)),
    (1, 3, root((1, 2), 3)),
    (3, 8, root((1, 2), 2)),
    (5, 12, frac(1, 2)),
    (1, 2, frac(0, 1)),
    (7, 12, frac(-1, 2)),
    (5, 8, root((-1, 2), 2)),
    (2, 3, root((-1, 2), 3)),
    (3, 4, frac(-1, 1)),
    (5, 6, root((-1, 2), 3)),
    (7, 8, root((-1, 2), 2)),
    (11, 12, frac(-1, 2)),
]));

/// Exact values of `cos`, keyed by the fraction of a full turn.
pub static COS_TABLE: Lazy<HashMap<Rational, SymExpr>> = Lazy::new(|| build(vec![
    (0, 1, frac(1, 1)),
    (1, 12, root((1, 2), 3)),
    (1, 8, root((1, 2), 2)),
    (1, 6, frac(1, 2)),
    (1, 4, frac(0, 1)),
    (1, 3, frac(-1, 2)),
    (3, 8, root((-1, 2), 2)),
    (5, 12, root((-1, 2), 3)),
    (1, 2, frac(-1, 1)),
    (7, 12, root((-1, 2), 3)),
    (5, 8, root((-1, 2), 2)),
    (2, 3, frac(-1, 2)),
    (3, 4, frac(0, 1)),
    (5, 6, frac(1, 2)),
    (7, 8, root((1, 2), 2)),
    (11, 12, root((1, 2), 3)),
]));

/// Exact values of `tan`, keyed by the fraction of a full turn. `tan` is undefined at `1/4` and
/// `3/4`, so those angles are missing.
pub static TAN_TABLE: Lazy<HashMap<Rational, SymExpr>> = Lazy::new(|| build(vec![
    (0, 1, frac(0, 1)),
    (1, 12, root((1, 3), 3)),
    (1, 8, frac(1, 1)),
    (1, 6, root((1, 1), 3)),
    (1, 3, root((-1, 1), 3)),
    (3, 8, frac(-1, 1)),
    (5, 12, root((-1, 3), 3)),
    (1, 2, frac(0, 1)),
    (7, 12, root((1, 3), 3)),
    (5, 8, frac(1, 1)),
    (2, 3, root((1, 1), 3)),
    (5, 6, root((-1, 1), 3)),
    (7, 8, frac(-1, 1)),
    (11, 12, root((-1, 3), 3)),
]));

/// Inverts a forward table over the principal range of the inverse function. The given
/// predicate selects the angles in that range, and the given function maps a selected angle to
/// the multiple of `pi` the inverse function returns.
fn invert(
    table: &HashMap<Rational, SymExpr>,
    in_range: impl Fn(&Rational) -> bool,
    to_pi_multiple: impl Fn(&Rational) -> Rational,
) -> Vec<(SymExpr, Rational)> {
    table.iter()
        .filter(|(turn, _)| in_range(turn))
        .map(|(turn, value)| (value.clone(), to_pi_multiple(turn)))
        .collect()
}

/// Converts a fraction of a full turn in `[0, 1)` to a multiple of `pi` in `(-1, 1]`.
fn signed_pi_multiple(turn: &Rational) -> Rational {
    if *turn > rational((1, 2)) {
        Rational::from(turn * 2u32) - 2u32
    } else {
        Rational::from(turn * 2u32)
    }
}

/// Exact values of `asin`, as multiples of `pi` in `[-1/2, 1/2]`.
pub static ASIN_TABLE: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| invert(
    &SIN_TABLE,
    |turn| *turn <= rational((1, 4)) || *turn >= rational((3, 4)),
    signed_pi_multiple,
));

/// Exact values of `acos`, as multiples of `pi` in `[0, 1]`.
pub static ACOS_TABLE: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| invert(
    &COS_TABLE,
    |turn| *turn <= rational((1, 2)),
    |turn| Rational::from(turn * 2u32),
));

/// Exact values of `atan`, as multiples of `pi` in `(-1/2, 1/2)`.
pub static ATAN_TABLE: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| invert(
    &TAN_TABLE,
    |turn| *turn < rational((1, 4)) || *turn > rational((3, 4)),
    signed_pi_multiple,
));

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn inverse_tables_have_unique_values() {
        for table in [&*ASIN_TABLE, &*ACOS_TABLE, &*ATAN_TABLE] {
            for (i, (value, _)) in table.iter().enumerate() {
                assert_eq!(table[i + 1..].iter().filter(|(other, _)| other == value).count(), 0);
            }
        }
    }

    #[test]
    fn principal_ranges() {
        assert_eq!(ASIN_TABLE.len(), 9);
        assert_eq!(ACOS_TABLE.len(), 9);
        assert_eq!(ATAN_TABLE.len(), 7);
    }
}
