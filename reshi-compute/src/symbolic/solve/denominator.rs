//! Clearing denominators that contain the variable, so that equations such as `(x+1)/(x-1) = 2`
//! reduce to polynomial equations.
//!
//! Multiplying by a denominator can introduce roots where that denominator is zero. Those are not
//! solutions of the original equation, so the caller must check every candidate against the
//! expression as it was before clearing.

use crate::symbolic::{expr::SymExpr, simplify::simplify};
use rug::Integer;

/// Splits a factor into its base and the power it is divided by, if it is a power of an
/// expression containing `var` with a negative integer exponent.
fn as_denominator<'a>(factor: &'a SymExpr, var: &str) -> Option<(&'a SymExpr, Integer)> {
    let SymExpr::Exp(base, exp) = factor else {
        return None;
    };

    let exp = exp.as_integer()?;
    if *exp < 0 && base.contains_symbol(var) {
        Some((base, Integer::from(-exp)))
    } else {
        None
    }
}

/// Returns the factors of a term.
fn factors(term: &SymExpr) -> &[SymExpr] {
    match term {
        SymExpr::Mul(factors) => factors,
        term => std::slice::from_ref(term),
    }
}

/// Returns the terms of an expression.
fn terms(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Add(terms) => terms,
        expr => std::slice::from_ref(expr),
    }
}

/// The least common denominator of the terms of an expression, as a list of distinct bases and
/// the highest power each one is divided by.
fn common_denominator<'a>(expr: &'a SymExpr, var: &str) -> Vec<(&'a SymExpr, Integer)> {
    let mut denominator: Vec<(&SymExpr, Integer)> = Vec::new();
    for term in terms(expr) {
        for (base, power) in factors(term).iter().filter_map(|factor| as_denominator(factor, var)) {
            match denominator.iter_mut().find(|(other, _)| *other == base) {
                Some((_, existing)) if *existing < power => *existing = power,
                Some(_) => {},
                None => denominator.push((base, power)),
            }
        }
    }
    denominator
}

/// Builds `base^power`, leaving out the exponent when it is 1.
fn power_of(base: &SymExpr, power: Integer) -> SymExpr {
    if power == 1 {
        base.clone()
    } else {
        base.clone().pow(SymExpr::number(power))
    }
}

/// Multiplies `expr` by the least common denominator of its terms that contains `var`.
///
/// Returns the denominator and the simplified product, or [`None`] if no term divides by an
/// expression containing `var`. Each term is multiplied separately, so the product has no
/// negative powers of the cleared bases left.
pub fn clear_denominators(expr: &SymExpr, var: &str) -> Option<(SymExpr, SymExpr)> {
    let denominator = common_denominator(expr, var);
    if denominator.is_empty() {
        return None;
    }

    let cleared = terms(expr)
        .iter()
        .map(|term| {
            let mut remaining = denominator.clone();
            let mut product = Vec::new();
            for factor in factors(term) {
                match as_denominator(factor, var) {
                    Some((base, power)) => {
                        if let Some((_, left)) = remaining.iter_mut().find(|(other, _)| *other == base) {
                            *left -= power;
                        }
                    },
                    None => product.push(factor.clone()),
                }
            }

            product.extend(
                remaining
                    .into_iter()
                    .filter(|(_, power)| *power > 0)
                    .map(|(base, power)| power_of(base, power)),
            );
            SymExpr::Mul(product).downgrade()
        })
        .collect::<Vec<_>>();

    let denominator = denominator
        .into_iter()
        .map(|(base, power)| power_of(base, power))
        .collect::<Vec<_>>();

    Some((
        simplify(&SymExpr::Mul(denominator).downgrade()),
        simplify(&SymExpr::Add(cleared).downgrade()),
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::{expr::tests::parse_expr, solve::polynomial::coefficients};

    fn clear(input: &str) -> Option<(SymExpr, SymExpr)> {
        clear_denominators(&simplify(&parse_expr(input)), "x")
    }

    /// The coefficients of the cleared expression, from the constant term up.
    fn cleared_coefficients(input: &str) -> Vec<String> {
        let (_, cleared) = clear(input).unwrap();
        coefficients(&cleared, "x")
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn no_denominator() {
        assert_eq!(clear("x^2 + 1/2"), None);
        assert_eq!(clear("sqrt(x) - 1"), None);
        assert_eq!(clear("x/2 - 3"), None);
    }

    #[test]
    fn single_fraction() {
        let (denominator, _) = clear("(x + 1)/(x - 1) - 2").unwrap();
        assert_eq!(denominator, simplify(&parse_expr("x - 1")));
        assert_eq!(cleared_coefficients("(x + 1)/(x - 1) - 2"), vec!["3", "-1"]);
    }

    #[test]
    fn shared_base_uses_highest_power() {
        let (denominator, _) = clear("1/x + 1/x^2").unwrap();
        assert_eq!(denominator, simplify(&parse_expr("x^2")));
        assert_eq!(cleared_coefficients("1/x + 1/x^2"), vec!["1", "1"]);
    }

    #[test]
    fn reciprocal_of_variable() {
        let (denominator, _) = clear("x + 1/x - 2").unwrap();
        assert_eq!(denominator, SymExpr::symbol("x"));
        assert_eq!(cleared_coefficients("x + 1/x - 2"), vec!["1", "-2", "1"]);
    }
}
