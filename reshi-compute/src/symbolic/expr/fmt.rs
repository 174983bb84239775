//! Human-readable output for [`SymExpr`].
//!
//! Sums are printed with polynomial-like ordering (higher powers first, numbers last) and with
//! subtraction instead of negative terms. Products gather negative powers into a denominator, so
//! `x * 2^-1` prints as `x/2`.

use crate::primitive::rational;
use rug::Rational;
use std::{cmp::Reverse, fmt};
use super::{Primary, SymExpr};

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Constant(c) => write!(f, "{}", c.name()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(func, args) => {
                write!(f, "{}(", func.name())?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => fmt_sum(f, terms),
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(base, exp) => {
                match exp.as_number() {
                    Some(n) if *n == rational((1, 2)) => return write!(f, "sqrt({})", base),
                    Some(n) if *n < 0 => return fmt_product(f, std::slice::from_ref(self)),
                    _ => (),
                }

                if base_needs_parens(base) {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }

                if exponent_needs_parens(exp) {
                    write!(f, "^({})", exp)
                } else {
                    write!(f, "^{}", exp)
                }
            },
        }
    }
}

/// Returns the total degree of the term in its variables, counting only integer powers. Used to
/// order the terms of a sum.
fn degree(term: &SymExpr) -> i64 {
    match term {
        SymExpr::Primary(Primary::Symbol(_)) => 1,
        SymExpr::Exp(base, exp) if base.as_symbol().is_some() => exp.as_integer()
            .and_then(|n| n.to_i64())
            .unwrap_or(0),
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        _ => 0,
    }
}

/// Returns true if the term would be printed with a leading minus sign.
fn is_negative(term: &SymExpr) -> bool {
    term.split_coefficient().0 < 0
}

fn fmt_sum(f: &mut fmt::Formatter<'_>, terms: &[SymExpr]) -> fmt::Result {
    let mut ordered = terms.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|term| (term.is_number(), Reverse(degree(term))));

    let mut iter = ordered.into_iter();
    if let Some(term) = iter.next() {
        write!(f, "{}", term)?;
    }

    for term in iter {
        if is_negative(term) {
            let negated = match term {
                SymExpr::Primary(Primary::Number(n)) => SymExpr::number(-n.clone()),
                term => term.clone() * SymExpr::number(-1),
            };
            write!(f, " - {}", negated)?;
        } else {
            write!(f, " + {}", term)?;
        }
    }

    Ok(())
}

fn fmt_product(f: &mut fmt::Formatter<'_>, factors: &[SymExpr]) -> fmt::Result {
    let mut coefficient = rational(1);
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) => coefficient *= n,
            SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n < 0) => {
                let positive = exp.as_number().map(|n| Rational::from(-n)).unwrap_or_default();
                if positive == 1 {
                    denominator.push((**base).clone());
                } else {
                    denominator.push((**base).clone().pow(SymExpr::number(positive)));
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    if coefficient < 0 {
        write!(f, "-")?;
        coefficient = -coefficient;
    }

    let (numer, denom) = coefficient.into_numer_denom();
    let mut first = true;
    if numer != 1 || numerator.is_empty() {
        write!(f, "{}", numer)?;
        first = false;
    }
    for factor in &numerator {
        if !first {
            write!(f, "*")?;
        }
        first = false;

        if matches!(factor, SymExpr::Add(_)) {
            write!(f, "({})", factor)?;
        } else {
            write!(f, "{}", factor)?;
        }
    }

    if denom == 1 && denominator.is_empty() {
        return Ok(());
    }

    let mut pieces = Vec::with_capacity(denominator.len() + 1);
    if denom != 1 {
        pieces.push(denom.to_string());
    }
    for factor in &denominator {
        if matches!(factor, SymExpr::Add(_) | SymExpr::Mul(_)) {
            pieces.push(format!("({})", factor));
        } else {
            pieces.push(factor.to_string());
        }
    }

    if pieces.len() == 1 {
        write!(f, "/{}", pieces[0])
    } else {
        write!(f, "/({})", pieces.join("*"))
    }
}

fn base_needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || *n.denom() != 1,
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
    }
}

fn exponent_needs_parens(exp: &SymExpr) -> bool {
    match exp {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || *n.denom() != 1,
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reshi_parser::symbols::{Const, Func};
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn polynomial() {
        // 3 + 2x + x^2
        let expr = SymExpr::Add(vec![
            SymExpr::number(3),
            SymExpr::Mul(vec![SymExpr::number(2), x()]),
            x().pow(SymExpr::number(2)),
        ]);
        assert_eq!(expr.to_string(), "x^2 + 2*x + 3");
    }

    #[test]
    fn subtraction() {
        let expr = SymExpr::Add(vec![
            x(),
            SymExpr::number(-1),
            SymExpr::Mul(vec![SymExpr::number(-1), SymExpr::constant(Const::Pi)]),
        ]);
        assert_eq!(expr.to_string(), "x - pi - 1");
    }

    #[test]
    fn fractions() {
        assert_eq!(SymExpr::number((3, 4)).to_string(), "3/4");
        assert_eq!(SymExpr::Mul(vec![SymExpr::number((1, 2)), x()]).to_string(), "x/2");
        assert_eq!(SymExpr::Mul(vec![SymExpr::number((-3, 4)), x()]).to_string(), "-3*x/4");
        assert_eq!(x().recip().to_string(), "1/x");
        assert_eq!(
            SymExpr::Mul(vec![SymExpr::number(2), (x() + SymExpr::number(1)).recip()]).to_string(),
            "2/(x + 1)",
        );
    }

    #[test]
    fn roots_and_powers() {
        assert_eq!(SymExpr::number(2).sqrt().to_string(), "sqrt(2)");
        assert_eq!(
            SymExpr::Mul(vec![SymExpr::number(-1), SymExpr::number(2).sqrt()]).to_string(),
            "-sqrt(2)",
        );
        assert_eq!(x().pow(SymExpr::number((1, 3))).to_string(), "x^(1/3)");
        assert_eq!(SymExpr::number(-2).pow(x()).to_string(), "(-2)^x");
        assert_eq!(
            SymExpr::call(Func::Sin, vec![x()]).pow(SymExpr::number(2)).to_string(),
            "sin(x)^2",
        );
    }

    #[test]
    fn negation() {
        assert_eq!((-x()).to_string(), "-x");
        assert_eq!(SymExpr::constant(Const::E).to_string(), "e");
    }
}
