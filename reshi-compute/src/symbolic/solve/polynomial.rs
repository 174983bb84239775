//! Polynomial equations: coefficient extraction, the quadratic formula, and rational roots of
//! higher-degree polynomials.

use crate::numerical::eval_f64;
use crate::primitive::{int, rational};
use crate::symbolic::{expr::{Primary, SymExpr}, simplify::simplify, step_collector::StepCollector};
use rug::{Integer, Rational};
use super::SolveStep;

/// The highest degree of polynomial that is expanded into coefficients.
pub const MAX_DEGREE: usize = 16;

/// The largest constant term or leading coefficient whose divisors are enumerated when searching
/// for rational roots.
const MAX_DIVISOR_TARGET: u64 = 1_000_000_000_000;

/// The largest number of candidate rational roots tried per deflation.
const MAX_CANDIDATES: usize = 10_000;

/// Adds two coefficient vectors.
fn poly_add(mut a: Vec<SymExpr>, b: Vec<SymExpr>) -> Vec<SymExpr> {
    if a.len() < b.len() {
        a.resize(b.len(), SymExpr::number(0));
    }
    for (i, coefficient) in b.into_iter().enumerate() {
        let sum = std::mem::replace(&mut a[i], SymExpr::number(0)) + coefficient;
        a[i] = simplify(&sum);
    }
    a
}

/// Multiplies two coefficient vectors. Returns [`None`] if the product exceeds [`MAX_DEGREE`].
fn poly_mul(a: &[SymExpr], b: &[SymExpr]) -> Option<Vec<SymExpr>> {
    let len = a.len() + b.len() - 1;
    if len > MAX_DEGREE + 1 {
        return None;
    }

    let mut product = vec![SymExpr::Add(Vec::new()); len];
    for (i, lhs) in a.iter().enumerate() {
        for (j, rhs) in b.iter().enumerate() {
            product[i + j] += lhs.clone() * rhs.clone();
        }
    }

    Some(product.iter().map(simplify).collect())
}

/// Removes zero coefficients of the highest degrees.
fn trim(mut coefficients: Vec<SymExpr>) -> Vec<SymExpr> {
    while coefficients.len() > 1 && coefficients.last().is_some_and(SymExpr::is_zero) {
        coefficients.pop();
    }
    coefficients
}

/// Extracts the coefficients of the expression as a polynomial in the given variable.
///
/// Returns `[a0, a1, ..., an]`, where `expr = a0 + a1*var + ... + an*var^n`, with every
/// coefficient simplified. Returns [`None`] if the expression is not a polynomial in `var`, or if
/// its degree exceeds [`MAX_DEGREE`].
pub fn coefficients(expr: &SymExpr, var: &str) -> Option<Vec<SymExpr>> {
    if !expr.contains_symbol(var) {
        return Some(vec![expr.clone()]);
    }

    let coefficients = match expr {
        SymExpr::Primary(Primary::Symbol(_)) => vec![SymExpr::number(0), SymExpr::number(1)],
        SymExpr::Primary(_) => return None,
        SymExpr::Add(terms) => {
            let mut sum = Vec::new();
            for term in terms {
                sum = poly_add(sum, coefficients(term, var)?);
            }
            sum
        },
        SymExpr::Mul(factors) => {
            let mut product = vec![SymExpr::number(1)];
            for factor in factors {
                product = poly_mul(&product, &coefficients(factor, var)?)?;
            }
            product
        },
        SymExpr::Exp(base, exp) => {
            let n = exp.as_integer()?.to_usize()?;
            if n > MAX_DEGREE {
                return None;
            }

            let base = coefficients(base, var)?;
            let mut product = vec![SymExpr::number(1)];
            for _ in 0..n {
                product = poly_mul(&product, &base)?;
            }
            product
        },
    };

    let coefficients = trim(coefficients);
    if coefficients.len() > MAX_DEGREE + 1 {
        None
    } else {
        Some(coefficients)
    }
}

/// Returns the coefficients as exact rationals, if they all are numbers.
fn rational_coefficients(coefficients: &[SymExpr]) -> Option<Vec<Rational>> {
    coefficients.iter()
        .map(|coefficient| coefficient.as_number().cloned())
        .collect()
}

/// `-c0 / c1`
pub fn solve_linear(c0: &SymExpr, c1: &SymExpr, steps: &mut dyn StepCollector<SolveStep>) -> SymExpr {
    let root = simplify(&(-c0.clone() * c1.clone().recip()));
    steps.push(SolveStep::LinearRoot { root: root.clone() });
    root
}

/// Solves `a*x^2 + b*x + c = 0` with the quadratic formula. Only real roots are returned.
///
/// Returns [`None`] if the sign of the discriminant cannot be determined.
pub fn solve_quadratic(
    c: &SymExpr,
    b: &SymExpr,
    a: &SymExpr,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    // D = b^2 - 4ac
    let discriminant = simplify(&(
        b.clone().pow(SymExpr::number(2))
            + SymExpr::Mul(vec![SymExpr::number(-4), a.clone(), c.clone()])
    ));
    steps.push(SolveStep::Discriminant { value: discriminant.clone() });

    let sign = match discriminant.as_number() {
        Some(n) => n.cmp0(),
        None => eval_f64(&discriminant, None).ok()?.partial_cmp(&0.0)?,
    };

    let two_a = SymExpr::number(2) * a.clone();
    let root = |sign: i32| {
        let sqrt = SymExpr::number(sign) * discriminant.clone().sqrt();
        simplify(&((-b.clone() + sqrt) * two_a.clone().recip()))
    };

    match sign {
        std::cmp::Ordering::Less => {
            steps.push(SolveStep::NoRealRoots);
            Some(Vec::new())
        },
        std::cmp::Ordering::Equal => Some(vec![simplify(&(-b.clone() * two_a.clone().recip()))]),
        std::cmp::Ordering::Greater => Some(vec![root(-1), root(1)]),
    }
}

/// Multiplies the coefficients by the least common multiple of their denominators, producing
/// integer coefficients with the same roots.
fn normalize_to_integers(coefficients: &[Rational]) -> Vec<Integer> {
    let lcm = coefficients.iter()
        .fold(int(1), |lcm, c| lcm.lcm(c.denom()));

    let lcm = Rational::from(lcm);
    coefficients.iter()
        .map(|c| Rational::from(c * &lcm).into_numer_denom().0)
        .collect()
}

/// Returns every positive divisor of `n`, or [`None`] if `n` is too large to factor by trial
/// division.
fn divisors(n: &Integer) -> Option<Vec<u64>> {
    let n = n.clone().abs().to_u64()?;
    if n == 0 || n > MAX_DIVISOR_TARGET {
        return None;
    }

    let mut divisors = Vec::new();
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            divisors.push(i);
            if i != n / i {
                divisors.push(n / i);
            }
        }
        i += 1;
    }
    Some(divisors)
}

/// Candidate rational roots by the rational root theorem: `±p/q`, where `p` divides the constant
/// term and `q` divides the leading coefficient.
fn rational_root_candidates(coefficients: &[Integer]) -> Vec<Rational> {
    let (Some(a0), Some(an)) = (coefficients.first(), coefficients.last()) else {
        return Vec::new();
    };
    let (Some(ps), Some(qs)) = (divisors(a0), divisors(an)) else {
        return Vec::new();
    };
    if ps.len() * qs.len() * 2 > MAX_CANDIDATES {
        return Vec::new();
    }

    let mut candidates: Vec<Rational> = Vec::with_capacity(ps.len() * qs.len() * 2);
    for p in &ps {
        for q in &qs {
            let candidate = rational((*p, *q));
            if !candidates.contains(&candidate) {
                candidates.push(Rational::from(-&candidate));
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// Evaluates the polynomial at `x` using Horner's method.
fn horner_eval(coefficients: &[Rational], x: &Rational) -> Rational {
    coefficients.iter()
        .rev()
        .fold(rational(0), |acc, c| acc * x + c)
}

/// Divides the polynomial by `(x - root)` using synthetic division.
fn synthetic_division(coefficients: &[Rational], root: &Rational) -> Vec<Rational> {
    let n = coefficients.len();
    let mut quotient = vec![rational(0); n - 1];
    quotient[n - 2] = coefficients[n - 1].clone();
    for i in (0..n - 2).rev() {
        quotient[i] = Rational::from(&coefficients[i + 1] + Rational::from(root * &quotient[i + 1]));
    }
    quotient
}

/// Finds rational roots of a polynomial with rational coefficients, deflating it by each root
/// found until its degree is at most two.
///
/// Returns the roots found and the remaining polynomial, or [`None`] if the remaining polynomial
/// still has a degree above two.
fn find_rational_roots(
    mut coefficients: Vec<Rational>,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<(Vec<Rational>, Vec<Rational>)> {
    let mut roots = Vec::new();

    while coefficients.len() > 3 {
        // a0 == 0 => x = 0 is a root
        if coefficients[0] == 0 {
            coefficients.remove(0);
            steps.push(SolveStep::RationalRoot { root: SymExpr::number(0) });
            roots.push(rational(0));
            continue;
        }

        let candidates = rational_root_candidates(&normalize_to_integers(&coefficients));
        let root = candidates.into_iter()
            .find(|candidate| horner_eval(&coefficients, candidate) == 0)?;

        steps.push(SolveStep::RationalRoot { root: SymExpr::number(root.clone()) });
        coefficients = synthetic_division(&coefficients, &root);
        roots.push(root);
    }

    Some((roots, coefficients))
}

/// Solves the polynomial equation `a0 + a1*x + ... + an*x^n = 0` with degree at least one.
///
/// Returns [`None`] if the polynomial cannot be solved exactly.
pub fn solve_polynomial(
    coefficients: &[SymExpr],
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    match coefficients {
        [] | [_] => Some(Vec::new()),
        [c0, c1] => Some(vec![solve_linear(c0, c1, steps)]),
        [c, b, a] => solve_quadratic(c, b, a, steps),
        _ => {
            let (roots, rest) = find_rational_roots(rational_coefficients(coefficients)?, steps)?;
            let rest = rest.into_iter().map(SymExpr::number).collect::<Vec<_>>();
            let mut solutions = roots.into_iter().map(SymExpr::number).collect::<Vec<_>>();
            solutions.extend(solve_polynomial(&trim(rest), steps)?);
            Some(solutions)
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    fn numbers(values: &[i32]) -> Vec<SymExpr> {
        values.iter().map(|n| SymExpr::number(*n)).collect()
    }

    #[test]
    fn expand_square() {
        assert_eq!(coefficients(&parse_expr("(x + 1)^2"), "x"), Some(numbers(&[1, 2, 1])));
    }

    #[test]
    fn expand_product() {
        assert_eq!(coefficients(&parse_expr("(x - 1)(x + 2)x"), "x"), Some(numbers(&[0, -2, 1, 1])));
    }

    #[test]
    fn symbolic_coefficients() {
        assert_eq!(
            coefficients(&parse_expr("pi x + 1"), "x"),
            Some(vec![SymExpr::number(1), SymExpr::constant(reshi_parser::symbols::Const::Pi)]),
        );
    }

    #[test]
    fn not_polynomials() {
        assert_eq!(coefficients(&parse_expr("sqrt(x)"), "x"), None);
        assert_eq!(coefficients(&parse_expr("1/x"), "x"), None);
        assert_eq!(coefficients(&parse_expr("sin(x)"), "x"), None);
        assert_eq!(coefficients(&parse_expr("x^17"), "x"), None);
    }

    #[test]
    fn cubic_with_rational_roots() {
        // 2x^3 - 3x^2 - 3x + 2 = (x - 2)(2x - 1)(x + 1)
        let mut steps = Vec::new();
        let solutions = solve_polynomial(&numbers(&[2, -3, -3, 2]), &mut steps).unwrap();
        let mut values = solutions.iter()
            .map(|root| root.as_number().unwrap().to_f64())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![-1.0, 0.5, 2.0]);
        assert!(matches!(steps[0], SolveStep::RationalRoot { .. }));
    }

    #[test]
    fn cubic_without_rational_roots() {
        // x^3 - 2
        assert_eq!(solve_polynomial(&numbers(&[-2, 0, 0, 1]), &mut ()), None);
    }

    #[test]
    fn quadratic_without_real_roots() {
        let mut steps = Vec::new();
        assert_eq!(solve_polynomial(&numbers(&[1, 0, 1]), &mut steps), Some(Vec::new()));
        assert_eq!(steps.last(), Some(&SolveStep::NoRealRoots));
    }
}
