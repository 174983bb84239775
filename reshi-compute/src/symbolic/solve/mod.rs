//! Solving equations in one variable.
//!
//! [`solve`] moves everything to one side, multiplies through by any denominators containing the
//! variable (see [`denominator`]), and then tries two strategies in order:
//!
//! 1. If the difference is a polynomial in the variable, it is solved from its coefficients (see
//!    [`polynomial`]).
//! 2. If the variable appears exactly once, the operations applied to it are undone one at a time
//!    (see [`isolate`]).
//!
//! Every candidate is simplified, checked numerically by substituting it back into the equation
//! as it was before any denominators were cleared, and the surviving solutions are returned sorted by value. Only real solutions are found.

pub mod denominator;
pub mod error;
pub mod isolate;
pub mod polynomial;

use crate::numerical::eval_f64;
use crate::symbolic::{expr::SymExpr, simplify::simplify, step_collector::StepCollector};
use error::CannotSolve;
use reshi_error::Error;
use tracing::debug;

/// The relative tolerance used when checking solutions and merging equal ones.
const TOLERANCE: f64 = 1e-9;

/// A step taken while solving an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStep {
    /// The equation was rewritten as `expr = 0`.
    MoveToOneSide { expr: SymExpr },

    /// The variable cancelled out and the equation is always true.
    Identity,

    /// The variable cancelled out and the equation is never true, since it reduces to
    /// `value = 0`.
    Contradiction { value: SymExpr },

    /// Both sides were multiplied by `denominator`, which contains the variable, giving
    /// `expr = 0`. Roots where `denominator` is zero are rejected later.
    ClearDenominators { denominator: SymExpr, expr: SymExpr },

    /// The equation is a polynomial with the given coefficients, from the constant term up.
    Polynomial { degree: usize, coefficients: Vec<SymExpr> },

    /// The root of a linear equation.
    LinearRoot { root: SymExpr },

    /// The discriminant of a quadratic equation.
    Discriminant { value: SymExpr },

    /// The discriminant is negative, so there are no real roots.
    NoRealRoots,

    /// A rational root found by testing the candidates of the rational root theorem.
    RationalRoot { root: SymExpr },

    /// The equation was rewritten to isolate the variable further.
    Isolate { lhs: SymExpr, rhs: SymExpr },

    /// `lhs` can never equal `rhs`, so this branch has no solutions.
    OutOfDomain { lhs: SymExpr, rhs: SymExpr },

    /// The candidate does not satisfy the original equation.
    Rejected { candidate: SymExpr },
}

/// Returns true if the candidate makes `expr` zero, within a tolerance relative to the size of
/// the terms of `expr`.
fn satisfies(expr: &SymExpr, candidate: f64) -> bool {
    let Ok(residual) = eval_f64(expr, Some(candidate)) else {
        return false;
    };

    let scale = match expr {
        SymExpr::Add(terms) => terms.iter()
            .filter_map(|term| eval_f64(term, Some(candidate)).ok())
            .map(f64::abs)
            .sum::<f64>(),
        _ => 0.0,
    };

    residual.abs() <= TOLERANCE * scale.max(1.0)
}

/// Simplifies the candidates, removes duplicates and those that do not satisfy `expr = 0`, and
/// sorts the rest by value.
fn finish(
    expr: &SymExpr,
    candidates: Vec<SymExpr>,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Vec<SymExpr> {
    let mut solutions: Vec<(SymExpr, f64)> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let candidate = simplify(&candidate);
        let Ok(value) = eval_f64(&candidate, None) else {
            steps.push(SolveStep::Rejected { candidate });
            continue;
        };

        let duplicate = solutions.iter().any(|(other, other_value)| {
            *other == candidate
                || (value - other_value).abs() <= TOLERANCE * value.abs().max(1.0)
        });
        if duplicate {
            continue;
        }

        if satisfies(expr, value) {
            solutions.push((candidate, value));
        } else {
            steps.push(SolveStep::Rejected { candidate });
        }
    }

    solutions.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    solutions.into_iter().map(|(solution, _)| solution).collect()
}

/// Solves the equation `lhs = rhs` for the given variable, returning its real solutions sorted by
/// value.
///
/// An equation that is always true (such as `x = x`) or never true (such as `x = x + 1`) has no
/// solutions to list, so both return an empty list. Every step taken is reported to the given
/// [`StepCollector`].
pub fn solve(
    lhs: &SymExpr,
    rhs: &SymExpr,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Result<Vec<SymExpr>, Error> {
    let expr = simplify(&(lhs.clone() + -rhs.clone()));
    steps.push(SolveStep::MoveToOneSide { expr: expr.clone() });

    if !expr.contains_symbol(var) {
        if expr.is_zero() {
            steps.push(SolveStep::Identity);
        } else {
            steps.push(SolveStep::Contradiction { value: expr });
        }
        return Ok(Vec::new());
    }

    let cleared = match denominator::clear_denominators(&expr, var) {
        Some((denominator, cleared)) => {
            debug!(%denominator, "cleared denominators");
            steps.push(SolveStep::ClearDenominators { denominator, expr: cleared.clone() });
            if !cleared.contains_symbol(var) {
                if cleared.is_zero() {
                    steps.push(SolveStep::Identity);
                } else {
                    steps.push(SolveStep::Contradiction { value: cleared });
                }
                return Ok(Vec::new());
            }
            cleared
        },
        None => expr.clone(),
    };

    if let Some(coefficients) = polynomial::coefficients(&cleared, var) {
        let degree = coefficients.len() - 1;
        steps.push(SolveStep::Polynomial { degree, coefficients: coefficients.clone() });
        if let Some(candidates) = polynomial::solve_polynomial(&coefficients, steps) {
            debug!(degree, candidates = candidates.len(), "solved as polynomial");
            return Ok(finish(&expr, candidates, steps));
        }
    }

    if cleared.count_symbol(var) == 1 {
        if let Some(candidates) = isolate::isolate(&cleared, SymExpr::number(0), var, steps) {
            debug!(candidates = candidates.len(), "solved by isolation");
            return Ok(finish(&expr, candidates, steps));
        }
    }

    Err(Error::new(Vec::new(), CannotSolve { variable: var.to_string() }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    fn solve_str(equation: &str) -> Result<Vec<String>, Error> {
        let (lhs, rhs) = equation.split_once('=').unwrap();
        let solutions = solve(&parse_expr(lhs), &parse_expr(rhs), "x", &mut ())?;
        Ok(solutions.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn linear() {
        assert_eq!(solve_str("2x + 3 = 7").unwrap(), vec!["2"]);
        assert_eq!(solve_str("3x = 1").unwrap(), vec!["1/3"]);
    }

    #[test]
    fn quadratic() {
        assert_eq!(solve_str("x^2 - 4 = 0").unwrap(), vec!["-2", "2"]);
        assert_eq!(solve_str("x^2 + 1 = 0").unwrap(), Vec::<String>::new());
        assert_eq!(solve_str("(x + 1)^2 = 0").unwrap(), vec!["-1"]);
    }

    #[test]
    fn quadratic_with_irrational_roots() {
        assert_eq!(solve_str("x^2 = 2").unwrap(), vec!["-sqrt(2)", "sqrt(2)"]);
    }

    #[test]
    fn cubic() {
        assert_eq!(solve_str("x^3 - 6x^2 + 11x - 6 = 0").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(solve_str("x^3 = 2").unwrap(), vec!["2^(1/3)"]);
    }

    #[test]
    fn identity_and_contradiction() {
        let mut steps = Vec::new();
        let solutions = solve(&parse_expr("x + 1"), &parse_expr("1 + x"), "x", &mut steps).unwrap();
        assert!(solutions.is_empty());
        assert_eq!(steps.last(), Some(&SolveStep::Identity));

        assert_eq!(solve_str("x = x + 1").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn root_with_no_solution() {
        assert_eq!(solve_str("sqrt(x) = -1").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn logarithm() {
        assert_eq!(solve_str("log(x) = 0").unwrap(), vec!["1"]);
    }

    #[test]
    fn rational_equations() {
        assert_eq!(solve_str("(x + 1)/(x - 1) = 2").unwrap(), vec!["3"]);
        assert_eq!(solve_str("x + 1/x = 2").unwrap(), vec!["1"]);
        assert_eq!(solve_str("x/(x + 1) = 1/2").unwrap(), vec!["1"]);
        assert_eq!(solve_str("1/x + 1/x^2 = 0").unwrap(), vec!["-1"]);
    }

    #[test]
    fn root_at_pole_is_rejected() {
        let mut steps = Vec::new();
        let solutions = solve(&parse_expr("x/(x - 1)"), &parse_expr("1/(x - 1)"), "x", &mut steps).unwrap();
        assert!(solutions.is_empty());
        assert!(steps.iter().any(|step| matches!(step, SolveStep::ClearDenominators { .. })));
        assert_eq!(steps.last(), Some(&SolveStep::Rejected { candidate: SymExpr::number(1) }));
    }

    #[test]
    fn fraction_that_is_never_zero() {
        assert_eq!(solve_str("1/(x - 1) = 0").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn unsupported() {
        let err = solve_str("x + sin(x) = 1").unwrap_err();
        assert_eq!(err.to_string(), "cannot solve this equation for `x`");
    }
}
