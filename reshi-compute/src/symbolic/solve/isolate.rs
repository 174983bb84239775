//! Solving equations where the variable appears exactly once, by undoing the operations applied
//! to it one at a time.
//!
//! For example, `2*sin(x) + 1 = 0` is solved by subtracting `1`, dividing by `2`, and taking
//! `asin` of both sides. Functions that are not one-to-one yield every solution in one period
//! (`sin`, `cos`) or both signs (`abs`, even powers).

use crate::numerical::eval_f64;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::simplify,
    step_collector::StepCollector,
};
use reshi_parser::symbols::{Const, Func};
use super::SolveStep;

/// The numeric value of a constant expression, if it has one.
fn value(expr: &SymExpr) -> Option<f64> {
    eval_f64(expr, None).ok()
}

/// Records that `lhs = rhs` has no solution and returns the empty solution set.
fn out_of_domain(lhs: &SymExpr, rhs: SymExpr, steps: &mut dyn StepCollector<SolveStep>) -> Option<Vec<SymExpr>> {
    steps.push(SolveStep::OutOfDomain { lhs: lhs.clone(), rhs });
    Some(Vec::new())
}

/// Continues isolating with the new equation `lhs = rhs`, simplifying the right-hand side first.
fn step(
    lhs: &SymExpr,
    rhs: SymExpr,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    let rhs = simplify(&rhs);
    steps.push(SolveStep::Isolate { lhs: lhs.clone(), rhs: rhs.clone() });
    isolate(lhs, rhs, var, steps)
}

/// Continues isolating with each of the given right-hand sides, collecting every solution.
fn branches(
    lhs: &SymExpr,
    rhs: Vec<SymExpr>,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    let mut solutions = Vec::new();
    for rhs in rhs {
        solutions.extend(step(lhs, rhs, var, steps)?);
    }
    Some(solutions)
}

/// Splits the terms or factors into the single one containing the variable, and the rest.
fn split_on_var<'a>(items: &'a [SymExpr], var: &str) -> Option<(&'a SymExpr, Vec<SymExpr>)> {
    let mut with_var = items.iter().filter(|item| item.contains_symbol(var));
    let target = with_var.next()?;
    if with_var.next().is_some() {
        return None;
    }

    let rest = items.iter()
        .filter(|item| !std::ptr::eq(*item, target))
        .cloned()
        .collect();
    Some((target, rest))
}

/// Solves `base^exp = rhs` for `base`, where `exp` is constant.
fn isolate_base(
    base: &SymExpr,
    exp: &SymExpr,
    lhs: &SymExpr,
    rhs: SymExpr,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    let r = value(&rhs)?;

    let Some(n) = exp.as_number() else {
        // a symbolic power is only defined for positive bases
        if r <= 0.0 {
            return out_of_domain(lhs, rhs, steps);
        }
        return step(base, rhs.pow(exp.clone().recip()), var, steps);
    };

    if *n < 0 {
        // b^-n = r  =>  b^n = 1/r
        if r == 0.0 {
            return out_of_domain(lhs, rhs, steps);
        }
        let positive = simplify(&base.clone().pow(SymExpr::number(-n.clone())));
        return step(&positive, rhs.recip(), var, steps);
    }

    let inverse = SymExpr::number(n.clone().recip());
    let even_numer = n.numer().is_even();
    let even_denom = n.denom().is_even();

    if even_numer || even_denom {
        // the power is never negative
        if r < 0.0 {
            return out_of_domain(lhs, rhs, steps);
        }
        if r == 0.0 {
            return step(base, SymExpr::number(0), var, steps);
        }
    }

    let root = rhs.pow(inverse);
    if even_numer {
        branches(base, vec![-root.clone(), root], var, steps)
    } else {
        step(base, root, var, steps)
    }
}

/// Solves `base^exp = rhs` for `exp`, where `base` is constant.
fn isolate_exponent(
    base: &SymExpr,
    exp: &SymExpr,
    lhs: &SymExpr,
    rhs: SymExpr,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    let b = value(base)?;
    if b <= 0.0 || b == 1.0 {
        return None;
    }
    if value(&rhs)? <= 0.0 {
        return out_of_domain(lhs, rhs, steps);
    }

    let log = |expr: SymExpr| SymExpr::call(Func::Log, vec![expr]);
    let new_rhs = if *base == SymExpr::constant(Const::E) {
        log(rhs)
    } else {
        log(rhs) * log(base.clone()).recip()
    };
    step(exp, new_rhs, var, steps)
}

/// Solves `func(arg) = rhs` for `arg`.
fn isolate_call(
    func: Func,
    arg: &SymExpr,
    lhs: &SymExpr,
    rhs: SymExpr,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    let r = value(&rhs)?;
    let pi = || SymExpr::constant(Const::Pi);
    let half_pi = std::f64::consts::FRAC_PI_2;

    match func {
        Func::Sin | Func::Cos if !(-1.0..=1.0).contains(&r) => out_of_domain(lhs, rhs, steps),
        Func::Sin => {
            // sin(a) = r  =>  a = asin(r) or a = pi - asin(r)
            let principal = SymExpr::call(Func::Asin, vec![rhs]);
            branches(arg, vec![principal.clone(), pi() + -principal], var, steps)
        },
        Func::Cos => {
            // cos(a) = r  =>  a = acos(r) or a = 2pi - acos(r)
            let principal = SymExpr::call(Func::Acos, vec![rhs]);
            let full_turn = SymExpr::Mul(vec![SymExpr::number(2), pi()]);
            branches(arg, vec![principal.clone(), full_turn + -principal], var, steps)
        },
        Func::Tan => step(arg, SymExpr::call(Func::Atan, vec![rhs]), var, steps),
        Func::Asin if r.abs() > half_pi => out_of_domain(lhs, rhs, steps),
        Func::Asin => step(arg, SymExpr::call(Func::Sin, vec![rhs]), var, steps),
        Func::Acos if !(0.0..=std::f64::consts::PI).contains(&r) => out_of_domain(lhs, rhs, steps),
        Func::Acos => step(arg, SymExpr::call(Func::Cos, vec![rhs]), var, steps),
        Func::Atan if r.abs() >= half_pi => out_of_domain(lhs, rhs, steps),
        Func::Atan => step(arg, SymExpr::call(Func::Tan, vec![rhs]), var, steps),
        Func::Log => step(arg, SymExpr::constant(Const::E).pow(rhs), var, steps),
        Func::Abs if r < 0.0 => out_of_domain(lhs, rhs, steps),
        Func::Abs if r == 0.0 => step(arg, rhs, var, steps),
        Func::Abs => branches(arg, vec![-rhs.clone(), rhs], var, steps),
        Func::Sqrt => step(arg, rhs.pow(SymExpr::number(2)), var, steps),
    }
}

/// Solves `lhs = rhs` for the variable, where `lhs` contains exactly one occurrence of the
/// variable and `rhs` contains none.
///
/// Returns the candidate solutions, which still need to be verified, or [`None`] if the equation
/// cannot be solved this way.
pub fn isolate(
    lhs: &SymExpr,
    rhs: SymExpr,
    var: &str,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Option<Vec<SymExpr>> {
    match lhs {
        SymExpr::Primary(Primary::Symbol(name)) if name == var => Some(vec![rhs]),
        SymExpr::Primary(Primary::Call(func, args)) => {
            let [arg] = args.as_slice() else {
                return None;
            };
            isolate_call(*func, arg, lhs, rhs, var, steps)
        },
        SymExpr::Primary(_) => None,
        SymExpr::Add(terms) => {
            // a + b = r  =>  a = r - b
            let (target, rest) = split_on_var(terms, var)?;
            step(target, rhs + -SymExpr::Add(rest), var, steps)
        },
        SymExpr::Mul(factors) => {
            // a * b = r  =>  a = r / b
            let (target, rest) = split_on_var(factors, var)?;
            let rest = simplify(&SymExpr::Mul(rest));
            if value(&rest)? == 0.0 {
                return None;
            }
            step(target, rhs * rest.recip(), var, steps)
        },
        SymExpr::Exp(base, exp) if base.contains_symbol(var) => {
            isolate_base(base, exp, lhs, rhs, var, steps)
        },
        SymExpr::Exp(base, exp) => isolate_exponent(base, exp, lhs, rhs, var, steps),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    fn solutions(lhs: &str, rhs: &str) -> Option<Vec<String>> {
        let lhs = simplify(&parse_expr(lhs));
        let rhs = simplify(&parse_expr(rhs));
        isolate(&lhs, rhs, "x", &mut ())
            .map(|solutions| solutions.iter().map(|s| simplify(s).to_string()).collect())
    }

    #[test]
    fn linear_layers() {
        assert_eq!(solutions("2x + 1", "7"), Some(vec!["3".to_string()]));
    }

    #[test]
    fn even_power_gives_both_signs() {
        assert_eq!(solutions("x^4", "16"), Some(vec!["-2".to_string(), "2".to_string()]));
    }

    #[test]
    fn odd_root_of_negative_number() {
        assert_eq!(solutions("x^3", "-8"), Some(vec!["-2".to_string()]));
    }

    #[test]
    fn square_root_is_never_negative() {
        let mut steps = Vec::new();
        let lhs = simplify(&parse_expr("sqrt(x)"));
        assert_eq!(isolate(&lhs, SymExpr::number(-1), "x", &mut steps), Some(Vec::new()));
        assert!(matches!(steps.last(), Some(SolveStep::OutOfDomain { .. })));
    }

    #[test]
    fn sine_has_two_solutions_per_period() {
        assert_eq!(
            solutions("sin(x)", "1/2"),
            Some(vec!["pi/6".to_string(), "5*pi/6".to_string()]),
        );
    }

    #[test]
    fn exponential() {
        assert_eq!(solutions("e^x", "1"), Some(vec!["0".to_string()]));
        assert_eq!(solutions("2^x", "-1"), Some(Vec::new()));
    }

    #[test]
    fn absolute_value() {
        assert_eq!(solutions("abs(x)", "3"), Some(vec!["-3".to_string(), "3".to_string()]));
    }
}
