//! Simplification rules for power expressions, including exact evaluation of numeric powers and
//! roots.

use crate::primitive::{int, rational};
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer, Rational};

/// The largest integer exponent evaluated exactly.
const MAX_EXPONENT: u32 = 4096;

/// The largest number of bits the result of an exact evaluation may need.
const MAX_RESULT_BITS: u64 = 1 << 16;

/// The largest factor tried when pulling perfect powers out of a root.
const MAX_ROOT_FACTOR: u32 = 10_000;

/// Returns true if raising a number of the given size to the given power is cheap enough to do
/// exactly.
fn can_evaluate(base: &Rational, exp: u32) -> bool {
    let bits = base.numer().significant_bits().max(base.denom().significant_bits()) as u64;
    exp <= MAX_EXPONENT && bits * exp as u64 <= MAX_RESULT_BITS
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, where `a` is a positive number
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().is_some_and(|n| *n > 0) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// `(a^m)^n = a^(m*n)`, where `n` is an integer
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        let SymExpr::Exp(base, exp) = lhs else {
            return None;
        };

        Some((**base).clone().pow((**exp).clone() * rhs.clone()))
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `(a*b)^n = a^n * b^n`, where `n` is an integer
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        let SymExpr::Mul(factors) = lhs else {
            return None;
        };

        let new_factors = factors.iter()
            .map(|factor| factor.clone().pow(rhs.clone()))
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Evaluates a number raised to an integer power.
///
/// `2^3 = 8`
/// `2^-2 = 1/4`
fn integer_power(base: &Rational, exp: &Integer) -> Option<SymExpr> {
    let exp = exp.to_i32()?;
    if !can_evaluate(base, exp.unsigned_abs()) || (*base == 0 && exp < 0) {
        return None;
    }

    Some(SymExpr::number(Rational::from(base.pow(exp))))
}

/// Finds the exact `q`-th root of a positive integer, if it has one.
fn exact_root(n: &Integer, q: u32) -> Option<Integer> {
    let root = Integer::from(n.root_ref(q));
    if Integer::from((&root).pow(q)) == *n {
        Some(root)
    } else {
        None
    }
}

/// Finds the largest integer `k > 1` such that `k^q` divides the given positive integer.
fn largest_power_factor(n: &Integer, q: u32) -> Option<Integer> {
    let mut found = None;
    for k in 2..=MAX_ROOT_FACTOR {
        let power = Integer::from(int(k).pow(q));
        if power > *n {
            break;
        }
        if n.is_divisible(&power) {
            found = Some(int(k));
        }
    }
    found
}

/// Rewrites a number raised to a non-integer power, `b^(p/q)`, into a simpler exact form, or
/// returns [`None`] if it is already as simple as it gets.
fn rational_power(base: &Rational, exp: &Rational) -> Option<(SymExpr, Step)> {
    let p = exp.numer();
    let q = exp.denom().to_u32()?;

    if *base < 0 {
        // only odd roots of negative numbers are real
        if q % 2 == 0 {
            return None;
        }

        let magnitude = SymExpr::number(Rational::from(-base)).pow(SymExpr::number(exp.clone()));
        let expr = if p.is_odd() {
            SymExpr::Mul(vec![SymExpr::number(-1), magnitude])
        } else {
            magnitude
        };
        return Some((expr, Step::EvaluatePower));
    }

    let floor = exp.clone().floor();
    if floor != 0 {
        let fract = Rational::from(exp - &floor);
        let expr = SymExpr::Mul(vec![
            SymExpr::number(base.clone()).pow(SymExpr::number(floor)),
            SymExpr::number(base.clone()).pow(SymExpr::number(fract)),
        ]);
        return Some((expr, Step::SplitExponent));
    }

    if *base.denom() != 1 {
        let expr = SymExpr::Mul(vec![
            SymExpr::number(base.numer().clone()).pow(SymExpr::number(exp.clone())),
            SymExpr::number(base.denom().clone()).pow(SymExpr::number(Rational::from(-exp))),
        ]);
        return Some((expr, Step::EvaluatePower));
    }

    let n = base.numer();
    if *p != 1 {
        let p = p.to_u32()?;
        if !can_evaluate(base, p) {
            return None;
        }

        let expr = SymExpr::number(Integer::from(n.pow(p)))
            .pow(SymExpr::number(rational((1, q))));
        return Some((expr, Step::EvaluatePower));
    }

    if let Some(root) = exact_root(n, q) {
        return Some((SymExpr::number(root), Step::EvaluatePower));
    }

    let k = largest_power_factor(n, q)?;
    let rest = Integer::from(n / Integer::from((&k).pow(q)));
    let expr = SymExpr::Mul(vec![
        SymExpr::number(k),
        SymExpr::number(rest).pow(SymExpr::number(exp.clone())),
    ]);
    Some((expr, Step::ExtractRoot))
}

/// Evaluates powers of numbers exactly, where possible.
///
/// `2^10 = 1024`
/// `8^(1/3) = 2`
/// `(-8)^(1/3) = -2`
/// `12^(1/2) = 2*3^(1/2)`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let SymExpr::Exp(lhs, rhs) = expr else {
        return None;
    };
    let (base, exp) = (lhs.as_number()?, rhs.as_number()?);

    let (opt, step) = match rhs.as_integer() {
        Some(exp) => (integer_power(base, exp)?, Step::EvaluatePower),
        None => rational_power(base, exp)?,
    };

    step_collector.push(step);
    Some(opt)
}

/// Applies all power rules.
///
/// Every power rule either removes a power entirely or moves it towards a form with a smaller
/// exact base.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn power(base: impl Into<Rational>, exp: impl Into<Rational>) -> SymExpr {
        SymExpr::number(base).pow(SymExpr::number(exp))
    }

    #[test]
    fn integer_powers() {
        assert_eq!(evaluate_power(&power(2, 10), &mut ()), Some(SymExpr::number(1024)));
        assert_eq!(evaluate_power(&power(2, -2), &mut ()), Some(SymExpr::number((1, 4))));
        assert_eq!(evaluate_power(&power(0, -1), &mut ()), None);
    }

    #[test]
    fn huge_powers_stay_unevaluated() {
        assert_eq!(evaluate_power(&power(10, 100_000), &mut ()), None);
    }

    #[test]
    fn perfect_roots() {
        let mut steps = Vec::new();
        assert_eq!(evaluate_power(&power(16, (1, 2)), &mut steps), Some(SymExpr::number(4)));
        assert_eq!(evaluate_power(&power(27, (1, 3)), &mut steps), Some(SymExpr::number(3)));
        assert_eq!(steps, vec![Step::EvaluatePower, Step::EvaluatePower]);
    }

    #[test]
    fn square_factor_is_pulled_out() {
        let mut steps = Vec::new();
        assert_eq!(
            evaluate_power(&power(12, (1, 2)), &mut steps),
            Some(SymExpr::Mul(vec![SymExpr::number(2), power(3, (1, 2))])),
        );
        assert_eq!(steps, vec![Step::ExtractRoot]);
    }

    #[test]
    fn irreducible_root() {
        assert_eq!(evaluate_power(&power(2, (1, 2)), &mut ()), None);
        assert_eq!(evaluate_power(&power(-4, (1, 2)), &mut ()), None);
    }

    #[test]
    fn odd_root_of_negative_number() {
        assert_eq!(
            evaluate_power(&power(-8, (1, 3)), &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::number(-1), power(8, (1, 3))])),
        );
    }

    #[test]
    fn power_of_power_needs_integer_outer_exponent() {
        let x = SymExpr::symbol("x");
        let squared = x.clone().pow(SymExpr::number(2));
        assert_eq!(power_of_power(&squared.clone().pow(SymExpr::number((1, 2))), &mut ()), None);
        assert_eq!(
            power_of_power(&squared.pow(SymExpr::number(3)), &mut ()),
            Some(x.pow(SymExpr::Mul(vec![SymExpr::number(2), SymExpr::number(3)]))),
        );
    }
}
