//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::rational;
use rug::Rational;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a*(b*c) = a*b*c`
pub fn flatten_product(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let new_factors = factors.iter()
            .fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor.clone());
        Some(new_factors)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenProduct);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Multiplies every number in a product into a single coefficient.
///
/// `2*a*3 = 6*a`
pub fn fold_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let mut coefficient = rational(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_number() {
                Some(n) => coefficient *= n,
                None => new_factors.push(factor.clone()),
            }
        }

        new_factors.insert(0, SymExpr::number(coefficient));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Utility function to extract the base and exponent of an expression. If the expression is not
/// [`SymExpr::Exp`], the exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn split_power(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        expr => (expr.clone(), SymExpr::number(1)),
    }
}

/// Combines like factors. Plain numbers are left to [`fold_numbers`].
///
/// `a^b*a^c = a^(b+c)`
/// `2^(1/2)*3^(1/2) = 6^(1/2)`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut numbers = Vec::new();
        let mut powers: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(factors.len());

        for factor in factors {
            if factor.is_number() {
                numbers.push(factor.clone());
                continue;
            }

            // bases must be strictly equal
            // if they are, apply a^b*a^c = a^(b+c)
            let (base, exp) = split_power(factor);
            match powers.iter_mut().find(|(other, _)| *other == base) {
                Some((_, sum)) => *sum += exp,
                None => powers.push((base, exp)),
            }
        }

        // positive numbers raised to the same fractional power can share the power
        // apply a^c*b^c = (a*b)^c
        let mut merged: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(powers.len());
        for (base, exp) in powers {
            let partner = match (base.as_number(), exp.as_number()) {
                (Some(n), Some(e)) if *n > 0 && *e.denom() != 1 => merged.iter()
                    .position(|(other_base, other_exp)| {
                        other_base.as_number().is_some_and(|m| *m > 0) && *other_exp == exp
                    }),
                _ => None,
            };

            if let (Some(idx), Some(n)) = (partner, base.as_number()) {
                let product = merged[idx].0.as_number()
                    .map(|m| Rational::from(m * n))
                    .unwrap_or_else(|| n.clone());
                merged[idx].0 = SymExpr::number(product);
                continue;
            }

            merged.push((base, exp));
        }

        if numbers.len() + merged.len() == factors.len() {
            return None;
        }

        let new_factors = numbers.into_iter()
            .chain(merged.into_iter().map(|(base, exp)| {
                if exp.is_one() {
                    base
                } else {
                    base.pow(exp)
                }
            }))
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// `c*(a+b) = c*a + c*b`, where `c` is a number
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let [coefficient, SymExpr::Add(terms)] = factors else {
            return None;
        };
        coefficient.as_number()?;

        let new_terms = terms.iter()
            .map(|term| coefficient.clone() * term.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules except distribution will reduce the complexity of the expression.
/// Distribution is applied last, and only over a single numeric coefficient.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten_product(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| distribute_coefficient(expr, step_collector))
}
