//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `a + (b + c) = a + b + c`
pub fn flatten_sum(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let new_terms = terms.iter()
            .fold(SymExpr::Add(Vec::new()), |sum, term| sum + term.clone());
        Some(new_terms)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenSum);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms, including numbers.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `2+3 = 5`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        // each group is a sum of coefficients, and the factors shared by the terms in the group
        // (`None` for plain numbers); the factors must be strictly equal
        let mut groups: Vec<(Rational, Option<SymExpr>)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coefficient, factors) = term.split_coefficient();
            match groups.iter_mut().find(|(_, other)| *other == factors) {
                Some((sum, _)) => *sum += coefficient,
                None => groups.push((coefficient, factors)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .map(|(coefficient, factors)| match factors {
                None => SymExpr::number(coefficient),
                Some(factors) if coefficient == 1 => factors,
                Some(factors) => SymExpr::number(coefficient) * factors,
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten_sum(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn zero_terms_are_removed() {
        let expr = SymExpr::Add(vec![SymExpr::number(0), SymExpr::symbol("x")]);
        assert_eq!(add_zero(&expr, &mut ()), Some(SymExpr::symbol("x")));
    }

    #[test]
    fn numbers_are_combined() {
        let expr = SymExpr::Add(vec![SymExpr::number(2), SymExpr::symbol("x"), SymExpr::number((1, 2))]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(SymExpr::Add(vec![SymExpr::number((5, 2)), SymExpr::symbol("x")])),
        );
    }

    #[test]
    fn nothing_to_combine() {
        let expr = SymExpr::Add(vec![SymExpr::number(2), SymExpr::symbol("x")]);
        assert_eq!(combine_like_terms(&expr, &mut ()), None);
    }
}
