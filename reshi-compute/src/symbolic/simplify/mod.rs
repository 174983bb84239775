//! Simplification of algebraic expressions.
//!
//! An expression is simplified bottom-up: the children of a node are simplified first, then the
//! rules in [`rules`] are applied to the node itself until none of them apply. Every rule either
//! reduces the complexity of the expression or moves it closer to a canonical form (numbers
//! folded into a single coefficient, like terms and like factors combined, exact powers
//! evaluated), so the process terminates. As a safeguard against pathological input, the total
//! number of rule applications in a single call is capped at [`PASS_LIMIT`].

pub mod rules;
pub mod step;

use super::{expr::{Primary, SymExpr}, step_collector::StepCollector};
pub use step::Step;

/// The maximum number of rule applications performed by a single call to [`simplify_with`].
pub const PASS_LIMIT: usize = 4096;

/// Simplifies the children of the given expression, leaving the node itself untouched.
fn simplify_children(
    expr: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
    budget: &mut usize,
) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(func, args)) => SymExpr::call(
            *func,
            args.iter().map(|arg| inner_simplify(arg, step_collector, budget)).collect(),
        ),
        SymExpr::Primary(_) => expr.clone(),
        // a sum or product of a single child is just that child
        SymExpr::Add(terms) => SymExpr::Add(
            terms.iter().map(|term| inner_simplify(term, step_collector, budget)).collect(),
        ).downgrade(),
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter().map(|factor| inner_simplify(factor, step_collector, budget)).collect(),
        ).downgrade(),
        SymExpr::Exp(base, exp) => inner_simplify(base, step_collector, budget)
            .pow(inner_simplify(exp, step_collector, budget)),
    }
}

fn inner_simplify(
    expr: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
    budget: &mut usize,
) -> SymExpr {
    let mut expr = simplify_children(expr, step_collector, budget);

    while *budget > 0 {
        match rules::all(&expr, step_collector) {
            Some(new_expr) => {
                *budget -= 1;
                // the rewritten node may have new, unsimplified children
                expr = simplify_children(&new_expr, step_collector, budget);
            },
            None => break,
        }
    }

    expr
}

/// Simplifies the given expression, reporting every rule that was applied to the given
/// [`StepCollector`].
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut budget = PASS_LIMIT;
    inner_simplify(expr, step_collector, &mut budget)
}

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, returning the simplified expression and the rules that were
/// applied, in order.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reshi_parser::{parser::{ast::Expr, Parser}, symbols::SymbolTable};
    use super::*;

    fn simplified(input: &str) -> String {
        let symbols = SymbolTable::standard();
        let expr = Parser::new(input, &symbols).try_parse_full::<Expr>().unwrap();
        simplify(&SymExpr::from(expr)).to_string()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(simplified("2+2"), "4");
        assert_eq!(simplified("10/4"), "5/2");
        assert_eq!(simplified("0.1 + 0.2"), "3/10");
        assert_eq!(simplified("(12/100)*150"), "18");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("2^-2"), "1/4");
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("x + x + x"), "3*x");
        assert_eq!(simplified("2x + 3 - x - 3"), "x");
        assert_eq!(simplified("x - x"), "0");
    }

    #[test]
    fn like_factors() {
        assert_eq!(simplified("x * x^2"), "x^3");
        assert_eq!(simplified("x / x"), "1");
        assert_eq!(simplified("(x^2)^3"), "x^6");
    }

    #[test]
    fn distribute_coefficient() {
        assert_eq!(simplified("2(x + 1)"), "2*x + 2");
        assert_eq!(simplified("-(x - 1)"), "-x + 1");
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(16)"), "4");
        assert_eq!(simplified("sqrt(8)"), "2*sqrt(2)");
        assert_eq!(simplified("sqrt(1/4)"), "1/2");
        assert_eq!(simplified("sqrt(2) * sqrt(2)"), "2");
        assert_eq!(simplified("sqrt(2) * sqrt(3)"), "sqrt(6)");
        assert_eq!(simplified("1/sqrt(2)"), "sqrt(2)/2");
        assert_eq!(simplified("8^(1/3)"), "2");
        assert_eq!(simplified("(-8)^(1/3)"), "-2");
        assert_eq!(simplified("4^(3/2)"), "8");
    }

    #[test]
    fn functions() {
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("tan(pi/4)"), "1");
        assert_eq!(simplified("sin(5pi/4)"), "-sqrt(2)/2");
        assert_eq!(simplified("asin(1/2)"), "pi/6");
        assert_eq!(simplified("acos(0)"), "pi/2");
        assert_eq!(simplified("atan(1)"), "pi/4");
        assert_eq!(simplified("ln(e^3)"), "3");
        assert_eq!(simplified("log(1)"), "0");
        assert_eq!(simplified("abs(-5)"), "5");
    }

    #[test]
    fn symbolic_stays_symbolic() {
        assert_eq!(simplified("sin(x)"), "sin(x)");
        assert_eq!(simplified("sqrt(2)"), "sqrt(2)");
        assert_eq!(simplified("pi + 1"), "pi + 1");
    }

    #[test]
    fn steps_are_reported() {
        let symbols = SymbolTable::standard();
        let expr = Parser::new("x + 0", &symbols).try_parse_full::<Expr>().unwrap();
        let (simplified, steps) = simplify_with_steps(&SymExpr::from(expr));
        assert_eq!(simplified.to_string(), "x");
        assert_eq!(steps, vec![Step::AddZero]);
    }
}
