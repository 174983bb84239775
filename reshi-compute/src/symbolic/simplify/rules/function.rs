//! Simplification rules for logarithms and absolute values.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use reshi_parser::symbols::{Const, Func};

/// `log(1) = 0`
/// `log(e) = 1`
/// `log(e^k) = k`
pub fn log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Log, |args| {
        match args.first()? {
            arg if arg.is_one() => Some(SymExpr::number(0)),
            SymExpr::Primary(Primary::Constant(Const::E)) => Some(SymExpr::number(1)),
            SymExpr::Exp(base, exp) if **base == SymExpr::constant(Const::E) => Some((**exp).clone()),
            _ => None,
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Log);
    Some(opt)
}

/// Returns true if every factor of the expression is a positive constant, such as `pi` or `e`.
fn is_positive_constant(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Constant(_)) => true,
        SymExpr::Mul(factors) => factors.iter().all(is_positive_constant),
        _ => false,
    }
}

/// `abs(-2) = 2`
/// `abs(-pi/2) = pi/2`
pub fn abs(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Abs, |args| {
        let (coefficient, rest) = args.first()?.split_coefficient();
        let magnitude = SymExpr::number(coefficient.abs());
        match rest {
            None => Some(magnitude),
            Some(rest) if is_positive_constant(&rest) => Some(magnitude * rest),
            Some(_) => None,
        }
    })?;

    step_collector.push(Step::Abs);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    log(expr, step_collector)
        .or_else(|| abs(expr, step_collector))
}
