//! Simplification rules for trigonometric functions and their inverses.

mod table;

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use reshi_parser::symbols::{Const, Func};
use rug::Rational;
use std::collections::HashMap;

/// If the expression is a rational multiple of `pi`, returns the multiple.
///
/// - `0` -> `0`
/// - `pi` -> `1`
/// - `5/4*pi` -> `5/4`
fn pi_multiple(arg: &SymExpr) -> Option<Rational> {
    match arg {
        SymExpr::Primary(Primary::Number(n)) if *n == 0 => Some(rational(0)),
        SymExpr::Primary(Primary::Constant(Const::Pi)) => Some(rational(1)),
        SymExpr::Mul(factors) => match factors.as_slice() {
            [SymExpr::Primary(Primary::Number(n)), SymExpr::Primary(Primary::Constant(Const::Pi))]
            | [SymExpr::Primary(Primary::Constant(Const::Pi)), SymExpr::Primary(Primary::Number(n))] => {
                Some(n.clone())
            },
            _ => None,
        },
        _ => None,
    }
}

/// Creates the expression `k*pi`, in simplified form.
fn times_pi(k: Rational) -> SymExpr {
    let pi = SymExpr::constant(Const::Pi);
    if k == 0 {
        SymExpr::number(0)
    } else if k == 1 {
        pi
    } else {
        SymExpr::Mul(vec![SymExpr::number(k), pi])
    }
}

/// Normalizes the given angle to a fraction of a full turn and looks up its exact value in the
/// given table.
fn simplify_trig(arg: &SymExpr, table: &HashMap<Rational, SymExpr>) -> Option<SymExpr> {
    // example: compute sin(5pi/4)
    // compute normalized fraction: (5/4) / 2 = 5/8
    let turns = pi_multiple(arg)? / 2u32;

    // the fraction can be outside [0, 1), such as for negative angles
    let normalized = Rational::from(&turns - turns.clone().floor());
    table.get(&normalized).cloned()
}

/// Finds the given value in the given inverse table and returns the matching angle.
fn simplify_inverse_trig(arg: &SymExpr, table: &[(SymExpr, Rational)]) -> Option<SymExpr> {
    table.iter()
        .find(|(value, _)| value == arg)
        .map(|(_, k)| times_pi(k.clone()))
}

/// `sin(x)`
pub fn sin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Sin, |args| {
        simplify_trig(args.first()?, &table::SIN_TABLE)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Sin);
    Some(opt)
}

/// `cos(x)`
pub fn cos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Cos, |args| {
        simplify_trig(args.first()?, &table::COS_TABLE)
    })?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// `tan(x)`
pub fn tan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Tan, |args| {
        simplify_trig(args.first()?, &table::TAN_TABLE)
    })?;

    step_collector.push(Step::Tan);
    Some(opt)
}

/// `asin(x)`
pub fn asin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Asin, |args| {
        simplify_inverse_trig(args.first()?, &table::ASIN_TABLE)
    })?;

    step_collector.push(Step::Asin);
    Some(opt)
}

/// `acos(x)`
pub fn acos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Acos, |args| {
        simplify_inverse_trig(args.first()?, &table::ACOS_TABLE)
    })?;

    step_collector.push(Step::Acos);
    Some(opt)
}

/// `atan(x)`
pub fn atan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Atan, |args| {
        simplify_inverse_trig(args.first()?, &table::ATAN_TABLE)
    })?;

    step_collector.push(Step::Atan);
    Some(opt)
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    sin(expr, step_collector)
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
        .or_else(|| asin(expr, step_collector))
        .or_else(|| acos(expr, step_collector))
        .or_else(|| atan(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn call(func: Func, arg: SymExpr) -> SymExpr {
        SymExpr::call(func, vec![arg])
    }

    #[test]
    fn negative_angles_wrap_around() {
        // sin(-pi/2) = -1
        let angle = SymExpr::Mul(vec![SymExpr::number((-1, 2)), SymExpr::constant(Const::Pi)]);
        assert_eq!(sin(&call(Func::Sin, angle), &mut ()), Some(SymExpr::number(-1)));
    }

    #[test]
    fn large_angles_wrap_around() {
        // cos(7pi) = -1
        let angle = SymExpr::Mul(vec![SymExpr::constant(Const::Pi), SymExpr::number(7)]);
        assert_eq!(cos(&call(Func::Cos, angle), &mut ()), Some(SymExpr::number(-1)));
    }

    #[test]
    fn tan_is_undefined_at_right_angle() {
        let angle = SymExpr::Mul(vec![SymExpr::number((1, 2)), SymExpr::constant(Const::Pi)]);
        assert_eq!(tan(&call(Func::Tan, angle), &mut ()), None);
    }

    #[test]
    fn unknown_angles_are_kept() {
        assert_eq!(sin(&call(Func::Sin, SymExpr::number(1)), &mut ()), None);
        assert_eq!(sin(&call(Func::Sin, SymExpr::symbol("x")), &mut ()), None);
    }

    #[test]
    fn inverse_of_negative_value() {
        let mut steps = Vec::new();
        assert_eq!(
            asin(&call(Func::Asin, SymExpr::number((-1, 2))), &mut steps),
            Some(SymExpr::Mul(vec![SymExpr::number((-1, 6)), SymExpr::constant(Const::Pi)])),
        );
        assert_eq!(
            acos(&call(Func::Acos, SymExpr::number(-1)), &mut steps),
            Some(SymExpr::constant(Const::Pi)),
        );
        assert_eq!(steps, vec![Step::Asin, Step::Acos]);
    }
}
