//! Russian descriptions of the steps taken by the solver.

use reshi_compute::symbolic::{SolveStep, SymExpr};

/// Joins the expressions with `, `.
fn list(exprs: impl Iterator<Item = impl ToString>) -> String {
    exprs.map(|expr| expr.to_string()).collect::<Vec<_>>().join(", ")
}

/// Describes a step of the solver, solving for the variable `var`.
pub fn describe(step: &SolveStep, var: &str) -> String {
    match step {
        SolveStep::MoveToOneSide { expr } => format!("Переносим всё в одну сторону: {} = 0", expr),
        SolveStep::Identity => "Переменная сокращается, равенство выполняется всегда.".to_string(),
        SolveStep::Contradiction { value } => format!(
            "Переменная сокращается, остаётся неверное равенство: {} = 0",
            value,
        ),
        SolveStep::ClearDenominators { denominator, expr } => format!(
            "Умножаем на знаменатель {} (при {} = 0 корней нет): {} = 0",
            denominator,
            denominator,
            expr,
        ),
        SolveStep::Polynomial { degree, coefficients } => format!(
            "Многочлен степени {}, коэффициенты (от старшего): {}",
            degree,
            list(coefficients.iter().rev()),
        ),
        SolveStep::LinearRoot { root } => format!("Линейное уравнение: {} = {}", var, root),
        SolveStep::Discriminant { value } => format!("Дискриминант: D = {}", value),
        SolveStep::NoRealRoots => "D < 0, действительных корней нет.".to_string(),
        SolveStep::RationalRoot { root } => {
            format!("Подбором находим рациональный корень: {} = {}", var, root)
        },
        SolveStep::Isolate { lhs, rhs } => format!("Выражаем: {} = {}", lhs, rhs),
        SolveStep::OutOfDomain { lhs, rhs } => {
            format!("{} не может быть равно {}, решений нет", lhs, rhs)
        },
        SolveStep::Rejected { candidate } => {
            format!("Проверка не проходит, отбрасываем {} = {}", var, candidate)
        },
    }
}

/// Renders a list of solutions as `[a, b]`.
pub fn solutions(values: &[SymExpr]) -> String {
    format!("[{}]", list(values.iter()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn polynomial_coefficients_from_highest() {
        let step = SolveStep::Polynomial {
            degree: 2,
            coefficients: vec![SymExpr::number(-4), SymExpr::number(0), SymExpr::number(1)],
        };
        assert_eq!(
            describe(&step, "x"),
            "Многочлен степени 2, коэффициенты (от старшего): 1, 0, -4",
        );
    }

    #[test]
    fn roots_name_the_variable() {
        let step = SolveStep::LinearRoot { root: SymExpr::number(2) };
        assert_eq!(describe(&step, "x"), "Линейное уравнение: x = 2");
    }

    #[test]
    fn cleared_denominator() {
        let step = SolveStep::ClearDenominators {
            denominator: SymExpr::symbol("x"),
            expr: SymExpr::symbol("x") + SymExpr::number(-1),
        };
        assert_eq!(
            describe(&step, "x"),
            "Умножаем на знаменатель x (при x = 0 корней нет): x - 1 = 0",
        );
    }

    #[test]
    fn solution_list() {
        assert_eq!(solutions(&[]), "[]");
        assert_eq!(solutions(&[SymExpr::number(-2), SymExpr::number(2)]), "[-2, 2]");
    }
}
