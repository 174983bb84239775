//! The two request paths: assisting with free-form text, and plain calculation.

use crate::{
    describe::{describe, solutions},
    format::format_value,
    intent::{interpret, Intent},
    preprocess::preprocess,
};
use reshi_compute::symbolic::{simplify, solve, SolveStep, SymExpr};
use reshi_error::Error;
use reshi_parser::{parser::{ast::Expr, Parser}, symbols::SymbolTable};
use tracing::debug;

/// The answer to a request, along with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Every stage the request went through, in order.
    pub steps: Vec<String>,

    /// The final answer.
    pub result: String,
}

/// Parses the given text into a symbolic expression.
pub fn parse(input: &str, symbols: &SymbolTable) -> Result<SymExpr, Error> {
    let expr = Parser::new(input, symbols).try_parse_full::<Expr>()?;
    Ok(SymExpr::from(expr))
}

/// Parses both sides of an equation, split on the first `=`. The spans of errors in the right
/// side point into the full equation.
pub fn parse_equation(
    lhs: &str,
    rhs: &str,
    symbols: &SymbolTable,
) -> Result<(SymExpr, SymExpr), Error> {
    let left = parse(lhs, symbols)?;
    let right = parse(rhs, symbols).map_err(|err| err.shifted(lhs.len() + 1))?;
    Ok((left, right))
}

/// Computes the expression, appending every stage to `steps`, and returns the result.
///
/// If the expression contains `=`, it is solved as an equation for the variable of the symbol
/// table. Otherwise, it is simplified and formatted.
///
/// The spans of a returned error point into the preprocessed expression, not the given one.
pub fn run(expression: &str, symbols: &SymbolTable, steps: &mut Vec<String>) -> Result<String, Error> {
    let cleaned = preprocess(expression);
    steps.push(format!("Исходное выражение: {}", expression));
    steps.push(format!("После нормализации: {}", cleaned));

    if let Some((lhs, rhs)) = cleaned.split_once('=') {
        debug!(equation = %cleaned, "equation mode");
        let (lhs, rhs) = parse_equation(lhs, rhs, symbols)?;
        steps.push(format!("Уравнение: {} = {}", lhs, rhs));

        let var = symbols.variable();
        let mut solver_steps = Vec::<SolveStep>::new();
        let values = solve(&lhs, &rhs, var, &mut solver_steps)?;
        steps.extend(solver_steps.iter().map(|step| describe(step, var)));
        debug!(solutions = values.len(), "solved");

        if values.is_empty() {
            steps.push("Решений не найдено.".to_string());
            return Ok("нет решений".to_string());
        }

        let result = solutions(&values);
        steps.push(format!("Решения: {}", result));
        return Ok(result);
    }

    let expr = parse(&cleaned, symbols)?;
    steps.push(format!("Символьная форма: {}", expr));

    let simplified = simplify(&expr);
    steps.push(format!("Упрощение: {}", simplified));

    let result = format_value(&simplified);
    steps.push(format!("Результат: {}", result));
    Ok(result)
}

/// Answers a free-form request, which may be a Russian-language request or an expression.
pub fn assist(raw: &str, symbols: &SymbolTable) -> Result<Outcome, Error> {
    let mut steps = Vec::new();
    let expression = match interpret(raw) {
        Some(Intent::Answer { steps, result }) => {
            debug!(%result, "answered directly");
            return Ok(Outcome { steps, result });
        },
        Some(Intent::Rewrite { expression, steps: intent_steps }) => {
            debug!(%expression, "extracted expression");
            steps.extend(intent_steps);
            expression
        },
        None => raw.to_string(),
    };

    let result = run(&expression, symbols, &mut steps)?;
    Ok(Outcome { steps, result })
}

/// Computes the value of an expression, without recognizing requests or solving equations.
pub fn calculate(raw: &str, symbols: &SymbolTable) -> Result<String, Error> {
    let expr = parse(&preprocess(raw), symbols)?;
    Ok(format_value(&simplify(&expr)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn assist_str(raw: &str) -> Outcome {
        assist(raw, &SymbolTable::standard()).unwrap()
    }

    fn calculate_str(raw: &str) -> String {
        calculate(raw, &SymbolTable::standard()).unwrap()
    }

    #[test]
    fn fraction_request() {
        assert_eq!(assist_str("дробь 3.8112 в обычную").result, "2382/625");
    }

    #[test]
    fn percent_request() {
        let outcome = assist_str("20 процентов от 150");
        assert_eq!(outcome.result, "30");
        assert_eq!(outcome.steps.len(), 3);
    }

    #[test]
    fn linear_equation() {
        let outcome = assist_str("2x+3=7");
        assert_eq!(outcome.result, "[2]");
        assert_eq!(outcome.steps[0], "Исходное выражение: 2x+3=7");
        assert_eq!(outcome.steps[1], "После нормализации: 2x+3=7");
        assert_eq!(outcome.steps[2], "Уравнение: 2*x + 3 = 7");
        assert_eq!(outcome.steps.last().unwrap(), "Решения: [2]");
        assert!(!outcome.steps.iter().any(|step| step.contains("Решений не найдено")));
    }

    #[test]
    fn imperative_equation() {
        let outcome = assist_str("реши 2x+3=7");
        assert_eq!(outcome.result, "[2]");
        assert_eq!(outcome.steps[0], "Выделяю выражение: 2x+3=7");
        assert_eq!(outcome.steps[1], "Исходное выражение: 2x+3=7");
    }

    #[test]
    fn unsatisfiable_equation() {
        let outcome = assist_str("x=x+1");
        assert_eq!(outcome.result, "нет решений");
        assert_eq!(outcome.steps.last().unwrap(), "Решений не найдено.");
    }

    #[test]
    fn quadratic_equation() {
        assert_eq!(assist_str("x^2-4=0").result, "[-2, 2]");
    }

    #[test]
    fn rational_equation() {
        let outcome = assist_str("(x+1)/(x-1)=2");
        assert_eq!(outcome.result, "[3]");
        assert!(outcome.steps.iter().any(|step| step.starts_with("Умножаем на знаменатель")));
        assert_eq!(assist_str("x/(x-1)=1/(x-1)").result, "нет решений");
    }

    #[test]
    fn root_never_negative() {
        assert_eq!(assist_str("sqrt(x)=-1").result, "нет решений");
    }

    #[test]
    fn expression_steps() {
        let outcome = assist_str("2+2");
        assert_eq!(outcome.result, "4");
        assert_eq!(outcome.steps, vec![
            "Исходное выражение: 2+2",
            "После нормализации: 2+2",
            "Символьная форма: 2 + 2",
            "Упрощение: 4",
            "Результат: 4",
        ]);
    }

    #[test]
    fn typographic_input() {
        assert_eq!(assist_str("6 × 7 − 2").result, "40");
        assert_eq!(assist_str("50% × 8").result, "4");
    }

    #[test]
    fn non_cyrillic_is_computed() {
        assert_eq!(assist_str("sin(pi/6)").result, "0.5");
        assert_eq!(assist_str("1.5").result, "1.5");
    }

    #[test]
    fn verb_with_nothing_after_it() {
        // the text is computed as is, and `реши` is not a known name
        let err = assist("реши", &SymbolTable::standard()).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn calculate_expressions() {
        assert_eq!(calculate_str("2+2"), "4");
        assert_eq!(calculate_str("1/3"), "0.333333333333");
        assert_eq!(calculate_str("12% : 4"), "0.03");
        assert_eq!(calculate_str("x + x"), "2*x");
    }

    #[test]
    fn calculate_scientific_notation() {
        assert_eq!(calculate_str("1e5"), "100000");
        assert_eq!(calculate_str("2.5E-3"), "0.0025");
        assert_eq!(calculate_str("1e-3 * 2"), "0.002");
        // no exponent digits, so this is `2 * e`
        assert_eq!(calculate_str("2e"), calculate_str("2*e"));
    }

    #[test]
    fn calculate_rejects_equations() {
        assert!(calculate("x=1", &SymbolTable::standard()).is_err());
    }

    #[test]
    fn unknown_symbol() {
        let err = assist("y + 1", &SymbolTable::standard()).unwrap_err();
        assert_eq!(err.to_string(), "unknown symbol `y`");
    }

    #[test]
    fn error_in_right_side_points_into_equation() {
        let err = assist("x = 1 + y", &SymbolTable::standard()).unwrap_err();
        assert_eq!(err.spans, vec![8..9]);
    }
}
