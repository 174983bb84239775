//! Recognition of a few Russian-language requests.
//!
//! Three kinds of requests are recognized, tried in this order:
//!
//! 1. converting a decimal to a common fraction (`дробь 3.8112 в обычную`),
//! 2. taking a percentage of a number (`20 процентов от 150`),
//! 3. an imperative verb followed by an expression (`реши 2x+3=7`).
//!
//! The first two are answered directly. The third only strips the verb, and the expression that
//! follows it goes through the usual pipeline. Text without Cyrillic letters is never
//! recognized.

use crate::format::format_float;
use once_cell::sync::Lazy;
use regex::Regex;
use rug::{Integer, Rational};

/// A recognized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The request was answered completely.
    Answer {
        steps: Vec<String>,
        result: String,
    },

    /// The request wraps an expression, which should be computed in place of the original text.
    Rewrite {
        expression: String,
        steps: Vec<String>,
    },
}

static CYRILLIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[а-яё]").expect("valid cyrillic pattern")
});

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-?[0-9]+(?:[.,][0-9]+)?").expect("valid number pattern")
});

static PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-?[0-9]+(?:[.,][0-9]+)?)\s*процент").expect("valid percent pattern")
});

static OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"от\s+(-?[0-9]+(?:[.,][0-9]+)?)").expect("valid base pattern")
});

/// Verbs that introduce an expression, from highest to lowest priority.
const VERBS: [&str; 3] = ["реши", "посчитай", "вычисли"];

/// Converts the first number in the text to a reduced common fraction.
fn fraction(low: &str) -> Intent {
    let Some(m) = NUMBER.find(low) else {
        return Intent::Answer {
            steps: vec!["Не нашёл число для перевода в дробь.".to_string()],
            result: "?".to_string(),
        };
    };

    let number = m.as_str().replace(',', ".");
    let mut steps = vec![format!("Нашёл число: {}", number)];

    let Some((_, decimals)) = number.split_once('.') else {
        steps.push("Число целое, переводить в дробь не нужно.".to_string());
        return Intent::Answer { steps, result: number };
    };

    let digits = decimals.len();
    let pure = number.replace('.', "");
    let (Ok(numer), Ok(digits_u32)) = (pure.parse::<Integer>(), u32::try_from(digits)) else {
        steps.push("Число целое, переводить в дробь не нужно.".to_string());
        return Intent::Answer { steps, result: number };
    };
    let denom = Integer::from(Integer::u_pow_u(10, digits_u32));
    let reduced = Rational::from((numer.clone(), denom));

    steps.push(format!("{} = {} / 10^{}", number, numer, digits));
    steps.push(format!("Сокращаем дробь: {}/10^{} = {}", numer, digits, reduced));

    let (p, q) = reduced.into_numer_denom();
    Intent::Answer { steps, result: format!("{}/{}", p, q) }
}

/// Parses a number that may use a comma as the decimal separator.
fn parse_decimal(s: &str) -> Option<f64> {
    s.replace(',', ".").parse().ok()
}

/// Takes a percentage of a number, if both the percentage and the number are present.
fn percentage(low: &str) -> Option<Intent> {
    let a = parse_decimal(PERCENT.captures(low)?.get(1)?.as_str())?;
    let b = parse_decimal(OF.captures(low)?.get(1)?.as_str())?;
    let result = b * (a / 100.0);

    Some(Intent::Answer {
        steps: vec![
            format!("Проценты: {:?}% от {:?}", a, b),
            format!("Переводим проценты в число: {:?}% = {:?}/100", a, a),
            format!("Вычисляем: {:?} * {:?}/100 = {:?}", b, a, result),
        ],
        result: format_float(result),
    })
}

/// Lowercases the text, also returning for every byte of the lowercased text the byte offset of
/// the character in the original text it came from.
fn lowercase_with_offsets(text: &str) -> (String, Vec<usize>) {
    let mut low = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        for lower in c.to_lowercase() {
            low.push(lower);
            offsets.extend(std::iter::repeat(i).take(lower.len_utf8()));
        }
    }
    (low, offsets)
}

/// Extracts the expression following the highest-priority verb present in the text.
fn imperative(text: &str, low: &str, offsets: &[usize]) -> Option<Intent> {
    let (idx, verb) = VERBS.iter()
        .find_map(|verb| low.find(verb).map(|idx| (idx, verb)))?;

    let end = idx + verb.len();
    let start = offsets.get(end).copied().unwrap_or(text.len());
    let expression = text[start..]
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '.'));

    if expression.is_empty() {
        return None;
    }

    Some(Intent::Rewrite {
        expression: expression.to_string(),
        steps: vec![format!("Выделяю выражение: {}", expression)],
    })
}

/// Recognizes a Russian-language request in the given text.
///
/// Returns [`None`] if the text is not a recognized request, in which case it should be treated
/// as an expression.
pub fn interpret(raw: &str) -> Option<Intent> {
    let text = raw.trim();
    let (low, offsets) = lowercase_with_offsets(text);
    if !CYRILLIC.is_match(&low) {
        return None;
    }

    if low.contains("дроб") {
        return Some(fraction(&low));
    }

    if low.contains("процент") {
        if let Some(intent) = percentage(&low) {
            return Some(intent);
        }
    }

    imperative(text, &low, &offsets)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn answer(steps: &[&str], result: &str) -> Option<Intent> {
        Some(Intent::Answer {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            result: result.to_string(),
        })
    }

    fn rewrite(expression: &str) -> Option<Intent> {
        Some(Intent::Rewrite {
            expression: expression.to_string(),
            steps: vec![format!("Выделяю выражение: {}", expression)],
        })
    }

    #[test]
    fn decimal_to_fraction() {
        assert_eq!(interpret("дробь 3.8112 в обычную"), answer(&[
            "Нашёл число: 3.8112",
            "3.8112 = 38112 / 10^4",
            "Сокращаем дробь: 38112/10^4 = 2382/625",
        ], "2382/625"));
    }

    #[test]
    fn decimal_comma() {
        assert_eq!(interpret("Переведи 0,25 в дробь"), answer(&[
            "Нашёл число: 0.25",
            "0.25 = 25 / 10^2",
            "Сокращаем дробь: 25/10^2 = 1/4",
        ], "1/4"));
    }

    #[test]
    fn negative_and_whole_decimals() {
        let Some(Intent::Answer { result, .. }) = interpret("дробь -1.5") else {
            panic!("expected an answer");
        };
        assert_eq!(result, "-3/2");

        let Some(Intent::Answer { result, .. }) = interpret("дробь 2.0") else {
            panic!("expected an answer");
        };
        assert_eq!(result, "2/1");
    }

    #[test]
    fn integer_needs_no_fraction() {
        assert_eq!(interpret("дробь 7"), answer(&[
            "Нашёл число: 7",
            "Число целое, переводить в дробь не нужно.",
        ], "7"));
    }

    #[test]
    fn fraction_without_number() {
        assert_eq!(
            interpret("сделай дробь"),
            answer(&["Не нашёл число для перевода в дробь."], "?"),
        );
    }

    #[test]
    fn percent_of_number() {
        assert_eq!(interpret("20 процентов от 150"), answer(&[
            "Проценты: 20.0% от 150.0",
            "Переводим проценты в число: 20.0% = 20.0/100",
            "Вычисляем: 150.0 * 20.0/100 = 30.0",
        ], "30"));
    }

    #[test]
    fn percent_with_decimals() {
        let Some(Intent::Answer { result, .. }) = interpret("12,5 процента от 80") else {
            panic!("expected an answer");
        };
        assert_eq!(result, "10");
    }

    #[test]
    fn percent_without_base_falls_through() {
        assert_eq!(interpret("посчитай 20 процентов"), rewrite("20 процентов"));
        assert_eq!(interpret("20 процентов"), None);
    }

    #[test]
    fn imperative_verbs() {
        assert_eq!(interpret("реши 2x+3=7"), rewrite("2x+3=7"));
        assert_eq!(interpret("посчитай: 2+2."), rewrite("2+2"));
        assert_eq!(interpret("  вычисли ,sin(pi/6)  "), rewrite("sin(pi/6)"));
    }

    #[test]
    fn imperative_keeps_original_case() {
        assert_eq!(interpret("Пожалуйста, РЕШИ 2X = 4"), rewrite("2X = 4"));
    }

    #[test]
    fn verb_priority() {
        // `реши` wins even though `вычисли` comes first
        assert_eq!(interpret("вычисли или реши x^2=4"), rewrite("x^2=4"));
    }

    #[test]
    fn verb_with_nothing_after_it() {
        assert_eq!(interpret("реши"), None);
        assert_eq!(interpret("реши :."), None);
    }

    #[test]
    fn non_cyrillic_text() {
        assert_eq!(interpret("2+2"), None);
        assert_eq!(interpret("drob 3.5"), None);
        assert_eq!(interpret("20 procentov ot 150"), None);
        assert_eq!(interpret("0.5 to fraction"), None);
        assert_eq!(interpret("fraction 3.8112"), None);
        assert_eq!(interpret("20 percent of 150"), None);
        assert_eq!(interpret("solve 2x+3=7"), None);
        assert_eq!(interpret(""), None);
    }

    #[test]
    fn unrecognized_cyrillic_text() {
        assert_eq!(interpret("привет"), None);
    }
}
