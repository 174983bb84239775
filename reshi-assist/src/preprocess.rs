//! Normalization of raw input into the form the parser accepts.

use once_cell::sync::Lazy;
use regex::Regex;

/// A number followed by a percent sign, such as `12%` or `2.5 %`.
static PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid percent pattern")
});

/// Normalizes the given expression:
///
/// 1. Leading and trailing whitespace is removed.
/// 2. The typographic signs `×`, `÷`, and `−` become `*`, `/`, and `-`.
/// 3. `:` becomes `/`, so `10:3` is a division.
/// 4. Every percentage `n%` becomes `(n/100)`.
///
/// Normalizing an already normalized string leaves it unchanged.
pub fn preprocess(expr: &str) -> String {
    let expr = expr.trim()
        .replace('×', "*")
        .replace('÷', "/")
        .replace('−', "-")
        .replace(':', "/");
    PERCENT.replace_all(&expr, "($1/100)").into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn typographic_operators() {
        assert_eq!(preprocess("  6 × 7 ÷ 2 − 1 "), "6 * 7 / 2 - 1");
        assert_eq!(preprocess("10:3"), "10/3");
    }

    #[test]
    fn percentages() {
        assert_eq!(preprocess("12% * 150"), "(12/100) * 150");
        assert_eq!(preprocess("2.5 %"), "(2.5/100)");
        assert_eq!(preprocess("5%+5%"), "(5/100)+(5/100)");
    }

    #[test]
    fn integer_percentages() {
        for n in [0, 1, 7, 20, 100, 12345] {
            assert_eq!(preprocess(&format!("{}%", n)), format!("({}/100)", n));
        }
    }

    #[test]
    fn idempotent() {
        for input in ["2+2", " 12% от 150 ", "3 × x = 7:2", "(1/100)", "sin(x)^2", "50 %"] {
            let once = preprocess(input);
            assert_eq!(preprocess(&once), once);
        }
    }
}
