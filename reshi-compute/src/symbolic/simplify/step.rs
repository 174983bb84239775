use std::fmt;

/// A rewriting rule that was applied while simplifying an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a + (b + c) = a + b + c`
    FlattenSum,

    /// `0 + a = a`
    AddZero,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// `a * (b * c) = a * b * c`
    FlattenProduct,

    /// `0 * a = 0`
    MultiplyZero,

    /// `2 * 3 * a = 6a`
    FoldNumbers,

    /// `1 * a = a`
    MultiplyOne,

    /// `a^b * a^c = a^(b + c)`
    CombineLikeFactors,

    /// `c * (a + b) = c*a + c*b`
    DistributeCoefficient,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`
    ZeroPower,

    /// `(a^m)^n = a^(m*n)`
    PowerOfPower,

    /// `(a*b)^n = a^n * b^n`
    DistributePower,

    /// `2^3 = 8`
    EvaluatePower,

    /// `a^(3/2) = a * a^(1/2)`
    SplitExponent,

    /// `sqrt(12) = 2*sqrt(3)`
    ExtractRoot,

    /// `sin(pi/6) = 1/2`
    Sin,

    /// `cos(pi/3) = 1/2`
    Cos,

    /// `tan(pi/4) = 1`
    Tan,

    /// `asin(1/2) = pi/6`
    Asin,

    /// `acos(1/2) = pi/3`
    Acos,

    /// `atan(1) = pi/4`
    Atan,

    /// `log(1) = 0`, `log(e^k) = k`
    Log,

    /// `abs(-2) = 2`
    Abs,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self {
            Step::FlattenSum => "a + (b + c) = a + b + c",
            Step::AddZero => "0 + a = a",
            Step::CombineLikeTerms => "m*a + n*a = (m + n)*a",
            Step::FlattenProduct => "a * (b * c) = a * b * c",
            Step::MultiplyZero => "0 * a = 0",
            Step::FoldNumbers => "multiply numbers together",
            Step::MultiplyOne => "1 * a = a",
            Step::CombineLikeFactors => "a^m * a^n = a^(m + n)",
            Step::DistributeCoefficient => "c * (a + b) = c*a + c*b",
            Step::PowerZero => "a^0 = 1",
            Step::PowerOne => "a^1 = a",
            Step::OnePower => "1^a = 1",
            Step::ZeroPower => "0^a = 0",
            Step::PowerOfPower => "(a^m)^n = a^(m*n)",
            Step::DistributePower => "(a*b)^n = a^n * b^n",
            Step::EvaluatePower => "evaluate an exact power",
            Step::SplitExponent => "a^(k + r) = a^k * a^r",
            Step::ExtractRoot => "sqrt(k^2 * a) = k*sqrt(a)",
            Step::Sin => "evaluate sin at a known angle",
            Step::Cos => "evaluate cos at a known angle",
            Step::Tan => "evaluate tan at a known angle",
            Step::Asin => "evaluate asin at a known value",
            Step::Acos => "evaluate acos at a known value",
            Step::Atan => "evaluate atan at a known value",
            Step::Log => "log(e^k) = k",
            Step::Abs => "evaluate abs of a number",
        };
        write!(f, "{}", rule)
    }
}
