//! The table of names an expression may refer to.
//!
//! The table is built once with [`SymbolTable::standard`] and then only read. It holds exactly one
//! free variable, so every equation is solved for that variable.

use std::{collections::BTreeMap, ops::{Range, RangeInclusive}};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Const {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number.
    E,
}

impl Const {
    /// The name used when printing the constant.
    pub fn name(self) -> &'static str {
        match self {
            Const::Pi => "pi",
            Const::E => "e",
        }
    }
}

/// A function that can be applied in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,

    /// Natural logarithm, or logarithm to a given base when called with two arguments.
    Log,
    Sqrt,
    Abs,
}

impl Func {
    /// The name used when printing a call to the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
        }
    }

    /// The number of arguments the function accepts.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Func::Log => 1..=2,
            _ => 1..=1,
        }
    }
}

/// What a name in an expression refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The free variable.
    Variable,

    /// A constant.
    Constant(Const),

    /// A function.
    Function(Func),
}

/// The fixed mapping from names to the variable, constants, and functions they stand for.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    /// The name of the single free variable.
    variable: &'static str,

    /// Every allowed name, including the variable.
    entries: BTreeMap<&'static str, Binding>,
}

impl SymbolTable {
    /// Builds the standard table: the variable `x`, the constants `pi` and `e`, and the functions
    /// `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `log`, `ln` (same as `log`), `sqrt`, `abs`.
    pub fn standard() -> Self {
        let entries = BTreeMap::from([
            ("x", Binding::Variable),
            ("pi", Binding::Constant(Const::Pi)),
            ("e", Binding::Constant(Const::E)),
            ("sin", Binding::Function(Func::Sin)),
            ("cos", Binding::Function(Func::Cos)),
            ("tan", Binding::Function(Func::Tan)),
            ("asin", Binding::Function(Func::Asin)),
            ("acos", Binding::Function(Func::Acos)),
            ("atan", Binding::Function(Func::Atan)),
            ("log", Binding::Function(Func::Log)),
            ("ln", Binding::Function(Func::Log)),
            ("sqrt", Binding::Function(Func::Sqrt)),
            ("abs", Binding::Function(Func::Abs)),
        ]);

        Self { variable: "x", entries }
    }

    /// The name of the free variable.
    pub fn variable(&self) -> &'static str {
        self.variable
    }

    /// Looks up what the given name refers to.
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.entries.get(name).copied()
    }

    /// Returns an iterator over every allowed name, in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Splits a run of letters into a sequence of allowed names, such as `xsin` into `x` and
    /// `sin`, returning the byte range of each name. Longer names are preferred.
    ///
    /// Returns [`None`] if the run cannot be written as a sequence of allowed names.
    pub fn split(&self, name: &str) -> Option<Vec<Range<usize>>> {
        fn go(table: &SymbolTable, name: &str, start: usize, out: &mut Vec<Range<usize>>) -> bool {
            if start == name.len() {
                return true;
            }

            let mut candidates = table.names()
                .filter(|candidate| name[start..].starts_with(candidate))
                .collect::<Vec<_>>();
            candidates.sort_by_key(|candidate| std::cmp::Reverse(candidate.len()));

            for candidate in candidates {
                out.push(start..start + candidate.len());
                if go(table, name, start + candidate.len(), out) {
                    return true;
                }
                out.pop();
            }

            false
        }

        let mut out = Vec::new();
        go(self, name, 0, &mut out).then_some(out)
    }

    /// Suggests the allowed name closest to the given unknown name, if one is close enough to be
    /// a likely typo.
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        self.names()
            .map(|candidate| (levenshtein::levenshtein(name, candidate), candidate))
            .filter(|(distance, _)| *distance <= 2 && *distance < name.len())
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lookup() {
        let table = SymbolTable::standard();
        assert_eq!(table.variable(), "x");
        assert_eq!(table.get("x"), Some(Binding::Variable));
        assert_eq!(table.get("ln"), Some(Binding::Function(Func::Log)));
        assert_eq!(table.get("pi"), Some(Binding::Constant(Const::Pi)));
        assert_eq!(table.get("y"), None);
    }

    #[test]
    fn only_one_variable() {
        let table = SymbolTable::standard();
        let variables = table.names()
            .filter(|name| table.get(name) == Some(Binding::Variable))
            .count();
        assert_eq!(variables, 1);
    }

    #[test]
    fn split_runs_of_letters() {
        let table = SymbolTable::standard();
        assert_eq!(table.split("xsin"), Some(vec![0..1, 1..4]));
        assert_eq!(table.split("pix"), Some(vec![0..2, 2..3]));
        assert_eq!(table.split("xx"), Some(vec![0..1, 1..2]));
        assert_eq!(table.split("exp"), None);
        assert_eq!(table.split("y"), None);
    }

    #[test]
    fn suggestions() {
        let table = SymbolTable::standard();
        assert_eq!(table.suggest("sine"), Some("sin"));
        assert_eq!(table.suggest("sqr"), Some("sqrt"));
        assert_eq!(table.suggest("qwerty"), None);
    }
}
