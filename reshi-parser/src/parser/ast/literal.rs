use crate::symbols::Binding;
use std::{fmt, ops::Range};

/// A number literal, such as `16` or `3.8112`. The digits are kept as written, so no precision is
/// lost before the number reaches the symbolic engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitNum {
    /// The digits of the number, possibly including a decimal point.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A name that refers to the variable or a constant, such as `x` or `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitSym {
    /// The name as written.
    pub name: String,

    /// What the name refers to.
    pub binding: Binding,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => write!(f, "{}", num.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
        }
    }
}
