//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](reshi_parser::parser::ast::expr::Expr) type from `reshi_parser` is a recursive
//! `enum` that represents the AST of a mathematical expression. It's convenient for parsing, but
//! not so much for algebraic manipulation.
//!
//! This module defines a separate [`SymExpr`], which recursively flattens the AST into lists of
//! terms or factors, depending on the operation. Subtraction is stored as addition of a term
//! multiplied by `-1`, and division as multiplication by a factor raised to the power of `-1`.
//! Every number is an exact [`Rational`], so `0.1 + 0.2` is exactly `3/10`.
//!
//! # Strict equality
//!
//! Determining if two expressions are semantically equal is extremely difficult in general,
//! because there are an infinite number of ways to represent the same expression. Instead, the
//! [`PartialEq`] implementation for [`SymExpr`] implements **strict equality**: two expressions
//! are strictly equal if they are the same kind of node, with strictly equal children, where the
//! terms of a sum and the factors of a product may appear in any order.
//!
//! Strict equality can report that two semantically equal expressions are different (such as
//! `2(x + 1)` and `2x + 2`), but it never reports that two different expressions are equal.
//! Simplification rules rely on it to find like terms and like factors.

mod fmt;
mod iter;

use crate::primitive::{int, rational, rational_from_decimal};
use iter::ExprIter;
use reshi_parser::{
    parser::ast::{
        binary::BinOpKind,
        expr::Expr as AstExpr,
        literal::Literal,
        unary::UnaryOpKind,
    },
    symbols::{Binding, Const, Func},
};
use rug::{Integer, Rational};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg};

/// A single term / factor, such as a number, the variable, or a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational number, such as `2`, `-3/4`, or `0.5` (stored as `1/2`).
    Number(Rational),

    /// A named constant, such as `pi` or `e`.
    Constant(Const),

    /// A variable, such as `x`.
    Symbol(String),

    /// A function call, such as `sin(x)`.
    ///
    /// `sqrt(a)` is never stored as a call; it is the power `a^(1/2)`.
    Call(Func, Vec<SymExpr>),
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a number expression.
    pub fn number(n: impl Into<Rational>) -> Self {
        Self::Primary(Primary::Number(n.into()))
    }

    /// Creates a variable expression.
    pub fn symbol(name: &str) -> Self {
        Self::Primary(Primary::Symbol(name.to_string()))
    }

    /// Creates a constant expression.
    pub fn constant(c: Const) -> Self {
        Self::Primary(Primary::Constant(c))
    }

    /// Creates a function call expression.
    pub fn call(func: Func, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(func, args))
    }

    /// Creates a power expression. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the reciprocal of this expression, `self^-1`. No simplification is done, except
    /// for non-zero numbers, which are inverted directly.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Number(n)) if n != 0 => Self::number(n.recip()),
            expr => expr.pow(Self::number(-1)),
        }
    }

    /// Returns the square root of this expression, `self^(1/2)`. No simplification is done.
    pub fn sqrt(self) -> Self {
        self.pow(Self::number((1, 2)))
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`], returns the contained number.
    pub fn into_number(self) -> Option<Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`] with no fractional part, returns a reference to
    /// the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()
            .filter(|n| *n.denom() == 1)
            .map(|n| n.numer())
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 0)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the given variable appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.count_symbol(name) > 0
    }

    /// Returns the number of times the given variable appears in the expression.
    pub fn count_symbol(&self, name: &str) -> usize {
        self.post_order_iter()
            .filter(|expr| expr.as_symbol() == Some(name))
            .count()
    }

    /// Returns true if no variable appears anywhere in the expression, meaning it stands for a
    /// single number.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter().all(|expr| expr.as_symbol().is_none())
    }

    /// Returns the numerical coefficient of this expression and the remaining factors, if any.
    ///
    /// - `5` -> `(5, None)`
    /// - `3*x` -> `(3, Some(x))`
    /// - `1/4*x*pi` -> `(1/4, Some(x*pi))`
    /// - `x` -> `(1, Some(x))`
    pub fn split_coefficient(&self) -> (Rational, Option<SymExpr>) {
        match self {
            Self::Primary(Primary::Number(n)) => (n.clone(), None),
            Self::Mul(factors) => {
                let mut coefficient = rational(1);
                let mut rest = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.as_number() {
                        Some(n) => coefficient *= n,
                        None => rest.push(factor.clone()),
                    }
                }

                if rest.is_empty() {
                    (coefficient, None)
                } else {
                    (coefficient, Some(Self::Mul(rest).downgrade()))
                }
            },
            expr => (rational(1), Some(expr.clone())),
        }
    }

    /// Replaces every occurrence of the given variable with the given expression. No
    /// simplification is done.
    pub fn substitute(&self, name: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == name => value.clone(),
            Self::Primary(Primary::Call(func, args)) => Self::call(
                *func,
                args.iter().map(|arg| arg.substitute(name, value)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(name, value)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(name, value)).collect()),
            Self::Exp(base, exp) => base.substitute(name, value).pow(exp.substitute(name, value)),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::number(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::number(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// Two expressions are strictly equal if:
/// - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
/// [`SymExpr::Add`], etc.).
/// - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
/// - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
/// terms / factors, in any order.
/// - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }

                // match each element with a distinct partner, so that `x + x` is not equal to
                // `x + y + ...` with a repeated `x`
                let mut used = vec![false; rhs.len()];
                lhs.iter().all(|lhs| {
                    let partner = (0..rhs.len()).find(|&idx| !used[idx] && lhs == &rhs[idx]);
                    match partner {
                        Some(idx) => {
                            used[idx] = true;
                            true
                        },
                        None => false,
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => {
                // the tokenizer only produces digits and a decimal point
                Self::number(rational_from_decimal(&num.value).unwrap_or_default())
            },
            AstExpr::Literal(Literal::Symbol(sym)) => match sym.binding {
                Binding::Constant(c) => Self::constant(c),
                Binding::Variable | Binding::Function(_) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let mut args = call.args.into_iter().map(Self::from);
                let first = args.next().unwrap_or_else(|| Self::number(0));
                let value = match (call.func, args.next()) {
                    (Func::Sqrt, _) => first.sqrt(),
                    // log(a, b) is the logarithm of `a` to base `b`
                    (Func::Log, Some(base)) => Self::call(Func::Log, vec![first])
                        * Self::call(Func::Log, vec![base]).recip(),
                    (func, _) => Self::call(func, vec![first]),
                };

                match call.power {
                    Some(power) => value.pow(Self::from(*power)),
                    None => value,
                }
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
                UnaryOpKind::Pos => Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + -rhs,
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => lhs * rhs.pow(Self::number(-1)),
                    BinOpKind::Exp => lhs.pow(rhs),
                }
            },
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are combined in
/// one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::number(-n),
            expr => Self::number(int(-1)) * expr,
        }
    }
}
