use crate::{
    parser::{ast::{binary::Binary, expr::Expr}, Parser},
    tokenizer::TokenKind,
};
use reshi_error::Error;
use std::{fmt, ops::Range};

/// The kind of a unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    /// Negation, `-x`.
    Neg,

    /// Unary plus, `+x`. It has no effect on the value.
    Pos,
}

/// A unary operator, along with where it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            UnaryOpKind::Neg => write!(f, "-"),
            UnaryOpKind::Pos => write!(f, "+"),
        }
    }
}

/// A unary operation, such as `-x`.
///
/// Negation binds more loosely than exponentiation, so `-x^2` is `-(x^2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    /// The operand of the operator.
    pub operand: Box<Expr>,

    /// The operator.
    pub op: UnaryOp,

    /// The region of the source code that this operation was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary operation, or falls through to an exponentiation or a plain operand if
    /// there is no leading sign.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let kind = match input.peek_kind() {
            Some(TokenKind::Sub) => UnaryOpKind::Neg,
            Some(TokenKind::Add) => UnaryOpKind::Pos,
            _ => return Binary::parse_power(input),
        };

        let token = input.next_token()?;
        let operand = Self::parse_or_lower(input)?;
        let span = token.span.start..operand.span().end;

        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op: UnaryOp { kind, span: token.span },
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}
