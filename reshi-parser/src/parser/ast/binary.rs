use crate::{
    parser::{ast::{expr::Expr, unary::Unary}, Parser, Precedence},
    tokenizer::TokenKind,
};
use reshi_error::Error;
use std::{fmt, ops::Range};

/// The kind of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

impl BinOpKind {
    /// Returns the operator kind for the given token, if it is a binary operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Exp => Some(Self::Exp),
            _ => None,
        }
    }

    /// Returns the precedence of the operator.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Exp => Precedence::Exp,
        }
    }
}

/// A binary operator, along with where it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinOp {
    pub kind: BinOpKind,

    /// Whether the operator was written out or implied by two adjacent operands, as in `2x`.
    pub implicit: bool,

    /// The region of the source code the operator covers. For implicit multiplication, this is
    /// the empty gap between the two operands.
    pub span: Range<usize>,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            BinOpKind::Add => write!(f, "+"),
            BinOpKind::Sub => write!(f, "-"),
            BinOpKind::Mul => write!(f, "*"),
            BinOpKind::Div => write!(f, "/"),
            BinOpKind::Exp => write!(f, "^"),
        }
    }
}

/// A binary operation, such as `1 + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// The left-hand side of the operation.
    pub lhs: Box<Expr>,

    /// The operator.
    pub op: BinOp,

    /// The right-hand side of the operation.
    pub rhs: Box<Expr>,

    /// The region of the source code that this operation was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn join(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        })
    }

    /// Returns the operator kind of the current token if it has the given precedence.
    fn peek_op(input: &Parser, precedence: Precedence) -> Option<BinOpKind> {
        input.peek_kind()
            .and_then(BinOpKind::from_token)
            .filter(|kind| kind.precedence() == precedence)
    }

    /// Parses a sum or difference of terms, such as `x^2 - 2x + 1`.
    pub fn parse_sum(input: &mut Parser) -> Result<Expr, Error> {
        let mut lhs = Self::parse_product(input)?;

        while let Some(kind) = Self::peek_op(input, Precedence::Term) {
            let token = input.next_token()?;
            let rhs = Self::parse_product(input)?;
            lhs = Self::join(lhs, BinOp { kind, implicit: false, span: token.span }, rhs);
        }

        Ok(lhs)
    }

    /// Parses a product or quotient of factors. Two operands written next to each other, as in
    /// `2x` or `(x + 1)(x - 1)`, are multiplied.
    ///
    /// Implicit multiplication takes its right operand without a sign, so `2 -x` is a
    /// subtraction.
    pub fn parse_product(input: &mut Parser) -> Result<Expr, Error> {
        let mut lhs = Unary::parse_or_lower(input)?;

        loop {
            if let Some(kind) = Self::peek_op(input, Precedence::Factor) {
                let token = input.next_token()?;
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::join(lhs, BinOp { kind, implicit: false, span: token.span }, rhs);
            } else if input.peek_kind().is_some_and(TokenKind::starts_operand) {
                let rhs = Self::parse_power(input)?;
                let op = BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs.span().end..rhs.span().start,
                };
                lhs = Self::join(lhs, op, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    /// Parses an exponentiation, or a plain operand if there is no `^`. Exponentiation is
    /// right-associative, so `2^3^2` is `2^(3^2)`, and the exponent may carry a sign, as in `2^-1`.
    pub fn parse_power(input: &mut Parser) -> Result<Expr, Error> {
        let base = Expr::parse_atom(input)?;

        match input.eat(TokenKind::Exp) {
            Some(token) => {
                let exponent = Unary::parse_or_lower(input)?;
                Ok(Self::join(base, BinOp { kind: BinOpKind::Exp, implicit: false, span: token.span }, exponent))
            },
            None => Ok(base),
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op {
            BinOp { implicit: true, .. } => write!(f, "{}{}", self.lhs, self.rhs),
            BinOp { kind: BinOpKind::Exp, .. } => write!(f, "{}^{}", self.lhs, self.rhs),
            _ => write!(f, "{} {} {}", self.lhs, self.op, self.rhs),
        }
    }
}
