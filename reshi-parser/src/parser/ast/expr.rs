use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::{Literal, LitNum, LitSym}, paren::Paren, unary::Unary},
        error::kind,
        Parse,
        Parser,
    },
    symbols::Binding,
    tokenizer::TokenKind,
};
use reshi_error::Error;
use std::{fmt, ops::Range};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses the smallest self-contained operand: a number, a name, a function call, or a
    /// parenthesized expression.
    pub(crate) fn parse_atom(input: &mut Parser) -> Result<Self, Error> {
        const OPERAND: &[TokenKind] = &[
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Name,
            TokenKind::OpenParen,
        ];

        let Some(token) = input.current_token().cloned() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TokenKind::Int | TokenKind::Float => {
                let exponent = token.lexeme
                    .split_once(['e', 'E'])
                    .map(|(_, exp)| exp.trim_start_matches(['+', '-']));
                if let Some(exp) = exponent {
                    if exp.parse::<u32>().map_or(true, |exp| exp > kind::MAX_LITERAL_EXPONENT) {
                        return Err(Error::new(vec![token.span], kind::ExponentTooLarge));
                    }
                }

                input.next_token()?;
                Ok(Expr::Literal(Literal::Number(LitNum {
                    value: token.lexeme.to_string(),
                    span: token.span,
                })))
            },
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Expr::Paren),
            TokenKind::Name => {
                input.next_token()?;
                match input.symbols().get(token.lexeme) {
                    Some(Binding::Function(func)) => Call::parse_application(input, func, token).map(Expr::Call),
                    Some(binding) => Ok(Expr::Literal(Literal::Symbol(LitSym {
                        name: token.lexeme.to_string(),
                        binding,
                        span: token.span,
                    }))),
                    None => Err(Error::new(vec![token.span], kind::UnknownSymbol {
                        name: token.lexeme.to_string(),
                        suggestion: input.symbols().suggest(token.lexeme),
                    })),
                }
            },
            TokenKind::CloseParen => Err(Error::new(vec![token.span], kind::UnclosedParenthesis { opening: false })),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: OPERAND,
                found,
                lexeme: token.lexeme.to_string(),
            })),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        Binary::parse_sum(input)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

impl From<Unary> for Expr {
    fn from(unary: Unary) -> Self {
        Expr::Unary(unary)
    }
}

impl From<Binary> for Expr {
    fn from(binary: Binary) -> Self {
        Expr::Binary(binary)
    }
}
