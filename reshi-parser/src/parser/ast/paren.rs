use crate::{
    parser::{
        ast::expr::Expr,
        error::kind,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use reshi_error::Error;
use std::{fmt, ops::Range};

/// A parenthesized expression, such as `(x + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression, removing every layer of parentheses.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &*self.expr;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the owned innermost expression, removing every layer of parentheses.
    pub fn into_innermost(self) -> Expr {
        let mut inner = *self.expr;
        while let Expr::Paren(paren) = inner {
            inner = *paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.next_token()?;
        if open.kind != TokenKind::OpenParen {
            return Err(Error::new(vec![open.span], kind::UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: open.kind,
                lexeme: open.lexeme.to_string(),
            }));
        }

        if let Some(close) = input.eat(TokenKind::CloseParen) {
            return Err(Error::new(vec![open.span.start..close.span.end], kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close = input.eat(TokenKind::CloseParen)
            .ok_or_else(|| Error::new(vec![open.span.clone()], kind::UnclosedParenthesis { opening: true }))?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
