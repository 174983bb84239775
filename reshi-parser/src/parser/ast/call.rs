use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr},
        error::kind,
        Parser,
    },
    symbols::Func,
    tokenizer::{Token, TokenKind},
};
use reshi_error::Error;
use std::{fmt, ops::Range};

/// A function call, such as `sqrt(16)`, `log(8, 2)`, or `sin^2 x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The function being called.
    pub func: Func,

    /// The name of the function as written. `ln` and `log` name the same function.
    pub name: String,

    /// The region of the source code the name was parsed from.
    pub name_span: Range<usize>,

    /// The power written between the name and the arguments, as in `sin^2(x)`. The call's result
    /// is raised to this power.
    pub power: Option<Box<Expr>>,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the rest of a call whose function name has already been consumed.
    ///
    /// The arguments may be written in parentheses, or, for a single argument, directly after
    /// the name, as in `sin x` or `ln 2`.
    pub(crate) fn parse_application(input: &mut Parser, func: Func, name: Token) -> Result<Self, Error> {
        let power = match input.eat(TokenKind::Exp) {
            Some(_) => Some(Box::new(Expr::parse_atom(input)?)),
            None => None,
        };

        let (args, end) = match input.eat(TokenKind::OpenParen) {
            Some(open) => {
                if input.peek_kind() == Some(TokenKind::CloseParen) {
                    return Err(missing_argument(input, &name));
                }

                let args = input.parse_delimited::<Expr>(TokenKind::Comma)?;
                let close = input.eat(TokenKind::CloseParen)
                    .ok_or_else(|| Error::new(vec![open.span], kind::UnclosedParenthesis { opening: true }))?;
                (args, close.span.end)
            },
            None if input.peek_kind().is_some_and(TokenKind::starts_operand) => {
                let arg = Binary::parse_power(input)?;
                let end = arg.span().end;
                (vec![arg], end)
            },
            None => return Err(missing_argument(input, &name)),
        };

        let arity = func.arity();
        if !arity.contains(&args.len()) {
            let expected = if arity.start() == arity.end() {
                arity.start().to_string()
            } else {
                format!("{} or {}", arity.start(), arity.end())
            };
            return Err(Error::new(vec![name.span.start..end], kind::WrongArity {
                name: name.lexeme.to_string(),
                expected,
                given: args.len(),
            }));
        }

        Ok(Self {
            func,
            name: name.lexeme.to_string(),
            name_span: name.span.clone(),
            power,
            args,
            span: name.span.start..end,
        })
    }
}

/// Creates the error for a function name with nothing to apply it to.
fn missing_argument(input: &Parser, name: &Token) -> Error {
    Error::new(
        vec![name.span.start..input.span().end],
        kind::MissingArgument { name: name.lexeme.to_string() },
    )
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(power) = &self.power {
            write!(f, "^{}", power)?;
        }

        write!(f, "(")?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "{}", first)?;
            for arg in rest {
                write!(f, ", {}", arg)?;
            }
        }
        write!(f, ")")
    }
}
