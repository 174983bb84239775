use ariadne::Fmt;
use reshi_attrs::ErrorKind;
use reshi_error::EXPR;
use crate::tokenizer::TokenKind;

/// The largest decimal exponent accepted in a number literal such as `1e5`.
pub const MAX_LITERAL_EXPONENT: u32 = 10_000;

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "equations with `=` can only be solved by the assistant",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", lexeme),
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,

    /// The text of the token that was found.
    pub lexeme: String,
}

/// A number literal was written with an exponent too large to work with exactly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "number is too large",
    labels = [format!("the exponent must be at most {}", MAX_LITERAL_EXPONENT)],
)]
pub struct ExponentTooLarge;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A name that is not in the symbol table was used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", name),
    labels = ["this name is not allowed"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => format!("only the variable {}, the constants {}, and built-in functions can be used", "x".fg(EXPR), "pi, e".fg(EXPR)),
    },
)]
pub struct UnknownSymbol {
    /// The unknown name.
    pub name: String,

    /// The closest allowed name, if any is close.
    pub suggestion: Option<&'static str>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "`{}` takes {} argument{}, but {} {} given",
        name,
        expected,
        if expected == "1" { "" } else { "s" },
        given,
        if *given == 1 { "was" } else { "were" },
    ),
    labels = ["this call"],
)]
pub struct WrongArity {
    /// The name of the function.
    pub name: String,

    /// A description of the accepted number of arguments, such as `1` or `1 or 2`.
    pub expected: String,

    /// The number of arguments given.
    pub given: usize,
}

/// A function name was not followed by anything it could be applied to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", name),
    labels = ["this function needs an argument"],
    help = format!("write the argument in parentheses, like {}", format!("{}(x)", name).fg(EXPR)),
)]
pub struct MissingArgument {
    /// The name of the function.
    pub name: String,
}
