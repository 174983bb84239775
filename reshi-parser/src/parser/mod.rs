pub mod ast;
pub mod error;

use crate::{symbols::SymbolTable, tokenizer::{tokenize_complete, Token, TokenKind}};
use error::kind;
use reshi_error::{Error, ErrorKind};
use std::ops::Range;

/// A high-level parser for expressions. This is the type to use to parse an arbitrary piece of
/// input into an abstract syntax tree.
///
/// Names are resolved against the given [`SymbolTable`] while parsing. Runs of letters that are
/// not a known name, such as `xsin`, are split into known names (`x sin`) when possible.
#[derive(Debug, Clone)]
pub struct Parser<'source, 'sym> {
    /// The tokens that this parser is currently parsing. Whitespace is removed.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The names the expression may use.
    symbols: &'sym SymbolTable,
}

impl<'source, 'sym> Parser<'source, 'sym> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str, symbols: &'sym SymbolTable) -> Self {
        let tokens = tokenize_complete(source)
            .into_vec()
            .into_iter()
            .filter(|token| !token.is_whitespace())
            .flat_map(|token| split_name(token, symbols))
            .collect();

        Self { tokens, cursor: 0, symbols }
    }

    /// The symbol table names are resolved against.
    pub fn symbols(&self) -> &'sym SymbolTable {
        self.symbols
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the current token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Advances past the current token if it is of the given kind, returning it.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        if self.peek_kind() == Some(kind) {
            self.next_token().ok()
        } else {
            None
        }
    }

    /// Speculatively parses a value from the given stream of tokens. If parsing fails, the cursor
    /// is moved back to where it was before the attempt.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses values separated by the given delimiter, stopping at the first token that is not
    /// the delimiter. At least one value must be present.
    pub fn parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let mut values = vec![T::parse(self)?];
        while self.eat(delimiter).is_some() {
            values.push(T::parse(self)?);
        }
        Ok(values)
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Splits a name token that is not in the symbol table into tokens for each allowed name it is
/// made of. Tokens that are not names, are already allowed, or cannot be split are left as-is.
fn split_name<'source>(token: Token<'source>, symbols: &SymbolTable) -> Vec<Token<'source>> {
    if token.kind != TokenKind::Name || symbols.get(token.lexeme).is_some() {
        return vec![token];
    }

    match symbols.split(token.lexeme) {
        Some(parts) => parts.into_iter()
            .map(|range| Token {
                span: token.span.start + range.start..token.span.start + range.end,
                kind: TokenKind::Name,
                lexeme: &token.lexeme[range],
            })
            .collect(),
        None => vec![token],
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and implicit multiplication, which
    /// separate factors.
    Factor,

    /// Precedence of unary negation (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::{Binary, BinOp, BinOpKind},
        call::Call,
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::{Unary, UnaryOp, UnaryOpKind},
    };
    use crate::symbols::{Binding, Const, Func};

    fn parse(input: &str) -> Result<Expr, Error> {
        let symbols = SymbolTable::standard();
        let mut parser = Parser::new(input, &symbols);
        parser.try_parse_full::<Expr>()
    }

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, binding: Binding, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), binding, span }))
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.8112").unwrap(), num("3.8112", 0..6));
    }

    #[test]
    fn literal_scientific() {
        assert_eq!(parse("2.5E-3").unwrap(), num("2.5E-3", 0..6));
        assert_eq!(parse("2e").unwrap().to_string(), "2e");
    }

    #[test]
    fn literal_exponent_too_large() {
        let err = parse("1e99999").unwrap_err();
        assert_eq!(err.spans, vec![0..7]);
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(parse("1 + 2 * 3").unwrap(), Expr::Binary(Binary {
            lhs: Box::new(num("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: Box::new(num("3", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2x").unwrap(), Expr::Binary(Binary {
            lhs: Box::new(num("2", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("x", Binding::Variable, 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_binds_tighter_than_division() {
        // `1/2x` is `(1/2) * x`, not `1 / (2x)`
        let expr = parse("1/2x").unwrap();
        assert_eq!(expr.to_string(), "1 / 2x");
        let Expr::Binary(bin) = expr else { panic!("expected binary expression") };
        assert!(bin.op.implicit);
    }

    #[test]
    fn exponent_is_right_associative() {
        let expr = parse("2^3^2").unwrap();
        let Expr::Binary(bin) = expr else { panic!("expected binary expression") };
        assert_eq!(*bin.lhs, num("2", 0..1));
        assert!(matches!(*bin.rhs, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Exp, .. }, .. })));
    }

    #[test]
    fn negation_below_exponent() {
        // `-x^2` is `-(x^2)`
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", Binding::Variable, 1..2)),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: Box::new(num("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(parse("2^-1").unwrap().to_string(), "2^-1");
    }

    #[test]
    fn call_with_parentheses() {
        assert_eq!(parse("sqrt(16)").unwrap(), Expr::Call(Call {
            func: Func::Sqrt,
            name: "sqrt".to_string(),
            name_span: 0..4,
            power: None,
            args: vec![num("16", 5..7)],
            span: 0..8,
        }));
    }

    #[test]
    fn implicit_function_application() {
        assert_eq!(parse("sin x").unwrap().to_string(), "sin(x)");
        assert_eq!(parse("ln e").unwrap().to_string(), "ln(e)");
    }

    #[test]
    fn function_exponentiation() {
        let expr = parse("sin^2(x)").unwrap();
        let Expr::Call(call) = expr else { panic!("expected call") };
        assert_eq!(call.power.as_deref(), Some(&num("2", 4..5)));
        assert_eq!(call.args, vec![sym("x", Binding::Variable, 6..7)]);
    }

    #[test]
    fn log_with_base() {
        let expr = parse("log(8, 2)").unwrap();
        let Expr::Call(call) = expr else { panic!("expected call") };
        assert_eq!(call.args.len(), 2);
    }

    #[test]
    fn split_names() {
        assert_eq!(parse("2pix").unwrap().to_string(), "2pix");
        let expr = parse("pix").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(sym("pi", Binding::Constant(Const::Pi), 0..2)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 2..2 },
            rhs: Box::new(sym("x", Binding::Variable, 2..3)),
            span: 0..3,
        }));
    }

    #[test]
    fn parenthesized_product() {
        let expr = parse("(x + 1)(x - 1)").unwrap();
        let Expr::Binary(bin) = expr else { panic!("expected binary expression") };
        assert!(bin.op.implicit);
        assert!(matches!(*bin.lhs, Expr::Paren(Paren { .. })));
        assert!(matches!(*bin.rhs, Expr::Paren(Paren { .. })));
    }

    #[test]
    fn percent_expansion_parses() {
        assert_eq!(parse("(12/100)*150").unwrap().to_string(), "(12 / 100) * 150");
    }

    #[test]
    fn error_unknown_symbol() {
        let err = parse("2y + 1").unwrap_err();
        assert_eq!(err.spans, vec![1..2]);
        assert_eq!(err.to_string(), "unknown symbol `y`");
    }

    #[test]
    fn error_unclosed_parenthesis() {
        let err = parse("(x + 1").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(err.to_string(), "unclosed parenthesis");
    }

    #[test]
    fn error_empty_parenthesis() {
        let err = parse("2 * ()").unwrap_err();
        assert_eq!(err.to_string(), "missing expression inside parenthesis");
    }

    #[test]
    fn error_empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(err.to_string(), "unexpected end of input");
    }

    #[test]
    fn error_equals_sign() {
        let err = parse("2x = 4").unwrap_err();
        assert_eq!(err.spans, vec![3..4]);
        assert_eq!(err.to_string(), "expected end of input");
    }

    #[test]
    fn error_wrong_arity() {
        let err = parse("sin(1, 2)").unwrap_err();
        assert_eq!(err.to_string(), "`sin` takes 1 argument, but 2 were given");
    }

    #[test]
    fn error_missing_argument() {
        let err = parse("sqrt").unwrap_err();
        assert_eq!(err.to_string(), "missing argument for `sqrt`");
    }

    #[test]
    fn error_stray_symbol() {
        let err = parse("5 % 3").unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
    }
}
