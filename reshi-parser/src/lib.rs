//! Parser for the expressions accepted by the assistant: arithmetic over numbers, the constants
//! `pi` and `e`, the single free variable `x`, and a fixed set of functions.
//!
//! Parsing always happens against a [`symbols::SymbolTable`], which decides which names are
//! allowed and what they mean.
//!
//! ```
//! use reshi_parser::{parser::{ast::Expr, Parser}, symbols::SymbolTable};
//!
//! let symbols = SymbolTable::standard();
//! let expr = Parser::new("2x + sin^2 x", &symbols).try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2x + sin^2(x)");
//! ```

pub mod parser;
pub mod symbols;
pub mod tokenizer;
