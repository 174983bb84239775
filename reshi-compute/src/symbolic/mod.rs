//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`reshi_parser::parser::ast::Expr`] nodes produced by [`reshi_parser`], with the
//! main difference being that [`SymExpr`] nodes **flatten** out the tree structure, and store
//! every number as an exact rational.
//!
//! ```
//! use reshi_compute::symbolic::SymExpr;
//! use reshi_parser::{parser::{ast::Expr, Parser}, symbols::SymbolTable};
//!
//! let symbols = SymbolTable::standard();
//! let ast_expr = Parser::new("x + (pi + 1)", &symbols).try_parse_full::<Expr>().unwrap();
//!
//! let expr: SymExpr = ast_expr.into();
//! assert!(matches!(&expr, SymExpr::Add(terms) if terms.len() == 3));
//! ```
//!
//! # Simplification
//!
//! Expressions are reduced to a canonical form with [`simplify()`], which applies a set of
//! rewriting rules bottom-up until none of them apply. Each rule is a function that accepts an
//! expression and returns `Some(expr)` if it rewrote it.
//!
//! ```
//! use reshi_compute::symbolic::{simplify, SymExpr};
//! use reshi_parser::{parser::{ast::Expr, Parser}, symbols::SymbolTable};
//!
//! let symbols = SymbolTable::standard();
//! let ast_expr = Parser::new("x + x + x", &symbols).try_parse_full::<Expr>().unwrap();
//! let simplified = simplify(&ast_expr.into());
//!
//! assert_eq!(simplified.to_string(), "3*x");
//! ```
//!
//! # Solving
//!
//! [`solve()`] finds the real solutions of an equation in one variable, reporting how it got
//! there through a [`StepCollector`].

pub mod expr;
pub mod simplify;
pub mod solve;
pub mod step_collector;

pub use expr::{Primary, SymExpr};
pub use simplify::{simplify, simplify_with_steps};
pub use solve::{solve, SolveStep};
pub use step_collector::StepCollector;
