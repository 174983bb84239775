//! The expression assistant: everything between the raw text a user typed and the answer shown
//! back to them.
//!
//! A request flows through these stages:
//!
//! 1. [`intent::interpret`] recognizes a few Russian-language requests, answering some directly
//!    and cutting others down to the expression they contain.
//! 2. [`preprocess::preprocess`] normalizes typographic operators and percentages.
//! 3. [`pipeline::run`] parses the expression, then simplifies it or, if it is an equation, solves
//!    it, recording every stage in a step trace.
//! 4. [`format::format_value`] renders the final value.
//!
//! [`pipeline::assist`] and [`pipeline::calculate`] tie the stages together for the two request
//! kinds.
//!
//! ```
//! use reshi_assist::pipeline::assist;
//! use reshi_parser::symbols::SymbolTable;
//!
//! let symbols = SymbolTable::standard();
//! let outcome = assist("реши 2x+3=7", &symbols).unwrap();
//! assert_eq!(outcome.result, "[2]");
//! ```

pub mod describe;
pub mod format;
pub mod intent;
pub mod pipeline;
pub mod preprocess;
