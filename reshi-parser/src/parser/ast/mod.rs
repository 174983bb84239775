pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::{Binary, BinOp, BinOpKind};
pub use call::Call;
pub use expr::Expr;
pub use literal::{Literal, LitNum, LitSym};
pub use paren::Paren;
pub use unary::{Unary, UnaryOp, UnaryOpKind};
