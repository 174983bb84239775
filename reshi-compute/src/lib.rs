//! Exact symbolic manipulation and numerical evaluation of expressions parsed by
//! [`reshi_parser`].
//!
//! The [`symbolic`] module holds the expression tree used for simplification and equation
//! solving, where every number is an exact rational. The [`numerical`] module evaluates such a
//! tree to an arbitrary-precision float.

pub mod consts;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
