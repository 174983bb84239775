//! Errors produced while parsing. Each error kind lives in [`kind`] and is wrapped in a
//! [`reshi_error::Error`] together with the spans it points at.

pub mod kind;
