//! Binding expression parser for Graft.
//!
//! Parses the small expression language used by `prop:` bindings:
//! literals, identifier/member paths, arithmetic, comparisons, and
//! boolean operators. Assignability is classified structurally at parse
//! time: an expression is a valid write target only when it is a bare
//! identifier or member path.

pub mod ast;
mod grammar;
mod lexer;

pub use ast::{BinaryOp, Expr, PropPath, UnaryOp};
pub use grammar::parse_expression;
