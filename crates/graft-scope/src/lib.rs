//! Scope chain, expression evaluation, and the prop bridge.
//!
//! This crate handles:
//! - The scope-resolution chain (`Scope` frames with parent links)
//! - Evaluating parsed expressions against a scope
//! - The callback-style deferred evaluator (`EvalLater`)
//! - Reactive prop accessors and the per-element `PropScope` container

mod eval;
mod props;
mod scope;

pub use eval::{assign, evaluate, EvalLater};
pub use props::{PropAccessor, PropScope};
pub use scope::{Binding, Scope};
