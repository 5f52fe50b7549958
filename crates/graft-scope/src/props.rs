//! The prop bridge: reactive accessors on a per-element scope container.
//!
//! Each upgraded element lazily gets one `PropScope`, a frame linked into
//! its scope chain. Binding a property installs a [`PropAccessor`] whose
//! reads evaluate the bound expression and whose writes assign through the
//! expression's path, or silently no-op when the expression is not a valid
//! write target.

use std::rc::Rc;

use graft_core::{BindError, ParseError, Value};
use graft_parser::{parse_expression, Expr, PropPath};

use crate::eval::{assign, EvalLater};
use crate::scope::Scope;

/// A get/set accessor pair backed by a parsed expression.
#[derive(Debug, Clone)]
pub struct PropAccessor {
    expr: Rc<Expr>,
    target: Option<PropPath>,
    outer: Scope,
}

impl PropAccessor {
    /// Parse `source` and capture the element's outer scope.
    pub fn new(source: &str, outer: &Scope) -> Result<Self, ParseError> {
        Ok(Self::from_expr(parse_expression(source)?, outer))
    }

    /// Build from an already parsed expression. Assignability is classified
    /// here, once, from the expression's shape.
    pub fn from_expr(expr: Expr, outer: &Scope) -> Self {
        let target = expr.assign_target().cloned();
        Self {
            expr: Rc::new(expr),
            target,
            outer: outer.clone(),
        }
    }

    /// Whether writes reach the scope or degrade to no-ops.
    pub fn is_assignable(&self) -> bool {
        self.target.is_some()
    }

    /// Read: evaluate the expression via the deferred evaluator. The
    /// evaluation callback fires before this returns.
    pub fn get(&self) -> Value {
        let mut result = Value::Null;
        EvalLater::from_parts(self.expr.clone(), self.outer.clone()).run(|v| result = v);
        result
    }

    /// Write: assign through the expression's path. Silent no-op for
    /// non-assignable expressions.
    pub fn set(&self, value: Value) {
        if let Some(path) = &self.target {
            assign(path, value, &self.outer);
        }
    }
}

/// The per-element prop container: a scope frame holding accessor bindings,
/// created lazily on first bind and dropped when the last one is torn down.
#[derive(Debug)]
pub struct PropScope {
    frame: Scope,
    outer: Scope,
}

impl PropScope {
    /// Create the container as a child frame of the element's outer scope.
    pub fn new(outer: &Scope) -> Self {
        Self {
            frame: outer.child(),
            outer: outer.clone(),
        }
    }

    /// The container frame. Descendant evaluation chains through it, so
    /// bound props shadow outer names.
    pub fn scope(&self) -> &Scope {
        &self.frame
    }

    /// Bind a property. Accessors capture the scope *outside* the
    /// container, so an expression may mention the property's own name
    /// without recursing. Rebinding a name overwrites.
    pub fn bind(&mut self, name: &str, source: &str) -> Result<PropAccessor, BindError> {
        if !is_valid_prop_name(name) {
            return Err(BindError::InvalidPropertyName { name: name.into() });
        }
        let accessor = PropAccessor::new(source, &self.outer)?;
        self.frame.define_prop(name, accessor.clone());
        Ok(accessor)
    }

    /// Tear down one binding. Returns `true` when the container holds no
    /// more accessors and should be discarded.
    pub fn unbind(&mut self, name: &str) -> bool {
        self.frame.remove(name);
        self.is_empty()
    }

    /// Whether no accessors remain bound.
    pub fn is_empty(&self) -> bool {
        self.frame.own_prop_count() == 0
    }
}

fn is_valid_prop_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
