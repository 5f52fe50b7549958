//! The scope-resolution chain.
//!
//! A `Scope` is a frame of named bindings with an optional parent. Lookups
//! walk the chain outward; writes land in the innermost frame that defines
//! the name. A binding is either a plain value or a reactive prop accessor,
//! which re-evaluates its expression on every read.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use graft_core::Value;
use indexmap::IndexMap;

use crate::props::PropAccessor;

/// A handle to one frame in the scope chain. Cheap to clone; clones share
/// the same frame.
#[derive(Clone)]
pub struct Scope {
    inner: Rc<RefCell<Frame>>,
}

struct Frame {
    vars: IndexMap<String, Binding>,
    parent: Option<Scope>,
}

/// A single named binding in a scope frame.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A plain stored value.
    Value(Value),
    /// A reactive accessor; reads evaluate, writes assign through.
    Prop(PropAccessor),
}

impl Scope {
    /// Create a root scope with no parent.
    pub fn root() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Frame {
                vars: IndexMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child frame linked to this scope.
    pub fn child(&self) -> Scope {
        Scope {
            inner: Rc::new(RefCell::new(Frame {
                vars: IndexMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// The parent frame, if any.
    pub fn parent(&self) -> Option<Scope> {
        self.inner.borrow().parent.clone()
    }

    /// Define (or overwrite) a plain value binding in this frame.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.inner
            .borrow_mut()
            .vars
            .insert(name.into(), Binding::Value(value));
    }

    /// Define (or overwrite) a prop accessor binding in this frame.
    pub fn define_prop(&self, name: impl Into<String>, accessor: PropAccessor) {
        self.inner
            .borrow_mut()
            .vars
            .insert(name.into(), Binding::Prop(accessor));
    }

    /// Resolve a name through the chain. Prop bindings evaluate on read.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let (binding, parent) = {
                let frame = current.inner.borrow();
                (frame.vars.get(name).cloned(), frame.parent.clone())
            };
            if let Some(binding) = binding {
                return Some(match binding {
                    Binding::Value(value) => value,
                    Binding::Prop(accessor) => accessor.get(),
                });
            }
            current = parent?;
        }
    }

    /// Write a name through the chain. Returns `false` when no frame
    /// defines it. Writes to prop bindings delegate to the accessor, so a
    /// non-assignable prop absorbs the write silently.
    pub fn set(&self, name: &str, value: Value) -> bool {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut frame = current.inner.borrow_mut();
                match frame.vars.get_mut(name) {
                    Some(Binding::Value(slot)) => {
                        *slot = value;
                        return true;
                    }
                    Some(Binding::Prop(accessor)) => {
                        let accessor = accessor.clone();
                        drop(frame);
                        accessor.set(value);
                        return true;
                    }
                    None => frame.parent.clone(),
                }
            };
            match parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    /// Remove a binding from this frame only.
    pub fn remove(&self, name: &str) -> bool {
        self.inner.borrow_mut().vars.shift_remove(name).is_some()
    }

    /// The innermost frame (searching outward from here) that defines `name`.
    pub(crate) fn owning(&self, name: &str) -> Option<Scope> {
        let mut current = self.clone();
        loop {
            let (has, parent) = {
                let frame = current.inner.borrow();
                (frame.vars.contains_key(name), frame.parent.clone())
            };
            if has {
                return Some(current);
            }
            current = parent?;
        }
    }

    /// The outermost frame of the chain.
    pub(crate) fn root_scope(&self) -> Scope {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Number of prop accessor bindings in this frame.
    pub(crate) fn own_prop_count(&self) -> usize {
        self.inner
            .borrow()
            .vars
            .values()
            .filter(|b| matches!(b, Binding::Prop(_)))
            .count()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.inner.borrow();
        f.debug_struct("Scope")
            .field("vars", &frame.vars.keys().collect::<Vec<_>>())
            .field("has_parent", &frame.parent.is_some())
            .finish()
    }
}
