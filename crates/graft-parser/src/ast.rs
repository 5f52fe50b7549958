//! Expression AST.

use std::fmt;

use graft_core::Value;
use smallvec::SmallVec;

/// A member path like `user.address.city`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropPath(pub SmallVec<[String; 4]>);

impl PropPath {
    /// Build a path from its segments. A path has at least one segment;
    /// passing none is a caller bug.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let segments: SmallVec<[String; 4]> = segments.into_iter().map(Into::into).collect();
        debug_assert!(!segments.is_empty(), "property path needs at least one segment");
        Self(segments)
    }

    /// The first segment: the name resolved against the scope chain.
    pub fn head(&self) -> &str {
        &self.0[0]
    }

    /// The segments after the head, navigated through map values.
    pub fn members(&self) -> &[String] {
        &self.0[1..]
    }
}

impl fmt::Display for PropPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A parsed binding expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Path(PropPath),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

impl Expr {
    /// The write target of this expression, when it has one.
    ///
    /// Only a bare identifier or member path is assignable; every other
    /// expression shape makes the owning accessor read-only.
    pub fn assign_target(&self) -> Option<&PropPath> {
        match self {
            Expr::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_target() {
        let path = Expr::Path(PropPath::new(["a", "b"]));
        assert_eq!(path.assign_target().unwrap().to_string(), "a.b");

        let literal = Expr::Literal(Value::Number(1.0));
        assert!(literal.assign_target().is_none());

        let sum = Expr::Binary {
            left: Box::new(Expr::Path(PropPath::new(["a"]))),
            op: BinaryOp::Add,
            right: Box::new(Expr::Literal(Value::Number(1.0))),
        };
        assert!(sum.assign_target().is_none());
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn test_empty_path_rejected() {
        PropPath::new(std::iter::empty::<String>());
    }

    #[test]
    fn test_path_display() {
        assert_eq!(PropPath::new(["user", "name"]).to_string(), "user.name");
        assert_eq!(PropPath::new(["count"]).head(), "count");
        assert!(PropPath::new(["count"]).members().is_empty());
    }
}
