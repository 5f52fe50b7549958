//! Expression evaluation against a scope chain.

use std::rc::Rc;

use graft_core::{ParseError, Value};
use graft_parser::{parse_expression, BinaryOp, Expr, PropPath, UnaryOp};
use indexmap::IndexMap;

use crate::scope::Scope;

/// Evaluate an expression. Undefined names and type mismatches produce
/// `Null` rather than errors.
pub fn evaluate(expr: &Expr, scope: &Scope) -> Value {
    match expr {
        Expr::Literal(value) => value.clone(),
        Expr::Path(path) => {
            let head = scope.get(path.head()).unwrap_or(Value::Null);
            path.members().iter().fold(head, |acc, segment| match acc {
                Value::Map(map) => map.get(segment).cloned().unwrap_or(Value::Null),
                _ => Value::Null,
            })
        }
        Expr::Unary { op, expr } => match op {
            UnaryOp::Not => Value::Bool(!evaluate(expr, scope).truthy()),
            UnaryOp::Neg => match evaluate(expr, scope) {
                Value::Number(n) => Value::Number(-n),
                _ => Value::Null,
            },
        },
        Expr::Binary { left, op, right } => match op {
            BinaryOp::And => {
                if !evaluate(left, scope).truthy() {
                    Value::Bool(false)
                } else {
                    Value::Bool(evaluate(right, scope).truthy())
                }
            }
            BinaryOp::Or => {
                if evaluate(left, scope).truthy() {
                    Value::Bool(true)
                } else {
                    Value::Bool(evaluate(right, scope).truthy())
                }
            }
            _ => binary_op(evaluate(left, scope), *op, evaluate(right, scope)),
        },
    }
}

fn binary_op(left: Value, op: BinaryOp, right: Value) -> Value {
    match op {
        BinaryOp::Add => match (&left, &right) {
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Value::Str(format!("{left}{right}"))
            }
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            _ => Value::Null,
        },
        BinaryOp::Sub => numeric(left, right, |a, b| a - b),
        BinaryOp::Mul => numeric(left, right, |a, b| a * b),
        BinaryOp::Div => numeric(left, right, |a, b| a / b),
        BinaryOp::Eq => Value::Bool(left == right),
        BinaryOp::Ne => Value::Bool(left != right),
        BinaryOp::Lt => compare(left, right, |o| o == std::cmp::Ordering::Less),
        BinaryOp::Le => compare(left, right, |o| o != std::cmp::Ordering::Greater),
        BinaryOp::Gt => compare(left, right, |o| o == std::cmp::Ordering::Greater),
        BinaryOp::Ge => compare(left, right, |o| o != std::cmp::Ordering::Less),
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit ops handled by evaluate"),
    }
}

fn numeric(left: Value, right: Value, f: impl Fn(f64, f64) -> f64) -> Value {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Value::Number(f(a, b)),
        _ => Value::Null,
    }
}

fn compare(left: Value, right: Value, f: impl Fn(std::cmp::Ordering) -> bool) -> Value {
    let ordering = match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    };
    Value::Bool(ordering.map(f).unwrap_or(false))
}

/// Assign a value through a member path.
///
/// The path head resolves to the innermost frame that defines it; a name
/// defined nowhere lands in the root frame. Missing intermediate maps are
/// created along the way.
pub fn assign(path: &PropPath, value: Value, scope: &Scope) {
    let target = scope
        .owning(path.head())
        .unwrap_or_else(|| scope.root_scope());

    if path.members().is_empty() {
        if !target.set(path.head(), value.clone()) {
            target.define(path.head(), value);
        }
        return;
    }

    let mut map = match target.get(path.head()) {
        Some(Value::Map(map)) => map,
        _ => IndexMap::new(),
    };
    {
        let members = path.members();
        let mut cursor = &mut map;
        for segment in &members[..members.len() - 1] {
            let entry = cursor
                .entry(segment.clone())
                .or_insert_with(|| Value::Map(IndexMap::new()));
            if !matches!(entry, Value::Map(_)) {
                *entry = Value::Map(IndexMap::new());
            }
            cursor = match entry {
                Value::Map(inner) => inner,
                _ => unreachable!("entry was just made a map"),
            };
        }
        cursor.insert(members[members.len() - 1].clone(), value);
    }
    let updated = Value::Map(map);
    if !target.set(path.head(), updated.clone()) {
        target.define(path.head(), updated);
    }
}

/// A deferred evaluator in the host framework's `evaluateLater` shape:
/// construction parses once, and each [`EvalLater::run`] invokes the
/// callback with the freshly computed value before returning.
#[derive(Debug, Clone)]
pub struct EvalLater {
    expr: Rc<Expr>,
    scope: Scope,
}

impl EvalLater {
    /// Parse `source` and capture `scope` for later runs.
    pub fn new(source: &str, scope: &Scope) -> Result<Self, ParseError> {
        Ok(Self {
            expr: Rc::new(parse_expression(source)?),
            scope: scope.clone(),
        })
    }

    pub(crate) fn from_parts(expr: Rc<Expr>, scope: Scope) -> Self {
        Self { expr, scope }
    }

    /// Evaluate and hand the result to `callback`. The callback fires
    /// before this returns.
    pub fn run(&self, callback: impl FnOnce(Value)) {
        callback(evaluate(&self.expr, &self.scope));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_with(pairs: &[(&str, Value)]) -> Scope {
        let scope = Scope::root();
        for (name, value) in pairs {
            scope.define(*name, value.clone());
        }
        scope
    }

    fn eval(source: &str, scope: &Scope) -> Value {
        evaluate(&parse_expression(source).unwrap(), scope)
    }

    #[test]
    fn test_arithmetic() {
        let scope = scope_with(&[("n", Value::Number(4.0))]);
        assert_eq!(eval("n * 2 + 1", &scope), Value::Number(9.0));
        assert_eq!(eval("10 / n", &scope), Value::Number(2.5));
        assert_eq!(eval("-n", &scope), Value::Number(-4.0));
    }

    #[test]
    fn test_string_concat() {
        let scope = scope_with(&[("name", Value::from("world"))]);
        assert_eq!(eval("'hello ' + name", &scope), Value::from("hello world"));
        assert_eq!(eval("name + 1", &scope), Value::from("world1"));
    }

    #[test]
    fn test_member_path() {
        let mut user = IndexMap::new();
        user.insert("name".to_string(), Value::from("ada"));
        let scope = scope_with(&[("user", Value::Map(user))]);
        assert_eq!(eval("user.name", &scope), Value::from("ada"));
        assert_eq!(eval("user.missing", &scope), Value::Null);
        assert_eq!(eval("absent.name", &scope), Value::Null);
    }

    #[test]
    fn test_comparisons_and_logic() {
        let scope = scope_with(&[("n", Value::Number(3.0))]);
        assert_eq!(eval("n < 5", &scope), Value::Bool(true));
        assert_eq!(eval("n >= 3 && n != 4", &scope), Value::Bool(true));
        assert_eq!(eval("n > 5 || false", &scope), Value::Bool(false));
        assert_eq!(eval("!n", &scope), Value::Bool(false));
        // mismatched types compare false
        assert_eq!(eval("n < 'abc'", &scope), Value::Bool(false));
    }

    #[test]
    fn test_assign_simple() {
        let scope = scope_with(&[("x", Value::Number(1.0))]);
        let child = scope.child();
        assign(
            &PropPath::new(["x"]),
            Value::Number(2.0),
            &child,
        );
        assert_eq!(scope.get("x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn test_assign_undefined_lands_in_root() {
        let root = Scope::root();
        let child = root.child();
        assign(&PropPath::new(["fresh"]), Value::Bool(true), &child);
        assert_eq!(root.get("fresh"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_assign_nested_creates_maps() {
        let scope = Scope::root();
        assign(
            &PropPath::new(["user", "address", "city"]),
            Value::from("paris"),
            &scope,
        );
        assert_eq!(eval("user.address.city", &scope), Value::from("paris"));
    }

    #[test]
    fn test_eval_later_callback_fires_synchronously() {
        let scope = scope_with(&[("n", Value::Number(7.0))]);
        let later = EvalLater::new("n + 1", &scope).unwrap();
        let mut seen = None;
        later.run(|v| seen = Some(v));
        assert_eq!(seen, Some(Value::Number(8.0)));

        // re-running reflects scope changes
        scope.define("n", Value::Number(10.0));
        let mut seen = None;
        later.run(|v| seen = Some(v));
        assert_eq!(seen, Some(Value::Number(11.0)));
    }
}
