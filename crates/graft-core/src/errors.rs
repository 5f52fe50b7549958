//! Error types for the Graft engine.

use thiserror::Error;

/// Top-level error type for the Graft engine.
#[derive(Debug, Error)]
pub enum GraftError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Expand(#[from] ExpandError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Errors during expression parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected input at offset {offset}: {found:?}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Trailing input after expression: {rest:?}")]
    TrailingInput { rest: String },

    #[error("Empty expression")]
    EmptyExpression,
}

/// Errors during component registration and upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("Invalid component attribute {value:?}: {reason}")]
    InvalidComponentAttribute { value: String, reason: String },

    #[error("Maximum component nesting depth ({depth}) exceeded")]
    MaxDepthExceeded { depth: u32 },
}

/// Errors when binding a property through the prop bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Invalid property name: {name:?}")]
    InvalidPropertyName { name: String },

    #[error("Invalid binding expression: {0}")]
    Expression(#[from] ParseError),
}
