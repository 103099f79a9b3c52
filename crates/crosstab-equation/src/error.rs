//! Equation error types

use thiserror::Error;

use crate::ast::Operator;

/// Result type for equation operations
pub type EquationResult<T> = std::result::Result<T, EquationError>;

/// Reasons a condition cannot be parsed.
///
/// Evaluation never surfaces these; an unparseable condition is logged and
/// evaluates to `false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquationError {
    /// Nothing between two connectives
    #[error("Empty condition")]
    Empty,

    /// Text does not match `VARIABLE OPERATOR VALUE`
    #[error("Syntax error: '{0}' is not of the form VARIABLE OPERATOR VALUE")]
    Syntax(String),

    /// Lists only support `=` and `!=`
    #[error("Operator '{operator}' is not supported for a {operand} value")]
    UnsupportedOperator {
        operator: Operator,
        operand: &'static str,
    },
}
