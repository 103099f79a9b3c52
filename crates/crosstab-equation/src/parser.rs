//! Equation parser
//!
//! Splits on `OR`/`|` first, then on `AND`/`&`, then matches each piece
//! against `VARIABLE OPERATOR VALUE`. Parsing never fails as a whole: a piece
//! that does not parse becomes [`Expression::Unparsed`] and a warning is logged.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Condition, Expression, Operand, Operator};
use crate::error::{EquationError, EquationResult};
use crate::filter::is_match_all;
use crosstab_core::value::parse_number;

static OR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+OR\s+|\|").expect("OR separator pattern is valid"));

static AND_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+AND\s+|&").expect("AND separator pattern is valid"));

static BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([A-Za-z0-9_]+)\s+BETWEEN\s+(-?\d+(?:\.\d+)?)\s+AND\s+(-?\d+(?:\.\d+)?)")
        .expect("BETWEEN pattern is valid")
});

// Alternation order matters: two-character operators before their prefixes.
static CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)\s*(>=|<=|!=|>|<|=)\s*(.+)$")
        .expect("condition pattern is valid")
});

/// Parse an equation string into an [`Expression`]
///
/// # Example
/// ```rust
/// use crosstab_equation::{parse_equation, Expression};
///
/// assert_eq!(parse_equation("TOTAL"), Expression::All);
/// assert!(matches!(parse_equation("S1=1 OR S1=2"), Expression::Or(_)));
/// assert!(matches!(parse_equation("S7=2 & Q1>5"), Expression::And(_)));
/// assert!(matches!(parse_equation("nonsense"), Expression::Unparsed(_)));
/// ```
pub fn parse_equation(equation: &str) -> Expression {
    let equation = equation.trim();
    if is_match_all(equation) {
        return Expression::All;
    }

    let rewritten = BETWEEN.replace_all(equation, "${1}>=${2} AND ${1}<=${3}");

    let mut or_terms: Vec<Expression> = OR_SEPARATOR
        .split(&rewritten)
        .map(parse_and_term)
        .collect();

    if or_terms.len() == 1 {
        or_terms.swap_remove(0)
    } else {
        Expression::Or(or_terms)
    }
}

fn parse_and_term(term: &str) -> Expression {
    let mut conditions: Vec<Expression> = AND_SEPARATOR
        .split(term)
        .map(parse_condition_lenient)
        .collect();

    if conditions.len() == 1 {
        conditions.swap_remove(0)
    } else {
        Expression::And(conditions)
    }
}

fn parse_condition_lenient(text: &str) -> Expression {
    match try_parse_condition(text) {
        Ok(condition) => Expression::Condition(condition),
        Err(e) => {
            log::warn!("Could not parse equation condition '{}': {}", text.trim(), e);
            Expression::Unparsed(text.trim().to_string())
        }
    }
}

/// Parse a single `VARIABLE OPERATOR VALUE` condition, reporting why it fails.
///
/// # Example
/// ```rust
/// use crosstab_equation::{try_parse_condition, Operand, Operator};
///
/// let c = try_parse_condition("Q1 = 1-9").unwrap();
/// assert_eq!(c.variable, "Q1");
/// assert_eq!(c.operator, Operator::Equal);
/// assert_eq!(c.value, Operand::Range { min: 1.0, max: 9.0 });
///
/// assert!(try_parse_condition("S1>1,2").is_err());
/// ```
pub fn try_parse_condition(text: &str) -> EquationResult<Condition> {
    let text = text.trim();
    if text.is_empty() {
        return Err(EquationError::Empty);
    }

    let caps = CONDITION
        .captures(text)
        .ok_or_else(|| EquationError::Syntax(text.to_string()))?;

    let variable = &caps[1];
    let operator =
        Operator::from_symbol(&caps[2]).ok_or_else(|| EquationError::Syntax(text.to_string()))?;
    let value = parse_operand(operator, caps[3].trim())?;

    Ok(Condition::new(variable, operator, value))
}

/// Classify the value side: range, then list, then scalar.
///
/// A range keeps whatever operator was written; lists reject ordering operators.
fn parse_operand(operator: Operator, raw: &str) -> EquationResult<Operand> {
    if raw.contains('-') && !raw.starts_with('-') {
        if let Some((lo, hi)) = raw.split_once('-') {
            if let (Some(min), Some(max)) = (parse_number(lo), parse_number(hi)) {
                return Ok(Operand::Range { min, max });
            }
        }
    }

    if raw.contains(',') {
        if !operator.is_equality() {
            return Err(EquationError::UnsupportedOperator {
                operator,
                operand: "list",
            });
        }
        let items = raw.split(',').map(|v| v.trim().to_string()).collect();
        return Ok(Operand::List(items));
    }

    Ok(Operand::Scalar(raw.to_string()))
}
