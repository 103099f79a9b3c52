//! Equation syntax tree types

use std::fmt;

use crosstab_core::Value;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        Some(match s {
            "=" => Operator::Equal,
            "!=" => Operator::NotEqual,
            ">" => Operator::GreaterThan,
            "<" => Operator::LessThan,
            ">=" => Operator::GreaterEqual,
            "<=" => Operator::LessEqual,
            _ => return None,
        })
    }

    /// Whether the operator is `=` or `!=`
    pub fn is_equality(self) -> bool {
        matches!(self, Operator::Equal | Operator::NotEqual)
    }

    /// Apply the operator to two numbers
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            Operator::Equal => left == right,
            Operator::NotEqual => left != right,
            Operator::GreaterThan => left > right,
            Operator::LessThan => left < right,
            Operator::GreaterEqual => left >= right,
            Operator::LessEqual => left <= right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Single token compared numerically when both sides coerce, else as text
    Scalar(String),
    /// Inclusive numeric range `min-max`, matched by membership whatever the operator
    Range { min: f64, max: f64 },
    /// Comma-separated set of codes, compared as text
    List(Vec<String>),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(s) => f.write_str(s),
            Operand::Range { min, max } => {
                write!(f, "{}-{}", Value::Number(*min), Value::Number(*max))
            }
            Operand::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// `VARIABLE OPERATOR VALUE`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub variable: String,
    pub operator: Operator,
    pub value: Operand,
}

impl Condition {
    pub fn new<S: Into<String>>(variable: S, operator: Operator, value: Operand) -> Self {
        Condition {
            variable: variable.into(),
            operator,
            value,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.variable, self.operator, self.value)
    }
}

/// A parsed equation: conditions joined by AND inside OR.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `""` or `"TOTAL"`: every record matches
    All,
    Condition(Condition),
    /// Text that could not be parsed; never matches
    Unparsed(String),
    And(Vec<Expression>),
    Or(Vec<Expression>),
}

impl Expression {
    /// Every condition in the tree, left to right
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Expression::Condition(c) => out.push(c),
            Expression::And(parts) | Expression::Or(parts) => {
                for part in parts {
                    part.collect_conditions(out);
                }
            }
            Expression::All | Expression::Unparsed(_) => {}
        }
    }

    /// Whether any part of the equation failed to parse
    pub fn has_unparsed(&self) -> bool {
        match self {
            Expression::Unparsed(_) => true,
            Expression::And(parts) | Expression::Or(parts) => parts.iter().any(|p| p.has_unparsed()),
            Expression::All | Expression::Condition(_) => false,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::All => f.write_str("TOTAL"),
            Expression::Condition(c) => write!(f, "{c}"),
            Expression::Unparsed(s) => f.write_str(s),
            Expression::And(parts) => write_joined(f, parts, " AND "),
            Expression::Or(parts) => write_joined(f, parts, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Expression], sep: &str) -> fmt::Result {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{part}")?;
    }
    Ok(())
}
