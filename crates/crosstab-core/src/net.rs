//! Net definitions: named groupings of response codes or numeric buckets.
//!
//! On the wire a net is `{"kind": "codes", "label", "codes"}` or
//! `{"kind": "range", "label", "operator", "value1", "value2"}`.

use std::fmt;

use crate::value::Value;

/// A net owned by a question
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Net {
    /// Group of response codes, e.g. T2B = {4, 5}
    Codes(CodesNet),
    /// Numeric bucket, e.g. 18-34 or 65+
    Range(RangeNet),
}

impl Net {
    /// Optional display label
    pub fn label(&self) -> Option<&str> {
        match self {
            Net::Codes(n) => n.label.as_deref(),
            Net::Range(n) => n.label.as_deref(),
        }
    }

    /// Check whether a response falls inside this net
    pub fn matches(&self, value: &Value) -> bool {
        if value.is_missing() {
            return false;
        }
        match self {
            Net::Codes(n) => n.contains(&value.to_string()),
            Net::Range(n) => value.as_number().is_some_and(|x| n.contains(x)),
        }
    }
}

/// A set of response codes; duplicates are never stored
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodesNet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub codes: Vec<String>,
}

impl CodesNet {
    /// Check membership by code string
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}

/// Comparison used by a range net
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeOperator {
    /// `value1 - value2`, both bounds inclusive
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Between,
    /// `value1+`, at least `value1`
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    AtLeast,
    #[cfg_attr(feature = "serde", serde(rename = "<"))]
    LessThan,
    #[cfg_attr(feature = "serde", serde(rename = ">"))]
    GreaterThan,
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    LessEqual,
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    GreaterEqual,
    #[cfg_attr(feature = "serde", serde(rename = "exact"))]
    Exact,
}

impl RangeOperator {
    /// Wire symbol
    pub fn symbol(self) -> &'static str {
        match self {
            RangeOperator::Between => "-",
            RangeOperator::AtLeast => "+",
            RangeOperator::LessThan => "<",
            RangeOperator::GreaterThan => ">",
            RangeOperator::LessEqual => "<=",
            RangeOperator::GreaterEqual => ">=",
            RangeOperator::Exact => "exact",
        }
    }

    /// Parse a wire symbol
    pub fn from_symbol(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "-" => RangeOperator::Between,
            "+" => RangeOperator::AtLeast,
            "<" => RangeOperator::LessThan,
            ">" => RangeOperator::GreaterThan,
            "<=" => RangeOperator::LessEqual,
            ">=" => RangeOperator::GreaterEqual,
            "exact" => RangeOperator::Exact,
            _ => return None,
        })
    }

    /// Whether the operator needs a second bound
    pub fn needs_upper_bound(self) -> bool {
        self == RangeOperator::Between
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A numeric bucket; `value2` is only meaningful for [`RangeOperator::Between`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeNet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    pub operator: RangeOperator,
    pub value1: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value2: Option<f64>,
}

impl RangeNet {
    /// Check whether a number falls inside the bucket
    pub fn contains(&self, x: f64) -> bool {
        match self.operator {
            RangeOperator::Between => match self.value2 {
                Some(upper) => self.value1 <= x && x <= upper,
                None => false,
            },
            RangeOperator::AtLeast | RangeOperator::GreaterEqual => x >= self.value1,
            RangeOperator::LessThan => x < self.value1,
            RangeOperator::GreaterThan => x > self.value1,
            RangeOperator::LessEqual => x <= self.value1,
            RangeOperator::Exact => x == self.value1,
        }
    }

    /// Whether both bounds are finite and ordered
    pub fn is_well_formed(&self) -> bool {
        if !self.value1.is_finite() {
            return false;
        }
        match (self.operator, self.value2) {
            (RangeOperator::Between, Some(upper)) => upper.is_finite() && self.value1 <= upper,
            (RangeOperator::Between, None) => false,
            _ => true,
        }
    }
}
