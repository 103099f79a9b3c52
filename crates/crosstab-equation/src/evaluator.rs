//! Equation evaluation against a single record

use crosstab_core::value::parse_number;
use crosstab_core::Record;

use crate::ast::{Condition, Expression, Operand, Operator};
use crate::parser::parse_equation;

/// Parse and evaluate an equation against one record.
///
/// Never fails: unparseable conditions evaluate to `false`, while `""` and
/// `"TOTAL"` match every record.
pub fn evaluate(equation: &str, record: &Record) -> bool {
    parse_equation(equation).evaluate(record)
}

impl Expression {
    /// Evaluate the expression against one record
    pub fn evaluate(&self, record: &Record) -> bool {
        match self {
            Expression::All => true,
            Expression::Condition(c) => c.matches(record),
            Expression::Unparsed(_) => false,
            Expression::And(parts) => parts.iter().all(|p| p.evaluate(record)),
            Expression::Or(parts) => parts.iter().any(|p| p.evaluate(record)),
        }
    }
}

impl Condition {
    /// Check one condition; a missing or empty response never matches
    pub fn matches(&self, record: &Record) -> bool {
        let Some(cell) = record.response(&self.variable) else {
            return false;
        };

        match &self.value {
            // A range is always inclusive membership; the operator is ignored.
            Operand::Range { min, max } => cell
                .as_number()
                .is_some_and(|x| *min <= x && x <= *max),
            Operand::List(items) => {
                let text = cell.to_string();
                let member = items.iter().any(|item| *item == text);
                match self.operator {
                    Operator::Equal => member,
                    Operator::NotEqual => !member,
                    _ => false,
                }
            }
            Operand::Scalar(raw) => match (cell.as_number(), parse_number(raw)) {
                (Some(left), Some(right)) => self.operator.compare(left, right),
                _ => {
                    let text = cell.to_string();
                    match self.operator {
                        Operator::Equal => text == *raw,
                        Operator::NotEqual => text != *raw,
                        _ => false,
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstab_core::Value;
    use proptest::prelude::*;

    fn row(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_match_all() {
        let r = row(&[]);
        assert!(evaluate("TOTAL", &r));
        assert!(evaluate("", &r));
    }

    #[test]
    fn test_missing_never_matches() {
        let r = row(&[("Q1", "")]);
        assert!(!evaluate("Q1=1", &r));
        assert!(!evaluate("Q1!=1", &r));
        assert!(!evaluate("Q2!=1", &r));
        assert!(!evaluate("Q1!=1,2", &r));
    }

    #[test]
    fn test_scalar_numeric() {
        let r = row(&[("Q1", "7")]);
        assert!(evaluate("Q1=7", &r));
        assert!(evaluate("Q1=7.0", &r));
        assert!(evaluate("Q1>5", &r));
        assert!(evaluate("Q1>=7", &r));
        assert!(!evaluate("Q1<7", &r));
        assert!(evaluate("Q1<=7", &r));
        assert!(evaluate("Q1!=3", &r));
    }

    #[test]
    fn test_scalar_text_fallback() {
        let r = row(&[("REGION", "North")]);
        assert!(evaluate("REGION=North", &r));
        assert!(!evaluate("REGION=north", &r));
        assert!(evaluate("REGION!=South", &r));
        assert!(!evaluate("REGION>South", &r));

        let numeric = row(&[("Q1", "5")]);
        assert!(!evaluate("Q1>abc", &numeric));
        assert!(evaluate("Q1!=abc", &numeric));
    }

    #[test]
    fn test_number_values() {
        let r = Record::from_pairs([("Q1", Value::Number(2.0))]);
        assert!(evaluate("Q1=2", &r));
        assert!(evaluate("Q1=1,2,3", &r));
        assert!(evaluate("Q1=1-3", &r));
    }

    #[test]
    fn test_range() {
        let r = row(&[("Q1", "9")]);
        assert!(evaluate("Q1=1-9", &r));
        assert!(!evaluate("Q1=10-20", &r));
        assert!(!evaluate("Q1=1-9", &row(&[("Q1", "n/a")])));
        assert!(!evaluate("Q1!=1-9", &row(&[("Q1", "n/a")])));
    }

    #[test]
    fn test_range_ignores_operator() {
        let inside = row(&[("Q1", "5")]);
        let outside = row(&[("Q1", "12")]);
        for equation in ["Q1!=1-9", "Q1>1-9", "Q1<1-9", "Q1>=1-9", "Q1<=1-9"] {
            assert!(evaluate(equation, &inside), "{equation}");
            assert!(!evaluate(equation, &outside), "{equation}");
        }
    }

    #[test]
    fn test_list() {
        let r = row(&[("S1", "2")]);
        assert!(evaluate("S1=1,2,3", &r));
        assert!(!evaluate("S1!=1,2,3", &r));
        assert!(evaluate("S1!=4,5", &r));
        // Lists with ordering operators are unsupported
        assert!(!evaluate("S1>1,2", &r));
    }

    #[test]
    fn test_compound() {
        let r = row(&[("S7", "2"), ("Q1", "6"), ("S1", "3")]);
        assert!(evaluate("S7=2 AND Q1>5", &r));
        assert!(!evaluate("S7=2 AND Q1>6", &r));
        assert!(evaluate("S1=1 OR S1=3", &r));
        assert!(!evaluate("S1=1 OR S1=2", &r));
        // OR binds loosest: (S7=1 AND Q1>5) OR S1=3
        assert!(evaluate("S7=1 AND Q1>5 OR S1=3", &r));
    }

    #[test]
    fn test_unparseable() {
        let r = row(&[("S1", "1")]);
        assert!(!evaluate("S1", &r));
        assert!(!evaluate("= 1", &r));
        assert!(evaluate("garbage OR S1=1", &r));
        assert!(!evaluate("garbage AND S1=1", &r));
    }

    proptest! {
        #[test]
        fn prop_list_membership(v in 0u8..10, items in proptest::collection::vec(0u8..10, 2..5)) {
            let list = items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",");
            let r = Record::from_pairs([("V", v.to_string())]);
            let member = items.contains(&v);
            prop_assert_eq!(evaluate(&format!("V={list}"), &r), member);
            prop_assert_eq!(evaluate(&format!("V!={list}"), &r), !member);
        }

        #[test]
        fn prop_range_inclusive(lo in 0i32..50, span in 0i32..50, x in -20i32..120) {
            let hi = lo + span;
            let r = Record::from_pairs([("V", x.to_string())]);
            let expected = lo <= x && x <= hi;
            prop_assert_eq!(evaluate(&format!("V={lo}-{hi}"), &r), expected);
        }

        #[test]
        fn prop_total_matches_everything(x in "[a-z0-9]{0,6}") {
            let r = Record::from_pairs([("V", x)]);
            prop_assert!(evaluate("TOTAL", &r));
            prop_assert!(evaluate("", &r));
        }
    }
}
