//! Checkbox column translation
//!
//! Multi-select questions are often exported as one column per option
//! (`S7r1`, `S7r2`, ...) holding `1` when checked. Banner equations still
//! refer to them as `S7=2`; this rewrites such conditions to `S7r2=1`.

use crosstab_core::Dataset;

use crate::ast::{Condition, Expression, Operand};

impl Expression {
    /// Rewrite `VAR=n` / `VAR!=n` to `VARrn=1` / `VARrn!=1` where the dataset
    /// has no `VAR` column but does have `VARrn`.
    pub fn translate_checkbox_columns(&self, dataset: &Dataset) -> Expression {
        match self {
            Expression::Condition(c) => Expression::Condition(translate_condition(c, dataset)),
            Expression::And(parts) => Expression::And(
                parts
                    .iter()
                    .map(|p| p.translate_checkbox_columns(dataset))
                    .collect(),
            ),
            Expression::Or(parts) => Expression::Or(
                parts
                    .iter()
                    .map(|p| p.translate_checkbox_columns(dataset))
                    .collect(),
            ),
            Expression::All | Expression::Unparsed(_) => self.clone(),
        }
    }
}

fn translate_condition(condition: &Condition, dataset: &Dataset) -> Condition {
    let Operand::Scalar(code) = &condition.value else {
        return condition.clone();
    };
    if !condition.operator.is_equality()
        || code.is_empty()
        || !code.bytes().all(|b| b.is_ascii_digit())
        || dataset.has_column(&condition.variable)
    {
        return condition.clone();
    }

    let column = format!("{}r{}", condition.variable, code);
    if !dataset.has_column(&column) {
        return condition.clone();
    }

    log::debug!(
        "Translating checkbox condition {} to {}{}1",
        condition,
        column,
        condition.operator
    );
    Condition::new(column, condition.operator, Operand::Scalar("1".into()))
}
