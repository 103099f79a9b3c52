//! Dataset filtering

use crosstab_core::{Dataset, Record, TOTAL_EQUATION};

use crate::ast::Expression;
use crate::parser::parse_equation;

/// Whether an equation selects every record (`""` or `"TOTAL"`, after trimming)
pub fn is_match_all(equation: &str) -> bool {
    let equation = equation.trim();
    equation.is_empty() || equation == TOTAL_EQUATION
}

/// Return the records matching an equation, in dataset order.
///
/// A match-all equation returns every record. The equation is parsed once.
pub fn filter_dataset<'a>(dataset: &'a Dataset, equation: &str) -> Vec<&'a Record> {
    let expression = parse_equation(equation);
    if expression == Expression::All {
        return dataset.iter().collect();
    }
    dataset.iter().filter(|r| expression.evaluate(r)).collect()
}

/// Records selected by one banner column, stored as positions into a dataset.
///
/// A selection is computed once per column and reused for every question in a
/// report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelection {
    /// Every record of a dataset with `len` records
    All { len: usize },
    /// Ascending record positions
    Rows(Vec<usize>),
}

impl RowSelection {
    /// Number of selected records (the column base)
    pub fn len(&self) -> usize {
        match self {
            RowSelection::All { len } => *len,
            RowSelection::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the selected records of `dataset`.
    ///
    /// The dataset must be the one the selection was computed from.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> Box<dyn Iterator<Item = &'a Record> + 'a> {
        let records = dataset.records();
        match self {
            RowSelection::All { len } => Box::new(records.iter().take(*len)),
            RowSelection::Rows(rows) => Box::new(rows.iter().filter_map(move |&i| records.get(i))),
        }
    }

    /// Selected record positions
    pub fn indices(&self) -> Vec<usize> {
        match self {
            RowSelection::All { len } => (0..*len).collect(),
            RowSelection::Rows(rows) => rows.clone(),
        }
    }
}

/// Evaluate an expression over a dataset
pub fn select_rows(dataset: &Dataset, expression: &Expression) -> RowSelection {
    if *expression == Expression::All {
        return RowSelection::All { len: dataset.len() };
    }

    let rows: Vec<usize> = dataset
        .iter()
        .enumerate()
        .filter(|(_, r)| expression.evaluate(r))
        .map(|(i, _)| i)
        .collect();
    log::trace!("Equation '{}' selected {} of {} records", expression, rows.len(), dataset.len());
    RowSelection::Rows(rows)
}
