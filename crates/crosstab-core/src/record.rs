//! Respondent records and datasets

use ahash::{AHashSet, RandomState};
use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::value::Value;

/// One respondent: a flat mapping from variable code (e.g. `"S7"`) to a response.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Record {
    values: HashMap<String, Value, RandomState>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(code, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs.into_iter().collect()
    }

    /// Set the response for a variable, replacing any previous one
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, code: K, value: V) {
        self.values.insert(code.into(), value.into());
    }

    /// Get the raw value for a variable, including empty ones
    pub fn get(&self, code: &str) -> Option<&Value> {
        self.values.get(code)
    }

    /// Get the value for a variable only if it is an actual response
    pub fn response(&self, code: &str) -> Option<&Value> {
        self.values.get(code).filter(|v| !v.is_missing())
    }

    /// Check whether the record carries the variable at all
    pub fn contains(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    /// Number of variables in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no variables
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(code, value)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An ordered sequence of records plus the header of variable codes.
///
/// Record order is preserved for display; aggregation never depends on it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset with the given header
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Create an empty dataset, rejecting duplicate variable codes in the header
    pub fn with_columns(columns: Vec<String>) -> Result<Self> {
        let mut seen = AHashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(Error::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self::new(columns))
    }

    /// Build a dataset from records alone; the header is the sorted union of their codes
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.iter().map(|(k, _)| k))
            .collect();
        let columns = columns.into_iter().map(str::to_string).collect();
        Self { columns, records }
    }

    /// Append a record
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append a row of text fields positionally matched to the header.
    ///
    /// Short rows leave the trailing variables absent; empty fields become [`Value::Empty`].
    pub fn push_row<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.len() > self.columns.len() {
            return Err(Error::RowTooLong {
                row: self.records.len() + 1,
                expected: self.columns.len(),
                actual: fields.len(),
            });
        }

        let record = self
            .columns
            .iter()
            .zip(fields)
            .map(|(code, field)| {
                let value = if field.is_empty() {
                    Value::Empty
                } else {
                    Value::Text(field)
                };
                (code.clone(), value)
            })
            .collect();
        self.records.push(record);
        Ok(())
    }

    /// The header of variable codes
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the header contains a variable code
    pub fn has_column(&self, code: &str) -> bool {
        self.columns.iter().any(|c| c == code)
    }

    /// All records in their original order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records (the unfiltered base)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_response_skips_empty() {
        let record = Record::from_pairs([("S7", Value::text("2")), ("Q1", Value::text(""))]);
        assert_eq!(record.response("S7"), Some(&Value::text("2")));
        assert_eq!(record.response("Q1"), None);
        assert!(record.contains("Q1"));
        assert_eq!(record.response("Q9"), None);
    }

    #[test]
    fn test_push_row() {
        let mut dataset = Dataset::new(vec!["S7".into(), "Q1".into(), "Q2".into()]);
        dataset.push_row(["2", "", "x"]).unwrap();
        dataset.push_row(["3"]).unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.get("S7"), Some(&Value::text("2")));
        assert_eq!(first.get("Q1"), Some(&Value::Empty));
        let second = &dataset.records()[1];
        assert!(!second.contains("Q1"));
    }

    #[test]
    fn test_push_row_too_long() {
        let mut dataset = Dataset::new(vec!["S7".into()]);
        let err = dataset.push_row(["1", "2"]).unwrap_err();
        assert!(matches!(
            err,
            Error::RowTooLong {
                row: 1,
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_duplicate_columns() {
        let err = Dataset::with_columns(vec!["Q1".into(), "Q1".into()]).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(c) if c == "Q1"));
    }

    #[test]
    fn test_from_records_header() {
        let dataset = Dataset::from_records(vec![
            Record::from_pairs([("Q2", "1")]),
            Record::from_pairs([("Q1", "1"), ("Q2", "2")]),
        ]);
        assert_eq!(dataset.columns(), &["Q1".to_string(), "Q2".to_string()]);
        assert!(dataset.has_column("Q1"));
        assert!(!dataset.has_column("Q3"));
    }
}
