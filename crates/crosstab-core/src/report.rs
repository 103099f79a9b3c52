//! Aggregation output: per-column statistics, tables and reports.
//!
//! These values are created fresh by each report run and never mutated
//! afterwards. Percentages are stored at full precision; rounding happens
//! only when they are rendered.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::banner::BannerColumn;
use crate::tabplan::QuestionType;

/// Render a number with a fixed count of decimals (`66.666…` → `"66.7"`).
///
/// Exact midpoints round away from zero (`6.25` → `"6.3"`), matching the
/// rounding of existing report files. Values outside the decimal range fall
/// back to the float formatter.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded =
                d.round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", decimals, rounded)
        }
        None => format!("{:.*}", decimals, value),
    }
}

/// Count and share of one raw response code within a column
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frequency {
    /// Raw response value, first-seen casing preserved
    pub code: String,
    pub count: usize,
    /// `count / base * 100`, unrounded
    pub percent: f64,
}

impl Frequency {
    /// Percentage rounded to one decimal for display
    pub fn display_percent(&self) -> String {
        format_fixed(self.percent, 1)
    }
}

/// Count and share of base rows falling into a net
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetFrequency {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Frequency table for a categorical question.
///
/// Codes with zero occurrences are omitted, not zero-filled.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalStats {
    pub base: usize,
    /// Observed codes in first-seen order
    pub frequencies: Vec<Frequency>,
    /// One entry per question net, in net order
    pub nets: Vec<NetFrequency>,
}

impl CategoricalStats {
    /// Look up the tally for a code
    pub fn frequency(&self, code: &str) -> Option<&Frequency> {
        self.frequencies.iter().find(|f| f.code == code)
    }

    /// Unrounded percentage for a code, if it was observed
    pub fn percent(&self, code: &str) -> Option<f64> {
        self.frequency(code).map(|f| f.percent)
    }

    /// Percentage for a net label, if the net exists
    pub fn net_percent(&self, label: &str) -> Option<f64> {
        self.nets.iter().find(|n| n.label == label).map(|n| n.percent)
    }
}

/// Numeric summary; every statistic is `None` when there is nothing to summarize
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NumericStats {
    /// Rows in the filtered subset
    pub base: usize,
    /// Rows with a numeric response
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation (divisor `n`)
    pub std_dev: Option<f64>,
}

/// Top-box / bottom-box shares; `None` when the base is zero
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoxStats {
    pub base: usize,
    pub top_box: Option<f64>,
    pub bottom_box: Option<f64>,
}

/// Statistics for one banner column, tagged by question type
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum ColumnStats {
    Categorical(CategoricalStats),
    Numeric(NumericStats),
    Likert(BoxStats),
}

impl ColumnStats {
    /// Count of respondents in the column's filtered subgroup
    pub fn base(&self) -> usize {
        match self {
            ColumnStats::Categorical(s) => s.base,
            ColumnStats::Numeric(s) => s.base,
            ColumnStats::Likert(s) => s.base,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStats> {
        match self {
            ColumnStats::Categorical(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            ColumnStats::Numeric(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxStats> {
        match self {
            ColumnStats::Likert(s) => Some(s),
            _ => None,
        }
    }
}

/// A banner column together with its computed statistics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnEntry {
    pub column: BannerColumn,
    pub stats: ColumnStats,
}

/// One question tabulated across every banner column
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReportTable {
    pub question_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    /// Columns in banner order
    pub data: Vec<ColumnEntry>,
}

impl ReportTable {
    /// Statistics for a column by id
    pub fn stats(&self, column_id: &str) -> Option<&ColumnStats> {
        self.data
            .iter()
            .find(|e| e.column.id == column_id)
            .map(|e| &e.stats)
    }

    /// Column ids in banner order
    pub fn column_ids(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|e| e.column.id.as_str())
    }
}

/// Report-level facts
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReportMetadata {
    pub project_name: String,
    pub banner_name: String,
    /// Size of the unfiltered dataset
    pub total_base: usize,
    pub generated_at: DateTime<Utc>,
}

/// A complete cross-tabulation run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub metadata: ReportMetadata,
    pub tables: Vec<ReportTable>,
}

impl Report {
    /// Find a table by question id
    pub fn table(&self, question_id: &str) -> Option<&ReportTable> {
        self.tables.iter().find(|t| t.question_id == question_id)
    }
}
