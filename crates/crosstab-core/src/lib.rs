//! # crosstab-core
//!
//! Core data structures for the crosstab banner tabulation engine.
//!
//! This crate provides the fundamental types used throughout crosstab:
//! - [`Value`], [`Record`], [`Dataset`] - Respondent data keyed by variable code
//! - [`BannerColumn`], [`BannerGroup`], [`BannerPlan`] - The H1/H2 banner hierarchy
//! - [`TabPlan`], [`TabPlanQuestion`], [`QuestionType`] - What to tabulate
//! - [`Net`] - Code-group and numeric-range nets
//! - [`Question`] - The authored questionnaire item that nets are derived from
//! - [`Report`], [`ReportTable`], [`ColumnStats`] - Aggregation output
//!
//! ## Example
//!
//! ```rust
//! use crosstab_core::{Dataset, Record, Value};
//!
//! let mut dataset = Dataset::new(vec!["S7".into(), "Q1".into()]);
//! dataset.push(Record::from_pairs([("S7", "2"), ("Q1", "7")]));
//!
//! let record = &dataset.records()[0];
//! assert_eq!(record.get("S7"), Some(&Value::text("2")));
//! assert_eq!(record.get("Q1").and_then(Value::as_number), Some(7.0));
//! ```

pub mod banner;
pub mod error;
pub mod net;
pub mod question;
pub mod record;
pub mod report;
pub mod tabplan;
pub mod value;

pub use banner::{BannerColumn, BannerGroup, BannerPlan, TOTAL_COLUMN_ID, TOTAL_EQUATION};
pub use error::{Error, Result};
pub use net::{CodesNet, Net, RangeNet, RangeOperator};
pub use question::{Grid, Question, QuestionOption, Scale};
pub use record::{Dataset, Record};
pub use report::{
    format_fixed, BoxStats, CategoricalStats, ColumnEntry, ColumnStats, Frequency, NetFrequency,
    NumericStats, Report, ReportMetadata, ReportTable,
};
pub use tabplan::{QuestionType, TabPlan, TabPlanQuestion};
pub use value::Value;
