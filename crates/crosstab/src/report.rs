//! Report assembly
//!
//! A report run flattens the banner plan into columns, resolves each column's
//! equation once, then tabulates every tab plan question in order.
//!
//! # Example
//!
//! ```rust
//! use crosstab::prelude::*;
//!
//! let mut dataset = Dataset::new(vec!["S1".into(), "S7".into()]);
//! dataset.push_row(["1", "2"]).unwrap();
//! dataset.push_row(["2", "2"]).unwrap();
//!
//! let banner = BannerPlan::new("Demo")
//!     .with_group(BannerGroup::new("G1", "Gender").with_column(BannerColumn::new("M", "Male", "S1=1")));
//! let plan = TabPlan::new(vec![TabPlanQuestion::new("S7", "Segment", QuestionType::Categorical)]);
//!
//! let report = generate_report(&plan, &banner, &dataset);
//! assert_eq!(report.metadata.total_base, 2);
//! assert_eq!(report.tables[0].column_ids().collect::<Vec<_>>(), ["TOTAL", "M"]);
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crosstab_core::{
    BannerColumn, BannerPlan, ColumnEntry, Dataset, Report, ReportMetadata, ReportTable, TabPlan,
    TabPlanQuestion,
};
use crosstab_csv::{CsvError, CsvWriteOptions, ReportWriter};
use crosstab_equation::{parse_equation, select_rows, Expression, RowSelection};

use crate::aggregate::{
    aggregate_selections, column_stats, QuestionSpec, DEFAULT_BOTTOM_BOX_CODES,
    DEFAULT_TOP_BOX_CODES,
};

const UNNAMED_PROJECT: &str = "Unnamed Project";
const UNNAMED_BANNER: &str = "Unnamed Banner";

/// Result type for report operations
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Errors from report runs and export
#[derive(Debug, Error)]
pub enum ReportError {
    /// The run was cancelled; `completed` tables had been built
    #[error("Report generation cancelled after {completed} tables")]
    Cancelled { completed: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),
}

/// Options for a report run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Overrides the tab plan's project name
    pub project_name: Option<String>,
    /// Top box codes for Likert questions that declare none (default: 1, 2)
    pub default_top_box_codes: Vec<f64>,
    /// Bottom box codes for Likert questions that declare none (default: 4, 5)
    pub default_bottom_box_codes: Vec<f64>,
    /// Evaluate each column's equation once per run instead of once per question
    pub cache_column_selections: bool,
    /// Rewrite `S7=2` to `S7r2=1` when the dataset stores checkboxes per option
    pub translate_checkbox_columns: bool,
    /// Timestamp recorded in the metadata (default: now)
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            project_name: None,
            default_top_box_codes: DEFAULT_TOP_BOX_CODES.to_vec(),
            default_bottom_box_codes: DEFAULT_BOTTOM_BOX_CODES.to_vec(),
            cache_column_selections: true,
            translate_checkbox_columns: true,
            generated_at: None,
        }
    }
}

/// Cooperative cancellation for long report runs, checked between questions.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Flatten a banner plan: the implicit Total column first, then every group's
/// columns in authored order, each tagged with its group name.
pub fn build_banner_column_list(banner: &BannerPlan) -> Vec<BannerColumn> {
    let mut columns = vec![BannerColumn::total()];
    for group in &banner.groups {
        for column in &group.columns {
            columns.push(column.clone().with_parent_group(group.name.clone()));
        }
    }
    columns
}

/// Generate a report with default options
pub fn generate_report(tab_plan: &TabPlan, banner: &BannerPlan, dataset: &Dataset) -> Report {
    ReportGenerator::new(ReportOptions::default()).generate(tab_plan, banner, dataset)
}

/// Generate a report with custom options and an optional cancellation token
pub fn generate_report_with_options(
    tab_plan: &TabPlan,
    banner: &BannerPlan,
    dataset: &Dataset,
    options: &ReportOptions,
    cancel: Option<&CancellationToken>,
) -> ReportResult<Report> {
    let generator = ReportGenerator::new(options.clone());
    match cancel {
        Some(token) => generator.generate_cancellable(tab_plan, banner, dataset, token),
        None => Ok(generator.generate(tab_plan, banner, dataset)),
    }
}

/// A banner column with its resolved equation
struct ResolvedColumn {
    column: BannerColumn,
    expression: Expression,
}

/// Runs reports with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Generate a report
    pub fn generate(&self, tab_plan: &TabPlan, banner: &BannerPlan, dataset: &Dataset) -> Report {
        let (report, _) = self.run(tab_plan, banner, dataset, None);
        report
    }

    /// Generate a report, stopping between questions once `token` is cancelled
    pub fn generate_cancellable(
        &self,
        tab_plan: &TabPlan,
        banner: &BannerPlan,
        dataset: &Dataset,
        token: &CancellationToken,
    ) -> ReportResult<Report> {
        let (report, cancelled) = self.run(tab_plan, banner, dataset, Some(token));
        if cancelled {
            return Err(ReportError::Cancelled {
                completed: report.tables.len(),
            });
        }
        Ok(report)
    }

    fn run(
        &self,
        tab_plan: &TabPlan,
        banner: &BannerPlan,
        dataset: &Dataset,
        token: Option<&CancellationToken>,
    ) -> (Report, bool) {
        let columns = self.resolve_columns(banner, dataset);
        let selections: Option<Vec<(BannerColumn, RowSelection)>> =
            self.options.cache_column_selections.then(|| {
                columns
                    .iter()
                    .map(|c| {
                        let selection = select_rows(dataset, &c.expression);
                        log::debug!("Column {} base {}", c.column.id, selection.len());
                        (c.column.clone(), selection)
                    })
                    .collect()
            });

        let mut tables = Vec::with_capacity(tab_plan.questions.len());
        let mut cancelled = false;
        for question in &tab_plan.questions {
            if token.is_some_and(CancellationToken::is_cancelled) {
                log::debug!("Report cancelled after {} tables", tables.len());
                cancelled = true;
                break;
            }
            tables.push(self.build_table(question, dataset, &columns, selections.as_deref()));
        }

        let project_name = self
            .options
            .project_name
            .clone()
            .or_else(|| tab_plan.project_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNNAMED_PROJECT.to_string());
        let banner_name = if banner.name.is_empty() {
            UNNAMED_BANNER.to_string()
        } else {
            banner.name.clone()
        };

        let report = Report {
            metadata: ReportMetadata {
                project_name,
                banner_name,
                total_base: dataset.len(),
                generated_at: self.options.generated_at.unwrap_or_else(Utc::now),
            },
            tables,
        };
        (report, cancelled)
    }

    fn resolve_columns(&self, banner: &BannerPlan, dataset: &Dataset) -> Vec<ResolvedColumn> {
        build_banner_column_list(banner)
            .into_iter()
            .map(|column| {
                let mut expression = parse_equation(&column.equation);
                if self.options.translate_checkbox_columns {
                    expression = expression.translate_checkbox_columns(dataset);
                }
                ResolvedColumn { column, expression }
            })
            .collect()
    }

    fn build_table(
        &self,
        question: &TabPlanQuestion,
        dataset: &Dataset,
        columns: &[ResolvedColumn],
        selections: Option<&[(BannerColumn, RowSelection)]>,
    ) -> ReportTable {
        let spec = QuestionSpec {
            question_id: &question.question_id,
            question_type: question.question_type,
            top_box_codes: question
                .top_box_codes
                .as_deref()
                .unwrap_or(&self.options.default_top_box_codes),
            bottom_box_codes: question
                .bottom_box_codes
                .as_deref()
                .unwrap_or(&self.options.default_bottom_box_codes),
            nets: &question.nets,
        };

        let data = match selections {
            Some(selections) => aggregate_selections(&spec, dataset, selections),
            None => columns
                .iter()
                .map(|c| {
                    let subset: Vec<_> = dataset.iter().filter(|r| c.expression.evaluate(r)).collect();
                    ColumnEntry {
                        column: c.column.clone(),
                        stats: column_stats(&spec, subset.len(), subset.iter().copied()),
                    }
                })
                .collect(),
        };

        ReportTable {
            question_id: question.question_id.clone(),
            question_text: question.display_text().to_string(),
            question_type: question.question_type,
            data,
        }
    }
}

/// CSV export for reports
pub trait ReportExt {
    /// Render as CSV text
    fn to_csv_string(&self, options: &CsvWriteOptions) -> ReportResult<String>;

    /// Write CSV to a file
    fn save_csv<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> ReportResult<()>;
}

impl ReportExt for Report {
    fn to_csv_string(&self, options: &CsvWriteOptions) -> ReportResult<String> {
        Ok(ReportWriter::write_string(self, options)?)
    }

    fn save_csv<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> ReportResult<()> {
        ReportWriter::write_file(self, path, options)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstab_core::{BannerGroup, QuestionType, TOTAL_COLUMN_ID};
    use pretty_assertions::assert_eq;

    fn banner() -> BannerPlan {
        BannerPlan::new("Main")
            .with_group(
                BannerGroup::new("G1", "Gender")
                    .with_column(BannerColumn::new("M", "Male", "S1=1"))
                    .with_column(BannerColumn::new("F", "Female", "S1=2")),
            )
            .with_group(
                BannerGroup::new("G2", "Segment").with_column(BannerColumn::new("A", "Seg A", "S7=1")),
            )
    }

    #[test]
    fn test_build_banner_column_list() {
        let columns = build_banner_column_list(&banner());
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![TOTAL_COLUMN_ID, "M", "F", "A"]);
        assert_eq!(columns[0].parent_group_name, None);
        assert_eq!(columns[2].parent_group_name.as_deref(), Some("Gender"));
        assert_eq!(columns[3].parent_group_name.as_deref(), Some("Segment"));

        let empty = build_banner_column_list(&BannerPlan::new(""));
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn test_metadata_defaults() {
        let dataset = Dataset::new(vec!["S1".into()]);
        let report = generate_report(&TabPlan::default(), &BannerPlan::new(""), &dataset);
        assert_eq!(report.metadata.project_name, "Unnamed Project");
        assert_eq!(report.metadata.banner_name, "Unnamed Banner");
        assert_eq!(report.metadata.total_base, 0);
        assert!(report.tables.is_empty());
    }

    #[test]
    fn test_project_name_precedence() {
        let dataset = Dataset::new(vec![]);
        let mut plan = TabPlan::default();
        plan.project_name = Some("From plan".into());

        let report = generate_report(&plan, &banner(), &dataset);
        assert_eq!(report.metadata.project_name, "From plan");

        let options = ReportOptions {
            project_name: Some("Override".into()),
            ..Default::default()
        };
        let report = generate_report_with_options(&plan, &banner(), &dataset, &options, None).unwrap();
        assert_eq!(report.metadata.project_name, "Override");
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut dataset = Dataset::new(vec!["S1".into()]);
        dataset.push_row(["1"]).unwrap();
        let plan = TabPlan::new(vec![TabPlanQuestion::new("S1", "Gender", QuestionType::Categorical)]);

        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());

        let err = generate_report_with_options(&plan, &banner(), &dataset, &ReportOptions::default(), Some(&token))
            .unwrap_err();
        assert!(matches!(err, ReportError::Cancelled { completed: 0 }));
    }

    #[test]
    fn test_uncached_matches_cached() {
        let mut dataset = Dataset::new(vec!["S1".into(), "S7r1".into(), "S7r2".into()]);
        dataset.push_row(["1", "1", "0"]).unwrap();
        dataset.push_row(["2", "0", "1"]).unwrap();
        dataset.push_row(["1", "0", "1"]).unwrap();
        let plan = TabPlan::new(vec![TabPlanQuestion::new("S1", "Gender", QuestionType::Categorical)]);
        let generated_at = Some(Utc::now());

        let cached = ReportOptions {
            generated_at,
            ..Default::default()
        };
        let uncached = ReportOptions {
            cache_column_selections: false,
            generated_at,
            ..Default::default()
        };
        let a = generate_report_with_options(&plan, &banner(), &dataset, &cached, None).unwrap();
        let b = generate_report_with_options(&plan, &banner(), &dataset, &uncached, None).unwrap();
        assert_eq!(a, b);

        // "S7=1" resolves to the S7r1 checkbox column
        assert_eq!(a.tables[0].stats("A").map(|s| s.base()), Some(1));
    }
}
