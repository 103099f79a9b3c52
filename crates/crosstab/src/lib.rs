//! # crosstab
//!
//! Banner cross-tabulation for survey data.
//!
//! Crosstab evaluates banner equations such as `S7=2 AND Q1>5` against
//! respondent records, tabulates every tab plan question across the banner's
//! columns, and renders the result as a CSV report.
//!
//! ## Features
//!
//! - Banner equation parsing and evaluation
//! - Categorical frequencies, numeric summaries and top/bottom box shares
//! - Code-group and numeric-range nets, Likert detection and automatic nets
//! - Dataset CSV import and report CSV export
//! - Per-run column selection caching and cooperative cancellation
//!
//! ## Example
//!
//! ```rust
//! use crosstab::prelude::*;
//!
//! let dataset = DatasetReader::read_str(
//!     "S1,S7,Q1\n1,2,7\n2,2,3\n1,1,9\n",
//!     &CsvReadOptions::default(),
//! )
//! .unwrap();
//!
//! let banner = BannerPlan::new("Demo").with_group(
//!     BannerGroup::new("G1", "Gender")
//!         .with_column(BannerColumn::new("M", "Male", "S1=1"))
//!         .with_column(BannerColumn::new("F", "Female", "S1=2")),
//! );
//! let plan = TabPlan::new(vec![
//!     TabPlanQuestion::new("S7", "Segment", QuestionType::Categorical),
//!     TabPlanQuestion::new("Q1", "Score", QuestionType::Numeric),
//! ]);
//!
//! let report = generate_report(&plan, &banner, &dataset);
//! let male = report.table("S7").unwrap().stats("M").unwrap();
//! assert_eq!(male.base(), 2);
//!
//! let csv = report.to_csv_string(&CsvWriteOptions::default()).unwrap();
//! assert!(csv.contains("Column,Total,Male,Female"));
//! ```

pub mod aggregate;
pub mod prelude;
pub mod report;
pub mod stats;

pub use aggregate::{
    aggregate, aggregate_selections, box_stats, categorical_stats, column_stats, numeric_stats,
    QuestionSpec, DEFAULT_BOTTOM_BOX_CODES, DEFAULT_TOP_BOX_CODES,
};
pub use report::{
    build_banner_column_list, generate_report, generate_report_with_options, CancellationToken,
    ReportError, ReportExt, ReportGenerator, ReportOptions, ReportResult,
};

// Re-export core types
pub use crosstab_core::{
    format_fixed, BannerColumn, BannerGroup, BannerPlan, BoxStats, CategoricalStats, CodesNet,
    ColumnEntry, ColumnStats, Dataset, Error, Frequency, Grid, Net, NetFrequency, NumericStats,
    Question, QuestionOption, QuestionType, RangeNet, RangeOperator, Record, Report,
    ReportMetadata, ReportTable, Result, Scale, TabPlan, TabPlanQuestion, Value, TOTAL_COLUMN_ID,
    TOTAL_EQUATION,
};

// Re-export equation types
pub use crosstab_equation::{
    evaluate, filter_dataset, is_match_all, parse_equation, select_rows, try_parse_condition,
    Condition, EquationError, EquationResult, Expression, Operand, Operator, RowSelection,
};

// Re-export net management
pub use crosstab_nets::{
    add_net, auto_configure_nets_for_scale, classify_labels, create_codes_net, create_range_net,
    default_likert_labels, delete_net, detect_likert, format_nets, generate_t2b_nets,
    generate_t3b_nets, is_likert_scale, question_options, resolved_options, summary_text,
    sync_net, sync_nets, update_net, valid_codes, validate_net, LikertDetection, LikertRule,
    NetDraft, NetError, NetResult, OptionEntry, ScaleVocabulary,
};

// Re-export I/O types
pub use crosstab_csv::{
    CsvError, CsvReadOptions, CsvResult, CsvWriteOptions, DatasetReader, LineTerminator,
    ReportWriter,
};
