//! Prelude module - common imports for crosstab users
//!
//! ```rust
//! use crosstab::prelude::*;
//! ```

pub use crate::{
    // Report assembly
    build_banner_column_list,
    generate_report,
    generate_report_with_options,
    CancellationToken,
    ReportExt,
    ReportOptions,

    // Banner and tab plan
    BannerColumn,
    BannerGroup,
    BannerPlan,
    QuestionType,
    TabPlan,
    TabPlanQuestion,

    // Data
    Dataset,
    Record,
    Value,

    // Output
    ColumnStats,
    Report,
    ReportTable,

    // Equations
    evaluate,
    filter_dataset,

    // Nets
    Net,
    Question,

    // I/O types
    CsvReadOptions,
    CsvWriteOptions,
    DatasetReader,
    ReportWriter,
};
