//! # crosstab-csv
//!
//! Reads survey datasets from delimited text and renders reports as CSV.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::DatasetReader;
pub use writer::ReportWriter;
