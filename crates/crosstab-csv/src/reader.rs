//! Dataset reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use crosstab_core::Dataset;

/// Reads a header row of variable codes followed by one row per respondent.
///
/// Every field is kept as text; empty fields become missing responses.
pub struct DatasetReader;

impl DatasetReader {
    /// Read a dataset from a file
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Dataset> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read a dataset from a string
    pub fn read_str(text: &str, options: &CsvReadOptions) -> CsvResult<Dataset> {
        Self::read(text.as_bytes(), options)
    }

    /// Read a dataset from a reader
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Dataset> {
        let trim = if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(true)
            .trim(trim)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(CsvError::MissingHeader);
        }

        let mut dataset = Dataset::with_columns(headers)?;
        for result in csv_reader.records() {
            let record = result?;
            dataset.push_row(record.iter())?;
        }

        log::debug!(
            "Read dataset with {} records and {} variables",
            dataset.len(),
            dataset.columns().len()
        );
        Ok(dataset)
    }
}
