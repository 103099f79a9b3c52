//! Report CSV writer
//!
//! Layout:
//!
//! ```text
//! Cross-Tabulation Report
//! Project: <name>
//! Banner: <name>
//! Total Base: <n>
//! Generated: <timestamp>
//!
//!
//! <question id>: <question text>
//! Type: <type>
//!
//! Column,<column names>
//! Equation,<equations>
//! Base,<bases>
//! <type-specific rows>
//!
//! ```
//!
//! Numeric tables add `Mean`, `Median` and `Std Dev` rows, Likert tables add
//! `Top Box %` and `Bottom Box %`, categorical tables add one `Code <c> %` row
//! per code observed in any column (sorted) followed by one `Net <label> %`
//! row per net. With [`CsvWriteOptions::group_row`] a `Group` row of banner
//! group names precedes the `Column` row.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::{CsvWriteOptions, LineTerminator};
use crosstab_core::{format_fixed, QuestionType, Report, ReportTable, TOTAL_EQUATION};

/// Shown for a categorical code or net a column never observed
const ZERO_PERCENT: &str = "0.0";

/// Report CSV writer
pub struct ReportWriter;

impl ReportWriter {
    /// Write a report to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        report: &Report,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(report, file, options)
    }

    /// Write a report to a writer
    pub fn write<W: Write>(report: &Report, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let mut out = Output::new(writer, options);
        let meta = &report.metadata;

        out.line("Cross-Tabulation Report")?;
        out.line(&format!("Project: {}", meta.project_name))?;
        out.line(&format!("Banner: {}", meta.banner_name))?;
        out.line(&format!("Total Base: {}", meta.total_base))?;
        out.line(&format!(
            "Generated: {}",
            meta.generated_at.format(&options.timestamp_format)
        ))?;
        out.line("")?;

        for table in &report.tables {
            write_table(&mut out, table)?;
        }

        out.finish()
    }

    /// Render a report as CSV text
    pub fn write_string(report: &Report, options: &CsvWriteOptions) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(report, &mut buf, options)?;
        String::from_utf8(buf)
            .map_err(|e| CsvError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Free-text lines go straight to the underlying writer; table rows go
/// through the CSV writer for delimiting and quoting.
struct Output<'a, W: Write> {
    out: W,
    csv: csv::WriterBuilder,
    options: &'a CsvWriteOptions,
}

impl<'a, W: Write> Output<'a, W> {
    fn new(writer: W, options: &'a CsvWriteOptions) -> Self {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv = csv::WriterBuilder::new();
        csv.delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true);

        Output {
            out: writer,
            csv,
            options,
        }
    }

    fn line(&mut self, text: &str) -> CsvResult<()> {
        let inner = &mut self.out;
        inner.write_all(text.as_bytes())?;
        inner.write_all(self.options.line_terminator.as_str().as_bytes())?;
        Ok(())
    }

    /// A labelled row of fields
    fn row<I, S>(&mut self, label: &str, fields: I) -> CsvResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut record = vec![label.to_string()];
        record.extend(fields.into_iter().map(|f| f.as_ref().to_string()));
        let mut csv = self.csv.from_writer(&mut self.out);
        csv.write_record(&record)?;
        csv.flush()?;
        Ok(())
    }

    fn finish(mut self) -> CsvResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn statistic(options: &CsvWriteOptions, value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format_fixed(v, decimals),
        None => options.missing_marker.clone(),
    }
}

fn write_table<W: Write>(out: &mut Output<'_, W>, table: &ReportTable) -> CsvResult<()> {
    let options = out.options;
    out.line("")?;
    out.line(&format!("{}: {}", table.question_id, table.question_text))?;
    out.line(&format!("Type: {}", table.question_type))?;
    out.line("")?;

    if options.group_row {
        out.row(
            "Group",
            table
                .data
                .iter()
                .map(|e| e.column.parent_group_name.as_deref().unwrap_or_default()),
        )?;
    }
    out.row("Column", table.data.iter().map(|e| e.column.name.as_str()))?;
    out.row(
        "Equation",
        table.data.iter().map(|e| {
            if e.column.equation.is_empty() {
                TOTAL_EQUATION
            } else {
                e.column.equation.as_str()
            }
        }),
    )?;
    out.row("Base", table.data.iter().map(|e| e.stats.base().to_string()))?;

    match table.question_type {
        QuestionType::Numeric => {
            let numeric: Vec<_> = table.data.iter().map(|e| e.stats.as_numeric()).collect();
            out.row("Mean", numeric.iter().map(|s| statistic(options, s.and_then(|s| s.mean), 2)))?;
            out.row("Median", numeric.iter().map(|s| statistic(options, s.and_then(|s| s.median), 2)))?;
            out.row("Std Dev", numeric.iter().map(|s| statistic(options, s.and_then(|s| s.std_dev), 2)))?;
        }
        QuestionType::Likert => {
            let boxes: Vec<_> = table.data.iter().map(|e| e.stats.as_box()).collect();
            out.row("Top Box %", boxes.iter().map(|s| statistic(options, s.and_then(|s| s.top_box), 1)))?;
            out.row("Bottom Box %", boxes.iter().map(|s| statistic(options, s.and_then(|s| s.bottom_box), 1)))?;
        }
        QuestionType::Categorical => write_categorical_rows(out, table)?,
    }

    out.line("")
}

fn write_categorical_rows<W: Write>(out: &mut Output<'_, W>, table: &ReportTable) -> CsvResult<()> {
    let columns: Vec<_> = table
        .data
        .iter()
        .map(|e| e.stats.as_categorical())
        .collect();

    let mut codes: Vec<&str> = Vec::new();
    let mut nets: Vec<&str> = Vec::new();
    for stats in columns.iter().flatten() {
        for f in &stats.frequencies {
            if !codes.contains(&f.code.as_str()) {
                codes.push(&f.code);
            }
        }
        for n in &stats.nets {
            if !nets.contains(&n.label.as_str()) {
                nets.push(&n.label);
            }
        }
    }
    codes.sort_unstable();

    for code in codes {
        let cells = columns.iter().map(|s| {
            s.and_then(|s| s.frequency(code))
                .map(|f| f.display_percent())
                .unwrap_or_else(|| ZERO_PERCENT.to_string())
        });
        out.row(&format!("Code {code} %"), cells)?;
    }

    for label in nets {
        let cells = columns.iter().map(|s| {
            s.and_then(|s| s.net_percent(label))
                .map(|p| format_fixed(p, 1))
                .unwrap_or_else(|| ZERO_PERCENT.to_string())
        });
        out.row(&format!("Net {label} %"), cells)?;
    }
    Ok(())
}
