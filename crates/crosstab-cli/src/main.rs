//! xtab - banner cross-tabulation from the command line

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crosstab::prelude::*;
use crosstab::{
    auto_configure_nets_for_scale, detect_likert, format_nets, parse_equation, resolved_options,
    select_rows, LikertRule,
};
use serde::de::DeserializeOwned;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtab")]
#[command(author, version, about = "Banner cross-tabulation for survey data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Output format for reports
#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Cross-tab CSV export
    #[default]
    Csv,
    /// Report structure as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Tabulate a dataset against a banner plan and tab plan
    Report {
        /// Respondent data CSV with a header row
        #[arg(short, long)]
        data: PathBuf,

        /// Banner plan JSON
        #[arg(short, long)]
        banner: PathBuf,

        /// Tab plan JSON
        #[arg(short, long)]
        tabplan: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Project name for the report header
        #[arg(short, long)]
        project: Option<String>,

        /// Field delimiter of the data file
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Re-evaluate column equations for every question
        #[arg(long)]
        no_cache: bool,

        /// Do not rewrite `Q=n` to per-option checkbox columns
        #[arg(long)]
        no_checkbox: bool,
    },

    /// Print the rows a banner equation selects
    Filter {
        /// Respondent data CSV with a header row
        #[arg(short, long)]
        data: PathBuf,

        /// Banner equation, e.g. "S7=2 AND Q1>5"
        #[arg(short, long)]
        equation: String,

        /// Field delimiter of the data file
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// Check whether a question definition is a Likert scale
    Likert {
        /// Question definition JSON
        #[arg(short, long)]
        question: PathBuf,
    },

    /// Suggest top/bottom box nets for a scale question
    Nets {
        /// Question definition JSON
        #[arg(short, long)]
        question: PathBuf,

        /// Scale points (default: from the question, else its option count)
        #[arg(short, long)]
        points: Option<u32>,

        /// Print a one-line summary instead of JSON
        #[arg(short, long)]
        summary: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Report {
            data,
            banner,
            tabplan,
            output,
            project,
            delimiter,
            format,
            no_cache,
            no_checkbox,
        } => {
            let options = ReportOptions {
                project_name: project,
                cache_column_selections: !no_cache,
                translate_checkbox_columns: !no_checkbox,
                ..Default::default()
            };
            run_report(
                &data,
                &banner,
                &tabplan,
                output.as_deref(),
                delimiter,
                format,
                &options,
            )
        }
        Commands::Filter {
            data,
            equation,
            delimiter,
        } => run_filter(&data, &equation, delimiter),
        Commands::Likert { question } => run_likert(&question),
        Commands::Nets {
            question,
            points,
            summary,
        } => run_nets(&question, points, summary),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

fn read_dataset(path: &Path, delimiter: char) -> Result<Dataset> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    let options = CsvReadOptions {
        delimiter: delimiter as u8,
        ..Default::default()
    };
    let dataset = DatasetReader::read_file(path, &options)
        .with_context(|| format!("Failed to load '{}'", path.display()))?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

fn run_report(
    data: &Path,
    banner: &Path,
    tabplan: &Path,
    output: Option<&Path>,
    delimiter: char,
    format: OutputFormat,
    options: &ReportOptions,
) -> Result<()> {
    let dataset = read_dataset(data, delimiter)?;
    let banner: BannerPlan = read_json(banner)?;
    let plan: TabPlan = read_json(tabplan)?;

    let report = generate_report_with_options(&plan, &banner, &dataset, options, None)
        .context("Failed to generate report")?;

    let text = match format {
        OutputFormat::Csv => report
            .to_csv_string(&CsvWriteOptions::default())
            .context("Failed to render CSV")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &text)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!(
            "Wrote {} tables ({} respondents) to '{}'",
            report.tables.len(),
            report.metadata.total_base,
            path.display()
        );
    } else {
        io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn run_filter(data: &Path, equation: &str, delimiter: char) -> Result<()> {
    let dataset = read_dataset(data, delimiter)?;
    let expression = parse_equation(equation);
    if expression.has_unparsed() {
        eprintln!("Warning: '{}' contains conditions that match nothing", equation);
    }

    let selection = select_rows(&dataset, &expression);
    let mut stdout = io::stdout().lock();
    for index in selection.indices() {
        writeln!(stdout, "{}", index).context("Failed to write to stdout")?;
    }
    eprintln!("Matched {} of {} rows", selection.len(), dataset.len());
    Ok(())
}

fn run_likert(path: &Path) -> Result<()> {
    let question: Question = read_json(path)?;
    let detection = detect_likert(&question);

    match detection.rule {
        Some(rule) => println!("{}: Likert ({})", question.id, describe_rule(rule)),
        None => println!("{}: not a Likert scale", question.id),
    }
    for option in resolved_options(&question) {
        println!("  {}\t{}", option.code, option.label);
    }
    Ok(())
}

fn describe_rule(rule: LikertRule) -> String {
    match rule {
        LikertRule::ExplicitMode => "explicit Likert mode".to_string(),
        LikertRule::ScalePoints => "declared scale points".to_string(),
        LikertRule::Vocabulary(vocabulary) => format!("{} vocabulary", vocabulary.name()),
        LikertRule::SymmetricKeywords => "symmetric positive/negative labels".to_string(),
    }
}

fn run_nets(path: &Path, points: Option<u32>, summary: bool) -> Result<()> {
    let question: Question = read_json(path)?;
    let options = resolved_options(&question);
    let points = points
        .or_else(|| question.scale_points())
        .unwrap_or(options.len() as u32);

    let nets = auto_configure_nets_for_scale(&question, points);
    if nets.is_empty() {
        eprintln!("No box nets for a {}-point scale", points);
    }

    if summary {
        println!("{}", format_nets(&nets, &options));
    } else {
        let json = serde_json::to_string_pretty(&nets).context("Failed to serialize nets")?;
        println!("{}", json);
    }
    Ok(())
}
