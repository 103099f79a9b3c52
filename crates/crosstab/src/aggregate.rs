//! Per-column aggregation
//!
//! Every banner column is tabulated independently over the records its
//! equation selects. A column with base 0 yields empty statistics rather than
//! dividing by zero.

use ahash::AHashMap;
use crosstab_core::{
    BannerColumn, BoxStats, CategoricalStats, ColumnEntry, ColumnStats, Dataset, Frequency, Net,
    NetFrequency, NumericStats, QuestionType, Record,
};
use crosstab_equation::{filter_dataset, RowSelection};
use crosstab_nets::summary_text;

use crate::stats::{mean, median, percent, population_std_dev};

/// Codes counted as top box when a Likert question declares none
pub const DEFAULT_TOP_BOX_CODES: [f64; 2] = [1.0, 2.0];

/// Codes counted as bottom box when a Likert question declares none
pub const DEFAULT_BOTTOM_BOX_CODES: [f64; 2] = [4.0, 5.0];

/// How one question is tabulated
#[derive(Debug, Clone, Copy)]
pub struct QuestionSpec<'a> {
    pub question_id: &'a str,
    pub question_type: QuestionType,
    pub top_box_codes: &'a [f64],
    pub bottom_box_codes: &'a [f64],
    pub nets: &'a [Net],
}

impl<'a> QuestionSpec<'a> {
    pub fn new(question_id: &'a str, question_type: QuestionType) -> Self {
        QuestionSpec {
            question_id,
            question_type,
            top_box_codes: &DEFAULT_TOP_BOX_CODES,
            bottom_box_codes: &DEFAULT_BOTTOM_BOX_CODES,
            nets: &[],
        }
    }
}

/// Tabulate one question across banner columns, filtering the dataset per column.
///
/// Returns one entry per column, in column order. Missing box codes fall back
/// to [`DEFAULT_TOP_BOX_CODES`] and [`DEFAULT_BOTTOM_BOX_CODES`].
///
/// # Example
/// ```rust
/// use crosstab::{aggregate, BannerColumn, Dataset, QuestionType};
///
/// let mut dataset = Dataset::new(vec!["S1".into(), "S7".into()]);
/// dataset.push_row(["1", "2"]).unwrap();
/// dataset.push_row(["2", "2"]).unwrap();
/// dataset.push_row(["1", "3"]).unwrap();
///
/// let columns = [BannerColumn::total(), BannerColumn::new("M", "Male", "S1=1")];
/// let entries = aggregate("S7", QuestionType::Categorical, &dataset, &columns, None, None);
///
/// let male = entries[1].stats.as_categorical().unwrap();
/// assert_eq!(male.base, 2);
/// assert_eq!(male.frequency("2").unwrap().display_percent(), "50.0");
/// ```
pub fn aggregate(
    question_id: &str,
    question_type: QuestionType,
    dataset: &Dataset,
    columns: &[BannerColumn],
    top_box_codes: Option<&[f64]>,
    bottom_box_codes: Option<&[f64]>,
) -> Vec<ColumnEntry> {
    let mut spec = QuestionSpec::new(question_id, question_type);
    if let Some(top) = top_box_codes {
        spec.top_box_codes = top;
    }
    if let Some(bottom) = bottom_box_codes {
        spec.bottom_box_codes = bottom;
    }

    columns
        .iter()
        .map(|column| {
            let subset = filter_dataset(dataset, &column.equation);
            ColumnEntry {
                column: column.clone(),
                stats: column_stats(&spec, subset.len(), subset.iter().copied()),
            }
        })
        .collect()
}

/// Tabulate one question over precomputed column selections
pub fn aggregate_selections(
    spec: &QuestionSpec<'_>,
    dataset: &Dataset,
    columns: &[(BannerColumn, RowSelection)],
) -> Vec<ColumnEntry> {
    columns
        .iter()
        .map(|(column, selection)| ColumnEntry {
            column: column.clone(),
            stats: column_stats(spec, selection.len(), selection.records(dataset)),
        })
        .collect()
}

/// Statistics for one column's subset of `base` records
pub fn column_stats<'r, I>(spec: &QuestionSpec<'_>, base: usize, records: I) -> ColumnStats
where
    I: Iterator<Item = &'r Record>,
{
    let stats = match spec.question_type {
        QuestionType::Numeric => ColumnStats::Numeric(numeric_stats(spec.question_id, base, records)),
        QuestionType::Likert => ColumnStats::Likert(box_stats(spec, base, records)),
        QuestionType::Categorical => {
            ColumnStats::Categorical(categorical_stats(spec.question_id, spec.nets, base, records))
        }
    };
    log::trace!("Question {} column base {}", spec.question_id, base);
    stats
}

/// Frequency table of non-empty responses, codes in first-seen order
pub fn categorical_stats<'r, I>(question_id: &str, nets: &[Net], base: usize, records: I) -> CategoricalStats
where
    I: Iterator<Item = &'r Record>,
{
    if base == 0 {
        return CategoricalStats::default();
    }

    let mut frequencies: Vec<Frequency> = Vec::new();
    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut net_counts = vec![0usize; nets.len()];

    for record in records {
        let Some(value) = record.response(question_id) else {
            continue;
        };

        let code = value.to_string();
        match index.get(&code) {
            Some(&i) => frequencies[i].count += 1,
            None => {
                index.insert(code.clone(), frequencies.len());
                frequencies.push(Frequency {
                    code,
                    count: 1,
                    percent: 0.0,
                });
            }
        }

        for (net, count) in nets.iter().zip(net_counts.iter_mut()) {
            if net.matches(value) {
                *count += 1;
            }
        }
    }

    for f in &mut frequencies {
        f.percent = percent(f.count, base).unwrap_or_default();
    }

    let nets = nets
        .iter()
        .zip(net_counts)
        .map(|(net, count)| NetFrequency {
            label: net_label(net),
            count,
            percent: percent(count, base).unwrap_or_default(),
        })
        .collect();

    CategoricalStats {
        base,
        frequencies,
        nets,
    }
}

fn net_label(net: &Net) -> String {
    match net.label() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => {
            let summary = summary_text(net, &[]);
            summary.trim_start_matches("Net: ").to_string()
        }
    }
}

/// Mean, median and population standard deviation of numeric responses.
///
/// `base` is the size of the subset; non-numeric and empty responses are
/// skipped and not counted in `count`.
pub fn numeric_stats<'r, I>(question_id: &str, base: usize, records: I) -> NumericStats
where
    I: Iterator<Item = &'r Record>,
{
    if base == 0 {
        return NumericStats::default();
    }

    let values: Vec<f64> = records
        .filter_map(|r| r.response(question_id).and_then(|v| v.as_number()))
        .collect();

    NumericStats {
        base,
        count: values.len(),
        mean: mean(&values),
        median: median(&values),
        std_dev: population_std_dev(&values),
    }
}

/// Share of the base answering a top-box or bottom-box code
pub fn box_stats<'r, I>(spec: &QuestionSpec<'_>, base: usize, records: I) -> BoxStats
where
    I: Iterator<Item = &'r Record>,
{
    if base == 0 {
        return BoxStats::default();
    }

    let mut top = 0usize;
    let mut bottom = 0usize;
    for x in records.filter_map(|r| r.response(spec.question_id).and_then(|v| v.as_number())) {
        if spec.top_box_codes.contains(&x) {
            top += 1;
        }
        if spec.bottom_box_codes.contains(&x) {
            bottom += 1;
        }
    }

    BoxStats {
        base,
        top_box: percent(top, base),
        bottom_box: percent(bottom, base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstab_core::{CodesNet, RangeNet, RangeOperator};
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(vec!["S1".into(), "S7".into(), "AGE".into(), "Q5".into()]);
        ds.push_row(["1", "2", "20", "1"]).unwrap();
        ds.push_row(["1", "2", "40", "5"]).unwrap();
        ds.push_row(["2", "1", "n/a", "4"]).unwrap();
        ds.push_row(["2", "", "", "2"]).unwrap();
        ds
    }

    fn columns() -> Vec<BannerColumn> {
        vec![
            BannerColumn::total(),
            BannerColumn::new("M", "Male", "S1=1"),
            BannerColumn::new("X", "Nobody", "S1=9"),
        ]
    }

    #[test]
    fn test_categorical() {
        let entries = aggregate("S7", QuestionType::Categorical, &dataset(), &columns(), None, None);
        let total = entries[0].stats.as_categorical().unwrap();
        assert_eq!(total.base, 4);
        let codes: Vec<&str> = total.frequencies.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["2", "1"]);
        assert_eq!(total.frequency("2").unwrap().display_percent(), "50.0");
        assert_eq!(total.frequency("1").unwrap().display_percent(), "25.0");

        let male = entries[1].stats.as_categorical().unwrap();
        assert_eq!(male.frequency("2").unwrap().display_percent(), "100.0");
        assert_eq!(male.frequency("1"), None);

        let nobody = entries[2].stats.as_categorical().unwrap();
        assert_eq!(nobody, &CategoricalStats::default());
    }

    #[test]
    fn test_numeric() {
        let entries = aggregate("AGE", QuestionType::Numeric, &dataset(), &columns(), None, None);
        let total = entries[0].stats.as_numeric().unwrap();
        assert_eq!(total.base, 4);
        assert_eq!(total.count, 2);
        assert_eq!(total.mean, Some(30.0));
        assert_eq!(total.median, Some(30.0));
        assert_eq!(total.std_dev, Some(10.0));

        let nobody = entries[2].stats.as_numeric().unwrap();
        assert_eq!(nobody.base, 0);
        assert_eq!(nobody.mean, None);
        assert_eq!(nobody.std_dev, None);
    }

    #[test]
    fn test_box() {
        let entries = aggregate(
            "Q5",
            QuestionType::Likert,
            &dataset(),
            &columns(),
            Some(&[4.0, 5.0]),
            Some(&[1.0, 2.0]),
        );
        let total = entries[0].stats.as_box().unwrap();
        assert_eq!(total.top_box, Some(50.0));
        assert_eq!(total.bottom_box, Some(50.0));

        let defaults = aggregate("Q5", QuestionType::Likert, &dataset(), &columns(), None, None);
        let total = defaults[0].stats.as_box().unwrap();
        assert_eq!(total.top_box, Some(50.0));

        let nobody = entries[2].stats.as_box().unwrap();
        assert_eq!(nobody.top_box, None);
        assert_eq!(nobody.bottom_box, None);
    }

    #[test]
    fn test_nets_counted_against_base() {
        let nets = vec![
            Net::Codes(CodesNet {
                label: Some("T2B".into()),
                codes: vec!["4".into(), "5".into()],
            }),
            Net::Range(RangeNet {
                label: None,
                operator: RangeOperator::LessEqual,
                value1: 2.0,
                value2: None,
            }),
        ];
        let mut spec = QuestionSpec::new("Q5", QuestionType::Categorical);
        spec.nets = &nets;

        let ds = dataset();
        let stats = categorical_stats(spec.question_id, spec.nets, ds.len(), ds.iter());
        assert_eq!(stats.nets[0].label, "T2B");
        assert_eq!(stats.nets[0].count, 2);
        assert_eq!(stats.net_percent("T2B"), Some(50.0));
        assert_eq!(stats.nets[1].label, "≤ 2");
        assert_eq!(stats.nets[1].count, 2);
    }

    #[test]
    fn test_many_codes_keep_first_seen_order() {
        let mut ds = Dataset::new(vec!["Q9".into()]);
        for i in 0..500 {
            ds.push_row([(i * 37 % 100).to_string()]).unwrap();
        }

        let stats = categorical_stats("Q9", &[], ds.len(), ds.iter());
        let codes: Vec<String> = stats.frequencies.iter().map(|f| f.code.clone()).collect();
        let expected: Vec<String> = (0..100).map(|i| (i * 37 % 100).to_string()).collect();
        assert_eq!(codes, expected);
        assert!(stats.frequencies.iter().all(|f| f.count == 5));
        assert_eq!(stats.frequency("37").unwrap().display_percent(), "1.0");
    }

    #[test]
    fn test_selections_match_filtering() {
        let ds = dataset();
        let cols = columns();
        let selections: Vec<(BannerColumn, RowSelection)> = cols
            .iter()
            .map(|c| {
                let expr = crosstab_equation::parse_equation(&c.equation);
                (c.clone(), crosstab_equation::select_rows(&ds, &expr))
            })
            .collect();

        let spec = QuestionSpec::new("S7", QuestionType::Categorical);
        assert_eq!(
            aggregate_selections(&spec, &ds, &selections),
            aggregate("S7", QuestionType::Categorical, &ds, &cols, None, None)
        );
    }
}
