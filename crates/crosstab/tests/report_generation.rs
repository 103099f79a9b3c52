//! End-to-end report runs: dataset in, tables and CSV out

use chrono::{TimeZone, Utc};
use crosstab::prelude::*;
use crosstab::{aggregate, format_fixed, CodesNet, RangeNet, RangeOperator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn read(text: &str) -> Dataset {
    DatasetReader::read_str(text, &CsvReadOptions::default()).unwrap()
}

fn fixed_options() -> ReportOptions {
    ReportOptions {
        project_name: Some("Tracker".into()),
        generated_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
        ..Default::default()
    }
}

#[test]
fn test_single_code_column() {
    let dataset = read("S7\n2\n2\n3\n");
    let columns = [BannerColumn::new("C", "Seg 2", "S7=2")];
    let entries = aggregate("S7", QuestionType::Categorical, &dataset, &columns, None, None);

    let stats = entries[0].stats.as_categorical().unwrap();
    assert_eq!(stats.base, 2);
    assert_eq!(stats.frequencies.len(), 1);
    assert_eq!(stats.frequency("2").unwrap().count, 2);
    assert_eq!(stats.frequency("2").unwrap().display_percent(), "100.0");
}

#[test]
fn test_range_selects_every_row() {
    let dataset = read("Q1\n1\n2\n3\n4\n5\n6\n7\n8\n9\n");
    assert_eq!(filter_dataset(&dataset, "Q1=1-9").len(), dataset.len());
}

#[test]
fn test_compound_equations() {
    let dataset = read("S1,S7,Q1\n1,2,6\n1,2,5\n2,1,9\n3,2,8\n");
    let matches = |equation: &str| -> Vec<usize> {
        dataset
            .iter()
            .enumerate()
            .filter(|(_, r)| evaluate(equation, r))
            .map(|(i, _)| i)
            .collect()
    };
    assert_eq!(matches("S7=2 AND Q1>5"), vec![0, 3]);
    assert_eq!(matches("S1=1 OR S1=2"), vec![0, 1, 2]);
}

#[test]
fn test_population_std_dev_in_report() {
    let dataset = read("AGE\n2\n4\n4\n4\n5\n5\n7\n9\n");
    let plan = TabPlan::new(vec![TabPlanQuestion::new("AGE", "Age", QuestionType::Numeric)]);
    let report = generate_report(&plan, &BannerPlan::new("Total only"), &dataset);

    let stats = report.tables[0].stats("TOTAL").unwrap().as_numeric().unwrap();
    assert_eq!(stats.mean, Some(5.0));
    assert_eq!(stats.std_dev, Some(2.0));
    assert_eq!(stats.median, Some(4.5));
}

#[test]
fn test_zero_base_columns_are_null() {
    let dataset = read("S1,AGE,Q5,S7\n1,30,5,1\n");
    let banner = BannerPlan::new("B").with_group(
        BannerGroup::new("G", "Nobody").with_column(BannerColumn::new("N", "None", "S1=9")),
    );
    let plan = TabPlan::new(vec![
        TabPlanQuestion::new("AGE", "Age", QuestionType::Numeric),
        TabPlanQuestion::new("Q5", "Agree", QuestionType::Likert),
        TabPlanQuestion::new("S7", "Segment", QuestionType::Categorical),
    ]);
    let report = generate_report(&plan, &banner, &dataset);

    let numeric = report.tables[0].stats("N").unwrap().as_numeric().unwrap();
    assert_eq!((numeric.base, numeric.mean, numeric.median, numeric.std_dev), (0, None, None, None));

    let boxes = report.tables[1].stats("N").unwrap().as_box().unwrap();
    assert_eq!((boxes.top_box, boxes.bottom_box), (None, None));

    let categorical = report.tables[2].stats("N").unwrap().as_categorical().unwrap();
    assert!(categorical.frequencies.is_empty());
}

#[test]
fn test_csv_export_layout() {
    let dataset = read("S1,S7\n1,2\n1,1\n2,3\n2,2\n");
    let banner = BannerPlan::new("Gender").with_group(
        BannerGroup::new("G1", "Gender").with_column(BannerColumn::new("M", "Male", "S1=1")),
    );
    let plan = TabPlan::new(vec![TabPlanQuestion::new("S7", "Segment", QuestionType::Categorical)]);
    let report =
        generate_report_with_options(&plan, &banner, &dataset, &fixed_options(), None).unwrap();

    let csv = report.to_csv_string(&CsvWriteOptions::default()).unwrap();
    assert_eq!(
        csv,
        "Cross-Tabulation Report\n\
         Project: Tracker\n\
         Banner: Gender\n\
         Total Base: 4\n\
         Generated: 6/1/2024, 12:00:00 PM\n\
         \n\
         \n\
         S7: Segment\n\
         Type: categorical\n\
         \n\
         Column,Total,Male\n\
         Equation,TOTAL,S1=1\n\
         Base,4,2\n\
         Code 1 %,25.0,50.0\n\
         Code 2 %,50.0,50.0\n\
         Code 3 %,25.0,0.0\n\
         \n"
    );
}

#[test]
fn test_likert_box_codes_from_plan_and_defaults() {
    let dataset = read("Q5\n1\n2\n4\n5\n5\n");
    let plan = TabPlan::new(vec![
        TabPlanQuestion::new("Q5", "Default boxes", QuestionType::Likert),
        TabPlanQuestion::new("Q5", "Declared boxes", QuestionType::Likert)
            .with_box_codes(vec![4.0, 5.0], vec![1.0, 2.0]),
    ]);
    let report = generate_report(&plan, &BannerPlan::new("B"), &dataset);

    let defaults = report.tables[0].stats("TOTAL").unwrap().as_box().unwrap();
    assert_eq!(defaults.top_box.map(|p| format_fixed(p, 1)), Some("40.0".to_string()));
    assert_eq!(defaults.bottom_box.map(|p| format_fixed(p, 1)), Some("60.0".to_string()));

    let declared = report.tables[1].stats("TOTAL").unwrap().as_box().unwrap();
    assert_eq!(declared.top_box.map(|p| format_fixed(p, 1)), Some("60.0".to_string()));
}

#[test]
fn test_nets_exported_after_codes() {
    let dataset = read("AGE\n20\n30\n70\n");
    let nets = vec![
        Net::Range(RangeNet {
            label: Some("18-34".into()),
            operator: RangeOperator::Between,
            value1: 18.0,
            value2: Some(34.0),
        }),
        Net::Codes(CodesNet {
            label: Some("Seventy".into()),
            codes: vec!["70".into()],
        }),
    ];
    let plan = TabPlan::new(vec![
        TabPlanQuestion::new("AGE", "Age band", QuestionType::Categorical).with_nets(nets),
    ]);
    let report =
        generate_report_with_options(&plan, &BannerPlan::new("B"), &dataset, &fixed_options(), None)
            .unwrap();
    let csv = report.to_csv_string(&CsvWriteOptions::default()).unwrap();

    assert!(csv.contains(
        "Code 20 %,33.3\nCode 30 %,33.3\nCode 70 %,33.3\nNet 18-34 %,66.7\nNet Seventy %,33.3\n"
    ));
}

#[test]
fn test_save_csv_to_file() {
    let dataset = read("S7\n1\n");
    let plan = TabPlan::new(vec![TabPlanQuestion::new("S7", "", QuestionType::Categorical)]);
    let report =
        generate_report_with_options(&plan, &BannerPlan::new("B"), &dataset, &fixed_options(), None)
            .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    report.save_csv(&path, &CsvWriteOptions::default()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    // Empty question text falls back to the id
    assert!(text.contains("\nS7: S7\n"));
}

proptest! {
    #[test]
    fn prop_numeric_stats_ignore_row_order(mut ages in proptest::collection::vec(0u32..100, 1..30)) {
        let build = |ages: &[u32]| {
            let mut ds = Dataset::new(vec!["AGE".into()]);
            for a in ages {
                ds.push_row([a.to_string()]).unwrap();
            }
            ds
        };
        let columns = [BannerColumn::total()];
        let forward = aggregate("AGE", QuestionType::Numeric, &build(&ages), &columns, None, None);
        ages.reverse();
        let backward = aggregate("AGE", QuestionType::Numeric, &build(&ages), &columns, None, None);

        let (f, b) = (
            forward[0].stats.as_numeric().unwrap(),
            backward[0].stats.as_numeric().unwrap(),
        );
        prop_assert_eq!(f.median, b.median);
        prop_assert!((f.mean.unwrap() - b.mean.unwrap()).abs() < 1e-9);
        prop_assert!((f.std_dev.unwrap() - b.std_dev.unwrap()).abs() < 1e-9);
    }
}
