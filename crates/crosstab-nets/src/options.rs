//! Resolving a question's answer options from whichever shape it was authored in

use crosstab_core::Question;

/// One resolved answer option
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionEntry {
    pub code: String,
    pub label: String,
}

impl OptionEntry {
    pub fn new<C: Into<String>, L: Into<String>>(code: C, label: L) -> Self {
        OptionEntry {
            code: code.into(),
            label: label.into(),
        }
    }
}

fn positional<'a, I>(labels: I) -> Vec<OptionEntry>
where
    I: IntoIterator<Item = &'a String>,
{
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| OptionEntry::new((i + 1).to_string(), label.clone()))
        .collect()
}

/// Options from the first populated shape, tried in this order:
///
/// 1. plain options (a missing code defaults to the 1-based position)
/// 2. grid columns, for `table`/`advanced_table` mode
/// 3. advanced table columns, for `advanced_table` mode
/// 4. grid columns, for `*grid*` question types
/// 5. declared scale labels
pub fn question_options(question: &Question) -> Vec<OptionEntry> {
    if !question.options.is_empty() {
        return question
            .options
            .iter()
            .enumerate()
            .map(|(i, opt)| {
                let code = match &opt.code {
                    Some(code) if !code.is_missing() => code.to_string(),
                    _ => (i + 1).to_string(),
                };
                OptionEntry::new(code, opt.label.clone().unwrap_or_default())
            })
            .collect();
    }

    let grid_cols = question
        .grid
        .as_ref()
        .map(|g| g.cols.as_slice())
        .filter(|cols| !cols.is_empty());

    if question.is_table_mode() {
        if let Some(cols) = grid_cols {
            return positional(cols);
        }
    }

    if question.mode.as_deref() == Some("advanced_table") {
        if let Some(table) = question.advanced_table.as_ref().filter(|t| !t.cols.is_empty()) {
            return positional(&table.cols);
        }
    }

    if question.question_type.contains("grid") {
        if let Some(cols) = grid_cols {
            return positional(cols);
        }
    }

    if let Some(scale) = question.scale.as_ref().filter(|s| !s.labels.is_empty()) {
        return positional(&scale.labels);
    }

    Vec::new()
}

const AGREEMENT_3: &[&str] = &["Disagree", "Neither Agree nor Disagree", "Agree"];
const AGREEMENT_5: &[&str] = &[
    "Strongly Disagree",
    "Disagree",
    "Neither Agree nor Disagree",
    "Agree",
    "Strongly Agree",
];
const AGREEMENT_7: &[&str] = &[
    "Strongly Disagree",
    "Disagree",
    "Somewhat Disagree",
    "Neither Agree nor Disagree",
    "Somewhat Agree",
    "Agree",
    "Strongly Agree",
];
const SENTIMENT_3: &[&str] = &["Dissatisfied", "Neither", "Satisfied"];
const SENTIMENT_5: &[&str] = &[
    "Very Dissatisfied",
    "Dissatisfied",
    "Neither",
    "Satisfied",
    "Very Satisfied",
];
const SENTIMENT_7: &[&str] = &[
    "Very Dissatisfied",
    "Dissatisfied",
    "Somewhat Dissatisfied",
    "Neither",
    "Somewhat Satisfied",
    "Satisfied",
    "Very Satisfied",
];
const CUSTOM_3: &[&str] = &["Low", "Medium", "High"];
const CUSTOM_5: &[&str] = &["Very Low", "Low", "Medium", "High", "Very High"];
const CUSTOM_7: &[&str] = &[
    "Very Low",
    "Low",
    "Somewhat Low",
    "Medium",
    "Somewhat High",
    "High",
    "Very High",
];

/// Default labels for an explicit Likert mode.
///
/// Unknown modes use the custom set; point counts other than 3, 5 or 7 use
/// the 5-point labels.
///
/// # Example
/// ```rust
/// use crosstab_nets::default_likert_labels;
///
/// assert_eq!(default_likert_labels("likert_custom", 3), ["Low", "Medium", "High"]);
/// assert_eq!(default_likert_labels("likert_agreement", 4).len(), 5);
/// ```
pub fn default_likert_labels(mode: &str, points: u32) -> &'static [&'static str] {
    let (three, five, seven) = match mode {
        "likert_agreement" => (AGREEMENT_3, AGREEMENT_5, AGREEMENT_7),
        "likert_sentiment" => (SENTIMENT_3, SENTIMENT_5, SENTIMENT_7),
        _ => (CUSTOM_3, CUSTOM_5, CUSTOM_7),
    };
    match points {
        3 => three,
        7 => seven,
        _ => five,
    }
}

/// [`question_options`], falling back to default Likert labels for a
/// question with an explicit Likert mode and no authored options.
pub fn resolved_options(question: &Question) -> Vec<OptionEntry> {
    let options = question_options(question);
    if !options.is_empty() {
        return options;
    }

    match question.likert_mode() {
        Some(mode) => {
            let points = question.scale_points().unwrap_or(5);
            log::debug!(
                "Question {} has no options; using default {} labels",
                question.id,
                mode
            );
            default_likert_labels(mode, points)
                .iter()
                .enumerate()
                .map(|(i, label)| OptionEntry::new((i + 1).to_string(), *label))
                .collect()
        }
        None => Vec::new(),
    }
}

/// Option codes of a question, in authored order
pub fn valid_codes(question: &Question) -> Vec<String> {
    resolved_options(question)
        .into_iter()
        .map(|o| o.code)
        .collect()
}
