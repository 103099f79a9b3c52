//! Likert scale detection.
//!
//! Rules are tried in order and the first that fires wins:
//!
//! 1. explicit Likert mode tag
//! 2. declared scale with at least 4 points
//! 3. option labels matching a known scale vocabulary (needs at least 4 labels)
//! 4. option labels with negative and positive (or neutral) keywords

use std::fmt;

use crosstab_core::Question;

use crate::options::question_options;

/// Minimum option count for label-based detection
const MIN_LABELS: usize = 4;

/// Known rating-scale vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScaleVocabulary {
    Agreement,
    Satisfaction,
    Frequency,
    Likelihood,
    Quality,
    Importance,
    Intensity,
}

impl ScaleVocabulary {
    pub fn name(self) -> &'static str {
        match self {
            ScaleVocabulary::Agreement => "agreement",
            ScaleVocabulary::Satisfaction => "satisfaction",
            ScaleVocabulary::Frequency => "frequency",
            ScaleVocabulary::Likelihood => "likelihood",
            ScaleVocabulary::Quality => "quality",
            ScaleVocabulary::Importance => "importance",
            ScaleVocabulary::Intensity => "intensity",
        }
    }
}

impl fmt::Display for ScaleVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword sets, checked in order. A set matches when at least 60% of its
/// keywords occur in the joined lower-case labels.
const VOCABULARIES: &[(ScaleVocabulary, &[&str])] = &[
    (ScaleVocabulary::Agreement, &["strongly disagree", "disagree", "agree", "strongly agree"]),
    (ScaleVocabulary::Agreement, &["strongly", "disagree", "agree"]),
    (ScaleVocabulary::Agreement, &["completely disagree", "disagree", "agree", "completely agree"]),
    (ScaleVocabulary::Satisfaction, &["very dissatisfied", "dissatisfied", "satisfied", "very satisfied"]),
    (ScaleVocabulary::Satisfaction, &["extremely dissatisfied", "dissatisfied", "satisfied", "extremely satisfied"]),
    (ScaleVocabulary::Satisfaction, &["unsatisfied", "satisfied"]),
    (ScaleVocabulary::Frequency, &["never", "rarely", "sometimes", "often", "always"]),
    (ScaleVocabulary::Frequency, &["never", "occasionally", "frequently", "always"]),
    (ScaleVocabulary::Likelihood, &["very unlikely", "unlikely", "likely", "very likely"]),
    (ScaleVocabulary::Likelihood, &["extremely unlikely", "unlikely", "likely", "extremely likely"]),
    (ScaleVocabulary::Quality, &["very poor", "poor", "good", "very good", "excellent"]),
    (ScaleVocabulary::Quality, &["terrible", "poor", "fair", "good", "excellent"]),
    (ScaleVocabulary::Importance, &["not important", "important", "very important"]),
    (ScaleVocabulary::Importance, &["unimportant", "important", "extremely important"]),
    (ScaleVocabulary::Intensity, &["not at all", "slightly", "moderately", "very", "extremely"]),
    (ScaleVocabulary::Intensity, &["none", "little", "some", "lot", "great deal"]),
];

const NEGATIVE: &[&str] = &["not", "dis", "un", "never", "poor", "bad", "low", "weak"];
const POSITIVE: &[&str] = &["very", "good", "excellent", "high", "strong", "always", "extremely"];
const NEUTRAL: &[&str] = &["neutral", "neither", "moderate", "medium", "sometimes", "fair"];

/// Which detection rule classified a question as Likert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "rule", content = "vocabulary", rename_all = "snake_case"))]
pub enum LikertRule {
    ExplicitMode,
    ScalePoints,
    Vocabulary(ScaleVocabulary),
    SymmetricKeywords,
}

impl fmt::Display for LikertRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikertRule::ExplicitMode => f.write_str("explicit Likert mode"),
            LikertRule::ScalePoints => f.write_str("declared scale of 4+ points"),
            LikertRule::Vocabulary(v) => write!(f, "{v} vocabulary"),
            LikertRule::SymmetricKeywords => f.write_str("symmetric keywords"),
        }
    }
}

/// Outcome of Likert detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LikertDetection {
    /// The rule that fired, or `None` when the question is not a Likert scale
    pub rule: Option<LikertRule>,
}

impl LikertDetection {
    pub fn is_likert(&self) -> bool {
        self.rule.is_some()
    }
}

/// Classify a question, reporting which rule fired
pub fn detect_likert(question: &Question) -> LikertDetection {
    let rule = if question.likert_mode().is_some() {
        Some(LikertRule::ExplicitMode)
    } else if question.scale_points().is_some_and(|p| p >= 4) {
        Some(LikertRule::ScalePoints)
    } else {
        let labels: Vec<String> = question_options(question)
            .into_iter()
            .map(|o| o.label)
            .collect();
        classify_labels(&labels)
    };

    if let Some(rule) = rule {
        log::trace!("Question {} detected as Likert ({})", question.id, rule);
    }
    LikertDetection { rule }
}

/// Whether a question is a Likert scale
pub fn is_likert_scale(question: &Question) -> bool {
    detect_likert(question).is_likert()
}

/// Apply the label rules alone. Fewer than 4 labels never classify.
pub fn classify_labels<S: AsRef<str>>(labels: &[S]) -> Option<LikertRule> {
    if labels.len() < MIN_LABELS {
        return None;
    }

    let lowered: Vec<String> = labels.iter().map(|l| l.as_ref().to_lowercase()).collect();
    let joined = lowered.join(" ");

    for (vocabulary, keywords) in VOCABULARIES {
        let hits = keywords.iter().filter(|k| joined.contains(*k)).count();
        let needed = (keywords.len() * 3).div_ceil(5);
        if hits >= needed {
            return Some(LikertRule::Vocabulary(*vocabulary));
        }
    }

    let any = |words: &[&str]| {
        lowered
            .iter()
            .any(|label| words.iter().any(|w| label.contains(w)))
    };
    let negative = any(NEGATIVE);
    let positive = any(POSITIVE);
    let neutral = any(NEUTRAL);

    if (negative && positive) || (neutral && (negative || positive)) {
        return Some(LikertRule::SymmetricKeywords);
    }
    None
}
