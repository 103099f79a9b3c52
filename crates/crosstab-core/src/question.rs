//! Authored questionnaire items.
//!
//! A question's answer options can live in several shapes depending on how it
//! was authored (plain options, table/grid columns, or declared scale labels).
//! Net generation and Likert detection read these shapes; aggregation does not.

use crate::value::Value;

/// Scale mode tags that mark a question as an explicit Likert scale
pub const LIKERT_MODES: [&str; 3] = ["likert_agreement", "likert_sentiment", "likert_custom"];

/// One answer option of a single/multi question
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionOption {
    /// Response code; defaults to the 1-based position when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub code: Option<Value>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
}

impl QuestionOption {
    pub fn new<C: Into<Value>, L: Into<String>>(code: C, label: L) -> Self {
        QuestionOption {
            code: Some(code.into()),
            label: Some(label.into()),
        }
    }
}

/// Rows and columns of a grid or table question
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    #[cfg_attr(feature = "serde", serde(default))]
    pub rows: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cols: Vec<String>,
}

/// A declared ordinal scale
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    #[cfg_attr(feature = "serde", serde(default))]
    pub points: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: Vec<String>,
}

/// A questionnaire item as authored.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Question {
    pub id: String,
    /// Authoring type, e.g. `single`, `multi`, `grid_single`, `numeric`
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub question_type: String,
    /// Presentation mode, e.g. `table`, `advanced_table`, `likert_agreement`
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<QuestionOption>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grid: Option<Grid>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub advanced_table: Option<Grid>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: Option<Scale>,
}

impl Question {
    pub fn new<I: Into<String>, T: Into<String>>(id: I, question_type: T) -> Self {
        Question {
            id: id.into(),
            question_type: question_type.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for plain options
    pub fn with_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = QuestionOption>,
    {
        self.options = options.into_iter().collect();
        self
    }

    /// Builder-style setter for the presentation mode
    pub fn with_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Builder-style setter for the declared scale
    pub fn with_scale(mut self, points: Option<u32>, labels: Vec<String>) -> Self {
        self.scale = Some(Scale { points, labels });
        self
    }

    /// Builder-style setter for grid columns
    pub fn with_grid_cols(mut self, cols: Vec<String>) -> Self {
        self.grid = Some(Grid {
            rows: Vec::new(),
            cols,
        });
        self
    }

    /// The explicit Likert mode tag, if the question carries one
    pub fn likert_mode(&self) -> Option<&str> {
        self.mode
            .as_deref()
            .filter(|m| LIKERT_MODES.contains(m))
    }

    /// Whether the presentation mode is one of the table modes
    pub fn is_table_mode(&self) -> bool {
        matches!(self.mode.as_deref(), Some("table") | Some("advanced_table"))
    }

    /// Declared scale point count
    pub fn scale_points(&self) -> Option<u32> {
        self.scale.as_ref().and_then(|s| s.points)
    }
}
