//! Tab plan: the ordered list of questions to tabulate

use std::fmt;

use crate::net::Net;

/// How a question's responses are summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum QuestionType {
    /// Frequency table of raw response codes
    #[default]
    Categorical,
    /// Mean / median / standard deviation
    Numeric,
    /// Top-box / bottom-box percentages
    Likert,
}

impl QuestionType {
    /// Resolve a type name; anything unrecognized is categorical
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "numeric" => QuestionType::Numeric,
            "likert" => QuestionType::Likert,
            _ => QuestionType::Categorical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Categorical => "categorical",
            QuestionType::Numeric => "numeric",
            QuestionType::Likert => "likert",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for QuestionType {
    fn from(s: String) -> Self {
        QuestionType::from_name(&s)
    }
}

impl From<QuestionType> for String {
    fn from(t: QuestionType) -> Self {
        t.as_str().to_string()
    }
}

/// One row of the tab plan
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TabPlanQuestion {
    /// Variable code in the dataset (e.g. `Q1`)
    #[cfg_attr(feature = "serde", serde(alias = "variable"))]
    pub question_id: String,
    /// Display text; the question id is used when empty
    #[cfg_attr(feature = "serde", serde(default))]
    pub question_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub question_type: QuestionType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub top_box_codes: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bottom_box_codes: Option<Vec<f64>>,
    /// Nets reported as extra rows of categorical tables
    #[cfg_attr(feature = "serde", serde(default))]
    pub nets: Vec<Net>,
}

impl TabPlanQuestion {
    pub fn new<I: Into<String>, T: Into<String>>(
        question_id: I,
        question_text: T,
        question_type: QuestionType,
    ) -> Self {
        TabPlanQuestion {
            question_id: question_id.into(),
            question_text: question_text.into(),
            question_type,
            ..Default::default()
        }
    }

    /// Builder-style setter for top/bottom box codes
    pub fn with_box_codes(mut self, top: Vec<f64>, bottom: Vec<f64>) -> Self {
        self.top_box_codes = Some(top);
        self.bottom_box_codes = Some(bottom);
        self
    }

    /// Builder-style setter for nets
    pub fn with_nets(mut self, nets: Vec<Net>) -> Self {
        self.nets = nets;
        self
    }

    /// Text to display, falling back to the question id
    pub fn display_text(&self) -> &str {
        if self.question_text.is_empty() {
            &self.question_id
        } else {
            &self.question_text
        }
    }
}

/// The ordered list of questions analyzed in a report
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TabPlan {
    #[cfg_attr(feature = "serde", serde(default))]
    pub project_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub questions: Vec<TabPlanQuestion>,
}

impl TabPlan {
    pub fn new(questions: Vec<TabPlanQuestion>) -> Self {
        TabPlan {
            project_name: None,
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_from_name() {
        assert_eq!(QuestionType::from_name("numeric"), QuestionType::Numeric);
        assert_eq!(QuestionType::from_name("Likert"), QuestionType::Likert);
        assert_eq!(QuestionType::from_name("single"), QuestionType::Categorical);
        assert_eq!(QuestionType::from_name(""), QuestionType::Categorical);
    }

    #[test]
    fn test_display_text() {
        let q = TabPlanQuestion::new("Q1", "", QuestionType::Numeric);
        assert_eq!(q.display_text(), "Q1");
        let q = TabPlanQuestion::new("Q1", "Age", QuestionType::Numeric);
        assert_eq!(q.display_text(), "Age");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_tab_plan() {
        let json = r#"{
            "projectName": "Brand Tracker",
            "questions": [
                {"questionId": "S7", "questionText": "Region"},
                {"variable": "Q3", "questionType": "likert", "topBoxCodes": [4, 5]},
                {"questionId": "Q4", "questionType": "open_end"}
            ]
        }"#;
        let plan: TabPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.project_name.as_deref(), Some("Brand Tracker"));
        assert_eq!(plan.questions[0].question_type, QuestionType::Categorical);
        assert_eq!(plan.questions[1].question_id, "Q3");
        assert_eq!(plan.questions[1].top_box_codes, Some(vec![4.0, 5.0]));
        assert_eq!(plan.questions[2].question_type, QuestionType::Categorical);
    }
}
