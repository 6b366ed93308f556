use serde::{Deserialize, Serialize};

use crate::models::domain::CanvasId;

/// Answer weight of a correct answer.
pub const CORRECT_WEIGHT: u8 = 100;
/// Answer weight of a wrong answer.
pub const INCORRECT_WEIGHT: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Copy)]
pub enum QuestionType {
    #[serde(rename = "multiple_choice_question")]
    MultipleChoice,
    #[serde(rename = "multiple_answers_question")]
    MultipleAnswers,
    #[serde(rename = "numerical_question")]
    Numerical,
    #[serde(rename = "essay_question")]
    Essay,
    #[serde(rename = "file_upload_question")]
    FileUpload,
    #[serde(rename = "short_answer_question")]
    ShortAnswer,
    #[serde(rename = "true_false_question")]
    TrueFalse,
    #[serde(rename = "text_only_question")]
    TextOnly,
    #[serde(rename = "fill_in_multiple_blanks_question")]
    FillInMultipleBlanks,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice_question",
            QuestionType::MultipleAnswers => "multiple_answers_question",
            QuestionType::Numerical => "numerical_question",
            QuestionType::Essay => "essay_question",
            QuestionType::FileUpload => "file_upload_question",
            QuestionType::ShortAnswer => "short_answer_question",
            QuestionType::TrueFalse => "true_false_question",
            QuestionType::TextOnly => "text_only_question",
            QuestionType::FillInMultipleBlanks => "fill_in_multiple_blanks_question",
        }
    }

    /// Points used when the caller does not give any. `None` means ungraded.
    pub fn default_points(&self) -> Option<f64> {
        match self {
            QuestionType::FileUpload => Some(0.0),
            QuestionType::TextOnly => None,
            _ => Some(1.0),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub text: String,
    pub weight: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blank_id: Option<char>,
}

impl AnswerRecord {
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: CORRECT_WEIGHT,
            blank_id: None,
        }
    }

    pub fn incorrect(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: INCORRECT_WEIGHT,
            blank_id: None,
        }
    }

    pub fn blank(text: impl Into<String>, blank_id: char) -> Self {
        Self {
            blank_id: Some(blank_id),
            ..Self::correct(text)
        }
    }

    pub fn is_correct(&self) -> bool {
        self.weight == CORRECT_WEIGHT
    }
}

/// The single answer of a numerical question, serialized with the
/// `numerical_answer_type` tag the LMS expects.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "numerical_answer_type", rename_all = "snake_case")]
pub enum NumericAnswerSpec {
    PrecisionAnswer {
        #[serde(rename = "answer_approximate")]
        approximate: f64,
        #[serde(rename = "answer_precision")]
        precision: f64,
    },
    ExactAnswer {
        #[serde(rename = "answer_exact")]
        exact: f64,
        #[serde(rename = "answer_error_margin")]
        error_margin: f64,
    },
    RangeAnswer {
        #[serde(rename = "answer_range_start")]
        start: f64,
        #[serde(rename = "answer_range_end")]
        end: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuestionAnswers {
    Records(Vec<AnswerRecord>),
    /// `None` when no complete numeric parameter set was supplied.
    Numerical(Option<NumericAnswerSpec>),
}

impl QuestionAnswers {
    pub fn records(&self) -> &[AnswerRecord] {
        match self {
            QuestionAnswers::Records(records) => records,
            QuestionAnswers::Numerical(_) => &[],
        }
    }

    pub fn numeric(&self) -> Option<&NumericAnswerSpec> {
        match self {
            QuestionAnswers::Numerical(spec) => spec.as_ref(),
            QuestionAnswers::Records(_) => None,
        }
    }
}

/// Canonical, type-uniform question prior to wire serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub title: String,
    pub question_type: QuestionType,
    pub text: String,
    pub points: Option<f64>,
    pub answers: QuestionAnswers,
    pub group_id: Option<CanvasId>,
}

/// A question accepted by the LMS, with the id it was assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmittedQuestion {
    pub id: CanvasId,
    pub question: Question,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_type_serializes_to_wire_name() {
        let json = serde_json::to_string(&QuestionType::FillInMultipleBlanks).unwrap();
        assert_eq!(json, "\"fill_in_multiple_blanks_question\"");
        assert_eq!(
            QuestionType::TrueFalse.to_string(),
            "true_false_question"
        );
    }

    #[test]
    fn question_type_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<QuestionType>("\"matching_question\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn default_points_per_type() {
        assert_eq!(QuestionType::MultipleChoice.default_points(), Some(1.0));
        assert_eq!(QuestionType::FileUpload.default_points(), Some(0.0));
        assert_eq!(QuestionType::TextOnly.default_points(), None);
    }

    #[test]
    fn answer_record_omits_missing_blank_id() {
        let value = serde_json::to_value(AnswerRecord::correct("Paris")).unwrap();
        assert_eq!(value, json!({ "text": "Paris", "weight": 100 }));

        let value = serde_json::to_value(AnswerRecord::blank("red", 'a')).unwrap();
        assert_eq!(value, json!({ "text": "red", "weight": 100, "blank_id": "a" }));
    }

    #[test]
    fn numeric_answer_carries_type_tag() {
        let value = serde_json::to_value(NumericAnswerSpec::RangeAnswer {
            start: 1.0,
            end: 10.0,
        })
        .unwrap();

        assert_eq!(
            value,
            json!({
                "numerical_answer_type": "range_answer",
                "answer_range_start": 1.0,
                "answer_range_end": 10.0
            })
        );
    }

    #[test]
    fn question_answers_accessors() {
        let records = QuestionAnswers::Records(vec![AnswerRecord::incorrect("no")]);
        assert_eq!(records.records().len(), 1);
        assert!(records.numeric().is_none());

        let unset = QuestionAnswers::Numerical(None);
        assert!(unset.numeric().is_none());
        assert!(unset.records().is_empty());
    }
}
