use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::models::domain::course::ModuleItemType;
use crate::models::domain::quiz_question::{
    AnswerRecord, NumericAnswerSpec, Question, QuestionAnswers, QuestionType,
};
use crate::models::domain::CanvasId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    PracticeQuiz,
    Assignment,
    GradedSurvey,
    Survey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HideResults {
    Always,
    UntilAfterLastAttempt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    KeepHighest,
    KeepLatest,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: String,
    pub quiz_type: QuizType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_group_id: Option<CanvasId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub shuffle_answers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_results: Option<HideResults>,
    pub show_correct_answers: bool,
    pub show_correct_answers_last_attempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_correct_answers_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_correct_answers_at: Option<DateTime<Utc>>,
    #[validate(range(min = -1))]
    pub allowed_attempts: i32, // -1 means unlimited
    pub scoring_policy: ScoringPolicy,
    pub one_question_at_a_time: bool,
    pub cant_go_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_at: Option<DateTime<Utc>>,
    pub published: bool,
    pub one_time_results: bool,
    pub only_visible_to_overrides: bool,
}

impl CreateQuizRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for CreateQuizRequest {
    fn default() -> Self {
        Self {
            title: "Quiz".to_string(),
            description: String::new(),
            quiz_type: QuizType::PracticeQuiz,
            assignment_group_id: None,
            time_limit: None,
            shuffle_answers: true,
            hide_results: Some(HideResults::Always),
            show_correct_answers: false,
            show_correct_answers_last_attempt: false,
            show_correct_answers_at: None,
            hide_correct_answers_at: None,
            allowed_attempts: 1,
            scoring_policy: ScoringPolicy::KeepLatest,
            one_question_at_a_time: false,
            cant_go_back: false,
            access_code: None,
            ip_filter: None,
            due_at: None,
            lock_at: None,
            unlock_at: None,
            published: false,
            one_time_results: false,
            only_visible_to_overrides: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct QuizGroupRequest {
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub pick_count: u32,
    #[validate(range(min = 0.0))]
    pub question_points: f64,
}

/// Feedback fields sent with every question; left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionComments {
    pub correct_comments: String,
    pub incorrect_comments: String,
    pub neutral_comments: String,
    pub correct_comments_html: String,
    pub incorrect_comments_html: String,
    pub neutral_comments_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    Choice(AnswerRecord),
    Numerical(NumericAnswerSpec),
}

/// Wire shape of a question for the create-question endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionPayload {
    pub question_name: String,
    pub question_type: QuestionType,
    pub question_text: String,
    pub points_possible: Option<f64>,
    #[serde(flatten)]
    pub comments: QuestionComments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_group_id: Option<CanvasId>,
}

impl From<&Question> for QuestionPayload {
    fn from(question: &Question) -> Self {
        let answers = match &question.answers {
            QuestionAnswers::Records(records) => Some(
                records
                    .iter()
                    .cloned()
                    .map(AnswerPayload::Choice)
                    .collect(),
            ),
            QuestionAnswers::Numerical(spec) => spec
                .clone()
                .map(|spec| vec![AnswerPayload::Numerical(spec)]),
        };

        QuestionPayload {
            question_name: question.title.clone(),
            question_type: question.question_type,
            question_text: question.text.clone(),
            points_possible: question.points,
            comments: QuestionComments::default(),
            answers,
            quiz_group_id: question.group_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateModuleItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ModuleItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<CanvasId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl CreateModuleItemRequest {
    pub fn sub_header(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            item_type: ModuleItemType::SubHeader,
            content_id: None,
            external_url: None,
        }
    }
}

/// First step of the three-step file upload.
#[derive(Debug, Clone, Serialize)]
pub struct FileUploadRequest {
    pub name: String,
    pub size: u64,
    pub parent_folder_path: String,
    pub on_duplicate: String,
}
