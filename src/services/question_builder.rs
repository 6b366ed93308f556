use std::path::PathBuf;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question_spec::{AnswerInput, NumericParams, QuestionSpec},
        quiz_question::{Question, QuestionType},
        QuizGroupRef, QuizHandle,
    },
    services::{answer_encoder::AnswerEncoder, image_embedder::ImageEmbedder},
};

/// Describes one question of any of the nine kinds and composes it into a canonical
/// [`Question`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBuilder {
    title: String,
    text: String,
    spec: QuestionSpec,
    points: Option<f64>,
    image: Option<PathBuf>,
    grouped: bool,
}

fn collect<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

impl QuestionBuilder {
    pub fn new(title: impl Into<String>, text: impl Into<String>, spec: QuestionSpec) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            spec,
            points: None,
            image: None,
            grouped: false,
        }
    }

    pub fn multiple_choice<S: Into<String>>(
        title: impl Into<String>,
        text: impl Into<String>,
        correct: impl Into<AnswerInput>,
        wrong: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            title,
            text,
            QuestionSpec::MultipleChoice {
                correct: correct.into(),
                wrong: collect(wrong),
            },
        )
    }

    pub fn multiple_answers<C: Into<String>, W: Into<String>>(
        title: impl Into<String>,
        text: impl Into<String>,
        correct: impl IntoIterator<Item = C>,
        wrong: impl IntoIterator<Item = W>,
    ) -> Self {
        Self::new(
            title,
            text,
            QuestionSpec::MultipleAnswers {
                correct: collect(correct),
                wrong: collect(wrong),
            },
        )
    }

    pub fn numerical(
        title: impl Into<String>,
        text: impl Into<String>,
        params: NumericParams,
    ) -> Self {
        Self::new(title, text, QuestionSpec::Numerical(params))
    }

    pub fn essay(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, text, QuestionSpec::Essay)
    }

    pub fn file_upload(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, text, QuestionSpec::FileUpload)
    }

    pub fn short_answer<S: Into<String>>(
        title: impl Into<String>,
        text: impl Into<String>,
        correct: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            title,
            text,
            QuestionSpec::ShortAnswer {
                correct: collect(correct),
            },
        )
    }

    pub fn true_false(
        title: impl Into<String>,
        text: impl Into<String>,
        correct: impl Into<AnswerInput>,
        wrong: impl Into<AnswerInput>,
    ) -> Self {
        Self::new(
            title,
            text,
            QuestionSpec::TrueFalse {
                correct: correct.into(),
                wrong: wrong.into(),
            },
        )
    }

    /// Ungraded descriptive text; any points given later are ignored.
    pub fn text_only(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, text, QuestionSpec::TextOnly)
    }

    /// `text` refers to the blanks as `[a]`, `[b]`, ...; `blanks` holds the accepted
    /// answers of each blank in that order.
    pub fn fill_in_blanks<B, S>(
        title: impl Into<String>,
        text: impl Into<String>,
        blanks: impl IntoIterator<Item = B>,
    ) -> Self
    where
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            title,
            text,
            QuestionSpec::FillInMultipleBlanks {
                blanks: blanks.into_iter().map(|accepted| collect(accepted)).collect(),
            },
        )
    }

    pub fn with_points(mut self, points: f64) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Joins the most recently created quiz group of the session.
    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    pub fn question_type(&self) -> QuestionType {
        self.spec.question_type()
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Points sent to the LMS: the caller's value, or the type default. Text-only
    /// questions are always ungraded.
    pub fn resolved_points(&self) -> Option<f64> {
        let question_type = self.question_type();
        match question_type {
            QuestionType::TextOnly => None,
            _ => self.points.or_else(|| question_type.default_points()),
        }
    }

    /// Encodes the answers, embeds the image and attaches `current_group` when grouped.
    pub async fn build(
        self,
        quiz: &QuizHandle,
        images: &ImageEmbedder,
        current_group: Option<&QuizGroupRef>,
    ) -> AppResult<Question> {
        let answers = AnswerEncoder::encode(&self.spec)?;

        let group_id = if self.grouped {
            let group = current_group.ok_or_else(|| {
                AppError::ValidationError(format!(
                    "question '{}' is grouped but no quiz group has been created",
                    self.title
                ))
            })?;
            Some(group.id)
        } else {
            None
        };

        let points = self.resolved_points();
        let question_type = self.question_type();
        let text = images.embed(quiz, self.text, self.image.as_deref()).await;

        Ok(Question {
            title: self.title,
            question_type,
            text,
            points,
            answers,
            group_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz_question::{AnswerRecord, NumericAnswerSpec, QuestionAnswers};
    use crate::repositories::file_repository::MockFileRepository;
    use std::sync::Arc;

    fn no_upload_embedder() -> ImageEmbedder {
        let mut files = MockFileRepository::new();
        files.expect_upload().never();
        ImageEmbedder::new(Arc::new(files), "/Images")
    }

    fn group() -> QuizGroupRef {
        QuizGroupRef {
            id: 41,
            name: "Pool".to_string(),
            pick_count: 1,
            points: 2.0,
        }
    }

    #[test]
    fn default_points_per_kind() {
        assert_eq!(
            QuestionBuilder::essay("t", "x").resolved_points(),
            Some(1.0)
        );
        assert_eq!(
            QuestionBuilder::file_upload("t", "x").resolved_points(),
            Some(0.0)
        );
        assert_eq!(
            QuestionBuilder::short_answer("t", "x", ["a"])
                .with_points(3.0)
                .resolved_points(),
            Some(3.0)
        );
    }

    #[test]
    fn text_only_ignores_points() {
        let builder = QuestionBuilder::text_only("Intro", "Read carefully").with_points(5.0);
        assert_eq!(builder.resolved_points(), None);
    }

    #[test]
    fn constructors_map_to_types() {
        let kinds = [
            (
                QuestionBuilder::multiple_choice("t", "x", "a", ["b"]),
                QuestionType::MultipleChoice,
            ),
            (
                QuestionBuilder::multiple_answers("t", "x", ["a"], ["b"]),
                QuestionType::MultipleAnswers,
            ),
            (
                QuestionBuilder::numerical("t", "x", NumericParams::default()),
                QuestionType::Numerical,
            ),
            (QuestionBuilder::essay("t", "x"), QuestionType::Essay),
            (QuestionBuilder::file_upload("t", "x"), QuestionType::FileUpload),
            (
                QuestionBuilder::short_answer("t", "x", ["a"]),
                QuestionType::ShortAnswer,
            ),
            (
                QuestionBuilder::true_false("t", "x", "T", "F"),
                QuestionType::TrueFalse,
            ),
            (QuestionBuilder::text_only("t", "x"), QuestionType::TextOnly),
            (
                QuestionBuilder::fill_in_blanks("t", "x", vec![vec!["a"]]),
                QuestionType::FillInMultipleBlanks,
            ),
        ];

        for (builder, expected) in kinds {
            assert_eq!(builder.question_type(), expected);
        }
    }

    #[tokio::test]
    async fn build_multiple_choice_question() {
        let question = QuestionBuilder::multiple_choice(
            "Capital",
            "Capital of France?",
            vec!["Paris", "Lyon"],
            ["Rome", "Berlin"],
        )
        .with_points(2.0)
        .build(&QuizHandle::new(1, 2), &no_upload_embedder(), None)
        .await
        .unwrap();

        assert_eq!(question.title, "Capital");
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert_eq!(question.text, "Capital of France?");
        assert_eq!(question.points, Some(2.0));
        assert_eq!(
            question.answers.records(),
            &[
                AnswerRecord::correct("Paris"),
                AnswerRecord::incorrect("Rome"),
                AnswerRecord::incorrect("Berlin"),
            ]
        );
        assert_eq!(question.group_id, None);
    }

    #[tokio::test]
    async fn build_numerical_without_parameters_leaves_answer_unset() {
        let question = QuestionBuilder::numerical("n", "x", NumericParams::default().with_answer(3.0))
            .build(&QuizHandle::new(1, 2), &no_upload_embedder(), None)
            .await
            .unwrap();

        assert_eq!(question.answers, QuestionAnswers::Numerical(None));
    }

    #[tokio::test]
    async fn build_numerical_range() {
        let question = QuestionBuilder::numerical("n", "x", NumericParams::range(1.0, 10.0))
            .build(&QuizHandle::new(1, 2), &no_upload_embedder(), None)
            .await
            .unwrap();

        assert_eq!(
            question.answers.numeric(),
            Some(&NumericAnswerSpec::RangeAnswer {
                start: 1.0,
                end: 10.0
            })
        );
    }

    #[tokio::test]
    async fn grouped_question_takes_current_group_id() {
        let current = group();
        let question = QuestionBuilder::essay("e", "Discuss")
            .grouped(true)
            .build(&QuizHandle::new(1, 2), &no_upload_embedder(), Some(&current))
            .await
            .unwrap();

        assert_eq!(question.group_id, Some(41));
    }

    #[tokio::test]
    async fn ungrouped_question_ignores_current_group() {
        let current = group();
        let question = QuestionBuilder::essay("e", "Discuss")
            .build(&QuizHandle::new(1, 2), &no_upload_embedder(), Some(&current))
            .await
            .unwrap();

        assert_eq!(question.group_id, None);
    }

    #[tokio::test]
    async fn grouped_without_group_is_rejected() {
        let err = QuestionBuilder::essay("e", "Discuss")
            .grouped(true)
            .build(&QuizHandle::new(1, 2), &no_upload_embedder(), None)
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
