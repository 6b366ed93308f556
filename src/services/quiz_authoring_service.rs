use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::{
            question_spec::{AnswerInput, NumericParams},
            quiz_question::SubmittedQuestion,
            CanvasId, QuizGroupRef, QuizHandle,
        },
        dto::{request::QuestionPayload, response::QuizQuestionResponse},
    },
    repositories::{FileRepository, QuizRepository},
    services::{
        image_embedder::ImageEmbedder, question_builder::QuestionBuilder,
        quiz_group_manager::QuizGroupManager,
    },
};

/// Per-question options shared by every question kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionOptions {
    pub points: Option<f64>,
    pub image: Option<std::path::PathBuf>,
    pub grouped: bool,
}

impl QuestionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(mut self, points: f64) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_image(mut self, image: impl Into<std::path::PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }

    fn apply(self, mut builder: QuestionBuilder) -> QuestionBuilder {
        if let Some(points) = self.points {
            builder = builder.with_points(points);
        }
        if let Some(image) = self.image {
            builder = builder.with_image(image);
        }
        builder.grouped(self.grouped)
    }
}

/// Authors questions and question groups on one remote quiz.
///
/// Every `new_*_question` call submits exactly one question; the question is recorded only
/// after the LMS accepted it, so `questions()` is always in call order. Methods take
/// `&mut self`: share a session between tasks behind a `tokio::sync::Mutex`.
pub struct QuizAuthoringSession {
    quiz: QuizHandle,
    repository: Arc<dyn QuizRepository>,
    images: ImageEmbedder,
    groups: QuizGroupManager,
    questions: Vec<SubmittedQuestion>,
}

impl QuizAuthoringSession {
    pub fn new(
        quiz: QuizHandle,
        repository: Arc<dyn QuizRepository>,
        files: Arc<dyn FileRepository>,
        image_folder: impl Into<String>,
    ) -> Self {
        Self {
            quiz,
            groups: QuizGroupManager::new(repository.clone()),
            images: ImageEmbedder::new(files, image_folder),
            repository,
            questions: Vec::new(),
        }
    }

    pub fn quiz(&self) -> &QuizHandle {
        &self.quiz
    }

    pub fn questions(&self) -> &[SubmittedQuestion] {
        &self.questions
    }

    pub fn groups(&self) -> &[QuizGroupRef] {
        self.groups.groups()
    }

    pub fn current_group(&self) -> Option<&QuizGroupRef> {
        self.groups.current()
    }

    pub async fn new_quiz_group(
        &mut self,
        name: &str,
        pick_count: u32,
        points: f64,
    ) -> AppResult<&QuizGroupRef> {
        self.groups
            .create_group(&self.quiz, name, pick_count, points)
            .await
    }

    /// Builds and submits one question.
    pub async fn add_question(&mut self, builder: QuestionBuilder) -> AppResult<&SubmittedQuestion> {
        let question = builder
            .build(&self.quiz, &self.images, self.groups.current())
            .await?;

        let payload = QuestionPayload::from(&question);
        let created = self.repository.create_question(&self.quiz, &payload).await?;

        log::info!(
            "Created {} '{}' ({}) in quiz {}",
            question.question_type,
            question.title,
            created.id,
            self.quiz.quiz_id
        );

        self.questions.push(SubmittedQuestion {
            id: created.id,
            question,
        });
        let index = self.questions.len() - 1;
        Ok(&self.questions[index])
    }

    pub async fn new_mc_question<S: Into<String>>(
        &mut self,
        title: &str,
        text: &str,
        correct: impl Into<AnswerInput>,
        wrong: impl IntoIterator<Item = S>,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::multiple_choice(title, text, correct, wrong);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_multi_answer_question<C: Into<String>, W: Into<String>>(
        &mut self,
        title: &str,
        text: &str,
        correct: impl IntoIterator<Item = C>,
        wrong: impl IntoIterator<Item = W>,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::multiple_answers(title, text, correct, wrong);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_numerical_question(
        &mut self,
        title: &str,
        text: &str,
        params: NumericParams,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::numerical(title, text, params);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_essay_question(
        &mut self,
        title: &str,
        text: &str,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::essay(title, text);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_file_upload_question(
        &mut self,
        title: &str,
        text: &str,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::file_upload(title, text);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_short_answer_question<S: Into<String>>(
        &mut self,
        title: &str,
        text: &str,
        correct: impl IntoIterator<Item = S>,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::short_answer(title, text, correct);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_true_false_question(
        &mut self,
        title: &str,
        text: &str,
        correct: impl Into<AnswerInput>,
        wrong: impl Into<AnswerInput>,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::true_false(title, text, correct, wrong);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_text_only_question(
        &mut self,
        title: &str,
        text: &str,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion> {
        let builder = QuestionBuilder::text_only(title, text);
        self.add_question(options.apply(builder)).await
    }

    pub async fn new_fill_blanks_question<B, S>(
        &mut self,
        title: &str,
        text: &str,
        blanks: impl IntoIterator<Item = B>,
        options: QuestionOptions,
    ) -> AppResult<&SubmittedQuestion>
    where
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let builder = QuestionBuilder::fill_in_blanks(title, text, blanks);
        self.add_question(options.apply(builder)).await
    }

    pub async fn get_question(&self, question_id: CanvasId) -> AppResult<QuizQuestionResponse> {
        self.repository.get_question(&self.quiz, question_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::domain::quiz_question::QuestionType;
    use crate::repositories::file_repository::MockFileRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::test_utils::fixtures::{question_response, quiz_handle};

    fn idle_files() -> Arc<MockFileRepository> {
        let mut files = MockFileRepository::new();
        files.expect_upload().never();
        Arc::new(files)
    }

    #[tokio::test]
    async fn test_failed_submission_leaves_questions_unchanged() {
        let mut repository = MockQuizRepository::new();
        let mut calls = 0;
        repository.expect_create_question().returning(move |_, _| {
            calls += 1;
            if calls == 2 {
                Err(AppError::from_status(400, "question_type is invalid"))
            } else {
                Ok(question_response(calls))
            }
        });
        let mut session =
            QuizAuthoringSession::new(quiz_handle(), Arc::new(repository), idle_files(), "/Images");

        session
            .new_essay_question("One", "First", QuestionOptions::new())
            .await
            .unwrap();
        let err = session
            .new_essay_question("Two", "Second", QuestionOptions::new())
            .await
            .unwrap_err();
        session
            .new_essay_question("Three", "Third", QuestionOptions::new())
            .await
            .unwrap();

        assert!(matches!(err, AppError::RemoteError { status: 400, .. }));
        let titles: Vec<&str> = session
            .questions()
            .iter()
            .map(|q| q.question.title.as_str())
            .collect();
        assert_eq!(titles, vec!["One", "Three"]);
        assert_eq!(session.questions()[1].id, 3);
    }

    #[tokio::test]
    async fn test_local_validation_failure_makes_no_remote_call() {
        let mut repository = MockQuizRepository::new();
        repository.expect_create_question().never();
        let mut session =
            QuizAuthoringSession::new(quiz_handle(), Arc::new(repository), idle_files(), "/Images");

        let empty: Vec<String> = vec![];
        let err = session
            .new_mc_question("mc", "?", empty, ["b"], QuestionOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(session.questions().is_empty());
    }

    #[tokio::test]
    async fn test_payload_sent_for_true_false() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_create_question()
            .withf(|quiz, payload| {
                *quiz == QuizHandle::new(525, 31)
                    && payload.question_type == QuestionType::TrueFalse
                    && payload.points_possible == Some(1.0)
                    && payload.answers.as_ref().map(Vec::len) == Some(2)
            })
            .times(1)
            .returning(|_, _| Ok(question_response(1)));
        let mut session =
            QuizAuthoringSession::new(quiz_handle(), Arc::new(repository), idle_files(), "/Images");

        let submitted = session
            .new_true_false_question("tf", "Sky is blue", "True", "False", QuestionOptions::new())
            .await
            .unwrap();
        assert_eq!(submitted.id, 1);
    }

    #[tokio::test]
    async fn test_get_question_uses_session_quiz() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_get_question()
            .withf(|quiz, id| *quiz == QuizHandle::new(525, 31) && *id == 8)
            .returning(|_, id| Ok(question_response(id)));
        let session =
            QuizAuthoringSession::new(quiz_handle(), Arc::new(repository), idle_files(), "/Images");

        let question = session.get_question(8).await.unwrap();
        assert_eq!(question.id, 8);
    }

    #[test]
    fn test_question_options_apply() {
        let builder = QuestionOptions::new()
            .with_points(4.0)
            .grouped()
            .apply(QuestionBuilder::essay("e", "x"));

        assert!(builder.is_grouped());
        assert_eq!(builder.resolved_points(), Some(4.0));
    }
}
