use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::json;

use crate::{
    client::CanvasClient,
    errors::{AppError, AppResult},
    models::{
        domain::{CanvasId, Quiz, QuizHandle},
        dto::{
            request::{CreateQuizRequest, QuestionPayload, QuizGroupRequest},
            response::{QuizGroupResponse, QuizGroupsResponse, QuizQuestionResponse},
        },
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create_quiz(&self, course_id: CanvasId, quiz: &CreateQuizRequest) -> AppResult<Quiz>;
    async fn get_quiz(&self, course_id: CanvasId, quiz_id: CanvasId) -> AppResult<Quiz>;
    async fn list_quizzes(&self, course_id: CanvasId) -> AppResult<Vec<Quiz>>;
    async fn delete_quiz(&self, quiz: &QuizHandle) -> AppResult<()>;
    async fn create_question(
        &self,
        quiz: &QuizHandle,
        question: &QuestionPayload,
    ) -> AppResult<QuizQuestionResponse>;
    async fn get_question(
        &self,
        quiz: &QuizHandle,
        question_id: CanvasId,
    ) -> AppResult<QuizQuestionResponse>;
    async fn create_question_group(
        &self,
        quiz: &QuizHandle,
        group: &QuizGroupRequest,
    ) -> AppResult<QuizGroupResponse>;
}

pub struct CanvasQuizRepository {
    client: CanvasClient,
}

impl CanvasQuizRepository {
    pub fn new(client: &CanvasClient) -> Self {
        Self {
            client: client.clone(),
        }
    }
}

fn with_course(mut quiz: Quiz, course_id: CanvasId) -> Quiz {
    quiz.course_id = course_id;
    quiz
}

#[async_trait]
impl QuizRepository for CanvasQuizRepository {
    async fn create_quiz(&self, course_id: CanvasId, quiz: &CreateQuizRequest) -> AppResult<Quiz> {
        let created: Quiz = self
            .client
            .post(
                &format!("courses/{}/quizzes", course_id),
                &json!({ "quiz": quiz }),
            )
            .await?;
        Ok(with_course(created, course_id))
    }

    async fn get_quiz(&self, course_id: CanvasId, quiz_id: CanvasId) -> AppResult<Quiz> {
        let quiz: Quiz = self
            .client
            .get(&QuizHandle::new(course_id, quiz_id).path())
            .await?;
        Ok(with_course(quiz, course_id))
    }

    async fn list_quizzes(&self, course_id: CanvasId) -> AppResult<Vec<Quiz>> {
        let quizzes: Vec<Quiz> = self
            .client
            .get_paginated(&format!("courses/{}/quizzes", course_id), &[])
            .await?;
        Ok(quizzes
            .into_iter()
            .map(|quiz| with_course(quiz, course_id))
            .collect())
    }

    async fn delete_quiz(&self, quiz: &QuizHandle) -> AppResult<()> {
        self.client.delete(&quiz.path()).await
    }

    async fn create_question(
        &self,
        quiz: &QuizHandle,
        question: &QuestionPayload,
    ) -> AppResult<QuizQuestionResponse> {
        self.client
            .post(
                &format!("{}/questions", quiz.path()),
                &json!({ "question": question }),
            )
            .await
    }

    async fn get_question(
        &self,
        quiz: &QuizHandle,
        question_id: CanvasId,
    ) -> AppResult<QuizQuestionResponse> {
        self.client
            .get(&format!("{}/questions/{}", quiz.path(), question_id))
            .await
    }

    async fn create_question_group(
        &self,
        quiz: &QuizHandle,
        group: &QuizGroupRequest,
    ) -> AppResult<QuizGroupResponse> {
        let response: QuizGroupsResponse = self
            .client
            .post(
                &format!("{}/groups", quiz.path()),
                &json!({ "quiz_groups": [group] }),
            )
            .await?;

        response.quiz_groups.into_iter().next().ok_or_else(|| {
            AppError::DecodeError("quiz group response contained no group".to_string())
        })
    }
}
