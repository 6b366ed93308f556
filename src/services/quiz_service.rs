use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::{CanvasId, Quiz, QuizHandle},
        dto::request::CreateQuizRequest,
    },
    repositories::{FileRepository, QuizRepository},
    services::quiz_authoring_service::QuizAuthoringSession,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    files: Arc<dyn FileRepository>,
    image_folder: String,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        files: Arc<dyn FileRepository>,
        image_folder: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            files,
            image_folder: image_folder.into(),
        }
    }

    pub async fn create_quiz(
        &self,
        course_id: CanvasId,
        request: CreateQuizRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let quiz = self.repository.create_quiz(course_id, &request).await?;
        log::info!("Created quiz {} in course {}", quiz, course_id);
        Ok(quiz)
    }

    pub async fn get_quiz(&self, course_id: CanvasId, quiz_id: CanvasId) -> AppResult<Quiz> {
        self.repository.get_quiz(course_id, quiz_id).await
    }

    pub async fn list_quizzes(&self, course_id: CanvasId) -> AppResult<Vec<Quiz>> {
        let quizzes = self.repository.list_quizzes(course_id).await?;
        for quiz in &quizzes {
            log::info!("{}", quiz);
        }
        Ok(quizzes)
    }

    /// Deletes every quiz of the course; returns how many were deleted.
    pub async fn delete_all_quizzes(&self, course_id: CanvasId) -> AppResult<usize> {
        let quizzes = self.repository.list_quizzes(course_id).await?;
        for quiz in &quizzes {
            self.repository.delete_quiz(&quiz.handle()).await?;
            log::info!("Deleted quiz {} from course {}", quiz, course_id);
        }
        Ok(quizzes.len())
    }

    pub fn start_authoring(&self, quiz: QuizHandle) -> QuizAuthoringSession {
        QuizAuthoringSession::new(
            quiz,
            self.repository.clone(),
            self.files.clone(),
            self.image_folder.clone(),
        )
    }

    /// Creates a quiz and opens an authoring session on it.
    pub async fn create_quiz_session(
        &self,
        course_id: CanvasId,
        request: CreateQuizRequest,
    ) -> AppResult<(Quiz, QuizAuthoringSession)> {
        let quiz = self.create_quiz(course_id, request).await?;
        let session = self.start_authoring(quiz.handle());
        Ok((quiz, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::file_repository::MockFileRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::test_utils::fixtures::quiz;

    #[tokio::test]
    async fn test_create_quiz_validates_title() {
        let mut repository = MockQuizRepository::new();
        repository.expect_create_quiz().never();
        let service = QuizService::new(
            Arc::new(repository),
            Arc::new(MockFileRepository::new()),
            "/Images",
        );

        let err = service
            .create_quiz(525, CreateQuizRequest::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_quiz_session_binds_handle() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_create_quiz()
            .withf(|course_id, request| *course_id == 525 && request.title == "New quiz")
            .returning(|course_id, request| Ok(quiz(course_id, 31, &request.title)));
        let service = QuizService::new(
            Arc::new(repository),
            Arc::new(MockFileRepository::new()),
            "/Images",
        );

        let (created, session) = service
            .create_quiz_session(525, CreateQuizRequest::new("New quiz"))
            .await
            .unwrap();

        assert_eq!(created.title, "New quiz");
        assert_eq!(*session.quiz(), QuizHandle::new(525, 31));
        assert!(session.questions().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_quizzes() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_list_quizzes()
            .returning(|course_id| Ok(vec![quiz(course_id, 1, "A"), quiz(course_id, 2, "B")]));
        repository
            .expect_delete_quiz()
            .times(2)
            .returning(|_| Ok(()));
        let service = QuizService::new(
            Arc::new(repository),
            Arc::new(MockFileRepository::new()),
            "/Images",
        );

        assert_eq!(service.delete_all_quizzes(525).await.unwrap(), 2);
    }
}
