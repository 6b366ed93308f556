use std::sync::Arc;

use crate::{
    client::CanvasClient,
    config::Config,
    errors::AppResult,
    repositories::{
        CanvasCourseRepository, CanvasFileRepository, CanvasQuizRepository, CourseRepository,
        FileRepository, QuizRepository,
    },
    services::{course_service::CourseService, file_service::FileService, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub course_service: Arc<CourseService>,
    pub file_service: Arc<FileService>,
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = CanvasClient::new(&config)?;

        let course_repository: Arc<dyn CourseRepository> =
            Arc::new(CanvasCourseRepository::new(&client));
        let file_repository: Arc<dyn FileRepository> = Arc::new(CanvasFileRepository::new(&client));
        let quiz_repository: Arc<dyn QuizRepository> = Arc::new(CanvasQuizRepository::new(&client));

        Ok(Self::from_repositories(
            config,
            course_repository,
            file_repository,
            quiz_repository,
        ))
    }

    pub fn from_repositories(
        config: Config,
        course_repository: Arc<dyn CourseRepository>,
        file_repository: Arc<dyn FileRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
    ) -> Self {
        let course_service = Arc::new(CourseService::new(course_repository));
        let file_service = Arc::new(FileService::new(file_repository.clone()));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            file_repository,
            config.image_folder.clone(),
        ));

        Self {
            course_service,
            file_service,
            quiz_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_from_config() {
        let state = AppState::new(Config::test_config()).unwrap();
        assert_eq!(state.config.image_folder, "/Images");
    }
}
