pub mod answer_encoder;
pub mod course_service;
pub mod file_service;
pub mod image_embedder;
pub mod question_builder;
pub mod quiz_authoring_service;
pub mod quiz_group_manager;
pub mod quiz_service;

pub use answer_encoder::AnswerEncoder;
pub use course_service::CourseService;
pub use file_service::FileService;
pub use image_embedder::ImageEmbedder;
pub use question_builder::QuestionBuilder;
pub use quiz_authoring_service::{QuestionOptions, QuizAuthoringSession};
pub use quiz_group_manager::QuizGroupManager;
pub use quiz_service::QuizService;
