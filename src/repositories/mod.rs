pub mod course_repository;
pub mod file_repository;
pub mod quiz_repository;

pub use course_repository::{CanvasCourseRepository, CourseRepository};
pub use file_repository::{CanvasFileRepository, FileRepository};
pub use quiz_repository::{CanvasQuizRepository, QuizRepository};
