use crate::models::domain::{CanvasId, Folder, Quiz, QuizHandle};
use crate::models::dto::response::QuizQuestionResponse;

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Handle of the quiz most tests author against.
    pub fn quiz_handle() -> QuizHandle {
        QuizHandle::new(525, 31)
    }

    pub fn quiz(course_id: CanvasId, id: CanvasId, title: &str) -> Quiz {
        Quiz {
            id,
            title: title.to_string(),
            course_id,
            description: None,
            quiz_type: Some("practice_quiz".to_string()),
            published: false,
            question_count: Some(0),
            points_possible: None,
            html_url: None,
        }
    }

    pub fn question_response(id: CanvasId) -> QuizQuestionResponse {
        QuizQuestionResponse {
            id,
            quiz_id: Some(31),
            question_name: format!("Question {}", id),
            question_type: None,
            question_text: String::new(),
            points_possible: Some(1.0),
            position: None,
            quiz_group_id: None,
        }
    }

    pub fn folder(id: CanvasId, full_name: &str, parent_folder_id: Option<CanvasId>) -> Folder {
        Folder {
            id,
            name: full_name.rsplit('/').next().unwrap_or(full_name).to_string(),
            full_name: full_name.to_string(),
            parent_folder_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz_handle_matches_quiz() {
        assert_eq!(quiz(525, 31, "Quiz").handle(), quiz_handle());
    }

    #[test]
    fn test_fixtures_folder_name() {
        let nested = folder(2, "course files/Images", Some(1));
        assert_eq!(nested.name, "Images");
        assert!(!nested.is_course_root());
        assert!(folder(1, "course files", None).is_course_root());
    }
}
