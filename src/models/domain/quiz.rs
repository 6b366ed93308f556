use serde::{Deserialize, Serialize};

use crate::models::domain::CanvasId;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: CanvasId,
    pub title: String,
    #[serde(default)]
    pub course_id: CanvasId, // not part of the LMS payload, filled in by the repository
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quiz_type: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub question_count: Option<u32>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Quiz {
    pub fn handle(&self) -> QuizHandle {
        QuizHandle {
            course_id: self.course_id,
            quiz_id: self.id,
        }
    }
}

impl std::fmt::Display for Quiz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

/// Reference to a remote quiz; everything needed to address its endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, Deserialize, Serialize)]
pub struct QuizHandle {
    pub course_id: CanvasId,
    pub quiz_id: CanvasId,
}

impl QuizHandle {
    pub fn new(course_id: CanvasId, quiz_id: CanvasId) -> Self {
        Self { course_id, quiz_id }
    }

    pub fn path(&self) -> String {
        format!("courses/{}/quizzes/{}", self.course_id, self.quiz_id)
    }
}
