use serde::{Deserialize, Serialize};

use crate::models::domain::CanvasId;

/// A pool of questions from which the LMS draws `pick_count` per student.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizGroupRef {
    pub id: CanvasId,
    pub name: String,
    pub pick_count: u32,
    pub points: f64,
}
