use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::{QuizGroupRef, QuizHandle},
        dto::request::QuizGroupRequest,
    },
    repositories::QuizRepository,
};

/// Question groups created for one quiz. The last created group is the one grouped
/// questions join.
pub struct QuizGroupManager {
    repository: Arc<dyn QuizRepository>,
    groups: Vec<QuizGroupRef>,
    current: Option<usize>,
}

impl QuizGroupManager {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self {
            repository,
            groups: Vec::new(),
            current: None,
        }
    }

    /// Creates the group remotely and makes it current. Names are not deduplicated.
    pub async fn create_group(
        &mut self,
        quiz: &QuizHandle,
        name: &str,
        pick_count: u32,
        points: f64,
    ) -> AppResult<&QuizGroupRef> {
        let request = QuizGroupRequest {
            name: name.to_string(),
            pick_count,
            question_points: points,
        };
        request.validate()?;

        let created = self.repository.create_question_group(quiz, &request).await?;
        let group = QuizGroupRef {
            id: created.id,
            name: request.name,
            pick_count: request.pick_count,
            points: request.question_points,
        };

        log::info!(
            "Created quiz group '{}' ({}) in quiz {}: pick {} at {} points",
            group.name,
            group.id,
            quiz.quiz_id,
            group.pick_count,
            group.points
        );

        self.groups.push(group);
        let index = self.groups.len() - 1;
        self.current = Some(index);
        Ok(&self.groups[index])
    }

    pub fn current(&self) -> Option<&QuizGroupRef> {
        self.current.and_then(|index| self.groups.get(index))
    }

    pub fn groups(&self) -> &[QuizGroupRef] {
        &self.groups
    }
}
