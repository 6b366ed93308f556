use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::json;

use crate::{
    client::CanvasClient,
    errors::AppResult,
    models::{
        domain::{
            course::{Enrollment, ModuleItem, User},
            CanvasId, Course, CourseRef, Module,
        },
        dto::request::{CreateModuleItemRequest, CreateModuleRequest},
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_courses(&self) -> AppResult<Vec<Course>>;
    async fn get_course(&self, course: &CourseRef) -> AppResult<Course>;
    async fn list_modules(&self, course_id: CanvasId) -> AppResult<Vec<Module>>;
    async fn create_module(
        &self,
        course_id: CanvasId,
        module: &CreateModuleRequest,
    ) -> AppResult<Module>;
    async fn delete_module(&self, course_id: CanvasId, module_id: CanvasId) -> AppResult<()>;
    async fn create_module_item(
        &self,
        course_id: CanvasId,
        module_id: CanvasId,
        item: &CreateModuleItemRequest,
    ) -> AppResult<ModuleItem>;
    async fn list_enrollments(
        &self,
        course_id: CanvasId,
        enrollment_types: &[String],
    ) -> AppResult<Vec<Enrollment>>;
    async fn list_users(
        &self,
        course_id: CanvasId,
        enrollment_types: &[String],
    ) -> AppResult<Vec<User>>;
}

pub struct CanvasCourseRepository {
    client: CanvasClient,
}

impl CanvasCourseRepository {
    pub fn new(client: &CanvasClient) -> Self {
        Self {
            client: client.clone(),
        }
    }
}

#[async_trait]
impl CourseRepository for CanvasCourseRepository {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.client.get_paginated("courses", &[]).await
    }

    async fn get_course(&self, course: &CourseRef) -> AppResult<Course> {
        self.client.get(&course.path()).await
    }

    async fn list_modules(&self, course_id: CanvasId) -> AppResult<Vec<Module>> {
        self.client
            .get_paginated(&format!("courses/{}/modules", course_id), &[])
            .await
    }

    async fn create_module(
        &self,
        course_id: CanvasId,
        module: &CreateModuleRequest,
    ) -> AppResult<Module> {
        self.client
            .post(
                &format!("courses/{}/modules", course_id),
                &json!({ "module": module }),
            )
            .await
    }

    async fn delete_module(&self, course_id: CanvasId, module_id: CanvasId) -> AppResult<()> {
        self.client
            .delete(&format!("courses/{}/modules/{}", course_id, module_id))
            .await
    }

    async fn create_module_item(
        &self,
        course_id: CanvasId,
        module_id: CanvasId,
        item: &CreateModuleItemRequest,
    ) -> AppResult<ModuleItem> {
        self.client
            .post(
                &format!("courses/{}/modules/{}/items", course_id, module_id),
                &json!({ "module_item": item }),
            )
            .await
    }

    async fn list_enrollments(
        &self,
        course_id: CanvasId,
        enrollment_types: &[String],
    ) -> AppResult<Vec<Enrollment>> {
        let query: Vec<(&str, &str)> = enrollment_types
            .iter()
            .map(|t| ("type[]", t.as_str()))
            .collect();
        self.client
            .get_paginated(&format!("courses/{}/enrollments", course_id), &query)
            .await
    }

    async fn list_users(
        &self,
        course_id: CanvasId,
        enrollment_types: &[String],
    ) -> AppResult<Vec<User>> {
        let query: Vec<(&str, &str)> = enrollment_types
            .iter()
            .map(|t| ("enrollment_type[]", t.as_str()))
            .collect();
        self.client
            .get_paginated(&format!("courses/{}/users", course_id), &query)
            .await
    }
}
