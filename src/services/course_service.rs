use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::{
            course::{Enrollment, ModuleItem, User},
            CanvasId, Course, CourseRef, Module,
        },
        dto::request::{CreateModuleItemRequest, CreateModuleRequest},
    },
    repositories::CourseRepository,
};

pub const STUDENT_ENROLLMENT: &str = "StudentEnrollment";

pub struct CourseService {
    repository: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repository: Arc<dyn CourseRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let courses = self.repository.list_courses().await?;
        for course in &courses {
            log::info!("{}", course);
        }
        Ok(courses)
    }

    pub async fn get_course(&self, course: impl Into<CourseRef>) -> AppResult<Course> {
        self.repository.get_course(&course.into()).await
    }

    pub async fn get_course_by_sis_id(&self, sis_id: &str) -> AppResult<Course> {
        self.repository
            .get_course(&CourseRef::Sis(sis_id.to_string()))
            .await
    }

    pub async fn list_modules(&self, course_id: CanvasId) -> AppResult<Vec<Module>> {
        self.repository.list_modules(course_id).await
    }

    pub async fn create_module(&self, course_id: CanvasId, name: &str) -> AppResult<Module> {
        let request = CreateModuleRequest {
            name: name.to_string(),
            position: None,
        };
        request.validate()?;

        let module = self.repository.create_module(course_id, &request).await?;
        log::info!("Created module {} in course {}", module, course_id);
        Ok(module)
    }

    pub async fn create_module_item(
        &self,
        course_id: CanvasId,
        module_id: CanvasId,
        item: CreateModuleItemRequest,
    ) -> AppResult<ModuleItem> {
        item.validate()?;
        self.repository
            .create_module_item(course_id, module_id, &item)
            .await
    }

    /// Creates a module holding one sub header per title, in order.
    pub async fn create_module_with_sub_headers(
        &self,
        course_id: CanvasId,
        name: &str,
        sub_headers: &[&str],
    ) -> AppResult<(Module, Vec<ModuleItem>)> {
        let module = self.create_module(course_id, name).await?;

        let mut items = Vec::with_capacity(sub_headers.len());
        for title in sub_headers {
            let item = self
                .create_module_item(course_id, module.id, CreateModuleItemRequest::sub_header(*title))
                .await?;
            items.push(item);
        }
        Ok((module, items))
    }

    pub async fn delete_all_modules(&self, course_id: CanvasId) -> AppResult<usize> {
        let modules = self.repository.list_modules(course_id).await?;
        for module in &modules {
            self.repository.delete_module(course_id, module.id).await?;
        }
        log::info!("Deleted {} modules from course {}", modules.len(), course_id);
        Ok(modules.len())
    }

    pub async fn list_student_enrollments(&self, course_id: CanvasId) -> AppResult<Vec<Enrollment>> {
        let enrollments = self
            .repository
            .list_enrollments(course_id, &[STUDENT_ENROLLMENT.to_string()])
            .await?;
        for enrollment in &enrollments {
            log::info!(
                "{}   ({})",
                enrollment.user.sortable_name,
                enrollment.user.id
            );
        }
        Ok(enrollments)
    }

    /// Users of the course with the given enrollment types; `student` when empty.
    pub async fn list_users(
        &self,
        course_id: CanvasId,
        enrollment_types: &[&str],
    ) -> AppResult<Vec<User>> {
        let types: Vec<String> = if enrollment_types.is_empty() {
            vec!["student".to_string()]
        } else {
            enrollment_types.iter().map(|t| t.to_string()).collect()
        };

        let users = self.repository.list_users(course_id, &types).await?;
        log::info!("{} enrollments in course {}", users.len(), course_id);
        Ok(users)
    }
}
