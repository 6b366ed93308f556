use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::CanvasId;

/// Full name of the root folder of every course.
pub const COURSE_FILES_FOLDER: &str = "course files";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Course {
    pub id: CanvasId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub sis_course_id: Option<String>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.course_code {
            Some(code) => write!(f, "{} {} ({})", code, self.name, self.id),
            None => write!(f, "{} ({})", self.name, self.id),
        }
    }
}

/// How a course is looked up: by LMS id or by SIS id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseRef {
    Id(CanvasId),
    Sis(String),
}

impl CourseRef {
    pub fn path(&self) -> String {
        match self {
            CourseRef::Id(id) => format!("courses/{}", id),
            CourseRef::Sis(sis_id) => format!("courses/sis_course_id:{}", sis_id),
        }
    }
}

impl From<CanvasId> for CourseRef {
    fn from(id: CanvasId) -> Self {
        CourseRef::Id(id)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Folder {
    pub id: CanvasId,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub parent_folder_id: Option<CanvasId>,
}

impl Folder {
    pub fn is_course_root(&self) -> bool {
        self.full_name == COURSE_FILES_FOLDER
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CanvasFile {
    pub id: CanvasId,
    pub display_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Module {
    pub id: CanvasId,
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum ModuleItemType {
    File,
    Page,
    Discussion,
    Assignment,
    Quiz,
    SubHeader,
    ExternalUrl,
    ExternalTool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ModuleItem {
    pub id: CanvasId,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ModuleItemType,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EnrolledUser {
    pub id: CanvasId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sortable_name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Enrollment {
    pub id: CanvasId,
    #[serde(rename = "type")]
    pub enrollment_type: String,
    pub user: EnrolledUser,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: CanvasId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sortable_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
