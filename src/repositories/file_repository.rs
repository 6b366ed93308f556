use std::path::Path;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::json;

use crate::{
    client::CanvasClient,
    errors::{AppError, AppResult},
    models::{
        domain::{course::CanvasFile, CanvasId, Folder},
        dto::{request::FileUploadRequest, response::FileUploadSlot},
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn list_folders(&self, course_id: CanvasId) -> AppResult<Vec<Folder>>;
    async fn create_folder(&self, parent_folder_id: CanvasId, name: &str) -> AppResult<Folder>;
    async fn delete_folder(&self, folder_id: CanvasId) -> AppResult<()>;
    async fn list_files(&self, course_id: CanvasId) -> AppResult<Vec<CanvasFile>>;
    async fn delete_file(&self, file_id: CanvasId) -> AppResult<()>;
    /// Uploads a local file into `parent_folder_path` of the course. Succeeds only when the
    /// LMS reports a URL for the stored file.
    async fn upload(
        &self,
        course_id: CanvasId,
        file: &Path,
        parent_folder_path: &str,
    ) -> AppResult<CanvasFile>;
}

pub struct CanvasFileRepository {
    client: CanvasClient,
}

impl CanvasFileRepository {
    pub fn new(client: &CanvasClient) -> Self {
        Self {
            client: client.clone(),
        }
    }
}

#[async_trait]
impl FileRepository for CanvasFileRepository {
    async fn list_folders(&self, course_id: CanvasId) -> AppResult<Vec<Folder>> {
        self.client
            .get_paginated(&format!("courses/{}/folders", course_id), &[])
            .await
    }

    async fn create_folder(&self, parent_folder_id: CanvasId, name: &str) -> AppResult<Folder> {
        self.client
            .post(
                &format!("folders/{}/folders", parent_folder_id),
                &json!({ "name": name }),
            )
            .await
    }

    async fn delete_folder(&self, folder_id: CanvasId) -> AppResult<()> {
        self.client
            .delete_with_query(&format!("folders/{}", folder_id), &[("force", "true")])
            .await
    }

    async fn list_files(&self, course_id: CanvasId) -> AppResult<Vec<CanvasFile>> {
        self.client
            .get_paginated(&format!("courses/{}/files", course_id), &[])
            .await
    }

    async fn delete_file(&self, file_id: CanvasId) -> AppResult<()> {
        self.client.delete(&format!("files/{}", file_id)).await
    }

    async fn upload(
        &self,
        course_id: CanvasId,
        file: &Path,
        parent_folder_path: &str,
    ) -> AppResult<CanvasFile> {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::ValidationError(format!("not a file path: {}", file.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(file).await?;

        let request = FileUploadRequest {
            name: name.clone(),
            size: bytes.len() as u64,
            parent_folder_path: parent_folder_path.to_string(),
            on_duplicate: "rename".to_string(),
        };
        let slot: FileUploadSlot = self
            .client
            .post(&format!("courses/{}/files", course_id), &request)
            .await?;

        let uploaded = self.client.upload_to_slot(&slot, &name, bytes).await?;
        if uploaded.url.is_none() {
            return Err(AppError::UploadError(format!(
                "no url reported for uploaded file {}",
                name
            )));
        }

        log::info!(
            "Uploaded {} to {} in course {} (file {})",
            name,
            parent_folder_path,
            course_id,
            uploaded.id
        );
        Ok(uploaded)
    }
}
