use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{CanvasId, Folder},
    repositories::FileRepository,
};

pub struct FileService {
    repository: Arc<dyn FileRepository>,
}

impl FileService {
    pub fn new(repository: Arc<dyn FileRepository>) -> Self {
        Self { repository }
    }

    /// The root `course files` folder, if the course has one.
    pub async fn get_course_folder(&self, course_id: CanvasId) -> AppResult<Option<Folder>> {
        let folders = self.repository.list_folders(course_id).await?;
        Ok(folders.into_iter().find(Folder::is_course_root))
    }

    pub async fn list_folders(&self, course_id: CanvasId) -> AppResult<Vec<Folder>> {
        self.repository.list_folders(course_id).await
    }

    /// Creates each folder directly under the course root.
    pub async fn create_folders(
        &self,
        course_id: CanvasId,
        names: &[&str],
    ) -> AppResult<Vec<Folder>> {
        let root = self.get_course_folder(course_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("course {} has no course files folder", course_id))
        })?;

        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let folder = self.repository.create_folder(root.id, name).await?;
            log::info!("Created folder {}", folder);
            created.push(folder);
        }
        Ok(created)
    }

    /// Deletes every folder except the course root; returns how many were deleted.
    pub async fn delete_folders(&self, course_id: CanvasId) -> AppResult<usize> {
        let folders = self.repository.list_folders(course_id).await?;
        let mut deleted = 0;
        for folder in folders.iter().filter(|f| !f.is_course_root()) {
            match self.repository.delete_folder(folder.id).await {
                Ok(()) => deleted += 1,
                // a parent deleted earlier already took this folder with it
                Err(AppError::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        log::info!("Deleted {} folders from course {}", deleted, course_id);
        Ok(deleted)
    }

    pub async fn delete_all_files(&self, course_id: CanvasId) -> AppResult<usize> {
        let files = self.repository.list_files(course_id).await?;
        for file in &files {
            self.repository.delete_file(file.id).await?;
        }
        log::info!("Deleted {} files from course {}", files.len(), course_id);
        Ok(files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::file_repository::MockFileRepository;
    use crate::test_utils::fixtures::folder;

    fn folders() -> Vec<Folder> {
        vec![
            folder(1, "course files", None),
            folder(2, "course files/Images", Some(1)),
            folder(3, "course files/Images/Old", Some(2)),
        ]
    }

    #[tokio::test]
    async fn test_get_course_folder() {
        let mut repository = MockFileRepository::new();
        repository.expect_list_folders().returning(|_| Ok(folders()));
        let service = FileService::new(Arc::new(repository));

        let root = service.get_course_folder(525).await.unwrap();
        assert_eq!(root.map(|f| f.id), Some(1));
    }

    #[tokio::test]
    async fn test_create_folders_under_root() {
        let mut repository = MockFileRepository::new();
        repository.expect_list_folders().returning(|_| Ok(folders()));
        repository
            .expect_create_folder()
            .withf(|parent, _| *parent == 1)
            .times(2)
            .returning(|parent, name| {
                Ok(folder(10, &format!("course files/{}", name), Some(parent)))
            });
        let service = FileService::new(Arc::new(repository));

        let created = service
            .create_folders(525, &["Lecture Notes", "Datasets"])
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[1].full_name, "course files/Datasets");
    }

    #[tokio::test]
    async fn test_delete_folders_keeps_root_and_tolerates_cascade() {
        let mut repository = MockFileRepository::new();
        repository.expect_list_folders().returning(|_| Ok(folders()));
        repository
            .expect_delete_folder()
            .withf(|id| *id != 1)
            .times(2)
            .returning(|id| {
                if id == 3 {
                    Err(AppError::NotFound("folder 3".to_string()))
                } else {
                    Ok(())
                }
            });
        let service = FileService::new(Arc::new(repository));

        assert_eq!(service.delete_folders(525).await.unwrap(), 1);
    }
}
