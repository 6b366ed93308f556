use std::path::Path;
use std::sync::Arc;

use crate::{models::domain::QuizHandle, repositories::FileRepository};

/// Marker in question text that is replaced by the uploaded image.
pub const IMAGE_PLACEHOLDER: &str = "%IMAGE%";
/// Path segment of a preview URL after which the hosted-image path differs.
pub const PREVIEW_MARKER: &str = "file_preview";
/// Appended to the truncated preview URL to address the image itself.
pub const IMAGE_URL_SUFFIX: &str = "preview";

const IMAGE_ALT_TEXT: &str = "You should see an image here";

/// Uploads question images and splices them into question text. Never fails: any upload
/// problem leaves the text as it was.
pub struct ImageEmbedder {
    files: Arc<dyn FileRepository>,
    folder: String,
}

impl ImageEmbedder {
    pub fn new(files: Arc<dyn FileRepository>, folder: impl Into<String>) -> Self {
        Self {
            files,
            folder: folder.into(),
        }
    }

    pub async fn embed(&self, quiz: &QuizHandle, text: String, image: Option<&Path>) -> String {
        let Some(image) = image else {
            return text;
        };

        let uploaded = match self.files.upload(quiz.course_id, image, &self.folder).await {
            Ok(uploaded) => uploaded,
            Err(err) => {
                log::warn!(
                    "Image {} not embedded, upload failed [{}]: {}",
                    image.display(),
                    err.error_code(),
                    err
                );
                return text;
            }
        };

        let Some(url) = uploaded.preview_url.as_deref().and_then(image_url) else {
            log::warn!(
                "Image {} uploaded as file {} but has no usable preview url",
                image.display(),
                uploaded.id
            );
            return text;
        };

        if !text.contains(IMAGE_PLACEHOLDER) {
            log::debug!(
                "No {} placeholder in question text, image {} not embedded",
                IMAGE_PLACEHOLDER,
                image.display()
            );
            return text;
        }

        splice_image(&text, &image_fragment(&url))
    }
}

/// Preview URL truncated before `file_preview`, followed by `preview`.
pub fn image_url(preview_url: &str) -> Option<String> {
    preview_url
        .find(PREVIEW_MARKER)
        .map(|pos| format!("{}{}", &preview_url[..pos], IMAGE_URL_SUFFIX))
}

pub fn image_fragment(url: &str) -> String {
    format!(r#"<img src="{}" alt="{}"  />"#, url, IMAGE_ALT_TEXT)
}

/// Replaces the first placeholder only.
pub fn splice_image(text: &str, fragment: &str) -> String {
    text.replacen(IMAGE_PLACEHOLDER, fragment, 1)
}
