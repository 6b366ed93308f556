use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::domain::CanvasId;

/// Question as returned by the LMS after creation or lookup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizQuestionResponse {
    pub id: CanvasId,
    #[serde(default)]
    pub quiz_id: Option<CanvasId>,
    #[serde(default)]
    pub question_name: String,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub quiz_group_id: Option<CanvasId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizGroupResponse {
    pub id: CanvasId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_pick_count")]
    pub pick_count: u32,
    #[serde(default)]
    pub question_points: Option<f64>,
}

fn default_pick_count() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizGroupsResponse {
    pub quiz_groups: Vec<QuizGroupResponse>,
}

/// Pre-signed target returned by the first upload step.
#[derive(Debug, Clone, Deserialize)]
pub struct FileUploadSlot {
    pub upload_url: String,
    #[serde(default)]
    pub upload_params: HashMap<String, serde_json::Value>,
}

impl FileUploadSlot {
    /// Upload parameters as form fields, in a stable order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = self
            .upload_params
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();
        fields.sort();
        fields
    }
}
