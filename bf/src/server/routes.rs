//! Route handlers for the generation API

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Deserialize;
use tracing::{debug, info};

use super::error::ApiError;
use super::state::AppState;
use crate::domain::{Milestone, ReferenceImage, Task};
use crate::plan;

/// `GET /health`
pub async fn health_check() -> &'static str {
    "ok"
}

/// `POST /api/generate-milestones`
///
/// Multipart form with a `prompt` text field and an optional `image` file
/// field. Returns the parsed milestone list as JSON.
pub async fn generate_milestones(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Milestone>>, ApiError> {
    let mut prompt = String::new();
    let mut image: Option<ReferenceImage> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("prompt") => prompt = field.text().await?,
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "image/png".to_string());
                let data = field.bytes().await?.to_vec();
                debug!(bytes = %data.len(), %mime_type, "generate_milestones: image field received");
                image = Some(ReferenceImage { data, mime_type });
            }
            _ => {}
        }
    }

    info!(prompt_len = %prompt.len(), has_image = %image.is_some(), "generate_milestones: request");
    let milestones = plan::generate_milestones(state.client.as_ref(), &prompt, image.as_ref()).await?;
    Ok(Json(milestones))
}

/// Body of `POST /api/generate-tasks`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksRequest {
    pub milestone: Milestone,
    pub series_theme: String,
}

/// `POST /api/generate-tasks`
pub async fn generate_tasks(
    State(state): State<AppState>,
    Json(request): Json<GenerateTasksRequest>,
) -> Result<Json<Vec<Task>>, ApiError> {
    info!(milestone = %request.milestone.title, "generate_tasks: request");
    let tasks = plan::generate_tasks(state.client.as_ref(), &request.milestone, &request.series_theme).await?;
    Ok(Json(tasks))
}
