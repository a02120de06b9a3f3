//! Video HTTP Routes
//!
//! CRUD endpoints for video records plus the test-support reset.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::videos::{
    parse_id, InMemoryVideoRepository, Video, VideoCandidate, VideoError, VideoService, VideoView,
};

// ==================
// Shared State
// ==================

/// Video state shared across handlers
pub struct VideoState {
    pub service: VideoService<InMemoryVideoRepository>,
}

impl VideoState {
    /// Empty store
    pub fn new() -> Self {
        Self::with_repository(InMemoryVideoRepository::new())
    }

    /// Store holding the demo record
    pub fn seeded() -> Self {
        Self::with_repository(InMemoryVideoRepository::with_videos(vec![Video::demo()]))
    }

    fn with_repository(repo: InMemoryVideoRepository) -> Self {
        Self {
            service: VideoService::new(repo),
        }
    }
}

impl Default for VideoState {
    fn default() -> Self {
        Self::new()
    }
}

// ==================
// Error Mapping
// ==================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for VideoError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self {
            VideoError::Validation(errors) => (status, Json(errors)).into_response(),
            VideoError::NotFound(_) | VideoError::InvalidId(_) => status.into_response(),
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                    code: status.as_u16(),
                }),
            )
                .into_response(),
        }
    }
}

// ==================
// Routes
// ==================

/// Create video routes
///
/// The collection answers with and without a trailing slash.
pub fn video_routes(state: Arc<VideoState>) -> Router {
    Router::new()
        .route("/videos", get(list_videos_handler).post(create_video_handler))
        .route("/videos/", get(list_videos_handler).post(create_video_handler))
        .route(
            "/videos/:id",
            get(get_video_handler)
                .put(update_video_handler)
                .delete(delete_video_handler),
        )
        .with_state(state)
}

/// Create test-support routes
pub fn testing_routes(state: Arc<VideoState>) -> Router {
    Router::new()
        .route("/testing/all-data", delete(reset_all_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Malformed or non-object bodies become an empty candidate so that they
/// are answered with the full field error list.
fn candidate_from_body(body: Result<Json<Value>, JsonRejection>) -> VideoCandidate {
    match body {
        Ok(Json(value)) => VideoCandidate::from_json(&value),
        Err(_) => VideoCandidate::default(),
    }
}

// ==================
// Handlers
// ==================

async fn list_videos_handler(
    State(state): State<Arc<VideoState>>,
) -> Result<Json<Vec<VideoView>>, VideoError> {
    Ok(Json(state.service.list()?))
}

async fn get_video_handler(
    State(state): State<Arc<VideoState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<VideoView>, VideoError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.service.get(id)?))
}

async fn create_video_handler(
    State(state): State<Arc<VideoState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<VideoView>), VideoError> {
    let candidate = candidate_from_body(body);
    let view = state.service.create(&candidate)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_video_handler(
    State(state): State<Arc<VideoState>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, VideoError> {
    let candidate = candidate_from_body(body);
    state.service.update_raw(&raw_id, &candidate)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_video_handler(
    State(state): State<Arc<VideoState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, VideoError> {
    let id = parse_id(&raw_id)?;
    state.service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reset_all_handler(
    State(state): State<Arc<VideoState>>,
) -> Result<StatusCode, VideoError> {
    state.service.reset_all()?;
    Ok(StatusCode::NO_CONTENT)
}
