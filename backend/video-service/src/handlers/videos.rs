/// Video handlers - HTTP endpoints for video operations
use actix_web::{web, HttpResponse};
use video_core::validation::{CreateVideoRequest, UpdateVideoRequest};
use video_core::{validate_create, validate_update};

use super::parse_json_body;
use crate::config::VideoConfig;
use crate::error::{AppError, Result};
use crate::store::VideoStore;

/// Ids that do not parse as integers cannot match anything.
fn parse_video_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("video {}", raw)))
}

/// List all videos
pub async fn list_videos(store: web::Data<VideoStore>) -> HttpResponse {
    let videos = store.list_all().await;
    tracing::debug!(count = videos.len(), "Listing videos");
    HttpResponse::Ok().json(videos)
}

/// Get a specific video
pub async fn get_video(
    store: web::Data<VideoStore>,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_video_id(&video_id)?;
    let video = store.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(video))
}

/// Create a new video
pub async fn create_video(
    store: web::Data<VideoStore>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let req: CreateVideoRequest = parse_json_body(&body)?;
    let new_video = validate_create(&req).map_err(|errors| {
        tracing::warn!(errors = errors.len(), "Rejected video create");
        AppError::from(errors)
    })?;

    let video = store.insert(new_video).await;
    tracing::info!(video_id = video.id, "Created video");

    Ok(HttpResponse::Created().json(video))
}

/// Replace video metadata
///
/// The body is validated before the id is looked up, so an invalid body
/// against a missing video reports 400 rather than 404.
pub async fn update_video(
    store: web::Data<VideoStore>,
    config: web::Data<VideoConfig>,
    video_id: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let req: UpdateVideoRequest = parse_json_body(&body)?;
    let update = validate_update(&req, config.age_restriction_check).map_err(|errors| {
        tracing::warn!(errors = errors.len(), "Rejected video update");
        AppError::from(errors)
    })?;

    let id = parse_video_id(&video_id)?;
    store.replace(id, update).await?;
    tracing::info!(video_id = id, "Updated video");

    Ok(HttpResponse::NoContent().finish())
}

/// Delete a video
pub async fn delete_video(
    store: web::Data<VideoStore>,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_video_id(&video_id)?;
    store.remove(id).await?;
    tracing::info!(video_id = id, "Deleted video");

    Ok(HttpResponse::NoContent().finish())
}
