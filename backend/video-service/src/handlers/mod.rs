//! HTTP handlers for Video Service

pub mod testing;
pub mod videos;

use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

pub use testing::clear_all_data;
pub use videos::{create_video, delete_video, get_video, list_videos, update_video};

/// Decode a JSON request body. An empty body decodes as `{}` so missing
/// fields surface as field errors; malformed JSON becomes a `body` error.
pub fn parse_json_body<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!(error = %err, "Rejected request body");
        AppError::BadRequest(format!("Json deserialize error: {}", err))
    })
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

/// Configure routes for video service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/videos")
                .route("", web::get().to(list_videos))
                .route("", web::post().to(create_video))
                .route("/{id}", web::get().to(get_video))
                .route("/{id}", web::put().to(update_video))
                .route("/{id}", web::delete().to(delete_video)),
        )
        .service(web::scope("/testing").route("/all-data", web::delete().to(clear_all_data)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use video_core::validation::CreateVideoRequest;

    #[test]
    fn test_empty_body_decodes_as_empty_object() {
        let req: CreateVideoRequest = parse_json_body(b"").unwrap();
        assert!(req.title.is_none());

        let req: CreateVideoRequest = parse_json_body(b"  \n").unwrap();
        assert!(req.author.is_none());
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let result = parse_json_body::<CreateVideoRequest>(b"{not json");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
