//! Test-support endpoints

use actix_web::{web, HttpResponse};

use crate::store::VideoStore;

/// Wipe every stored video
pub async fn clear_all_data(store: web::Data<VideoStore>) -> HttpResponse {
    let removed = store.clear().await;
    tracing::info!(removed, "Cleared all video data");
    HttpResponse::NoContent().finish()
}
