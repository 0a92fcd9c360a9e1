use std::sync::Arc;

use axum::{Json, response::IntoResponse};
use tracing::info;

use crate::favorites::FavoriteService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FavoriteService>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(serde_json::json!({ "status": "ok" }))
}
