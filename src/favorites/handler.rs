use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::model::NewFavorite;
use crate::handler::AppState;
use crate::unpack_error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteKeyParams {
    pub student_id: String,
    pub book_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentParams {
    pub student_id: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn internal_error(msg: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: msg.to_string() }),
    )
        .into_response()
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(payload): Json<NewFavorite>,
) -> Response {
    match state.service.add_favorite(payload).await {
        Ok(record) => {
            tracing::info!(student_id = %record.student_id, book_id = record.book_id, "added favorite");
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(e) => {
            tracing::error!("failed to add favorite: {}", unpack_error(&e));
            internal_error("failed to add favorite")
        }
    }
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Query(params): Query<FavoriteKeyParams>,
) -> Response {
    match state
        .service
        .remove_favorite(&params.student_id, params.book_id)
        .await
    {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!("failed to remove favorite: {}", unpack_error(&e));
            internal_error("failed to remove favorite")
        }
    }
}

pub async fn get_favorites(
    State(state): State<AppState>,
    Query(params): Query<StudentParams>,
) -> Response {
    match state.service.favorites_by_student(&params.student_id).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!("failed to list favorites: {}", unpack_error(&e));
            internal_error("failed to list favorites")
        }
    }
}
