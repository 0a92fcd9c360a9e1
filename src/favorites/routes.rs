use axum::{Router, routing::get};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/favorites",
        get(handler::get_favorites)
            .post(handler::add_favorite)
            .delete(handler::remove_favorite),
    )
}
