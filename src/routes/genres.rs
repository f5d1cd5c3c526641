use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::Genre, routes::AppState};

/// Genre picker options; empty when the catalog could not be reached
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Genre>> {
    Json(state.genres.get().await.options())
}
