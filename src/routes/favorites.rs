use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Movie, MovieId},
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct FavoriteStatus {
    pub id: MovieId,
    pub favorite: bool,
}

/// Favorites in the order they were saved
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.favorites.list().await)
}

/// Saves a movie; 201 when newly added, 200 when it was already a favorite
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> AppResult<(StatusCode, Json<FavoriteStatus>)> {
    let id = movie.id;
    let inserted = state.favorites.add(movie).await?;
    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(FavoriteStatus { id, favorite: true })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<StatusCode> {
    state.favorites.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> Json<FavoriteStatus> {
    Json(FavoriteStatus {
        id,
        favorite: state.favorites.is_member(id).await,
    })
}

/// Favorite button on a movie card
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<FavoriteStatus>> {
    let id = movie.id;
    let favorite = state.favorites.toggle(movie).await?;
    Ok(Json(FavoriteStatus { id, favorite }))
}
