use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{FilterCriteria, Movie, MovieDetails, MovieId},
    routes::AppState,
    services::{SearchSnapshot, Transition},
};

pub const DETAILS_FAILED_MESSAGE: &str = "Failed to fetch movie details";

/// Poster size used on the detail view
const DETAIL_POSTER_SIZE: &str = "w500";

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Searches for this text; omitted means "submit the search input as is"
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub transition: Transition,
    pub state: SearchSnapshot,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub movie: MovieDetails,
    /// Plain catalog record, ready to post to the favorites endpoints
    pub record: Movie,
    pub poster_url: Option<String>,
    pub release_year: Option<i32>,
    pub genre_names: String,
    pub favorite: bool,
}

/// Current catalog view: state triple plus the filtered movies
pub async fn snapshot(State(state): State<Arc<AppState>>) -> Json<SearchSnapshot> {
    Json(state.search.snapshot().await)
}

/// Handler for browsing popular titles
pub async fn load_popular(State(state): State<Arc<AppState>>) -> Json<TransitionResponse> {
    let transition = state.search.load_popular().await;
    Json(TransitionResponse {
        transition,
        state: state.search.snapshot().await,
    })
}

/// Handler for the search form
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Json<TransitionResponse> {
    let transition = match request.query {
        Some(query) => state.search.search(&query).await,
        None => state.search.submit().await,
    };

    tracing::info!(transition = ?transition, "Search submitted");

    Json(TransitionResponse {
        transition,
        state: state.search.snapshot().await,
    })
}

/// Typing into the search input; nothing is fetched
pub async fn set_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Json<SearchSnapshot> {
    state.search.set_query(&request.query).await;
    Json(state.search.snapshot().await)
}

pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterCriteria> {
    Json(state.search.criteria().await)
}

/// Replaces the filter criteria and returns the re-derived view
pub async fn set_filters(
    State(state): State<Arc<AppState>>,
    Json(criteria): Json<FilterCriteria>,
) -> Json<SearchSnapshot> {
    state.search.set_criteria(criteria).await;
    Json(state.search.snapshot().await)
}

/// Handler for the single-movie detail view
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<DetailsResponse>> {
    let movie = state.catalog.get_details(id).await.map_err(|e| {
        tracing::warn!(movie_id = id, error = %e, "Movie details fetch failed");
        AppError::ExternalApi(DETAILS_FAILED_MESSAGE.to_string())
    })?;

    let record = movie.to_movie();

    Ok(Json(DetailsResponse {
        favorite: state.favorites.is_member(id).await,
        poster_url: record.poster_url(DETAIL_POSTER_SIZE),
        release_year: record.release_year(),
        genre_names: movie.genre_names(),
        record,
        movie,
    }))
}
