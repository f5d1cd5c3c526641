use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::{CatalogClient, FavoritesStore, GenreCatalogCache, SearchController};

pub mod favorites;
pub mod genres;
pub mod movies;

/// Everything the views read from, constructed once at startup
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    pub search: SearchController,
    pub genres: GenreCatalogCache,
    pub favorites: FavoritesStore,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogClient>, favorites: FavoritesStore) -> Self {
        Self {
            search: SearchController::new(catalog.clone()),
            genres: GenreCatalogCache::new(catalog.clone()),
            catalog,
            favorites,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Catalog view
        .route("/movies", get(movies::snapshot))
        .route("/movies/popular", post(movies::load_popular))
        .route("/movies/search", post(movies::search))
        .route("/movies/query", put(movies::set_query))
        .route("/movies/filters", get(movies::get_filters))
        .route("/movies/filters", put(movies::set_filters))
        .route("/genres", get(genres::list))
        // Detail view
        .route("/movies/:id", get(movies::details))
        // Favorites view
        .route("/favorites", get(favorites::list))
        .route("/favorites", post(favorites::add))
        .route("/favorites/toggle", post(favorites::toggle))
        .route("/favorites/:id", get(favorites::status))
        .route("/favorites/:id", delete(favorites::remove))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
