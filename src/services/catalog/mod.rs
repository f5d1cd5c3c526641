/// Remote movie catalog abstraction
///
/// The catalog is the only source of movie data. Everything above it (the search
/// controller, the genre cache, the detail view) talks to it through this trait so
/// the HTTP implementation can be swapped for a fake in tests.
use crate::{
    error::AppResult,
    models::{Genre, Movie, MovieDetails, MovieId},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for movie catalog clients
///
/// Every method performs exactly one network round trip. Failures (transport,
/// non-success status, undecodable body) are returned as errors for which
/// [`AppError::is_fetch`](crate::error::AppError::is_fetch) holds; nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Currently popular titles
    async fn get_popular(&self) -> AppResult<Vec<Movie>>;

    /// Free-text title search
    async fn search(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Full genre list of the catalog
    async fn get_genres(&self) -> AppResult<Vec<Genre>>;

    /// A single title with its genres resolved to names
    async fn get_details(&self, id: MovieId) -> AppResult<MovieDetails>;

    /// Client name for logging and debugging
    fn name(&self) -> &'static str;
}
