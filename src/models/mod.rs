use serde::Deserialize;
use std::collections::BTreeSet;

pub mod filter_criteria;
pub mod genre;
pub mod movie;

pub use filter_criteria::FilterCriteria;
pub use genre::{Genre, GenreCatalog};
pub use movie::{GenreId, Movie, MovieDetails, MovieId, POSTER_BASE_URL};

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged list envelope used by `/movie/popular` and `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u64,
}

/// Raw movie record as returned in list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

impl From<ApiMovie> for Movie {
    fn from(movie: ApiMovie) -> Self {
        Movie {
            id: movie.id,
            title: movie.title,
            overview: movie.overview.unwrap_or_default(),
            poster_path: movie.poster_path.filter(|p| !p.is_empty()),
            release_date: movie.release_date.unwrap_or_default(),
            vote_average: movie.vote_average.unwrap_or_default(),
            genre_ids: movie.genre_ids.into_iter().collect::<BTreeSet<_>>(),
        }
    }
}

/// Response of `/genre/movie/list`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenreList {
    pub genres: Vec<Genre>,
}

/// Response of `/movie/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl From<ApiMovieDetails> for MovieDetails {
    fn from(details: ApiMovieDetails) -> Self {
        MovieDetails {
            id: details.id,
            title: details.title,
            overview: details.overview.unwrap_or_default(),
            poster_path: details.poster_path.filter(|p| !p.is_empty()),
            release_date: details.release_date.unwrap_or_default(),
            vote_average: details.vote_average.unwrap_or_default(),
            genres: details.genres,
            runtime: details.runtime.filter(|r| *r > 0),
            tagline: details.tagline.filter(|t| !t.trim().is_empty()),
        }
    }
}
