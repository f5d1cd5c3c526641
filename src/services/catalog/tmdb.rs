/// TMDB (The Movie Database) catalog client
///
/// API Flow:
/// 1. Browse: /movie/popular → first page of popular titles
/// 2. Search: /search/movie?query= → first page of matching titles
/// 3. Genres: /genre/movie/list → id/name pairs
/// 4. Details: /movie/{id} → one title with resolved genres
use crate::{
    error::{AppError, AppResult},
    models::{ApiGenreList, ApiMovie, ApiMovieDetails, ApiPage, Genre, Movie, MovieDetails, MovieId},
    services::catalog::CatalogClient,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "TMDB API key cannot be empty".to_string(),
            ));
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` with the API key attached and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    async fn get_popular(&self) -> AppResult<Vec<Movie>> {
        let page: ApiPage<ApiMovie> = self.get_json("/movie/popular", &[]).await?;
        let movies: Vec<Movie> = page.results.into_iter().map(Movie::from).collect();

        tracing::info!(
            results = movies.len(),
            client = self.name(),
            "Popular movies fetched"
        );

        Ok(movies)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        let page: ApiPage<ApiMovie> = self
            .get_json("/search/movie", &[("query", query)])
            .await?;
        let movies: Vec<Movie> = page.results.into_iter().map(Movie::from).collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            client = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn get_genres(&self) -> AppResult<Vec<Genre>> {
        let list: ApiGenreList = self.get_json("/genre/movie/list", &[]).await?;

        tracing::info!(
            genres = list.genres.len(),
            client = self.name(),
            "Genre list fetched"
        );

        Ok(list.genres)
    }

    async fn get_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        let details: ApiMovieDetails = self.get_json(&format!("/movie/{}", id), &[]).await?;

        tracing::info!(movie_id = id, client = self.name(), "Movie details fetched");

        Ok(details.into())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
