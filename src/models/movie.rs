use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Genre;

/// Base URL for poster images served by the catalog's CDN
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Identifier of a movie within the catalog
pub type MovieId = u64;

/// Identifier of a genre within the catalog
pub type GenreId = u32;

/// A catalog movie record
///
/// Serialized with the catalog's field names so a persisted favorites blob
/// has the same shape as the records the catalog returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// `YYYY-MM-DD`, or empty when the catalog has no date
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: BTreeSet<GenreId>,
}

impl Movie {
    /// Full poster URL at the given CDN size (e.g. "w500"), if the movie has a poster
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(path, size))
    }

    /// Four-digit release year, when the release date carries one
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.get(..4)?.parse().ok()
    }
}

/// Builds a poster URL from a catalog image path
fn image_url(path: &str, size: &str) -> String {
    if path.starts_with('/') {
        format!("{}/{}{}", POSTER_BASE_URL, size, path)
    } else {
        format!("{}/{}/{}", POSTER_BASE_URL, size, path)
    }
}

/// A single movie with its genres resolved to names, as shown on the detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub tagline: Option<String>,
}

impl MovieDetails {
    /// Comma separated genre names, in catalog order
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Collapses the details back into a plain catalog record, e.g. to favorite it
    pub fn to_movie(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.clone(),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}
