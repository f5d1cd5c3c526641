use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    db::KeyValueStore,
    error::AppResult,
    models::{Movie, MovieId},
};

/// Storage key holding the serialized favorites list
pub const FAVORITES_KEY: &str = "favorites";

/// The user's saved movies
///
/// Unique by movie id, kept in insertion order, and written through to durable
/// storage on every mutation. A mutation only takes effect in memory once the
/// write has succeeded, so memory and storage never disagree.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    movies: RwLock<Vec<Movie>>,
}

impl FavoritesStore {
    /// Restores the collection from storage
    ///
    /// Never fails: a missing, unreadable or corrupt blob yields an empty collection.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let movies = match storage.read(FAVORITES_KEY).await {
            Ok(Some(blob)) => decode(&blob).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable favorites");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, backend = storage.name(), "Failed to read favorites");
                Vec::new()
            }
        };

        tracing::info!(
            count = movies.len(),
            backend = storage.name(),
            "Favorites loaded"
        );

        Self {
            storage,
            movies: RwLock::new(movies),
        }
    }

    /// Appends `movie` unless a favorite with the same id exists
    ///
    /// Returns whether the movie was inserted.
    pub async fn add(&self, movie: Movie) -> AppResult<bool> {
        let mut movies = self.movies.write().await;
        if movies.iter().any(|m| m.id == movie.id) {
            return Ok(false);
        }
        self.push_persisted(&mut movies, movie).await?;
        Ok(true)
    }

    /// Removes the favorite with `id`; returns whether one was present
    pub async fn remove(&self, id: MovieId) -> AppResult<bool> {
        let mut movies = self.movies.write().await;
        let Some(index) = movies.iter().position(|m| m.id == id) else {
            return Ok(false);
        };
        self.remove_persisted(&mut movies, index).await?;
        Ok(true)
    }

    /// Adds the movie if absent, removes it otherwise; returns the new membership
    pub async fn toggle(&self, movie: Movie) -> AppResult<bool> {
        let mut movies = self.movies.write().await;
        match movies.iter().position(|m| m.id == movie.id) {
            Some(index) => {
                self.remove_persisted(&mut movies, index).await?;
                Ok(false)
            }
            None => {
                self.push_persisted(&mut movies, movie).await?;
                Ok(true)
            }
        }
    }

    pub async fn is_member(&self, id: MovieId) -> bool {
        self.movies.read().await.iter().any(|m| m.id == id)
    }

    /// Favorites in insertion order
    pub async fn list(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }

    async fn push_persisted(&self, movies: &mut Vec<Movie>, movie: Movie) -> AppResult<()> {
        let id = movie.id;
        movies.push(movie);
        if let Err(e) = self.persist(movies).await {
            movies.pop();
            return Err(e);
        }

        tracing::info!(movie_id = id, count = movies.len(), "Favorite added");
        Ok(())
    }

    async fn remove_persisted(&self, movies: &mut Vec<Movie>, index: usize) -> AppResult<()> {
        let removed = movies.remove(index);
        if let Err(e) = self.persist(movies).await {
            movies.insert(index, removed);
            return Err(e);
        }

        tracing::info!(movie_id = removed.id, count = movies.len(), "Favorite removed");
        Ok(())
    }

    async fn persist(&self, movies: &[Movie]) -> AppResult<()> {
        let blob = serde_json::to_string(movies)?;
        self.storage.write(FAVORITES_KEY, &blob).await
    }
}

/// Parses a persisted blob, keeping the first entry for any repeated id
fn decode(blob: &str) -> AppResult<Vec<Movie>> {
    let movies: Vec<Movie> = serde_json::from_str(blob)?;
    let mut seen = HashSet::new();
    Ok(movies.into_iter().filter(|m| seen.insert(m.id)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{FileStorage, MemoryStorage},
        error::AppError,
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: Some(format!("/{}.jpg", id)),
            release_date: "2020-01-01".to_string(),
            vote_average: 7.5,
            genre_ids: [28].into_iter().collect(),
        }
    }

    fn ids(movies: &[Movie]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id).collect()
    }

    /// Storage whose writes can be switched to fail
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: AtomicBool,
    }

    #[async_trait::async_trait]
    impl KeyValueStore for FlakyStorage {
        async fn read(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.read(key).await
        }

        async fn write(&self, key: &str, value: &str) -> AppResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::Internal("disk full".to_string()));
            }
            self.inner.write(key, value).await
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_starts_empty_without_blob() {
        let store = FavoritesStore::load(Arc::new(MemoryStorage::new())).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = FavoritesStore::load(Arc::new(MemoryStorage::new())).await;

        assert!(store.add(movie(1, "Alpha")).await.unwrap());
        assert!(!store.add(movie(1, "Alpha")).await.unwrap());

        assert_eq!(ids(&store.list().await), vec![1]);
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let store = FavoritesStore::load(Arc::new(MemoryStorage::new())).await;
        for id in [3, 1, 2] {
            store.add(movie(id, "x")).await.unwrap();
        }

        assert_eq!(ids(&store.list().await), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_remove_and_membership() {
        let store = FavoritesStore::load(Arc::new(MemoryStorage::new())).await;
        store.add(movie(1, "Alpha")).await.unwrap();
        store.add(movie(2, "Beta")).await.unwrap();

        assert!(store.is_member(1).await);
        assert!(store.remove(1).await.unwrap());
        assert!(!store.is_member(1).await);
        assert!(!store.remove(1).await.unwrap());
        assert!(!store.remove(42).await.unwrap());

        assert_eq!(ids(&store.list().await), vec![2]);
    }

    #[tokio::test]
    async fn test_every_mutation_is_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let store = FavoritesStore::load(storage.clone()).await;

        store.add(movie(1, "Alpha")).await.unwrap();
        let blob = storage.read(FAVORITES_KEY).await.unwrap().unwrap();
        assert_eq!(ids(&decode(&blob).unwrap()), vec![1]);

        store.remove(1).await.unwrap();
        let blob = storage.read(FAVORITES_KEY).await.unwrap().unwrap();
        assert_eq!(blob, "[]");
    }

    #[tokio::test]
    async fn test_round_trip_across_restart() {
        let dir = tempfile::tempdir().unwrap();

        let before = {
            let store = FavoritesStore::load(Arc::new(FileStorage::new(dir.path()))).await;
            store.add(movie(10, "Heat")).await.unwrap();
            store.add(movie(20, "Ronin")).await.unwrap();
            store.add(movie(30, "Thief")).await.unwrap();
            store.remove(20).await.unwrap();
            store.list().await
        };

        let reloaded = FavoritesStore::load(Arc::new(FileStorage::new(dir.path()))).await;
        assert_eq!(reloaded.list().await, before);
    }

    #[tokio::test]
    async fn test_corrupt_blob_recovers_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(FAVORITES_KEY, "{not json").await.unwrap();

        let store = FavoritesStore::load(storage.clone()).await;
        assert!(store.is_empty().await);

        store.add(movie(1, "Alpha")).await.unwrap();
        let blob = storage.read(FAVORITES_KEY).await.unwrap().unwrap();
        assert_eq!(ids(&decode(&blob).unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn test_duplicate_entries_collapsed_on_load() {
        let storage = Arc::new(MemoryStorage::new());
        let blob = serde_json::to_string(&vec![
            movie(1, "First"),
            movie(2, "Other"),
            movie(1, "Second"),
        ])
        .unwrap();
        storage.write(FAVORITES_KEY, &blob).await.unwrap();

        let store = FavoritesStore::load(storage).await;
        let movies = store.list().await;

        assert_eq!(ids(&movies), vec![1, 2]);
        assert_eq!(movies[0].title, "First");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_collection_unchanged() {
        let storage = Arc::new(FlakyStorage::default());
        let store = FavoritesStore::load(storage.clone()).await;
        store.add(movie(1, "Alpha")).await.unwrap();

        storage.failing.store(true, Ordering::SeqCst);
        assert!(store.add(movie(2, "Beta")).await.is_err());
        assert!(store.remove(1).await.is_err());

        assert_eq!(ids(&store.list().await), vec![1]);
        let blob = storage.read(FAVORITES_KEY).await.unwrap().unwrap();
        assert_eq!(ids(&decode(&blob).unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn test_toggle() {
        let store = FavoritesStore::load(Arc::new(MemoryStorage::new())).await;

        assert!(store.toggle(movie(5, "Alien")).await.unwrap());
        assert!(store.is_member(5).await);
        assert!(!store.toggle(movie(5, "Alien")).await.unwrap());
        assert!(!store.is_member(5).await);
    }
}
