//! Favorites persisted as one JSON array under a single key.
//!
//! Every mutation loads the whole collection, modifies it and writes it back.
//! Mutations on the same store are serialized so overlapping calls cannot
//! lose each other's writes.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    db::KeyValueStore,
    error::{AppError, AppResult},
    models::Movie,
};

/// Durable, duplicate-free list of favorited movies
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Key the collection is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns all favorites in storage order
    ///
    /// A missing entry is an empty collection. An entry that does not parse
    /// as a movie array is reported as `MalformedState`.
    pub async fn load(&self) -> AppResult<Vec<Movie>> {
        let raw = self.storage.get(&self.key).await.map_err(|e| {
            tracing::error!(error = %e, key = %self.key, "Failed to load favorites");
            e
        })?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(error = %e, key = %self.key, "Persisted favorites are malformed");
            AppError::MalformedState(e.to_string())
        })
    }

    /// Replaces the persisted collection
    pub async fn store(&self, movies: &[Movie]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write(movies).await
    }

    /// Appends `movie` unless a favorite with the same id exists
    ///
    /// Returns `true` when the movie was inserted. Existing entries are never
    /// updated.
    pub async fn add(&self, movie: &Movie) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        self.insert_if_absent(movie).await
    }

    /// Removes every favorite sharing `movie.id`
    pub async fn remove(&self, movie: &Movie) -> AppResult<bool> {
        self.remove_by_id(movie.id).await
    }

    /// Removes every favorite with `id`
    ///
    /// The collection is written back even when nothing matched. Returns
    /// `true` when at least one entry was dropped.
    pub async fn remove_by_id(&self, id: i64) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        self.delete(id).await
    }

    /// Whether a movie with `id` is currently a favorite
    pub async fn is_favorite(&self, id: i64) -> AppResult<bool> {
        let movies = self.load().await?;
        Ok(movies.iter().any(|m| m.id == id))
    }

    /// Flips the favorite status of `movie` and returns the new status
    pub async fn toggle(&self, movie: &Movie) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        if self.is_favorite(movie.id).await? {
            self.delete(movie.id).await?;
            Ok(false)
        } else {
            self.insert_if_absent(movie).await?;
            Ok(true)
        }
    }

    async fn insert_if_absent(&self, movie: &Movie) -> AppResult<bool> {
        let mut movies = self.load().await?;

        if movies.iter().any(|m| m.id == movie.id) {
            tracing::debug!(movie_id = movie.id, "Movie already in favorites");
            return Ok(false);
        }

        movies.push(movie.clone());
        self.write(&movies).await?;

        tracing::info!(
            movie_id = movie.id,
            title = %movie.title,
            count = movies.len(),
            "Movie added to favorites"
        );
        Ok(true)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut movies = self.load().await?;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        let removed = movies.len() != before;

        self.write(&movies).await?;

        tracing::info!(
            movie_id = id,
            removed,
            count = movies.len(),
            "Movie removed from favorites"
        );
        Ok(removed)
    }

    async fn write(&self, movies: &[Movie]) -> AppResult<()> {
        let json = serde_json::to_string(movies)
            .map_err(|e| AppError::Internal(format!("Favorites serialization error: {}", e)))?;

        self.storage.set(&self.key, &json).await.map_err(|e| {
            tracing::error!(error = %e, key = %self.key, "Failed to store favorites");
            e
        })
    }
}
