use std::sync::Arc;

use crate::services::{FavoritesStore, MovieCatalog};

/// Shared application state
///
/// Holds no favorite data itself; every request goes through the store so
/// the persisted collection stays the single source of truth.
#[derive(Clone)]
pub struct AppState {
    pub favorites: FavoritesStore,
    pub catalog: Arc<dyn MovieCatalog>,
}

impl AppState {
    pub fn new(favorites: FavoritesStore, catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { favorites, catalog }
    }
}
