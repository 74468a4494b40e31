pub mod catalog;
pub mod favorites;

pub use catalog::{MovieCatalog, TmdbCatalog};
pub use favorites::FavoritesStore;
