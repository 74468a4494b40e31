/// Movie catalog abstraction
///
/// The catalog is the read-only source of movie metadata: a trending feed and
/// free-text search. Implementations own no state beyond their HTTP client.
use crate::{error::AppResult, models::Movie};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Movies trending today
    async fn trending(&self) -> AppResult<Vec<Movie>>;

    /// Search movies by free-text query
    ///
    /// A blank query is rejected with `InvalidInput` without contacting the
    /// catalog.
    async fn search(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}
