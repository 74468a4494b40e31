/// TMDB-compatible catalog client
///
/// Endpoints used:
/// - `/trending/movie/day` for the trending feed
/// - `/search/movie` for free-text search (adult titles included)
///
/// Both are authenticated with a bearer token and return a page whose
/// `results` array holds movie records.
use crate::{
    error::{AppError, AppResult},
    models::{CatalogPage, Movie},
    services::catalog::MovieCatalog,
};
use reqwest::{header, Client as HttpClient};

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    async fn fetch_page(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Vec<Movie>> {
        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .query(&[("language", self.language.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let page: CatalogPage = response.json().await?;
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn trending(&self) -> AppResult<Vec<Movie>> {
        let movies = self.fetch_page("/trending/movie/day", &[]).await?;

        tracing::info!(
            results = movies.len(),
            catalog = self.name(),
            "Trending movies fetched"
        );

        Ok(movies)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let movies = self
            .fetch_page(
                "/search/movie",
                &[("query", query), ("include_adult", "true")],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            catalog = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
