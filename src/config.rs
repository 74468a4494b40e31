use serde::Deserialize;

/// Which key-value backend holds the favorites collection
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Redis,
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Bearer token for the movie catalog API
    pub catalog_api_key: String,

    /// Movie catalog API base URL
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Language requested from the catalog
    #[serde(default = "default_catalog_language")]
    pub catalog_language: String,

    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Key holding the serialized favorites collection
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_catalog_language() -> String {
    "en-US".to_string()
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::Redis
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_favorites_key() -> String {
    "favoriteMovies".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
