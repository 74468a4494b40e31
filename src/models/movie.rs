use serde::{Deserialize, Deserializer, Serialize};

/// Base URL for poster and backdrop images served by the catalog CDN
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A movie record as returned by the catalog and persisted in favorites
///
/// `id` is the only field with meaning to the favorites store; the rest is
/// carried through untouched. Field order matches the persisted JSON layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub original_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub adult: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub backdrop_path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub poster_path: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
}

/// The catalog returns `null` for missing images and dates
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn image_url(path: &str) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        Some(format!("{}{}", IMAGE_BASE_URL, path))
    }
}

impl Movie {
    /// Full poster URL, if the movie has a poster
    pub fn poster_url(&self) -> Option<String> {
        image_url(&self.poster_path)
    }

    /// Full backdrop URL, if the movie has a backdrop
    pub fn backdrop_url(&self) -> Option<String> {
        image_url(&self.backdrop_path)
    }

    /// Rating as shown on the details view, e.g. "7.3 / 10"
    pub fn rating_label(&self) -> String {
        format!("{:.1} / 10", self.vote_average)
    }
}

/// One page of catalog results; only `results` is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub results: Vec<Movie>,
}
