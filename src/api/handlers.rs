use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{error::AppResult, middleware::request_id::RequestId, models::Movie};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Favorite status of one movie
///
/// `changed` is present only on mutating endpoints and tells whether the
/// persisted collection actually changed.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FavoriteStatus {
    pub id: i64,
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Movies trending today
pub async fn trending(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<Movie>>> {
    tracing::info!(request_id = %request_id, "Fetching trending movies");
    let movies = state.catalog.trending().await?;
    Ok(Json(movies))
}

/// Free-text movie search
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    tracing::info!(request_id = %request_id, query = %params.query, "Searching movies");
    let movies = state.catalog.search(&params.query).await?;
    Ok(Json(movies))
}

/// All favorites in the order they were added
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.favorites.load().await?;
    Ok(Json(movies))
}

/// Adds a favorite; re-adding an existing one is a no-op
pub async fn add_favorite(
    State(state): State<AppState>,
    payload: Result<Json<Movie>, JsonRejection>,
) -> AppResult<(StatusCode, Json<FavoriteStatus>)> {
    let Json(movie) = payload?;
    let added = state.favorites.add(&movie).await?;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(FavoriteStatus {
            id: movie.id,
            favorite: true,
            changed: Some(added),
        }),
    ))
}

/// Flips the favorite status of the posted movie
pub async fn toggle_favorite(
    State(state): State<AppState>,
    payload: Result<Json<Movie>, JsonRejection>,
) -> AppResult<Json<FavoriteStatus>> {
    let Json(movie) = payload?;
    let favorite = state.favorites.toggle(&movie).await?;
    Ok(Json(FavoriteStatus {
        id: movie.id,
        favorite,
        changed: Some(true),
    }))
}

/// Whether a movie is a favorite, read fresh from storage
pub async fn favorite_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FavoriteStatus>> {
    let favorite = state.favorites.is_favorite(id).await?;
    Ok(Json(FavoriteStatus {
        id,
        favorite,
        changed: None,
    }))
}

/// Removes a favorite; removing a movie that is not a favorite is a no-op
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FavoriteStatus>> {
    let removed = state.favorites.remove_by_id(id).await?;
    Ok(Json(FavoriteStatus {
        id,
        favorite: false,
        changed: Some(removed),
    }))
}
