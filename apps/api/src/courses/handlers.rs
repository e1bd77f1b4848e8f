//! Axum route handlers for course listings.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::courses::catalog::{demo_catalog, Catalog};
use crate::courses::youtube::{
    Video, VideoSearch, DEFAULT_PLAYLIST_RESULTS, DEFAULT_SEARCH_RESULTS,
};
use crate::errors::AppError;
use crate::state::AppState;

const MAX_RESULTS_CAP: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistParams {
    pub max_results: Option<u32>,
}

fn video_search(state: &AppState) -> Result<Arc<dyn VideoSearch>, AppError> {
    state
        .videos
        .clone()
        .ok_or_else(|| AppError::Unavailable("video search is not configured".to_string()))
}

/// GET /api/v1/courses
pub async fn handle_catalog() -> Json<Catalog> {
    Json(demo_catalog())
}

/// GET /api/v1/courses/search?q=...
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Video>>, AppError> {
    if params.q.trim().is_empty() {
        return Err(AppError::Validation("q cannot be empty".to_string()));
    }

    let max = params
        .max_results
        .unwrap_or(DEFAULT_SEARCH_RESULTS)
        .clamp(1, MAX_RESULTS_CAP);
    let videos = video_search(&state)?
        .search_courses(params.q.trim(), max)
        .await?;

    Ok(Json(videos))
}

/// GET /api/v1/courses/playlists/:id
pub async fn handle_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Query(params): Query<PlaylistParams>,
) -> Result<Json<Vec<Video>>, AppError> {
    let max = params
        .max_results
        .unwrap_or(DEFAULT_PLAYLIST_RESULTS)
        .clamp(1, MAX_RESULTS_CAP);
    let videos = video_search(&state)?
        .playlist_videos(&playlist_id, max)
        .await?;

    Ok(Json(videos))
}
