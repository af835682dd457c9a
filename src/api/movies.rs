use axum::{
    Json,
    extract::{Path, State},
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::api::validation::validate_id;
use crate::api::{ApiError, ApiResponse, AppState};
use crate::models::movie::Movie;
use crate::models::top4_set::Top4SetView;

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let movies = state.store().list_movies().await?;
    Ok(Json(ApiResponse::success(movies)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let id = validate_id("movie", id)?;
    let movie = state
        .store()
        .get_movie(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Movie", id))?;

    Ok(Json(ApiResponse::success(movie)))
}

/// Every top-4 set with its movies resolved in display order.
pub async fn list_top4_sets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Top4SetView>>>, ApiError> {
    let sets = state.store().list_top4_sets().await?;

    let ids: Vec<i32> = sets
        .iter()
        .flat_map(|s| s.movie_ids.iter().copied())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let movies = state.store().get_movies_by_ids(&ids).await?;

    let views = sets
        .iter()
        .map(|set| Top4SetView::resolve(set, &movies))
        .collect();

    Ok(Json(ApiResponse::success(views)))
}
