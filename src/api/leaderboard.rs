use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use crate::api::validation::validate_limit;
use crate::api::{ApiError, ApiResponse, AppState, LeaderboardQuery, LeaderboardResponse};
use crate::services::clamp_limit;

/// `GET /api/v1/leaderboard?limit=N` (default 100, capped at 500)
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ApiResponse<LeaderboardResponse>>, ApiError> {
    let limit = clamp_limit(validate_limit(query.limit)?);
    let rankings = state.leaderboard_service().rank_items(limit).await?;

    Ok(Json(ApiResponse::success(LeaderboardResponse { rankings })))
}
