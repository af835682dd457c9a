use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::observability::VotingContext;
use crate::api::validation::validate_id;
use crate::api::{ApiError, ApiResponse, AppState, VoteRequest, VoteResponse};
use crate::services::Voter;

/// Records a vote for one side of a comparison.
///
/// # Endpoint
/// `POST /api/v1/votes`
///
/// # Errors
/// - `404` if the comparison does not exist
/// - `400` if the winning set is not part of it
/// - `503` when the store is busy; the vote was not recorded
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoteRequest>,
) -> Response {
    let context = VotingContext {
        comparison_id: request.comparison_id,
        winner_set_id: Some(request.winner_set_id),
    };

    let mut response = record_vote(&state, request).await.into_response();
    response.extensions_mut().insert(context);
    response
}

async fn record_vote(
    state: &AppState,
    request: VoteRequest,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    let comparison_id = validate_id("comparison", request.comparison_id)?;
    let winner_set_id = validate_id("set", request.winner_set_id)?;

    let receipt = state
        .vote_service()
        .record_vote(comparison_id, winner_set_id, Voter::Anonymous)
        .await?;

    Ok(Json(ApiResponse::success(VoteResponse {
        vote_id: receipt.vote_id,
        votes_a: receipt.votes_a,
        votes_b: receipt.votes_b,
    })))
}
