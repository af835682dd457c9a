use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use crate::api::observability::VotingContext;
use crate::api::{ApiError, ApiResponse, AppState};
use crate::models::comparison::ComparisonView;

/// Returns an active comparison, creating one if none is live.
///
/// # Endpoint
/// `GET /api/v1/comparison`
///
/// # Errors
/// `409` when fewer than two sets exist, `503` when the store is busy.
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
) -> Result<(Extension<VotingContext>, Json<ApiResponse<ComparisonView>>), ApiError> {
    let view = state.comparison_service().select_active().await?;
    let context = VotingContext {
        comparison_id: view.id,
        winner_set_id: None,
    };
    Ok((Extension(context), Json(ApiResponse::success(view))))
}
