use serde::{Deserialize, Serialize};

use crate::models::leaderboard::MovieRanking;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub comparison_id: i32,
    pub winner_set_id: i32,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub vote_id: i32,
    pub votes_a: i32,
    pub votes_b: i32,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub rankings: Vec<MovieRanking>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub cached_comparisons: usize,
    pub version: &'static str,
    pub uptime_secs: u64,
}
