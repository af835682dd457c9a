//! Domain service for the movie leaderboard.

use crate::constants::limits;
use crate::models::leaderboard::MovieRanking;
use crate::services::error::VotingError;

#[async_trait::async_trait]
pub trait LeaderboardService: Send + Sync {
    /// Ranks every movie that has appeared in at least one comparison.
    ///
    /// The result is computed from durable history at call time and may lag
    /// concurrent votes by the commit window.
    ///
    /// # Errors
    ///
    /// Returns [`VotingError::Transient`] when the store is slow or busy.
    async fn rank_items(&self, limit: usize) -> Result<Vec<MovieRanking>, VotingError>;
}

/// Applies the default and the hard ceiling to a requested limit.
#[must_use]
pub fn clamp_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(limits::DEFAULT_LEADERBOARD_LIMIT)
        .min(limits::MAX_LEADERBOARD_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), limits::DEFAULT_LEADERBOARD_LIMIT);
        assert_eq!(clamp_limit(Some(10)), 10);
        assert_eq!(clamp_limit(Some(10_000)), limits::MAX_LEADERBOARD_LIMIT);
    }
}
