//! `SeaORM` implementation of the `LeaderboardService` trait.

use crate::config::ComparisonConfig;
use crate::db::Store;
use crate::models::leaderboard::MovieRanking;
use crate::services::error::{VotingError, with_timeout};
use crate::services::leaderboard;
use crate::services::leaderboard_service::LeaderboardService;
use async_trait::async_trait;
use std::time::Duration;

pub struct SeaOrmLeaderboardService {
    store: Store,
    store_timeout: Duration,
}

impl SeaOrmLeaderboardService {
    #[must_use]
    pub const fn new(store: Store, config: &ComparisonConfig) -> Self {
        Self {
            store,
            store_timeout: config.store_timeout(),
        }
    }
}

#[async_trait]
impl LeaderboardService for SeaOrmLeaderboardService {
    async fn rank_items(&self, limit: usize) -> Result<Vec<MovieRanking>, VotingError> {
        let snapshot =
            with_timeout(self.store_timeout, self.store.leaderboard_snapshot()).await?;
        Ok(leaderboard::rank_items(&snapshot, limit))
    }
}
