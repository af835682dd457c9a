//! `SeaORM` implementation of the `VoteService` trait.

use crate::config::ComparisonConfig;
use crate::db::Store;
use crate::models::comparison::VoteReceipt;
use crate::services::comparison_cache::ComparisonCache;
use crate::services::comparison_service::ComparisonService;
use crate::services::error::{VotingError, with_timeout};
use crate::services::vote_service::{VoteService, Voter};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct SeaOrmVoteService {
    store: Store,
    cache: Arc<ComparisonCache>,
    comparisons: Arc<dyn ComparisonService>,
    store_timeout: Duration,
}

impl SeaOrmVoteService {
    #[must_use]
    pub fn new(
        store: Store,
        cache: Arc<ComparisonCache>,
        comparisons: Arc<dyn ComparisonService>,
        config: &ComparisonConfig,
    ) -> Self {
        Self {
            store,
            cache,
            comparisons,
            store_timeout: config.store_timeout(),
        }
    }

    async fn resolve_voter(&self, voter: Voter) -> Result<i32, VotingError> {
        match voter {
            Voter::Anonymous => {
                with_timeout(
                    self.store_timeout,
                    self.store.get_or_create_anonymous_user(),
                )
                .await
            }
        }
    }

    /// Queues the next comparison without holding up the voter.
    fn spawn_refresh(&self, after_comparison: i32) {
        let comparisons = Arc::clone(&self.comparisons);
        tokio::spawn(async move {
            match comparisons.create_comparison().await {
                Ok(next) => debug!(
                    after_comparison,
                    comparison_id = next.id,
                    "Queued follow-up comparison"
                ),
                Err(e) => warn!(
                    event = "comparison_refresh_failed",
                    after_comparison,
                    error = %e,
                    "Could not create follow-up comparison"
                ),
            }
        });
    }
}

#[async_trait]
impl VoteService for SeaOrmVoteService {
    async fn record_vote(
        &self,
        comparison_id: i32,
        winner_set_id: i32,
        voter: Voter,
    ) -> Result<VoteReceipt, VotingError> {
        let comparison = with_timeout(
            self.store_timeout,
            self.store.get_comparison(comparison_id),
        )
        .await?
        .ok_or_else(|| VotingError::comparison_not_found(comparison_id))?;

        let side = comparison
            .side_of(winner_set_id)
            .ok_or(VotingError::InvalidWinner {
                comparison_id,
                winner_set_id,
            })?;

        let user_id = self.resolve_voter(voter).await?;

        let recorded = with_timeout(
            self.store_timeout,
            self.store
                .record_vote(comparison_id, user_id, winner_set_id, side),
        )
        .await?;

        self.cache
            .update_votes(comparison_id, recorded.votes_a, recorded.votes_b)
            .await;

        metrics::counter!("votes_recorded_total").increment(1);
        info!(
            event = "vote_recorded",
            vote_id = recorded.vote_id,
            comparison_id,
            winner_set_id,
            votes_a = recorded.votes_a,
            votes_b = recorded.votes_b,
            "Vote recorded"
        );

        self.spawn_refresh(comparison_id);

        Ok(VoteReceipt {
            vote_id: recorded.vote_id,
            comparison_id,
            winner_set_id,
            votes_a: recorded.votes_a,
            votes_b: recorded.votes_b,
        })
    }
}
