//! `SeaORM` implementation of the `ComparisonService` trait.

use crate::config::ComparisonConfig;
use crate::db::Store;
use crate::models::comparison::{Comparison, ComparisonView};
use crate::models::top4_set::Top4SetView;
use crate::services::comparison_cache::ComparisonCache;
use crate::services::comparison_service::ComparisonService;
use crate::services::error::{VotingError, with_timeout};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct SeaOrmComparisonService {
    store: Store,
    cache: Arc<ComparisonCache>,
    ttl: Duration,
    store_timeout: Duration,
}

impl SeaOrmComparisonService {
    #[must_use]
    pub const fn new(store: Store, cache: Arc<ComparisonCache>, config: &ComparisonConfig) -> Self {
        Self {
            store,
            cache,
            ttl: config.ttl(),
            store_timeout: config.store_timeout(),
        }
    }

    /// Cached tallies when present, durable ones otherwise.
    async fn current_tallies(&self, comparison: &Comparison) -> (i32, i32) {
        if let Some(entry) = self.cache.get(comparison.id).await {
            return (entry.votes_a, entry.votes_b);
        }

        let remaining = (comparison.expires_at - Utc::now())
            .to_std()
            .unwrap_or_default();

        self.cache
            .put(
                comparison.id,
                comparison.set_a_id,
                comparison.set_b_id,
                comparison.votes_a,
                comparison.votes_b,
                remaining,
            )
            .await;

        (comparison.votes_a, comparison.votes_b)
    }

    async fn resolve_set(&self, set_id: i32) -> Result<Top4SetView, VotingError> {
        let Some(set) = with_timeout(self.store_timeout, self.store.get_top4_set(set_id)).await?
        else {
            warn!(set_id, "Comparison references a missing top-4 set");
            return Ok(Top4SetView::empty(set_id));
        };

        let movies = with_timeout(
            self.store_timeout,
            self.store.get_movies_by_ids(&set.movie_ids),
        )
        .await?;

        Ok(Top4SetView::resolve(&set, &movies))
    }
}

#[async_trait]
impl ComparisonService for SeaOrmComparisonService {
    async fn select_active(&self) -> Result<ComparisonView, VotingError> {
        let now = Utc::now();
        let comparison = match with_timeout(
            self.store_timeout,
            self.store.find_active_comparison(now),
        )
        .await?
        {
            Some(existing) => existing,
            None => {
                debug!("No active comparison, creating one");
                self.create_comparison().await?
            }
        };

        let (votes_a, votes_b) = self.current_tallies(&comparison).await;
        let (set_a, set_b) = tokio::try_join!(
            self.resolve_set(comparison.set_a_id),
            self.resolve_set(comparison.set_b_id)
        )?;

        Ok(ComparisonView {
            id: comparison.id,
            set_a,
            set_b,
            votes_a,
            votes_b,
            expires_at: comparison.expires_at,
        })
    }

    async fn create_comparison(&self) -> Result<Comparison, VotingError> {
        let (set_a_id, set_b_id) =
            with_timeout(self.store_timeout, self.store.random_distinct_set_pair())
                .await?
                .ok_or(VotingError::InsufficientData)?;

        let comparison = with_timeout(
            self.store_timeout,
            self.store.create_comparison(set_a_id, set_b_id, self.ttl),
        )
        .await?;

        self.cache
            .put(
                comparison.id,
                comparison.set_a_id,
                comparison.set_b_id,
                comparison.votes_a,
                comparison.votes_b,
                self.ttl,
            )
            .await;

        metrics::counter!("comparisons_created_total").increment(1);
        info!(
            event = "comparison_created",
            comparison_id = comparison.id,
            set_a_id,
            set_b_id,
            "Created comparison"
        );

        Ok(comparison)
    }

    async fn ensure_active(&self) -> Result<bool, VotingError> {
        let active = with_timeout(
            self.store_timeout,
            self.store.active_comparison_count(Utc::now()),
        )
        .await?;

        if active > 0 {
            return Ok(false);
        }

        self.create_comparison().await?;
        Ok(true)
    }
}
