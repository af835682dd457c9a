use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ComparisonCache, ComparisonService, LeaderboardService, SeaOrmComparisonService,
    SeaOrmLeaderboardService, SeaOrmVoteService, VoteService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub cache: Arc<ComparisonCache>,

    pub comparison_service: Arc<dyn ComparisonService>,

    pub vote_service: Arc<dyn VoteService>,

    pub leaderboard_service: Arc<dyn LeaderboardService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires every service around an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let cache = Arc::new(ComparisonCache::new());

        let comparison_service: Arc<dyn ComparisonService> = Arc::new(
            SeaOrmComparisonService::new(store.clone(), Arc::clone(&cache), &config.comparison),
        );

        let vote_service: Arc<dyn VoteService> = Arc::new(SeaOrmVoteService::new(
            store.clone(),
            Arc::clone(&cache),
            Arc::clone(&comparison_service),
            &config.comparison,
        ));

        let leaderboard_service: Arc<dyn LeaderboardService> = Arc::new(
            SeaOrmLeaderboardService::new(store.clone(), &config.comparison),
        );

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            cache,
            comparison_service,
            vote_service,
            leaderboard_service,
        }
    }
}
