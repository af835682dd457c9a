use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tracing::{error, info};

use crate::config::ComparisonConfig;
use crate::services::comparison_cache::ComparisonCache;
use crate::services::comparison_service::ComparisonService;
use crate::services::error::VotingError;

pub struct Scheduler {
    cache: Arc<ComparisonCache>,
    comparisons: Arc<dyn ComparisonService>,
    config: ComparisonConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    pub fn new(
        cache: Arc<ComparisonCache>,
        comparisons: Arc<dyn ComparisonService>,
        config: ComparisonConfig,
    ) -> Self {
        Self {
            cache,
            comparisons,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        *self.running.write().await = true;

        let period = self.config.sweep_interval().max(Duration::from_secs(1));
        info!(
            "Scheduler running: cache sweep every {}s, keep warm: {}",
            period.as_secs(),
            self.config.keep_warm
        );

        let mut sweep_interval = interval(period);

        loop {
            sweep_interval.tick().await;
            if !*self.running.read().await {
                break;
            }

            let start = std::time::Instant::now();
            self.run_once().await;
            info!(
                event = "job_finished",
                job_name = "comparison_maintenance",
                duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "Comparison maintenance finished"
            );
        }

        Ok(())
    }

    /// One maintenance pass: sweep the cache, then top up comparisons.
    pub async fn run_once(&self) {
        let removed = self.cache.sweep().await;
        if removed > 0 {
            info!(event = "cache_swept", removed, "Evicted expired comparisons");
        }

        if !self.config.keep_warm {
            return;
        }

        match self.comparisons.ensure_active().await {
            Ok(true) => info!(event = "comparison_warmed", "No active comparison, created one"),
            Ok(false) => {}
            // Nothing to pair yet on a fresh install
            Err(VotingError::InsufficientData) => {}
            Err(e) => {
                error!(event = "job_failed", job_name = "keep_warm", error = %e, "Keep-warm failed");
            }
        }
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }
}
