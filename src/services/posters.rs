use crate::clients::tmdb::TmdbClient;
use crate::db::Store;
use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PosterReport {
    pub checked: usize,
    pub updated: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Backfills poster URLs from TMDB.
pub struct PosterService {
    store: Store,
    tmdb: TmdbClient,
    pause: Duration,
}

impl PosterService {
    #[must_use]
    pub const fn new(store: Store, tmdb: TmdbClient, pause: Duration) -> Self {
        Self { store, tmdb, pause }
    }

    pub async fn refresh_missing(&self) -> Result<PosterReport> {
        let candidates = self.store.movies_needing_posters().await?;
        let mut report = PosterReport::default();

        info!(count = candidates.len(), "Fetching posters");

        for (idx, movie) in candidates.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.pause).await;
            }
            report.checked += 1;

            let hit = match self.tmdb.search_movie(&movie.title, movie.year).await {
                Ok(hit) => hit,
                Err(e) => {
                    warn!(movie_id = movie.id, title = %movie.title, error = %e, "TMDB lookup failed");
                    report.failed += 1;
                    continue;
                }
            };

            let Some(path) = hit.and_then(|h| h.poster_path) else {
                report.not_found += 1;
                continue;
            };

            let url = self.tmdb.poster_url(&path);
            self.store.update_poster(movie.id, &url).await?;
            report.updated += 1;
            info!(
                event = "poster_updated",
                movie_id = movie.id,
                title = %movie.title,
                "Updated poster"
            );
        }

        Ok(report)
    }
}
