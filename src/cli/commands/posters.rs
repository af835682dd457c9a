//! Fetch-posters command handler

use anyhow::Context;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::constants::tmdb::REQUEST_PAUSE;
use crate::db::Store;
use crate::services::PosterService;

pub async fn cmd_fetch_posters(config: &Config) -> anyhow::Result<()> {
    let api_key = config
        .tmdb
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .context("TMDB API key missing: set tmdb.api_key or TMDB_API_KEY")?;

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let tmdb = TmdbClient::new(&config.tmdb, api_key)?;

    let report = PosterService::new(store, tmdb, REQUEST_PAUSE)
        .refresh_missing()
        .await?;

    println!("Checked {} movies", report.checked);
    println!("  ✓ {} posters updated", report.updated);
    if report.not_found > 0 {
        println!("  ? {} not found on TMDB", report.not_found);
    }
    if report.failed > 0 {
        println!("  ✗ {} lookups failed", report.failed);
    }

    Ok(())
}
