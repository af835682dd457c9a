//! Migrate command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    // Connecting applies every pending migration
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    println!("Database is up to date: {}", config.general.database_path);
    println!(
        "  movies: {}  sets: {}  comparisons: {}  votes: {}",
        store.movie_count().await?,
        store.top4_set_count().await?,
        store.comparison_count().await?,
        store.vote_count().await?
    );

    Ok(())
}
