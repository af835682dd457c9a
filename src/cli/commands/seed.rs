//! Seed command handler

use crate::config::Config;
use crate::services::seeding;
use crate::state::SharedState;

pub async fn cmd_seed(config: &Config, sets: usize, comparisons: usize) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    println!("Seeding catalogue...");
    let report = seeding::seed(
        &state.store,
        state.comparison_service.as_ref(),
        sets,
        comparisons,
    )
    .await?;

    println!("  ✓ {} movies", report.movies);
    println!("  ✓ {} top-4 sets", report.sets);
    println!("  ✓ {} comparisons", report.comparisons);
    println!();
    println!("Start voting with: moviemash serve");

    Ok(())
}
