//! Leaderboard command handler

use crate::config::Config;
use crate::services::clamp_limit;
use crate::state::SharedState;

pub async fn cmd_leaderboard(config: &Config, limit: usize) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let rankings = state
        .leaderboard_service
        .rank_items(clamp_limit(Some(limit)))
        .await?;

    if rankings.is_empty() {
        println!("No votes yet.");
        println!();
        println!("Seed some data with: moviemash seed");
        return Ok(());
    }

    println!("{:>4}  {:<40} {:>6} {:>6} {:>8}", "#", "Movie", "Wins", "Seen", "Rate");
    println!("{:-<70}", "");

    for row in rankings {
        let title = format!("{} ({})", row.movie.title, row.movie.year);
        println!(
            "{:>4}  {:<40} {:>6} {:>6} {:>8.2}",
            row.rank, title, row.wins, row.appearances, row.win_rate
        );
    }

    Ok(())
}
