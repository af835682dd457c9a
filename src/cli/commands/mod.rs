mod leaderboard;
mod migrate;
mod posters;
mod seed;

pub use leaderboard::cmd_leaderboard;
pub use migrate::cmd_migrate;
pub use posters::cmd_fetch_posters;
pub use seed::cmd_seed;
