pub mod comparison_cache;
pub use comparison_cache::{CachedComparison, ComparisonCache};

pub mod error;
pub use error::VotingError;

pub mod comparison_service;
pub mod comparison_service_impl;
pub use comparison_service::ComparisonService;
pub use comparison_service_impl::SeaOrmComparisonService;

pub mod vote_service;
pub mod vote_service_impl;
pub use vote_service::{VoteService, Voter};
pub use vote_service_impl::SeaOrmVoteService;

pub mod leaderboard;
pub mod leaderboard_service;
pub mod leaderboard_service_impl;
pub use leaderboard_service::{LeaderboardService, clamp_limit};
pub use leaderboard_service_impl::SeaOrmLeaderboardService;

pub mod posters;
pub use posters::{PosterReport, PosterService};

pub mod seeding;
pub use seeding::SeedReport;

pub mod scheduler;
pub use scheduler::Scheduler;
