pub mod comparison;
pub mod leaderboard;
pub mod movie;
pub mod top4_set;
