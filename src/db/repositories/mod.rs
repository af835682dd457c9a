pub mod comparison;
pub mod leaderboard;
pub mod movie;
pub mod top4_set;
pub mod user;
pub mod vote;
