use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::movie::Movie;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRanking {
    pub rank: usize,
    pub movie: Movie,
    pub wins: i64,
    pub appearances: i64,
    pub win_rate: f64,
}

/// The two sets a comparison pitted against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPairing {
    pub comparison_id: i32,
    pub set_a_id: i32,
    pub set_b_id: i32,
}

/// Raw history the leaderboard is reduced from.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardSnapshot {
    pub pairings: Vec<ComparisonPairing>,

    /// set id -> movie ids
    pub set_members: HashMap<i32, Vec<i32>>,

    /// set id -> number of votes the set received, across all comparisons
    pub votes_by_set: HashMap<i32, i64>,

    pub movies: HashMap<i32, Movie>,
}
