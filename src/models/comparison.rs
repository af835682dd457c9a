use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::top4_set::Top4SetView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteSide {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub id: i32,
    pub set_a_id: i32,
    pub set_b_id: i32,
    pub votes_a: i32,
    pub votes_b: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Comparison {
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Which side a set id stands on, if it belongs to this comparison at all.
    #[must_use]
    pub const fn side_of(&self, set_id: i32) -> Option<VoteSide> {
        if set_id == self.set_a_id {
            Some(VoteSide::A)
        } else if set_id == self.set_b_id {
            Some(VoteSide::B)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn total_votes(&self) -> i64 {
        self.votes_a as i64 + self.votes_b as i64
    }
}

/// What a voter is shown: both sets resolved plus the current tallies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonView {
    pub id: i32,
    pub set_a: Top4SetView,
    pub set_b: Top4SetView,
    pub votes_a: i32,
    pub votes_b: i32,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub vote_id: i32,
    pub comparison_id: i32,
    pub winner_set_id: i32,
    pub votes_a: i32,
    pub votes_b: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn comparison(expires_in: Duration) -> Comparison {
        let now = Utc::now();
        Comparison {
            id: 1,
            set_a_id: 10,
            set_b_id: 20,
            votes_a: 2,
            votes_b: 3,
            created_at: now,
            expires_at: now + expires_in,
        }
    }

    #[test]
    fn side_of_matches_only_own_sets() {
        let c = comparison(Duration::hours(1));
        assert_eq!(c.side_of(10), Some(VoteSide::A));
        assert_eq!(c.side_of(20), Some(VoteSide::B));
        assert_eq!(c.side_of(30), None);
    }

    #[test]
    fn is_active_respects_expiry() {
        let now = Utc::now();
        assert!(comparison(Duration::hours(1)).is_active(now));
        assert!(!comparison(Duration::seconds(-1)).is_active(now));
    }

    #[test]
    fn total_votes_sums_both_sides() {
        assert_eq!(comparison(Duration::hours(1)).total_votes(), 5);
    }
}
