use crate::entities::{comparisons, prelude::*, votes};
use crate::models::leaderboard::{ComparisonPairing, LeaderboardSnapshot};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect};
use std::collections::{BTreeSet, HashMap};

use super::movie::MovieRepository;
use super::top4_set::Top4SetRepository;

/// Full scans of the vote history; vote volume is modest enough that the
/// ranking is recomputed from scratch on each request.
pub struct LeaderboardRepository {
    conn: DatabaseConnection,
}

impl LeaderboardRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn snapshot(&self) -> Result<LeaderboardSnapshot> {
        let pairings: Vec<(i32, i32, i32)> = Comparisons::find()
            .select_only()
            .column(comparisons::Column::Id)
            .column(comparisons::Column::SetAId)
            .column(comparisons::Column::SetBId)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let votes_by_set: Vec<(i32, i64)> = Votes::find()
            .select_only()
            .column(votes::Column::WinnerSetId)
            .column_as(Expr::col(votes::Column::Id).count(), "vote_count")
            .group_by(votes::Column::WinnerSetId)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let sets = Top4SetRepository::new(self.conn.clone()).list_all().await?;
        let movie_ids: Vec<i32> = sets
            .iter()
            .flat_map(|s| s.movie_ids.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movies = MovieRepository::new(self.conn.clone())
            .get_by_ids(&movie_ids)
            .await?;

        Ok(LeaderboardSnapshot {
            pairings: pairings
                .into_iter()
                .map(|(comparison_id, set_a_id, set_b_id)| ComparisonPairing {
                    comparison_id,
                    set_a_id,
                    set_b_id,
                })
                .collect(),
            set_members: sets.into_iter().map(|s| (s.id, s.movie_ids)).collect(),
            votes_by_set: votes_by_set.into_iter().collect::<HashMap<_, _>>(),
            movies: movies.into_iter().map(|m| (m.id, m)).collect(),
        })
    }
}
