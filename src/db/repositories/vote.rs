use crate::entities::{prelude::*, votes};
use crate::models::comparison::VoteSide;
use anyhow::Result;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use super::comparison::increment_vote_in;

/// Outcome of a committed vote: the new row and the counters right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedVote {
    pub vote_id: i32,
    pub votes_a: i32,
    pub votes_b: i32,
}

pub struct VoteRepository {
    conn: DatabaseConnection,
}

impl VoteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, comparison_id: i32, user_id: i32, winner_set_id: i32) -> Result<i32> {
        insert_vote_in(&self.conn, comparison_id, user_id, winner_set_id).await
    }

    /// The vote row and the counter bump commit together or not at all.
    /// Both statements are writes, so the transaction takes the write lock
    /// up front instead of upgrading from a read snapshot.
    pub async fn record(
        &self,
        comparison_id: i32,
        user_id: i32,
        winner_set_id: i32,
        side: VoteSide,
    ) -> Result<RecordedVote> {
        let txn = self.conn.begin().await?;

        let vote_id = insert_vote_in(&txn, comparison_id, user_id, winner_set_id).await?;
        let (votes_a, votes_b) = increment_vote_in(&txn, comparison_id, side).await?;

        txn.commit().await?;

        Ok(RecordedVote {
            vote_id,
            votes_a,
            votes_b,
        })
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Votes::find().count(&self.conn).await?)
    }
}

async fn insert_vote_in<C: ConnectionTrait>(
    db: &C,
    comparison_id: i32,
    user_id: i32,
    winner_set_id: i32,
) -> Result<i32> {
    let active_model = votes::ActiveModel {
        comparison_id: Set(comparison_id),
        user_id: Set(user_id),
        winner_set_id: Set(winner_set_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let res = Votes::insert(active_model).exec(db).await?;
    Ok(res.last_insert_id)
}
