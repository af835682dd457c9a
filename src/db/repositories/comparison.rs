use crate::entities::{comparisons, prelude::*};
use crate::models::comparison::{Comparison, VoteSide};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::time::Duration;
use tracing::debug;

pub struct ComparisonRepository {
    conn: DatabaseConnection,
}

impl ComparisonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(crate) const fn map_model(m: comparisons::Model) -> Comparison {
        Comparison {
            id: m.id,
            set_a_id: m.set_a_id,
            set_b_id: m.set_b_id,
            votes_a: m.votes_a,
            votes_b: m.votes_b,
            created_at: m.created_at,
            expires_at: m.expires_at,
        }
    }

    /// One comparison with `expires_at > now`, picked by `ORDER BY RANDOM()`.
    pub async fn find_random_active(&self, now: DateTime<Utc>) -> Result<Option<Comparison>> {
        let row = Comparisons::find()
            .filter(comparisons::Column::ExpiresAt.gt(now))
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Comparison>> {
        let row = Comparisons::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn create(&self, set_a_id: i32, set_b_id: i32, ttl: Duration) -> Result<Comparison> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).context("Comparison TTL out of range")?;

        let active_model = comparisons::ActiveModel {
            set_a_id: Set(set_a_id),
            set_b_id: Set(set_b_id),
            votes_a: Set(0),
            votes_b: Set(0),
            created_at: Set(now),
            expires_at: Set(now + ttl),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        debug!(comparison_id = model.id, set_a_id, set_b_id, "Inserted comparison");
        Ok(Self::map_model(model))
    }

    pub async fn increment_vote(&self, comparison_id: i32, side: VoteSide) -> Result<(i32, i32)> {
        increment_vote_in(&self.conn, comparison_id, side).await
    }

    pub async fn set_expiry(&self, id: i32, expires_at: DateTime<Utc>) -> Result<()> {
        Comparisons::update_many()
            .col_expr(comparisons::Column::ExpiresAt, Expr::value(expires_at))
            .filter(comparisons::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Comparisons::find().count(&self.conn).await?)
    }

    pub async fn count_active(&self, now: DateTime<Utc>) -> Result<u64> {
        Ok(Comparisons::find()
            .filter(comparisons::Column::ExpiresAt.gt(now))
            .count(&self.conn)
            .await?)
    }
}

/// `SET votes_x = votes_x + 1` followed by a read of both counters, on
/// whatever connection or transaction the caller holds.
pub(crate) async fn increment_vote_in<C: ConnectionTrait>(
    db: &C,
    comparison_id: i32,
    side: VoteSide,
) -> Result<(i32, i32)> {
    let column = match side {
        VoteSide::A => comparisons::Column::VotesA,
        VoteSide::B => comparisons::Column::VotesB,
    };

    let result = Comparisons::update_many()
        .col_expr(column, Expr::col(column).add(1))
        .filter(comparisons::Column::Id.eq(comparison_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        anyhow::bail!("Comparison {comparison_id} not found");
    }

    let counters: Option<(i32, i32)> = Comparisons::find_by_id(comparison_id)
        .select_only()
        .column(comparisons::Column::VotesA)
        .column(comparisons::Column::VotesB)
        .into_tuple()
        .one(db)
        .await?;

    counters.with_context(|| format!("Comparison {comparison_id} vanished after increment"))
}
