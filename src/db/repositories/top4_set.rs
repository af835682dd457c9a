use crate::entities::{prelude::*, top4_sets};
use crate::models::top4_set::Top4Set;
use anyhow::Result;
use rand::seq::IndexedRandom;
use sea_orm::{
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use tracing::warn;

pub struct Top4SetRepository {
    conn: DatabaseConnection,
}

impl Top4SetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: top4_sets::Model) -> Top4Set {
        let movie_ids = serde_json::from_str(&m.movie_ids).unwrap_or_else(|e| {
            warn!(set_id = m.id, error = %e, "Unreadable movie id list on top-4 set");
            Vec::new()
        });

        Top4Set {
            id: m.id,
            user_letterboxd_id: m.user_letterboxd_id,
            movie_ids,
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Top4Set>> {
        let row = Top4Sets::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Top4Set>> {
        let rows = Top4Sets::find()
            .order_by_asc(top4_sets::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn add(&self, user_letterboxd_id: Option<&str>, movie_ids: &[i32]) -> Result<i32> {
        let now = chrono::Utc::now();
        let active_model = top4_sets::ActiveModel {
            user_letterboxd_id: Set(user_letterboxd_id.map(ToString::to_string)),
            movie_ids: Set(serde_json::to_string(movie_ids)?),
            scraped_at: Set(Some(now)),
            created_at: Set(now),
            ..Default::default()
        };

        let res = Top4Sets::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    /// Two different set ids drawn uniformly at random, or `None` when fewer
    /// than two sets exist.
    pub async fn random_distinct_pair(&self) -> Result<Option<(i32, i32)>> {
        let ids: Vec<i32> = Top4Sets::find()
            .select_only()
            .column(top4_sets::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(pick_pair(&ids))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Top4Sets::find().count(&self.conn).await?)
    }
}

fn pick_pair(ids: &[i32]) -> Option<(i32, i32)> {
    let mut rng = rand::rng();
    let mut picked = ids.choose_multiple(&mut rng, 2).copied();
    match (picked.next(), picked.next()) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_pair_needs_two_ids() {
        assert_eq!(pick_pair(&[]), None);
        assert_eq!(pick_pair(&[1]), None);
    }

    #[test]
    fn pick_pair_is_always_distinct() {
        let ids = [1, 2, 3];
        for _ in 0..100 {
            let (a, b) = pick_pair(&ids).unwrap();
            assert_ne!(a, b);
            assert!(ids.contains(&a) && ids.contains(&b));
        }
    }
}
