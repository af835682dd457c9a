use crate::entities::{movies, prelude::*};
use crate::models::movie::{Movie, NewMovie};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

const TMDB_IMAGE_PREFIX: &str = "https://image.tmdb.org";

/// A movie whose poster is missing or untrustworthy.
#[derive(Debug, Clone)]
pub struct PosterCandidate {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub poster_url: Option<String>,
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: movies::Model) -> Movie {
        Movie {
            id: m.id,
            title: m.title,
            year: m.year,
            director: m.director.filter(|d| !d.is_empty()),
            poster: m.poster_url.filter(|p| !p.is_empty()),
            genres: m
                .genres
                .map(|s| serde_json::from_str(&s).unwrap_or_default())
                .unwrap_or_default(),
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = Movies::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Movie>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // Stay well below SQLite's bound-variable limit
        let mut found = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(500) {
            let rows = Movies::find()
                .filter(movies::Column::Id.is_in(chunk.to_vec()))
                .all(&self.conn)
                .await?;
            found.extend(rows.into_iter().map(Self::map_model));
        }

        Ok(found)
    }

    /// All movies, collapsing rows that share title, year and director
    /// (the lowest id wins).
    pub async fn list_distinct(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Title)
            .order_by_asc(movies::Column::Year)
            .order_by_asc(movies::Column::Director)
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        let mut seen = HashSet::new();
        Ok(rows
            .into_iter()
            .filter(|m| seen.insert((m.title.clone(), m.year, m.director.clone())))
            .map(Self::map_model)
            .collect())
    }

    pub async fn upsert(&self, movie: &NewMovie) -> Result<i32> {
        let genres = serde_json::to_string(&movie.genres)?;

        let existing = Movies::find()
            .filter(movies::Column::LetterboxdId.eq(movie.letterboxd_id.as_str()))
            .one(&self.conn)
            .await?;

        if let Some(existing) = existing {
            let id = existing.id;
            let mut active: movies::ActiveModel = existing.into();
            active.title = Set(movie.title.clone());
            active.year = Set(movie.year);
            active.director = Set(movie.director.clone());
            active.genres = Set(Some(genres));
            active.update(&self.conn).await?;
            debug!("Updated movie {} ({})", movie.title, id);
            return Ok(id);
        }

        let active_model = movies::ActiveModel {
            title: Set(movie.title.clone()),
            year: Set(movie.year),
            director: Set(movie.director.clone()),
            genres: Set(Some(genres)),
            letterboxd_id: Set(Some(movie.letterboxd_id.clone())),
            poster_url: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let res = Movies::insert(active_model).exec(&self.conn).await?;
        debug!("Inserted movie {} ({})", movie.title, res.last_insert_id);
        Ok(res.last_insert_id)
    }

    pub async fn needing_posters(&self) -> Result<Vec<PosterCandidate>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        let mut usage: HashMap<String, usize> = HashMap::new();
        for url in rows.iter().filter_map(|m| m.poster_url.as_deref()) {
            *usage.entry(url.to_string()).or_default() += 1;
        }

        Ok(rows
            .into_iter()
            .filter(|m| needs_poster(m.poster_url.as_deref(), &usage))
            .map(|m| PosterCandidate {
                id: m.id,
                title: m.title,
                year: m.year,
                poster_url: m.poster_url,
            })
            .collect())
    }

    pub async fn update_poster(&self, id: i32, poster_url: &str) -> Result<()> {
        Movies::update_many()
            .col_expr(
                movies::Column::PosterUrl,
                sea_orm::sea_query::Expr::value(poster_url),
            )
            .filter(movies::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Movies::find().count(&self.conn).await?)
    }
}

/// Missing, placeholder, non-TMDB and shared poster URLs all get refetched.
fn needs_poster(url: Option<&str>, usage: &HashMap<String, usize>) -> bool {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return true;
    };

    url.contains("placeholder")
        || url.contains("Z4Z4Z")
        || !url.starts_with(TMDB_IMAGE_PREFIX)
        || usage.get(url).copied().unwrap_or(0) > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_poster() {
        let good = "https://image.tmdb.org/t/p/w500/abc.jpg";
        let shared = "https://image.tmdb.org/t/p/w500/shared.jpg";
        let mut usage = HashMap::new();
        usage.insert(good.to_string(), 1);
        usage.insert(shared.to_string(), 2);

        assert!(needs_poster(None, &usage));
        assert!(needs_poster(Some(""), &usage));
        assert!(needs_poster(Some("https://example.com/placeholder.png"), &usage));
        assert!(needs_poster(Some("https://cdn.example.com/a.jpg"), &usage));
        assert!(needs_poster(Some(shared), &usage));
        assert!(!needs_poster(Some(good), &usage));
    }
}
