use crate::models::comparison::{Comparison, VoteSide};
use crate::models::leaderboard::LeaderboardSnapshot;
use crate::models::movie::{Movie, NewMovie};
use crate::models::top4_set::Top4Set;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::movie::PosterCandidate;
pub use repositories::vote::RecordedVote;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn set_repo(&self) -> repositories::top4_set::Top4SetRepository {
        repositories::top4_set::Top4SetRepository::new(self.conn.clone())
    }

    fn comparison_repo(&self) -> repositories::comparison::ComparisonRepository {
        repositories::comparison::ComparisonRepository::new(self.conn.clone())
    }

    fn vote_repo(&self) -> repositories::vote::VoteRepository {
        repositories::vote::VoteRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn leaderboard_repo(&self) -> repositories::leaderboard::LeaderboardRepository {
        repositories::leaderboard::LeaderboardRepository::new(self.conn.clone())
    }

    // Movies

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn get_movies_by_ids(&self, ids: &[i32]) -> Result<Vec<Movie>> {
        self.movie_repo().get_by_ids(ids).await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list_distinct().await
    }

    pub async fn upsert_movie(&self, movie: &NewMovie) -> Result<i32> {
        self.movie_repo().upsert(movie).await
    }

    pub async fn movies_needing_posters(&self) -> Result<Vec<PosterCandidate>> {
        self.movie_repo().needing_posters().await
    }

    pub async fn update_poster(&self, id: i32, poster_url: &str) -> Result<()> {
        self.movie_repo().update_poster(id, poster_url).await
    }

    pub async fn movie_count(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    // Top-4 sets

    pub async fn get_top4_set(&self, id: i32) -> Result<Option<Top4Set>> {
        self.set_repo().get(id).await
    }

    pub async fn list_top4_sets(&self) -> Result<Vec<Top4Set>> {
        self.set_repo().list_all().await
    }

    pub async fn add_top4_set(
        &self,
        user_letterboxd_id: Option<&str>,
        movie_ids: &[i32],
    ) -> Result<i32> {
        self.set_repo().add(user_letterboxd_id, movie_ids).await
    }

    pub async fn random_distinct_set_pair(&self) -> Result<Option<(i32, i32)>> {
        self.set_repo().random_distinct_pair().await
    }

    pub async fn top4_set_count(&self) -> Result<u64> {
        self.set_repo().count().await
    }

    // Comparisons

    pub async fn find_active_comparison(&self, now: DateTime<Utc>) -> Result<Option<Comparison>> {
        self.comparison_repo().find_random_active(now).await
    }

    pub async fn get_comparison(&self, id: i32) -> Result<Option<Comparison>> {
        self.comparison_repo().get(id).await
    }

    pub async fn create_comparison(
        &self,
        set_a_id: i32,
        set_b_id: i32,
        ttl: Duration,
    ) -> Result<Comparison> {
        self.comparison_repo()
            .create(set_a_id, set_b_id, ttl)
            .await
    }

    pub async fn increment_comparison_vote(
        &self,
        comparison_id: i32,
        side: VoteSide,
    ) -> Result<(i32, i32)> {
        self.comparison_repo()
            .increment_vote(comparison_id, side)
            .await
    }

    pub async fn set_comparison_expiry(&self, id: i32, expires_at: DateTime<Utc>) -> Result<()> {
        self.comparison_repo().set_expiry(id, expires_at).await
    }

    pub async fn comparison_count(&self) -> Result<u64> {
        self.comparison_repo().count().await
    }

    pub async fn active_comparison_count(&self, now: DateTime<Utc>) -> Result<u64> {
        self.comparison_repo().count_active(now).await
    }

    // Votes

    pub async fn insert_vote(
        &self,
        comparison_id: i32,
        user_id: i32,
        winner_set_id: i32,
    ) -> Result<i32> {
        self.vote_repo()
            .insert(comparison_id, user_id, winner_set_id)
            .await
    }

    /// Inserts the vote and bumps the matching counter in one transaction.
    pub async fn record_vote(
        &self,
        comparison_id: i32,
        user_id: i32,
        winner_set_id: i32,
        side: VoteSide,
    ) -> Result<RecordedVote> {
        self.vote_repo()
            .record(comparison_id, user_id, winner_set_id, side)
            .await
    }

    pub async fn vote_count(&self) -> Result<u64> {
        self.vote_repo().count().await
    }

    // Users

    pub async fn get_or_create_anonymous_user(&self) -> Result<i32> {
        self.user_repo().get_or_create_anonymous().await
    }

    // Leaderboard

    pub async fn leaderboard_snapshot(&self) -> Result<LeaderboardSnapshot> {
        self.leaderboard_repo().snapshot().await
    }
}
