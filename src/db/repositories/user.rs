use crate::constants::voting::{ANONYMOUS_EMAIL, ANONYMOUS_USERNAME};
use crate::entities::{prelude::*, users};
use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn id_by_username(&self, username: &str) -> Result<Option<i32>> {
        let id = Users::find()
            .select_only()
            .column(users::Column::Id)
            .filter(users::Column::Username.eq(username))
            .into_tuple()
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(id)
    }

    /// Safe to race: a concurrent creator makes the insert a no-op.
    pub async fn get_or_create_anonymous(&self) -> Result<i32> {
        if let Some(id) = self.id_by_username(ANONYMOUS_USERNAME).await? {
            return Ok(id);
        }

        let active_model = users::ActiveModel {
            username: Set(ANONYMOUS_USERNAME.to_string()),
            email: Set(Some(ANONYMOUS_EMAIL.to_string())),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        Users::insert(active_model)
            .on_conflict(
                OnConflict::column(users::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.id_by_username(ANONYMOUS_USERNAME)
            .await?
            .context("Anonymous user missing after insert")
    }
}
