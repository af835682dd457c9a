use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "top4_sets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_letterboxd_id: Option<String>,

    /// JSON array of exactly four movie ids, in display order
    pub movie_ids: String,

    pub scraped_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
