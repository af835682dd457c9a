use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comparisons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub set_a_id: i32,

    pub set_b_id: i32,

    pub votes_a: i32,

    pub votes_b: i32,

    pub created_at: DateTimeUtc,

    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::top4_sets::Entity",
        from = "Column::SetAId",
        to = "super::top4_sets::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SetA,

    #[sea_orm(
        belongs_to = "super::top4_sets::Entity",
        from = "Column::SetBId",
        to = "super::top4_sets::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SetB,

    #[sea_orm(has_many = "super::votes::Entity")]
    Votes,
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
