use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_comparisons_expires_at")
                    .table(Comparisons::Table)
                    .col(Comparisons::ExpiresAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_votes_comparison_id")
                    .table(Votes::Table)
                    .col(Votes::ComparisonId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_votes_winner_set_id")
                    .table(Votes::Table)
                    .col(Votes::WinnerSetId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_votes_winner_set_id")
                    .table(Votes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_votes_comparison_id")
                    .table(Votes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_comparisons_expires_at")
                    .table(Comparisons::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Comparisons {
    Table,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    ComparisonId,
    WinnerSetId,
}
