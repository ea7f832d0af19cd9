use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Meetups: the list endpoint filters and orders on date
        manager
            .create_index(
                Index::create()
                    .name("idx_meetups_date")
                    .table(Meetups::Table)
                    .col(Meetups::Date)
                    .to_owned(),
            )
            .await?;

        // Meetups: ownership checks look up by user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_meetups_user")
                    .table(Meetups::Table)
                    .col(Meetups::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_meetups_date").table(Meetups::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_meetups_user").table(Meetups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Meetups { Table, Date, UserId }
