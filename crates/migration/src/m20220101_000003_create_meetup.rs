//! Create `meetups` table with FKs to `users` and `files`.
//!
//! Deleting a user removes their meetups; a banner file still referenced by
//! a meetup cannot be deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meetups::Table)
                    .if_not_exists()
                    .col(pk_auto(Meetups::Id))
                    .col(string(Meetups::Name).not_null())
                    .col(text(Meetups::Description).not_null())
                    .col(string(Meetups::Location).not_null())
                    .col(timestamp_with_time_zone(Meetups::Date).not_null())
                    .col(integer(Meetups::UserId).not_null())
                    .col(integer(Meetups::BannerId).not_null())
                    .col(timestamp_with_time_zone(Meetups::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Meetups::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meetups_user")
                            .from(Meetups::Table, Meetups::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meetups_banner")
                            .from(Meetups::Table, Meetups::BannerId)
                            .to(Files::Table, Files::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Meetups::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Meetups { Table, Id, Name, Description, Location, Date, UserId, BannerId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Files { Table, Id }
