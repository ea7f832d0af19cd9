//! Create `files` table for uploaded banner assets.
//!
//! Rows are written by the upload collaborator; `path` is the storage
//! filename and must be unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(pk_auto(Files::Id))
                    .col(string(Files::Name).not_null())
                    .col(string(Files::Path).unique_key().not_null())
                    .col(timestamp_with_time_zone(Files::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Files::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Files::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Files { Table, Id, Name, Path, CreatedAt, UpdatedAt }
