//! Migration: Create trainers table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trainers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trainers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trainers::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Trainers::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Trainers::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Trainers::PhoneNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Trainers::Specialty).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Trainers::HiredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Email is the trainer's natural key
        manager
            .create_index(
                Index::create()
                    .name("idx_trainers_email")
                    .table(Trainers::Table)
                    .col(Trainers::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trainers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Trainers {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Specialty,
    HiredAt,
}
