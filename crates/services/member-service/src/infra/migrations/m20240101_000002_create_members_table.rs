//! Migration: Create members table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_trainers_table::Trainers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::IdentityNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Members::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Members::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Members::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Members::PhoneNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Members::BirthDate).date().null())
                    .col(ColumnDef::new(Members::TrainerId).integer().null())
                    .col(
                        ColumnDef::new(Members::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_trainer_id")
                            .from(Members::Table, Members::TrainerId)
                            .to(Trainers::Table, Trainers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Identity number is the member's natural key
        manager
            .create_index(
                Index::create()
                    .name("idx_members_identity_number")
                    .table(Members::Table)
                    .col(Members::IdentityNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_members_trainer_id")
                    .table(Members::Table)
                    .col(Members::TrainerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Members {
    Table,
    Id,
    IdentityNumber,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    BirthDate,
    TrainerId,
    RegisteredAt,
}
