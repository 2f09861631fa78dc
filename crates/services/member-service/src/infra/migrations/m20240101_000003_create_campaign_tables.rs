//! Migration: Create campaigns and member_campaigns tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_members_table::Members;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Campaigns::DiscountRate).double().not_null())
                    .col(ColumnDef::new(Campaigns::StartsOn).date().not_null())
                    .col(ColumnDef::new(Campaigns::EndsOn).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MemberCampaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MemberCampaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MemberCampaigns::MemberId).integer().not_null())
                    .col(ColumnDef::new(MemberCampaigns::CampaignId).integer().not_null())
                    .col(
                        ColumnDef::new(MemberCampaigns::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_campaigns_member_id")
                            .from(MemberCampaigns::Table, MemberCampaigns::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_campaigns_campaign_id")
                            .from(MemberCampaigns::Table, MemberCampaigns::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_campaigns_member_id")
                    .table(MemberCampaigns::Table)
                    .col(MemberCampaigns::MemberId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberCampaigns::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
    Name,
    DiscountRate,
    StartsOn,
    EndsOn,
}

#[derive(Iden)]
enum MemberCampaigns {
    Table,
    Id,
    MemberId,
    CampaignId,
    JoinedAt,
}
