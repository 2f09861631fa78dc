//! Discount campaign entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Fraction between 0 and 1
    #[sea_orm(column_type = "Double")]
    pub discount_rate: f64,
    pub starts_on: Date,
    pub ends_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member_campaign::Entity")]
    MemberCampaign,
}

impl Related<super::member_campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberCampaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
