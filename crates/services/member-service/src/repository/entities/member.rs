//! Member database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Member;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub identity_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: Option<Date>,
    pub trainer_id: Option<i32>,
    pub registered_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trainer::Entity",
        from = "Column::TrainerId",
        to = "super::trainer::Column::Id",
        on_delete = "SetNull"
    )]
    Trainer,
    #[sea_orm(has_many = "super::member_campaign::Entity")]
    MemberCampaign,
}

impl Related<super::trainer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trainer.def()
    }
}

impl Related<super::member_campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberCampaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Member {
            id: model.id,
            identity_number: model.identity_number,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            birth_date: model.birth_date,
            trainer_id: model.trainer_id,
            registered_at: model.registered_at,
        }
    }
}
