//! Member repository backed by SeaORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Unchanged},
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::entities::{
    campaign,
    member::{self, ActiveModel, Entity as MemberEntity},
    member_campaign::{self, Entity as MemberCampaignEntity},
    trainer,
};
use common::{AppError, AppResult};
use domain::{CreateMember, Member, MemberCampaignDetailDto, MemberDetailDto};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Member>>;

    /// Find the member holding an identity number
    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<Member>>;

    /// Find a member other than `exclude_id` holding an identity number
    async fn find_by_identity_number_excluding(
        &self,
        identity_number: &str,
        exclude_id: i32,
    ) -> AppResult<Option<Member>>;

    /// List all members ordered by ID
    async fn list(&self) -> AppResult<Vec<Member>>;

    /// Insert a new member, returning it with its assigned ID
    async fn insert(&self, member: CreateMember) -> AppResult<Member>;

    /// Overwrite an existing member; the registration time is kept
    async fn update(&self, member: Member) -> AppResult<Member>;

    /// Remove a member by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Members joined with their trainer's name
    async fn list_details(&self) -> AppResult<Vec<MemberDetailDto>>;

    /// Detail rows for a single member
    async fn list_details_by_id(&self, id: i32) -> AppResult<Vec<MemberDetailDto>>;

    /// Campaign enrolments of every member
    async fn list_campaign_details(&self) -> AppResult<Vec<MemberCampaignDetailDto>>;

    /// Campaign enrolments of one member
    async fn list_campaign_details_by_member(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<MemberCampaignDetailDto>>;
}

#[derive(Debug, FromQueryResult)]
struct MemberDetailRow {
    member_id: i32,
    identity_number: String,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    trainer_first_name: Option<String>,
    trainer_last_name: Option<String>,
}

impl From<MemberDetailRow> for MemberDetailDto {
    fn from(row: MemberDetailRow) -> Self {
        MemberDetailDto {
            member_id: row.member_id,
            identity_number: row.identity_number,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            trainer_first_name: row.trainer_first_name,
            trainer_last_name: row.trainer_last_name,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct MemberCampaignRow {
    member_id: i32,
    first_name: String,
    last_name: String,
    campaign_id: i32,
    campaign_name: String,
    discount_rate: f64,
    joined_at: DateTime<Utc>,
}

impl From<MemberCampaignRow> for MemberCampaignDetailDto {
    fn from(row: MemberCampaignRow) -> Self {
        MemberCampaignDetailDto {
            member_id: row.member_id,
            first_name: row.first_name,
            last_name: row.last_name,
            campaign_id: row.campaign_id,
            campaign_name: row.campaign_name,
            discount_rate: row.discount_rate,
            joined_at: row.joined_at,
        }
    }
}

/// Concrete implementation of MemberRepository
pub struct MemberStore {
    db: DatabaseConnection,
}

impl MemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn details_query() -> Select<MemberEntity> {
        MemberEntity::find()
            .select_only()
            .column_as(member::Column::Id, "member_id")
            .column(member::Column::IdentityNumber)
            .column(member::Column::FirstName)
            .column(member::Column::LastName)
            .column(member::Column::Email)
            .column(member::Column::PhoneNumber)
            .column_as(trainer::Column::FirstName, "trainer_first_name")
            .column_as(trainer::Column::LastName, "trainer_last_name")
            .join(JoinType::LeftJoin, member::Relation::Trainer.def())
            .order_by_asc(member::Column::Id)
    }

    fn campaign_details_query() -> Select<MemberCampaignEntity> {
        MemberCampaignEntity::find()
            .select_only()
            .column(member_campaign::Column::MemberId)
            .column(member::Column::FirstName)
            .column(member::Column::LastName)
            .column(member_campaign::Column::CampaignId)
            .column_as(campaign::Column::Name, "campaign_name")
            .column(campaign::Column::DiscountRate)
            .column(member_campaign::Column::JoinedAt)
            .join(JoinType::InnerJoin, member_campaign::Relation::Member.def())
            .join(JoinType::InnerJoin, member_campaign::Relation::Campaign.def())
            .order_by_asc(member_campaign::Column::Id)
    }
}

#[async_trait]
impl MemberRepository for MemberStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Member>> {
        let result = MemberEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Member::from))
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<Member>> {
        let result = MemberEntity::find()
            .filter(member::Column::IdentityNumber.eq(identity_number))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Member::from))
    }

    async fn find_by_identity_number_excluding(
        &self,
        identity_number: &str,
        exclude_id: i32,
    ) -> AppResult<Option<Member>> {
        let result = MemberEntity::find()
            .filter(member::Column::IdentityNumber.eq(identity_number))
            .filter(member::Column::Id.ne(exclude_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Member::from))
    }

    async fn list(&self) -> AppResult<Vec<Member>> {
        let models = MemberEntity::find()
            .order_by_asc(member::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Member::from).collect())
    }

    async fn insert(&self, member: CreateMember) -> AppResult<Member> {
        let active_model = ActiveModel {
            id: NotSet,
            identity_number: Set(member.identity_number),
            first_name: Set(member.first_name),
            last_name: Set(member.last_name),
            email: Set(member.email),
            phone_number: Set(member.phone_number),
            birth_date: Set(member.birth_date),
            trainer_id: Set(member.trainer_id),
            registered_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Member::from(model))
    }

    async fn update(&self, member: Member) -> AppResult<Member> {
        let active_model = ActiveModel {
            id: Unchanged(member.id),
            identity_number: Set(member.identity_number),
            first_name: Set(member.first_name),
            last_name: Set(member.last_name),
            email: Set(member.email),
            phone_number: Set(member.phone_number),
            birth_date: Set(member.birth_date),
            trainer_id: Set(member.trainer_id),
            registered_at: NotSet,
        };

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(Member::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        MemberEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn list_details(&self) -> AppResult<Vec<MemberDetailDto>> {
        let rows = Self::details_query()
            .into_model::<MemberDetailRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(MemberDetailDto::from).collect())
    }

    async fn list_details_by_id(&self, id: i32) -> AppResult<Vec<MemberDetailDto>> {
        let rows = Self::details_query()
            .filter(member::Column::Id.eq(id))
            .into_model::<MemberDetailRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(MemberDetailDto::from).collect())
    }

    async fn list_campaign_details(&self) -> AppResult<Vec<MemberCampaignDetailDto>> {
        let rows = Self::campaign_details_query()
            .into_model::<MemberCampaignRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(MemberCampaignDetailDto::from).collect())
    }

    async fn list_campaign_details_by_member(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<MemberCampaignDetailDto>> {
        let rows = Self::campaign_details_query()
            .filter(member_campaign::Column::MemberId.eq(member_id))
            .into_model::<MemberCampaignRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(MemberCampaignDetailDto::from).collect())
    }
}
