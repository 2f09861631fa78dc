//! Trainer repository backed by SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Unchanged},
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::entities::{
    member,
    trainer::{self, ActiveModel, Entity as TrainerEntity},
};
use common::{AppError, AppResult};
use domain::{CreateTrainer, Trainer, TrainerDetailDto};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trainer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Trainer>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Trainer>>;

    /// Find a trainer other than `exclude_id` using an email address
    async fn find_by_email_excluding(
        &self,
        email: &str,
        exclude_id: i32,
    ) -> AppResult<Option<Trainer>>;

    async fn list(&self) -> AppResult<Vec<Trainer>>;

    async fn insert(&self, trainer: CreateTrainer) -> AppResult<Trainer>;

    /// Overwrite an existing trainer; the hire time is kept
    async fn update(&self, trainer: Trainer) -> AppResult<Trainer>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Trainers with the number of members assigned to each
    async fn list_details(&self) -> AppResult<Vec<TrainerDetailDto>>;
}

#[derive(Debug, FromQueryResult)]
struct TrainerDetailRow {
    trainer_id: i32,
    first_name: String,
    last_name: String,
    email: String,
    specialty: String,
    member_count: i64,
}

impl From<TrainerDetailRow> for TrainerDetailDto {
    fn from(row: TrainerDetailRow) -> Self {
        TrainerDetailDto {
            trainer_id: row.trainer_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            specialty: row.specialty,
            member_count: row.member_count,
        }
    }
}

/// Concrete implementation of TrainerRepository
pub struct TrainerStore {
    db: DatabaseConnection,
}

impl TrainerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrainerRepository for TrainerStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Trainer>> {
        let result = TrainerEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Trainer::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Trainer>> {
        let result = TrainerEntity::find()
            .filter(trainer::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(Trainer::from))
    }

    async fn find_by_email_excluding(
        &self,
        email: &str,
        exclude_id: i32,
    ) -> AppResult<Option<Trainer>> {
        let result = TrainerEntity::find()
            .filter(trainer::Column::Email.eq(email))
            .filter(trainer::Column::Id.ne(exclude_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Trainer::from))
    }

    async fn list(&self) -> AppResult<Vec<Trainer>> {
        let models = TrainerEntity::find()
            .order_by_asc(trainer::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Trainer::from).collect())
    }

    async fn insert(&self, trainer: CreateTrainer) -> AppResult<Trainer> {
        let active_model = ActiveModel {
            id: NotSet,
            first_name: Set(trainer.first_name),
            last_name: Set(trainer.last_name),
            email: Set(trainer.email),
            phone_number: Set(trainer.phone_number),
            specialty: Set(trainer.specialty),
            hired_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Trainer::from(model))
    }

    async fn update(&self, trainer: Trainer) -> AppResult<Trainer> {
        let active_model = ActiveModel {
            id: Unchanged(trainer.id),
            first_name: Set(trainer.first_name),
            last_name: Set(trainer.last_name),
            email: Set(trainer.email),
            phone_number: Set(trainer.phone_number),
            specialty: Set(trainer.specialty),
            hired_at: NotSet,
        };

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(Trainer::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        TrainerEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn list_details(&self) -> AppResult<Vec<TrainerDetailDto>> {
        let rows = TrainerEntity::find()
            .select_only()
            .column_as(trainer::Column::Id, "trainer_id")
            .column(trainer::Column::FirstName)
            .column(trainer::Column::LastName)
            .column(trainer::Column::Email)
            .column(trainer::Column::Specialty)
            .column_as(member::Column::Id.count(), "member_count")
            .join(JoinType::LeftJoin, trainer::Relation::Member.def())
            .group_by(trainer::Column::Id)
            .group_by(trainer::Column::FirstName)
            .group_by(trainer::Column::LastName)
            .group_by(trainer::Column::Email)
            .group_by(trainer::Column::Specialty)
            .order_by_asc(trainer::Column::Id)
            .into_model::<TrainerDetailRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(TrainerDetailDto::from).collect())
    }
}
