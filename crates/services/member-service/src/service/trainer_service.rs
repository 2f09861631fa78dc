//! Trainer service - trainer business logic.

use async_trait::async_trait;
use futures::FutureExt;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    BusinessRules, CreateTrainer, Locale, Messages, Outcome, ServiceResult, Trainer,
    TrainerDetailDto,
};

use crate::repository::TrainerRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trainer service trait, implemented by the manager and its aspects.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TrainerService: Send + Sync {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Trainer>>>;

    /// List trainers with their member counts
    async fn get_trainer_details(&self) -> AppResult<ServiceResult<Vec<TrainerDetailDto>>>;

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Trainer>>>;

    /// Hire a trainer with a unique email address
    async fn add(&self, trainer: CreateTrainer) -> AppResult<ServiceResult<Trainer>>;

    async fn update(&self, trainer: Trainer) -> AppResult<ServiceResult<Trainer>>;

    async fn delete(&self, id: i32) -> AppResult<Outcome>;
}

/// Concrete implementation of TrainerService using repository.
pub struct TrainerManager {
    repo: Arc<dyn TrainerRepository>,
    messages: &'static Messages,
}

impl TrainerManager {
    pub fn new(repo: Arc<dyn TrainerRepository>, locale: Locale) -> Self {
        Self {
            repo,
            messages: locale.messages(),
        }
    }

    async fn check_trainer_exists(&self, id: i32) -> AppResult<Outcome> {
        let trainer = self.repo.find_by_id(id).await?;
        Ok(BusinessRules::require_found(
            trainer.as_ref(),
            self.messages.trainer_not_found,
        ))
    }

    async fn check_email_unique(&self, email: &str) -> AppResult<Outcome> {
        let holder = self.repo.find_by_email(email).await?;
        Ok(BusinessRules::require_absent(
            holder.as_ref(),
            self.messages.trainer_email_already_exists,
        ))
    }

    async fn check_email_unique_for_update(&self, email: &str, id: i32) -> AppResult<Outcome> {
        let holder = self.repo.find_by_email_excluding(email, id).await?;
        Ok(BusinessRules::require_absent(
            holder.as_ref(),
            self.messages.trainer_email_already_exists,
        ))
    }
}

#[async_trait]
impl TrainerService for TrainerManager {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Trainer>>> {
        Ok(ServiceResult::success(self.repo.list().await?))
    }

    async fn get_trainer_details(&self) -> AppResult<ServiceResult<Vec<TrainerDetailDto>>> {
        Ok(ServiceResult::success(self.repo.list_details().await?))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Trainer>>> {
        Ok(ServiceResult::success_with(
            self.repo.find_by_id(id).await?,
            self.messages.success,
        ))
    }

    async fn add(&self, trainer: CreateTrainer) -> AppResult<ServiceResult<Trainer>> {
        let failure = BusinessRules::run_lazy::<AppError>(vec![self
            .check_email_unique(&trainer.email)
            .boxed()])
        .await?;

        if let Some(failure) = failure {
            tracing::debug!(%failure, "Trainer rejected");
            return Ok(failure.into());
        }

        let trainer = self.repo.insert(trainer).await?;
        tracing::info!(trainer_id = trainer.id, "Trainer added");

        Ok(ServiceResult::success_with(trainer, self.messages.trainer_added))
    }

    async fn update(&self, trainer: Trainer) -> AppResult<ServiceResult<Trainer>> {
        let failure = BusinessRules::run_lazy::<AppError>(vec![
            self.check_trainer_exists(trainer.id).boxed(),
            self.check_email_unique_for_update(&trainer.email, trainer.id)
                .boxed(),
        ])
        .await?;

        if let Some(failure) = failure {
            tracing::debug!(trainer_id = trainer.id, %failure, "Trainer update rejected");
            return Ok(failure.into());
        }

        let trainer = self.repo.update(trainer).await?;
        tracing::info!(trainer_id = trainer.id, "Trainer updated");

        Ok(ServiceResult::success_with(trainer, self.messages.trainer_updated))
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        let failure =
            BusinessRules::run_lazy::<AppError>(vec![self.check_trainer_exists(id).boxed()])
                .await?;

        if let Some(failure) = failure {
            tracing::debug!(trainer_id = id, %failure, "Trainer delete rejected");
            return Ok(failure.into());
        }

        // Assigned members keep their record with the trainer cleared
        self.repo.delete(id).await?;
        tracing::info!(trainer_id = id, "Trainer deleted");

        Ok(Outcome::ok_with(self.messages.trainer_deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTrainerRepository;
    use chrono::Utc;
    use domain::FailureKind;

    fn trainer(id: i32, email: &str) -> Trainer {
        Trainer {
            id,
            first_name: "Mehmet".to_string(),
            last_name: "Demir".to_string(),
            email: email.to_string(),
            phone_number: "+905550001122".to_string(),
            specialty: "Strength training".to_string(),
            hired_at: Utc::now(),
        }
    }

    fn manager(repo: MockTrainerRepository) -> TrainerManager {
        TrainerManager::new(Arc::new(repo), Locale::En)
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_email() {
        let mut repo = MockTrainerRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(trainer(1, email))));
        repo.expect_insert().never();

        let result = manager(repo)
            .add(CreateTrainer {
                first_name: "Ali".to_string(),
                last_name: "Kaya".to_string(),
                email: "coach@example.com".to_string(),
                phone_number: "+905550001133".to_string(),
                specialty: "Yoga".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            result.failure_ref().map(|f| f.kind),
            Some(FailureKind::DuplicateKey)
        );
        assert_eq!(result.message(), Some("Trainer email already exists"));
    }

    #[tokio::test]
    async fn test_update_missing_trainer_is_not_found() {
        let mut repo = MockTrainerRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_find_by_email_excluding().never();
        repo.expect_update().never();

        let result = manager(repo)
            .update(trainer(4, "coach@example.com"))
            .await
            .unwrap();

        assert_eq!(
            result.failure_ref().map(|f| f.kind),
            Some(FailureKind::NotFound)
        );
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_succeeds() {
        let mut repo = MockTrainerRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(trainer(id, "coach@example.com"))));
        repo.expect_find_by_email_excluding()
            .returning(|_, _| Ok(None));
        repo.expect_update().times(1).returning(Ok);

        let result = manager(repo)
            .update(trainer(4, "coach@example.com"))
            .await
            .unwrap();

        assert_eq!(result.message(), Some("Trainer updated."));
    }

    #[tokio::test]
    async fn test_delete_existing_trainer() {
        let mut repo = MockTrainerRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(trainer(id, "coach@example.com"))));
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let result = manager(repo).delete(4).await.unwrap();

        assert_eq!(result, Outcome::ok_with("Trainer deleted."));
    }
}
