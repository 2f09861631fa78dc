//! Member service - member business logic.
//!
//! Every mutation runs its business rules first; the first failing rule is
//! returned as a value and nothing reaches the store.

use async_trait::async_trait;
use futures::FutureExt;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    BusinessRules, CreateMember, Locale, Member, MemberCampaignDetailDto, MemberDetailDto,
    Messages, Outcome, ServiceResult,
};

use crate::repository::{MemberRepository, TrainerRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member service trait, implemented by the manager and by every aspect
/// wrapping it.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberService: Send + Sync {
    /// List all members
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Member>>>;

    /// List members with their trainer's name
    async fn get_member_details(&self) -> AppResult<ServiceResult<Vec<MemberDetailDto>>>;

    /// Detail rows of one member; empty when the member does not exist
    async fn get_member_details_by_id(&self, id: i32)
        -> AppResult<ServiceResult<Vec<MemberDetailDto>>>;

    /// Campaign enrolments of every member
    async fn get_member_campaign_details(
        &self,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>>;

    /// Campaign enrolments of one member
    async fn get_member_campaign_details_by_member(
        &self,
        member_id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>>;

    /// Get a member by ID; a missing member is a success without a record
    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Member>>>;

    /// Register a member with a unique identity number
    async fn add(&self, member: CreateMember) -> AppResult<ServiceResult<Member>>;

    /// Overwrite an existing member
    async fn update(&self, member: Member) -> AppResult<ServiceResult<Member>>;

    /// Remove an existing member
    async fn delete(&self, id: i32) -> AppResult<Outcome>;
}

/// Concrete implementation of MemberService using repository.
pub struct MemberManager {
    repo: Arc<dyn MemberRepository>,
    trainers: Arc<dyn TrainerRepository>,
    messages: &'static Messages,
}

impl MemberManager {
    pub fn new(
        repo: Arc<dyn MemberRepository>,
        trainers: Arc<dyn TrainerRepository>,
        locale: Locale,
    ) -> Self {
        Self {
            repo,
            trainers,
            messages: locale.messages(),
        }
    }

    async fn check_member_exists(&self, id: i32) -> AppResult<Outcome> {
        let member = self.repo.find_by_id(id).await?;
        Ok(BusinessRules::require_found(
            member.as_ref(),
            self.messages.member_not_found,
        ))
    }

    /// Members without a trainer always pass.
    async fn check_trainer_exists(&self, trainer_id: Option<i32>) -> AppResult<Outcome> {
        let Some(trainer_id) = trainer_id else {
            return Ok(Outcome::ok());
        };
        let trainer = self.trainers.find_by_id(trainer_id).await?;
        Ok(BusinessRules::require_found(
            trainer.as_ref(),
            self.messages.trainer_not_found,
        ))
    }

    async fn check_identity_number_unique(&self, identity_number: &str) -> AppResult<Outcome> {
        let holder = self.repo.find_by_identity_number(identity_number).await?;
        Ok(BusinessRules::require_absent(
            holder.as_ref(),
            self.messages.identity_number_already_exists,
        ))
    }

    /// Same as the insert check, ignoring the record being updated.
    async fn check_identity_number_unique_for_update(
        &self,
        identity_number: &str,
        id: i32,
    ) -> AppResult<Outcome> {
        let holder = self
            .repo
            .find_by_identity_number_excluding(identity_number, id)
            .await?;
        Ok(BusinessRules::require_absent(
            holder.as_ref(),
            self.messages.identity_number_already_exists,
        ))
    }
}

#[async_trait]
impl MemberService for MemberManager {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Member>>> {
        Ok(ServiceResult::success(self.repo.list().await?))
    }

    async fn get_member_details(&self) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        Ok(ServiceResult::success(self.repo.list_details().await?))
    }

    async fn get_member_details_by_id(
        &self,
        id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        let details = self.repo.list_details_by_id(id).await?;
        Ok(ServiceResult::success_with(details, self.messages.success))
    }

    async fn get_member_campaign_details(
        &self,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>> {
        Ok(ServiceResult::success_with(
            self.repo.list_campaign_details().await?,
            self.messages.success,
        ))
    }

    async fn get_member_campaign_details_by_member(
        &self,
        member_id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>> {
        Ok(ServiceResult::success_with(
            self.repo.list_campaign_details_by_member(member_id).await?,
            self.messages.success,
        ))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Member>>> {
        Ok(ServiceResult::success_with(
            self.repo.find_by_id(id).await?,
            self.messages.success,
        ))
    }

    async fn add(&self, member: CreateMember) -> AppResult<ServiceResult<Member>> {
        let failure = BusinessRules::run_lazy::<AppError>(vec![
            self.check_identity_number_unique(&member.identity_number)
                .boxed(),
            self.check_trainer_exists(member.trainer_id).boxed(),
        ])
        .await?;

        if let Some(failure) = failure {
            tracing::debug!(%failure, "Member rejected");
            return Ok(failure.into());
        }

        let member = self.repo.insert(member).await?;
        tracing::info!(member_id = member.id, "Member added");

        Ok(ServiceResult::success_with(member, self.messages.member_added))
    }

    async fn update(&self, member: Member) -> AppResult<ServiceResult<Member>> {
        let failure = BusinessRules::run_lazy::<AppError>(vec![
            self.check_member_exists(member.id).boxed(),
            self.check_identity_number_unique_for_update(&member.identity_number, member.id)
                .boxed(),
            self.check_trainer_exists(member.trainer_id).boxed(),
        ])
        .await?;

        if let Some(failure) = failure {
            tracing::debug!(member_id = member.id, %failure, "Member update rejected");
            return Ok(failure.into());
        }

        let member = self.repo.update(member).await?;
        tracing::info!(member_id = member.id, "Member updated");

        Ok(ServiceResult::success_with(member, self.messages.member_updated))
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        let failure =
            BusinessRules::run_lazy::<AppError>(vec![self.check_member_exists(id).boxed()])
                .await?;

        if let Some(failure) = failure {
            tracing::debug!(member_id = id, %failure, "Member delete rejected");
            return Ok(failure.into());
        }

        self.repo.delete(id).await?;
        tracing::info!(member_id = id, "Member deleted");

        Ok(Outcome::ok_with(self.messages.member_deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockMemberRepository, MockTrainerRepository};
    use domain::Trainer;
    use chrono::Utc;
    use domain::{Failure, FailureKind};
    use mockall::predicate::eq;

    fn member(id: i32, identity_number: &str) -> Member {
        Member {
            id,
            identity_number: identity_number.to_string(),
            first_name: "Ayse".to_string(),
            last_name: "Yilmaz".to_string(),
            email: "ayse@example.com".to_string(),
            phone_number: "+905551112233".to_string(),
            birth_date: None,
            trainer_id: None,
            registered_at: Utc::now(),
        }
    }

    fn create_member(identity_number: &str) -> CreateMember {
        CreateMember {
            identity_number: identity_number.to_string(),
            first_name: "Ayse".to_string(),
            last_name: "Yilmaz".to_string(),
            email: "ayse@example.com".to_string(),
            phone_number: "+905551112233".to_string(),
            birth_date: None,
            trainer_id: None,
        }
    }

    fn manager(repo: MockMemberRepository) -> MemberManager {
        manager_with_trainers(repo, MockTrainerRepository::new())
    }

    fn manager_with_trainers(
        repo: MockMemberRepository,
        trainers: MockTrainerRepository,
    ) -> MemberManager {
        MemberManager::new(Arc::new(repo), Arc::new(trainers), Locale::En)
    }

    fn trainer(id: i32) -> Trainer {
        Trainer {
            id,
            first_name: "Mehmet".to_string(),
            last_name: "Demir".to_string(),
            email: "coach@example.com".to_string(),
            phone_number: "+905550001122".to_string(),
            specialty: "Strength training".to_string(),
            hired_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_identity_number() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_identity_number()
            .withf(|identity_number: &str| identity_number == "A1")
            .returning(|_| Ok(Some(member(1, "A1"))));
        repo.expect_insert().never();

        let result = manager(repo).add(create_member("A1")).await.unwrap();

        assert_eq!(
            result.into_failure(),
            Some(Failure::duplicate_key("Identity number already exists"))
        );
    }

    #[tokio::test]
    async fn test_add_returns_created_member() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_identity_number()
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|dto| Ok(member(7, &dto.identity_number)));

        let result = manager(repo).add(create_member("B2")).await.unwrap();

        assert_eq!(result.message(), Some("Member added successfully."));
        assert_eq!(result.data().map(|m| m.id), Some(7));
    }

    #[tokio::test]
    async fn test_update_missing_member_stops_at_existence_check() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));
        // A later rule would report a duplicate, but the first failure wins
        repo.expect_find_by_identity_number_excluding().never();
        repo.expect_update().never();

        let result = manager(repo).update(member(42, "A1")).await.unwrap();

        assert_eq!(
            result.failure_ref().map(|f| f.kind),
            Some(FailureKind::NotFound)
        );
        assert_eq!(result.message(), Some("Member not found"));
    }

    #[tokio::test]
    async fn test_update_rejects_identity_number_of_another_member() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(member(id, "A1"))));
        repo.expect_find_by_identity_number_excluding()
            .withf(|identity_number: &str, id: &i32| identity_number == "B2" && *id == 1)
            .returning(|_, _| Ok(Some(member(2, "B2"))));
        repo.expect_update().never();

        let result = manager(repo).update(member(1, "B2")).await.unwrap();

        assert_eq!(
            result.failure_ref().map(|f| f.kind),
            Some(FailureKind::DuplicateKey)
        );
    }

    #[tokio::test]
    async fn test_update_with_unchanged_identity_number_succeeds() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(member(id, "A1"))));
        repo.expect_find_by_identity_number_excluding()
            .returning(|_, _| Ok(None));
        repo.expect_update().times(1).returning(Ok);

        let result = manager(repo).update(member(1, "A1")).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.message(), Some("Member updated."));
    }

    #[tokio::test]
    async fn test_delete_missing_member_is_not_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let result = manager(repo).delete(9).await.unwrap();

        assert_eq!(result.into_failure(), Some(Failure::not_found("Member not found")));
    }

    #[tokio::test]
    async fn test_delete_existing_member() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(member(id, "A1"))));
        repo.expect_delete()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));

        let result = manager(repo).delete(3).await.unwrap();

        assert_eq!(result, Outcome::ok_with("Member deleted."));
    }

    #[tokio::test]
    async fn test_get_by_id_of_missing_member_is_empty_success() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = manager(repo).get_by_id(5).await.unwrap();

        assert_eq!(
            result,
            ServiceResult::success_with(None, "Operation completed successfully")
        );
    }

    #[tokio::test]
    async fn test_campaign_reads_carry_success_message() {
        let mut repo = MockMemberRepository::new();
        repo.expect_list_campaign_details()
            .returning(|| Ok(Vec::new()));
        repo.expect_list_campaign_details_by_member()
            .with(eq(4))
            .returning(|_| Ok(Vec::new()));
        let manager = manager(repo);

        let all = manager.get_member_campaign_details().await.unwrap();
        let own = manager.get_member_campaign_details_by_member(4).await.unwrap();

        assert_eq!(all.message(), Some("Operation completed successfully"));
        assert_eq!(own.message(), Some("Operation completed successfully"));
    }

    #[tokio::test]
    async fn test_add_with_unknown_trainer_is_not_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_identity_number()
            .returning(|_| Ok(None));
        repo.expect_insert().never();
        let mut trainers = MockTrainerRepository::new();
        trainers
            .expect_find_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));

        let result = manager_with_trainers(repo, trainers)
            .add(CreateMember {
                trainer_id: Some(99),
                ..create_member("A1")
            })
            .await
            .unwrap();

        assert_eq!(result.into_failure(), Some(Failure::not_found("Trainer not found")));
    }

    #[tokio::test]
    async fn test_update_with_known_trainer_succeeds() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(member(id, "A1"))));
        repo.expect_find_by_identity_number_excluding()
            .returning(|_, _| Ok(None));
        repo.expect_update().times(1).returning(Ok);
        let mut trainers = MockTrainerRepository::new();
        trainers
            .expect_find_by_id()
            .returning(|id| Ok(Some(trainer(id))));

        let result = manager_with_trainers(repo, trainers)
            .update(Member {
                trainer_id: Some(2),
                ..member(1, "A1")
            })
            .await
            .unwrap();

        assert_eq!(result.data().and_then(|m| m.trainer_id), Some(2));
    }

    #[tokio::test]
    async fn test_details_by_id_carries_success_message() {
        let mut repo = MockMemberRepository::new();
        repo.expect_list_details_by_id()
            .returning(|_| Ok(Vec::new()));

        let result = manager(repo).get_member_details_by_id(5).await.unwrap();

        assert_eq!(result.message(), Some("Operation completed successfully"));
        assert_eq!(result.data().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_identity_number()
            .returning(|_| Err(AppError::internal("connection reset")));

        let result = manager(repo).add(create_member("A1")).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_turkish_messages() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = MemberManager::new(Arc::new(repo), Arc::new(MockTrainerRepository::new()), Locale::Tr)
            .delete(1)
            .await
            .unwrap();

        assert_eq!(result.message(), Some("Üye bulunamadı"));
    }
}
