//! Field-level validation ahead of the business rules.

use async_trait::async_trait;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use common::AppResult;
use domain::{
    CreateMember, CreateTrainer, Failure, Member, MemberCampaignDetailDto, MemberDetailDto,
    Outcome, ServiceResult, Trainer, TrainerDetailDto,
};

use crate::service::{MemberService, TrainerService};

/// Collapse validation errors into one `ValidationFailed` failure.
///
/// Messages are ordered by field name and joined with `"; "`.
pub fn validation_failure(errors: &ValidationErrors) -> Failure {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    Failure::validation(messages.join("; "))
}

fn check<T: Validate>(value: &T) -> Option<Failure> {
    value.validate().err().map(|errors| validation_failure(&errors))
}

pub struct ValidatedMemberService {
    inner: Arc<dyn MemberService>,
}

impl ValidatedMemberService {
    pub fn new(inner: Arc<dyn MemberService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MemberService for ValidatedMemberService {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Member>>> {
        self.inner.get_all().await
    }

    async fn get_member_details(&self) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        self.inner.get_member_details().await
    }

    async fn get_member_details_by_id(
        &self,
        id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        self.inner.get_member_details_by_id(id).await
    }

    async fn get_member_campaign_details(
        &self,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>> {
        self.inner.get_member_campaign_details().await
    }

    async fn get_member_campaign_details_by_member(
        &self,
        member_id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>> {
        self.inner
            .get_member_campaign_details_by_member(member_id)
            .await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Member>>> {
        self.inner.get_by_id(id).await
    }

    async fn add(&self, member: CreateMember) -> AppResult<ServiceResult<Member>> {
        if let Some(failure) = check(&member) {
            tracing::debug!(%failure, "Member input rejected");
            return Ok(failure.into());
        }
        self.inner.add(member).await
    }

    async fn update(&self, member: Member) -> AppResult<ServiceResult<Member>> {
        if let Some(failure) = check(&member) {
            tracing::debug!(member_id = member.id, %failure, "Member input rejected");
            return Ok(failure.into());
        }
        self.inner.update(member).await
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        self.inner.delete(id).await
    }
}

pub struct ValidatedTrainerService {
    inner: Arc<dyn TrainerService>,
}

impl ValidatedTrainerService {
    pub fn new(inner: Arc<dyn TrainerService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TrainerService for ValidatedTrainerService {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Trainer>>> {
        self.inner.get_all().await
    }

    async fn get_trainer_details(&self) -> AppResult<ServiceResult<Vec<TrainerDetailDto>>> {
        self.inner.get_trainer_details().await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Trainer>>> {
        self.inner.get_by_id(id).await
    }

    async fn add(&self, trainer: CreateTrainer) -> AppResult<ServiceResult<Trainer>> {
        if let Some(failure) = check(&trainer) {
            tracing::debug!(%failure, "Trainer input rejected");
            return Ok(failure.into());
        }
        self.inner.add(trainer).await
    }

    async fn update(&self, trainer: Trainer) -> AppResult<ServiceResult<Trainer>> {
        if let Some(failure) = check(&trainer) {
            tracing::debug!(trainer_id = trainer.id, %failure, "Trainer input rejected");
            return Ok(failure.into());
        }
        self.inner.update(trainer).await
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        self.inner.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{MockMemberService, MockTrainerService};
    use domain::FailureKind;

    fn create_member() -> CreateMember {
        CreateMember {
            identity_number: "12345678901".to_string(),
            first_name: "Ayse".to_string(),
            last_name: "Yilmaz".to_string(),
            email: "ayse@example.com".to_string(),
            phone_number: "+905551112233".to_string(),
            birth_date: None,
            trainer_id: None,
        }
    }

    #[tokio::test]
    async fn test_invalid_member_never_reaches_inner_service() {
        let mut inner = MockMemberService::new();
        inner.expect_add().never();

        let service = ValidatedMemberService::new(Arc::new(inner));
        let result = service
            .add(CreateMember {
                email: "not-an-email".to_string(),
                first_name: String::new(),
                ..create_member()
            })
            .await
            .unwrap();

        let failure = result.into_failure().unwrap();
        assert_eq!(failure.kind, FailureKind::ValidationFailed);
        assert_eq!(
            failure.message,
            "Email must be a valid address; First name must be between 1 and 50 characters"
        );
    }

    #[tokio::test]
    async fn test_valid_member_is_forwarded() {
        let mut inner = MockMemberService::new();
        inner
            .expect_add()
            .times(1)
            .returning(|_| Ok(Failure::duplicate_key("Identity number already exists").into()));

        let service = ValidatedMemberService::new(Arc::new(inner));
        let result = service.add(create_member()).await.unwrap();

        assert_eq!(
            result.failure_ref().map(|f| f.kind),
            Some(FailureKind::DuplicateKey)
        );
    }

    #[tokio::test]
    async fn test_invalid_trainer_update_is_rejected() {
        let mut inner = MockTrainerService::new();
        inner.expect_update().never();

        let service = ValidatedTrainerService::new(Arc::new(inner));
        let result = service
            .update(Trainer {
                id: 1,
                first_name: "Mehmet".to_string(),
                last_name: "Demir".to_string(),
                email: "mehmet@example.com".to_string(),
                phone_number: "12".to_string(),
                specialty: "Yoga".to_string(),
                hired_at: chrono::Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(
            result.failure_ref().map(|f| f.kind),
            Some(FailureKind::ValidationFailed)
        );
    }
}
