//! Role requirements on mutating operations.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{
    CreateMember, CreateTrainer, Failure, Locale, Member, MemberCampaignDetailDto,
    MemberDetailDto, Messages, Outcome, ServiceResult, Trainer, TrainerDetailDto,
    MEMBER_WRITE_ROLES, TRAINER_WRITE_ROLES,
};

use crate::service::{MemberService, TrainerService};

/// The authenticated principal of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    /// Token subject; `None` for anonymous callers
    pub subject: Option<String>,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(subject: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            roles,
        }
    }

    pub fn has_any_role(&self, required: &[&str]) -> bool {
        self.roles.iter().any(|role| required.contains(&role.as_str()))
    }
}

/// Declarative role requirement.
#[derive(Debug, Clone, Copy)]
pub struct SecuredOperation {
    roles: &'static [&'static str],
    messages: &'static Messages,
}

impl SecuredOperation {
    pub fn new(roles: &'static [&'static str], locale: Locale) -> Self {
        Self {
            roles,
            messages: locale.messages(),
        }
    }

    pub fn members(locale: Locale) -> Self {
        Self::new(MEMBER_WRITE_ROLES, locale)
    }

    pub fn trainers(locale: Locale) -> Self {
        Self::new(TRAINER_WRITE_ROLES, locale)
    }

    /// Fails with `Unauthorized` unless the caller holds one of the roles.
    pub fn check(&self, caller: &Caller) -> Option<Failure> {
        if caller.has_any_role(self.roles) {
            return None;
        }

        tracing::debug!(
            subject = caller.subject.as_deref().unwrap_or("anonymous"),
            required = ?self.roles,
            "Operation denied"
        );
        Some(Failure::unauthorized(self.messages.authorization_denied))
    }
}

/// Member service bound to one caller.
pub struct SecuredMemberService {
    inner: Arc<dyn MemberService>,
    caller: Caller,
    operation: SecuredOperation,
}

impl SecuredMemberService {
    pub fn new(inner: Arc<dyn MemberService>, caller: Caller, operation: SecuredOperation) -> Self {
        Self {
            inner,
            caller,
            operation,
        }
    }
}

#[async_trait]
impl MemberService for SecuredMemberService {
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
        match self.operation.check(&self.caller) {
            Some(failure) => Ok(failure.into()),
            None => self.inner.add(member).await,
        }
    }

    async fn update(&self, member: Member) -> AppResult<ServiceResult<Member>> {
        match self.operation.check(&self.caller) {
            Some(failure) => Ok(failure.into()),
            None => self.inner.update(member).await,
        }
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        match self.operation.check(&self.caller) {
            Some(failure) => Ok(failure.into()),
            None => self.inner.delete(id).await,
        }
    }
}

/// Trainer service bound to one caller.
pub struct SecuredTrainerService {
    inner: Arc<dyn TrainerService>,
    caller: Caller,
    operation: SecuredOperation,
}

impl SecuredTrainerService {
    pub fn new(
        inner: Arc<dyn TrainerService>,
        caller: Caller,
        operation: SecuredOperation,
    ) -> Self {
        Self {
            inner,
            caller,
            operation,
        }
    }
}

#[async_trait]
impl TrainerService for SecuredTrainerService {
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
        match self.operation.check(&self.caller) {
            Some(failure) => Ok(failure.into()),
            None => self.inner.add(trainer).await,
        }
    }

    async fn update(&self, trainer: Trainer) -> AppResult<ServiceResult<Trainer>> {
        match self.operation.check(&self.caller) {
            Some(failure) => Ok(failure.into()),
            None => self.inner.update(trainer).await,
        }
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        match self.operation.check(&self.caller) {
            Some(failure) => Ok(failure.into()),
            None => self.inner.delete(id).await,
        }
    }
}
