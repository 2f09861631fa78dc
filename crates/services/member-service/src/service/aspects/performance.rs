//! Call timing.
//!
//! Every call is timed; calls slower than the threshold are logged at
//! `warn`, the rest at `debug`.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::AppResult;
use domain::{
    CreateMember, CreateTrainer, Member, MemberCampaignDetailDto, MemberDetailDto, Outcome,
    ServiceResult, Trainer, TrainerDetailDto,
};

use crate::service::{MemberService, TrainerService};

/// Calls slower than this are reported
pub const DEFAULT_SLOW_CALL_THRESHOLD: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct PerformanceAspect {
    threshold: Duration,
}

impl Default for PerformanceAspect {
    fn default() -> Self {
        Self::new(DEFAULT_SLOW_CALL_THRESHOLD)
    }
}

impl PerformanceAspect {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn is_slow(&self, elapsed: Duration) -> bool {
        elapsed > self.threshold
    }

    /// Await `call`, logging how long it took.
    pub async fn measure<T, Fut>(&self, operation: &'static str, call: Fut) -> T
    where
        Fut: Future<Output = T>,
    {
        let started = Instant::now();
        let output = call.await;
        let elapsed = started.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;

        if self.is_slow(elapsed) {
            tracing::warn!(
                operation,
                elapsed_ms,
                threshold_ms = self.threshold.as_millis() as u64,
                "Slow service call"
            );
        } else {
            tracing::debug!(operation, elapsed_ms, "Service call finished");
        }

        output
    }
}

pub struct TimedMemberService {
    inner: Arc<dyn MemberService>,
    aspect: PerformanceAspect,
}

impl TimedMemberService {
    pub fn new(inner: Arc<dyn MemberService>, aspect: PerformanceAspect) -> Self {
        Self { inner, aspect }
    }
}

#[async_trait]
impl MemberService for TimedMemberService {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Member>>> {
        self.aspect
            .measure("member_service.get_all", self.inner.get_all())
            .await
    }

    async fn get_member_details(&self) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        self.aspect
            .measure(
                "member_service.get_member_details",
                self.inner.get_member_details(),
            )
            .await
    }

    async fn get_member_details_by_id(
        &self,
        id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        self.aspect
            .measure(
                "member_service.get_member_details_by_id",
                self.inner.get_member_details_by_id(id),
            )
            .await
    }

    async fn get_member_campaign_details(
        &self,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>> {
        self.aspect
            .measure(
                "member_service.get_member_campaign_details",
                self.inner.get_member_campaign_details(),
            )
            .await
    }

    async fn get_member_campaign_details_by_member(
        &self,
        member_id: i32,
    ) -> AppResult<ServiceResult<Vec<MemberCampaignDetailDto>>> {
        self.aspect
            .measure(
                "member_service.get_member_campaign_details_by_member",
                self.inner.get_member_campaign_details_by_member(member_id),
            )
            .await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Member>>> {
        self.aspect
            .measure("member_service.get_by_id", self.inner.get_by_id(id))
            .await
    }

    async fn add(&self, member: CreateMember) -> AppResult<ServiceResult<Member>> {
        self.aspect
            .measure("member_service.add", self.inner.add(member))
            .await
    }

    async fn update(&self, member: Member) -> AppResult<ServiceResult<Member>> {
        self.aspect
            .measure("member_service.update", self.inner.update(member))
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        self.aspect
            .measure("member_service.delete", self.inner.delete(id))
            .await
    }
}

pub struct TimedTrainerService {
    inner: Arc<dyn TrainerService>,
    aspect: PerformanceAspect,
}

impl TimedTrainerService {
    pub fn new(inner: Arc<dyn TrainerService>, aspect: PerformanceAspect) -> Self {
        Self { inner, aspect }
    }
}

#[async_trait]
impl TrainerService for TimedTrainerService {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Trainer>>> {
        self.aspect
            .measure("trainer_service.get_all", self.inner.get_all())
            .await
    }

    async fn get_trainer_details(&self) -> AppResult<ServiceResult<Vec<TrainerDetailDto>>> {
        self.aspect
            .measure(
                "trainer_service.get_trainer_details",
                self.inner.get_trainer_details(),
            )
            .await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Trainer>>> {
        self.aspect
            .measure("trainer_service.get_by_id", self.inner.get_by_id(id))
            .await
    }

    async fn add(&self, trainer: CreateTrainer) -> AppResult<ServiceResult<Trainer>> {
        self.aspect
            .measure("trainer_service.add", self.inner.add(trainer))
            .await
    }

    async fn update(&self, trainer: Trainer) -> AppResult<ServiceResult<Trainer>> {
        self.aspect
            .measure("trainer_service.update", self.inner.update(trainer))
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        self.aspect
            .measure("trainer_service.delete", self.inner.delete(id))
            .await
    }
}
