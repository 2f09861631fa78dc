//! Read caching with invalidate-on-write.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common::AppResult;
use domain::{
    CreateMember, CreateTrainer, Member, MemberCampaignDetailDto, MemberDetailDto, Outcome,
    ServiceResult, Trainer, TrainerDetailDto,
};

use crate::infra::CacheManager;
use crate::service::{MemberService, TrainerService};

/// Cache key namespace of the member service
pub const MEMBER_CACHE_NAMESPACE: &str = "member_service";
/// Cache key namespace of the trainer service
pub const TRAINER_CACHE_NAMESPACE: &str = "trainer_service";

/// Typed access to a [`CacheManager`] for service results.
///
/// Cache faults are logged and treated as misses; only the wrapped
/// service's own errors are returned.
#[derive(Clone)]
pub struct CacheAspect {
    cache: Arc<dyn CacheManager>,
    ttl: Duration,
}

impl CacheAspect {
    pub fn new(cache: Arc<dyn CacheManager>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Return the cached result for `key` or load and cache it.
    ///
    /// Failures are never cached.
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, load: F) -> AppResult<ServiceResult<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<ServiceResult<T>>>,
    {
        match self.cache.get_raw(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(result) => {
                    tracing::debug!(key, "Cache hit");
                    return Ok(result);
                }
                Err(e) => tracing::warn!(key, error = %e, "Discarding unreadable cache entry"),
            },
            Ok(None) => tracing::debug!(key, "Cache miss"),
            Err(e) => tracing::warn!(key, error = %e, "Cache read failed"),
        }

        let result = load().await?;

        if result.is_success() {
            match serde_json::to_string(&result) {
                Ok(json) => {
                    if let Err(e) = self.cache.set_raw(key, json, self.ttl).await {
                        tracing::warn!(key, error = %e, "Cache write failed");
                    }
                }
                Err(e) => tracing::warn!(key, error = %e, "Cache serialization failed"),
            }
        }

        Ok(result)
    }

    /// Remove every key starting with `prefix`.
    pub async fn invalidate(&self, prefix: &str) {
        match self.cache.remove_by_prefix(prefix).await {
            Ok(removed) => tracing::debug!(prefix, removed, "Cache invalidated"),
            Err(e) => tracing::warn!(prefix, error = %e, "Cache invalidation failed"),
        }
    }
}

fn cache_key(namespace: &str, operation: &str) -> String {
    format!("{}.{}", namespace, operation)
}

/// Prefix shared by every cached read of a namespace.
fn read_prefix(namespace: &str) -> String {
    cache_key(namespace, "get")
}

// =============================================================================
// Members
// =============================================================================

pub struct CachedMemberService {
    inner: Arc<dyn MemberService>,
    aspect: CacheAspect,
}

impl CachedMemberService {
    pub fn new(inner: Arc<dyn MemberService>, aspect: CacheAspect) -> Self {
        Self { inner, aspect }
    }

    async fn invalidate_reads<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if result.is_ok() {
            self.aspect
                .invalidate(&read_prefix(MEMBER_CACHE_NAMESPACE))
                .await;
            // Trainer details count assigned members
            self.aspect
                .invalidate(&read_prefix(TRAINER_CACHE_NAMESPACE))
                .await;
        }
        result
    }
}

#[async_trait]
impl MemberService for CachedMemberService {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Member>>> {
        self.aspect
            .get_or_load(&cache_key(MEMBER_CACHE_NAMESPACE, "get_all"), || {
                self.inner.get_all()
            })
            .await
    }

    async fn get_member_details(&self) -> AppResult<ServiceResult<Vec<MemberDetailDto>>> {
        self.aspect
            .get_or_load(
                &cache_key(MEMBER_CACHE_NAMESPACE, "get_member_details"),
                || self.inner.get_member_details(),
            )
            .await
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
        self.aspect
            .get_or_load(
                &cache_key(MEMBER_CACHE_NAMESPACE, "get_member_campaign_details"),
                || self.inner.get_member_campaign_details(),
            )
            .await
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
        let result = self.inner.add(member).await;
        self.invalidate_reads(result).await
    }

    async fn update(&self, member: Member) -> AppResult<ServiceResult<Member>> {
        let result = self.inner.update(member).await;
        self.invalidate_reads(result).await
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        let result = self.inner.delete(id).await;
        self.invalidate_reads(result).await
    }
}

// =============================================================================
// Trainers
// =============================================================================

pub struct CachedTrainerService {
    inner: Arc<dyn TrainerService>,
    aspect: CacheAspect,
}

impl CachedTrainerService {
    pub fn new(inner: Arc<dyn TrainerService>, aspect: CacheAspect) -> Self {
        Self { inner, aspect }
    }

    async fn invalidate_reads<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if result.is_ok() {
            self.aspect
                .invalidate(&read_prefix(TRAINER_CACHE_NAMESPACE))
                .await;
            // Member details embed trainer names
            self.aspect
                .invalidate(&read_prefix(MEMBER_CACHE_NAMESPACE))
                .await;
        }
        result
    }
}

#[async_trait]
impl TrainerService for CachedTrainerService {
    async fn get_all(&self) -> AppResult<ServiceResult<Vec<Trainer>>> {
        self.aspect
            .get_or_load(&cache_key(TRAINER_CACHE_NAMESPACE, "get_all"), || {
                self.inner.get_all()
            })
            .await
    }

    async fn get_trainer_details(&self) -> AppResult<ServiceResult<Vec<TrainerDetailDto>>> {
        self.aspect
            .get_or_load(
                &cache_key(TRAINER_CACHE_NAMESPACE, "get_trainer_details"),
                || self.inner.get_trainer_details(),
            )
            .await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<ServiceResult<Option<Trainer>>> {
        self.inner.get_by_id(id).await
    }

    async fn add(&self, trainer: CreateTrainer) -> AppResult<ServiceResult<Trainer>> {
        let result = self.inner.add(trainer).await;
        self.invalidate_reads(result).await
    }

    async fn update(&self, trainer: Trainer) -> AppResult<ServiceResult<Trainer>> {
        let result = self.inner.update(trainer).await;
        self.invalidate_reads(result).await
    }

    async fn delete(&self, id: i32) -> AppResult<Outcome> {
        let result = self.inner.delete(id).await;
        self.invalidate_reads(result).await
    }
}
