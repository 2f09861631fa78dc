//! Service Container - composition root for managers and aspects.
//!
//! The validated, timed and cached chains are built once and shared. The security
//! aspect depends on the caller, so it is added per request.

use std::sync::Arc;
use std::time::Duration;

use domain::Locale;
use sea_orm::DatabaseConnection;

use super::aspects::{
    CacheAspect, CachedMemberService, CachedTrainerService, Caller, PerformanceAspect,
    SecuredMemberService, SecuredOperation, SecuredTrainerService, TimedMemberService,
    TimedTrainerService, ValidatedMemberService, ValidatedTrainerService,
};
use super::{MemberManager, MemberService, TrainerManager, TrainerService};
use crate::infra::CacheManager;
use crate::repository::{MemberStore, TrainerStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Member service acting on behalf of `caller`
    fn members(&self, caller: Caller) -> Arc<dyn MemberService>;

    /// Trainer service acting on behalf of `caller`
    fn trainers(&self, caller: Caller) -> Arc<dyn TrainerService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    member_service: Arc<dyn MemberService>,
    trainer_service: Arc<dyn TrainerService>,
    locale: Locale,
}

impl Services {
    /// Create a container around already composed service chains.
    pub fn new(
        member_service: Arc<dyn MemberService>,
        trainer_service: Arc<dyn TrainerService>,
        locale: Locale,
    ) -> Self {
        Self {
            member_service,
            trainer_service,
            locale,
        }
    }

    /// Build stores, managers and the `Validated -> Timed -> Cached -> Manager`
    /// chains.
    pub fn from_connection(
        db: DatabaseConnection,
        cache: Arc<dyn CacheManager>,
        cache_ttl: Duration,
        locale: Locale,
    ) -> Self {
        let aspect = CacheAspect::new(cache, cache_ttl);
        let timing = PerformanceAspect::default();

        let trainer_store = Arc::new(TrainerStore::new(db.clone()));

        let member_manager = Arc::new(MemberManager::new(
            Arc::new(MemberStore::new(db)),
            trainer_store.clone(),
            locale,
        ));
        let member_service = Arc::new(ValidatedMemberService::new(Arc::new(
            TimedMemberService::new(
                Arc::new(CachedMemberService::new(member_manager, aspect.clone())),
                timing,
            ),
        )));

        let trainer_manager = Arc::new(TrainerManager::new(trainer_store, locale));
        let trainer_service = Arc::new(ValidatedTrainerService::new(Arc::new(
            TimedTrainerService::new(
                Arc::new(CachedTrainerService::new(trainer_manager, aspect)),
                timing,
            ),
        )));

        Self::new(member_service, trainer_service, locale)
    }
}

impl ServiceContainer for Services {
    fn members(&self, caller: Caller) -> Arc<dyn MemberService> {
        Arc::new(SecuredMemberService::new(
            self.member_service.clone(),
            caller,
            SecuredOperation::members(self.locale),
        ))
    }

    fn trainers(&self, caller: Caller) -> Arc<dyn TrainerService> {
        Arc::new(SecuredTrainerService::new(
            self.trainer_service.clone(),
            caller,
            SecuredOperation::trainers(self.locale),
        ))
    }
}
