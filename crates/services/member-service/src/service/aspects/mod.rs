//! Cross-cutting aspects.
//!
//! Each aspect implements the same service trait as the manager it wraps, so
//! chains are assembled by plain constructor nesting:
//! `Secured -> Validated -> Timed -> Cached -> Manager`.

mod caching;
mod performance;
mod security;
mod validation;

pub use caching::{CacheAspect, CachedMemberService, CachedTrainerService};
pub use performance::{
    PerformanceAspect, TimedMemberService, TimedTrainerService, DEFAULT_SLOW_CALL_THRESHOLD,
};
pub use security::{Caller, SecuredMemberService, SecuredOperation, SecuredTrainerService};
pub use validation::{validation_failure, ValidatedMemberService, ValidatedTrainerService};
