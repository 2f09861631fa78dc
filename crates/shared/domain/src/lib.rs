//! Domain layer - Core business entities, results and business rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Every business operation reports its outcome as a [`ServiceResult`]
//! instead of an error, so expected failures (missing records, duplicate
//! natural keys, invalid input, denied access) travel as values.

pub mod campaign;
pub mod constants;
pub mod error;
pub mod member;
pub mod messages;
pub mod result;
pub mod rules;
pub mod trainer;

pub use campaign::MemberCampaignDetailDto;
pub use constants::*;
pub use error::DomainError;
pub use member::{CreateMember, Member, MemberDetailDto};
pub use messages::{Locale, Messages};
pub use result::{Failure, FailureKind, Outcome, ServiceResult};
pub use rules::{BusinessRules, RuleCheck};
pub use trainer::{CreateTrainer, Trainer, TrainerDetailDto};
