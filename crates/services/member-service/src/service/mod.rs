//! Application services layer - managers, aspects and their composition.
//!
//! Managers hold the business rules. Aspects wrap a manager behind the same
//! trait, so the HTTP layer never knows which concerns are applied.

pub mod aspects;
pub mod container;
mod member_service;
mod trainer_service;

pub use container::{ServiceContainer, Services};
pub use member_service::{MemberManager, MemberService};
pub use trainer_service::{TrainerManager, TrainerService};

#[cfg(any(test, feature = "test-utils"))]
pub use member_service::MockMemberService;
#[cfg(any(test, feature = "test-utils"))]
pub use trainer_service::MockTrainerService;
