//! Repository layer for data access.

pub mod entities;
mod member_repository;
mod trainer_repository;

pub use member_repository::{MemberRepository, MemberStore};
pub use trainer_repository::{TrainerRepository, TrainerStore};

#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use trainer_repository::MockTrainerRepository;
