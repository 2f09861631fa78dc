//! SeaORM entities.

pub mod campaign;
pub mod member;
pub mod member_campaign;
pub mod trainer;
