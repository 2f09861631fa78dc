//! Trainer domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::member::PHONE_NUMBER_REGEX;

/// Trainer domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Trainer {
    /// Taken from the route on update
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,
    /// Natural key, unique across trainers
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(
        length(min = 10, max = 15, message = "Phone number must be between 10 and 15 characters"),
        regex(path = *PHONE_NUMBER_REGEX, message = "Phone number must contain digits only")
    )]
    pub phone_number: String,
    #[validate(length(min = 1, max = 100, message = "Specialty must be between 1 and 100 characters"))]
    pub specialty: String,
    #[serde(default = "Utc::now")]
    pub hired_at: DateTime<Utc>,
}

/// Trainer creation data transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateTrainer {
    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Mehmet"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Demir"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"))]
    #[cfg_attr(feature = "openapi", schema(example = "mehmet@example.com"))]
    pub email: String,
    #[validate(
        length(min = 10, max = 15, message = "Phone number must be between 10 and 15 characters"),
        regex(path = *PHONE_NUMBER_REGEX, message = "Phone number must contain digits only")
    )]
    pub phone_number: String,
    #[validate(length(min = 1, max = 100, message = "Specialty must be between 1 and 100 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Strength training"))]
    pub specialty: String,
}

/// Trainer with the number of members assigned to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TrainerDetailDto {
    pub trainer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialty: String,
    pub member_count: i64,
}
