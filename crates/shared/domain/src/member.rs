//! Member domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identity numbers are alphanumeric, without separators.
pub(crate) static IDENTITY_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("identity number pattern is valid"));

/// Phone numbers are digits with an optional leading `+`.
pub(crate) static PHONE_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]+$").expect("phone number pattern is valid"));

/// Member domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Member {
    /// Taken from the route on update
    #[serde(default)]
    pub id: i32,
    /// Natural key, unique across members
    #[validate(
        length(min = 2, max = 20, message = "Identity number must be between 2 and 20 characters"),
        regex(path = *IDENTITY_NUMBER_REGEX, message = "Identity number must be alphanumeric")
    )]
    pub identity_number: String,
    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(
        length(min = 10, max = 15, message = "Phone number must be between 10 and 15 characters"),
        regex(path = *PHONE_NUMBER_REGEX, message = "Phone number must contain digits only")
    )]
    pub phone_number: String,
    pub birth_date: Option<NaiveDate>,
    /// Assigned trainer, if any
    pub trainer_id: Option<i32>,
    /// Kept from the stored record on update
    #[serde(default = "Utc::now")]
    pub registered_at: DateTime<Utc>,
}

/// Member creation data transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMember {
    #[validate(
        length(min = 2, max = 20, message = "Identity number must be between 2 and 20 characters"),
        regex(path = *IDENTITY_NUMBER_REGEX, message = "Identity number must be alphanumeric")
    )]
    #[cfg_attr(feature = "openapi", schema(example = "12345678901"))]
    pub identity_number: String,
    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Ayse"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Yilmaz"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"))]
    #[cfg_attr(feature = "openapi", schema(example = "ayse@example.com"))]
    pub email: String,
    #[validate(
        length(min = 10, max = 15, message = "Phone number must be between 10 and 15 characters"),
        regex(path = *PHONE_NUMBER_REGEX, message = "Phone number must contain digits only")
    )]
    #[cfg_attr(feature = "openapi", schema(example = "+905551112233"))]
    pub phone_number: String,
    pub birth_date: Option<NaiveDate>,
    pub trainer_id: Option<i32>,
}

/// Member joined with the name of the assigned trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MemberDetailDto {
    pub member_id: i32,
    pub identity_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub trainer_first_name: Option<String>,
    pub trainer_last_name: Option<String>,
}
