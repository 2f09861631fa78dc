//! Member campaign enrolment details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One member's enrolment in one discount campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MemberCampaignDetailDto {
    pub member_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub campaign_id: i32,
    pub campaign_name: String,
    /// Fraction between 0 and 1
    pub discount_rate: f64,
    pub joined_at: DateTime<Utc>,
}
