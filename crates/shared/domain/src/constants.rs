//! Domain-level constants.
//!
//! Role names used by secured operations.

// =============================================================================
// Roles
// =============================================================================

/// Administrator role, allowed to perform every secured operation
pub const ROLE_ADMIN: &str = "admin";

/// Role allowed to manage members
pub const ROLE_MEMBER_ADMIN: &str = "member.admin";

/// Role allowed to manage trainers
pub const ROLE_TRAINER_ADMIN: &str = "trainer.admin";

/// Roles required for member mutations
pub const MEMBER_WRITE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MEMBER_ADMIN];

/// Roles required for trainer mutations
pub const TRAINER_WRITE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_TRAINER_ADMIN];
