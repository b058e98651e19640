//! Role-derived defaults applied at registration time.

use archive_entity::user::{AccessLevel, UserRole, UserStatus};

/// Access level and initial status granted to a newly registered role.
///
/// Archivists start approved with full access, researchers wait for
/// approval with restricted access, and everyone else is approved with
/// public access.
pub fn registration_profile(role: UserRole) -> (AccessLevel, UserStatus) {
    match role {
        UserRole::Archivist => (AccessLevel::Full, UserStatus::Approved),
        UserRole::Researcher => (AccessLevel::Restricted, UserStatus::Pending),
        UserRole::Public | UserRole::Admin => (AccessLevel::Public, UserStatus::Approved),
    }
}
