//! User domain entities.

pub mod access;
pub mod model;
pub mod role;
pub mod status;

pub use access::AccessLevel;
pub use model::{User, UserSummary};
pub use role::UserRole;
pub use status::UserStatus;
