//! User administration and self-service profile operations.

pub mod service;

pub use service::{AccessUpdate, ProfileUpdate, RoleUpdate, UserService, UserStats};
