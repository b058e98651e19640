//! Registration, login and the role to access-level mapping.

pub mod profile;
pub mod service;

pub use profile::registration_profile;
pub use service::{AuthResponse, AuthService, RegisterRequest};
