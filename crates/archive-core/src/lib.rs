//! # archive-core
//!
//! Core crate for Paperless Archive. Contains the configuration schemas,
//! typed identifiers, the generic repository contract, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other archive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
