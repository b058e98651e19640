//! Core traits defined in `archive-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
