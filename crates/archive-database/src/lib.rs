//! # archive-database
//!
//! SQLite connection management, the embedded schema migration and the
//! transactional repositories for all Paperless Archive entities.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;
pub mod transaction;

pub use connection::DatabasePool;
pub use transaction::ScopedTransaction;
