//! Background task pool configuration.

use serde::{Deserialize, Serialize};

/// Sizing of one bounded task pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Tasks allowed to run at the same time.
    pub concurrency: usize,
    /// Tasks allowed to wait for a slot before submissions are rejected.
    pub queue_capacity: usize,
}

impl PoolConfig {
    /// Create a pool sizing.
    pub const fn new(concurrency: usize, queue_capacity: usize) -> Self {
        Self {
            concurrency,
            queue_capacity,
        }
    }
}

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background pools accept work.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Email and user notification pool.
    #[serde(default = "default_notification_pool")]
    pub notification: PoolConfig,
    /// Document processing pool.
    #[serde(default = "default_document_pool")]
    pub document: PoolConfig,
    /// General purpose pool (batch coordination).
    #[serde(default = "default_general_pool")]
    pub general: PoolConfig,
    /// Fixed-size pool used by the executor demo.
    #[serde(default = "default_fixed_pool")]
    pub fixed: PoolConfig,
    /// Simulated email delivery time in milliseconds.
    #[serde(default = "default_email_delay")]
    pub email_delay_ms: u64,
    /// Simulated document processing time in milliseconds.
    #[serde(default = "default_document_delay")]
    pub document_delay_ms: u64,
    /// Simulated notification delivery time in milliseconds.
    #[serde(default = "default_notification_delay")]
    pub notification_delay_ms: u64,
    /// How long shutdown waits for in-flight tasks, in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            notification: default_notification_pool(),
            document: default_document_pool(),
            general: default_general_pool(),
            fixed: default_fixed_pool(),
            email_delay_ms: default_email_delay(),
            document_delay_ms: default_document_delay(),
            notification_delay_ms: default_notification_delay(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_notification_pool() -> PoolConfig {
    PoolConfig::new(5, 50)
}

fn default_document_pool() -> PoolConfig {
    PoolConfig::new(8, 200)
}

fn default_general_pool() -> PoolConfig {
    PoolConfig::new(10, 100)
}

fn default_fixed_pool() -> PoolConfig {
    PoolConfig::new(5, 100)
}

fn default_email_delay() -> u64 {
    2000
}

fn default_document_delay() -> u64 {
    3000
}

fn default_notification_delay() -> u64 {
    1000
}

fn default_shutdown_timeout() -> u64 {
    30
}
