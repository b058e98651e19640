//! Bounded task pools built on semaphores and a task tracker.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use archive_core::config::PoolConfig;
use archive_core::error::AppError;

/// A named pool of background tasks.
///
/// A bounded pool holds two semaphores: `execution` caps how many tasks run
/// at once and `admission` caps running plus waiting tasks. Submitting past
/// the admission limit fails instead of blocking the caller. An elastic
/// pool has neither limit.
#[derive(Debug, Clone)]
pub struct TaskPool {
    /// Pool name used in logs and errors.
    name: &'static str,
    /// Running-task limit; `None` for elastic pools.
    execution: Option<Arc<Semaphore>>,
    /// Running-plus-queued limit; `None` for elastic pools.
    admission: Option<Arc<Semaphore>>,
    /// Tracks every spawned task for shutdown.
    tracker: TaskTracker,
}

impl TaskPool {
    /// Create a pool limited by `config`.
    pub fn bounded(name: &'static str, config: PoolConfig) -> Self {
        let concurrency = config.concurrency.max(1);
        info!(
            pool = name,
            concurrency,
            queue_capacity = config.queue_capacity,
            "Task pool created"
        );
        Self {
            name,
            execution: Some(Arc::new(Semaphore::new(concurrency))),
            admission: Some(Arc::new(Semaphore::new(concurrency + config.queue_capacity))),
            tracker: TaskTracker::new(),
        }
    }

    /// Create a pool without concurrency or queue limits.
    pub fn elastic(name: &'static str) -> Self {
        info!(pool = name, "Elastic task pool created");
        Self {
            name,
            execution: None,
            admission: None,
            tracker: TaskTracker::new(),
        }
    }

    /// Pool name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Submit a task; returns its handle at once.
    ///
    /// Fails with `ServiceUnavailable` when the pool is shutting down or
    /// its queue is full.
    pub fn submit<F, T>(&self, task: F) -> Result<JoinHandle<T>, AppError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.tracker.is_closed() {
            return Err(AppError::service_unavailable(format!(
                "The {} task pool is shutting down",
                self.name
            )));
        }

        let admitted = match &self.admission {
            Some(admission) => match Arc::clone(admission).try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    warn!(pool = self.name, "Task queue full, rejecting submission");
                    return Err(AppError::service_unavailable(format!(
                        "The {} task queue is full",
                        self.name
                    )));
                }
            },
            None => None,
        };

        let execution = self.execution.clone();
        let name = self.name;
        debug!(pool = name, in_flight = self.tracker.len(), "Task submitted");

        Ok(self.tracker.spawn(async move {
            let _admitted = admitted;
            let _running = match execution {
                Some(execution) => execution.acquire_owned().await.ok(),
                None => None,
            };
            task.await
        }))
    }

    /// Submissions the pool would admit right now; `None` when unlimited.
    pub fn available(&self) -> Option<usize> {
        self.admission.as_ref().map(|a| a.available_permits())
    }

    /// Tasks submitted and not yet finished.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Stop accepting work and wait for in-flight tasks.
    ///
    /// Returns `false` when `grace` elapsed first.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            info!(pool = self.name, pending, "Waiting for in-flight tasks");
        }
        let drained = tokio::time::timeout(grace, self.tracker.wait()).await.is_ok();
        if drained {
            info!(pool = self.name, "Task pool drained");
        } else {
            warn!(
                pool = self.name,
                remaining = self.tracker.len(),
                "Task pool shutdown timed out"
            );
        }
        drained
    }
}
