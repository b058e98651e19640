//! Async task service: email, notification and document processing tasks
//! running on injected pools, plus the shared state they update.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use archive_core::config::WorkerConfig;
use archive_core::error::AppError;

use crate::pool::TaskPool;

/// Tasks submitted to the fixed pool by [`AsyncTaskService::executor_demo`].
pub const FIXED_DEMO_TASKS: usize = 5;

/// Tasks submitted to the elastic pool by [`AsyncTaskService::executor_demo`].
pub const ELASTIC_DEMO_TASKS: usize = 3;

const DEMO_EMAIL_BODY: &str = "This is a demo email from Paperless Archive";

/// The pools a task service submits to.
#[derive(Debug, Clone)]
pub struct TaskPools {
    /// Emails and user notifications.
    pub notification: TaskPool,
    /// Document processing.
    pub document: TaskPool,
    /// Batch coordination.
    pub general: TaskPool,
    /// Fixed-size demo pool.
    pub fixed: TaskPool,
    /// Unbounded demo pool.
    pub elastic: TaskPool,
}

impl TaskPools {
    /// Build every pool from configuration.
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self {
            notification: TaskPool::bounded("notification", config.notification),
            document: TaskPool::bounded("document", config.document),
            general: TaskPool::bounded("general", config.general),
            fixed: TaskPool::bounded("fixed", config.fixed),
            elastic: TaskPool::elastic("elastic"),
        }
    }

    fn all(&self) -> [&TaskPool; 5] {
        [
            &self.general,
            &self.document,
            &self.notification,
            &self.fixed,
            &self.elastic,
        ]
    }
}

/// Snapshot of the task service state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_tasks: u64,
    pub task_results: HashMap<String, String>,
    pub notifications: Vec<String>,
    pub cache_size: usize,
}

#[derive(Debug)]
struct TaskState {
    /// Completed tasks.
    completed: AtomicU64,
    /// `email_<n>` and `doc_<id>` results.
    results: DashMap<String, String>,
    /// Notification log lines.
    notifications: RwLock<Vec<String>>,
    /// Processed documents by id.
    cache: RwLock<HashMap<String, String>>,
}

/// Fire-and-forget background tasks.
///
/// Cloning is cheap; clones share pools and state.
#[derive(Debug, Clone)]
pub struct AsyncTaskService {
    pools: TaskPools,
    state: Arc<TaskState>,
    config: Arc<WorkerConfig>,
}

impl AsyncTaskService {
    /// Creates a task service over the given pools.
    pub fn new(pools: TaskPools, config: WorkerConfig) -> Self {
        Self {
            pools,
            state: Arc::new(TaskState {
                completed: AtomicU64::new(0),
                results: DashMap::new(),
                notifications: RwLock::new(Vec::new()),
                cache: RwLock::new(HashMap::new()),
            }),
            config: Arc::new(config),
        }
    }

    /// Creates a task service with pools sized from configuration.
    pub fn from_config(config: WorkerConfig) -> Self {
        Self::new(TaskPools::from_config(&config), config)
    }

    fn ensure_enabled(&self) -> Result<(), AppError> {
        if self.config.enabled {
            Ok(())
        } else {
            Err(AppError::service_unavailable("Background tasks are disabled"))
        }
    }

    /// Send an email on the notification pool.
    pub fn send_email(
        &self,
        recipient: impl Into<String>,
        subject: impl Into<String>,
    ) -> Result<JoinHandle<String>, AppError> {
        self.ensure_enabled()?;
        let (recipient, subject) = (recipient.into(), subject.into());
        let state = Arc::clone(&self.state);
        let delay = Duration::from_millis(self.config.email_delay_ms);

        self.pools.notification.submit(async move {
            info!(recipient = %recipient, subject = %subject, "Sending email");
            debug!(body = DEMO_EMAIL_BODY, "Email body");
            tokio::time::sleep(delay).await;

            let result = format!("Email sent to {recipient} with subject: {subject}");
            let n = state.completed.fetch_add(1, Ordering::SeqCst) + 1;
            state.results.insert(format!("email_{n}"), result.clone());
            info!(recipient = %recipient, "Email sent");
            result
        })
    }

    /// Process a document on the document pool and cache the outcome.
    pub fn process_document(
        &self,
        document_id: impl Into<String>,
        operation: impl Into<String>,
    ) -> Result<JoinHandle<String>, AppError> {
        self.ensure_enabled()?;
        let (document_id, operation) = (document_id.into(), operation.into());
        let state = Arc::clone(&self.state);
        let delay = Duration::from_millis(self.config.document_delay_ms);

        self.pools.document.submit(async move {
            info!(document_id = %document_id, operation = %operation, "Processing document");
            tokio::time::sleep(delay).await;

            let result = format!("Document {document_id} processed with operation: {operation}");
            state.results.insert(format!("doc_{document_id}"), result.clone());
            state
                .cache
                .write()
                .await
                .insert(document_id.clone(), result.clone());
            state.completed.fetch_add(1, Ordering::SeqCst);
            info!(document_id = %document_id, "Document processing completed");
            result
        })
    }

    /// Log and deliver a user notification on the notification pool.
    pub fn send_notification(
        &self,
        user_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<JoinHandle<()>, AppError> {
        self.ensure_enabled()?;
        let (user_id, message) = (user_id.into(), message.into());
        let state = Arc::clone(&self.state);
        let delay = Duration::from_millis(self.config.notification_delay_ms);

        self.pools.notification.submit(async move {
            info!(user_id = %user_id, "Sending notification");
            let line = format!(
                "User: {user_id}, Message: {message}, Time: {}",
                Utc::now().timestamp_millis()
            );
            state.notifications.write().await.push(line);
            tokio::time::sleep(delay).await;
            state.completed.fetch_add(1, Ordering::SeqCst);
            info!(user_id = %user_id, "Notification sent");
        })
    }

    /// Fan out processing of every document and join on the general pool.
    ///
    /// The whole batch is refused when the document pool cannot admit
    /// every item. The summary counts the documents actually processed.
    pub fn batch_process(&self, document_ids: Vec<String>) -> Result<JoinHandle<String>, AppError> {
        self.ensure_enabled()?;
        if document_ids.is_empty() {
            return Err(AppError::validation("No document IDs provided"));
        }

        let count = document_ids.len();
        if let Some(free) = self.pools.document.available() {
            if count > free {
                warn!(count, free, "Batch rejected: document queue too small");
                return Err(AppError::service_unavailable(format!(
                    "The document task queue cannot take {count} documents ({free} free)"
                )));
            }
        }

        info!(count, "Starting batch processing");
        let mut handles = Vec::with_capacity(count);
        for id in document_ids {
            match self.process_document(id.clone(), "batch") {
                Ok(handle) => handles.push(handle),
                Err(e) => warn!(document_id = %id, error = %e, "Batch item rejected"),
            }
        }

        self.pools.general.submit(async move {
            let mut processed = 0usize;
            for outcome in futures::future::join_all(handles).await {
                match outcome {
                    Ok(_) => processed += 1,
                    Err(e) => warn!(error = %e, "Batch item failed"),
                }
            }

            if processed < count {
                warn!(count, processed, "Batch finished with missing documents");
            } else {
                info!(count, "Batch processing completed");
            }
            format!("Batch processing completed for {processed} documents")
        })
    }

    /// Cached processing result for a document.
    pub async fn cached_document(&self, document_id: &str) -> Option<String> {
        debug!(document_id = %document_id, "Reading document from cache");
        self.state.cache.read().await.get(document_id).cloned()
    }

    /// Drop every cached processing result.
    pub async fn clear_cache(&self) {
        info!("Clearing document cache");
        self.state.cache.write().await.clear();
    }

    /// Completed tasks so far.
    pub fn task_count(&self) -> u64 {
        self.state.completed.load(Ordering::SeqCst)
    }

    /// Copy of the task results.
    pub fn task_results(&self) -> HashMap<String, String> {
        self.state
            .results
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Copy of the notification log.
    pub async fn notifications(&self) -> Vec<String> {
        self.state.notifications.read().await.clone()
    }

    /// Number of cached documents.
    pub async fn cache_size(&self) -> usize {
        self.state.cache.read().await.len()
    }

    /// All counters and logs at once.
    pub async fn stats(&self) -> TaskStats {
        TaskStats {
            total_tasks: self.task_count(),
            task_results: self.task_results(),
            notifications: self.notifications().await,
            cache_size: self.cache_size().await,
        }
    }

    /// Submit short demo tasks to the fixed and elastic pools.
    ///
    /// Returns how many tasks went to each pool.
    pub fn executor_demo(&self) -> Result<(usize, usize), AppError> {
        self.ensure_enabled()?;
        for task in 1..=FIXED_DEMO_TASKS {
            self.pools.fixed.submit(async move {
                info!(pool = "fixed", task, "Demo task executing");
                tokio::time::sleep(Duration::from_secs(1)).await;
            })?;
        }
        for task in 1..=ELASTIC_DEMO_TASKS {
            self.pools.elastic.submit(async move {
                info!(pool = "elastic", task, "Demo task executing");
            })?;
        }
        Ok((FIXED_DEMO_TASKS, ELASTIC_DEMO_TASKS))
    }

    /// Stop every pool, waiting up to the configured grace period.
    pub async fn shutdown(&self) -> bool {
        let grace = Duration::from_secs(self.config.shutdown_timeout_seconds);
        info!(grace_seconds = grace.as_secs(), "Shutting down task pools");
        let mut drained = true;
        for pool in self.pools.all() {
            drained &= pool.shutdown(grace).await;
        }
        drained
    }
}
