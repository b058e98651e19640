//! Feedback repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use archive_core::error::{AppError, DbOperation};
use archive_core::result::AppResult;
use archive_core::traits::Repository;
use archive_core::types::{DocumentId, FeedbackId, UserId};
use archive_entity::feedback::{Feedback, FeedbackStatus};

use crate::error::{map_sqlx_error, select_error};
use crate::transaction::ScopedTransaction;

const ENTITY: &str = "Feedback";

const COLUMNS: &str =
    "id, user_id, document_id, subject, message, status, priority, created_at, updated_at";

/// Repository for user feedback.
#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    pool: SqlitePool,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {COLUMNS} FROM feedback WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    pub async fn find_by_document(&self, document_id: DocumentId) -> AppResult<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {COLUMNS} FROM feedback WHERE document_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    pub async fn find_by_status(&self, status: FeedbackStatus) -> AppResult<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {COLUMNS} FROM feedback WHERE status = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    async fn insert(conn: &mut SqliteConnection, f: &Feedback) -> AppResult<Feedback> {
        let now = Utc::now();
        let done = sqlx::query(
            "INSERT INTO feedback (user_id, document_id, subject, message, status, priority, \
             created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(f.user_id)
        .bind(f.document_id)
        .bind(&f.subject)
        .bind(&f.message)
        .bind(f.status)
        .bind(f.priority)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Insert, ENTITY, None))?;

        if done.rows_affected() == 0 {
            return Err(AppError::insert_failed(ENTITY));
        }
        Self::read_back(conn, FeedbackId(done.last_insert_rowid()), DbOperation::Insert).await
    }

    async fn update(conn: &mut SqliteConnection, id: FeedbackId, f: &Feedback) -> AppResult<Feedback> {
        let done = sqlx::query(
            "UPDATE feedback SET subject = ?, message = ?, status = ?, priority = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&f.subject)
        .bind(&f.message)
        .bind(f.status)
        .bind(f.priority)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string())))?;

        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Feedback with ID: {id} not found")));
        }
        Self::read_back(conn, id, DbOperation::Update).await
    }

    async fn read_back(
        conn: &mut SqliteConnection,
        id: FeedbackId,
        operation: DbOperation,
    ) -> AppResult<Feedback> {
        sqlx::query_as::<_, Feedback>(&format!("SELECT {COLUMNS} FROM feedback WHERE id = ?"))
            .bind(id)
            .fetch_one(conn)
            .await
            .map_err(|e| map_sqlx_error(e, operation, ENTITY, Some(id.to_string())))
    }
}

#[async_trait]
impl Repository<Feedback, FeedbackId> for FeedbackRepository {
    async fn find_by_id(&self, id: FeedbackId) -> AppResult<Option<Feedback>> {
        sqlx::query_as::<_, Feedback>(&format!("SELECT {COLUMNS} FROM feedback WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(select_error(ENTITY))
    }

    async fn find_all(&self) -> AppResult<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {COLUMNS} FROM feedback ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    async fn save(&self, feedback: &Feedback) -> AppResult<Feedback> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let (operation, outcome) = match feedback.id {
            None => (DbOperation::Insert, Self::insert(tx.conn(), feedback).await),
            Some(id) => (DbOperation::Update, Self::update(tx.conn(), id, feedback).await),
        };
        tx.finish(operation, outcome).await
    }

    async fn delete_by_id(&self, id: FeedbackId) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome = sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(id)
            .execute(tx.conn())
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| map_sqlx_error(e, DbOperation::Delete, ENTITY, Some(id.to_string())));
        tx.finish(DbOperation::Delete, outcome).await
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }
}
