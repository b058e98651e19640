//! Annotation repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use archive_core::error::{AppError, DbOperation};
use archive_core::result::AppResult;
use archive_core::traits::Repository;
use archive_core::types::{AnnotationId, DocumentId, UserId};
use archive_entity::annotation::Annotation;

use crate::error::{map_sqlx_error, select_error};
use crate::transaction::ScopedTransaction;

const ENTITY: &str = "Annotation";

const COLUMNS: &str = "id, document_id, user_id, content, page, position_x, position_y, \
                       annotation_type, created_at, updated_at";

/// Repository for document annotations.
#[derive(Debug, Clone)]
pub struct AnnotationRepository {
    pool: SqlitePool,
}

impl AnnotationRepository {
    /// Create a new annotation repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Annotations on a document, in page order.
    pub async fn find_by_document(&self, document_id: DocumentId) -> AppResult<Vec<Annotation>> {
        sqlx::query_as::<_, Annotation>(&format!(
            "SELECT {COLUMNS} FROM annotations WHERE document_id = ? \
             ORDER BY page ASC, created_at ASC, id ASC"
        ))
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// Annotations written by a user, newest first.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Annotation>> {
        sqlx::query_as::<_, Annotation>(&format!(
            "SELECT {COLUMNS} FROM annotations WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    pub async fn count_by_document(&self, document_id: DocumentId) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM annotations WHERE document_id = ?")
                .bind(document_id)
                .fetch_one(&self.pool)
                .await
                .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }

    pub async fn count_by_user(&self, user_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM annotations WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }

    async fn insert(conn: &mut SqliteConnection, a: &Annotation) -> AppResult<Annotation> {
        let now = Utc::now();
        let done = sqlx::query(
            "INSERT INTO annotations (document_id, user_id, content, page, position_x, position_y, \
             annotation_type, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(a.document_id)
        .bind(a.user_id)
        .bind(&a.content)
        .bind(a.page)
        .bind(a.position_x)
        .bind(a.position_y)
        .bind(a.annotation_type)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Insert, ENTITY, None))?;

        if done.rows_affected() == 0 {
            return Err(AppError::insert_failed(ENTITY));
        }
        Self::read_back(conn, AnnotationId(done.last_insert_rowid()), DbOperation::Insert).await
    }

    // Document and author are fixed once written.
    async fn update(
        conn: &mut SqliteConnection,
        id: AnnotationId,
        a: &Annotation,
    ) -> AppResult<Annotation> {
        let done = sqlx::query(
            "UPDATE annotations SET content = ?, page = ?, position_x = ?, position_y = ?, \
             annotation_type = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&a.content)
        .bind(a.page)
        .bind(a.position_x)
        .bind(a.position_y)
        .bind(a.annotation_type)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string())))?;

        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Annotation with ID: {id} not found")));
        }
        Self::read_back(conn, id, DbOperation::Update).await
    }

    async fn read_back(
        conn: &mut SqliteConnection,
        id: AnnotationId,
        operation: DbOperation,
    ) -> AppResult<Annotation> {
        sqlx::query_as::<_, Annotation>(&format!("SELECT {COLUMNS} FROM annotations WHERE id = ?"))
            .bind(id)
            .fetch_one(conn)
            .await
            .map_err(|e| map_sqlx_error(e, operation, ENTITY, Some(id.to_string())))
    }
}

#[async_trait]
impl Repository<Annotation, AnnotationId> for AnnotationRepository {
    async fn find_by_id(&self, id: AnnotationId) -> AppResult<Option<Annotation>> {
        sqlx::query_as::<_, Annotation>(&format!("SELECT {COLUMNS} FROM annotations WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(select_error(ENTITY))
    }

    async fn find_all(&self) -> AppResult<Vec<Annotation>> {
        sqlx::query_as::<_, Annotation>(&format!(
            "SELECT {COLUMNS} FROM annotations ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    async fn save(&self, annotation: &Annotation) -> AppResult<Annotation> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let (operation, outcome) = match annotation.id {
            None => (DbOperation::Insert, Self::insert(tx.conn(), annotation).await),
            Some(id) => (DbOperation::Update, Self::update(tx.conn(), id, annotation).await),
        };
        tx.finish(operation, outcome).await
    }

    async fn delete_by_id(&self, id: AnnotationId) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome = sqlx::query("DELETE FROM annotations WHERE id = ?")
            .bind(id)
            .execute(tx.conn())
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| map_sqlx_error(e, DbOperation::Delete, ENTITY, Some(id.to_string())));
        tx.finish(DbOperation::Delete, outcome).await
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM annotations")
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }
}
