//! Document repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use archive_core::error::{AppError, DbOperation};
use archive_core::result::AppResult;
use archive_core::traits::Repository;
use archive_core::types::{DocumentId, UserId};
use archive_entity::document::ArchiveDocument;

use crate::error::{map_sqlx_error, select_error};
use crate::transaction::ScopedTransaction;

const ENTITY: &str = "Document";

const COLUMNS: &str = "id, title, description, category, tags, access_level, file_name, \
                       file_path, file_size, mime_type, uploader_id, created_at, updated_at";

/// Repository for archived documents.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List documents uploaded by a user, newest first.
    pub async fn find_by_uploader(&self, uploader_id: UserId) -> AppResult<Vec<ArchiveDocument>> {
        sqlx::query_as::<_, ArchiveDocument>(&format!(
            "SELECT {COLUMNS} FROM documents WHERE uploader_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(uploader_id)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// List documents in a category, newest first.
    pub async fn find_by_category(&self, category: &str) -> AppResult<Vec<ArchiveDocument>> {
        sqlx::query_as::<_, ArchiveDocument>(&format!(
            "SELECT {COLUMNS} FROM documents WHERE category = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// Case-sensitive substring search on the title.
    pub async fn search_by_title(&self, fragment: &str) -> AppResult<Vec<ArchiveDocument>> {
        sqlx::query_as::<_, ArchiveDocument>(&format!(
            "SELECT {COLUMNS} FROM documents WHERE instr(title, ?) > 0 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// Number of documents uploaded by a user.
    pub async fn count_by_uploader(&self, uploader_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE uploader_id = ?")
            .bind(uploader_id)
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }

    /// Total bytes uploaded by a user.
    pub async fn total_size_by_uploader(&self, uploader_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COALESCE(SUM(file_size), 0) FROM documents WHERE uploader_id = ?")
            .bind(uploader_id)
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))
    }

    async fn insert(conn: &mut SqliteConnection, doc: &ArchiveDocument) -> AppResult<ArchiveDocument> {
        let now = Utc::now();
        let done = sqlx::query(
            "INSERT INTO documents (title, description, category, tags, access_level, file_name, \
             file_path, file_size, mime_type, uploader_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&doc.title)
        .bind(&doc.description)
        .bind(&doc.category)
        .bind(&doc.tags)
        .bind(doc.access_level)
        .bind(&doc.file_name)
        .bind(&doc.file_path)
        .bind(doc.file_size)
        .bind(&doc.mime_type)
        .bind(doc.uploader_id)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Insert, ENTITY, None))?;

        if done.rows_affected() == 0 {
            return Err(AppError::insert_failed(ENTITY));
        }
        Self::read_back(conn, DocumentId(done.last_insert_rowid()), DbOperation::Insert).await
    }

    async fn update(
        conn: &mut SqliteConnection,
        id: DocumentId,
        doc: &ArchiveDocument,
    ) -> AppResult<ArchiveDocument> {
        let done = sqlx::query(
            "UPDATE documents SET title = ?, description = ?, category = ?, tags = ?, \
             access_level = ?, file_name = ?, file_path = ?, file_size = ?, mime_type = ?, \
             uploader_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&doc.title)
        .bind(&doc.description)
        .bind(&doc.category)
        .bind(&doc.tags)
        .bind(doc.access_level)
        .bind(&doc.file_name)
        .bind(&doc.file_path)
        .bind(doc.file_size)
        .bind(&doc.mime_type)
        .bind(doc.uploader_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string())))?;

        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Document with ID: {id} not found")));
        }
        Self::read_back(conn, id, DbOperation::Update).await
    }

    async fn read_back(
        conn: &mut SqliteConnection,
        id: DocumentId,
        operation: DbOperation,
    ) -> AppResult<ArchiveDocument> {
        sqlx::query_as::<_, ArchiveDocument>(&format!("SELECT {COLUMNS} FROM documents WHERE id = ?"))
            .bind(id)
            .fetch_one(conn)
            .await
            .map_err(|e| map_sqlx_error(e, operation, ENTITY, Some(id.to_string())))
    }
}

#[async_trait]
impl Repository<ArchiveDocument, DocumentId> for DocumentRepository {
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<ArchiveDocument>> {
        sqlx::query_as::<_, ArchiveDocument>(&format!("SELECT {COLUMNS} FROM documents WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(select_error(ENTITY))
    }

    async fn find_all(&self) -> AppResult<Vec<ArchiveDocument>> {
        sqlx::query_as::<_, ArchiveDocument>(&format!(
            "SELECT {COLUMNS} FROM documents ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    async fn save(&self, doc: &ArchiveDocument) -> AppResult<ArchiveDocument> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let (operation, outcome) = match doc.id {
            None => (DbOperation::Insert, Self::insert(tx.conn(), doc).await),
            Some(id) => (DbOperation::Update, Self::update(tx.conn(), id, doc).await),
        };
        tx.finish(operation, outcome).await
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(tx.conn())
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| map_sqlx_error(e, DbOperation::Delete, ENTITY, Some(id.to_string())));
        tx.finish(DbOperation::Delete, outcome).await
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }
}
