//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use archive_core::error::{AppError, DbOperation};
use archive_core::result::AppResult;
use archive_core::traits::Repository;
use archive_core::types::UserId;
use archive_entity::user::{AccessLevel, User, UserRole, UserStatus};

use crate::error::{map_sqlx_error, select_error};
use crate::transaction::ScopedTransaction;

const ENTITY: &str = "User";

const COLUMNS: &str =
    "id, name, email, password_hash, role, status, access_level, created_at, updated_at";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER(?)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// List users with the given role, newest first.
    pub async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE role = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// List users with the given status, newest first.
    pub async fn find_by_status(&self, status: UserStatus) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE status = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    /// Change a user's approval status. Returns `false` if no such user.
    pub async fn update_status(&self, id: UserId, status: UserStatus) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome = sqlx::query("UPDATE users SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(tx.conn())
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string())));
        tx.finish(DbOperation::Update, outcome).await
    }

    /// Change a user's status and access level together. Returns `false` if
    /// no such user.
    pub async fn update_access(
        &self,
        id: UserId,
        status: UserStatus,
        access_level: AccessLevel,
    ) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome = sqlx::query(
            "UPDATE users SET status = ?, access_level = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status)
        .bind(access_level)
        .bind(Utc::now())
        .bind(id)
        .execute(tx.conn())
        .await
        .map(|r| r.rows_affected() > 0)
        .map_err(|e| map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string())));
        tx.finish(DbOperation::Update, outcome).await
    }

    /// Change a user's role and access level together. Returns `false` if
    /// no such user.
    pub async fn update_role(
        &self,
        id: UserId,
        role: UserRole,
        access_level: AccessLevel,
    ) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome =
            sqlx::query("UPDATE users SET role = ?, access_level = ?, updated_at = ? WHERE id = ?")
                .bind(role)
                .bind(access_level)
                .bind(Utc::now())
                .bind(id)
                .execute(tx.conn())
                .await
                .map(|r| r.rows_affected() > 0)
                .map_err(|e| {
                    map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string()))
                });
        tx.finish(DbOperation::Update, outcome).await
    }

    /// Count users with the given status.
    pub async fn count_by_status(&self, status: UserStatus) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE status = ?")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }

    async fn insert(conn: &mut SqliteConnection, user: &User) -> AppResult<User> {
        let now = Utc::now();
        let done = sqlx::query(
            "INSERT INTO users (name, email, password_hash, role, status, access_level, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.status)
        .bind(user.access_level)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Insert, ENTITY, None))?;

        if done.rows_affected() == 0 {
            return Err(AppError::insert_failed(ENTITY));
        }
        let id = UserId(done.last_insert_rowid());
        Self::read_back(conn, id, DbOperation::Insert).await
    }

    async fn update(conn: &mut SqliteConnection, id: UserId, user: &User) -> AppResult<User> {
        let done = sqlx::query(
            "UPDATE users SET name = ?, email = ?, password_hash = ?, role = ?, status = ?, \
             access_level = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.status)
        .bind(user.access_level)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, DbOperation::Update, ENTITY, Some(id.to_string())))?;

        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User with ID: {id} not found")));
        }
        Self::read_back(conn, id, DbOperation::Update).await
    }

    async fn read_back(
        conn: &mut SqliteConnection,
        id: UserId,
        operation: DbOperation,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_one(conn)
            .await
            .map_err(|e| map_sqlx_error(e, operation, ENTITY, Some(id.to_string())))
    }
}

#[async_trait]
impl Repository<User, UserId> for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(select_error(ENTITY))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(select_error(ENTITY))
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let (operation, outcome) = match user.id {
            None => (DbOperation::Insert, Self::insert(tx.conn(), user).await),
            Some(id) => (DbOperation::Update, Self::update(tx.conn(), id, user).await),
        };
        tx.finish(operation, outcome).await
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<bool> {
        let mut tx = ScopedTransaction::begin(&self.pool, ENTITY).await?;
        let outcome = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(tx.conn())
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| map_sqlx_error(e, DbOperation::Delete, ENTITY, Some(id.to_string())));
        tx.finish(DbOperation::Delete, outcome).await
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(select_error(ENTITY))?;
        Ok(count as u64)
    }
}
