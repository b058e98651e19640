//! Scoped transaction guard shared by all repositories.
//!
//! A [`ScopedTransaction`] owns one pooled connection for the duration of a
//! write. It ends in exactly one of three ways: [`ScopedTransaction::commit`],
//! [`ScopedTransaction::abort`], or being dropped, in which case sqlx rolls
//! the transaction back and returns the connection to the pool.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, error};

use archive_core::error::{AppError, DbOperation};
use archive_core::result::AppResult;

use crate::error::map_sqlx_error;

/// An open write transaction on behalf of one entity type.
#[derive(Debug)]
pub struct ScopedTransaction {
    tx: Transaction<'static, Sqlite>,
    entity: &'static str,
}

impl ScopedTransaction {
    /// Acquire a connection and `BEGIN`.
    pub async fn begin(pool: &SqlitePool, entity: &'static str) -> AppResult<Self> {
        let tx = pool.begin().await.map_err(|e| {
            AppError::persistence(
                DbOperation::Select,
                entity,
                None,
                format!("Failed to begin transaction for {entity}"),
            )
            .caused_by(e)
        })?;
        debug!(entity, "Transaction started");
        Ok(Self { tx, entity })
    }

    /// The connection to run statements on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// `COMMIT`. A failed commit leaves nothing applied.
    pub async fn commit(self, operation: DbOperation) -> AppResult<()> {
        let entity = self.entity;
        self.tx
            .commit()
            .await
            .map_err(|e| map_sqlx_error(e, operation, entity, None))?;
        debug!(entity, %operation, "Transaction committed");
        Ok(())
    }

    /// `ROLLBACK` after `cause`, returning the error to propagate.
    ///
    /// When the rollback itself fails the caller gets a
    /// [`AppError::rollback_failed`] instead, and `cause` is logged.
    pub async fn abort(self, cause: AppError) -> AppError {
        let entity = self.entity;
        match self.tx.rollback().await {
            Ok(()) => {
                debug!(entity, error = %cause, "Transaction rolled back");
                cause
            }
            Err(e) => {
                error!(entity, original = %cause, error = %e, "Rollback failed");
                AppError::rollback_failed().caused_by(e)
            }
        }
    }

    /// Commit on `Ok`, roll back on `Err`.
    pub async fn finish<T>(self, operation: DbOperation, outcome: AppResult<T>) -> AppResult<T> {
        match outcome {
            Ok(value) => {
                self.commit(operation).await?;
                Ok(value)
            }
            Err(err) => Err(self.abort(err).await),
        }
    }
}
