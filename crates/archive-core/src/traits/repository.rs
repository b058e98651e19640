//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic transactional CRUD contract.
///
/// Each entity has a strongly typed repository implementing this trait.
/// Entity-specific finders and aggregates are defined on the concrete
/// repository structs.
///
/// Absence is not an error: `find_by_id` returns `Ok(None)` and
/// `delete_by_id` returns `Ok(false)` when no row matches.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Entity>>;

    /// List every entity, newest first.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Insert (no identifier) or update (existing identifier) inside a
    /// single transaction and return the stored entity.
    async fn save(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: Id) -> AppResult<bool>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}
