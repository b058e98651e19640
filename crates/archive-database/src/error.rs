//! Mapping of sqlx failures into [`AppError`]s with persistence context.

use archive_core::error::{AppError, DbOperation};

/// Translate a failed statement into an application error.
///
/// Unique violations become conflicts on any operation, and so do
/// foreign-key violations on delete (the row is still referenced).
/// Everything else is a persistence error naming `operation` and `entity`.
pub fn map_sqlx_error(
    err: sqlx::Error,
    operation: DbOperation,
    entity: &str,
    entity_id: Option<String>,
) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::conflict(format!("{entity} already exists")).caused_by(err);
        }
        if db_err.is_foreign_key_violation() && operation == DbOperation::Delete {
            let id = entity_id.as_deref().unwrap_or("?");
            return AppError::conflict(format!(
                "{entity} with ID: {id} is still referenced and cannot be deleted"
            ))
            .caused_by(err);
        }
    }

    let base = match (operation, entity_id) {
        (DbOperation::Insert, _) => AppError::insert_failed(entity),
        (DbOperation::Update, Some(id)) => AppError::update_failed(entity, id),
        (DbOperation::Delete, Some(id)) => AppError::delete_failed(entity, id),
        (op, id) => AppError::persistence(
            op,
            entity,
            id,
            format!("Failed to retrieve {entity} from database"),
        ),
    };
    base.caused_by(err)
}

/// Shorthand for a failed read.
pub fn select_error(entity: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| map_sqlx_error(e, DbOperation::Select, entity, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_core::error::{ErrorContext, ErrorKind};

    #[test]
    fn test_row_not_found_on_update_is_persistence() {
        let err = map_sqlx_error(
            sqlx::Error::RowNotFound,
            DbOperation::Update,
            "Document",
            Some("3".into()),
        );
        assert_eq!(err.kind, ErrorKind::Persistence);
        assert_eq!(err.message, "Failed to update Document with ID: 3");
        assert!(err.source.is_some());
    }

    #[test]
    fn test_select_error_names_entity() {
        let err = select_error("Feedback")(sqlx::Error::PoolTimedOut);
        assert!(matches!(
            err.context,
            Some(ErrorContext::Persistence { operation: DbOperation::Select, ref entity, .. })
                if entity == "Feedback"
        ));
    }
}
