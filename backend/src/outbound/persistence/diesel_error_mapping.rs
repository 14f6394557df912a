//! Shared Diesel-to-port error mapping.

use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures into the repository connection variant.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

/// Map Diesel failures into repository error variants.
///
/// Constraint violations become conflicts so the façade can answer 409;
/// closed connections become connection errors; everything else is a query
/// error. Messages stay generic; the precise cause goes to the debug log,
/// not to clients.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation,
            _,
        ) => RepositoryError::conflict("database constraint violation"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        _ => RepositoryError::query("database error"),
    }
}
