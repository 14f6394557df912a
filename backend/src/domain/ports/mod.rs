//! Domain ports for the hexagonal boundary.
//!
//! Each repository port is implemented twice: by the Diesel persistence
//! adapter (direct store) and by the reqwest REST adapter (HTTP façade).
//! Which pair serves a process is decided once at startup.

mod job_tracker_repository;
mod mro_job_repository;

#[cfg(test)]
pub use job_tracker_repository::MockJobTrackerRepository;
pub use job_tracker_repository::{FixtureJobTrackerRepository, JobTrackerRepository};
#[cfg(test)]
pub use mro_job_repository::MockMroJobRepository;
pub use mro_job_repository::{FixtureMroJobRepository, MroJobRepository};

use uuid::Uuid;

/// Errors raised by repository adapters.
///
/// Both entity ports share the same failure surface: CRUD over a relational
/// store, where only connectivity, query execution, constraint conflicts,
/// and missing rows can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store could not be reached or the pool was exhausted.
    #[error("repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A constraint rejected the write.
    #[error("repository write conflicted: {message}")]
    Conflict {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// An update matched no row.
    #[error("no row matched id {id}")]
    NotFound {
        /// The identifier that matched nothing.
        id: Uuid,
    },
}

impl RepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given id.
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }
}

/// Ordering requested from a list read.
///
/// The unordered variant exists for the job tracker fallback: when the
/// ordering column is unavailable the same capped read is retried without an
/// `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Newest rows first, by creation time.
    NewestFirst,
    /// Whatever order the store returns.
    Unordered,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    fn constructors_accept_str_for_message_fields() {
        let err = RepositoryError::query("broken sql");
        assert_eq!(err.to_string(), "repository query failed: broken sql");
    }

    #[rstest]
    fn not_found_formats_the_id() {
        let id = Uuid::new_v4();
        assert!(
            RepositoryError::not_found(id)
                .to_string()
                .contains(&id.to_string())
        );
    }
}
