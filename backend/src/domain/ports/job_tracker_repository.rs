//! Port for job tracker persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{JobTrackerPatch, JobTrackerRecord, NewJobTrackerRecord};

use super::{ListOrder, RepositoryError};

/// Port for reading and mutating job tracker records.
///
/// List reads are capped at [`crate::domain::JOB_TRACKER_LIST_LIMIT`] rows.
/// Callers request [`ListOrder::NewestFirst`] and fall back to
/// [`ListOrder::Unordered`] when the ordered read fails; adapters must not
/// retry on their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobTrackerRepository: Send + Sync {
    /// Read the most recent records with the requested ordering.
    async fn list_recent(&self, order: ListOrder)
    -> Result<Vec<JobTrackerRecord>, RepositoryError>;

    /// Insert a record and return the server-generated id.
    async fn create(&self, record: &NewJobTrackerRecord) -> Result<Uuid, RepositoryError>;

    /// Apply a partial update to the record with the given id.
    async fn update(&self, id: Uuid, patch: &JobTrackerPatch) -> Result<Uuid, RepositoryError>;
}

/// Fixture implementation for tests that do not exercise tracker persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJobTrackerRepository;

#[async_trait]
impl JobTrackerRepository for FixtureJobTrackerRepository {
    async fn list_recent(
        &self,
        _order: ListOrder,
    ) -> Result<Vec<JobTrackerRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, _record: &NewJobTrackerRecord) -> Result<Uuid, RepositoryError> {
        Ok(Uuid::new_v4())
    }

    async fn update(&self, id: Uuid, _patch: &JobTrackerPatch) -> Result<Uuid, RepositoryError> {
        Ok(id)
    }
}
