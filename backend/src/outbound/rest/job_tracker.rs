//! REST-backed `JobTrackerRepository` adapter.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{JobTrackerRepository, ListOrder, RepositoryError};
use crate::domain::{JobTrackerPatch, JobTrackerRecord, NewJobTrackerRecord};

use super::transport::{IdEnvelope, RestTransport, map_error};

/// Repository adapter speaking to the façade's `/job-tracker` endpoints.
#[derive(Clone)]
pub struct RestJobTrackerRepository {
    transport: Arc<RestTransport>,
}

impl RestJobTrackerRepository {
    /// Create an adapter over a shared transport.
    pub fn new(transport: Arc<RestTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl JobTrackerRepository for RestJobTrackerRepository {
    async fn list_recent(
        &self,
        _order: ListOrder,
    ) -> Result<Vec<JobTrackerRecord>, RepositoryError> {
        // The façade applies the ordering fallback on its own side; both
        // requested orders map onto the same GET.
        self.transport
            .get_json("job-tracker")
            .await
            .map_err(|err| map_error(err, None))
    }

    async fn create(&self, record: &NewJobTrackerRecord) -> Result<Uuid, RepositoryError> {
        let envelope: IdEnvelope = self
            .transport
            .post_json("job-tracker", record)
            .await
            .map_err(|err| map_error(err, None))?;
        Ok(envelope.id)
    }

    async fn update(&self, id: Uuid, patch: &JobTrackerPatch) -> Result<Uuid, RepositoryError> {
        let envelope: IdEnvelope = self
            .transport
            .patch_json(&format!("job-tracker/{id}"), patch)
            .await
            .map_err(|err| map_error(err, Some(id)))?;
        Ok(envelope.id)
    }
}
