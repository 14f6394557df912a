//! REST-backed `MroJobRepository` adapter.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{MroJobRepository, RepositoryError};
use crate::domain::{MroJob, MroJobPatch, NewMroJob};

use super::transport::{IdEnvelope, RestTransport, map_error};

/// Repository adapter speaking to the façade's `/mro` endpoints.
#[derive(Clone)]
pub struct RestMroJobRepository {
    transport: Arc<RestTransport>,
}

impl RestMroJobRepository {
    /// Create an adapter over a shared transport.
    pub fn new(transport: Arc<RestTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl MroJobRepository for RestMroJobRepository {
    async fn list_recent(&self) -> Result<Vec<MroJob>, RepositoryError> {
        self.transport
            .get_json("mro")
            .await
            .map_err(|err| map_error(err, None))
    }

    async fn create(&self, job: &NewMroJob) -> Result<Uuid, RepositoryError> {
        let envelope: IdEnvelope = self
            .transport
            .post_json("mro", job)
            .await
            .map_err(|err| map_error(err, None))?;
        Ok(envelope.id)
    }

    async fn update(&self, id: Uuid, patch: &MroJobPatch) -> Result<Uuid, RepositoryError> {
        let envelope: IdEnvelope = self
            .transport
            .patch_json(&format!("mro/{id}"), patch)
            .await
            .map_err(|err| map_error(err, Some(id)))?;
        Ok(envelope.id)
    }
}
