//! Port for MRO job persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MroJob, MroJobPatch, NewMroJob};

use super::RepositoryError;

/// Port for reading and mutating MRO jobs.
///
/// List reads are capped at [`crate::domain::MRO_JOB_LIST_LIMIT`] rows,
/// newest first. Updates are partial and keyed by id; an id that matches no
/// row surfaces as [`RepositoryError::NotFound`] rather than succeeding
/// silently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MroJobRepository: Send + Sync {
    /// Read the most recent jobs, newest first.
    async fn list_recent(&self) -> Result<Vec<MroJob>, RepositoryError>;

    /// Insert a job and return the server-generated id.
    async fn create(&self, job: &NewMroJob) -> Result<Uuid, RepositoryError>;

    /// Apply a partial update to the job with the given id.
    async fn update(&self, id: Uuid, patch: &MroJobPatch) -> Result<Uuid, RepositoryError>;
}

/// Fixture implementation for tests that do not exercise MRO persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMroJobRepository;

#[async_trait]
impl MroJobRepository for FixtureMroJobRepository {
    async fn list_recent(&self) -> Result<Vec<MroJob>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, _job: &NewMroJob) -> Result<Uuid, RepositoryError> {
        Ok(Uuid::new_v4())
    }

    async fn update(&self, id: Uuid, _patch: &MroJobPatch) -> Result<Uuid, RepositoryError> {
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::{MroJobStatus, NewMroJobDraft};

    #[rstest]
    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let repo = FixtureMroJobRepository;
        let listed = repo.list_recent().await.expect("fixture list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_update_echoes_the_id() {
        let repo = FixtureMroJobRepository;
        let id = Uuid::new_v4();
        let echoed = repo
            .update(id, &MroJobPatch::default())
            .await
            .expect("fixture update succeeds");
        assert_eq!(echoed, id);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_returns_an_id() {
        let repo = FixtureMroJobRepository;
        let job = NewMroJob::new(NewMroJobDraft {
            title: "C-check".to_owned(),
            aircraft_reg_no: "5Y-KZA".to_owned(),
            assigned_engineer: None,
            maintenance_date: None,
            status: MroJobStatus::InProgress,
        })
        .expect("valid draft");

        repo.create(&job).await.expect("fixture create succeeds");
    }
}
