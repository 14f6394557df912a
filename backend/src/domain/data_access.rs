//! Typed data-access surface over the repository ports.
//!
//! [`DataAccessService`] is what embedding views call: one fetch/create/update
//! trio per entity, indifferent to whether a Diesel adapter or the REST
//! adapter sits behind the ports. The backend pair is chosen once at startup
//! and injected; nothing here re-reads configuration.
//!
//! Reads follow a configurable failure policy. The historical behaviour is to
//! degrade to an empty list so dashboards render rather than block; callers
//! that need the failure can opt into propagation instead.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    JobTrackerRepository, ListOrder, MroJobRepository, RepositoryError,
};
use crate::domain::{
    Error, JobTrackerPatch, JobTrackerRecord, MroItemSummary, MroJobPatch, NewJobTrackerRecord,
    NewMroJob,
};

/// What a fetch does when the backend fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFallback {
    /// Log the failure and return an empty list.
    #[default]
    DegradeToEmpty,
    /// Surface the failure to the caller.
    Propagate,
}

/// Read a capped tracker list, retrying once without ordering.
///
/// The ordered read fails on stores whose `job_tracker` table predates the
/// `created_at` column; those rows are still worth showing, so the same
/// capped read is retried unordered exactly once.
///
/// # Errors
///
/// Returns the error of the unordered retry when both reads fail.
pub async fn list_job_tracker_with_fallback(
    repo: &dyn JobTrackerRepository,
) -> Result<Vec<JobTrackerRecord>, RepositoryError> {
    match repo.list_recent(ListOrder::NewestFirst).await {
        Ok(records) => Ok(records),
        Err(err) => {
            warn!(error = %err, "ordered job tracker read failed; retrying unordered");
            repo.list_recent(ListOrder::Unordered).await
        }
    }
}

/// Entity-typed fetch/create/update calls over injected repository ports.
///
/// Every call is one backend round trip; there is no cache and no request
/// deduplication.
#[derive(Clone)]
pub struct DataAccessService {
    mro_jobs: Arc<dyn MroJobRepository>,
    job_tracker: Arc<dyn JobTrackerRepository>,
    read_fallback: ReadFallback,
}

impl core::fmt::Debug for DataAccessService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataAccessService")
            .field("read_fallback", &self.read_fallback)
            .finish_non_exhaustive()
    }
}

impl DataAccessService {
    /// Build a service over the given port implementations.
    pub fn new(
        mro_jobs: Arc<dyn MroJobRepository>,
        job_tracker: Arc<dyn JobTrackerRepository>,
        read_fallback: ReadFallback,
    ) -> Self {
        Self {
            mro_jobs,
            job_tracker,
            read_fallback,
        }
    }

    /// The configured read-failure policy.
    pub fn read_fallback(&self) -> ReadFallback {
        self.read_fallback
    }

    /// Fetch MRO jobs as inventory-item projections, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error only under [`ReadFallback::Propagate`]; the default
    /// policy degrades to an empty list.
    pub async fn fetch_mro_items(&self) -> Result<Vec<MroItemSummary>, Error> {
        let jobs = self.guard_read(self.mro_jobs.list_recent().await, "mro jobs")?;
        Ok(jobs.into_iter().map(MroItemSummary::from).collect())
    }

    /// Fetch job tracker records, newest first, with the unordered retry.
    ///
    /// # Errors
    ///
    /// Returns an error only under [`ReadFallback::Propagate`].
    pub async fn fetch_job_tracker(&self) -> Result<Vec<JobTrackerRecord>, Error> {
        let result = list_job_tracker_with_fallback(self.job_tracker.as_ref()).await;
        self.guard_read(result, "job tracker")
    }

    /// Create an MRO job; returns the new id.
    ///
    /// # Errors
    ///
    /// Propagates backend rejection; writes are never degraded.
    pub async fn create_mro_job(&self, job: &NewMroJob) -> Result<Uuid, Error> {
        self.mro_jobs.create(job).await.map_err(Error::from)
    }

    /// Patch the MRO job with the given id; returns the id on success.
    ///
    /// # Errors
    ///
    /// Rejects empty patches before any I/O; surfaces an unmatched id as a
    /// not-found error.
    pub async fn update_mro_job(&self, id: Uuid, patch: &MroJobPatch) -> Result<Uuid, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request("patch must change at least one field"));
        }
        self.mro_jobs.update(id, patch).await.map_err(Error::from)
    }

    /// Create a job tracker record; returns the new id.
    ///
    /// # Errors
    ///
    /// Propagates backend rejection; writes are never degraded.
    pub async fn create_job_tracker(&self, record: &NewJobTrackerRecord) -> Result<Uuid, Error> {
        self.job_tracker.create(record).await.map_err(Error::from)
    }

    /// Patch the tracker record with the given id; returns the id on success.
    ///
    /// # Errors
    ///
    /// Rejects empty patches before any I/O; surfaces an unmatched id as a
    /// not-found error.
    pub async fn update_job_tracker(
        &self,
        id: Uuid,
        patch: &JobTrackerPatch,
    ) -> Result<Uuid, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request("patch must change at least one field"));
        }
        self.job_tracker.update(id, patch).await.map_err(Error::from)
    }

    fn guard_read<T>(
        &self,
        result: Result<Vec<T>, RepositoryError>,
        entity: &str,
    ) -> Result<Vec<T>, Error> {
        match result {
            Ok(rows) => Ok(rows),
            Err(err) => match self.read_fallback {
                ReadFallback::DegradeToEmpty => {
                    warn!(entity, error = %err, "read failed; degrading to empty list");
                    Ok(Vec::new())
                }
                ReadFallback::Propagate => Err(Error::from(err)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour coverage for the data-access service against mocked ports.

    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockJobTrackerRepository, MockMroJobRepository};
    use crate::domain::{ErrorCode, JobStatus, MroJob, MroJobStatus};

    fn sample_job() -> MroJob {
        MroJob {
            id: Uuid::new_v4(),
            title: "Avionics bay inspection".to_owned(),
            aircraft_reg_no: "5Y-VIP".to_owned(),
            assigned_engineer: None,
            maintenance_date: None,
            status: Some(MroJobStatus::InProgress),
            created_at: Utc::now(),
        }
    }

    fn sample_record() -> JobTrackerRecord {
        JobTrackerRecord {
            id: Uuid::new_v4(),
            customer: "Kenya Airways".to_owned(),
            description: "IDG overhaul".to_owned(),
            part_number: "740-814".to_owned(),
            serial_number: "SN-0092".to_owned(),
            lpo_number: None,
            lpo_date: None,
            ro_number: None,
            kq_repair_order_date: None,
            job_card_no: "JC-2201".to_owned(),
            job_card_date: None,
            kq_works_order_wo_no: None,
            kq_works_order_date: None,
            job_status: JobStatus::Pending,
            job_status_date: None,
            job_card_shared_with_finance: Default::default(),
            created_at: Utc::now(),
        }
    }

    fn service(
        mro: MockMroJobRepository,
        tracker: MockJobTrackerRepository,
        policy: ReadFallback,
    ) -> DataAccessService {
        DataAccessService::new(Arc::new(mro), Arc::new(tracker), policy)
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_mro_items_projects_rows() {
        let job = sample_job();
        let expected_id = job.id;
        let mut mro = MockMroJobRepository::new();
        mro.expect_list_recent()
            .times(1)
            .returning(move || Ok(vec![job.clone()]));

        let svc = service(mro, MockJobTrackerRepository::new(), ReadFallback::default());
        let items = svc.fetch_mro_items().await.expect("fetch succeeds");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, expected_id);
        assert_eq!(items[0].description, "Avionics bay inspection");
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_degrades_to_empty_by_default() {
        let mut mro = MockMroJobRepository::new();
        mro.expect_list_recent()
            .times(1)
            .returning(|| Err(RepositoryError::connection("refused")));

        let svc = service(mro, MockJobTrackerRepository::new(), ReadFallback::default());
        let items = svc.fetch_mro_items().await.expect("degraded read succeeds");
        assert!(items.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_propagates_when_configured() {
        let mut mro = MockMroJobRepository::new();
        mro.expect_list_recent()
            .times(1)
            .returning(|| Err(RepositoryError::connection("refused")));

        let svc = service(
            mro,
            MockJobTrackerRepository::new(),
            ReadFallback::Propagate,
        );
        let err = svc.fetch_mro_items().await.expect_err("must propagate");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn tracker_fetch_retries_unordered_once() {
        let record = sample_record();
        let mut tracker = MockJobTrackerRepository::new();
        tracker
            .expect_list_recent()
            .with(eq(ListOrder::NewestFirst))
            .times(1)
            .returning(|_| Err(RepositoryError::query("missing column")));
        tracker
            .expect_list_recent()
            .with(eq(ListOrder::Unordered))
            .times(1)
            .returning(move |_| Ok(vec![record.clone()]));

        let svc = service(MockMroJobRepository::new(), tracker, ReadFallback::default());
        let records = svc.fetch_job_tracker().await.expect("fallback succeeds");
        assert_eq!(records.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn tracker_fetch_degrades_when_both_reads_fail() {
        let mut tracker = MockJobTrackerRepository::new();
        tracker
            .expect_list_recent()
            .times(2)
            .returning(|_| Err(RepositoryError::query("missing column")));

        let svc = service(MockMroJobRepository::new(), tracker, ReadFallback::default());
        let records = svc.fetch_job_tracker().await.expect("degraded read");
        assert!(records.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn empty_patch_is_rejected_before_any_io() {
        let svc = service(
            MockMroJobRepository::new(),
            MockJobTrackerRepository::new(),
            ReadFallback::default(),
        );

        let err = svc
            .update_mro_job(Uuid::new_v4(), &MroJobPatch::default())
            .await
            .expect_err("empty patch must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn unmatched_update_surfaces_not_found() {
        let missing = Uuid::new_v4();
        let mut tracker = MockJobTrackerRepository::new();
        tracker
            .expect_update()
            .times(1)
            .returning(|id, _| Err(RepositoryError::not_found(id)));

        let svc = service(MockMroJobRepository::new(), tracker, ReadFallback::default());
        let patch = JobTrackerPatch {
            job_status: Some(JobStatus::Completed),
            ..JobTrackerPatch::default()
        };
        let err = svc
            .update_job_tracker(missing, &patch)
            .await
            .expect_err("must surface");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
