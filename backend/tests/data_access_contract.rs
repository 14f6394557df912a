//! Contract checks for the data-access service over in-memory port doubles.
//!
//! The doubles implement the repository ports the way any conforming adapter
//! must: newest-first list reads, server-generated ids on insert, partial
//! patches that leave unsupplied fields alone, and not-found on unmatched
//! update ids.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use backend::domain::ports::{
    JobTrackerRepository, ListOrder, MroJobRepository, RepositoryError,
};
use backend::domain::{
    DataAccessService, ErrorCode, JobStatus, JobTrackerPatch, JobTrackerRecord, MroJob,
    MroJobPatch, MroJobStatus, NewJobTrackerDraft, NewJobTrackerRecord, NewMroJob,
    NewMroJobDraft, ReadFallback,
};

/// In-memory MRO job store honouring the port contract.
#[derive(Default)]
struct InMemoryMroJobs {
    rows: Mutex<Vec<MroJob>>,
}

#[async_trait]
impl MroJobRepository for InMemoryMroJobs {
    async fn list_recent(&self) -> Result<Vec<MroJob>, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned").clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create(&self, job: &NewMroJob) -> Result<Uuid, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let id = Uuid::new_v4();
        let created_at = Utc::now() + Duration::milliseconds(rows.len() as i64);
        rows.push(MroJob {
            id,
            title: job.title().to_owned(),
            aircraft_reg_no: job.aircraft_reg_no().to_owned(),
            assigned_engineer: job.assigned_engineer().map(str::to_owned),
            maintenance_date: job.maintenance_date(),
            status: Some(job.status()),
            created_at,
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, patch: &MroJobPatch) -> Result<Uuid, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RepositoryError::NotFound { id })?;

        if let Some(title) = &patch.title {
            row.title = title.clone();
        }
        if let Some(reg) = &patch.aircraft_reg_no {
            row.aircraft_reg_no = reg.clone();
        }
        if let Some(engineer) = &patch.assigned_engineer {
            row.assigned_engineer = engineer.clone();
        }
        if let Some(date) = patch.maintenance_date {
            row.maintenance_date = date;
        }
        if let Some(status) = patch.status {
            row.status = Some(status);
        }
        Ok(id)
    }
}

/// In-memory tracker store honouring the port contract.
#[derive(Default)]
struct InMemoryJobTracker {
    rows: Mutex<Vec<JobTrackerRecord>>,
}

#[async_trait]
impl JobTrackerRepository for InMemoryJobTracker {
    async fn list_recent(
        &self,
        order: ListOrder,
    ) -> Result<Vec<JobTrackerRecord>, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned").clone();
        if order == ListOrder::NewestFirst {
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        Ok(rows)
    }

    async fn create(&self, record: &NewJobTrackerRecord) -> Result<Uuid, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let id = Uuid::new_v4();
        let created_at = Utc::now() + Duration::milliseconds(rows.len() as i64);
        rows.push(JobTrackerRecord {
            id,
            customer: record.customer().to_owned(),
            description: record.description().to_owned(),
            part_number: record.part_number().to_owned(),
            serial_number: record.serial_number().to_owned(),
            lpo_number: record.lpo_number().map(str::to_owned),
            lpo_date: record.lpo_date(),
            ro_number: record.ro_number().map(str::to_owned),
            kq_repair_order_date: record.kq_repair_order_date(),
            job_card_no: record.job_card_no().to_owned(),
            job_card_date: record.job_card_date(),
            kq_works_order_wo_no: record.kq_works_order_wo_no().map(str::to_owned),
            kq_works_order_date: record.kq_works_order_date(),
            job_status: record.job_status(),
            job_status_date: record.job_status_date(),
            job_card_shared_with_finance: record.job_card_shared_with_finance(),
            created_at,
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, patch: &JobTrackerPatch) -> Result<Uuid, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RepositoryError::NotFound { id })?;

        if let Some(status) = patch.job_status {
            row.job_status = status;
        }
        if let Some(lpo) = &patch.lpo_number {
            row.lpo_number = lpo.clone();
        }
        Ok(id)
    }
}

fn service(
    mro: Arc<InMemoryMroJobs>,
    tracker: Arc<InMemoryJobTracker>,
) -> DataAccessService {
    DataAccessService::new(mro, tracker, ReadFallback::Propagate)
}

fn mro_draft(title: &str) -> NewMroJob {
    NewMroJob::new(NewMroJobDraft {
        title: title.to_owned(),
        aircraft_reg_no: "5Y-KQD".to_owned(),
        assigned_engineer: Some("A. Njoroge".to_owned()),
        maintenance_date: None,
        status: MroJobStatus::InProgress,
    })
    .expect("valid draft")
}

fn tracker_draft(customer: &str) -> NewJobTrackerRecord {
    NewJobTrackerRecord::new(NewJobTrackerDraft {
        customer: customer.to_owned(),
        description: "Starter generator".to_owned(),
        job_card_no: "JC-9001".to_owned(),
        ..NewJobTrackerDraft::default()
    })
    .expect("valid draft")
}

#[tokio::test]
async fn created_jobs_appear_in_the_next_fetch_with_equal_fields() {
    let svc = service(
        Arc::new(InMemoryMroJobs::default()),
        Arc::new(InMemoryJobTracker::default()),
    );

    let id = svc
        .create_mro_job(&mro_draft("Engine wash"))
        .await
        .expect("create succeeds");

    let items = svc.fetch_mro_items().await.expect("fetch succeeds");
    let item = items.iter().find(|i| i.id == id).expect("created row listed");
    assert_eq!(item.description, "Engine wash");
    assert_eq!(item.part_number, "5Y-KQD");
    assert_eq!(item.customer.as_deref(), Some("A. Njoroge"));
    assert_eq!(item.progress, "In Progress");
}

#[tokio::test]
async fn updates_change_only_the_supplied_fields() {
    let svc = service(
        Arc::new(InMemoryMroJobs::default()),
        Arc::new(InMemoryJobTracker::default()),
    );

    let id = svc
        .create_mro_job(&mro_draft("Gear inspection"))
        .await
        .expect("create succeeds");

    let patch = MroJobPatch {
        status: Some(MroJobStatus::Completed),
        ..MroJobPatch::default()
    };
    svc.update_mro_job(id, &patch).await.expect("update succeeds");

    let items = svc.fetch_mro_items().await.expect("fetch succeeds");
    let item = items.iter().find(|i| i.id == id).expect("row still listed");
    assert_eq!(item.progress, "Completed");
    assert_eq!(item.description, "Gear inspection");
    assert_eq!(item.customer.as_deref(), Some("A. Njoroge"));
}

#[tokio::test]
async fn fetch_returns_newest_records_first() {
    let svc = service(
        Arc::new(InMemoryMroJobs::default()),
        Arc::new(InMemoryJobTracker::default()),
    );

    svc.create_job_tracker(&tracker_draft("First"))
        .await
        .expect("create succeeds");
    let second = svc
        .create_job_tracker(&tracker_draft("Second"))
        .await
        .expect("create succeeds");

    let records = svc.fetch_job_tracker().await.expect("fetch succeeds");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, second, "newest record should come first");
}

#[tokio::test]
async fn update_of_unknown_id_is_a_not_found_error() {
    let svc = service(
        Arc::new(InMemoryMroJobs::default()),
        Arc::new(InMemoryJobTracker::default()),
    );

    let patch = JobTrackerPatch {
        job_status: Some(JobStatus::Cancelled),
        ..JobTrackerPatch::default()
    };
    let err = svc
        .update_job_tracker(Uuid::new_v4(), &patch)
        .await
        .expect_err("unknown id must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn last_write_wins_for_concurrent_patches() {
    let svc = service(
        Arc::new(InMemoryMroJobs::default()),
        Arc::new(InMemoryJobTracker::default()),
    );

    let id = svc
        .create_mro_job(&mro_draft("Hydraulics"))
        .await
        .expect("create succeeds");

    let first = MroJobPatch {
        status: Some(MroJobStatus::Delayed),
        ..MroJobPatch::default()
    };
    let second = MroJobPatch {
        status: Some(MroJobStatus::Completed),
        ..MroJobPatch::default()
    };

    svc.update_mro_job(id, &first).await.expect("first write");
    svc.update_mro_job(id, &second).await.expect("second write");

    let items = svc.fetch_mro_items().await.expect("fetch succeeds");
    let item = items.iter().find(|i| i.id == id).expect("row listed");
    assert_eq!(item.progress, "Completed", "later write should win");
}
