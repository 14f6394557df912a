//! PostgreSQL-backed `JobTrackerRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{JobTrackerRepository, ListOrder, RepositoryError};
use crate::domain::{
    FinanceShared, JOB_TRACKER_LIST_LIMIT, JobStatus, JobTrackerPatch, JobTrackerRecord,
    NewJobTrackerRecord,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JobTrackerChangeset, JobTrackerRow, NewJobTrackerRow};
use super::pool::DbPool;
use super::schema::job_tracker;

/// Diesel-backed implementation of the job tracker repository port.
#[derive(Clone)]
pub struct DieselJobTrackerRepository {
    pool: DbPool,
}

impl DieselJobTrackerRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain record.
///
/// Unlike MRO statuses, tracker rows are only ever written through the
/// validated insert path, so an unparseable status or finance flag means the
/// store is corrupt and the row fails the read.
fn row_to_record(row: JobTrackerRow) -> Result<JobTrackerRecord, RepositoryError> {
    let job_status: JobStatus = row
        .job_status
        .parse()
        .map_err(|err| RepositoryError::query(format!("decode job_status: {err}")))?;
    let job_card_shared_with_finance: FinanceShared = row
        .job_card_shared_with_finance
        .parse()
        .map_err(|err| RepositoryError::query(format!("decode finance flag: {err}")))?;

    Ok(JobTrackerRecord {
        id: row.id,
        customer: row.customer,
        description: row.description,
        part_number: row.part_number,
        serial_number: row.serial_number,
        lpo_number: row.lpo_number,
        lpo_date: row.lpo_date,
        ro_number: row.ro_number,
        kq_repair_order_date: row.kq_repair_order_date,
        job_card_no: row.job_card_no,
        job_card_date: row.job_card_date,
        kq_works_order_wo_no: row.kq_works_order_wo_no,
        kq_works_order_date: row.kq_works_order_date,
        job_status,
        job_status_date: row.job_status_date,
        job_card_shared_with_finance,
        created_at: row.created_at,
    })
}

fn changeset_from_patch(patch: &JobTrackerPatch) -> JobTrackerChangeset<'_> {
    JobTrackerChangeset {
        customer: patch.customer.as_deref(),
        description: patch.description.as_deref(),
        part_number: patch.part_number.as_deref(),
        serial_number: patch.serial_number.as_deref(),
        lpo_number: patch.lpo_number.as_ref().map(Option::as_deref),
        lpo_date: patch.lpo_date,
        ro_number: patch.ro_number.as_ref().map(Option::as_deref),
        kq_repair_order_date: patch.kq_repair_order_date,
        job_card_no: patch.job_card_no.as_deref(),
        job_card_date: patch.job_card_date,
        kq_works_order_wo_no: patch.kq_works_order_wo_no.as_ref().map(Option::as_deref),
        kq_works_order_date: patch.kq_works_order_date,
        job_status: patch.job_status.map(|s| s.as_str()),
        job_status_date: patch.job_status_date,
        job_card_shared_with_finance: patch.job_card_shared_with_finance.map(|f| f.as_str()),
    }
}

#[async_trait]
impl JobTrackerRepository for DieselJobTrackerRepository {
    async fn list_recent(
        &self,
        order: ListOrder,
    ) -> Result<Vec<JobTrackerRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = job_tracker::table
            .select(JobTrackerRow::as_select())
            .into_boxed();
        if order == ListOrder::NewestFirst {
            query = query.order(job_tracker::created_at.desc());
        }

        let rows: Vec<JobTrackerRow> = query
            .limit(JOB_TRACKER_LIST_LIMIT)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn create(&self, record: &NewJobTrackerRecord) -> Result<Uuid, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewJobTrackerRow {
            customer: record.customer(),
            description: record.description(),
            part_number: record.part_number(),
            serial_number: record.serial_number(),
            lpo_number: record.lpo_number(),
            lpo_date: record.lpo_date(),
            ro_number: record.ro_number(),
            kq_repair_order_date: record.kq_repair_order_date(),
            job_card_no: record.job_card_no(),
            job_card_date: record.job_card_date(),
            kq_works_order_wo_no: record.kq_works_order_wo_no(),
            kq_works_order_date: record.kq_works_order_date(),
            job_status: record.job_status().as_str(),
            job_status_date: record.job_status_date(),
            job_card_shared_with_finance: record.job_card_shared_with_finance().as_str(),
        };

        diesel::insert_into(job_tracker::table)
            .values(&new_row)
            .returning(job_tracker::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(&self, id: Uuid, patch: &JobTrackerPatch) -> Result<Uuid, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(job_tracker::table.filter(job_tracker::id.eq(id)))
            .set(&changeset_from_patch(patch))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(RepositoryError::not_found(id));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and changeset construction.

    use chrono::{NaiveDate, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> JobTrackerRow {
        JobTrackerRow {
            id: Uuid::new_v4(),
            customer: "Precision Air".to_owned(),
            description: "Fuel pump overhaul".to_owned(),
            part_number: "9-557".to_owned(),
            serial_number: "SN-112".to_owned(),
            lpo_number: Some("LPO-88".to_owned()),
            lpo_date: NaiveDate::from_ymd_opt(2025, 9, 14),
            ro_number: None,
            kq_repair_order_date: None,
            job_card_no: "JC-7730".to_owned(),
            job_card_date: None,
            kq_works_order_wo_no: None,
            kq_works_order_date: None,
            job_status: "On Hold".to_owned(),
            job_status_date: None,
            job_card_shared_with_finance: "No".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_parses_enumerations(valid_row: JobTrackerRow) {
        let record = row_to_record(valid_row).expect("valid row decodes");
        assert_eq!(record.job_status, JobStatus::OnHold);
        assert_eq!(record.job_card_shared_with_finance, FinanceShared::No);
        assert_eq!(record.lpo_number.as_deref(), Some("LPO-88"));
    }

    #[rstest]
    fn row_conversion_rejects_corrupt_status(mut valid_row: JobTrackerRow) {
        valid_row.job_status = "Parked".to_owned();

        let err = row_to_record(valid_row).expect_err("corrupt status fails");
        assert!(matches!(err, RepositoryError::Query { .. }));
        assert!(err.to_string().contains("job_status"));
    }

    #[rstest]
    fn changeset_distinguishes_clear_from_skip() {
        let patch = JobTrackerPatch {
            lpo_number: Some(None),
            job_status: Some(JobStatus::Cancelled),
            ..JobTrackerPatch::default()
        };
        let changeset = changeset_from_patch(&patch);

        assert_eq!(changeset.lpo_number, Some(None));
        assert_eq!(changeset.ro_number, None);
        assert_eq!(changeset.job_status, Some("Cancelled"));
    }
}
