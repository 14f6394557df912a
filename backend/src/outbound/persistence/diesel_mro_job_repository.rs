//! PostgreSQL-backed `MroJobRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{MroJobRepository, RepositoryError};
use crate::domain::{MRO_JOB_LIST_LIMIT, MroJob, MroJobPatch, MroJobStatus, NewMroJob};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MroJobChangeset, MroJobRow, NewMroJobRow};
use super::pool::DbPool;
use super::schema::internal_mro_jobs;

/// Diesel-backed implementation of the MRO job repository port.
#[derive(Clone)]
pub struct DieselMroJobRepository {
    pool: DbPool,
}

impl DieselMroJobRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into the domain job.
///
/// Rows imported from spreadsheets can hold status strings outside the
/// enumeration; those decode to `None` so one bad row cannot poison a whole
/// list read.
fn row_to_mro_job(row: MroJobRow) -> MroJob {
    let MroJobRow {
        id,
        title,
        aircraft_reg_no,
        assigned_engineer,
        maintenance_date,
        status,
        created_at,
    } = row;

    let status = status.as_deref().and_then(|raw| {
        raw.parse::<MroJobStatus>()
            .inspect_err(|err| debug!(%id, error = %err, "dropping unrecognised status"))
            .ok()
    });

    MroJob {
        id,
        title,
        aircraft_reg_no,
        assigned_engineer,
        maintenance_date,
        status,
        created_at,
    }
}

fn changeset_from_patch(patch: &MroJobPatch) -> MroJobChangeset<'_> {
    MroJobChangeset {
        title: patch.title.as_deref(),
        aircraft_reg_no: patch.aircraft_reg_no.as_deref(),
        assigned_engineer: patch.assigned_engineer.as_ref().map(Option::as_deref),
        maintenance_date: patch.maintenance_date,
        status: patch.status.map(|s| s.as_str()),
    }
}

#[async_trait]
impl MroJobRepository for DieselMroJobRepository {
    async fn list_recent(&self) -> Result<Vec<MroJob>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MroJobRow> = internal_mro_jobs::table
            .order(internal_mro_jobs::created_at.desc())
            .limit(MRO_JOB_LIST_LIMIT)
            .select(MroJobRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_mro_job).collect())
    }

    async fn create(&self, job: &NewMroJob) -> Result<Uuid, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewMroJobRow {
            title: job.title(),
            aircraft_reg_no: job.aircraft_reg_no(),
            assigned_engineer: job.assigned_engineer(),
            maintenance_date: job.maintenance_date(),
            status: job.status().as_str(),
        };

        diesel::insert_into(internal_mro_jobs::table)
            .values(&new_row)
            .returning(internal_mro_jobs::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(&self, id: Uuid, patch: &MroJobPatch) -> Result<Uuid, RepositoryError> {
        // Empty patches are rejected upstream; reaching the builder with one
        // would be a query error, which the mapping below reports as such.
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(internal_mro_jobs::table.filter(internal_mro_jobs::id.eq(id)))
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
    fn valid_row() -> MroJobRow {
        MroJobRow {
            id: Uuid::new_v4(),
            title: "Landing gear swap".to_owned(),
            aircraft_reg_no: "5Y-KQE".to_owned(),
            assigned_engineer: Some("J. Mwangi".to_owned()),
            maintenance_date: NaiveDate::from_ymd_opt(2025, 11, 3),
            status: Some("Delayed".to_owned()),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_parses_known_status(valid_row: MroJobRow) {
        let job = row_to_mro_job(valid_row);
        assert_eq!(job.status, Some(MroJobStatus::Delayed));
        assert_eq!(job.title, "Landing gear swap");
    }

    #[rstest]
    fn row_conversion_drops_unrecognised_status(mut valid_row: MroJobRow) {
        valid_row.status = Some("WIP".to_owned());
        let job = row_to_mro_job(valid_row);
        assert_eq!(job.status, None);
    }

    #[rstest]
    fn changeset_skips_absent_columns() {
        let patch = MroJobPatch {
            status: Some(MroJobStatus::Completed),
            ..MroJobPatch::default()
        };
        let changeset = changeset_from_patch(&patch);

        assert_eq!(changeset.status, Some("Completed"));
        assert_eq!(changeset.title, None);
        assert_eq!(changeset.assigned_engineer, None);
    }

    #[rstest]
    fn changeset_preserves_explicit_null() {
        let patch = MroJobPatch {
            assigned_engineer: Some(None),
            ..MroJobPatch::default()
        };
        let changeset = changeset_from_patch(&patch);

        assert_eq!(changeset.assigned_engineer, Some(None));
    }
}
