//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Changeset fields are `Option` so absent patch columns are skipped,
//! with nested `Option` expressing an explicit NULL on nullable columns.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{internal_mro_jobs, job_tracker};

/// Row struct for reading from the internal_mro_jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = internal_mro_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MroJobRow {
    pub id: Uuid,
    pub title: String,
    pub aircraft_reg_no: String,
    pub assigned_engineer: Option<String>,
    pub maintenance_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating MRO job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = internal_mro_jobs)]
pub(crate) struct NewMroJobRow<'a> {
    pub title: &'a str,
    pub aircraft_reg_no: &'a str,
    pub assigned_engineer: Option<&'a str>,
    pub maintenance_date: Option<NaiveDate>,
    pub status: &'a str,
}

/// Changeset struct for partially updating MRO job records.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = internal_mro_jobs)]
pub(crate) struct MroJobChangeset<'a> {
    pub title: Option<&'a str>,
    pub aircraft_reg_no: Option<&'a str>,
    pub assigned_engineer: Option<Option<&'a str>>,
    pub maintenance_date: Option<Option<NaiveDate>>,
    pub status: Option<&'a str>,
}

/// Row struct for reading from the job_tracker table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = job_tracker)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobTrackerRow {
    pub id: Uuid,
    pub customer: String,
    pub description: String,
    pub part_number: String,
    pub serial_number: String,
    pub lpo_number: Option<String>,
    pub lpo_date: Option<NaiveDate>,
    pub ro_number: Option<String>,
    pub kq_repair_order_date: Option<NaiveDate>,
    pub job_card_no: String,
    pub job_card_date: Option<NaiveDate>,
    pub kq_works_order_wo_no: Option<String>,
    pub kq_works_order_date: Option<NaiveDate>,
    pub job_status: String,
    pub job_status_date: Option<NaiveDate>,
    pub job_card_shared_with_finance: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating job tracker records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_tracker)]
pub(crate) struct NewJobTrackerRow<'a> {
    pub customer: &'a str,
    pub description: &'a str,
    pub part_number: &'a str,
    pub serial_number: &'a str,
    pub lpo_number: Option<&'a str>,
    pub lpo_date: Option<NaiveDate>,
    pub ro_number: Option<&'a str>,
    pub kq_repair_order_date: Option<NaiveDate>,
    pub job_card_no: &'a str,
    pub job_card_date: Option<NaiveDate>,
    pub kq_works_order_wo_no: Option<&'a str>,
    pub kq_works_order_date: Option<NaiveDate>,
    pub job_status: &'a str,
    pub job_status_date: Option<NaiveDate>,
    pub job_card_shared_with_finance: &'a str,
}

/// Changeset struct for partially updating job tracker records.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = job_tracker)]
pub(crate) struct JobTrackerChangeset<'a> {
    pub customer: Option<&'a str>,
    pub description: Option<&'a str>,
    pub part_number: Option<&'a str>,
    pub serial_number: Option<&'a str>,
    pub lpo_number: Option<Option<&'a str>>,
    pub lpo_date: Option<Option<NaiveDate>>,
    pub ro_number: Option<Option<&'a str>>,
    pub kq_repair_order_date: Option<Option<NaiveDate>>,
    pub job_card_no: Option<&'a str>,
    pub job_card_date: Option<Option<NaiveDate>>,
    pub kq_works_order_wo_no: Option<Option<&'a str>>,
    pub kq_works_order_date: Option<Option<NaiveDate>>,
    pub job_status: Option<&'a str>,
    pub job_status_date: Option<Option<NaiveDate>>,
    pub job_card_shared_with_finance: Option<&'a str>,
}
