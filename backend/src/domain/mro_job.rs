//! MRO job entity, status enumeration, and the inventory-item projection.
//!
//! An MRO job is a flat record tracking maintenance work on one aircraft.
//! List views consume the job through [`MroItemSummary`], a legacy projection
//! whose field names match the inventory table the front end renders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum number of rows returned by an MRO job list read.
pub const MRO_JOB_LIST_LIMIT: i64 = 200;

/// Columns a client may supply when creating or patching an MRO job.
///
/// Shared by the request validation in the HTTP façade and the persistence
/// changesets so the mutable surface stays defined in exactly one place.
pub const MRO_JOB_COLUMNS: &[&str] = &[
    "title",
    "aircraft_reg_no",
    "assigned_engineer",
    "maintenance_date",
    "status",
];

/// Placeholder progress label shown when a job row carries no status.
pub const PROGRESS_PLACEHOLDER: &str = "PENDING";

/// Workflow state of an MRO job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MroJobStatus {
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work finished and signed off.
    Completed,
    /// Work blocked or behind schedule.
    Delayed,
}

impl MroJobStatus {
    /// Returns the wire and database string representation.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::MroJobStatus;
    ///
    /// assert_eq!(MroJobStatus::InProgress.as_str(), "In Progress");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
        }
    }
}

impl std::fmt::Display for MroJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`MroJobStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMroJobStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseMroJobStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown MRO job status: {}", self.input)
    }
}

impl std::error::Error for ParseMroJobStatusError {}

impl std::str::FromStr for MroJobStatus {
    type Err = ParseMroJobStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "Delayed" => Ok(Self::Delayed),
            _ => Err(ParseMroJobStatusError {
                input: value.to_owned(),
            }),
        }
    }
}

/// One maintenance job, as stored in `internal_mro_jobs`.
///
/// `status` is optional because rows imported from earlier spreadsheets carry
/// no status; the projection substitutes [`PROGRESS_PLACEHOLDER`] for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MroJob {
    /// Server-generated identifier, immutable once assigned.
    pub id: Uuid,
    /// Short description of the work.
    pub title: String,
    /// Registration number of the aircraft being serviced.
    pub aircraft_reg_no: String,
    /// Engineer the job is assigned to, if any.
    pub assigned_engineer: Option<String>,
    /// Scheduled maintenance date.
    pub maintenance_date: Option<NaiveDate>,
    /// Current workflow state.
    pub status: Option<MroJobStatus>,
    /// Insertion timestamp; orders list reads.
    pub created_at: DateTime<Utc>,
}

/// Validation failures for MRO job drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MroJobValidationError {
    /// `title` was empty or whitespace.
    #[error("title must not be empty")]
    EmptyTitle,
    /// `aircraft_reg_no` was empty or whitespace.
    #[error("aircraft_reg_no must not be empty")]
    EmptyAircraftRegNo,
}

/// Unvalidated input for creating an MRO job.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMroJobDraft {
    /// Short description of the work.
    pub title: String,
    /// Registration number of the aircraft being serviced.
    pub aircraft_reg_no: String,
    /// Engineer the job is assigned to, if any.
    pub assigned_engineer: Option<String>,
    /// Scheduled maintenance date.
    pub maintenance_date: Option<NaiveDate>,
    /// Initial workflow state.
    pub status: MroJobStatus,
}

/// A validated insert for `internal_mro_jobs`.
///
/// Construction enforces the creation invariant: `title` and
/// `aircraft_reg_no` are present and non-blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMroJob {
    title: String,
    aircraft_reg_no: String,
    assigned_engineer: Option<String>,
    maintenance_date: Option<NaiveDate>,
    status: MroJobStatus,
}

impl NewMroJob {
    /// Validate a draft into an insertable job.
    ///
    /// # Errors
    ///
    /// Returns [`MroJobValidationError`] when a required field is blank.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{MroJobStatus, NewMroJob, NewMroJobDraft};
    ///
    /// let job = NewMroJob::new(NewMroJobDraft {
    ///     title: "A-check".to_owned(),
    ///     aircraft_reg_no: "5Y-KQD".to_owned(),
    ///     assigned_engineer: None,
    ///     maintenance_date: None,
    ///     status: MroJobStatus::InProgress,
    /// })
    /// .expect("valid draft");
    /// assert_eq!(job.title(), "A-check");
    /// ```
    pub fn new(draft: NewMroJobDraft) -> Result<Self, MroJobValidationError> {
        if draft.title.trim().is_empty() {
            return Err(MroJobValidationError::EmptyTitle);
        }
        if draft.aircraft_reg_no.trim().is_empty() {
            return Err(MroJobValidationError::EmptyAircraftRegNo);
        }
        Ok(Self {
            title: draft.title,
            aircraft_reg_no: draft.aircraft_reg_no,
            assigned_engineer: draft.assigned_engineer,
            maintenance_date: draft.maintenance_date,
            status: draft.status,
        })
    }

    /// Short description of the work.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Registration number of the aircraft being serviced.
    pub fn aircraft_reg_no(&self) -> &str {
        &self.aircraft_reg_no
    }

    /// Engineer the job is assigned to, if any.
    pub fn assigned_engineer(&self) -> Option<&str> {
        self.assigned_engineer.as_deref()
    }

    /// Scheduled maintenance date.
    pub fn maintenance_date(&self) -> Option<NaiveDate> {
        self.maintenance_date
    }

    /// Initial workflow state.
    pub fn status(&self) -> MroJobStatus {
        self.status
    }
}

/// Partial update for one MRO job.
///
/// `None` means "leave the column untouched". The nested options on nullable
/// columns distinguish "untouched" from "set to NULL".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MroJobPatch {
    /// Replacement title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement aircraft registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_reg_no: Option<String>,
    /// Replacement engineer assignment; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_engineer: Option<Option<String>>,
    /// Replacement maintenance date; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_date: Option<Option<NaiveDate>>,
    /// Replacement workflow state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MroJobStatus>,
}

impl MroJobPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.aircraft_reg_no.is_none()
            && self.assigned_engineer.is_none()
            && self.maintenance_date.is_none()
            && self.status.is_none()
    }
}

/// Inventory-item projection of an MRO job.
///
/// Field names follow the legacy inventory table the list views render:
/// the job title becomes the item description, the aircraft registration
/// stands in for a part number, and the assigned engineer fills the customer
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MroItemSummary {
    /// Job identifier.
    pub id: Uuid,
    /// Assigned engineer, surfaced in the customer column.
    pub customer: Option<String>,
    /// Aircraft registration, surfaced in the part-number column.
    pub part_number: String,
    /// Job title, surfaced as the item description.
    pub description: String,
    /// Maintenance date, surfaced as the delivery date.
    pub date_delivered: Option<NaiveDate>,
    /// Display label for the workflow state.
    pub progress: String,
    /// Inventory category; MRO jobs always file under the main store.
    pub category: String,
}

impl From<MroJob> for MroItemSummary {
    fn from(job: MroJob) -> Self {
        Self {
            id: job.id,
            customer: job.assigned_engineer,
            part_number: job.aircraft_reg_no,
            description: job.title,
            date_delivered: job.maintenance_date,
            progress: job
                .status
                .map_or_else(|| PROGRESS_PLACEHOLDER.to_owned(), |s| s.to_string()),
            category: "MAIN".to_owned(),
        }
    }
}
