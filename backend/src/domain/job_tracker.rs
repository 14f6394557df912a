//! Job tracker entity and its status enumerations.
//!
//! A job tracker record follows one repair job through its paperwork: the
//! customer's purchase order (LPO), the repair order, the internal job card,
//! and the works order. All paperwork numbers are opaque strings and every
//! date/number pair is independently nullable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum number of rows returned by a job tracker list read.
pub const JOB_TRACKER_LIST_LIMIT: i64 = 500;

/// Columns a client may supply when creating or patching a tracker record.
pub const JOB_TRACKER_COLUMNS: &[&str] = &[
    "customer",
    "description",
    "part_number",
    "serial_number",
    "lpo_number",
    "lpo_date",
    "ro_number",
    "kq_repair_order_date",
    "job_card_no",
    "job_card_date",
    "kq_works_order_wo_no",
    "kq_works_order_date",
    "job_status",
    "job_status_date",
    "job_card_shared_with_finance",
];

/// Workflow state of a tracked repair job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum JobStatus {
    /// Received but not yet started.
    #[default]
    Pending,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work finished.
    Completed,
    /// Paused awaiting parts or customer input.
    #[serde(rename = "On Hold")]
    OnHold,
    /// Abandoned.
    Cancelled,
}

impl JobStatus {
    /// Returns the wire and database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`JobStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseJobStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseJobStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown job status: {}", self.input)
    }
}

impl std::error::Error for ParseJobStatusError {}

impl std::str::FromStr for JobStatus {
    type Err = ParseJobStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "On Hold" => Ok(Self::OnHold),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseJobStatusError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Whether the job card has been shared with the finance department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FinanceShared {
    /// Card handed over to finance.
    Yes,
    /// Not yet shared.
    #[default]
    No,
}

impl FinanceShared {
    /// Returns the wire and database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl std::fmt::Display for FinanceShared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`FinanceShared`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFinanceSharedError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseFinanceSharedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "finance-sharing flag must be Yes or No: {}", self.input)
    }
}

impl std::error::Error for ParseFinanceSharedError {}

impl std::str::FromStr for FinanceShared {
    type Err = ParseFinanceSharedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            _ => Err(ParseFinanceSharedError {
                input: value.to_owned(),
            }),
        }
    }
}

/// One repair job, as stored in `job_tracker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JobTrackerRecord {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Customer the repair is performed for.
    pub customer: String,
    /// Description of the unit under repair.
    pub description: String,
    /// Manufacturer part number; may be empty.
    pub part_number: String,
    /// Unit serial number; may be empty.
    pub serial_number: String,
    /// Customer purchase-order number.
    pub lpo_number: Option<String>,
    /// Customer purchase-order date.
    pub lpo_date: Option<NaiveDate>,
    /// Repair-order number.
    pub ro_number: Option<String>,
    /// Repair-order date.
    pub kq_repair_order_date: Option<NaiveDate>,
    /// Internal job card number.
    pub job_card_no: String,
    /// Job card date.
    pub job_card_date: Option<NaiveDate>,
    /// Works-order number.
    pub kq_works_order_wo_no: Option<String>,
    /// Works-order date.
    pub kq_works_order_date: Option<NaiveDate>,
    /// Current workflow state.
    pub job_status: JobStatus,
    /// Date the workflow state last changed.
    pub job_status_date: Option<NaiveDate>,
    /// Whether the job card has been shared with finance.
    pub job_card_shared_with_finance: FinanceShared,
    /// Insertion timestamp; orders list reads.
    pub created_at: DateTime<Utc>,
}

/// Validation failures for tracker drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobTrackerValidationError {
    /// `customer` was empty or whitespace.
    #[error("customer must not be empty")]
    EmptyCustomer,
    /// `description` was empty or whitespace.
    #[error("description must not be empty")]
    EmptyDescription,
    /// `job_card_no` was empty or whitespace.
    #[error("job_card_no must not be empty")]
    EmptyJobCardNo,
}

/// Unvalidated input for creating a tracker record.
///
/// Optional fields default: part and serial numbers to empty strings, the
/// status to [`JobStatus::Pending`], and the finance flag to
/// [`FinanceShared::No`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewJobTrackerDraft {
    /// Customer the repair is performed for.
    pub customer: String,
    /// Description of the unit under repair.
    pub description: String,
    /// Manufacturer part number.
    pub part_number: Option<String>,
    /// Unit serial number.
    pub serial_number: Option<String>,
    /// Customer purchase-order number.
    pub lpo_number: Option<String>,
    /// Customer purchase-order date.
    pub lpo_date: Option<NaiveDate>,
    /// Repair-order number.
    pub ro_number: Option<String>,
    /// Repair-order date.
    pub kq_repair_order_date: Option<NaiveDate>,
    /// Internal job card number.
    pub job_card_no: String,
    /// Job card date.
    pub job_card_date: Option<NaiveDate>,
    /// Works-order number.
    pub kq_works_order_wo_no: Option<String>,
    /// Works-order date.
    pub kq_works_order_date: Option<NaiveDate>,
    /// Initial workflow state.
    pub job_status: Option<JobStatus>,
    /// Date the workflow state was set.
    pub job_status_date: Option<NaiveDate>,
    /// Whether the job card has been shared with finance.
    pub job_card_shared_with_finance: Option<FinanceShared>,
}

/// A validated insert for `job_tracker`.
///
/// Construction enforces the creation invariant: `customer`, `description`,
/// and `job_card_no` are present and non-blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewJobTrackerRecord {
    customer: String,
    description: String,
    part_number: String,
    serial_number: String,
    lpo_number: Option<String>,
    lpo_date: Option<NaiveDate>,
    ro_number: Option<String>,
    kq_repair_order_date: Option<NaiveDate>,
    job_card_no: String,
    job_card_date: Option<NaiveDate>,
    kq_works_order_wo_no: Option<String>,
    kq_works_order_date: Option<NaiveDate>,
    job_status: JobStatus,
    job_status_date: Option<NaiveDate>,
    job_card_shared_with_finance: FinanceShared,
}

impl NewJobTrackerRecord {
    /// Validate a draft into an insertable record.
    ///
    /// # Errors
    ///
    /// Returns [`JobTrackerValidationError`] when a required field is blank.
    pub fn new(draft: NewJobTrackerDraft) -> Result<Self, JobTrackerValidationError> {
        if draft.customer.trim().is_empty() {
            return Err(JobTrackerValidationError::EmptyCustomer);
        }
        if draft.description.trim().is_empty() {
            return Err(JobTrackerValidationError::EmptyDescription);
        }
        if draft.job_card_no.trim().is_empty() {
            return Err(JobTrackerValidationError::EmptyJobCardNo);
        }
        Ok(Self {
            customer: draft.customer,
            description: draft.description,
            part_number: draft.part_number.unwrap_or_default(),
            serial_number: draft.serial_number.unwrap_or_default(),
            lpo_number: draft.lpo_number,
            lpo_date: draft.lpo_date,
            ro_number: draft.ro_number,
            kq_repair_order_date: draft.kq_repair_order_date,
            job_card_no: draft.job_card_no,
            job_card_date: draft.job_card_date,
            kq_works_order_wo_no: draft.kq_works_order_wo_no,
            kq_works_order_date: draft.kq_works_order_date,
            job_status: draft.job_status.unwrap_or_default(),
            job_status_date: draft.job_status_date,
            job_card_shared_with_finance: draft.job_card_shared_with_finance.unwrap_or_default(),
        })
    }

    /// Customer the repair is performed for.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Description of the unit under repair.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Manufacturer part number.
    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    /// Unit serial number.
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Customer purchase-order number.
    pub fn lpo_number(&self) -> Option<&str> {
        self.lpo_number.as_deref()
    }

    /// Customer purchase-order date.
    pub fn lpo_date(&self) -> Option<NaiveDate> {
        self.lpo_date
    }

    /// Repair-order number.
    pub fn ro_number(&self) -> Option<&str> {
        self.ro_number.as_deref()
    }

    /// Repair-order date.
    pub fn kq_repair_order_date(&self) -> Option<NaiveDate> {
        self.kq_repair_order_date
    }

    /// Internal job card number.
    pub fn job_card_no(&self) -> &str {
        &self.job_card_no
    }

    /// Job card date.
    pub fn job_card_date(&self) -> Option<NaiveDate> {
        self.job_card_date
    }

    /// Works-order number.
    pub fn kq_works_order_wo_no(&self) -> Option<&str> {
        self.kq_works_order_wo_no.as_deref()
    }

    /// Works-order date.
    pub fn kq_works_order_date(&self) -> Option<NaiveDate> {
        self.kq_works_order_date
    }

    /// Initial workflow state.
    pub fn job_status(&self) -> JobStatus {
        self.job_status
    }

    /// Date the workflow state was set.
    pub fn job_status_date(&self) -> Option<NaiveDate> {
        self.job_status_date
    }

    /// Whether the job card has been shared with finance.
    pub fn job_card_shared_with_finance(&self) -> FinanceShared {
        self.job_card_shared_with_finance
    }
}

/// Partial update for one tracker record.
///
/// `None` leaves the column untouched; nested options on nullable columns
/// distinguish "untouched" from "set to NULL".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobTrackerPatch {
    /// Replacement customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement part number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// Replacement serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Replacement LPO number; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpo_number: Option<Option<String>>,
    /// Replacement LPO date; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpo_date: Option<Option<NaiveDate>>,
    /// Replacement repair-order number; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ro_number: Option<Option<String>>,
    /// Replacement repair-order date; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kq_repair_order_date: Option<Option<NaiveDate>>,
    /// Replacement job card number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_card_no: Option<String>,
    /// Replacement job card date; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_card_date: Option<Option<NaiveDate>>,
    /// Replacement works-order number; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kq_works_order_wo_no: Option<Option<String>>,
    /// Replacement works-order date; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kq_works_order_date: Option<Option<NaiveDate>>,
    /// Replacement workflow state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,
    /// Replacement status date; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status_date: Option<Option<NaiveDate>>,
    /// Replacement finance-sharing flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_card_shared_with_finance: Option<FinanceShared>,
}

impl JobTrackerPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn draft() -> NewJobTrackerDraft {
        NewJobTrackerDraft {
            customer: "Kenya Airways".to_owned(),
            description: "Main wheel assy".to_owned(),
            job_card_no: "JC-0142".to_owned(),
            ..NewJobTrackerDraft::default()
        }
    }

    #[rstest]
    #[case("Pending", JobStatus::Pending)]
    #[case("In Progress", JobStatus::InProgress)]
    #[case("Completed", JobStatus::Completed)]
    #[case("On Hold", JobStatus::OnHold)]
    #[case("Cancelled", JobStatus::Cancelled)]
    fn job_status_parses_wire_strings(#[case] input: &str, #[case] expected: JobStatus) {
        assert_eq!(input.parse::<JobStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    fn job_status_serde_uses_wire_strings() {
        let value = serde_json::to_value(JobStatus::OnHold).expect("serialises");
        assert_eq!(value, serde_json::json!("On Hold"));
        let back: JobStatus = serde_json::from_value(value).expect("deserialises");
        assert_eq!(back, JobStatus::OnHold);
    }

    #[rstest]
    fn finance_flag_rejects_arbitrary_strings() {
        let err = "Maybe".parse::<FinanceShared>().expect_err("must fail");
        assert_eq!(err.input, "Maybe");
    }

    #[rstest]
    fn draft_defaults_fill_optional_columns() {
        let record = NewJobTrackerRecord::new(draft()).expect("valid draft");
        assert_eq!(record.part_number(), "");
        assert_eq!(record.serial_number(), "");
        assert_eq!(record.job_status(), JobStatus::Pending);
        assert_eq!(record.job_card_shared_with_finance(), FinanceShared::No);
    }

    #[rstest]
    fn draft_validation_rejects_blank_required_fields() {
        let mut missing_customer = draft();
        missing_customer.customer = " ".to_owned();
        assert_eq!(
            NewJobTrackerRecord::new(missing_customer),
            Err(JobTrackerValidationError::EmptyCustomer)
        );

        let mut missing_card = draft();
        missing_card.job_card_no = String::new();
        assert_eq!(
            NewJobTrackerRecord::new(missing_card),
            Err(JobTrackerValidationError::EmptyJobCardNo)
        );
    }

    #[rstest]
    fn patch_serialises_only_supplied_columns() {
        let patch = JobTrackerPatch {
            job_status: Some(JobStatus::Completed),
            lpo_number: Some(None),
            ..JobTrackerPatch::default()
        };
        let value = serde_json::to_value(&patch).expect("serialises");
        assert_eq!(
            value,
            serde_json::json!({ "job_status": "Completed", "lpo_number": null })
        );
    }

    #[rstest]
    fn empty_patch_reports_empty() {
        assert!(JobTrackerPatch::default().is_empty());
    }
}
