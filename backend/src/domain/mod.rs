//! Domain primitives and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP façade and
//! the persistence/REST adapters, the repository ports they plug into, and
//! the data-access service embedding views call. Types are immutable after
//! construction; invariants and serialisation contracts live in each type's
//! Rustdoc.

pub mod data_access;
pub mod error;
pub mod job_tracker;
pub mod mro_job;
pub mod ports;

pub use self::data_access::{DataAccessService, ReadFallback, list_job_tracker_with_fallback};
pub use self::error::{Error, ErrorCode};
pub use self::job_tracker::{
    FinanceShared, JOB_TRACKER_COLUMNS, JOB_TRACKER_LIST_LIMIT, JobStatus, JobTrackerPatch,
    JobTrackerRecord, JobTrackerValidationError, NewJobTrackerDraft, NewJobTrackerRecord,
    ParseFinanceSharedError, ParseJobStatusError,
};
pub use self::mro_job::{
    MRO_JOB_COLUMNS, MRO_JOB_LIST_LIMIT, MroItemSummary, MroJob, MroJobPatch, MroJobStatus,
    MroJobValidationError, NewMroJob, NewMroJobDraft, PROGRESS_PLACEHOLDER,
    ParseMroJobStatusError,
};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("nothing here"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
