//! Job tracker façade handlers.
//!
//! ```text
//! GET /api/job-tracker
//! POST /api/job-tracker {"customer":"KQ","description":"Wheel","job_card_no":"JC-1"}
//! PATCH /api/job-tracker/{id} {"job_status":"Completed"}
//! ```

use actix_web::{get, patch, post, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Error, FinanceShared, JOB_TRACKER_COLUMNS, JobStatus, JobTrackerPatch, JobTrackerRecord,
    JobTrackerValidationError, NewJobTrackerDraft, NewJobTrackerRecord,
    list_job_tracker_with_fallback,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::IdResponseBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, double_option, ensure_known_columns, ensure_non_empty_patch, invalid_body_error,
    require_value,
};

/// Request payload for creating a job tracker record.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateJobTrackerBody {
    /// Customer the repair is performed for.
    pub customer: String,
    /// Description of the unit under repair.
    pub description: String,
    /// Manufacturer part number.
    #[serde(default)]
    pub part_number: Option<String>,
    /// Unit serial number.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Customer purchase-order number.
    #[serde(default)]
    pub lpo_number: Option<String>,
    /// Customer purchase-order date (ISO date).
    #[serde(default)]
    pub lpo_date: Option<NaiveDate>,
    /// Repair-order number.
    #[serde(default)]
    pub ro_number: Option<String>,
    /// Repair-order date (ISO date).
    #[serde(default)]
    pub kq_repair_order_date: Option<NaiveDate>,
    /// Internal job card number.
    pub job_card_no: String,
    /// Job card date (ISO date).
    #[serde(default)]
    pub job_card_date: Option<NaiveDate>,
    /// Works-order number.
    #[serde(default)]
    pub kq_works_order_wo_no: Option<String>,
    /// Works-order date (ISO date).
    #[serde(default)]
    pub kq_works_order_date: Option<NaiveDate>,
    /// Initial workflow state; defaults to "Pending".
    #[serde(default)]
    pub job_status: Option<JobStatus>,
    /// Date the workflow state was set (ISO date).
    #[serde(default)]
    pub job_status_date: Option<NaiveDate>,
    /// Whether the job card has been shared with finance; defaults to "No".
    #[serde(default)]
    pub job_card_shared_with_finance: Option<FinanceShared>,
}

/// Partial-update payload for a job tracker record.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobTrackerPatchBody {
    #[serde(default, deserialize_with = "double_option")]
    customer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    part_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    lpo_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    lpo_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    ro_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    kq_repair_order_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    job_card_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    job_card_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    kq_works_order_wo_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    kq_works_order_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    job_status: Option<Option<JobStatus>>,
    #[serde(default, deserialize_with = "double_option")]
    job_status_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    job_card_shared_with_finance: Option<Option<FinanceShared>>,
}

impl TryFrom<JobTrackerPatchBody> for JobTrackerPatch {
    type Error = Error;

    fn try_from(body: JobTrackerPatchBody) -> Result<Self, Self::Error> {
        Ok(Self {
            customer: require_value(FieldName::new("customer"), body.customer)?,
            description: require_value(FieldName::new("description"), body.description)?,
            part_number: require_value(FieldName::new("part_number"), body.part_number)?,
            serial_number: require_value(FieldName::new("serial_number"), body.serial_number)?,
            lpo_number: body.lpo_number,
            lpo_date: body.lpo_date,
            ro_number: body.ro_number,
            kq_repair_order_date: body.kq_repair_order_date,
            job_card_no: require_value(FieldName::new("job_card_no"), body.job_card_no)?,
            job_card_date: body.job_card_date,
            kq_works_order_wo_no: body.kq_works_order_wo_no,
            kq_works_order_date: body.kq_works_order_date,
            job_status: require_value(FieldName::new("job_status"), body.job_status)?,
            job_status_date: body.job_status_date,
            job_card_shared_with_finance: require_value(
                FieldName::new("job_card_shared_with_finance"),
                body.job_card_shared_with_finance,
            )?,
        })
    }
}

fn map_validation_error(err: JobTrackerValidationError) -> Error {
    let field = match err {
        JobTrackerValidationError::EmptyCustomer => "customer",
        JobTrackerValidationError::EmptyDescription => "description",
        JobTrackerValidationError::EmptyJobCardNo => "job_card_no",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "empty_field",
    }))
}

fn body_as_object(body: &Value) -> Result<&serde_json::Map<String, Value>, Error> {
    body.as_object()
        .ok_or_else(|| Error::invalid_request("request body must be a JSON object"))
}

/// List job tracker records, capped at 500 rows.
///
/// Ordered newest first; when the ordered read fails the same capped read is
/// retried once without ordering.
#[utoipa::path(
    get,
    path = "/api/job-tracker",
    responses(
        (status = 200, description = "Tracker records", body = [JobTrackerRecord]),
        (status = 503, description = "Backend unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["job-tracker"],
    operation_id = "listJobTracker"
)]
#[get("/job-tracker")]
pub async fn list_job_tracker(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<JobTrackerRecord>>> {
    let records = list_job_tracker_with_fallback(state.job_tracker.as_ref()).await?;
    Ok(web::Json(records))
}

/// Create a job tracker record.
#[utoipa::path(
    post,
    path = "/api/job-tracker",
    request_body = CreateJobTrackerBody,
    responses(
        (status = 200, description = "Record created", body = IdResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Constraint violation", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["job-tracker"],
    operation_id = "createJobTracker"
)]
#[post("/job-tracker")]
pub async fn create_job_tracker(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<IdResponseBody>> {
    let map = body_as_object(&body)?;
    ensure_known_columns(map, JOB_TRACKER_COLUMNS)?;

    let parsed: CreateJobTrackerBody =
        serde_json::from_value(Value::Object(map.clone())).map_err(|err| invalid_body_error(&err))?;

    let record = NewJobTrackerRecord::new(NewJobTrackerDraft {
        customer: parsed.customer,
        description: parsed.description,
        part_number: parsed.part_number,
        serial_number: parsed.serial_number,
        lpo_number: parsed.lpo_number,
        lpo_date: parsed.lpo_date,
        ro_number: parsed.ro_number,
        kq_repair_order_date: parsed.kq_repair_order_date,
        job_card_no: parsed.job_card_no,
        job_card_date: parsed.job_card_date,
        kq_works_order_wo_no: parsed.kq_works_order_wo_no,
        kq_works_order_date: parsed.kq_works_order_date,
        job_status: parsed.job_status,
        job_status_date: parsed.job_status_date,
        job_card_shared_with_finance: parsed.job_card_shared_with_finance,
    })
    .map_err(map_validation_error)?;

    let id = state.job_tracker.create(&record).await?;
    Ok(web::Json(IdResponseBody { id }))
}

/// Partially update the tracker record with the given id.
#[utoipa::path(
    patch,
    path = "/api/job-tracker/{id}",
    params(("id" = Uuid, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record updated", body = IdResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No record with that id", body = Error),
        (status = 409, description = "Constraint violation", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["job-tracker"],
    operation_id = "updateJobTracker"
)]
#[patch("/job-tracker/{id}")]
pub async fn update_job_tracker(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<IdResponseBody>> {
    let map = body_as_object(&body)?;
    ensure_non_empty_patch(map)?;
    ensure_known_columns(map, JOB_TRACKER_COLUMNS)?;

    let parsed: JobTrackerPatchBody =
        serde_json::from_value(Value::Object(map.clone())).map_err(|err| invalid_body_error(&err))?;
    let patch = JobTrackerPatch::try_from(parsed)?;

    let id = state.job_tracker.update(path.into_inner(), &patch).await?;
    Ok(web::Json(IdResponseBody { id }))
}
