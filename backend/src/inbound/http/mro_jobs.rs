//! MRO job façade handlers.
//!
//! ```text
//! GET /api/mro
//! POST /api/mro {"title":"A-check","aircraft_reg_no":"5Y-KQD"}
//! PATCH /api/mro/{id} {"status":"Completed"}
//! ```

use actix_web::{get, patch, post, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Error, MRO_JOB_COLUMNS, MroJob, MroJobPatch, MroJobStatus, MroJobValidationError, NewMroJob,
    NewMroJobDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::IdResponseBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, double_option, ensure_known_columns, ensure_non_empty_patch, invalid_body_error,
    require_value,
};

/// Request payload for creating an MRO job.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateMroJobBody {
    /// Short description of the work.
    pub title: String,
    /// Registration number of the aircraft being serviced.
    pub aircraft_reg_no: String,
    /// Engineer the job is assigned to.
    #[serde(default)]
    pub assigned_engineer: Option<String>,
    /// Scheduled maintenance date (ISO date).
    #[serde(default)]
    pub maintenance_date: Option<NaiveDate>,
    /// Initial workflow state; defaults to "In Progress".
    #[serde(default)]
    pub status: Option<MroJobStatus>,
}

/// Partial-update payload for an MRO job.
///
/// Absent keys leave the column untouched; explicit `null` clears nullable
/// columns and is rejected on required ones.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MroJobPatchBody {
    #[serde(default, deserialize_with = "double_option")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    aircraft_reg_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    assigned_engineer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    maintenance_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    status: Option<Option<MroJobStatus>>,
}

impl TryFrom<MroJobPatchBody> for MroJobPatch {
    type Error = Error;

    fn try_from(body: MroJobPatchBody) -> Result<Self, Self::Error> {
        Ok(Self {
            title: require_value(FieldName::new("title"), body.title)?,
            aircraft_reg_no: require_value(FieldName::new("aircraft_reg_no"), body.aircraft_reg_no)?,
            assigned_engineer: body.assigned_engineer,
            maintenance_date: body.maintenance_date,
            status: require_value(FieldName::new("status"), body.status)?,
        })
    }
}

fn map_validation_error(err: MroJobValidationError) -> Error {
    let field = match err {
        MroJobValidationError::EmptyTitle => "title",
        MroJobValidationError::EmptyAircraftRegNo => "aircraft_reg_no",
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

/// List MRO jobs, newest first, capped at 200 rows.
#[utoipa::path(
    get,
    path = "/api/mro",
    responses(
        (status = 200, description = "MRO jobs", body = [MroJob]),
        (status = 503, description = "Backend unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["mro"],
    operation_id = "listMroJobs"
)]
#[get("/mro")]
pub async fn list_mro_jobs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<MroJob>>> {
    let jobs = state.mro_jobs.list_recent().await?;
    Ok(web::Json(jobs))
}

/// Create an MRO job.
#[utoipa::path(
    post,
    path = "/api/mro",
    request_body = CreateMroJobBody,
    responses(
        (status = 200, description = "Job created", body = IdResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Constraint violation", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["mro"],
    operation_id = "createMroJob"
)]
#[post("/mro")]
pub async fn create_mro_job(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<IdResponseBody>> {
    let map = body_as_object(&body)?;
    ensure_known_columns(map, MRO_JOB_COLUMNS)?;

    let parsed: CreateMroJobBody =
        serde_json::from_value(Value::Object(map.clone())).map_err(|err| invalid_body_error(&err))?;

    let job = NewMroJob::new(NewMroJobDraft {
        title: parsed.title,
        aircraft_reg_no: parsed.aircraft_reg_no,
        assigned_engineer: parsed.assigned_engineer,
        maintenance_date: parsed.maintenance_date,
        status: parsed.status.unwrap_or(MroJobStatus::InProgress),
    })
    .map_err(map_validation_error)?;

    let id = state.mro_jobs.create(&job).await?;
    Ok(web::Json(IdResponseBody { id }))
}

/// Partially update the MRO job with the given id.
#[utoipa::path(
    patch,
    path = "/api/mro/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job updated", body = IdResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No job with that id", body = Error),
        (status = 409, description = "Constraint violation", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["mro"],
    operation_id = "updateMroJob"
)]
#[patch("/mro/{id}")]
pub async fn update_mro_job(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<IdResponseBody>> {
    let map = body_as_object(&body)?;
    ensure_non_empty_patch(map)?;
    ensure_known_columns(map, MRO_JOB_COLUMNS)?;

    let parsed: MroJobPatchBody =
        serde_json::from_value(Value::Object(map.clone())).map_err(|err| invalid_body_error(&err))?;
    let patch = MroJobPatch::try_from(parsed)?;

    let id = state.mro_jobs.update(path.into_inner(), &patch).await?;
    Ok(web::Json(IdResponseBody { id }))
}
