//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for the
//! façade: entity endpoints, health probes, and their request/response
//! schemas. The generated specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the façade REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MRO backend API",
        description = "HTTP façade over the MRO inventory and job tracking store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::mro_jobs::list_mro_jobs,
        crate::inbound::http::mro_jobs::create_mro_job,
        crate::inbound::http::mro_jobs::update_mro_job,
        crate::inbound::http::job_tracker::list_job_tracker,
        crate::inbound::http::job_tracker::create_job_tracker,
        crate::inbound::http::job_tracker::update_job_tracker,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::MroJob,
        crate::domain::MroJobStatus,
        crate::domain::MroItemSummary,
        crate::domain::JobTrackerRecord,
        crate::domain::JobStatus,
        crate::domain::FinanceShared,
        crate::inbound::http::mro_jobs::CreateMroJobBody,
        crate::inbound::http::job_tracker::CreateJobTrackerBody,
        crate::inbound::http::schemas::IdResponseBody,
    )),
    tags(
        (name = "mro", description = "MRO job endpoints"),
        (name = "job-tracker", description = "Job tracker endpoints"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_lists_all_facade_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/mro",
            "/api/mro/{id}",
            "/api/job-tracker",
            "/api/job-tracker/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}, got {paths:?}"
            );
        }
    }
}
