//! Server construction and wiring.

mod config;
mod state_builders;

pub use config::{AppConfig, BackendMode, ConfigError};
pub use state_builders::{StateBuildError, build_data_access, build_http_state};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::job_tracker::{create_job_tracker, list_job_tracker, update_job_tracker};
use crate::inbound::http::mro_jobs::{create_mro_job, list_mro_jobs, update_mro_job};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, PoolConfig};

/// Assemble the façade application from shared state.
///
/// Entity endpoints live under `/api`; health probes sit at the root so
/// orchestration keeps working if the API prefix ever changes. Swagger UI is
/// mounted on debug builds only.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(list_mro_jobs)
        .service(create_mro_job)
        .service(update_mro_job)
        .service(list_job_tracker)
        .service(create_job_tracker)
        .service(update_job_tracker);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the pool, wire the façade, and serve until shutdown.
///
/// Readiness flips to 200 only after the pool exists and the socket is
/// bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] for missing configuration, pool
/// construction failures, and bind/serve failures.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let database_url = config
        .database_url
        .clone()
        .ok_or_else(|| std::io::Error::other("DATABASE_URL must be set to serve the façade"))?;

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(config.pool_size),
    )
    .await
    .map_err(|err| std::io::Error::other(err.to_string()))?;

    let http_state = web::Data::new(build_http_state(&pool));
    let health_state = web::Data::new(HealthState::new());

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

#[cfg(test)]
mod tests {
    //! Wiring smoke checks over fixture-backed state.

    use actix_web::{test as actix_test, web};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_rt::test]
    async fn facade_routes_respond_over_fixture_state() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let state = web::Data::new(HttpState::fixture());
        let app = actix_test::init_service(build_app(health, state)).await;

        for uri in ["/api/mro", "/api/job-tracker", "/health/ready", "/health/live"] {
            let request = actix_test::TestRequest::get().uri(uri).to_request();
            let response = actix_test::call_service(&app, request).await;
            assert!(response.status().is_success(), "GET {uri} should succeed");
        }
    }
}
