//! Builders wiring repository adapters into handler state and the
//! data-access service.
//!
//! The backend switch lives here and only here: views receive a
//! [`DataAccessService`] with the conditional already resolved, so no call
//! site branches on the backend mode.

use std::sync::Arc;

use crate::domain::DataAccessService;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, DieselJobTrackerRepository, DieselMroJobRepository};
use crate::outbound::rest::{RestJobTrackerRepository, RestMroJobRepository, RestTransport};

use super::config::{AppConfig, BackendMode};

/// Failures while wiring adapters from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateBuildError {
    /// Direct mode was selected without a database pool to back it.
    #[error("direct backend selected but no database pool is available")]
    MissingDatabase,
    /// Rest mode was selected without `MRO_API_BASE_URL`.
    #[error("rest backend selected but MRO_API_BASE_URL is not set")]
    MissingBaseUrl,
    /// The HTTP client for the REST adapters could not be constructed.
    #[error("failed to build REST transport: {message}")]
    Transport {
        /// Underlying reqwest failure description.
        message: String,
    },
}

/// Build the façade handler state over Diesel repositories.
///
/// The façade always talks to the store directly; the backend switch applies
/// to the data-access layer, not to the façade's own persistence.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState::new(
        Arc::new(DieselMroJobRepository::new(pool.clone())),
        Arc::new(DieselJobTrackerRepository::new(pool.clone())),
    )
}

/// Build the data-access service for the configured backend.
///
/// # Errors
///
/// Returns [`StateBuildError`] when the selected mode is missing its
/// prerequisites (pool for direct, base URL for rest).
pub fn build_data_access(
    config: &AppConfig,
    pool: Option<&DbPool>,
) -> Result<DataAccessService, StateBuildError> {
    match config.backend {
        BackendMode::Direct => {
            let pool = pool.ok_or(StateBuildError::MissingDatabase)?;
            Ok(DataAccessService::new(
                Arc::new(DieselMroJobRepository::new(pool.clone())),
                Arc::new(DieselJobTrackerRepository::new(pool.clone())),
                config.read_fallback,
            ))
        }
        BackendMode::Rest => {
            let base_url = config
                .api_base_url
                .as_ref()
                .ok_or(StateBuildError::MissingBaseUrl)?;
            let transport = RestTransport::new(base_url, RestTransport::DEFAULT_TIMEOUT)
                .map_err(|err| StateBuildError::Transport {
                    message: err.to_string(),
                })?;
            let transport = Arc::new(transport);
            Ok(DataAccessService::new(
                Arc::new(RestMroJobRepository::new(transport.clone())),
                Arc::new(RestJobTrackerRepository::new(transport)),
                config.read_fallback,
            ))
        }
    }
}
