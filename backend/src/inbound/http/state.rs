//! Shared HTTP adapter state.
//!
//! Façade handlers receive this via `actix_web::web::Data`, so they depend
//! only on the repository ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureJobTrackerRepository, FixtureMroJobRepository, JobTrackerRepository, MroJobRepository,
};

/// Dependency bundle for the façade handlers.
#[derive(Clone)]
pub struct HttpState {
    /// MRO job persistence port.
    pub mro_jobs: Arc<dyn MroJobRepository>,
    /// Job tracker persistence port.
    pub job_tracker: Arc<dyn JobTrackerRepository>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        mro_jobs: Arc<dyn MroJobRepository>,
        job_tracker: Arc<dyn JobTrackerRepository>,
    ) -> Self {
        Self {
            mro_jobs,
            job_tracker,
        }
    }

    /// State backed entirely by fixtures, for tests and wiring smoke checks.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixtureMroJobRepository),
            Arc::new(FixtureJobTrackerRepository),
        )
    }
}
