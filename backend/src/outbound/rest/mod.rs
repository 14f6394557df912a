//! REST repository adapters speaking to the HTTP façade.
//!
//! The alternate side of the backend switch: the same ports the Diesel
//! adapters implement, served over HTTP instead of a database connection.
//! One [`RestTransport`] is shared by both adapters so the process keeps a
//! single connection pool towards the façade.

mod job_tracker;
mod mro_jobs;
mod transport;

pub use job_tracker::RestJobTrackerRepository;
pub use mro_jobs::RestMroJobRepository;
pub use transport::RestTransport;
