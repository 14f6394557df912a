//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` with `bb8` connection pooling. This is the "direct store"
//! side of the backend switch.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **One pool**: adapters share the process-wide [`DbPool`]; a checkout is
//!   scoped to a single port call and released on drop.

mod diesel_error_mapping;
mod diesel_job_tracker_repository;
mod diesel_mro_job_repository;
mod models;
mod pool;
mod schema;

pub use diesel_job_tracker_repository::DieselJobTrackerRepository;
pub use diesel_mro_job_repository::DieselMroJobRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
