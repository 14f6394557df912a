//! MRO inventory and job-tracking backend.
//!
//! The crate is organised hexagonally:
//!
//! - [`domain`]: entities, repository ports, and the data-access service
//!   that embedding views call.
//! - [`inbound`]: the HTTP façade exposing the entity endpoints.
//! - [`outbound`]: Diesel (direct store) and reqwest (REST) adapters
//!   implementing the ports.
//! - [`server`]: configuration, wiring, and the actix server loop.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
