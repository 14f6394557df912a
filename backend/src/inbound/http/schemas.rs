//! Shared response schemas for the HTTP façade.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Mutation response carrying the affected record's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdResponseBody {
    /// Identifier of the created or updated record.
    pub id: Uuid,
}
