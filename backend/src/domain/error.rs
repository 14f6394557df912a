//! Domain-level error type.
//!
//! Transport agnostic: inbound adapters map these errors to HTTP responses,
//! and library callers match on [`ErrorCode`] without caring which backend
//! produced the failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::RepositoryError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// The write conflicts with existing data (constraint violation).
    Conflict,
    /// The backing store is unreachable or out of connections.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such job");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error with the given code and message.
    ///
    /// An empty message is replaced with the code's default wording so the
    /// invariant holds without forcing every call site through a `Result`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            default_message(code).to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad field")
    ///     .with_details(json!({ "field": "title" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn default_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Invalid request",
        ErrorCode::NotFound => "Record not found",
        ErrorCode::Conflict => "Conflicting write",
        ErrorCode::ServiceUnavailable => "Backend unavailable",
        ErrorCode::InternalError => "Internal error",
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Connection { message } => Self::service_unavailable(message),
            RepositoryError::Query { message } => Self::internal(message),
            RepositoryError::Conflict { message } => Self::conflict(message),
            RepositoryError::NotFound { id } => Self::not_found(format!("no record with id {id}")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    fn empty_message_falls_back_to_code_wording() {
        let err = Error::new(ErrorCode::NotFound, "  ");
        assert_eq!(err.message(), "Record not found");
    }

    #[rstest]
    fn details_round_trip_through_serde() {
        let err = Error::invalid_request("bad").with_details(serde_json::json!({ "field": "x" }));
        let value = serde_json::to_value(&err).expect("serialises");
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"]["field"], "x");
    }

    #[rstest]
    #[case(RepositoryError::connection("pool dry"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("bad row"), ErrorCode::InternalError)]
    #[case(RepositoryError::conflict("duplicate"), ErrorCode::Conflict)]
    fn repository_errors_map_to_expected_codes(
        #[case] err: RepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(err).code(), expected);
    }

    #[rstest]
    fn missing_row_maps_to_not_found_with_id() {
        let id = Uuid::new_v4();
        let err = Error::from(RepositoryError::not_found(id));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains(&id.to_string()));
    }
}
