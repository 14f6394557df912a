//! Shared validation helpers for the HTTP façade.
//!
//! The column allow-list check runs before any body is deserialised: request
//! keys are compared against the schema-derived column lists, and anything
//! unknown is a client error. Caller-supplied strings therefore never reach
//! an identifier position.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Reject request bodies containing keys outside the entity's column list.
pub(crate) fn ensure_known_columns(
    body: &Map<String, Value>,
    allowed: &[&str],
) -> Result<(), Error> {
    for key in body.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(
                Error::invalid_request(format!("unknown field: {key}")).with_details(json!({
                    "field": key,
                    "code": "unknown_field",
                })),
            );
        }
    }
    Ok(())
}

/// Reject empty request bodies before they reach a query builder.
pub(crate) fn ensure_non_empty_patch(body: &Map<String, Value>) -> Result<(), Error> {
    if body.is_empty() {
        return Err(Error::invalid_request(
            "patch must change at least one field",
        ));
    }
    Ok(())
}

/// Map a body deserialisation failure to a client error.
pub(crate) fn invalid_body_error(err: &serde_json::Error) -> Error {
    Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": "invalid_body" }))
}

/// Error for an explicit `null` on a column that cannot be NULL.
pub(crate) fn null_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must not be null")).with_details(json!({
        "field": field,
        "code": "null_field",
    }))
}

/// Unwrap a double-option field, rejecting explicit `null` on a required
/// column.
pub(crate) fn require_value<T>(
    field: FieldName,
    value: Option<Option<T>>,
) -> Result<Option<T>, Error> {
    match value {
        Some(None) => Err(null_field_error(field)),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

/// Deserialise a field that distinguishes "absent" from "present but null".
///
/// Combined with `#[serde(default)]`, an absent key yields `None`, an
/// explicit `null` yields `Some(None)`, and a value yields `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[rstest]
    fn known_columns_pass() {
        let map = body(json!({ "title": "x", "status": "Completed" }));
        ensure_known_columns(&map, &["title", "status"]).expect("allowed keys pass");
    }

    #[rstest]
    fn unknown_columns_are_client_errors() {
        let map = body(json!({ "\"; DROP TABLE internal_mro_jobs; --": 1 }));
        let err = ensure_known_columns(&map, &["title"]).expect_err("must reject");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "unknown_field");
    }

    #[rstest]
    fn empty_patch_is_rejected() {
        let err = ensure_non_empty_patch(&Map::new()).expect_err("must reject");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        value: Option<Option<String>>,
    }

    #[rstest]
    #[case(json!({}), None)]
    #[case(json!({ "value": null }), Some(None))]
    #[case(json!({ "value": "x" }), Some(Some("x".to_owned())))]
    fn double_option_distinguishes_absent_null_and_value(
        #[case] input: Value,
        #[case] expected: Option<Option<String>>,
    ) {
        let probe: Probe = serde_json::from_value(input).expect("deserialises");
        assert_eq!(probe.value, expected);
    }
}
