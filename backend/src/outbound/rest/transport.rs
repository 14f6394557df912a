//! Reqwest transport shared by the REST repository adapters.
//!
//! Owns request plumbing only: URL building, timeouts, JSON decoding, and
//! classification of transport and status failures. The per-entity adapters
//! translate these failures into port errors with entity context.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;

/// Failures observed at the HTTP transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransportError {
    /// The request never completed (connect failure, timeout).
    Unreachable(String),
    /// The façade answered with a non-success status.
    Status(StatusCode, String),
    /// The response body was not the expected JSON shape.
    Decode(String),
}

/// Map a transport failure onto the shared repository error.
///
/// `target` carries the id of the row a mutation addressed so a façade 404
/// surfaces as the port's not-found variant.
pub(crate) fn map_error(err: TransportError, target: Option<Uuid>) -> RepositoryError {
    match err {
        TransportError::Unreachable(message) => RepositoryError::connection(message),
        TransportError::Status(StatusCode::NOT_FOUND, _) => target.map_or_else(
            || RepositoryError::query("record not found"),
            RepositoryError::not_found,
        ),
        TransportError::Status(StatusCode::CONFLICT, message) => RepositoryError::conflict(message),
        TransportError::Status(StatusCode::SERVICE_UNAVAILABLE, message) => {
            RepositoryError::connection(message)
        }
        TransportError::Status(status, message) => {
            RepositoryError::query(format!("status {}: {message}", status.as_u16()))
        }
        TransportError::Decode(message) => RepositoryError::query(message),
    }
}

/// Response envelope returned by façade mutations.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct IdEnvelope {
    pub id: Uuid,
}

/// HTTP client bound to one façade base URL.
pub struct RestTransport {
    client: Client,
    base_url: String,
}

impl RestTransport {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a transport for the given façade base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .patch(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    TransportError::Unreachable(error.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| TransportError::Unreachable(err.to_string()))?;

    if !status.is_success() {
        return Err(TransportError::Status(status, body_preview(body.as_ref())));
    }

    serde_json::from_slice(body.as_ref())
        .map_err(|err| TransportError::Decode(format!("invalid façade JSON payload: {err}")))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
