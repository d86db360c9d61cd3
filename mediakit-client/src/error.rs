//! Media Services client error types
//!
//! Every non-2xx answer from the service collapses into [`MediaError::Service`],
//! distinguished only by its status code. Transport and decoding failures get
//! their own variants.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Maximum response body size for media service calls (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Error type for all Media Services operations.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error {status}: {message}")]
    Service {
        status: u16,
        message: String,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

impl MediaError {
    /// HTTP status returned by the service, if this error came from one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Service { status: 404, .. })
    }

    /// Raw response body of a service error (empty for other variants).
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Service { body, .. } => body,
            _ => "",
        }
    }
}

/// OData error document, in either the verbose (`error`) or light (`odata.error`) shape.
#[derive(Debug, Deserialize)]
struct ODataErrorEnvelope {
    #[serde(alias = "odata.error")]
    error: ODataErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ODataErrorDetail {
    message: ODataErrorMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ODataErrorMessage {
    Localized { value: String },
    Plain(String),
}

/// Pull the human readable message out of an OData error body.
fn odata_error_message(body: &str) -> Option<String> {
    let envelope: ODataErrorEnvelope = serde_json::from_str(body).ok()?;
    let message = match envelope.error.message {
        ODataErrorMessage::Localized { value } | ODataErrorMessage::Plain(value) => value,
    };
    (!message.is_empty()).then_some(message)
}

/// Read a response body, enforcing [`MAX_RESPONSE_SIZE`].
///
/// Checks the `Content-Length` hint first (if available), then the actual
/// number of bytes received.
pub async fn body_with_limit(response: reqwest::Response) -> Result<Vec<u8>, MediaError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(MediaError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(MediaError::ResponseTooLarge { size: bytes.len() as u64 });
    }
    Ok(bytes.to_vec())
}

/// Read a response body with size limit and deserialize it as JSON.
pub async fn json_with_limit<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, MediaError> {
    let bytes = body_with_limit(response).await?;
    serde_json::from_slice(&bytes).map_err(Into::into)
}

/// Body text of a failed response and, if it could not be read, why.
fn error_body(read: Result<Vec<u8>, MediaError>) -> (String, Option<String>) {
    match read {
        Ok(bytes) => (String::from_utf8_lossy(&bytes).into_owned(), None),
        Err(e) => (String::new(), Some(e.to_string())),
    }
}

/// Check HTTP response status before processing body.
///
/// Non-2xx responses are consumed and turned into [`MediaError::Service`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, MediaError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().to_string();
    let (body, body_error) = error_body(body_with_limit(resp).await);
    let message = odata_error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string());

    warn!(
        status = status.as_u16(),
        %url,
        %message,
        body_error = body_error.as_deref(),
        "Media service request failed"
    );

    Err(MediaError::Service {
        status: status.as_u16(),
        message,
        body,
    })
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for MediaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for MediaError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}
