//! API gateway: the single chokepoint for every backend call.
//!
//! Every request goes out through a [`Transport`] (which attaches the ambient
//! cookie credential) plus an optional explicit bearer header. Responses are
//! normalized here so services above only ever see a decoded value or a typed
//! [`GatewayError`].
//!
//! ERROR HANDLING
//! ==============
//! Nothing is swallowed at this layer and nothing is retried. Status errors
//! keep `status`, `status_text` and the decoded error envelope so callers can
//! branch on status class (401 reauthenticate, 403 insufficient role, 5xx
//! transient). A 2xx body that is not JSON is a protocol error and fatal for
//! that call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::http::{HttpRequest, HttpResponse, Method, NO_CONTENT, Transport, TransportError};
use super::types::ErrorEnvelope;

/// Non-2xx answer from the backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct StatusError {
    pub status: u16,
    pub status_text: String,
    /// Structured error body, when the backend sent a decodable one.
    pub data: Option<ErrorEnvelope>,
}

impl StatusError {
    /// Best human-readable message: envelope message, then envelope error,
    /// then the HTTP status text.
    pub fn message(&self) -> String {
        let envelope_text = self.data.as_ref().and_then(|d| {
            d.message
                .as_deref()
                .filter(|m| !m.is_empty())
                .or_else(|| Some(d.error.as_str()).filter(|e| !e.is_empty()))
        });
        match envelope_text {
            Some(text) => text.to_owned(),
            None if !self.status_text.is_empty() => self.status_text.clone(),
            None => format!("HTTP {}", self.status),
        }
    }
}

/// The backend answered, but not in the shape the contract promises.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("expected JSON response, got {}", .0.as_deref().unwrap_or("no content type"))]
    UnexpectedContentType(Option<String>),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("response had no content")]
    EmptyBody,
    #[error("could not encode request body: {0}")]
    EncodeBody(String),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("{0}")]
    Status(StatusError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.0)
    }
}

impl GatewayError {
    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(err) => Some(err.status),
            Self::Network(_) | Self::Protocol(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Network failures and 5xx: worth reporting, maybe worth a manual retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(err) => err.status >= 500,
            Self::Protocol(_) => false,
        }
    }
}

/// Typed HTTP client for the backend REST API.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    bearer: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    /// `base_url` is the API root (origin plus prefix), e.g.
    /// `http://localhost:8080/api/v1`.
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into(), bearer: None }
    }

    /// Also send `Authorization: Bearer <token>` on every request.
    ///
    /// The cookie stays the primary credential; the header exists for
    /// backends that authenticate from it instead.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send one request and decode the (possibly enveloped) response body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when no response arrived,
    /// [`GatewayError::Status`] for non-2xx answers and
    /// [`GatewayError::Protocol`] when the body does not match `R`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R, GatewayError> {
        let request = HttpRequest { method, url: self.url(path), body, bearer: self.bearer.clone() };
        let response = self.transport.send(request).await?;
        decode_value(decode_response(response)?)
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, GatewayError> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        self.request(Method::Post, path, Some(encode_body(body)?)).await
    }

    /// POST without a request body.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, GatewayError> {
        self.request(Method::Post, path, None).await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        self.request(Method::Put, path, Some(encode_body(body)?)).await
    }

    pub async fn patch<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        self.request(Method::Patch, path, Some(encode_body(body)?)).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, GatewayError> {
        self.request(Method::Delete, path, None).await
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, GatewayError> {
    serde_json::to_string(body).map_err(|e| ProtocolError::EncodeBody(e.to_string()).into())
}

/// Normalize a raw response into `None` (204), the decoded JSON value, or an error.
pub(crate) fn decode_response(response: HttpResponse) -> Result<Option<Value>, GatewayError> {
    if !response.is_success() {
        return Err(GatewayError::Status(status_error(response)));
    }
    if response.status == NO_CONTENT {
        return Ok(None);
    }
    if !response.is_json() {
        return Err(ProtocolError::UnexpectedContentType(response.content_type).into());
    }
    let value: Value =
        serde_json::from_str(&response.body).map_err(|e| ProtocolError::MalformedBody(e.to_string()))?;
    Ok(Some(unwrap_data_envelope(value)))
}

fn status_error(response: HttpResponse) -> StatusError {
    let data = if response.is_json() {
        serde_json::from_str::<ErrorEnvelope>(&response.body).ok()
    } else {
        None
    };
    StatusError { status: response.status, status_text: response.status_text, data }
}

/// Strip a single-key `{ "data": T }` wrapper. Objects with other keys next to
/// `data` (paginated lists) are left alone.
pub(crate) fn unwrap_data_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Build `R` from a decoded body; a 204 only satisfies types that accept
/// `null` (`()`, `Option<_>`, `IgnoredAny`).
fn decode_value<R: DeserializeOwned>(value: Option<Value>) -> Result<R, GatewayError> {
    match value {
        Some(value) => serde_json::from_value(value).map_err(|e| ProtocolError::MalformedBody(e.to_string()).into()),
        None => serde_json::from_value(Value::Null).map_err(|_| ProtocolError::EmptyBody.into()),
    }
}
