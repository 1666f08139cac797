//! Transport seam between the API gateway and the browser's fetch.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, always sent with the
//! ambient browser credentials so the HTTP-only session cookie rides along.
//! Elsewhere: a network error, since these requests only make sense in the
//! browser.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::fmt;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const NO_CONTENT: u16 = 204;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including the API prefix.
    pub url: String,
    /// Pre-encoded JSON body, if any.
    pub body: Option<String>,
    /// Explicit bearer for backends that read `Authorization` instead of the cookie.
    pub bearer: Option<String>,
}

/// Raw response as seen by the gateway, before envelope handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains(JSON_CONTENT_TYPE))
    }
}

/// The request never reached the server or no response came back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request and hands back the raw response.
///
/// Implementations attach the ambient credential themselves; callers never
/// see or supply cookie bytes.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// Production transport backed by `fetch` with `credentials: include`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        async move {
            #[cfg(feature = "csr")]
            {
                send_with_fetch(request).await
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = request;
                Err(TransportError("not available outside the browser".to_owned()))
            }
        }
    }
}

#[cfg(feature = "csr")]
async fn send_with_fetch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use gloo_net::http::Request;

    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Patch => Request::patch(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    let mut builder = builder.credentials(web_sys::RequestCredentials::Include);
    if let Some(token) = request.bearer.as_deref() {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }

    let prepared = match request.body {
        Some(body) => builder
            .header("Content-Type", JSON_CONTENT_TYPE)
            .body(body)
            .map_err(|e| TransportError(e.to_string()))?,
        None => builder.build().map_err(|e| TransportError(e.to_string()))?,
    };

    let resp = prepared.send().await.map_err(|e| TransportError(e.to_string()))?;
    let status = resp.status();
    let status_text = resp.status_text();
    let content_type = resp.headers().get("content-type");
    let body = if status == NO_CONTENT {
        String::new()
    } else {
        resp.text().await.map_err(|e| TransportError(e.to_string()))?
    };

    Ok(HttpResponse { status, status_text, content_type, body })
}
