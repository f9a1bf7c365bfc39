//! HTTP transport abstraction.
//!
//! # Design
//! - Requests and responses are plain data so the client can be exercised natively.
//! - The browser implementation wraps `gloo-net`; tests script responses.
//! - A transport only fails when no response was received; status codes are data.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// HTTP verbs used by the backend contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

/// Encoded request payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// `application/json` body.
    Json(String),
    /// `application/x-www-form-urlencoded` body.
    Form(String),
}

impl RequestBody {
    /// Content type header value for the body, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some("application/json"),
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    /// Raw encoded body text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Json(body) | Self::Form(body) => Some(body),
        }
    }
}

/// Outbound HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Extra headers (content type is derived from the body).
    pub headers: Vec<(String, String)>,
    /// Payload.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Build a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Build a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload cannot be serialised.
    pub fn post_json<B: Serialize>(
        url: impl Into<String>,
        body: &B,
    ) -> Result<Self, TransportError> {
        let encoded = serde_json::to_string(body)
            .map_err(|err| TransportError::Build(format!("encode body: {err}")))?;
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Json(encoded),
        })
    }

    /// Build a POST request with a form-encoded body.
    #[must_use]
    pub fn post_form(url: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        let encoded = fields
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(encoded),
        }
    }

    /// Replace or add a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {token}"))
    }

    /// Look up a header value (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response received from the server, whatever its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Failures where no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request was sent but nothing came back (network down, CORS, server unreachable).
    #[error("no response from server: {0}")]
    NoResponse(String),
    /// The request could not be constructed.
    #[error("failed to build request: {0}")]
    Build(String),
}

/// Sends HTTP requests.
#[async_trait(?Send)]
pub trait Transport {
    /// Send a request and return the response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_is_url_encoded() {
        let request = HttpRequest::post_form(
            "http://api/auth/login",
            &[("username", "a b"), ("password", "p&w=1")],
        );
        assert_eq!(
            request.body,
            RequestBody::Form("username=a%20b&password=p%26w%3D1".to_string())
        );
        assert_eq!(
            request.body.content_type(),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn bearer_header_replaces_previous_value() {
        let request = HttpRequest::get("http://api/x")
            .with_bearer("one")
            .with_header("authorization", "Bearer two");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("Authorization"), Some("Bearer two"));
    }

    #[test]
    fn success_range_is_2xx() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 302,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
