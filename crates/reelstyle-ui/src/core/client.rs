//! Backend HTTP client with auth and error interception.
//!
//! # Design
//! - The bearer token is read from storage on every request, never cached.
//! - A 401 clears the stored token and surfaces as [`ApiError::Unauthorized`];
//!   navigation is left to the caller (see `core::expiry`).
//! - Auth endpoints bypass interception so a failed login never touches storage.

use std::rc::Rc;

use reelstyle_api_models::{
    AnalysisResult, AnalyzeRequest, ErrorBody, GenerateRequest, GenerateResponse,
    GeneratedScript, Profile, RegisterRequest, TokenResponse, UserRecord, VideoRecord,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::storage::{KeyValueStore, TOKEN_KEY, load_token};
use crate::core::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Message used when the request left but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str =
    "No response from server. Please check your connection and ensure the backend server is running.";
/// Message used when the request could not be sent at all.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Normalised API failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Backend rejected the credentials (HTTP 401).
    #[error("{message}")]
    Unauthorized {
        /// Display message.
        message: String,
        /// Raw response body.
        body: Option<String>,
    },
    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Display message.
        message: String,
        /// Raw response body.
        body: Option<String>,
    },
    /// The request was sent but no response arrived.
    #[error("{message}")]
    NoResponse {
        /// Display message.
        message: String,
    },
    /// The request could not be built or sent.
    #[error("{message}")]
    Request {
        /// Display message.
        message: String,
    },
    /// A 2xx response did not match the expected payload.
    #[error("{message}")]
    Decode {
        /// HTTP status code.
        status: u16,
        /// Display message.
        message: String,
    },
}

impl ApiError {
    /// Classify a non-2xx response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = Some(response.body.clone()).filter(|body| !body.trim().is_empty());
        let message = parse_error_body(&response.body)
            .and_then(|parsed| parsed.text())
            .unwrap_or_else(|| format!("Request failed with status code {}", response.status));
        if response.status == 401 {
            Self::Unauthorized { message, body }
        } else {
            Self::Server {
                status: response.status,
                message,
                body,
            }
        }
    }

    /// Display message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message, .. }
            | Self::Server { message, .. }
            | Self::NoResponse { message }
            | Self::Request { message }
            | Self::Decode { message, .. } => message,
        }
    }

    /// HTTP status when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Server { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::NoResponse { .. } | Self::Request { .. } => None,
        }
    }

    /// Raw response body when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body, .. } | Self::Server { body, .. } => body.as_deref(),
            Self::NoResponse { .. } | Self::Request { .. } | Self::Decode { .. } => None,
        }
    }

    /// The backend's string `detail`, if the body carried one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        self.body()
            .and_then(parse_error_body)
            .and_then(|parsed| parsed.detail_text())
    }

    /// Whether the backend rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message for display, or `fallback` when the message is blank.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        let message = self.message().trim();
        if message.is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(_) => Self::NoResponse {
                message: NO_RESPONSE_MESSAGE.to_string(),
            },
            TransportError::Build(detail) => Self::Request {
                message: if detail.trim().is_empty() {
                    UNEXPECTED_MESSAGE.to_string()
                } else {
                    detail
                },
            },
        }
    }
}

fn parse_error_body(body: &str) -> Option<ErrorBody> {
    serde_json::from_str(body).ok()
}

/// Whether a request goes through the token and 401 interceptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Interception {
    Enabled,
    Bypassed,
}

/// HTTP client for the Reelstyle backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    storage: Rc<dyn KeyValueStore>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && Rc::ptr_eq(&self.transport, &other.transport)
            && Rc::ptr_eq(&self.storage, &other.storage)
    }
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/api/v1`).
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        storage: Rc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            storage,
        }
    }

    /// Configured base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request = request.with_header("Accept", "application/json");
        match load_token(self.storage.as_ref()) {
            Some(token) => request.with_bearer(&token),
            None => request,
        }
    }

    async fn execute(
        &self,
        request: HttpRequest,
        interception: Interception,
    ) -> Result<HttpResponse, ApiError> {
        let request = match interception {
            Interception::Enabled => self.authorize(request),
            Interception::Bypassed => request.with_header("Accept", "application/json"),
        };
        debug!(method = ?request.method, url = %request.url, "api request");
        let response = self.transport.send(request).await.map_err(|err| {
            warn!(error = %err, "api request failed without response");
            ApiError::from(err)
        })?;
        if response.is_success() {
            return Ok(response);
        }
        let error = ApiError::from_response(&response);
        if error.is_unauthorized() && interception == Interception::Enabled {
            warn!("api returned 401; clearing stored token");
            self.storage.remove(TOKEN_KEY);
        } else {
            warn!(status = response.status, message = error.message(), "api error");
        }
        Err(error)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        interception: Interception,
    ) -> Result<T, ApiError> {
        let response = self.execute(request, interception).await?;
        response.json().map_err(|err| {
            warn!(error = %err, "api response did not match the expected shape");
            ApiError::Decode {
                status: response.status,
                message: format!("Unexpected response from server: {err}"),
            }
        })
    }

    /// `POST /analyze`.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn analyze_video(&self, url: &str) -> Result<AnalysisResult, ApiError> {
        let body = AnalyzeRequest {
            url: url.to_string(),
        };
        let request = HttpRequest::post_json(self.url("analyze"), &body)?;
        self.fetch(request, Interception::Enabled).await
    }

    /// `GET /video/{id}`, converted into the analysis view model.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn get_video(&self, video_id: i64) -> Result<AnalysisResult, ApiError> {
        let request = HttpRequest::get(self.url(&format!("video/{video_id}")));
        let record: VideoRecord = self.fetch(request, Interception::Enabled).await?;
        Ok(record.into())
    }

    /// `GET /profile/{username}`.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn get_profile(&self, username: &str) -> Result<Profile, ApiError> {
        let path = format!("profile/{}", urlencoding::encode(username));
        self.fetch(HttpRequest::get(self.url(&path)), Interception::Enabled)
            .await
    }

    /// `POST /profile/{username}/refresh`.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn refresh_profile(&self, username: &str) -> Result<Profile, ApiError> {
        let path = format!("profile/{}/refresh", urlencoding::encode(username));
        let request = HttpRequest::post_json(self.url(&path), &serde_json::json!({}))?;
        self.fetch(request, Interception::Enabled).await
    }

    /// `POST /generate`.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn generate_script(
        &self,
        username: &str,
        topic: &str,
    ) -> Result<GeneratedScript, ApiError> {
        let body = GenerateRequest {
            username: username.to_string(),
            topic: topic.to_string(),
        };
        let request = HttpRequest::post_json(self.url("generate"), &body)?;
        let response: GenerateResponse = self.fetch(request, Interception::Enabled).await?;
        Ok(response.script_data)
    }

    /// Form-encoded `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = HttpRequest::post_form(
            self.url("auth/login"),
            &[("username", username), ("password", password)],
        );
        self.fetch(request, Interception::Bypassed).await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn register(&self, body: &RegisterRequest) -> Result<UserRecord, ApiError> {
        let request = HttpRequest::post_json(self.url("auth/register"), body)?;
        self.fetch(request, Interception::Bypassed).await
    }

    /// `GET /auth/me` with an explicit token.
    ///
    /// # Errors
    ///
    /// Returns the normalised failure.
    pub async fn me(&self, token: &str) -> Result<UserRecord, ApiError> {
        let request = HttpRequest::get(self.url("auth/me")).with_bearer(token);
        self.fetch(request, Interception::Bypassed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{MemoryStore, ScriptedTransport};
    use crate::core::transport::RequestBody;
    use serde_json::json;
    use std::error::Error;

    fn client(transport: &Rc<ScriptedTransport>, store: &Rc<MemoryStore>) -> ApiClient {
        ApiClient::new(
            "http://localhost:8000/api/v1/",
            transport.clone(),
            store.clone(),
        )
    }

    fn profile_body(username: &str) -> serde_json::Value {
        json!({"username": username, "master_profile": {}, "videos_count": 0, "videos": []})
    }

    #[tokio::test]
    async fn attaches_bearer_when_token_present() -> Result<(), Box<dyn Error>> {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::with(&[(TOKEN_KEY, "abc")]));
        transport.push_json(200, &profile_body("alice"));
        client(&transport, &store).get_profile("alice").await?;
        let sent = transport.last_request().ok_or("no request sent")?;
        assert_eq!(sent.header("Authorization"), Some("Bearer abc"));
        assert_eq!(sent.url, "http://localhost:8000/api/v1/profile/alice");
        Ok(())
    }

    #[tokio::test]
    async fn omits_bearer_without_token() -> Result<(), Box<dyn Error>> {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::with(&[(TOKEN_KEY, "  ")]));
        transport.push_json(200, &profile_body("alice"));
        client(&transport, &store).get_profile("alice").await?;
        let sent = transport.last_request().ok_or("no request sent")?;
        assert_eq!(sent.header("Authorization"), None);
        Ok(())
    }

    #[tokio::test]
    async fn token_is_read_per_request() -> Result<(), Box<dyn Error>> {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        let api = client(&transport, &store);
        transport.push_json(200, &profile_body("a"));
        transport.push_json(200, &profile_body("a"));
        api.get_profile("a").await?;
        store.set(TOKEN_KEY, "fresh");
        api.get_profile("a").await?;
        let requests = transport.requests();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(requests[1].header("Authorization"), Some("Bearer fresh"));
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_clears_token() {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::with(&[(TOKEN_KEY, "stale")]));
        transport.push_json(401, &json!({"detail": "Could not validate credentials"}));
        let result = client(&transport, &store).analyze_video("https://x").await;
        let Err(err) = result else {
            panic!("expected 401 error");
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Could not validate credentials");
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn server_error_prefers_detail_then_message() {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        let api = client(&transport, &store);
        transport.push_json(500, &json!({"detail": "Download failed"}));
        transport.push_json(400, &json!({"message": "Bad url"}));
        transport.push_json(422, &json!({"detail": [{"msg": "field required"}]}));

        let first = api.analyze_video("u").await.err();
        let second = api.analyze_video("u").await.err();
        let third = api.analyze_video("u").await.err();
        assert_eq!(first.as_ref().map(ApiError::message), Some("Download failed"));
        assert_eq!(second.as_ref().map(ApiError::message), Some("Bad url"));
        assert_eq!(
            third.as_ref().map(ApiError::message),
            Some("Request failed with status code 422")
        );
        assert_eq!(third.as_ref().and_then(ApiError::status), Some(422));
        assert!(third.as_ref().and_then(ApiError::body).is_some());
    }

    #[tokio::test]
    async fn missing_response_is_normalised() {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        transport.push_error(TransportError::NoResponse("Failed to fetch".into()));
        let err = client(&transport, &store).get_video(7).await.err();
        assert_eq!(
            err,
            Some(ApiError::NoResponse {
                message: NO_RESPONSE_MESSAGE.to_string()
            })
        );
    }

    #[tokio::test]
    async fn malformed_success_is_a_decode_error() {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        transport.push_json(200, &json!({"unexpected": true}));
        let err = client(&transport, &store).get_video(7).await.err();
        assert!(matches!(err, Some(ApiError::Decode { status: 200, .. })));
    }

    #[tokio::test]
    async fn login_is_form_encoded_and_not_intercepted() {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::with(&[(TOKEN_KEY, "keep")]));
        transport.push_json(401, &json!({"detail": "Incorrect username or password"}));
        let err = client(&transport, &store).login("bob", "pw").await.err();
        assert!(err.is_some_and(|err| err.is_unauthorized()));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("keep"));
        let sent = transport.last_request();
        assert!(matches!(
            sent.map(|request| request.body),
            Some(RequestBody::Form(body)) if body == "username=bob&password=pw"
        ));
    }

    #[tokio::test]
    async fn profile_username_is_path_encoded() -> Result<(), Box<dyn Error>> {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        transport.push_json(200, &profile_body("a b"));
        client(&transport, &store).get_profile("a b/c").await?;
        let sent = transport.last_request().ok_or("no request sent")?;
        assert_eq!(sent.url, "http://localhost:8000/api/v1/profile/a%20b%2Fc");
        Ok(())
    }

    #[tokio::test]
    async fn generate_unwraps_script_data() -> Result<(), Box<dyn Error>> {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        transport.push_json(
            200,
            &json!({"status": "success", "script_data": {"title": "T", "script": [], "viral_tips": "tip"}}),
        );
        let script = client(&transport, &store)
            .generate_script("alice", "coffee")
            .await?;
        assert_eq!(script.title.as_deref(), Some("T"));
        let sent = transport.last_request().ok_or("no request sent")?;
        assert_eq!(
            sent.body.as_str(),
            Some(r#"{"username":"alice","topic":"coffee"}"#)
        );
        Ok(())
    }
}
