//! Static UI configuration.
//!
//! # Design
//! - Defaults describe a local backend; the browser layer may override the base URL.
//! - Resolution helpers are pure so the precedence rules are testable natively.

use crate::core::auth::MIN_PASSWORD_LEN;

/// Backend base URL used when nothing overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
/// Path prefix of the versioned backend API.
pub const API_PATH_PREFIX: &str = "/api/v1";
/// Port the backend listens on during local development.
pub const BACKEND_PORT: &str = "8000";
/// Front-end dev-server ports that imply a backend on [`BACKEND_PORT`].
pub const DEV_SERVER_PORTS: [&str; 3] = ["5173", "3000", "8080"];
/// Delay between status console lines.
pub const DEFAULT_CONSOLE_INTERVAL_MS: u32 = 1200;
/// Number of status console lines shown during analysis.
pub const DEFAULT_CONSOLE_LINES: usize = 6;

/// Runtime configuration consumed by the app shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend base URL, without a trailing slash.
    pub api_base_url: String,
    /// Minimum password length accepted at registration.
    pub min_password_len: usize,
    /// Delay between status console lines.
    pub console_interval_ms: u32,
    /// Number of status console lines.
    pub console_lines: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            min_password_len: MIN_PASSWORD_LEN,
            console_interval_ms: DEFAULT_CONSOLE_INTERVAL_MS,
            console_lines: DEFAULT_CONSOLE_LINES,
        }
    }
}

impl UiConfig {
    /// Replace the base URL when `candidate` is a usable HTTP(S) URL.
    #[must_use]
    pub fn with_base_url(mut self, candidate: Option<&str>) -> Self {
        if let Some(url) = candidate.and_then(normalize_base_url) {
            self.api_base_url = url;
        }
        self
    }
}

/// Trim and validate a base URL; `None` when it is not HTTP(S).
#[must_use]
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed.split("://").nth(1).is_some_and(|rest| !rest.is_empty());
    (has_scheme && has_host).then(|| trimmed.to_string())
}

/// Derive the backend URL from the page location.
///
/// Pages served by a dev server talk to the backend on [`BACKEND_PORT`];
/// otherwise the backend is assumed to share the page origin.
#[must_use]
pub fn base_url_for_location(protocol: &str, hostname: &str, port: &str) -> String {
    let protocol = protocol.trim_end_matches(':');
    let protocol = if protocol.is_empty() { "http" } else { protocol };
    let hostname = if hostname.is_empty() {
        "localhost"
    } else {
        hostname
    };
    let port = if DEV_SERVER_PORTS.contains(&port) {
        BACKEND_PORT
    } else {
        port
    };
    if port.is_empty() {
        format!("{protocol}://{hostname}{API_PATH_PREFIX}")
    } else {
        format!("{protocol}://{hostname}:{port}{API_PATH_PREFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = UiConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.min_password_len, 6);
        assert_eq!(config.console_lines, 6);
    }

    #[test]
    fn base_url_override_requires_http_scheme() {
        let config = UiConfig::default().with_base_url(Some("ftp://nope"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        let config = UiConfig::default().with_base_url(Some(" https://api.example.com/v1/ "));
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(normalize_base_url("http://"), None);
    }

    #[test]
    fn dev_server_ports_map_to_backend_port() {
        assert_eq!(
            base_url_for_location("http:", "localhost", "5173"),
            "http://localhost:8000/api/v1"
        );
        assert_eq!(
            base_url_for_location("https:", "reel.example", ""),
            "https://reel.example/api/v1"
        );
        assert_eq!(
            base_url_for_location("http:", "10.0.0.2", "9000"),
            "http://10.0.0.2:9000/api/v1"
        );
    }
}
