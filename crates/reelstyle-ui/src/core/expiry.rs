//! Reaction to a rejected token.
//!
//! The client clears the stored token on a 401; this module decides whether
//! the user should be sent to the login page.

use crate::core::client::ApiError;

/// Paths where a 401 is an expected form error rather than an expired session.
pub const AUTH_PATHS: [&str; 2] = ["/login", "/register"];

/// Navigation requested after an API failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Go to the login page.
    Login,
}

/// Whether `path` is the login or registration page.
#[must_use]
pub fn is_auth_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    AUTH_PATHS.contains(&path)
}

/// Decides how the app reacts to unauthorized responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionExpiry;

impl SessionExpiry {
    /// Redirect to login for a 401 seen outside the auth pages.
    #[must_use]
    pub fn on_error(self, error: &ApiError, current_path: &str) -> Option<Redirect> {
        (error.is_unauthorized() && !is_auth_path(current_path)).then_some(Redirect::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::ApiClient;
    use crate::core::storage::{KeyValueStore, TOKEN_KEY};
    use crate::core::testing::{MemoryStore, ScriptedTransport};
    use serde_json::json;
    use std::rc::Rc;

    fn unauthorized() -> ApiError {
        ApiError::Unauthorized {
            message: "expired".into(),
            body: None,
        }
    }

    #[test]
    fn auth_pages_are_recognised() {
        assert!(is_auth_path("/login"));
        assert!(is_auth_path("/register/"));
        assert!(!is_auth_path("/dashboard/login"));
        assert!(!is_auth_path("/"));
    }

    #[test]
    fn non_401_errors_never_redirect() {
        let err = ApiError::Server {
            status: 500,
            message: "boom".into(),
            body: None,
        };
        assert_eq!(SessionExpiry.on_error(&err, "/dashboard"), None);
    }

    #[test]
    fn no_redirect_on_auth_pages() {
        assert_eq!(SessionExpiry.on_error(&unauthorized(), "/login"), None);
        assert_eq!(SessionExpiry.on_error(&unauthorized(), "/register"), None);
    }

    #[tokio::test]
    async fn single_401_clears_token_and_redirects_once() {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::with(&[(TOKEN_KEY, "stale")]));
        let client = ApiClient::new("http://api", transport.clone(), store.clone());
        transport.push_json(401, &json!({"detail": "Not authenticated"}));

        let redirects: Vec<Redirect> = client
            .get_profile("alice")
            .await
            .err()
            .into_iter()
            .filter_map(|err| SessionExpiry.on_error(&err, "/dashboard/history"))
            .collect();

        assert_eq!(redirects, vec![Redirect::Login]);
        assert_eq!(store.get(TOKEN_KEY), None);
    }
}
