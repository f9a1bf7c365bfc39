//! Session lifecycle: restore, verify, login, register, logout.
//!
//! # Design
//! - The controller owns the session; views observe it through a callback
//!   (the app mirrors it into the yewdux store).
//! - Every failure during verification fails closed to an anonymous session.
//! - No borrow is held across an await point.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{info, warn};

use crate::core::auth::{AuthOutcome, RegistrationForm, Session, validate_registration};
use crate::core::client::{ApiClient, ApiError};
use crate::core::storage::{KeyValueStore, TOKEN_KEY, load_token};

/// Fallback shown when a login fails without any usable message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
/// Fallback shown when registration fails without a backend detail.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

type Observer = Rc<dyn Fn(&Session)>;

/// Owner of the process-wide session.
pub struct SessionController {
    client: Rc<ApiClient>,
    storage: Rc<dyn KeyValueStore>,
    session: RefCell<Session>,
    observer: RefCell<Option<Observer>>,
    min_password_len: usize,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Create a controller in the restoring state.
    #[must_use]
    pub fn new(
        client: Rc<ApiClient>,
        storage: Rc<dyn KeyValueStore>,
        min_password_len: usize,
    ) -> Self {
        Self {
            client,
            storage,
            session: RefCell::new(Session::restoring()),
            observer: RefCell::new(None),
            min_password_len,
        }
    }

    /// Register the callback notified on every session change.
    pub fn observe(&self, observer: impl Fn(&Session) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    fn replace(&self, next: Session) {
        *self.session.borrow_mut() = next.clone();
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&next);
        }
    }

    /// Settle the session at startup from the persisted token.
    pub async fn restore(&self) {
        match load_token(self.storage.as_ref()) {
            Some(token) => self.verify(&token).await,
            None => {
                info!("no stored token; session starts anonymous");
                self.replace(Session::anonymous());
            }
        }
    }

    /// Verify `token` against `/auth/me`.
    pub async fn verify(&self, token: &str) {
        match self.client.me(token).await {
            Ok(user) => {
                info!(username = %user.username, "session verified");
                self.replace(Session::verified(user, token.to_string()));
            }
            Err(err) => {
                warn!(error = %err, "token verification failed; clearing session");
                self.storage.remove(TOKEN_KEY);
                self.replace(Session::anonymous());
            }
        }
    }

    /// Exchange credentials for a token and load the user.
    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        let token = match self.client.login(username, password).await {
            Ok(response) => response.access_token,
            Err(err) => {
                warn!(error = %err, "login rejected");
                return AuthOutcome::failure(login_failure_message(&err));
            }
        };
        let previous = self.storage.get(TOKEN_KEY);
        self.storage.set(TOKEN_KEY, &token);
        match self.client.me(&token).await {
            Ok(user) => {
                info!(username = %user.username, "login succeeded");
                self.replace(Session::verified(user, token));
                AuthOutcome::Success
            }
            Err(err) => {
                warn!(error = %err, "login token could not be verified");
                match previous {
                    Some(previous) => self.storage.set(TOKEN_KEY, &previous),
                    None => self.storage.remove(TOKEN_KEY),
                }
                AuthOutcome::failure(login_failure_message(&err))
            }
        }
    }

    /// Create an account. Never signs the user in.
    pub async fn register(&self, form: &RegistrationForm) -> AuthOutcome {
        let body = match validate_registration(form, self.min_password_len) {
            Ok(body) => body,
            Err(err) => return AuthOutcome::failure(err.to_string()),
        };
        match self.client.register(&body).await {
            Ok(user) => {
                info!(username = %user.username, "account registered");
                AuthOutcome::Success
            }
            Err(err) => {
                warn!(error = %err, "registration rejected");
                AuthOutcome::failure(
                    err.detail()
                        .unwrap_or_else(|| REGISTRATION_FAILED_MESSAGE.to_string()),
                )
            }
        }
    }

    /// Forget the token and sign out.
    pub fn logout(&self) {
        info!("logging out");
        self.storage.remove(TOKEN_KEY);
        self.replace(Session::anonymous());
    }

    /// Drop the session after the backend rejected the token.
    pub fn expire(&self) {
        if self.session.borrow().is_authenticated() {
            warn!("session expired");
        }
        self.storage.remove(TOKEN_KEY);
        self.replace(Session::anonymous());
    }
}

fn login_failure_message(err: &ApiError) -> String {
    err.display_message(LOGIN_FAILED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::MIN_PASSWORD_LEN;
    use crate::core::guard::{GuardDecision, guard_decision};
    use crate::core::testing::{MemoryStore, ScriptedTransport};
    use crate::core::transport::TransportError;
    use serde_json::json;
    use std::cell::Cell;

    struct Harness {
        transport: Rc<ScriptedTransport>,
        store: Rc<MemoryStore>,
        controller: SessionController,
    }

    fn harness(entries: &[(&str, &str)]) -> Harness {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::with(entries));
        let client = Rc::new(ApiClient::new(
            "http://api/v1",
            transport.clone(),
            store.clone(),
        ));
        let controller = SessionController::new(client, store.clone(), MIN_PASSWORD_LEN);
        Harness {
            transport,
            store,
            controller,
        }
    }

    fn me(username: &str) -> serde_json::Value {
        json!({"id": 1, "username": username, "email": "a@b.c"})
    }

    #[tokio::test]
    async fn restore_without_token_settles_anonymous() {
        let h = harness(&[]);
        h.controller.restore().await;
        let session = h.controller.session();
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn restore_verifies_stored_token() {
        let h = harness(&[(TOKEN_KEY, "tok")]);
        h.transport.push_json(200, &me("alice"));
        h.controller.restore().await;
        let session = h.controller.session();
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("alice"));
        assert_eq!(
            h.transport
                .last_request()
                .and_then(|r| r.header("Authorization").map(str::to_string)),
            Some("Bearer tok".to_string())
        );
    }

    #[tokio::test]
    async fn verify_fails_closed_on_network_error() {
        let h = harness(&[(TOKEN_KEY, "tok")]);
        h.transport
            .push_error(TransportError::NoResponse("offline".into()));
        h.controller.restore().await;
        assert!(!h.controller.session().is_authenticated());
        assert!(!h.controller.session().is_loading());
        assert_eq!(h.store.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn login_success_persists_token_and_authenticates() {
        let h = harness(&[]);
        h.transport
            .push_json(200, &json!({"access_token": "new", "token_type": "bearer"}));
        h.transport.push_json(200, &me("bob"));
        let outcome = h.controller.login("bob", "secret").await;
        assert_eq!(outcome, AuthOutcome::Success);
        assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("new"));
        assert!(h.controller.session().is_authenticated());
    }

    #[tokio::test]
    async fn invalid_credentials_do_not_mutate_session() {
        let h = harness(&[]);
        h.controller.restore().await;
        let before = h.controller.session();
        h.transport
            .push_json(401, &json!({"detail": "Incorrect username or password"}));
        let outcome = h.controller.login("bob", "wrong").await;
        assert_eq!(outcome.error(), Some("Incorrect username or password"));
        assert_eq!(h.controller.session(), before);
        assert_eq!(h.store.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn failed_me_after_login_restores_previous_token() {
        let h = harness(&[(TOKEN_KEY, "old")]);
        h.transport.push_json(200, &json!({"access_token": "new"}));
        h.transport.push_json(500, &json!({}));
        let outcome = h.controller.login("bob", "pw").await;
        assert!(!outcome.is_success());
        assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn register_rejects_invalid_form_without_network() {
        let h = harness(&[]);
        let short = RegistrationForm {
            username: "a".into(),
            email: "a@b.c".into(),
            password: "12345".into(),
            confirm_password: "12345".into(),
        };
        let mismatch = RegistrationForm {
            confirm_password: "654321".into(),
            password: "123456".into(),
            ..short.clone()
        };
        assert!(!h.controller.register(&short).await.is_success());
        assert!(!h.controller.register(&mismatch).await.is_success());
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn register_failure_uses_detail_or_fallback() {
        let h = harness(&[]);
        let form = RegistrationForm {
            username: "a".into(),
            email: "a@b.c".into(),
            password: "123456".into(),
            confirm_password: "123456".into(),
        };
        h.transport
            .push_json(400, &json!({"detail": "Username already registered"}));
        h.transport.push_json(500, &json!({"message": "boom"}));
        assert_eq!(
            h.controller.register(&form).await.error(),
            Some("Username already registered")
        );
        assert_eq!(
            h.controller.register(&form).await.error(),
            Some(REGISTRATION_FAILED_MESSAGE)
        );
        assert!(!h.controller.session().is_authenticated());
    }

    #[tokio::test]
    async fn logout_then_guard_redirects_to_login() {
        let h = harness(&[(TOKEN_KEY, "tok")]);
        h.transport.push_json(200, &me("alice"));
        h.controller.restore().await;
        assert_eq!(guard_decision(&h.controller.session()), GuardDecision::Render);
        h.controller.logout();
        assert_eq!(h.store.get(TOKEN_KEY), None);
        assert_eq!(
            guard_decision(&h.controller.session()),
            GuardDecision::RedirectToLogin
        );
    }

    #[tokio::test]
    async fn observer_sees_every_transition() {
        let h = harness(&[]);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        h.controller.observe(move |_| seen.set(seen.get() + 1));
        h.controller.restore().await;
        h.controller.logout();
        assert_eq!(calls.get(), 2);
    }
}
