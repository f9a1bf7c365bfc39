//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep session state as simple data so the yewdux store can compare and clone it.
//! - Only the session controller builds an authenticated session.
//! - Validation runs locally and never touches the network.

use reelstyle_api_models::{RegisterRequest, UserRecord};
use thiserror::Error;

/// Authenticated account as returned by `/auth/me`.
pub type User = UserRecord;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Process-wide session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::restoring()
    }
}

impl Session {
    /// Initial state before the persisted token has been checked.
    #[must_use]
    pub const fn restoring() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    /// Settled, unauthenticated session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
            loading: false,
        }
    }

    /// Session backed by a token that `/auth/me` just accepted.
    pub(crate) const fn verified(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            loading: false,
        }
    }

    /// Whether the persisted token is still being verified.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether both a user and a non-empty token are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.loading
            && self
                .user
                .as_ref()
                .is_some_and(|user| !user.username.trim().is_empty())
            && self
                .token
                .as_deref()
                .is_some_and(|token| !token.trim().is_empty())
    }

    /// Signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Signed-in username.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    /// Verified bearer token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Result of a login or registration attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The attempt succeeded.
    Success,
    /// The attempt failed with a display message.
    Failure {
        /// Message for the form.
        error: String,
    },
}

impl AuthOutcome {
    /// Build a failure outcome.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Whether the attempt succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Local form validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Username is blank.
    #[error("username is required")]
    MissingUsername,
    /// Email is blank.
    #[error("email is required")]
    MissingEmail,
    /// Email has no `@`.
    #[error("email address is invalid")]
    InvalidEmail,
    /// Password is blank.
    #[error("password is required")]
    MissingPassword,
    /// Confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
}

impl ValidationError {
    /// Translation key for the form error.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::MissingUsername => "auth.error.username_required",
            Self::MissingEmail => "auth.error.email_required",
            Self::InvalidEmail => "auth.error.email_invalid",
            Self::MissingPassword => "auth.error.password_required",
            Self::PasswordMismatch => "auth.error.password_mismatch",
            Self::PasswordTooShort { .. } => "auth.error.password_short",
        }
    }
}

/// Raw registration form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Desired username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

/// Validate login input, returning the trimmed username and raw password.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_login(username: &str, password: &str) -> Result<(String, String), ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok((username.to_string(), password.to_string()))
}

/// Validate registration input and build the request body.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_registration(
    form: &RegistrationForm,
    min_password_len: usize,
) -> Result<RegisterRequest, ValidationError> {
    let username = form.username.trim();
    let email = form.email.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if form.password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if form.password.chars().count() < min_password_len {
        return Err(ValidationError::PasswordTooShort {
            min: min_password_len,
        });
    }
    Ok(RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: Some(1),
            username: name.to_string(),
            email: None,
        }
    }

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn default_session_is_loading_and_unauthenticated() {
        let session = Session::default();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn verified_session_requires_user_and_token() {
        assert!(Session::verified(user("alice"), "tok".into()).is_authenticated());
        assert!(!Session::verified(user("alice"), "  ".into()).is_authenticated());
        assert!(!Session::verified(user(""), "tok".into()).is_authenticated());
        assert!(!Session::anonymous().is_authenticated());
    }

    #[test]
    fn registration_rejects_short_password() {
        assert_eq!(
            validate_registration(&form("12345", "12345"), MIN_PASSWORD_LEN),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn registration_rejects_mismatch_before_length() {
        assert_eq!(
            validate_registration(&form("123", "456"), MIN_PASSWORD_LEN),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn registration_requires_email_with_at_sign() {
        let mut input = form("secret1", "secret1");
        input.email = "not-an-email".into();
        assert_eq!(
            validate_registration(&input, MIN_PASSWORD_LEN),
            Err(ValidationError::InvalidEmail)
        );
        input.email = " ".into();
        assert_eq!(
            validate_registration(&input, MIN_PASSWORD_LEN),
            Err(ValidationError::MissingEmail)
        );
    }

    #[test]
    fn registration_trims_identity_fields() {
        let mut input = form("secret1", "secret1");
        input.username = "  alice ".into();
        let request = validate_registration(&input, MIN_PASSWORD_LEN);
        assert_eq!(request.map(|body| body.username), Ok("alice".to_string()));
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(validate_login(" ", "pw"), Err(ValidationError::MissingUsername));
        assert_eq!(validate_login("bob", ""), Err(ValidationError::MissingPassword));
        assert_eq!(
            validate_login(" bob ", "pw"),
            Ok(("bob".to_string(), "pw".to_string()))
        );
    }

    #[test]
    fn outcome_accessors() {
        assert!(AuthOutcome::Success.is_success());
        assert_eq!(AuthOutcome::failure("nope").error(), Some("nope"));
    }
}
