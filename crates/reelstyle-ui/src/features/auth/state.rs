//! Login and registration form state.
//!
//! # Design
//! - Inputs stay as raw strings; validation runs on submit.
//! - A submit is refused while another one is still running.

use crate::core::auth::{
    AuthOutcome, RegistrationForm, ValidationError, validate_login, validate_registration,
};

/// Form-level error, either local or from the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    /// Local validation failure.
    Invalid(ValidationError),
    /// Backend or network failure message.
    Rejected(String),
}

/// Login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginFormState {
    /// Username input.
    pub username: String,
    /// Password input.
    pub password: String,
    /// Submit in progress.
    pub busy: bool,
    /// Last failure.
    pub error: Option<FormError>,
}

impl LoginFormState {
    /// Validate and mark busy. Returns the credentials to send.
    pub fn submit(&mut self) -> Option<(String, String)> {
        if self.busy {
            return None;
        }
        match validate_login(&self.username, &self.password) {
            Ok(credentials) => {
                self.busy = true;
                self.error = None;
                Some(credentials)
            }
            Err(err) => {
                self.error = Some(FormError::Invalid(err));
                None
            }
        }
    }

    /// Record the outcome of the submit.
    pub fn finish(&mut self, outcome: &AuthOutcome) {
        self.busy = false;
        self.error = outcome
            .error()
            .map(|message| FormError::Rejected(message.to_string()));
        if outcome.is_success() {
            self.password.clear();
        }
    }
}

/// Registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFormState {
    /// Raw inputs.
    pub form: RegistrationForm,
    /// Submit in progress.
    pub busy: bool,
    /// Last failure.
    pub error: Option<FormError>,
}

impl RegisterFormState {
    /// Validate and mark busy. Returns the form to hand to the session controller.
    pub fn submit(&mut self, min_password_len: usize) -> Option<RegistrationForm> {
        if self.busy {
            return None;
        }
        match validate_registration(&self.form, min_password_len) {
            Ok(_) => {
                self.busy = true;
                self.error = None;
                Some(self.form.clone())
            }
            Err(err) => {
                self.error = Some(FormError::Invalid(err));
                None
            }
        }
    }

    /// Record the outcome of the submit.
    pub fn finish(&mut self, outcome: &AuthOutcome) {
        self.busy = false;
        self.error = outcome
            .error()
            .map(|message| FormError::Rejected(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::MIN_PASSWORD_LEN;

    #[test]
    fn login_submit_validates_and_blocks_double_submit() {
        let mut form = LoginFormState::default();
        assert_eq!(form.submit(), None);
        assert_eq!(
            form.error,
            Some(FormError::Invalid(ValidationError::MissingUsername))
        );
        form.username = "bob".into();
        form.password = "pw".into();
        assert!(form.submit().is_some());
        assert!(form.busy);
        assert_eq!(form.submit(), None);
        form.finish(&AuthOutcome::failure("Incorrect username or password"));
        assert!(!form.busy);
        assert_eq!(form.password, "pw");
        assert_eq!(
            form.error,
            Some(FormError::Rejected("Incorrect username or password".into()))
        );
    }

    #[test]
    fn register_submit_rejects_mismatch_locally() {
        let mut state = RegisterFormState {
            form: RegistrationForm {
                username: "alice".into(),
                email: "a@b.c".into(),
                password: "secret1".into(),
                confirm_password: "secret2".into(),
            },
            ..RegisterFormState::default()
        };
        assert_eq!(state.submit(MIN_PASSWORD_LEN), None);
        assert!(!state.busy);
        assert_eq!(
            state.error,
            Some(FormError::Invalid(ValidationError::PasswordMismatch))
        );
    }
}
