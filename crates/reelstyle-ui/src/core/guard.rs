//! Route guard decision for dashboard pages.

use crate::core::auth::Session;

/// What a protected route should render for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being restored.
    Loading,
    /// No authenticated session; send the user to `/login`.
    RedirectToLogin,
    /// Render the protected content.
    Render,
}

/// Decide what a protected route renders.
#[must_use]
pub fn guard_decision(session: &Session) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Loading
    } else if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::RedirectToLogin
    }
}
