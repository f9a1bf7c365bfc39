//! App-wide yewdux store.
//!
//! # Design
//! - The session controller is the only writer of the session slice.
//! - Pages keep their request state locally; only session state is global.

use yewdux::store::Store;

use crate::core::auth::Session;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Authentication state mirrored from the session controller.
    pub session: Session,
}

impl AppStore {
    /// Signed-in username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.session
            .is_authenticated()
            .then(|| self.session.username())
            .flatten()
    }
}
