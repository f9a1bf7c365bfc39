//! History page state.

use reelstyle_api_models::Profile;

use crate::core::request::{RequestId, RequestTicket, Tracked};

/// What the history page renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HistoryView<'a> {
    /// Waiting for the profile.
    Loading,
    /// The profile could not be loaded and nothing was loaded before.
    Failed(&'a str),
    /// The user has not analysed anything yet.
    Empty,
    /// Summary plus one card per video.
    Videos(&'a Profile),
}

/// State owned by the history page.
#[derive(Debug, Default)]
pub struct HistoryState {
    profile: Tracked<Profile>,
}

impl HistoryState {
    /// Load the signed-in user's profile. `None` without a username.
    pub fn begin(&mut self, username: Option<&str>) -> Option<(RequestTicket, String)> {
        let username = username.map(str::trim).filter(|name| !name.is_empty())?;
        Some((self.profile.begin(), username.to_string()))
    }

    /// Apply a completion.
    pub fn complete(&mut self, id: RequestId, outcome: Result<Profile, String>) -> bool {
        self.profile.complete(id, outcome)
    }

    /// Abort the in-flight request.
    pub fn cancel(&mut self) {
        self.profile.cancel();
    }

    /// Profile slot.
    #[must_use]
    pub const fn profile(&self) -> &Tracked<Profile> {
        &self.profile
    }

    /// Layout to render.
    #[must_use]
    pub fn view(&self) -> HistoryView<'_> {
        match self.profile.last_success() {
            Some(profile) if profile.videos.is_empty() => HistoryView::Empty,
            Some(profile) => HistoryView::Videos(profile),
            None => self
                .profile
                .error()
                .map_or(HistoryView::Loading, HistoryView::Failed),
        }
    }
}
