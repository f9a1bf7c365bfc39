//! Shared client and session contexts.
//!
//! # Design
//! - Create exactly one API client and one session controller per app boot.
//! - API failures pass through [`report_error`] so a rejected token always
//!   ends the session and leaves the dashboard exactly once.

use std::rc::Rc;

use yew_router::prelude::Navigator;

use crate::app::Route;
use crate::app::preferences::current_path;
use crate::core::client::{ApiClient, ApiError};
use crate::core::config::UiConfig;
use crate::core::expiry::{Redirect, SessionExpiry};
use crate::core::session::SessionController;
use crate::core::storage::KeyValueStore;
use crate::services::storage::BrowserStorage;
use crate::services::transport::GlooTransport;

/// Shared API client context for pages.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
    /// Persistent browser storage.
    pub storage: Rc<dyn KeyValueStore>,
    /// Resolved configuration.
    pub config: Rc<UiConfig>,
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Session controller context.
#[derive(Clone)]
pub(crate) struct SessionCtx {
    /// Owner of the session lifecycle.
    pub controller: Rc<SessionController>,
}

impl PartialEq for SessionCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

/// Build both contexts around browser storage and fetch.
pub(crate) fn build_contexts(config: UiConfig) -> (ApiCtx, SessionCtx) {
    let storage: Rc<dyn KeyValueStore> = Rc::new(BrowserStorage);
    let client = Rc::new(ApiClient::new(
        config.api_base_url.clone(),
        Rc::new(GlooTransport),
        storage.clone(),
    ));
    let controller = Rc::new(SessionController::new(
        client.clone(),
        storage.clone(),
        config.min_password_len,
    ));
    tracing::info!(base_url = client.base_url(), "api client ready");
    (
        ApiCtx {
            client,
            storage,
            config: Rc::new(config),
        },
        SessionCtx { controller },
    )
}

/// Handles a page needs to run requests from async tasks.
#[derive(Clone)]
pub(crate) struct PageServices {
    pub api: ApiCtx,
    pub session: SessionCtx,
    pub navigator: Option<Navigator>,
}

impl PageServices {
    /// Collect the handles; `None` when a context is missing.
    pub(crate) fn new(
        api: Option<ApiCtx>,
        session: Option<SessionCtx>,
        navigator: Option<Navigator>,
    ) -> Option<Self> {
        Some(Self {
            api: api?,
            session: session?,
            navigator,
        })
    }

    /// Page message for a failed request.
    pub(crate) fn message_for(&self, error: &ApiError, fallback: &str) -> String {
        report_error(&self.session, self.navigator.as_ref(), error, fallback)
    }
}

/// Turn an API failure into a page message, ending the session on a 401.
pub(crate) fn report_error(
    session: &SessionCtx,
    navigator: Option<&Navigator>,
    error: &ApiError,
    fallback: &str,
) -> String {
    if SessionExpiry.on_error(error, &current_path()) == Some(Redirect::Login) {
        session.controller.expire();
        if let Some(navigator) = navigator {
            navigator.push(&Route::Login);
        }
    }
    error.display_message(fallback)
}
