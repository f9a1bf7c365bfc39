//! Persistence and environment helpers for the app shell.

use gloo::utils::window;

use crate::core::config::{UiConfig, base_url_for_location};
use crate::core::storage::{API_BASE_URL_KEY, KeyValueStore, LOCALE_KEY, read_non_empty};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use crate::services::storage::BrowserStorage;

/// Resolve configuration: build-time override, stored override, then page location.
pub(crate) fn load_config() -> UiConfig {
    let defaults = UiConfig::default();
    if let Some(url) = option_env!("REELSTYLE_API_BASE_URL") {
        return defaults.with_base_url(Some(url));
    }
    if let Some(url) = read_non_empty(&BrowserStorage, API_BASE_URL_KEY) {
        return defaults.with_base_url(Some(&url));
    }
    let location = window().location();
    let hostname = location.hostname().unwrap_or_default();
    if hostname.is_empty() {
        return defaults;
    }
    let protocol = location.protocol().unwrap_or_default();
    let port = location.port().unwrap_or_default();
    let derived = base_url_for_location(&protocol, &hostname, &port);
    defaults.with_base_url(Some(&derived))
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Some(locale) =
        read_non_empty(&BrowserStorage, LOCALE_KEY).and_then(|value| LocaleCode::from_lang_tag(&value))
    {
        return locale;
    }
    if let Some(locale) = window()
        .navigator()
        .language()
        .and_then(|tag| LocaleCode::from_lang_tag(&tag))
    {
        return locale;
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    BrowserStorage.set(LOCALE_KEY, locale.code());
    if let Some(root) = window().document().and_then(|document| document.document_element()) {
        if let Err(err) = root.set_attribute("lang", locale.code()) {
            tracing::debug!(error = ?err, "could not set document language");
        }
    }
}

/// Path of the page currently shown.
pub(crate) fn current_path() -> String {
    window().location().pathname().unwrap_or_default()
}
