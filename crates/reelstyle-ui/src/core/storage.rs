//! Key-value persistence seam for browser storage.
//!
//! # Design
//! - Core code talks to [`KeyValueStore`] only; the browser adapter lives in `services`.
//! - Values are plain strings; blank values are treated as absent when read back.

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "reelstyle.token";
/// Storage key for the author of the most recently analysed video.
pub const LAST_ANALYZED_USER_KEY: &str = "reelstyle.last_analyzed_user";
/// Storage key for the preferred locale.
pub const LOCALE_KEY: &str = "reelstyle.locale";
/// Storage key for a user-supplied API base URL override.
pub const API_BASE_URL_KEY: &str = "reelstyle.api_base_url";

/// Minimal synchronous key-value store.
pub trait KeyValueStore {
    /// Read a stored value.
    fn get(&self, key: &str) -> Option<String>;
    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// Read a trimmed, non-empty value.
#[must_use]
pub fn read_non_empty(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    store
        .get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read the persisted bearer token, if any.
#[must_use]
pub fn load_token(store: &dyn KeyValueStore) -> Option<String> {
    read_non_empty(store, TOKEN_KEY)
}

/// Read the last analysed author, if any.
#[must_use]
pub fn load_last_analyzed_user(store: &dyn KeyValueStore) -> Option<String> {
    read_non_empty(store, LAST_ANALYZED_USER_KEY)
}

/// Remember the author of a freshly analysed video. Blank names are ignored.
pub fn remember_analyzed_user(store: &dyn KeyValueStore, username: &str) {
    let username = username.trim();
    if !username.is_empty() {
        store.set(LAST_ANALYZED_USER_KEY, username);
    }
}
