//! LocalStorage implementation of [`KeyValueStore`].

use gloo::storage::{LocalStorage, Storage};

use crate::core::storage::KeyValueStore;

/// Browser LocalStorage.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            tracing::error!(key, error = %err, "storage write failed");
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
