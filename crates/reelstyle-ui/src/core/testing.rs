//! Test doubles for the transport and storage seams.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde::Serialize;

use crate::core::storage::KeyValueStore;
use crate::core::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub(crate) fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Transport that replays queued responses in order and records every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    queue: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn push_json<T: Serialize>(&self, status: u16, body: &T) {
        let body = serde_json::to_string(body).unwrap_or_default();
        self.queue
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body }));
    }

    pub(crate) fn push_error(&self, error: TransportError) {
        self.queue.borrow_mut().push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.sent.borrow().last().cloned()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NoResponse("script exhausted".into())))
    }
}
