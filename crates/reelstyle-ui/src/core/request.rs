//! Async request state shared by every page.
//!
//! # Design
//! - One [`AsyncOp`] shape for all page actions.
//! - [`Tracked`] fences completions: only the latest issued ticket may apply.
//! - Issuing a new ticket aborts the superseded request; dropping the tracker
//!   aborts whatever is still in flight.
//! - The last successful value survives a pending retry and a failure.

use std::future::Future;
use std::mem;

use futures_util::future::{AbortHandle, AbortRegistration, Abortable};
use tracing::debug;

/// State of one asynchronous page action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsyncOp<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Pending,
    /// The latest request succeeded.
    Success(T),
    /// The latest request failed with a display message.
    Error(String),
}

impl<T> AsyncOp<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Failure message of the latest request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifier of one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Permission to run one request; carries its abort registration.
#[derive(Debug)]
pub struct RequestTicket {
    id: RequestId,
    registration: AbortRegistration,
}

impl RequestTicket {
    /// Identifier used to complete the request.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Drive `future` unless the request is cancelled first.
    ///
    /// Returns `None` when the request was superseded or cancelled.
    pub async fn run<F: Future>(self, future: F) -> Option<F::Output> {
        Abortable::new(future, self.registration).await.ok()
    }
}

/// Cancels an in-flight request.
#[derive(Clone, Debug)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    /// Abort the request.
    pub fn cancel(&self) {
        self.0.abort();
    }

    /// Whether the request was aborted.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

/// Issues monotonically increasing tickets and remembers the latest one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    current: Option<(RequestId, CancelHandle)>,
}

impl RequestTracker {
    /// Issue a new ticket, aborting the previous in-flight request.
    pub fn issue(&mut self) -> RequestTicket {
        self.cancel();
        self.issued += 1;
        let id = RequestId(self.issued);
        let (handle, registration) = AbortHandle::new_pair();
        self.current = Some((id, CancelHandle(handle)));
        RequestTicket { id, registration }
    }

    /// Whether `id` is the latest unsettled ticket.
    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        self.current.as_ref().is_some_and(|(current, _)| *current == id)
    }

    /// Mark `id` settled. Returns `false` for superseded tickets.
    pub fn settle(&mut self, id: RequestId) -> bool {
        if self.is_current(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Abort the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some((id, handle)) = self.current.take() {
            debug!(request = id.0, "aborting superseded request");
            handle.cancel();
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for RequestTracker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// An [`AsyncOp`] guarded by request fencing.
#[derive(Debug)]
pub struct Tracked<T> {
    op: AsyncOp<T>,
    last_success: Option<T>,
    tracker: RequestTracker,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            op: AsyncOp::Idle,
            last_success: None,
            tracker: RequestTracker::default(),
        }
    }
}

impl<T> Tracked<T> {
    /// Start a request, superseding any in-flight one.
    pub fn begin(&mut self) -> RequestTicket {
        if let AsyncOp::Success(value) = mem::replace(&mut self.op, AsyncOp::Pending) {
            self.last_success = Some(value);
        }
        self.tracker.issue()
    }

    /// Apply a completion. Returns `false` when the ticket was superseded.
    pub fn complete(&mut self, id: RequestId, outcome: Result<T, String>) -> bool {
        if !self.tracker.settle(id) {
            debug!(request = id.0, "dropping stale completion");
            return false;
        }
        match outcome {
            Ok(value) => {
                self.last_success = None;
                self.op = AsyncOp::Success(value);
            }
            Err(message) => self.op = AsyncOp::Error(message),
        }
        true
    }

    /// Abort the in-flight request and fall back to the last settled state.
    pub fn cancel(&mut self) {
        self.tracker.cancel();
        if self.op.is_pending() {
            self.op = self
                .last_success
                .take()
                .map_or(AsyncOp::Idle, AsyncOp::Success);
        }
    }

    /// Forget everything, aborting any in-flight request.
    pub fn reset(&mut self) {
        self.tracker.cancel();
        self.op = AsyncOp::Idle;
        self.last_success = None;
    }

    /// Current state.
    #[must_use]
    pub const fn op(&self) -> &AsyncOp<T> {
        &self.op
    }

    /// Latest successful value, kept across pending retries and failures.
    #[must_use]
    pub fn last_success(&self) -> Option<&T> {
        match &self.op {
            AsyncOp::Success(value) => Some(value),
            _ => self.last_success.as_ref(),
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.op.is_pending()
    }

    /// Failure message of the latest request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.op.error()
    }
}
