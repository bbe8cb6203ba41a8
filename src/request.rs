use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

/// Identifies one extraction request. Only the most recent token handed out
/// by a [`RequestTracker`] is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Superseded-call bookkeeping for callers that run extractions in the
/// background: begin a request per new input, and on completion keep the
/// result only if no newer request has started.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Hand back `result` if `token` is still current, drop it otherwise.
    pub fn complete<T>(&self, token: RequestToken, result: T) -> Option<T> {
        if self.is_current(token) {
            Some(result)
        } else {
            debug!("discarding result of superseded request {}", token.0);
            None
        }
    }
}
