//! Cooperative Shutdown Coordination
//!
//! A one-way, broadcastable stop signal split into three handles:
//!
//! - [`StopSource`] owns the right to request a stop.
//! - [`StopToken`] observes the signal; cheap to clone and hand to any thread.
//! - [`StopCallback`] registers a one-shot action run when the stop is requested.
//!
//! A stop transitions exactly once (un-requested → requested). The first
//! `request_stop` caller wins and runs every registered callback; later calls
//! observe the transition already made and return `false`.

use crate::core::sync::recover_lock;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Shared state behind a source and all tokens derived from it
struct StopState {
    requested: AtomicBool,
    next_callback_id: AtomicU64,
    callbacks: Mutex<Vec<(u64, Callback)>>,
}

impl StopState {
    fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            next_callback_id: AtomicU64::new(0),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    fn is_requested(&self) -> bool {
        // Pairs with the AcqRel swap in request(); anything written before the
        // stop was requested is visible to a thread that observes it
        self.requested.load(Ordering::Acquire)
    }

    fn request(&self) -> bool {
        if self.requested.swap(true, Ordering::AcqRel) {
            return false;
        }

        // Callbacks run outside the registry lock so they may take their own locks
        let pending = std::mem::take(&mut *recover_lock(self.callbacks.lock()));
        log::debug!("stop requested, running {} stop callback(s)", pending.len());
        for (_, callback) in pending {
            callback();
        }
        true
    }
}

/// Owning side of a stop signal
///
/// Clones share the same signal; requesting a stop through any clone is
/// observed by every token derived from any of them.
#[derive(Clone)]
pub struct StopSource {
    state: Arc<StopState>,
}

impl StopSource {
    /// Create a source in the un-requested state
    pub fn new() -> Self {
        Self {
            state: Arc::new(StopState::new()),
        }
    }

    /// Derive a token observing this source
    pub fn token(&self) -> StopToken {
        StopToken {
            state: Some(Arc::clone(&self.state)),
        }
    }

    /// Request a stop
    ///
    /// Returns `true` only for the call that performed the transition. That
    /// call runs every registered [`StopCallback`] before returning.
    pub fn request_stop(&self) -> bool {
        self.state.request()
    }

    /// Check if a stop has been requested
    pub fn stop_requested(&self) -> bool {
        self.state.is_requested()
    }
}

impl Default for StopSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StopSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopSource")
            .field("stop_requested", &self.stop_requested())
            .finish()
    }
}

/// Observing side of a stop signal
///
/// A default-constructed token is detached from any source: it can never be
/// stopped and never runs callbacks.
#[derive(Clone, Default)]
pub struct StopToken {
    state: Option<Arc<StopState>>,
}

impl StopToken {
    /// Check if a stop has been requested, without blocking
    pub fn stop_requested(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.is_requested())
    }

    /// Check if this token is attached to a source and can ever be stopped
    pub fn stop_possible(&self) -> bool {
        self.state.is_some()
    }
}

impl fmt::Debug for StopToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopToken")
            .field("stop_possible", &self.stop_possible())
            .field("stop_requested", &self.stop_requested())
            .finish()
    }
}

/// Registration of a one-shot action to run when a stop is requested
///
/// The action runs on the thread that performs the transition, or immediately
/// inside [`StopCallback::new`] if the token is already stopped. Dropping the
/// guard before the stop deregisters the action without running it.
#[must_use = "dropping a StopCallback deregisters it"]
pub struct StopCallback {
    state: Weak<StopState>,
    id: Option<u64>,
}

impl StopCallback {
    pub fn new<F>(token: &StopToken, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(state) = token.state.as_ref() else {
            return Self {
                state: Weak::new(),
                id: None,
            };
        };

        let mut callbacks = recover_lock(state.callbacks.lock());
        // Checked under the registry lock: request() sets the flag before it
        // drains, so a callback is either drained or run here, never lost
        if state.is_requested() {
            drop(callbacks);
            callback();
            return Self {
                state: Weak::new(),
                id: None,
            };
        }

        let id = state.next_callback_id.fetch_add(1, Ordering::Relaxed);
        callbacks.push((id, Box::new(callback)));
        Self {
            state: Arc::downgrade(state),
            id: Some(id),
        }
    }
}

impl Drop for StopCallback {
    fn drop(&mut self) {
        let (Some(id), Some(state)) = (self.id, self.state.upgrade()) else {
            return;
        };
        recover_lock(state.callbacks.lock()).retain(|(registered, _)| *registered != id);
    }
}

impl fmt::Debug for StopCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopCallback")
            .field("registered", &self.id.is_some())
            .finish()
    }
}
