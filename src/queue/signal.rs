//! Wake signal for parked consumers
//!
//! Consumers park on a condition variable guarded by its own park lock, not
//! by the element lock. The park lock lives in an `Arc` so a stop callback
//! registered on a token the queue does not own can still take it and wake
//! every parked consumer.
//!
//! The park lock guards a wake epoch. Every notification bumps it. A waiter
//! snapshots the epoch, releases the park lock, tries the store, and parks
//! only while the epoch still equals its snapshot:
//!
//! - producers append under the element lock, release it, then bump and
//!   notify under the park lock;
//! - a stop sets its flag before bumping and notifying under the park lock.
//!
//! A notification therefore either happens before the snapshot (the waiter
//! sees the element or the flag) or after it (the epoch moved and the waiter
//! does not park).
//!
//! The two locks are never held together. A stop requested by a thread that
//! holds the element lock, for example inside a visitor, only needs the park
//! lock, which no waiter keeps while touching the store.

use crate::core::shutdown::StopToken;
use crate::core::sync::recover_lock;
use std::sync::{Condvar, Mutex};

/// How a cancellation-aware wait resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitOutcome<R> {
    /// The predicate produced a value
    Ready(R),
    /// Stop was requested and the predicate still produced nothing
    Stopped,
}

#[derive(Debug, Default)]
pub(crate) struct WakeSignal {
    epoch: Mutex<u64>,
    cond: Condvar,
}

impl WakeSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Release at most one parked waiter
    pub(crate) fn notify_one(&self) {
        let mut epoch = recover_lock(self.epoch.lock());
        *epoch = epoch.wrapping_add(1);
        self.cond.notify_one();
    }

    /// Release every parked waiter
    pub(crate) fn notify_all(&self) {
        let mut epoch = recover_lock(self.epoch.lock());
        *epoch = epoch.wrapping_add(1);
        self.cond.notify_all();
    }

    /// Block until `take` yields a value from `store` or `stop` is requested
    ///
    /// `take` is retried under the store lock after every wakeup, spurious or
    /// not. A value is preferred over a stop: if both are available the value
    /// is returned.
    pub(crate) fn wait_for<C, R, F>(
        &self,
        store: &Mutex<C>,
        stop: &StopToken,
        mut take: F,
    ) -> WaitOutcome<R>
    where
        F: FnMut(&mut C) -> Option<R>,
    {
        loop {
            let seen = *recover_lock(self.epoch.lock());

            let taken = {
                let mut elements = recover_lock(store.lock());
                take(&mut *elements)
            };
            if let Some(value) = taken {
                return WaitOutcome::Ready(value);
            }
            if stop.stop_requested() {
                return WaitOutcome::Stopped;
            }

            let mut epoch = recover_lock(self.epoch.lock());
            while *epoch == seen {
                epoch = recover_lock(self.cond.wait(epoch));
            }
        }
    }
}
