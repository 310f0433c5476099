//! Synchronization utilities for robust lock handling
//!
//! A lock is poisoned when a thread panics while holding it. The queue and
//! stop registry only ever hold their locks around operations that leave the
//! guarded data structurally valid (a panicking element constructor runs before
//! the container is touched), so a poisoned guard is still safe to use. These
//! helpers recover it and record the event instead of cascading the panic into
//! every other thread sharing the lock.

use std::sync::{LockResult, PoisonError};

/// Take the guard out of a lock result, recovering it if the lock is poisoned
///
/// Works for `Mutex::lock`, `RwLock::{read, write}` and `Condvar::wait*`
/// results alike.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use waitqueue::core::sync::recover_lock;
///
/// let mutex = Mutex::new(42);
/// let guard = recover_lock(mutex.lock());
/// assert_eq!(*guard, 42);
/// ```
pub fn recover_lock<G>(result: LockResult<G>) -> G {
    result.unwrap_or_else(|poisoned: PoisonError<G>| {
        log::warn!(
            "Recovered poisoned lock. A panic occurred in another thread while it held this lock"
        );
        poisoned.into_inner()
    })
}
