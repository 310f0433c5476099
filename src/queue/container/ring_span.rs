//! Fixed-capacity ring view over caller-owned storage
//!
//! `RingSpan` never allocates: its slots are a mutable slice the caller owns
//! (a stack array, a static buffer, a `Vec` allocated up front), so a queue
//! built on it runs without heap traffic after setup. Because it only borrows
//! its storage it cannot be default- or size-constructed; hand it to
//! [`WaitQueue::from_container`](crate::queue::WaitQueue::from_container).

use super::cursor::RingCursor;
use super::{
    SupportsEmplaceBack, SupportsEmpty, SupportsPopFront, SupportsPushBack, SupportsSize,
    SupportsVisit,
};
use std::fmt;

/// Ring view over `&'a mut [T]`
///
/// - Capacity is the slice length and never changes.
/// - Pushing into a full view overwrites the oldest element.
/// - Pushing into a zero-length view drops the value.
/// - Popping moves the head out with `mem::take`, leaving `T::default()` in
///   the slot, so the pop capability is only available for `T: Default`.
pub struct RingSpan<'a, T> {
    storage: &'a mut [T],
    cursor: RingCursor,
}

impl<'a, T> RingSpan<'a, T> {
    /// Empty view over `storage`
    pub fn new(storage: &'a mut [T]) -> Self {
        Self::with_len(storage, 0)
    }

    /// View whose first `len` slots are existing elements, oldest first
    ///
    /// `len` is clamped to the storage length.
    pub fn with_len(storage: &'a mut [T], len: usize) -> Self {
        let cursor = RingCursor::new(storage.len(), len);
        Self { storage, cursor }
    }

    pub fn capacity(&self) -> usize {
        self.cursor.capacity()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.cursor.is_full()
    }

    /// Elements in FIFO order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.cursor.occupied().map(move |slot| &self.storage[slot])
    }
}

impl<T> SupportsPushBack<T> for RingSpan<'_, T> {
    fn push_back(&mut self, value: T) {
        if let Some(slot) = self.cursor.claim_tail() {
            self.storage[slot] = value;
        }
    }
}

impl<T> SupportsEmplaceBack<T> for RingSpan<'_, T> {
    fn emplace_back_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        if self.capacity() == 0 {
            return;
        }
        // Built before a slot is claimed so a panicking constructor leaves the ring untouched
        let value = make();
        self.push_back(value);
    }
}

impl<T: Default> SupportsPopFront<T> for RingSpan<'_, T> {
    fn front(&self) -> Option<&T> {
        self.cursor.head_slot().map(|slot| &self.storage[slot])
    }

    fn pop_front(&mut self) -> Option<T> {
        let slot = self.cursor.release_head()?;
        Some(std::mem::take(&mut self.storage[slot]))
    }
}

impl<T> SupportsEmpty for RingSpan<'_, T> {
    fn is_empty(&self) -> bool {
        RingSpan::is_empty(self)
    }
}

impl<T> SupportsSize for RingSpan<'_, T> {
    fn len(&self) -> usize {
        RingSpan::len(self)
    }
}

impl<T> SupportsVisit<T> for RingSpan<'_, T> {
    fn visit<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(visitor);
    }
}

impl<T: fmt::Debug> fmt::Debug for RingSpan<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingSpan")
            .field("capacity", &self.capacity())
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
