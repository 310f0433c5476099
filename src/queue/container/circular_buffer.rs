//! Owning fixed-capacity circular buffer
//!
//! All slots are allocated once, at construction; pushes and pops after that
//! never allocate or free memory. There is no default constructor since a
//! zero-capacity buffer cannot hold anything; size it with
//! [`CircularBuffer::with_capacity`] or [`FromSize`].

use super::cursor::RingCursor;
use super::{
    FromSize, SupportsEmplaceBack, SupportsEmpty, SupportsPopFront, SupportsPushBack,
    SupportsSize, SupportsVisit,
};
use std::fmt;

/// Circular buffer of `capacity` slots
///
/// Pushing into a full buffer overwrites the oldest element; pushing into a
/// zero-capacity buffer drops the value.
pub struct CircularBuffer<T> {
    slots: Box<[Option<T>]>,
    cursor: RingCursor,
}

impl<T> CircularBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            cursor: RingCursor::new(capacity, 0),
        }
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
        self.cursor
            .occupied()
            .filter_map(move |slot| self.slots[slot].as_ref())
    }
}

impl<T> SupportsPushBack<T> for CircularBuffer<T> {
    fn push_back(&mut self, value: T) {
        if let Some(slot) = self.cursor.claim_tail() {
            self.slots[slot] = Some(value);
        }
    }
}

impl<T> SupportsEmplaceBack<T> for CircularBuffer<T> {
    fn emplace_back_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        if self.capacity() == 0 {
            return;
        }
        let value = make();
        self.push_back(value);
    }
}

impl<T> SupportsPopFront<T> for CircularBuffer<T> {
    fn front(&self) -> Option<&T> {
        self.cursor
            .head_slot()
            .and_then(|slot| self.slots[slot].as_ref())
    }

    fn pop_front(&mut self) -> Option<T> {
        let slot = self.cursor.release_head()?;
        self.slots[slot].take()
    }
}

impl<T> SupportsEmpty for CircularBuffer<T> {
    fn is_empty(&self) -> bool {
        CircularBuffer::is_empty(self)
    }
}

impl<T> SupportsSize for CircularBuffer<T> {
    fn len(&self) -> usize {
        CircularBuffer::len(self)
    }
}

impl<T> SupportsVisit<T> for CircularBuffer<T> {
    fn visit<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(visitor);
    }
}

/// `size` is the capacity; the buffer starts empty
impl<T> FromSize for CircularBuffer<T> {
    fn from_size(size: usize) -> Self {
        Self::with_capacity(size)
    }
}

/// Capacity equals the number of elements collected
impl<T> FromIterator<T> for CircularBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let slots: Box<[Option<T>]> = iter.into_iter().map(Some).collect();
        let cursor = RingCursor::new(slots.len(), slots.len());
        Self { slots, cursor }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularBuffer")
            .field("capacity", &self.capacity())
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
