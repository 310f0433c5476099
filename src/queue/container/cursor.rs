//! Index bookkeeping shared by the fixed-capacity ring containers

/// Head position and length over `capacity` slots
///
/// Appending to a full ring reuses the head slot and advances the head, so the
/// oldest element is the one replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RingCursor {
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingCursor {
    /// Cursor over `capacity` slots whose first `len` slots are occupied
    pub(super) fn new(capacity: usize, len: usize) -> Self {
        Self {
            head: 0,
            len: len.min(capacity),
            capacity,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.len
    }

    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(super) fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Slot to write the next element into; `None` when there are no slots
    pub(super) fn claim_tail(&mut self) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }
        if self.is_full() {
            let slot = self.head;
            self.head = (self.head + 1) % self.capacity;
            Some(slot)
        } else {
            let slot = (self.head + self.len) % self.capacity;
            self.len += 1;
            Some(slot)
        }
    }

    pub(super) fn head_slot(&self) -> Option<usize> {
        (self.len > 0).then_some(self.head)
    }

    /// Release the head slot and return its index
    pub(super) fn release_head(&mut self) -> Option<usize> {
        let slot = self.head_slot()?;
        self.head = (self.head + 1) % self.capacity;
        self.len -= 1;
        Some(slot)
    }

    /// Occupied slot indices in FIFO order
    pub(super) fn occupied(&self) -> impl Iterator<Item = usize> {
        let Self { head, len, capacity } = *self;
        (0..len).map(move |offset| (head + offset) % capacity)
    }
}
