//! Sequence Store capability traits
//!
//! A [`WaitQueue`](crate::queue::WaitQueue) is generic over its container and
//! asks for one capability per operation rather than one monolithic
//! interface. A fixed view that cannot be default-constructed, or a buffer
//! whose pop needs `T: Default`, still works with every queue operation whose
//! capability it does provide; calling one it lacks fails to compile.
//!
//! | capability | queue operations |
//! |---|---|
//! | [`SupportsPushBack`] | `push`, `push_cloned` |
//! | [`SupportsEmplaceBack`] | `emplace_push`, `emplace_push_with` |
//! | [`SupportsPopFront`] + [`SupportsEmpty`] | `wait_and_pop`, `try_pop` |
//! | [`SupportsEmpty`] | `is_empty` |
//! | [`SupportsSize`] | `size` |
//! | [`SupportsVisit`] | `apply` |
//! | [`FromSize`] | `with_size`, `with_size_and_stop_token` |
//!
//! Construction also uses `Default` and `FromIterator` from std.

mod circular_buffer;
mod cursor;
mod deque;
mod ring_span;

pub use circular_buffer::CircularBuffer;
pub use ring_span::RingSpan;

/// Append a value at the tail
///
/// Containers decide what happens when they cannot grow; the queue passes the
/// outcome through unmodified. The fixed-capacity containers in this module
/// overwrite their oldest element.
pub trait SupportsPushBack<T> {
    fn push_back(&mut self, value: T);
}

/// Construct a value directly at the tail
///
/// `make` runs while the container is borrowed mutably, so for queues it runs
/// under the queue lock.
pub trait SupportsEmplaceBack<T> {
    fn emplace_back_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> T;
}

/// Peek and remove the head
pub trait SupportsPopFront<T> {
    fn front(&self) -> Option<&T>;

    fn pop_front(&mut self) -> Option<T>;
}

/// Emptiness query
pub trait SupportsEmpty {
    fn is_empty(&self) -> bool;
}

/// Element count query
#[allow(clippy::len_without_is_empty)]
pub trait SupportsSize {
    fn len(&self) -> usize;
}

/// Read-only traversal in FIFO order
pub trait SupportsVisit<T> {
    fn visit<F>(&self, visitor: F)
    where
        F: FnMut(&T);
}

/// Construction from a size or capacity argument
///
/// Whether `size` is an initial element count or a reserved capacity is up to
/// the container: `VecDeque` creates `size` default elements, `CircularBuffer`
/// allocates `size` empty slots.
pub trait FromSize: Sized {
    fn from_size(size: usize) -> Self;
}
