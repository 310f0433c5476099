//! WaitQueue - blocking MPMC FIFO queue with cooperative shutdown
//!
//! Values move through the queue by value: `push` takes ownership, the pop
//! methods hand ownership back. The element lock guards the container; a
//! separate wake signal parks consumers in [`WaitQueue::wait_and_pop`] until an
//! element arrives or a stop is requested.

use crate::core::shutdown::{StopCallback, StopToken};
use crate::core::sync::recover_lock;
use crate::queue::cancellation::Cancellation;
use crate::queue::container::{
    FromSize, SupportsEmplaceBack, SupportsEmpty, SupportsPopFront, SupportsPushBack,
    SupportsSize, SupportsVisit,
};
use crate::queue::signal::{WaitOutcome, WakeSignal};
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

/// Multi-producer, multi-consumer blocking queue with shutdown semantics
///
/// `C` is the container holding the elements, `VecDeque<T>` by default. Each
/// method is available only when `C` provides the capabilities that method
/// needs (see [`crate::queue::container`]).
///
/// A queue either owns its stop source, and can be stopped with
/// [`request_stop`](Self::request_stop), or observes a [`StopToken`] supplied
/// at construction, in which case only the owner of the matching source can
/// stop it. Once stopped, pushes are refused and blocked consumers return.
///
/// The queue is not `Clone`; share it between threads by reference (scoped
/// threads) or behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use waitqueue::queue::WaitQueue;
/// use std::thread;
///
/// let queue: WaitQueue<u32> = WaitQueue::new();
///
/// thread::scope(|scope| {
///     let reader = scope.spawn(|| {
///         let mut received = Vec::new();
///         while let Some(value) = queue.wait_and_pop() {
///             received.push(value);
///         }
///         received
///     });
///
///     for value in 0..10 {
///         queue.push(value);
///     }
///     while !queue.is_empty() {
///         thread::yield_now();
///     }
///     queue.request_stop();
///
///     assert_eq!(reader.join().unwrap(), (0..10).collect::<Vec<_>>());
/// });
/// ```
pub struct WaitQueue<T, C = VecDeque<T>> {
    elements: Mutex<C>,
    signal: Arc<WakeSignal>,
    cancellation: Cancellation,
    _wake_on_stop: StopCallback,
    _element: PhantomData<fn() -> T>,
}

impl<T, C> WaitQueue<T, C> {
    fn assemble(cancellation: Cancellation, container: C) -> Self {
        let signal = Arc::new(WakeSignal::new());
        // Stops requested through any source, owned or external, release every parked consumer
        let wake_on_stop = {
            let signal = Arc::clone(&signal);
            StopCallback::new(cancellation.token(), move || signal.notify_all())
        };

        log::debug!(
            "wait queue created ({} stop source)",
            if cancellation.is_owned() { "owned" } else { "external" }
        );

        Self {
            elements: Mutex::new(container),
            signal,
            cancellation,
            _wake_on_stop: wake_on_stop,
            _element: PhantomData,
        }
    }

    /// Create an empty queue with its own stop source
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::assemble(Cancellation::owned(), C::default())
    }

    /// Create an empty queue stopped through an external source
    pub fn with_stop_token(stop_token: StopToken) -> Self
    where
        C: Default,
    {
        Self::assemble(Cancellation::borrowed(stop_token), C::default())
    }

    /// Take ownership of an already constructed container
    ///
    /// This is how view containers such as
    /// [`RingSpan`](crate::queue::RingSpan) are supplied, and how a queue can
    /// start with arbitrary existing content. Size and emptiness mirror the
    /// supplied container.
    pub fn from_container(container: C) -> Self {
        Self::assemble(Cancellation::owned(), container)
    }

    /// As [`from_container`](Self::from_container), stopped through an external source
    pub fn from_container_with_stop_token(stop_token: StopToken, container: C) -> Self {
        Self::assemble(Cancellation::borrowed(stop_token), container)
    }

    /// Construct the container from a size or capacity argument
    ///
    /// Whether `size` becomes an initial element count or a capacity is up to
    /// the container ([`FromSize`]).
    pub fn with_size(size: usize) -> Self
    where
        C: FromSize,
    {
        Self::assemble(Cancellation::owned(), C::from_size(size))
    }

    /// As [`with_size`](Self::with_size), stopped through an external source
    pub fn with_size_and_stop_token(stop_token: StopToken, size: usize) -> Self
    where
        C: FromSize,
    {
        Self::assemble(Cancellation::borrowed(stop_token), C::from_size(size))
    }

    /// Create a queue holding `elements` in iteration order
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        C: FromIterator<T>,
    {
        Self::assemble(Cancellation::owned(), elements.into_iter().collect())
    }

    /// As [`from_elements`](Self::from_elements), stopped through an external source
    pub fn from_elements_with_stop_token<I>(stop_token: StopToken, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        C: FromIterator<T>,
    {
        Self::assemble(
            Cancellation::borrowed(stop_token),
            elements.into_iter().collect(),
        )
    }

    /// Request the queue to stop, unless it was built with an external token
    ///
    /// On a queue owning its source, the first call stops it, wakes every
    /// consumer parked in [`wait_and_pop`](Self::wait_and_pop) and returns
    /// `true`; later calls return `false`. With an external token this does
    /// nothing and returns `false`; stop the matching source instead.
    pub fn request_stop(&self) -> bool {
        let transitioned = self.cancellation.request_stop();
        if transitioned {
            log::debug!("wait queue stop requested");
        }
        transitioned
    }

    /// Check if a stop has been requested, without taking the element lock
    pub fn stop_requested(&self) -> bool {
        self.cancellation.token().stop_requested()
    }

    /// The token this queue observes for shutdown
    pub fn stop_token(&self) -> StopToken {
        self.cancellation.token().clone()
    }

    /// Push a value by moving it into the queue
    ///
    /// Returns `false` without touching the queue if a stop has been
    /// requested. Otherwise the value is appended, one parked consumer (if
    /// any) is released, and `true` is returned.
    ///
    /// The stop check happens before the element lock is taken. A push racing
    /// a concurrent stop may therefore still be accepted; a push that returned
    /// `true` has always been appended.
    pub fn push(&self, value: T) -> bool
    where
        C: SupportsPushBack<T>,
    {
        if self.stop_requested() {
            return false;
        }
        recover_lock(self.elements.lock()).push_back(value);
        self.signal.notify_one();
        true
    }

    /// Push a copy of `value`
    ///
    /// Same semantics as [`push`](Self::push). The clone is made only when
    /// the queue is still accepting values.
    pub fn push_cloned(&self, value: &T) -> bool
    where
        T: Clone,
        C: SupportsPushBack<T>,
    {
        if self.stop_requested() {
            return false;
        }
        let value = value.clone();
        recover_lock(self.elements.lock()).push_back(value);
        self.signal.notify_one();
        true
    }

    /// Construct an element from `args` at the tail of the queue
    ///
    /// Unlike std's `emplace`-style methods this returns the same acceptance
    /// flag as [`push`](Self::push), not a reference to the new element.
    pub fn emplace_push<A>(&self, args: A) -> bool
    where
        T: From<A>,
        C: SupportsEmplaceBack<T>,
    {
        self.emplace_push_with(move || T::from(args))
    }

    /// Construct an element with `make` at the tail of the queue
    ///
    /// `make` runs while the element lock is held. It must not call back into
    /// this queue.
    pub fn emplace_push_with<F>(&self, make: F) -> bool
    where
        F: FnOnce() -> T,
        C: SupportsEmplaceBack<T>,
    {
        if self.stop_requested() {
            return false;
        }
        recover_lock(self.elements.lock()).emplace_back_with(make);
        self.signal.notify_one();
        true
    }

    /// Pop the head element, blocking until one is available
    ///
    /// Returns `None` only when a stop has been requested and the queue is
    /// empty. An element already present is returned even after a stop.
    pub fn wait_and_pop(&self) -> Option<T>
    where
        C: SupportsPopFront<T> + SupportsEmpty,
    {
        match self
            .signal
            .wait_for(&self.elements, self.cancellation.token(), take_front)
        {
            WaitOutcome::Ready(value) => Some(value),
            WaitOutcome::Stopped => {
                log::trace!("wait_and_pop released by stop request with no elements");
                None
            }
        }
    }

    /// Pop the head element if one is immediately available
    ///
    /// Returns `None` if the queue is empty or a stop has been requested.
    /// Once stopped this returns `None` even if elements remain; inspect them
    /// with [`apply`](Self::apply).
    pub fn try_pop(&self) -> Option<T>
    where
        C: SupportsPopFront<T> + SupportsEmpty,
    {
        if self.stop_requested() {
            return None;
        }
        take_front(&mut *recover_lock(self.elements.lock()))
    }

    /// Invoke `visitor` on every element in FIFO order
    ///
    /// The element lock is held for the whole traversal, blocking producers
    /// and consumers until it finishes. The visitor must not call back into
    /// this queue: the lock is not reentrant and doing so deadlocks.
    pub fn apply<F>(&self, visitor: F)
    where
        F: FnMut(&T),
        C: SupportsVisit<T>,
    {
        recover_lock(self.elements.lock()).visit(visitor);
    }

    /// Check if the queue is empty
    ///
    /// A snapshot: another thread may change it as soon as this returns.
    pub fn is_empty(&self) -> bool
    where
        C: SupportsEmpty,
    {
        recover_lock(self.elements.lock()).is_empty()
    }

    /// Number of elements in the queue, as a snapshot
    pub fn size(&self) -> usize
    where
        C: SupportsSize,
    {
        recover_lock(self.elements.lock()).len()
    }
}

fn take_front<T, C>(elements: &mut C) -> Option<T>
where
    C: SupportsPopFront<T> + SupportsEmpty,
{
    if elements.is_empty() {
        return None;
    }
    elements.pop_front()
}

impl<T, C: Default> Default for WaitQueue<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: FromIterator<T>> FromIterator<T> for WaitQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T, C> fmt::Debug for WaitQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitQueue")
            .field("owns_stop_source", &self.cancellation.is_owned())
            .field("stop_requested", &self.stop_requested())
            .finish_non_exhaustive()
    }
}
