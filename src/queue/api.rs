//! Public API for the wait queue
//!
//! External modules should import from here rather than directly from internal modules.

// Queue and shutdown handles
pub use crate::queue::wait_queue::WaitQueue;
pub use crate::queue::{StopCallback, StopSource, StopToken};

// Containers
pub use crate::queue::container::{CircularBuffer, RingSpan};

// Container capabilities, for implementing custom containers
pub use crate::queue::container::{
    FromSize, SupportsEmplaceBack, SupportsEmpty, SupportsPopFront, SupportsPushBack,
    SupportsSize, SupportsVisit,
};
