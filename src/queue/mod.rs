//! Blocking Wait Queue Component
//!
//! A multi-producer, multi-consumer FIFO queue for handing values between
//! threads, with cooperative shutdown and a pluggable element container.
//!
//! # Overview
//!
//! - **Blocking pop**: consumers park in [`WaitQueue::wait_and_pop`] until a
//!   value arrives or the queue is stopped
//! - **Cooperative shutdown**: a stop wakes every parked consumer and makes
//!   further pushes return `false`
//! - **Stop ownership**: a queue either owns its stop source or observes an
//!   external [`StopToken`], so one source can shut down several queues
//! - **Pluggable containers**: `VecDeque` by default, or a fixed-capacity
//!   [`RingSpan`] over caller storage or an owned [`CircularBuffer`]
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  push   ┌───────────────────────────────┐  wait_and_pop  ┌────────────┐
//! │ Producer A │───────▶ │ WaitQueue                     │ ─────────────▶ │ Consumer X │
//! └────────────┘         │  elements: Mutex<C>           │                └────────────┘
//! ┌────────────┐  push   │  signal:   epoch + condvar    │  wait_and_pop  ┌────────────┐
//! │ Producer B │───────▶ │  stop:     owned | external   │ ─────────────▶ │ Consumer Y │
//! └────────────┘         └───────────────▲───────────────┘                └────────────┘
//!                                        │ request_stop (wakes all)
//!                                  ┌─────┴──────┐
//!                                  │ StopSource │
//!                                  └────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use waitqueue::queue::{StopSource, WaitQueue};
//! use std::thread;
//!
//! let source = StopSource::new();
//! let queue: WaitQueue<String> = WaitQueue::with_stop_token(source.token());
//!
//! thread::scope(|scope| {
//!     let consumer = scope.spawn(|| {
//!         let mut seen = 0;
//!         while let Some(_line) = queue.wait_and_pop() {
//!             seen += 1;
//!         }
//!         seen
//!     });
//!
//!     queue.push("first".to_string());
//!     queue.push("second".to_string());
//!     while !queue.is_empty() {
//!         thread::yield_now();
//!     }
//!
//!     // The queue does not own its source, so only the source can stop it
//!     assert!(!queue.request_stop());
//!     source.request_stop();
//!
//!     assert_eq!(consumer.join().unwrap(), 2);
//! });
//! ```

mod cancellation;
pub mod container;
mod signal;
mod wait_queue;

pub mod api;

pub use crate::core::shutdown::{StopCallback, StopSource, StopToken};
pub use container::{CircularBuffer, RingSpan};
pub use wait_queue::WaitQueue;

#[cfg(test)]
mod tests;
