//! Test modules for the wait queue
//!
//! Tests are organized by functional area; container-level behavior is tested
//! next to each container.

mod concurrent;
