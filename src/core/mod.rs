//! Core services and infrastructure

pub mod logging;
pub mod shutdown;
pub mod sync;
pub mod validation;
pub mod version;
