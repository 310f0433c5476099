//! Resolved demo settings
//!
//! Converts the merged command-line and configuration file options into a
//! validated [`DemoSettings`], applying built-in defaults for anything unset.

use crate::app::cli::Args;
use crate::core::validation::{validate_choice, validate_count, ValidationError};
use serde::Serialize;

pub const DEFAULT_PRODUCERS: usize = 4;
pub const DEFAULT_CONSUMERS: usize = 4;
pub const DEFAULT_ITEMS: usize = 1000;

pub const MAX_THREADS: usize = 256;
pub const MAX_ITEMS: usize = 1_000_000;
pub const MAX_CAPACITY: usize = 10_000_000;

/// Element container backing the demo queue
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Growable `VecDeque`
    #[default]
    Deque,
    /// `RingSpan` over a caller-allocated vector
    Ring,
    /// Owned `CircularBuffer`
    Circular,
}

impl ContainerKind {
    pub const NAMES: [&'static str; 3] = ["deque", "ring", "circular"];

    /// Whether the container has a fixed capacity and overwrites when full
    pub fn is_fixed_capacity(self) -> bool {
        !matches!(self, ContainerKind::Deque)
    }
}

/// Output format of the final report
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];
}

/// Fully resolved parameters of one demo run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    pub producers: usize,
    pub consumers: usize,
    /// Values pushed by each producer
    pub items: usize,
    pub container: ContainerKind,
    /// Slots of a fixed-capacity container; `None` for the deque
    pub capacity: Option<usize>,
    pub external_stop: bool,
    pub report: ReportFormat,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            producers: DEFAULT_PRODUCERS,
            consumers: DEFAULT_CONSUMERS,
            items: DEFAULT_ITEMS,
            container: ContainerKind::default(),
            capacity: None,
            external_stop: false,
            report: ReportFormat::default(),
        }
    }
}

impl DemoSettings {
    /// Resolve settings from merged arguments
    ///
    /// A fixed-capacity container without an explicit capacity gets room for
    /// every value (up to [`MAX_CAPACITY`]), so nothing is overwritten. A
    /// capacity given for the deque is ignored.
    pub fn from_args(args: &Args) -> Result<Self, ValidationError> {
        let producers = validate_count(
            "producers",
            args.producers.unwrap_or(DEFAULT_PRODUCERS),
            MAX_THREADS,
        )?;
        let consumers = validate_count(
            "consumers",
            args.consumers.unwrap_or(DEFAULT_CONSUMERS),
            MAX_THREADS,
        )?;
        let items = validate_count("items", args.items.unwrap_or(DEFAULT_ITEMS), MAX_ITEMS)?;

        let container = match args.container.as_deref() {
            Some(name) => validate_choice("container", name, &ContainerKind::NAMES)?,
            None => ContainerKind::default(),
        };
        let report = match args.report.as_deref() {
            Some(name) => validate_choice("report format", name, &ReportFormat::NAMES)?,
            None => ReportFormat::default(),
        };

        let capacity = if container.is_fixed_capacity() {
            let requested = args
                .capacity
                .unwrap_or_else(|| (producers * items).min(MAX_CAPACITY));
            Some(validate_count("capacity", requested, MAX_CAPACITY)?)
        } else {
            if args.capacity.is_some() {
                log::warn!("capacity is ignored for the deque container");
            }
            None
        };

        Ok(Self {
            producers,
            consumers,
            items,
            container,
            capacity,
            external_stop: args.external_stop.unwrap_or(false),
            report,
        })
    }

    /// Total number of values the producers will push
    pub fn total_items(&self) -> usize {
        self.producers * self.items
    }
}
