//! Producer/consumer exchange over a wait queue
//!
//! Producers push `(producer, sequence)` tags, consumers drain them with
//! `wait_and_pop` into a shared ordered set. Once the producers are done and
//! the queue has drained, the run requests a stop (through the queue, or
//! through an external source) and every consumer must return.

use crate::app::error::{AppError, AppResult};
use crate::app::settings::{ContainerKind, DemoSettings};
use crate::core::sync::recover_lock;
use crate::queue::api::{
    CircularBuffer, RingSpan, StopSource, StopToken, SupportsEmpty, SupportsPopFront,
    SupportsPushBack, WaitQueue,
};
use chrono::{DateTime, SecondsFormat, Utc};
use prettytable::{format, row, Table};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Value pushed by the demo: producer index and per-producer sequence number
pub type Tag = (usize, usize);

/// Outcome of one demo run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    /// Start of the run, RFC 3339 in UTC
    pub started_at: String,
    pub container: ContainerKind,
    pub capacity: Option<usize>,
    pub producers: usize,
    pub consumers: usize,
    pub items_per_producer: usize,
    pub external_stop: bool,
    /// Pushes the queue accepted
    pub pushed: usize,
    /// Values handed out by `wait_and_pop`
    pub received: usize,
    /// Distinct tags among the received values
    pub distinct: usize,
    /// Accepted values displaced by a full fixed-capacity container
    pub overwritten: usize,
    /// Values received by each consumer, by consumer index
    pub per_consumer: Vec<usize>,
    pub elapsed_ms: f64,
}

impl DemoReport {
    /// Every value was delivered at most once, and nothing vanished except by overwrite
    pub fn is_consistent(&self) -> bool {
        self.distinct == self.received
            && self.received + self.overwritten == self.pushed
            && (self.container.is_fixed_capacity() || self.overwritten == 0)
    }

    pub fn render_text(&self, color: bool) -> String {
        use colored::Colorize;

        let capacity = self
            .capacity
            .map_or_else(|| "unbounded".to_string(), |capacity| capacity.to_string());
        let stop_source = if self.external_stop { "external" } else { "queue" };

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["Metric", "Value"]);
        table.add_row(row!["Started", self.started_at]);
        table.add_row(row!["Container", self.container]);
        table.add_row(row!["Capacity", capacity]);
        table.add_row(row!["Stop source", stop_source]);
        table.add_row(row!["Producers", self.producers]);
        table.add_row(row!["Items per producer", self.items_per_producer]);
        table.add_row(row!["Pushed", self.pushed]);
        table.add_row(row!["Received", self.received]);
        table.add_row(row!["Distinct", self.distinct]);
        table.add_row(row!["Overwritten", self.overwritten]);
        for (consumer, count) in self.per_consumer.iter().enumerate() {
            table.add_row(row![format!("Consumer {}", consumer), count]);
        }
        table.add_row(row!["Elapsed", format!("{:.1} ms", self.elapsed_ms)]);

        let status = match (self.is_consistent(), color) {
            (true, true) => "consistent".green().to_string(),
            (true, false) => "consistent".to_string(),
            (false, true) => "INCONSISTENT".red().bold().to_string(),
            (false, false) => "INCONSISTENT".to_string(),
        };

        format!("{}Result: {}", table, status)
    }

    pub fn render_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct Exchange {
    pushed: usize,
    per_consumer: Vec<usize>,
    received: BTreeSet<Tag>,
}

/// Run the exchange described by `settings`
pub fn run_demo(settings: &DemoSettings) -> AppResult<DemoReport> {
    let started_at: DateTime<Utc> = Utc::now();
    let clock = Instant::now();

    let external = settings.external_stop.then(StopSource::new);
    let token = external.as_ref().map(StopSource::token);
    let capacity = settings.capacity.unwrap_or_else(|| settings.total_items());

    log::info!(
        "Starting exchange: {} producer(s) x {} item(s), {} consumer(s), {} container",
        settings.producers,
        settings.items,
        settings.consumers,
        settings.container
    );

    let outcome = match settings.container {
        ContainerKind::Deque => {
            let queue = build_queue(token, VecDeque::new());
            exchange(&queue, external.as_ref(), settings)?
        }
        ContainerKind::Ring => {
            let mut storage = vec![(0, 0); capacity];
            let queue = build_queue(token, RingSpan::new(&mut storage));
            exchange(&queue, external.as_ref(), settings)?
        }
        ContainerKind::Circular => {
            let queue: WaitQueue<Tag, CircularBuffer<Tag>> = match token {
                Some(token) => WaitQueue::with_size_and_stop_token(token, capacity),
                None => WaitQueue::with_size(capacity),
            };
            exchange(&queue, external.as_ref(), settings)?
        }
    };

    let received: usize = outcome.per_consumer.iter().sum();
    let report = DemoReport {
        started_at: started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        container: settings.container,
        capacity: settings.capacity,
        producers: settings.producers,
        consumers: settings.consumers,
        items_per_producer: settings.items,
        external_stop: settings.external_stop,
        pushed: outcome.pushed,
        received,
        distinct: outcome.received.len(),
        overwritten: outcome.pushed.saturating_sub(received),
        per_consumer: outcome.per_consumer,
        elapsed_ms: clock.elapsed().as_secs_f64() * 1000.0,
    };

    log::info!(
        "Exchange finished: {} pushed, {} received, {} overwritten in {:.1} ms",
        report.pushed,
        report.received,
        report.overwritten,
        report.elapsed_ms
    );
    Ok(report)
}

fn build_queue<C>(token: Option<StopToken>, container: C) -> WaitQueue<Tag, C> {
    match token {
        Some(token) => WaitQueue::from_container_with_stop_token(token, container),
        None => WaitQueue::from_container(container),
    }
}

fn exchange<C>(
    queue: &WaitQueue<Tag, C>,
    external: Option<&StopSource>,
    settings: &DemoSettings,
) -> AppResult<Exchange>
where
    C: SupportsPushBack<Tag> + SupportsPopFront<Tag> + SupportsEmpty + Send,
{
    let received = Mutex::new(BTreeSet::new());
    let received_ref = &received;
    let items = settings.items;

    let (pushed, per_consumer) = thread::scope(|scope| {
        let consumers: Vec<_> = (0..settings.consumers)
            .map(|consumer| {
                scope.spawn(move || {
                    let mut count = 0;
                    while let Some(tag) = queue.wait_and_pop() {
                        count += 1;
                        if !recover_lock(received_ref.lock()).insert(tag) {
                            log::warn!("Consumer {} received duplicate value {:?}", consumer, tag);
                        }
                    }
                    log::debug!("Consumer {} finished after {} value(s)", consumer, count);
                    count
                })
            })
            .collect();

        let producers: Vec<_> = (0..settings.producers)
            .map(|producer| {
                scope.spawn(move || {
                    let accepted = (0..items)
                        .filter(|&sequence| queue.push((producer, sequence)))
                        .count();
                    log::debug!("Producer {} pushed {} value(s)", producer, accepted);
                    accepted
                })
            })
            .collect();

        let pushed: AppResult<usize> = producers
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| AppError::ThreadPanic { role: "producer" })
            })
            .sum();

        // Drained, or no consumer left to drain it
        if pushed.is_ok() {
            while !queue.is_empty() && !consumers.iter().all(|handle| handle.is_finished()) {
                thread::sleep(Duration::from_millis(1));
            }
        }

        let transitioned = match external {
            Some(source) => source.request_stop(),
            None => queue.request_stop(),
        };
        log::debug!("Stop requested (transitioned: {})", transitioned);

        let per_consumer: AppResult<Vec<usize>> = consumers
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| AppError::ThreadPanic { role: "consumer" })
            })
            .collect();

        (pushed, per_consumer)
    });

    Ok(Exchange {
        pushed: pushed?,
        per_consumer: per_consumer?,
        received: recover_lock(received.into_inner()),
    })
}
