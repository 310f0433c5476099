//! Tests for concurrent producers and consumers

#[cfg(test)]
mod tests {
    use crate::queue::api::{
        CircularBuffer, StopSource, SupportsEmpty, SupportsPopFront, SupportsPushBack, WaitQueue,
    };
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Run producers and consumers over `queue` and return everything consumed
    ///
    /// Each producer pushes `per_producer` values tagged with its index. Once
    /// all producers finished and every value was received, the queue is
    /// stopped and the consumers must exit.
    fn run_tagged_exchange<C>(
        queue: &WaitQueue<(usize, usize), C>,
        producers: usize,
        consumers: usize,
        per_producer: usize,
    ) -> BTreeSet<(usize, usize)>
    where
        C: SupportsPushBack<(usize, usize)>
            + SupportsPopFront<(usize, usize)>
            + SupportsEmpty
            + Send,
    {
        let received = Mutex::new(BTreeSet::new());
        let duplicates = AtomicUsize::new(0);
        let expected = producers * per_producer;
        let (received_ref, duplicates_ref) = (&received, &duplicates);

        thread::scope(|scope| {
            let consumer_handles: Vec<_> = (0..consumers)
                .map(|_| {
                    scope.spawn(move || {
                        while let Some(tag) = queue.wait_and_pop() {
                            if !received_ref.lock().unwrap().insert(tag) {
                                duplicates_ref.fetch_add(1, Ordering::SeqCst);
                            }
                        }
                    })
                })
                .collect();

            let producer_handles: Vec<_> = (0..producers)
                .map(|producer| {
                    scope.spawn(move || {
                        for sequence in 0..per_producer {
                            assert!(queue.push((producer, sequence)));
                        }
                    })
                })
                .collect();

            for handle in producer_handles {
                handle.join().unwrap();
            }

            let deadline = Instant::now() + Duration::from_secs(30);
            while received.lock().unwrap().len() < expected {
                assert!(Instant::now() < deadline, "consumers stalled");
                thread::yield_now();
            }

            assert!(queue.request_stop());
            for handle in consumer_handles {
                handle.join().unwrap();
            }
        });

        assert_eq!(duplicates.load(Ordering::SeqCst), 0, "a value was delivered twice");
        received.into_inner().unwrap()
    }

    fn all_tags(producers: usize, per_producer: usize) -> BTreeSet<(usize, usize)> {
        (0..producers)
            .flat_map(|producer| (0..per_producer).map(move |sequence| (producer, sequence)))
            .collect()
    }

    #[test]
    fn test_tagged_values_delivered_exactly_once() {
        let queue: WaitQueue<(usize, usize)> = WaitQueue::new();

        let received = run_tagged_exchange(&queue, 4, 3, 250);

        assert_eq!(received.len(), 1000);
        assert_eq!(received, all_tags(4, 250));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_single_producer_many_consumers() {
        let queue: WaitQueue<(usize, usize)> = WaitQueue::new();
        let received = run_tagged_exchange(&queue, 1, 6, 500);
        assert_eq!(received, all_tags(1, 500));
    }

    #[test]
    fn test_circular_buffer_exchange_without_overflow() {
        let queue: WaitQueue<(usize, usize), CircularBuffer<(usize, usize)>> =
            WaitQueue::with_size(600);

        let received = run_tagged_exchange(&queue, 3, 2, 200);
        assert_eq!(received, all_tags(3, 200));
    }

    #[test]
    #[ignore = "slow"]
    fn test_tagged_exchange_stress() {
        let queue: WaitQueue<(usize, usize)> = WaitQueue::new();

        let received = run_tagged_exchange(&queue, 60, 40, 1000);

        assert_eq!(received.len(), 60_000);
        assert_eq!(received, all_tags(60, 1000));
    }

    #[test]
    fn test_accepted_pushes_are_never_lost_when_racing_stop() {
        let source = StopSource::new();
        let queue: WaitQueue<u32> = WaitQueue::with_stop_token(source.token());
        let accepted = AtomicUsize::new(0);
        let popped = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..2 {
                scope.spawn(|| {
                    while queue.wait_and_pop().is_some() {
                        popped.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
            for _ in 0..4 {
                scope.spawn(|| {
                    for value in 0.. {
                        if !queue.push(value) {
                            break;
                        }
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }

            thread::sleep(Duration::from_millis(20));
            source.request_stop();
        });

        // Consumers exit only on an empty stopped queue; whatever is left got
        // in after the last consumer looked
        let mut leftover = 0;
        queue.apply(|_| leftover += 1);
        assert_eq!(
            popped.load(Ordering::SeqCst) + leftover,
            accepted.load(Ordering::SeqCst)
        );
    }

    #[test]
    fn test_queue_shared_through_arc() {
        let queue: Arc<WaitQueue<String>> = Arc::new(WaitQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut lines = Vec::new();
                while let Some(line) = queue.wait_and_pop() {
                    lines.push(line);
                }
                lines
            })
        };

        let producers: Vec<_> = (0..3)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for line in 0..10 {
                        queue.push(format!("{}:{}", producer, line));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }
        while !queue.is_empty() {
            thread::yield_now();
        }
        queue.request_stop();

        let lines = consumer.join().unwrap();
        assert_eq!(lines.len(), 30);
        for producer in 0..3 {
            // Per-producer order is preserved through a single consumer
            let own: Vec<_> = lines
                .iter()
                .filter(|line| line.starts_with(&format!("{}:", producer)))
                .cloned()
                .collect();
            let expected: Vec<_> = (0..10).map(|line| format!("{}:{}", producer, line)).collect();
            assert_eq!(own, expected);
        }
    }
}
