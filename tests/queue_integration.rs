//! Wait queue integration tests
//!
//! Exercises the public queue API the way a dependent crate would.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use waitqueue::queue::api::{CircularBuffer, RingSpan, StopCallback, StopSource, WaitQueue};

#[test]
fn test_basic_push_and_try_pop_sequence() {
    let queue: WaitQueue<i32> = WaitQueue::new();

    for value in [42, 22, 102, -12, 17] {
        assert!(queue.push(value));
    }
    assert_eq!(queue.size(), 5);

    let popped: Vec<_> = (0..5).filter_map(|_| queue.try_pop()).collect();
    assert_eq!(popped, vec![42, 22, 102, -12, 17]);
    assert!(queue.is_empty());
}

#[test]
fn test_fixed_capacity_ring_keeps_newest_forty() {
    let mut buffer = vec![0_i32; 40];
    let queue: WaitQueue<i32, RingSpan<i32>> = WaitQueue::from_container(RingSpan::new(&mut buffer));

    for _ in 0..80 {
        queue.push(42);
    }
    for _ in 0..20 {
        queue.push(47);
    }
    assert_eq!(queue.size(), 40);

    let popped: Vec<_> = std::iter::from_fn(|| queue.try_pop()).collect();
    assert_eq!(popped[..20], [42; 20]);
    assert_eq!(popped[20..], [47; 20]);
}

#[test]
fn test_threaded_exchange_into_ordered_set() {
    const PRODUCERS: usize = 6;
    const CONSUMERS: usize = 4;
    const PER_PRODUCER: usize = 300;

    let queue: WaitQueue<(usize, usize)> = WaitQueue::new();
    let set = Mutex::new(BTreeSet::new());

    thread::scope(|scope| {
        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                let (queue, set) = (&queue, &set);
                scope.spawn(move || {
                    while let Some(tag) = queue.wait_and_pop() {
                        assert!(set.lock().unwrap().insert(tag), "duplicate {:?}", tag);
                    }
                })
            })
            .collect();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = &queue;
                scope.spawn(move || {
                    for sequence in 0..PER_PRODUCER {
                        queue.push((producer, sequence));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        while set.lock().unwrap().len() < PRODUCERS * PER_PRODUCER {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(queue.request_stop());

        for consumer in consumers {
            consumer.join().unwrap();
        }
    });

    let set = set.into_inner().unwrap();
    assert_eq!(set.len(), PRODUCERS * PER_PRODUCER);
    for producer in 0..PRODUCERS {
        for sequence in 0..PER_PRODUCER {
            assert!(set.contains(&(producer, sequence)));
        }
    }
}

#[test]
fn test_shared_stop_source_shuts_down_queue_and_callbacks() {
    let source = StopSource::new();
    let work: WaitQueue<String, CircularBuffer<String>> =
        WaitQueue::with_size_and_stop_token(source.token(), 8);
    let notified = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));

    let flag = std::sync::Arc::clone(&notified);
    let _callback = StopCallback::new(&source.token(), move || {
        flag.store(true, std::sync::atomic::Ordering::SeqCst)
    });

    thread::scope(|scope| {
        let consumer = scope.spawn(|| {
            let mut lines = Vec::new();
            while let Some(line) = work.wait_and_pop() {
                lines.push(line);
            }
            lines
        });

        work.push("one".to_string());
        work.emplace_push("two");
        while !work.is_empty() {
            thread::yield_now();
        }

        assert!(!work.request_stop(), "queue does not own its stop source");
        assert!(source.request_stop());

        assert_eq!(consumer.join().unwrap(), vec!["one", "two"]);
    });

    assert!(notified.load(std::sync::atomic::Ordering::SeqCst));
    assert!(!work.push("late".to_string()));
}
