use conveyr::{CapacityPolicy, Processor, Producer, Queue, connect, filter, map};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// --- queue contract ---

#[test]
fn test_pop_batch_takes_up_to_max() {
    let q: Queue<u8> = Queue::new(CapacityPolicy::Unbounded);
    let producer = q.producer();
    let consumer = q.consumer();
    drop(q);

    assert_eq!(producer.push_all(0u8..5), 5);
    drop(producer);

    assert_eq!(consumer.pop_batch(3), vec![0, 1, 2]);
    assert_eq!(consumer.pop_batch(3), vec![3, 4]);
    // All producers released and buffer drained: permanently exhausted.
    assert!(consumer.pop_batch(3).is_empty());
    assert_eq!(consumer.pop(), None);
}

#[test]
fn test_push_without_consumers_is_discarded() {
    let q: Queue<u8> = Queue::new(CapacityPolicy::Unbounded);
    let producer = q.producer();
    drop(q);

    assert!(!producer.push(1));
    assert_eq!(producer.push_all(0u8..10), 0);
}

#[test]
fn test_pop_none_after_last_producer_drops() {
    let q: Queue<u32> = Queue::new(CapacityPolicy::Bounded(8));
    let producer = q.producer();
    let consumer = q.consumer();
    drop(q);

    assert!(producer.push(42));
    drop(producer);

    assert_eq!(consumer.pop(), Some(42));
    assert_eq!(consumer.pop(), None);
}

// --- connect: single stage ---

#[test]
fn test_single_stage_doubles_in_order() {
    let input: Queue<i64> = Queue::new(CapacityPolicy::Unbounded);
    let output: Queue<i64> = Queue::new(CapacityPolicy::Unbounded);
    let feed = input.producer();
    let drain = output.consumer();

    let worker = connect(input.consumer(), map(|n: i64| n * 2), output.producer());
    drop(input);
    drop(output);

    assert_eq!(feed.push_all([1, 2, 3]), 3);
    drop(feed);

    assert_eq!(drain.pop(), Some(2));
    assert_eq!(drain.pop(), Some(4));
    assert_eq!(drain.pop(), Some(6));
    assert_eq!(drain.pop(), None);

    worker.join().unwrap();
}

/// Counts elements seen and flush calls; forwards everything unchanged.
struct Counting {
    seen: Arc<AtomicUsize>,
    flushes: Arc<AtomicUsize>,
}

impl Processor for Counting {
    type In = u32;
    type Out = u32;

    fn process(&mut self, batch: Vec<u32>, out: &Producer<u32>) {
        self.seen.fetch_add(batch.len(), Ordering::SeqCst);
        for item in batch {
            out.push(item);
        }
    }

    fn flush(&mut self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_flush_called_exactly_once_on_exhaustion() {
    let seen = Arc::new(AtomicUsize::new(0));
    let flushes = Arc::new(AtomicUsize::new(0));

    let input: Queue<u32> = Queue::new(CapacityPolicy::Unbounded);
    let output: Queue<u32> = Queue::new(CapacityPolicy::Unbounded);
    let feed = input.producer();
    let drain = output.consumer();

    let stage = Counting {
        seen: Arc::clone(&seen),
        flushes: Arc::clone(&flushes),
    };
    let worker = connect(input.consumer(), stage, output.producer());
    drop(input);
    drop(output);

    // More elements than one default batch, so the worker loops.
    assert_eq!(feed.push_all(0..1000), 1000);
    drop(feed);

    worker.join().unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1000);
    assert_eq!(flushes.load(Ordering::SeqCst), 1);

    let mut drained = 0;
    while drain.pop().is_some() {
        drained += 1;
    }
    assert_eq!(drained, 1000);
}

#[test]
fn test_detached_worker_still_drains_and_releases() {
    let input: Queue<u32> = Queue::new(CapacityPolicy::Unbounded);
    let output: Queue<u32> = Queue::new(CapacityPolicy::Unbounded);
    let feed = input.producer();
    let drain = output.consumer();

    connect(input.consumer(), map(|n: u32| n + 1), output.producer()).detach();
    drop(input);
    drop(output);

    feed.push_all(0..10);
    drop(feed);

    // The worker releases its output producer on exit, so this drain
    // terminates even though nothing can join the thread.
    let got: Vec<u32> = std::iter::from_fn(|| drain.pop()).collect();
    assert_eq!(got, (1..=10).collect::<Vec<_>>());
}

/// Panics on the first batch it sees.
struct Exploding;

impl Processor for Exploding {
    type In = u32;
    type Out = u32;

    fn process(&mut self, _batch: Vec<u32>, _out: &Producer<u32>) {
        panic!("processor fault");
    }
}

#[test]
fn test_processor_panic_surfaces_on_join() {
    let input: Queue<u32> = Queue::new(CapacityPolicy::Unbounded);
    let output: Queue<u32> = Queue::new(CapacityPolicy::Unbounded);
    let feed = input.producer();
    let drain = output.consumer();

    let worker = connect(input.consumer(), Exploding, output.producer());
    drop(input);
    drop(output);

    feed.push(7);
    drop(feed);

    assert!(worker.join().is_err());
    // Unwinding dropped the worker's output producer, so the exit closes.
    assert_eq!(drain.pop(), None);
}

// --- processors ---

#[test]
fn test_filter_stage_keeps_matching_elements() {
    let input: Queue<u64> = Queue::new(CapacityPolicy::Unbounded);
    let output: Queue<u64> = Queue::new(CapacityPolicy::Unbounded);
    let feed = input.producer();
    let drain = output.consumer();

    let worker = connect(input.consumer(), filter(|n: &u64| n % 2 == 0), output.producer());
    drop(input);
    drop(output);

    feed.push_all(0..10);
    drop(feed);

    let got: Vec<u64> = std::iter::from_fn(|| drain.pop()).collect();
    assert_eq!(got, vec![0, 2, 4, 6, 8]);
    worker.join().unwrap();
}
