//! Queue contract: reference-counted MPMC channels behind move-only endpoint handles.
//!
//! The storage, blocking, and close-on-last-release behavior all come from
//! crossbeam-channel; this module only narrows it to the shape the pipeline
//! layer needs. A [`Queue`] stays alive while any [`Producer`] or [`Consumer`]
//! derived from it exists. Dropping the last producer closes the queue for
//! reads once drained; dropping the last consumer closes it for writes.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Capacity discipline for a new [`Queue`].
///
/// `Unbounded` pushes never block; `Bounded(n)` pushes block once `n`
/// elements are in flight (`Bounded(0)` is a rendezvous: every push waits for
/// a matching pop). Which to use is the caller's call; the pipeline layer
/// defaults to `Unbounded`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapacityPolicy {
    #[default]
    Unbounded,
    Bounded(usize),
}

/// A queue of elements of type `T`, created once and then accessed only
/// through derived handles.
///
/// The `Queue` value itself holds the queue's own direct endpoint references.
/// Derive as many handles as needed, then drop the `Queue`; the channel stays
/// alive while outstanding handles reference it. Keeping the `Queue` around
/// keeps the queue open in both directions, so drop it before waiting for
/// end-of-stream.
pub struct Queue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Queue<T> {
    pub fn new(policy: CapacityPolicy) -> Self {
        let (tx, rx) = match policy {
            CapacityPolicy::Unbounded => unbounded(),
            CapacityPolicy::Bounded(cap) => bounded(cap),
        };
        Self { tx, rx }
    }

    /// Derive a new push-only handle on this queue.
    pub fn producer(&self) -> Producer<T> {
        Producer {
            tx: self.tx.clone(),
        }
    }

    /// Derive a new pop-only handle on this queue.
    pub fn consumer(&self) -> Consumer<T> {
        Consumer {
            rx: self.rx.clone(),
        }
    }
}

/// Push-only handle into a [`Queue`]. Move-only; dropping it releases its
/// reference, and releasing the last one signals end-of-stream to consumers
/// once the queue drains.
pub struct Producer<T> {
    tx: Sender<T>,
}

impl<T> Producer<T> {
    /// Push one element, blocking while the queue is at capacity.
    ///
    /// Returns `false` when no consumer handle remains; the element is
    /// discarded, matching pushes into a queue closed for reads. Producers
    /// feeding a truncated pipeline hit this path and may simply keep going.
    pub fn push(&self, item: T) -> bool {
        self.tx.send(item).is_ok()
    }

    /// Push every element of `iter` in order; returns how many were accepted.
    /// Stops early when no consumer handle remains.
    pub fn push_all<I>(&self, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut sent = 0;
        for item in iter {
            if !self.push(item) {
                break;
            }
            sent += 1;
        }
        sent
    }
}

/// Pop-only handle into a [`Queue`]. Move-only; dropping it releases its
/// reference, and releasing the last one discards further pushes.
pub struct Consumer<T> {
    rx: Receiver<T>,
}

impl<T> Consumer<T> {
    /// Pop one element, blocking until one arrives. `None` only when the
    /// queue is permanently exhausted: every producer handle released and the
    /// buffer drained.
    pub fn pop(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Pop up to `max` elements: blocks for the first, then takes whatever
    /// else is immediately available. An empty result only ever means
    /// permanent exhaustion, never "nothing right now".
    pub fn pop_batch(&self, max: usize) -> Vec<T> {
        let Ok(first) = self.rx.recv() else {
            return Vec::new();
        };
        let mut batch = Vec::with_capacity(max);
        batch.push(first);
        while batch.len() < max {
            match self.rx.try_recv() {
                Ok(item) => batch.push(item),
                Err(_) => break,
            }
        }
        batch
    }

    /// Derive another handle on the same queue. Kept crate-private so public
    /// handles stay move-only; in-chain fan-out uses this to hand one shared
    /// input to several competing workers.
    pub(crate) fn duplicate(&self) -> Consumer<T> {
        Consumer {
            rx: self.rx.clone(),
        }
    }
}
