//! Processing stages: the [`Processor`] trait and ready-made map/filter adapters.

use std::marker::PhantomData;

use crate::queue::Producer;

/// One stage's processing logic, invoked on a dedicated worker thread.
///
/// [`process`](Processor::process) receives a popped batch (never empty) and
/// may push zero or more transformed elements to `out`. Once the input is
/// permanently exhausted the worker calls [`flush`](Processor::flush) exactly
/// once and exits; there is no output handle at that point, so anything a
/// stage wants to emit has to go out during `process`. State a stage needs
/// (counters, buffers, handles to shared structures) lives in the processor
/// value itself.
pub trait Processor: Send + 'static {
    type In: Send + 'static;
    type Out: Send + 'static;

    fn process(&mut self, batch: Vec<Self::In>, out: &Producer<Self::Out>);

    /// End-of-stream finalization. Default: nothing to do.
    fn flush(&mut self) {}
}

/// Stage applying `f` to every element. See [`map`].
pub struct Map<F, I, O> {
    f: F,
    _marker: PhantomData<fn(I) -> O>,
}

/// Build a stage that applies `f` to each element, preserving order within
/// its worker.
pub fn map<F, I, O>(f: F) -> Map<F, I, O>
where
    F: FnMut(I) -> O + Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    Map {
        f,
        _marker: PhantomData,
    }
}

impl<F, I, O> Processor for Map<F, I, O>
where
    F: FnMut(I) -> O + Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    type In = I;
    type Out = O;

    fn process(&mut self, batch: Vec<I>, out: &Producer<O>) {
        for item in batch {
            if !out.push((self.f)(item)) {
                break;
            }
        }
    }
}

/// Stage keeping only elements matching a predicate. See [`filter`].
pub struct Filter<F, T> {
    pred: F,
    _marker: PhantomData<fn(T) -> T>,
}

/// Build a stage that forwards only elements for which `pred` returns true.
pub fn filter<F, T>(pred: F) -> Filter<F, T>
where
    F: FnMut(&T) -> bool + Send + 'static,
    T: Send + 'static,
{
    Filter {
        pred,
        _marker: PhantomData,
    }
}

impl<F, T> Processor for Filter<F, T>
where
    F: FnMut(&T) -> bool + Send + 'static,
    T: Send + 'static,
{
    type In = T;
    type Out = T;

    fn process(&mut self, batch: Vec<T>, out: &Producer<T>) {
        for item in batch {
            if (self.pred)(&item) && !out.push(item) {
                break;
            }
        }
    }
}
