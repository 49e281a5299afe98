//! The broker channel: a write-only sink for a batch of typed events.
//!
//! Brokers decouple agents from whatever consumes their output (a location
//! router, a worker boundary, a test recorder).  An agent borrows a broker
//! for the duration of a single call and never retains it.

/// A write-only sink for batches of `T`.
///
/// Callers that have nothing to say must skip the call entirely rather than
/// send an empty batch; implementations may nevertheless treat an empty
/// batch as a no-op.
pub trait Broker<T> {
    /// Send a batch of messages.
    fn send(&mut self, batch: &[T]);
}

// ── VecBroker ─────────────────────────────────────────────────────────────────

/// A broker that collects everything into an owned `Vec`.
///
/// The workhorse for hosts (drain per timestep, route, repeat) and tests.
#[derive(Debug, Default)]
pub struct VecBroker<T> {
    items: Vec<T>,
}

impl<T> VecBroker<T> {
    pub fn new() -> Self {
        VecBroker { items: Vec::new() }
    }

    /// Everything received so far, in send order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Remove and return everything received so far.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Broker<T> for VecBroker<T> {
    fn send(&mut self, batch: &[T]) {
        self.items.extend_from_slice(batch);
    }
}

// ── BufferingBroker ───────────────────────────────────────────────────────────

/// A broker that accumulates messages and forwards them to an inner broker
/// once `capacity` is reached.  Useful in front of expensive sinks (a worker
/// boundary, a channel) to amortize per-send cost.
///
/// Call [`flush`][Self::flush] before dropping, or buffered messages are lost.
pub struct BufferingBroker<'a, T> {
    capacity: usize,
    buffer: Vec<T>,
    inner: &'a mut dyn Broker<T>,
}

impl<'a, T: Clone> BufferingBroker<'a, T> {
    /// # Panics
    /// Panics in debug mode if `capacity` is zero.
    pub fn new(capacity: usize, inner: &'a mut dyn Broker<T>) -> Self {
        debug_assert!(capacity > 0, "buffer capacity must be positive");
        BufferingBroker {
            capacity,
            buffer: Vec::with_capacity(capacity),
            inner,
        }
    }

    /// Forward everything buffered so far to the inner broker.
    pub fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        self.inner.send(&self.buffer);
        self.buffer.clear();
    }

    /// Messages currently held back.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

impl<T: Clone> Broker<T> for BufferingBroker<'_, T> {
    fn send(&mut self, batch: &[T]) {
        self.buffer.extend_from_slice(batch);
        if self.buffer.len() >= self.capacity {
            self.flush();
        }
    }
}
