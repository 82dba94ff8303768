//! Bounded multi-producer inbox.
//!
//! Built on `critical-section` and `heapless::Deque`, so the same code runs
//! on the host (with the `std` critical-section implementation) and on a
//! microcontroller. Producers on any thread enqueue; one consumer takes
//! everything that is queued in a single step.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when trying to send to a full channel.
///
/// Carries the rejected value back to the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// A bounded, thread-safe channel.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    ///
    /// Senders are `Copy` and may live on any number of threads.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Get the receiver handle for this channel.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Try to send a value into the channel without blocking.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Take every queued value at once.
    ///
    /// The queue is swapped out inside one critical section: values sent
    /// while the returned iterator is consumed wait for the next drain.
    pub fn drain(&self) -> Drain<T, SIZE> {
        let queue = critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            core::mem::replace(&mut *queue, Deque::new())
        });
        Drain { queue }
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the queue taken by [`Channel::drain`], in arrival order.
pub struct Drain<T, const SIZE: usize> {
    queue: Deque<T, SIZE>,
}

impl<T, const SIZE: usize> Iterator for Drain<T, SIZE> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

/// A sender handle for a [`Channel`].
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

// Manual impls: a handle is copyable whatever `T` is
impl<T, const SIZE: usize> Clone for Sender<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Sender<'_, T, SIZE> {}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Try to send a value into the channel.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// The consuming handle for a [`Channel`].
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Take every queued value, never blocks.
    ///
    /// An empty channel yields an empty iterator.
    pub fn drain(&self) -> Drain<T, SIZE> {
        self.channel.drain()
    }
}
