//! Double-buffered frame hand-off between the byte-received interrupt and the
//! main loop.
//!
//! The producer writes bytes into one of two slots. When a slot holds a whole
//! frame it is published and the producer moves on to the other slot, so it
//! never writes into the samples the consumer is reading. Slot ownership is
//! carried by an atomic state word:
//!
//! ```text
//! FREE --(producer: last byte)--> READY --(consumer: take)--> BUSY
//!   ^                                                           |
//!   +-----------------(consumer: zero + release)----------------+
//! ```
//!
//! Typical firmware wiring keeps the exchange in a `static` cell, moves the
//! [`Producer`] into the interrupt handler and the [`Consumer`] into the
//! batch driver.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use crate::common::StreamError;
use crate::config::MAX_FFT_SIZE;

const FREE: u8 = 0;
const READY: u8 = 1;
const BUSY: u8 = 2;

struct Slot<const N: usize> {
    samples: UnsafeCell<[u16; N]>,
    state: AtomicU8,
}

impl<const N: usize> Slot<N> {
    const fn new() -> Self {
        Self {
            samples: UnsafeCell::new([0; N]),
            state: AtomicU8::new(FREE),
        }
    }
}

/// Two frame slots of `N` samples (`2 * N` bytes each) plus the fill counter.
pub struct FrameExchange<const N: usize> {
    slots: [Slot<N>; 2],
    /// Bytes stored in the producer's current slot, in `0..2N`.
    fill: AtomicUsize,
    discard: AtomicBool,
    dropped: AtomicUsize,
}

// SAFETY: a slot's samples are only written by the producer while the slot is
// FREE and only read (then zeroed) by the consumer while it is BUSY. Every
// state change is a Release store observed through an Acquire load, so the
// sample accesses of the two sides never overlap.
unsafe impl<const N: usize> Sync for FrameExchange<N> {}

impl<const N: usize> FrameExchange<N> {
    /// Bytes in one frame.
    pub const FRAME_BYTES: usize = 2 * N;

    pub const fn new() -> Self {
        const {
            assert!(N.is_power_of_two(), "frame length must be a power of two");
            assert!(N >= 4 && N <= MAX_FFT_SIZE, "frame length out of range");
        }

        Self {
            slots: [Slot::new(), Slot::new()],
            fill: AtomicUsize::new(0),
            discard: AtomicBool::new(false),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Splits into the two halves. The exclusive borrow guarantees a single
    /// producer and a single consumer.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let shared: &Self = self;
        (
            Producer { shared, active: 0 },
            Consumer { shared, next: 0 },
        )
    }

    /// Bytes rejected because no slot was free.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for FrameExchange<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a stored byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    /// Byte stored; the current frame now holds this many bytes.
    Stored(usize),
    /// Byte stored and it completed a frame, which is now published.
    FrameReady,
}

/// Interrupt-side handle. Every call is a bounded store-and-increment.
pub struct Producer<'a, const N: usize> {
    shared: &'a FrameExchange<N>,
    active: usize,
}

impl<const N: usize> Producer<'_, N> {
    /// Stores byte `k` of the current frame as byte `k % 2` (low first) of
    /// sample `k / 2`.
    pub fn push(&mut self, byte: u8) -> Result<Push, StreamError> {
        let shared = self.shared;

        if shared.discard.swap(false, Ordering::Acquire) {
            shared.fill.store(0, Ordering::Relaxed);
        }

        let slot = &shared.slots[self.active];
        if slot.state.load(Ordering::Acquire) != FREE {
            shared.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(StreamError::Overrun);
        }

        let k = shared.fill.load(Ordering::Relaxed);

        // SAFETY: the slot is FREE, so the consumer holds no reference into it.
        let samples = unsafe { &mut *slot.samples.get() };
        let Some(sample) = samples.get_mut(k / 2) else {
            shared.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(StreamError::Overrun);
        };

        if k % 2 == 0 {
            // Overwrite the whole sample so nothing of an older frame survives.
            *sample = byte as u16;
        } else {
            *sample |= (byte as u16) << 8;
        }

        let k = k + 1;
        if k == FrameExchange::<N>::FRAME_BYTES {
            shared.fill.store(0, Ordering::Release);
            slot.state.store(READY, Ordering::Release);
            self.active ^= 1;
            return Ok(Push::FrameReady);
        }

        shared.fill.store(k, Ordering::Release);
        Ok(Push::Stored(k))
    }

    /// Bytes stored in the frame being filled.
    pub fn fill_count(&self) -> usize {
        self.shared.fill.load(Ordering::Relaxed)
    }
}

/// Main-loop handle.
pub struct Consumer<'a, const N: usize> {
    shared: &'a FrameExchange<N>,
    next: usize,
}

impl<const N: usize> Consumer<'_, N> {
    /// Takes the oldest complete frame, if any.
    pub fn try_take(&mut self) -> Option<FrameGuard<'_, N>> {
        let slot = &self.shared.slots[self.next];
        slot.state
            .compare_exchange(READY, BUSY, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;

        self.next ^= 1;
        Some(FrameGuard { slot })
    }

    /// Whether a complete frame is waiting.
    pub fn is_ready(&self) -> bool {
        self.shared.slots[self.next].state.load(Ordering::Acquire) == READY
    }

    /// Bytes received towards the next frame. Reads 0 once a discard is pending.
    pub fn pending_bytes(&self) -> usize {
        if self.shared.discard.load(Ordering::Acquire) {
            return 0;
        }
        self.shared.fill.load(Ordering::Acquire)
    }

    /// Asks the producer to restart the partial frame on its next byte.
    pub fn discard_partial(&self) {
        self.shared.discard.store(true, Ordering::Release);
    }

    pub fn dropped(&self) -> usize {
        self.shared.dropped()
    }
}

/// A complete frame on loan to the consumer. Dropping it zeroes the slot and
/// hands it back to the producer.
pub struct FrameGuard<'a, const N: usize> {
    slot: &'a Slot<N>,
}

impl<const N: usize> FrameGuard<'_, N> {
    /// Samples as raw little-endian words.
    pub fn raw(&self) -> &[u16; N] {
        // SAFETY: the slot is BUSY, the producer does not touch it.
        unsafe { &*self.slot.samples.get() }
    }

    /// Samples as signed raw Q-format values.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = i16> + '_ {
        self.raw().iter().map(|&s| s as i16)
    }
}

impl<const N: usize> Drop for FrameGuard<'_, N> {
    fn drop(&mut self) {
        // SAFETY: still BUSY until the store below.
        unsafe { (*self.slot.samples.get()).fill(0) };
        self.slot.state.store(FREE, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "exchange_tests.rs"]
mod tests;
