//! Outbound serial channel and time source, as seen by the batch driver.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::common::StreamError;

/// Byte-wide transmitter (a UART TX register and its ready flag).
pub trait SerialTx {
    /// Whether the transmitter can accept another byte.
    fn is_ready(&mut self) -> bool;

    /// Hands one byte to the transmitter. Only called after `is_ready`.
    fn write(&mut self, byte: u8);
}

/// Free-running tick counter. The tick length is up to the implementation;
/// timeouts in [`PipelineConfig`](crate::config::PipelineConfig) use the same unit.
pub trait Monotonic {
    fn ticks(&self) -> u64;
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }
}

impl<C: Monotonic + ?Sized> Monotonic for &C {
    fn ticks(&self) -> u64 {
        (**self).ticks()
    }
}

/// Why a bounded wait ended without the transmitter becoming ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitError {
    TimedOut,
    Cancelled,
}

/// Busy-waits until `tx` is ready, then writes `byte`.
///
/// Gives up after `timeout` ticks, or as soon as `cancel` is raised.
pub(crate) fn write_byte<T, C>(
    tx: &mut T,
    clock: &C,
    byte: u8,
    timeout: u64,
    cancel: Option<&AtomicBool>,
) -> Result<(), WaitError>
where
    T: SerialTx + ?Sized,
    C: Monotonic + ?Sized,
{
    let start = clock.ticks();
    loop {
        if tx.is_ready() {
            tx.write(byte);
            return Ok(());
        }
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(WaitError::Cancelled);
        }
        if clock.ticks().wrapping_sub(start) >= timeout {
            return Err(WaitError::TimedOut);
        }
        core::hint::spin_loop();
    }
}

impl WaitError {
    pub(crate) fn into_stream_error(self, sent: usize) -> StreamError {
        match self {
            WaitError::TimedOut => StreamError::TransmitTimeout { sent },
            WaitError::Cancelled => StreamError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use std::vec::Vec;

    struct StepClock(Cell<u64>);

    impl Monotonic for StepClock {
        fn ticks(&self) -> u64 {
            let now = self.0.get();
            self.0.set(now.wrapping_add(1));
            now
        }
    }

    /// Becomes ready after `busy_polls` polls.
    struct SlowTx {
        busy_polls: usize,
        sent: Vec<u8>,
    }

    impl SerialTx for SlowTx {
        fn is_ready(&mut self) -> bool {
            if self.busy_polls == 0 {
                return true;
            }
            self.busy_polls -= 1;
            false
        }

        fn write(&mut self, byte: u8) {
            self.sent.push(byte);
        }
    }

    #[test]
    fn test_waits_for_ready() {
        let mut tx = SlowTx { busy_polls: 5, sent: Vec::new() };
        let clock = StepClock(Cell::new(0));
        assert_eq!(write_byte(&mut tx, &clock, 0x42, 100, None), Ok(()));
        assert_eq!(tx.sent, [0x42]);
    }

    #[test]
    fn test_times_out() {
        let mut tx = SlowTx { busy_polls: usize::MAX, sent: Vec::new() };
        let clock = StepClock(Cell::new(u64::MAX - 3));
        assert_eq!(write_byte(&mut tx, &clock, 0x42, 10, None), Err(WaitError::TimedOut));
        assert!(tx.sent.is_empty());
        assert_eq!(
            WaitError::TimedOut.into_stream_error(7),
            StreamError::TransmitTimeout { sent: 7 }
        );
    }

    #[test]
    fn test_cancel_stops_wait() {
        let mut tx = SlowTx { busy_polls: usize::MAX, sent: Vec::new() };
        let clock = StepClock(Cell::new(0));
        let cancel = AtomicBool::new(true);
        assert_eq!(
            write_byte(&mut tx, &clock, 0x42, u64::MAX, Some(&cancel)),
            Err(WaitError::Cancelled)
        );
    }
}
