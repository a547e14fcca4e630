//! Main-loop side of the pipeline: take a frame, transform, send magnitudes.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace, warn};

use super::codec::split_le;
use super::exchange::{Consumer, FrameGuard};
use super::link::{Monotonic, SerialTx, write_byte};
use crate::common::{FftError, StreamError};
use crate::config::{PipelineConfig, Q, Sample, Transform};
use crate::fixed::{ComplexFixed, CplxFft, RealFft, extract_magnitudes};

type Bin = ComplexFixed<Q>;

#[derive(Clone, Copy, Debug)]
enum Engine {
    Complex(CplxFft),
    Real(RealFft),
}

/// Summary of one completed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames completed before this one.
    pub index: u32,
    /// Bin with the largest magnitude and that magnitude.
    pub peak_bin: usize,
    pub peak: u16,
    /// Bytes written to the link, always `N`.
    pub bytes_sent: usize,
}

/// Polls the frame exchange and runs each complete frame through the
/// transform, magnitude extraction and transmitter.
///
/// The work buffers are borrowed so they can live in static memory; they are
/// zeroed after every frame, whether or not it was sent completely.
pub struct BatchDriver<'a, T, C, const N: usize> {
    consumer: Consumer<'a, N>,
    tx: T,
    clock: C,
    config: PipelineConfig,
    engine: Engine,
    work: &'a mut [Bin],
    spectrum: &'a mut [u16],
    cancel: Option<&'a AtomicBool>,
    /// Pending byte count and the tick it was first seen at.
    stalled: Option<(usize, u64)>,
    dropped_seen: usize,
    frames: u32,
}

impl<'a, T, C, const N: usize> BatchDriver<'a, T, C, N>
where
    T: SerialTx,
    C: Monotonic,
{
    /// `work` needs at least `N` elements and `spectrum` at least `N / 2`.
    pub fn new(
        consumer: Consumer<'a, N>,
        tx: T,
        clock: C,
        work: &'a mut [Bin],
        spectrum: &'a mut [u16],
        config: PipelineConfig,
    ) -> Result<Self, FftError> {
        let engine = match config.transform {
            Transform::Complex => Engine::Complex(CplxFft::new(N)?),
            Transform::Real => Engine::Real(RealFft::new(N)?),
        };

        if work.len() < N || spectrum.len() < N / 2 {
            return Err(FftError::BufferTooSmall);
        }
        let (work, _) = work.split_at_mut(N);
        let (spectrum, _) = spectrum.split_at_mut(N / 2);
        work.fill(Bin::ZERO);
        spectrum.fill(0);

        Ok(Self {
            consumer,
            tx,
            clock,
            config,
            engine,
            work,
            spectrum,
            cancel: None,
            stalled: None,
            dropped_seen: 0,
            frames: 0,
        })
    }

    /// Flag checked between frames and while waiting on the transmitter.
    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn frames_processed(&self) -> u32 {
        self.frames
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Runs one step: processes a frame if one is complete.
    ///
    /// Returns `Ok(None)` when there was nothing to do.
    pub fn poll(&mut self) -> Result<Option<FrameReport>, StreamError> {
        if self.is_cancelled() {
            return Err(StreamError::Cancelled);
        }

        let dropped = self.consumer.dropped();
        if dropped != self.dropped_seen {
            warn!("{} input bytes dropped, no free frame slot", dropped.wrapping_sub(self.dropped_seen));
            self.dropped_seen = dropped;
        }

        if !self.consumer.is_ready() {
            self.check_stall()?;
            return Ok(None);
        }
        self.stalled = None;

        let Some(frame) = self.consumer.try_take() else {
            return Ok(None);
        };
        // The slot goes back to the producer as soon as the samples are copied.
        load_frame(self.engine, &frame, &mut *self.work);
        drop(frame);

        let result = self.transform_and_send();

        self.work.fill(Bin::ZERO);
        self.spectrum.fill(0);
        self.frames = self.frames.wrapping_add(1);

        result.map(Some)
    }

    /// Polls until the cancellation flag is raised and returns the number of
    /// frames processed. Timeouts are skipped over; `poll` has already logged them.
    pub fn run(&mut self) -> Result<u32, StreamError> {
        loop {
            match self.poll() {
                Ok(_) | Err(StreamError::FrameTimeout { .. } | StreamError::TransmitTimeout { .. }) => {}
                Err(StreamError::Cancelled) => return Ok(self.frames),
                Err(err) => return Err(err),
            }
        }
    }

    fn transform_and_send(&mut self) -> Result<FrameReport, StreamError> {
        let mode = self.config.magnitude;

        match self.engine {
            Engine::Complex(fft) => {
                trace!("complex transform, n = {}", N);
                fft.process(&mut *self.work)?;
                extract_magnitudes(&*self.work, &mut *self.spectrum, mode)?;
            }
            Engine::Real(fft) => {
                trace!("real transform, n = {}", N);
                let bins = &mut self.work[..N / 2];
                fft.process_packed(bins)?;
                // Bin 0 carries Nyquist in its imaginary part; only DC is reported.
                bins[0].im = Sample::ZERO;
                extract_magnitudes(bins, &mut *self.spectrum, mode)?;
            }
        }

        let (peak_bin, peak) = self
            .spectrum
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0), |best, (bin, mag)| if mag > best.1 { (bin, mag) } else { best });

        let mut sent = 0;
        for &mag in self.spectrum.iter() {
            for byte in split_le(mag) {
                write_byte(&mut self.tx, &self.clock, byte, self.config.tx_timeout, self.cancel).map_err(|err| {
                    let err = err.into_stream_error(sent);
                    warn!("frame {} aborted: {}", self.frames, err);
                    err
                })?;
                sent += 1;
            }
        }

        debug!("frame {} sent, peak bin {} ({})", self.frames, peak_bin, peak);

        Ok(FrameReport {
            index: self.frames,
            peak_bin,
            peak,
            bytes_sent: sent,
        })
    }

    /// Discards a partial frame that has not grown for `frame_timeout` ticks.
    fn check_stall(&mut self) -> Result<(), StreamError> {
        let Some(limit) = self.config.frame_timeout else {
            return Ok(());
        };

        let pending = self.consumer.pending_bytes();
        if pending == 0 {
            self.stalled = None;
            return Ok(());
        }

        let now = self.clock.ticks();
        match self.stalled {
            Some((count, since)) if count == pending => {
                if now.wrapping_sub(since) >= limit {
                    self.consumer.discard_partial();
                    self.stalled = None;
                    warn!("partial frame stalled at {} of {} bytes, discarded", pending, 2 * N);
                    return Err(StreamError::FrameTimeout { received: pending });
                }
            }
            _ => self.stalled = Some((pending, now)),
        }

        Ok(())
    }
}

/// Copies the frame into the work buffer in the layout the engine expects.
fn load_frame<const N: usize>(engine: Engine, frame: &FrameGuard<'_, N>, work: &mut [Bin]) {
    let sample = |raw: u16| Sample::from_bits(raw as i16 as i32);

    match engine {
        Engine::Complex(_) => {
            for (dst, &raw) in work.iter_mut().zip(frame.raw()) {
                *dst = Bin::from_re(sample(raw));
            }
        }
        Engine::Real(_) => {
            for (dst, pair) in work.iter_mut().zip(frame.raw().chunks_exact(2)) {
                *dst = Bin::new(sample(pair[0]), sample(pair[1]));
            }
        }
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
