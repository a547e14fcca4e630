//! Link-wide constants and pipeline settings.
//!
//! The constants must match the program on the other end of the serial link;
//! nothing is negotiated at run time.

use crate::fixed::{Fixed, MagnitudeMode};

/// Fractional bits of every sample and magnitude on the wire (Q12).
pub const Q: u32 = 12;

/// Samples per frame. A frame is `2 * SAMPLES` bytes in, `SAMPLES` bytes out.
pub const SAMPLES: usize = 1024;

/// Sample rate of the counterpart, in Hz. Only used to label bins.
pub const SAMPLE_FREQ: u32 = 8192;

/// Largest transform the 16-bit bit-reversal lookup supports.
pub const MAX_FFT_SIZE: usize = 1 << 16;

/// One time-domain sample or magnitude in the link's Q-format.
pub type Sample = Fixed<Q>;

/// Which engine turns a frame into a spectrum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transform {
    /// Explicit bit reversal plus an N-point complex FFT with zero imaginary input.
    #[default]
    Complex,
    /// N/2-point complex FFT on packed sample pairs plus a split pass.
    Real,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub transform: Transform,
    pub magnitude: MagnitudeMode,
    /// Ticks without a new byte after which a partial frame is dropped.
    pub frame_timeout: Option<u64>,
    /// Ticks allowed for the transmitter to accept each byte.
    pub tx_timeout: u64,
}

impl PipelineConfig {
    pub const DEFAULT_TX_TIMEOUT: u64 = 100_000;

    pub const fn new() -> Self {
        Self {
            transform: Transform::Complex,
            magnitude: MagnitudeMode::Exact,
            frame_timeout: None,
            tx_timeout: Self::DEFAULT_TX_TIMEOUT,
        }
    }

    pub const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub const fn with_magnitude(mut self, magnitude: MagnitudeMode) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub const fn with_frame_timeout(mut self, ticks: u64) -> Self {
        self.frame_timeout = Some(ticks);
        self
    }

    pub const fn with_tx_timeout(mut self, ticks: u64) -> Self {
        self.tx_timeout = ticks;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
