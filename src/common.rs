// src/common.rs

use core::fmt;

/// Configuration and buffer-shape errors of the transforms.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FftError {
    SizeMismatch,
    NotPowerOfTwo,
    SizeOutOfRange,
    BufferTooSmall,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::SizeMismatch => write!(f, "Data buffer size does not match FFT size"),
            FftError::NotPowerOfTwo => write!(f, "Size must be a power of 2"),
            FftError::SizeOutOfRange => write!(f, "Size is outside the supported range"),
            FftError::BufferTooSmall => write!(f, "Work buffers are too small"),
        }
    }
}

/// Runtime errors of the ingest / transform / transmit pipeline.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StreamError {
    /// A byte arrived while no frame slot was free; it was dropped.
    Overrun,
    /// A partial frame stalled and was discarded.
    FrameTimeout { received: usize },
    /// The transmitter never became ready; `sent` bytes of the frame went out.
    TransmitTimeout { sent: usize },
    /// The cancellation flag was raised during a wait.
    Cancelled,
    Fft(FftError),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Overrun => write!(f, "No free frame slot, byte dropped"),
            StreamError::FrameTimeout { received } => {
                write!(f, "Frame timed out after {} bytes, discarded", received)
            }
            StreamError::TransmitTimeout { sent } => {
                write!(f, "Transmitter not ready after {} bytes sent", sent)
            }
            StreamError::Cancelled => write!(f, "Wait cancelled"),
            StreamError::Fft(err) => write!(f, "Transform failed: {}", err),
        }
    }
}

impl From<FftError> for StreamError {
    fn from(err: FftError) -> Self {
        StreamError::Fft(err)
    }
}

/// In-place forward transform over a buffer of `T`.
pub trait FftProcess<T> {
    fn process(&self, buffer: &mut [T]) -> Result<(), FftError>;
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

#[cfg(feature = "std")]
impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Fft(err) => Some(err),
            _ => None,
        }
    }
}
