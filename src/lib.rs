#![no_std]

// The standard library backs the tests and the `std::error::Error` impls only;
// the pipeline itself runs without an allocator.
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod common;
pub mod config;
pub mod fixed;
pub mod stream;

pub use common::{FftError, FftProcess, StreamError};
pub use config::{PipelineConfig, Sample, Transform};
pub use fixed::{ComplexFixed, CplxFft, Fixed, MagnitudeMode, RealFft};
pub use stream::{BatchDriver, FrameExchange};
