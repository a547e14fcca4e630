pub mod types;
pub mod trig;
pub mod bitrev;
mod core;
pub mod complex;
pub mod real;
pub mod magnitude;

pub use bitrev::{bit_reverse_permute, reverse_index};
pub use complex::CplxFft;
pub use magnitude::{MagnitudeMode, extract_magnitudes, magnitude};
pub use real::RealFft;
pub use trig::{ANGLE_FRAC, Angle, TWIDDLE_FRAC, Twiddle};
pub use types::{ComplexFixed, Fixed};
