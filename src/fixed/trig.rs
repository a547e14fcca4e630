//! Integer-only sine and cosine for twiddle generation.
//!
//! Angles are radians in Q28, which covers about +/-8 rad in an `i32`; values
//! outside that saturate when built with `Fixed::from_f64`.
//! Results are Q30, where 1.0 is exactly representable.

use super::types::{ComplexFixed, Fixed};

/// Fractional bits of an angle in radians.
pub const ANGLE_FRAC: u32 = 28;

/// Fractional bits of twiddle factors and trig results.
pub const TWIDDLE_FRAC: u32 = 30;

pub type Angle = Fixed<ANGLE_FRAC>;
pub type Twiddle = ComplexFixed<TWIDDLE_FRAC>;

/// pi in Q28.
pub const PI: Angle = Fixed::from_bits(843_314_857);
/// pi / 2 in Q28.
pub const FRAC_PI_2: Angle = Fixed::from_bits(421_657_428);
/// 2 * pi in Q28.
pub const TAU: Angle = Fixed::from_bits(1_686_629_713);

const ONE: i64 = 1 << TWIDDLE_FRAC;

/// Horner divisors for sin(x) = x (1 - x^2/(2*3) (1 - x^2/(4*5) (...))), through x^13.
const SIN_DIVISORS: [i64; 6] = [156, 110, 72, 42, 20, 6];

/// Maps any raw Q28 angle to (-pi, pi].
fn wrap_to_pi(raw: i64) -> i64 {
    let tau = TAU.to_bits() as i64;
    let pi = PI.to_bits() as i64;
    let x = raw.rem_euclid(tau);
    if x > pi { x - tau } else { x }
}

/// Sine of an angle already wrapped to (-pi, pi], as raw Q30.
fn sin_wrapped(x: i64) -> i64 {
    let pi = PI.to_bits() as i64;
    let half_pi = FRAC_PI_2.to_bits() as i64;

    // sin(pi - x) == sin(x)
    let folded = if x > half_pi {
        pi - x
    } else if x < -half_pi {
        -pi - x
    } else {
        x
    };

    let x = folded << (TWIDDLE_FRAC - ANGLE_FRAC);
    let x2 = (x * x) >> TWIDDLE_FRAC;

    let mut acc = ONE;
    for d in SIN_DIVISORS {
        acc = ONE - ((x2 * acc) >> TWIDDLE_FRAC) / d;
    }

    ((x * acc) >> TWIDDLE_FRAC).clamp(-ONE, ONE)
}

pub fn sin(angle: Angle) -> Fixed<TWIDDLE_FRAC> {
    let s = sin_wrapped(wrap_to_pi(angle.to_bits() as i64));
    Fixed::from_bits(s as i32)
}

pub fn cos(angle: Angle) -> Fixed<TWIDDLE_FRAC> {
    // cos(x) == sin(x + pi/2)
    let shifted = angle.to_bits() as i64 + FRAC_PI_2.to_bits() as i64;
    let c = sin_wrapped(wrap_to_pi(shifted));
    Fixed::from_bits(c as i32)
}

#[inline]
pub fn sin_cos(angle: Angle) -> (Fixed<TWIDDLE_FRAC>, Fixed<TWIDDLE_FRAC>) {
    (sin(angle), cos(angle))
}

/// e^(i*angle) = cos(angle) + i sin(angle), the rotation applied in a butterfly.
#[inline]
pub fn twiddle(angle: Angle) -> Twiddle {
    let (s, c) = sin_cos(angle);
    ComplexFixed::new(c, s)
}
