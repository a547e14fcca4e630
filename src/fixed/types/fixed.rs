// src/fixed/types/fixed.rs
/// Generic fixed-point structure based on the number of fractional bits (FRAC).
/// The internal value is stored as a signed 32-bit integer.
///
/// Overflow contract: addition, subtraction and negation wrap (two's complement),
/// multiplication rounds to nearest and then wraps to 32 bits. Nothing saturates
/// and nothing panics, in debug or release builds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Fixed<const FRAC: u32>(i32);

impl<const FRAC: u32> Fixed<FRAC> {
    pub const ZERO: Self = Self(0);

    /// Creates a Fixed from the raw integer value (without shift).
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Creates a Fixed from an integer, applying the necessary shift.
    /// E.g.: Fixed::<8>::from_int(1) will result in internal value 256.
    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value.wrapping_shl(FRAC))
    }

    /// Converts an f64 to Fixed, applying correct rounding.
    /// Out-of-range values saturate at the i32 limits.
    pub fn from_f64(value: f64) -> Self {
        let scaling_factor = (1u64 << FRAC) as f64;
        let bits = libm::round(value * scaling_factor) as i32;
        Self::from_bits(bits)
    }

    /// Real value as f64. Host-side helper, the pipeline never calls it.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << FRAC) as f64
    }

    /// Returns the stored raw value.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Scales the value by 0.5 (arithmetic shift right by 1, rounds toward -inf).
    #[inline]
    pub const fn scale_half(self) -> Self {
        Self(self.0 >> 1)
    }

    /// Absolute value. `abs` of the most negative value wraps to itself.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }
}

impl<const FRAC: u32> Fixed<FRAC> {
    #[inline]
    pub fn convert<const TO_FRAC: u32>(self) -> Fixed<TO_FRAC> {
        if TO_FRAC > FRAC {
            Fixed::from_bits(self.0.wrapping_shl(TO_FRAC - FRAC))
        } else {
            Fixed::from_bits(self.0 >> (FRAC - TO_FRAC))
        }
    }
}

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

impl<const F1: u32, const F2: u32> Add<Fixed<F2>> for Fixed<F1> {
    type Output = Fixed<F1>;

    #[inline]
    fn add(self, rhs: Fixed<F2>) -> Self::Output {
        let rhs_converted: Fixed<F1> = rhs.convert();
        Fixed(self.0.wrapping_add(rhs_converted.0))
    }
}

impl<const F1: u32, const F2: u32> AddAssign<Fixed<F2>> for Fixed<F1> {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed<F2>) {
        *self = *self + rhs;
    }
}

impl<const F1: u32, const F2: u32> Sub<Fixed<F2>> for Fixed<F1> {
    type Output = Fixed<F1>;

    #[inline]
    fn sub(self, rhs: Fixed<F2>) -> Self::Output {
        let rhs_converted = rhs.convert::<F1>();
        Fixed(self.0.wrapping_sub(rhs_converted.0))
    }
}

impl<const F1: u32, const F2: u32> SubAssign<Fixed<F2>> for Fixed<F1> {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed<F2>) {
        *self = *self - rhs;
    }
}

impl<const F1: u32, const F2: u32> Mul<Fixed<F2>> for Fixed<F1> {
    type Output = Fixed<F1>;

    /// Full 64-bit product, rounded and rescaled by `F2` so the result stays in `F1`.
    #[inline]
    fn mul(self, rhs: Fixed<F2>) -> Self::Output {
        let product = self.0 as i64 * rhs.0 as i64;

        let rounded = if F2 > 0 {
            let offset = 1i64 << (F2 - 1);
            (product + offset) >> F2
        } else {
            product
        };

        Fixed::from_bits(rounded as i32)
    }
}

impl<const F1: u32, const F2: u32> MulAssign<Fixed<F2>> for Fixed<F1> {
    #[inline]
    fn mul_assign(&mut self, rhs: Fixed<F2>) {
        *self = *self * rhs;
    }
}

impl<const FRAC: u32> Neg for Fixed<FRAC> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

use core::fmt;

impl<const FRAC: u32> fmt::Display for Fixed<FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

impl<const FRAC: u32> fmt::Debug for Fixed<FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // In Debug, show both the decimal value and the raw value in parentheses
        write!(f, "{:.6} (raw: {})", self.to_f64(), self.0)
    }
}
