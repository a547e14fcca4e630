use super::fixed::Fixed;
use num_complex::Complex32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ComplexFixed<const FRAC: u32> {
    pub re: Fixed<FRAC>,
    pub im: Fixed<FRAC>,
}

impl<const FRAC: u32> ComplexFixed<FRAC> {
    pub const ZERO: Self = Self {
        re: Fixed::ZERO,
        im: Fixed::ZERO,
    };

    pub const fn new(re: Fixed<FRAC>, im: Fixed<FRAC>) -> Self {
        Self { re, im }
    }

    /// Purely real value, imaginary part zero.
    pub const fn from_re(re: Fixed<FRAC>) -> Self {
        Self { re, im: Fixed::ZERO }
    }

    /// Returns the complex conjugate (a - bi)
    #[inline]
    pub fn conj(self) -> Self {
        ComplexFixed {
            re: self.re,
            im: -self.im,
        }
    }

    /// Scales both real and imaginary parts by 0.5 (right shift by 1).
    /// Used for per-stage normalization in the forward transforms.
    #[inline]
    pub fn scale_half(self) -> Self {
        ComplexFixed {
            re: self.re.scale_half(),
            im: self.im.scale_half(),
        }
    }

    /// Multiplies by -i: (a + bi) * -i = b - ai
    #[inline]
    pub fn mul_neg_i(self) -> Self {
        ComplexFixed {
            re: self.im,
            im: -self.re,
        }
    }

    /// Lossy conversion for host-side inspection and plotting.
    pub fn to_complex32(self) -> Complex32 {
        Complex32::new(self.re.to_f64() as f32, self.im.to_f64() as f32)
    }
}

impl<const FRAC: u32> From<ComplexFixed<FRAC>> for Complex32 {
    fn from(value: ComplexFixed<FRAC>) -> Self {
        value.to_complex32()
    }
}

use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// Addition: ComplexFixed<F1> + ComplexFixed<F2> -> ComplexFixed<F1>
impl<const F1: u32, const F2: u32> Add<ComplexFixed<F2>> for ComplexFixed<F1> {
    type Output = ComplexFixed<F1>;

    #[inline]
    fn add(self, rhs: ComplexFixed<F2>) -> Self::Output {
        ComplexFixed {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl<const F1: u32, const F2: u32> AddAssign<ComplexFixed<F2>> for ComplexFixed<F1> {
    #[inline]
    fn add_assign(&mut self, rhs: ComplexFixed<F2>) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

// Subtraction: ComplexFixed<F1> - ComplexFixed<F2> -> ComplexFixed<F1>
impl<const F1: u32, const F2: u32> Sub<ComplexFixed<F2>> for ComplexFixed<F1> {
    type Output = ComplexFixed<F1>;

    #[inline]
    fn sub(self, rhs: ComplexFixed<F2>) -> Self::Output {
        ComplexFixed {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl<const F1: u32, const F2: u32> SubAssign<ComplexFixed<F2>> for ComplexFixed<F1> {
    #[inline]
    fn sub_assign(&mut self, rhs: ComplexFixed<F2>) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }
}

// Multiplication: ComplexFixed<F1> * ComplexFixed<F2> -> ComplexFixed<F1>
// Each partial product goes through the rescaling Fixed multiply.
impl<const F1: u32, const F2: u32> Mul<ComplexFixed<F2>> for ComplexFixed<F1> {
    type Output = ComplexFixed<F1>;

    #[inline]
    fn mul(self, rhs: ComplexFixed<F2>) -> Self::Output {
        // (ac - bd)
        let re = (self.re * rhs.re) - (self.im * rhs.im);
        // (ad + bc)
        let im = (self.re * rhs.im) + (self.im * rhs.re);

        ComplexFixed { re, im }
    }
}
