use super::super::types::Fixed;
use super::*;
use num_complex::Complex64;
use std::vec::Vec;

fn to_complex64<const FRAC: u32>(val: ComplexFixed<FRAC>) -> Complex64 {
    Complex64::new(val.re.to_f64(), val.im.to_f64())
}

/// Direct DFT by definition, scaled by 1/N like the fixed-point engine.
fn scaled_dft(input: &[Complex64]) -> Vec<Complex64> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let sum = input.iter().enumerate().fold(Complex64::new(0.0, 0.0), |acc, (t, &x)| {
                let angle = -2.0 * core::f64::consts::PI * (k * t) as f64 / n as f64;
                acc + x * Complex64::new(libm::cos(angle), libm::sin(angle))
            });
            sum / n as f64
        })
        .collect()
}

fn assert_complex_close<const FRAC: u32>(val: ComplexFixed<FRAC>, expected: Complex64, tolerance: f64) {
    let dist = libm::sqrt((to_complex64(val) - expected).norm_sqr());

    assert!(
        dist < tolerance,
        "Error too large. Expected: ({:.4}, {:.4}), Got: {:?}, Dist: {:.6}",
        expected.re,
        expected.im,
        val,
        dist
    );
}

#[test]
fn test_fft_forward_q12_matches_dft() {
    const FRAC: u32 = 12;
    let n = 8;

    let input_f64 = [
        (1.0, 2.0),
        (3.0, 4.0),
        (5.0, 6.0),
        (7.0, 8.0),
        (-8.0, -7.0),
        (-6.0, -5.0),
        (-4.0, -3.0),
        (-2.0, -1.0),
    ];

    let reference: Vec<Complex64> = input_f64.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
    let expected = scaled_dft(&reference);

    let mut buffer: Vec<ComplexFixed<FRAC>> = input_f64
        .iter()
        .map(|&(re, im)| ComplexFixed::new(Fixed::from_f64(re), Fixed::from_f64(im)))
        .collect();

    let fft = CplxFft::new(n).unwrap();
    fft.process(&mut buffer).unwrap();

    // Q12 LSB is ~0.00024; three stages of truncation stay well below 0.005
    for (i, &val) in buffer.iter().enumerate() {
        assert_complex_close(val, expected[i], 0.005);
    }
}

#[test]
fn test_fft_n4_within_one_lsb() {
    // Real input [0.5, -1.25, 2.0, 0.75] against the DFT by definition
    const FRAC: u32 = 12;
    let input = [0.5, -1.25, 2.0, 0.75];
    let reference: Vec<Complex64> = input.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    let expected = scaled_dft(&reference);

    let mut buffer: Vec<ComplexFixed<FRAC>> = input.iter().map(|&v| ComplexFixed::from_re(Fixed::from_f64(v))).collect();
    CplxFft::new(4).unwrap().process(&mut buffer).unwrap();

    let lsb = 1.0 / (1 << FRAC) as f64;
    for (i, &val) in buffer.iter().enumerate() {
        assert!(libm::fabs(val.re.to_f64() - expected[i].re) <= lsb, "re bin {}: {:?}", i, val);
        assert!(libm::fabs(val.im.to_f64() - expected[i].im) <= lsb, "im bin {}: {:?}", i, val);
    }
}

#[test]
fn test_fft_sinusoid_peak_bin() {
    const FRAC: u32 = 12;
    let n = 128;

    for k in [1usize, 5, 17, 63] {
        let mut buffer: Vec<ComplexFixed<FRAC>> = (0..n)
            .map(|t| {
                let phase = 2.0 * core::f64::consts::PI * (k * t) as f64 / n as f64;
                ComplexFixed::from_re(Fixed::from_f64(4.0 * libm::cos(phase)))
            })
            .collect();

        CplxFft::new(n).unwrap().process(&mut buffer).unwrap();

        // A cosine of amplitude A splits into A/2 at bins k and N-k
        assert_complex_close(buffer[k], Complex64::new(2.0, 0.0), 0.01);
        assert_complex_close(buffer[n - k], Complex64::new(2.0, 0.0), 0.01);
    }
}

#[test]
fn test_fft_trait_dispatch_any_precision() {
    let fft = CplxFft::new(4).unwrap();

    let mut q12 = [ComplexFixed::<12>::from_re(Fixed::from_int(4)); 4];
    let mut q20 = [ComplexFixed::<20>::from_re(Fixed::from_int(4)); 4];

    FftProcess::process(&fft, &mut q12[..]).unwrap();
    FftProcess::process(&fft, &mut q20[..]).unwrap();

    assert_eq!(q12[0].re, Fixed::from_int(4));
    assert_eq!(q20[0].re, Fixed::from_int(4));
}

#[test]
fn test_new_rejects_bad_sizes() {
    assert_eq!(CplxFft::new(12), Err(FftError::NotPowerOfTwo));
    assert_eq!(CplxFft::new(0), Err(FftError::NotPowerOfTwo));
    assert_eq!(CplxFft::new(1), Err(FftError::SizeOutOfRange));
    assert_eq!(CplxFft::new(1 << 17), Err(FftError::SizeOutOfRange));
    assert_eq!(CplxFft::new(1024).map(|f| f.size()), Ok(1024));
}

#[test]
fn test_process_rejects_wrong_length() {
    let fft = CplxFft::new(8).unwrap();
    let mut buffer = [ComplexFixed::<12>::ZERO; 4];
    assert_eq!(fft.process(&mut buffer), Err(FftError::SizeMismatch));
}
