use super::super::complex::CplxFft;
use super::*;
use std::vec;
use std::vec::Vec;

const FRAC: u32 = 12;

fn assert_fixed_close(val: Fixed<FRAC>, expected: f64, tolerance: f64) {
    let float_val = val.to_f64();
    assert!(
        libm::fabs(float_val - expected) < tolerance,
        "Expected: {:.4}, Got: {:.4} (diff: {:.4})",
        expected,
        float_val,
        libm::fabs(float_val - expected)
    );
}

/// Deterministic pseudo-random samples in [-4, 4).
fn noise(n: usize) -> Vec<Fixed<FRAC>> {
    let mut state = 0x1234_5678u32;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            Fixed::from_bits(((state >> 16) as i32 - 0x8000) >> 1)
        })
        .collect()
}

#[test]
fn test_rfft_n4_packed_layout() {
    // x = [1, 2, 3, 4]: DFT/4 = [2.5, -0.5+0.5i, -0.5, -0.5-0.5i]
    let input: Vec<Fixed<FRAC>> = [1, 2, 3, 4].iter().map(|&v| Fixed::from_int(v)).collect();
    let mut spectrum = [ComplexFixed::ZERO; 2];

    let fft = RealFft::new(4).unwrap();
    fft.process(&input, &mut spectrum).unwrap();

    assert_fixed_close(spectrum[0].re, 2.5, 0.001); // DC
    assert_fixed_close(spectrum[0].im, -0.5, 0.001); // Nyquist
    assert_fixed_close(spectrum[1].re, -0.5, 0.001);
    assert_fixed_close(spectrum[1].im, 0.5, 0.001);
}

#[test]
fn test_rfft_impulse_is_flat() {
    let n = 16;
    let mut input = vec![Fixed::<FRAC>::ZERO; n];
    input[0] = Fixed::from_int(4);
    let mut spectrum = vec![ComplexFixed::ZERO; n / 2];

    RealFft::new(n).unwrap().process(&input, &mut spectrum).unwrap();

    // Every bin is 4/16
    assert_fixed_close(spectrum[0].re, 0.25, 0.002);
    assert_fixed_close(spectrum[0].im, 0.25, 0.002);
    for bin in &spectrum[1..] {
        assert_fixed_close(bin.re, 0.25, 0.002);
        assert_fixed_close(bin.im, 0.0, 0.002);
    }
}

#[test]
fn test_rfft_matches_complex_fft() {
    for n in [8usize, 64, 256] {
        let input = noise(n);

        let mut reference: Vec<ComplexFixed<FRAC>> = input.iter().map(|&v| ComplexFixed::from_re(v)).collect();
        CplxFft::new(n).unwrap().process(&mut reference).unwrap();

        let mut spectrum = vec![ComplexFixed::ZERO; n / 2];
        RealFft::new(n).unwrap().process(&input, &mut spectrum).unwrap();

        // Truncation paths differ, allow a handful of LSBs
        let tolerance = 8.0 / (1 << FRAC) as f64;
        assert_fixed_close(spectrum[0].re, reference[0].re.to_f64(), tolerance);
        assert_fixed_close(spectrum[0].im, reference[n / 2].re.to_f64(), tolerance);
        for k in 1..n / 2 {
            assert_fixed_close(spectrum[k].re, reference[k].re.to_f64(), tolerance);
            assert_fixed_close(spectrum[k].im, reference[k].im.to_f64(), tolerance);
        }
    }
}

#[test]
fn test_process_packed_equals_process() {
    let n = 32;
    let input = noise(n);

    let mut spectrum = vec![ComplexFixed::ZERO; n / 2];
    let fft = RealFft::new(n).unwrap();
    fft.process(&input, &mut spectrum).unwrap();

    let mut packed: Vec<ComplexFixed<FRAC>> = input.chunks_exact(2).map(|p| ComplexFixed::new(p[0], p[1])).collect();
    FftProcess::process(&fft, &mut packed[..]).unwrap();

    assert_eq!(packed, spectrum);
}

#[test]
fn test_new_and_process_reject_bad_shapes() {
    assert_eq!(RealFft::new(2), Err(FftError::SizeOutOfRange));
    assert_eq!(RealFft::new(24), Err(FftError::NotPowerOfTwo));

    let fft = RealFft::new(8).unwrap();
    assert_eq!(fft.size(), 8);

    let input = [Fixed::<FRAC>::ZERO; 8];
    let mut short = [ComplexFixed::ZERO; 2];
    assert_eq!(fft.process(&input, &mut short), Err(FftError::SizeMismatch));

    let mut packed = [ComplexFixed::<FRAC>::ZERO; 8];
    assert_eq!(fft.process_packed(&mut packed), Err(FftError::SizeMismatch));
}
