use super::*;
use super::super::types::Fixed;
use std::vec;

const FRAC: u32 = 12;
type C = ComplexFixed<FRAC>;
type F = Fixed<FRAC>;

fn run(buffer: &mut [C]) {
    let bits = buffer.len().trailing_zeros();
    radix_2_dit_fft_core(buffer, bits);
}

#[test]
fn test_fft_core_impulse_is_flat() {
    // Impulse at 0 -> every bin equals 1/N
    let n = 8;
    let mut buffer = vec![C::ZERO; n];
    buffer[0] = C::from_re(F::from_int(8));

    run(&mut buffer);

    for (i, val) in buffer.iter().enumerate() {
        assert_eq!(val.re, F::from_int(1), "Real part at index {}", i);
        assert_eq!(val.im, F::ZERO, "Imaginary part at index {}", i);
    }
}

#[test]
fn test_fft_core_dc_is_single_bin() {
    // Constant 1.0 -> bin 0 = 1.0 after 1/N scaling, everything else exactly 0
    let n = 16;
    let mut buffer = vec![C::from_re(F::from_int(1)); n];

    run(&mut buffer);

    assert_eq!(buffer[0], C::from_re(F::from_int(1)));
    for (i, val) in buffer.iter().enumerate().skip(1) {
        assert_eq!(*val, C::ZERO, "bin {}", i);
    }
}

#[test]
fn test_fft_core_n4_matches_scaled_dft() {
    // DFT([1, 2, 3, 4]) = [10, -2+2i, -2, -2-2i]; scaled by 1/4
    let mut buffer: vec::Vec<C> = [1, 2, 3, 4].iter().map(|&v| C::from_re(F::from_int(v))).collect();

    run(&mut buffer);

    let expected = [(2.5, 0.0), (-0.5, 0.5), (-0.5, 0.0), (-0.5, -0.5)];
    for (i, (&got, &(re, im))) in buffer.iter().zip(expected.iter()).enumerate() {
        let re_err = (got.re.to_bits() - F::from_f64(re).to_bits()).abs();
        let im_err = (got.im.to_bits() - F::from_f64(im).to_bits()).abs();
        assert!(re_err <= 1 && im_err <= 1, "bin {}: got {:?}", i, got);
    }
}

#[test]
fn test_fft_core_n2() {
    let mut buffer = vec![C::from_re(F::from_int(3)), C::from_re(F::from_int(1))];
    run(&mut buffer);
    assert_eq!(buffer[0], C::from_re(F::from_int(2)));
    assert_eq!(buffer[1], C::from_re(F::from_int(1)));
}

#[test]
fn test_fft_core_nyquist_alternating() {
    // [1, -1, 1, -1, ...] -> all energy in bin N/2
    let n = 16;
    let mut buffer: vec::Vec<C> = (0..n)
        .map(|i| C::from_re(F::from_int(if i % 2 == 0 { 1 } else { -1 })))
        .collect();

    run(&mut buffer);

    for (i, val) in buffer.iter().enumerate() {
        if i == n / 2 {
            assert_eq!(val.re, F::from_int(1));
        } else {
            assert!(val.re.to_bits().abs() <= 1 && val.im.to_bits().abs() <= 1, "bin {}: {:?}", i, val);
        }
    }
}
