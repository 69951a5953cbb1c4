use super::*;
use std::vec;

#[test]
fn test_round_ties_to_even() {
    assert_eq!(round(2.5), 2.0);
    assert_eq!(round(3.5), 4.0);
    assert_eq!(round(-2.5), -2.0);
    assert_eq!(round(-0.5), 0.0);
    assert_eq!(round(0.49999), 0.0);
    assert_eq!(round(-1.2), -1.0);
    assert_eq!(scale_round(5.0, -1), 2);
}

#[test]
fn test_round_shr() {
    assert_eq!(round_shr(5, 0), 5);
    // Ties go to the even neighbour: 2.5 -> 2, 3.5 -> 4
    assert_eq!(round_shr(5, 1), 2);
    assert_eq!(round_shr(7, 1), 4);
    assert_eq!(round_shr(-5, 1), -2);
    assert_eq!(round_shr(-7, 1), -4);
    assert_eq!(round_shr(3, 1), 2);
    assert_eq!(round_shr(-3, 2), -1);
    // 7 / 4 = 1.75 -> 2, 9 / 4 = 2.25 -> 2
    assert_eq!(round_shr(7, 2), 2);
    assert_eq!(round_shr(-7, 2), -2);
    assert_eq!(round_shr(9, 2), 2);
    assert_eq!(round_shr(1 << 40, 10), 1 << 30);
    assert_eq!(round_shr(i64::MAX, 64), 0);
    assert_eq!(round_shr(i64::MIN, 63), -1);
}

#[test]
fn test_round_shr_matches_float_rounding() {
    for value in -64i64..=64 {
        for shift in 1..5 {
            let expected = round(libm::ldexp(value as f64, -(shift as i32))) as i64;
            assert_eq!(round_shr(value, shift), expected, "{} >> {}", value, shift);
        }
    }
}

#[test]
fn test_fits_signed() {
    assert!(fits_signed(32767, 16));
    assert!(fits_signed(-32768, 16));
    assert!(!fits_signed(32768, 16));
    assert!(!fits_signed(-32769, 16));
    assert!(fits_signed(i32::MAX as i64, 32));
    assert!(!fits_signed(1 << 31, 32));
}

#[test]
fn test_bit_length_and_ceil_log2() {
    assert_eq!(bit_length(0), 0);
    assert_eq!(bit_length(1), 1);
    assert_eq!(bit_length(255), 8);
    assert_eq!(bit_length(256), 9);

    assert_eq!(ceil_log2(1), 0);
    assert_eq!(ceil_log2(2), 1);
    assert_eq!(ceil_log2(3), 2);
    assert_eq!(ceil_log2(1 << 31), 31);
    assert_eq!(ceil_log2((1 << 31) + 1), 32);
}

#[test]
fn test_quantize_picks_largest_feasible_scale() {
    let values = [0.3, -0.7];
    let q = quantize(&values, 16).unwrap();

    // log2(32768 / 0.7) = 15.5 -> 15
    assert_eq!(q.scale_log2, 15);
    assert_eq!(q.mantissas, vec![9830, -22938]);

    // One more bit of scale would overflow
    assert!(!fits_signed(scale_round(-0.7, q.scale_log2 + 1), 16));
}

#[test]
fn test_quantize_positive_power_of_two_needs_decrement() {
    // 1.0 * 2^15 lands exactly on 32768, one past the positive range.
    let q = quantize(&[1.0, 0.25], 16).unwrap();
    assert_eq!(q.scale_log2, 14);
    assert_eq!(q.mantissas, vec![16384, 4096]);

    let q = quantize(&[0.5, -0.25, 0.125], 32).unwrap();
    assert_eq!(q.scale_log2, 31);
    assert_eq!(q.mantissas, vec![1 << 30, -(1 << 29), 1 << 28]);
}

#[test]
fn test_quantize_negative_power_of_two_fits() {
    // -2^15 is representable, so no decrement is needed.
    let q = quantize(&[-1.0, 0.5], 16).unwrap();
    assert_eq!(q.scale_log2, 15);
    assert_eq!(q.mantissas, vec![-32768, 16384]);
}

#[test]
fn test_quantize_range_invariant() {
    let values = [0.999_999, -0.999_999, 0.5, -1e-3, 0.123_456, 0.0];
    for bits in [8, 16, 24, 32] {
        let q = quantize(&values, bits).unwrap();
        for &m in &q.mantissas {
            assert!(fits_signed(m, bits), "{} does not fit {} bits", m, bits);
        }
    }
}

#[test]
fn test_quantize_rejects_bad_input() {
    assert_eq!(quantize(&[], 16), Err(GenError::Domain("empty coefficient array")));
    assert_eq!(
        quantize(&[0.0, 0.0], 16),
        Err(GenError::Domain("all-zero coefficients have no defined scale"))
    );
    assert!(matches!(quantize(&[1.0, f64::NAN], 16), Err(GenError::Domain(_))));
    assert!(matches!(quantize(&[1.0], 40), Err(GenError::Domain(_))));
    assert!(matches!(quantize(&[f64::MIN_POSITIVE / 1e10], 32), Err(GenError::Domain(_))));
}

#[test]
fn test_quantize_is_deterministic() {
    let values: std::vec::Vec<f64> = (0..64).map(|i| libm::sin(i as f64 * 0.37) / (1.0 + i as f64)).collect();
    let a = quantize(&values, 32).unwrap();
    let b = quantize(&values, 32).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_check_signs() {
    assert_eq!(check_signs(&[0.5, -0.5, 0.0], &[3, -3, 0]), Ok(()));
    assert_eq!(check_signs(&[0.5, -0.5], &[3, 2]), Err(GenError::SignMismatch { index: 1 }));
    // Collapsing a non-zero coefficient to zero is also a mismatch
    assert_eq!(check_signs(&[0.5, 1e-12], &[3, 0]), Err(GenError::SignMismatch { index: 1 }));
    assert_eq!(check_signs(&[0.0], &[1]), Err(GenError::SignMismatch { index: 0 }));
}
