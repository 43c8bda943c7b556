//! Correctness tests for the dot product kernels.

#[cfg(test)]
mod tests {
    use crate::math::dot_product::code::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Every vector variant with its elements-per-iteration chunk size.
    fn vector_variants() -> Vec<(&'static str, DotProductFn, usize)> {
        vec![
            ("unroll1", dot_product_unroll1 as DotProductFn, 4),
            ("unroll2", dot_product_unroll2 as DotProductFn, 8),
            ("unroll3", dot_product_unroll3 as DotProductFn, 12),
            ("unroll4", dot_product_unroll4 as DotProductFn, 16),
            ("unroll6", dot_product_unroll6 as DotProductFn, 24),
            ("wide2", dot_product_wide2 as DotProductFn, 8),
            ("wide4", dot_product_wide4 as DotProductFn, 16),
        ]
    }

    /// Reproducible inputs with magnitudes far from the overflow boundary.
    fn small_inputs(len: usize, seed: u64) -> (Vec<i16>, Vec<i16>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = (0..len).map(|_| rng.random_range(-100..=100)).collect();
        let b = (0..len).map(|_| rng.random_range(-100..=100)).collect();
        (a, b)
    }

    #[test]
    fn scalar_basic() {
        let a = [1i16, 2, 3, 4];
        let b = [5i16, 6, 7, 8];
        // 1*5 + 2*6 + 3*7 + 4*8 = 70
        assert_eq!(dot_product_scalar(&a, &b, 4), 70);
    }

    #[test]
    fn scalar_matches_wide_accumulation_when_no_overflow() {
        let (a, b) = small_inputs(1027, 11);
        let expected: i64 = a
            .iter()
            .zip(&b)
            .map(|(&x, &y)| x as i64 * y as i64)
            .sum();
        assert_eq!(dot_product_scalar(&a, &b, 1027) as i64, expected);
    }

    #[test]
    fn all_variants_agree_with_scalar_across_lengths() {
        for len in [0i16, 1, 2, 3, 4, 5, 7, 8, 11, 16, 23, 24, 100, 1024, 1027] {
            let (a, b) = small_inputs(len as usize, 0xD07 + len as u64);
            let expected = dot_product_scalar(&a, &b, len);

            for (name, func, _) in vector_variants() {
                assert_eq!(
                    func(&a, &b, len),
                    expected,
                    "variant '{}' diverged from scalar at len {}",
                    name,
                    len
                );
            }
        }
    }

    #[test]
    fn tail_boundaries_per_variant() {
        // k-1 exercises the pure-tail path (zero vector iterations), k the
        // exact-division path (empty tail), k+1 a one-element tail.
        for (name, func, k) in vector_variants() {
            for len in [k - 1, k, k + 1] {
                let (a, b) = small_inputs(len, 0x7A11 + len as u64);
                let len = len as i16;
                assert_eq!(
                    func(&a, &b, len),
                    dot_product_scalar(&a, &b, len),
                    "variant '{}' wrong at boundary len {}",
                    name,
                    len
                );
            }
        }
    }

    #[test]
    fn zero_length_returns_zero() {
        let a = [7i16; 32];
        let b = [9i16; 32];
        assert_eq!(dot_product_scalar(&a, &b, 0), 0);
        for (name, func, _) in vector_variants() {
            assert_eq!(func(&a, &b, 0), 0, "variant '{}' nonzero for len 0", name);
        }
    }

    #[test]
    fn negative_length_returns_zero() {
        let a = [7i16; 8];
        let b = [9i16; 8];
        assert_eq!(dot_product_scalar(&a, &b, -1), 0);
        for (name, func, _) in vector_variants() {
            assert_eq!(
                func(&a, &b, -7),
                0,
                "variant '{}' nonzero for a negative length",
                name
            );
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let (a, b) = small_inputs(1027, 42);
        for (name, func, _) in vector_variants() {
            let first = func(&a, &b, 1027);
            for _ in 0..10 {
                assert_eq!(func(&a, &b, 1027), first, "variant '{}' not pure", name);
            }
        }
    }

    #[test]
    fn ramp_scenario_matches_closed_form() {
        // a[i] = i, b[i] = 100 + i over [0, 1024):
        // dot = 100*Σi + Σi² with Σi = n(n-1)/2 and Σi² = n(n-1)(2n-1)/6.
        let n = 1024i64;
        let sum_i = n * (n - 1) / 2;
        let sum_i_sq = n * (n - 1) * (2 * n - 1) / 6;
        let expected = (100 * sum_i + sum_i_sq) as i32;
        assert_eq!(expected, 409_767_424);

        let a: Vec<i16> = (0..1024).map(|i| i as i16).collect();
        let b: Vec<i16> = (0..1024).map(|i| (100 + i) as i16).collect();

        assert_eq!(dot_product_scalar(&a, &b, 1024), expected);
        for (name, func, _) in vector_variants() {
            assert_eq!(
                func(&a, &b, 1024),
                expected,
                "variant '{}' wrong on the ramp scenario",
                name
            );
        }
    }

    #[test]
    fn overflow_wraps_mod_2_pow_32() {
        // 16384 * 16384 = 2^28 per element; 16 elements sum to exactly 2^32,
        // 24 elements to 1.5 * 2^32. Both exceed i32, so the results must be
        // the true sum truncated mod 2^32, reinterpreted as signed.
        for len in [16i16, 24] {
            let a = vec![16384i16; len as usize];
            let b = vec![16384i16; len as usize];

            let true_sum: i64 = (len as i64) * (1i64 << 28);
            assert!(true_sum > i32::MAX as i64);
            let wrapped = true_sum as i32;

            // The contract pins down the scalar reference and the
            // single-accumulator kernel; wider variants reorder the
            // accumulation and are only required to complete.
            assert_eq!(dot_product_scalar(&a, &b, len), wrapped);
            assert_eq!(dot_product_unroll1(&a, &b, len), wrapped);
            assert_eq!(dot_product_scalar(&a, &b, len), dot_product_unroll1(&a, &b, len));

            for (_, func, _) in vector_variants() {
                let _may_differ = func(&a, &b, len);
            }
        }
    }

    #[test]
    fn tail_sum_covers_exact_range() {
        let (a, b) = small_inputs(32, 3);

        // start..len of the tail plus 0..start of a scalar pass must
        // reassemble the full scalar result, with no element double-counted.
        for start in [0usize, 5, 31, 32] {
            let head: i32 = a[..start]
                .iter()
                .zip(&b[..start])
                .map(|(&x, &y)| x as i32 * y as i32)
                .sum();
            assert_eq!(
                head.wrapping_add(tail_sum(&a, &b, start, 32)),
                dot_product_scalar(&a, &b, 32),
                "tail starting at {} dropped or duplicated elements",
                start
            );
        }

        // An empty range contributes nothing.
        assert_eq!(tail_sum(&a, &b, 32, 32), 0);
    }

    #[test]
    fn checked_wrapper_rejects_bad_inputs() {
        let a = [1i16, 2, 3, 4];
        let b = [5i16, 6, 7, 8];

        assert_eq!(dot_product_checked(dot_product_scalar, &a, &b, 4), Ok(70));
        assert_eq!(
            dot_product_checked(dot_product_unroll4, &a, &b, -2),
            Err(DotInputError::NegativeLength(-2))
        );
        assert_eq!(
            dot_product_checked(dot_product_scalar, &a, &b, 5),
            Err(DotInputError::ShortInput {
                required: 5,
                actual: 4
            })
        );
        // The shorter slice bounds the usable length.
        assert_eq!(
            dot_product_checked(dot_product_scalar, &a, &b[..2], 3),
            Err(DotInputError::ShortInput {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn variant_registry_is_complete() {
        let names: Vec<_> = available_variants().iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            vec![
                "scalar", "unroll1", "unroll2", "unroll3", "unroll4", "unroll6", "wide2", "wide4"
            ]
        );
    }
}
