//! # Dot Product Algorithm (16-bit integer)
//!
//! Computes `dot(a, b) = Σ(a[i] * b[i])` over two equal-length sequences of
//! 16-bit signed integers, accumulating in 32 bits:
//!
//! - every multiply widens to 32 bits before accumulating, so no product is
//!   ever truncated;
//! - accumulation wraps mod 2^32, the documented fixed-width contract.
//!
//! ## Optimization Strategies
//!
//! - **Loop unrolling**: multiple independent accumulator lanes per
//!   iteration break the dependency chain on the multiply-accumulate
//! - **SIMD**: 4-wide widening multiply-accumulate (NEON SMLAL on aarch64,
//!   SSE2 mullo/mulhi on x86_64)
//! - **Double-width loads**: 8-element loads split low/high halve the load
//!   count without changing the arithmetic

pub mod bench;
pub mod code;
pub mod test;

pub use code::*;

use crate::registry::{AlgorithmRunner, BenchmarkResult};
use crate::utils::timer::TimingConfig;
use rand::Rng;

/// Ramp input `(start, start+1, ...)`, wrapping at the i16 boundary.
///
/// The classic benchmark inputs are `a = ramp(0)` and `b = ramp(100)`, whose
/// dot product has a closed form the report can be checked against.
pub fn generate_ramp(start: i16, len: usize) -> Vec<i16> {
    (0..len).map(|i| start.wrapping_add(i as i16)).collect()
}

/// Runner for the dot product algorithm
pub struct DotProductRunner;

impl AlgorithmRunner for DotProductRunner {
    fn name(&self) -> &'static str {
        "dot_product"
    }

    fn description(&self) -> &'static str {
        "16-bit integer dot product with competing scalar and SIMD kernels"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn run_benchmarks(
        &self,
        size: usize,
        iterations: usize,
        config: &TimingConfig,
    ) -> Vec<BenchmarkResult> {
        // The kernel signature carries the length in an i16.
        if size > i16::MAX as usize {
            log::warn!(
                "skipping size {}: exceeds the i16 length limit of {}",
                size,
                i16::MAX
            );
            return Vec::new();
        }
        let len = size as i16;

        let a = generate_ramp(0, size);
        let b = generate_ramp(100, size);

        bench::run_all_benchmarks(&a, &b, len, iterations, config)
    }

    fn verify(&self) -> Result<(), String> {
        let variants = code::available_variants();
        let reference = variants
            .iter()
            .find(|v| v.name == "scalar")
            .ok_or("No 'scalar' variant found for reference")?;

        let mut rng = rand::rng();

        // Mix of lengths below, at, and off every kernel's chunk boundary.
        for len in [0i16, 1, 2, 3, 4, 5, 7, 8, 11, 16, 23, 24, 100, 1024, 1027] {
            let n = len as usize;
            // Magnitudes small enough that no partial sum can reach the
            // 32-bit boundary, so every variant must agree exactly.
            let a: Vec<i16> = (0..n).map(|_| rng.random_range(-100..=100)).collect();
            let b: Vec<i16> = (0..n).map(|_| rng.random_range(-100..=100)).collect();

            let expected = (reference.function)(&a, &b, len);

            for variant in &variants {
                if variant.name == "scalar" {
                    continue;
                }
                let result = (variant.function)(&a, &b, len);
                if result != expected {
                    return Err(format!(
                        "Variant '{}' failed verification at len {}. Expected {}, got {}",
                        variant.name, len, expected, result
                    ));
                }
            }
        }

        // Negative lengths short-circuit to zero in every kernel.
        let a = [1i16, 2, 3];
        let b = [4i16, 5, 6];
        for variant in &variants {
            let result = (variant.function)(&a, &b, -3);
            if result != 0 {
                return Err(format!(
                    "Variant '{}' returned {} for a negative length, expected 0",
                    variant.name, result
                ));
            }
        }

        Ok(())
    }
}
