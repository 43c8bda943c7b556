//! Benchmark wiring for the dot product kernels.

use super::code::available_variants;
use crate::registry::BenchmarkResult;
use crate::utils::bench::{elapsed, now, per_iteration};
use crate::utils::timer::{measure_variants, TimingConfig, Variant};
use std::hint::black_box;

/// Run every kernel variant over the same borrowed inputs.
///
/// Each timing sample covers `iterations / runs_per_variant` kernel calls;
/// timing happens inside the closure so only the calls themselves are
/// measured.
pub fn run_all_benchmarks(
    a: &[i16],
    b: &[i16],
    len: i16,
    iterations: usize,
    config: &TimingConfig,
) -> Vec<BenchmarkResult> {
    let variants = available_variants();
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant.max(1);
    let iter_per_sample = (iterations / samples).max(1);

    let timed: Vec<Variant> = variants
        .into_iter()
        .map(|v| {
            let func = v.function;
            Variant {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let start = now();
                    let mut result = 0i32;
                    for _ in 0..iter_per_sample {
                        result = black_box(func(black_box(a), black_box(b), black_box(len)));
                    }
                    let total = elapsed(start);
                    (per_iteration(total, iter_per_sample), Some(result as f64))
                }),
            }
        })
        .collect();

    measure_variants(timed, iterations, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dot_product::generate_ramp;
    use crate::utils::timer::PinStrategy;

    #[test]
    fn all_variants_report_the_same_result() {
        let a = generate_ramp(0, 1024);
        let b = generate_ramp(100, 1024);

        let config = TimingConfig {
            runs_per_variant: 3,
            warmup_iterations: 1,
            pin_strategy: PinStrategy::Global,
            seed: Some(1),
            ..Default::default()
        };
        let results = run_all_benchmarks(&a, &b, 1024, 30, &config);

        assert_eq!(results.len(), 8);
        let baseline = results[0].result_sample.unwrap();
        for r in &results {
            assert_eq!(
                r.result_sample,
                Some(baseline),
                "variant '{}' disagrees with the baseline",
                r.name
            );
        }
    }
}
