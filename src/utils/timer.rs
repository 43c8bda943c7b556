//! Unified timing system for the micro-benchmarks.
//!
//! - Supports both CPU cycles and wall-clock time (via features)
//! - Pins the measuring thread for stable measurements
//! - Randomizes variant execution order to avoid ordering bias
//!
//! Measurement batches are bracketed with `log::debug!` markers so an
//! external profiler attached to the process can line its own sections up
//! with ours.

use std::hint::black_box;
use std::time::Duration;

use super::bench::{shuffle, time_seed, to_raw, Measurement};
use super::cpu_affinity::{CpuPinGuard, PinTarget};

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements (minimal overhead)
    Global,
    /// Pin/unpin around each sample (more accurate per-call)
    #[default]
    PerExecution,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup iterations before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Which core to pin to (default: the current one)
    pub pin_target: PinTarget,
    /// Seed for the sample interleaving order; time-based when `None`
    pub seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            pin_target: PinTarget::default(),
            seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// One sample: times itself internally (so no Fn-trait overhead lands
    /// inside the measured region) and returns the measurement plus an
    /// optional result value for verification display.
    pub run: Box<dyn FnMut() -> (Measurement, Option<f64>) + 'a>,
}

/// Result from measuring a single variant
#[derive(Clone, Debug)]
pub struct VariantResult {
    /// Name of the variant
    pub name: String,
    /// Description of the variant
    pub description: String,
    /// Average measurement (raw value carried in a Duration)
    pub avg_time: Duration,
    /// Precise average as f64
    pub avg_raw_f64: f64,
    /// Median measurement
    pub median_time: Duration,
    /// Minimum measurement
    pub min_time: Duration,
    /// Maximum measurement
    pub max_time: Duration,
    /// Standard deviation
    pub std_dev: Duration,
    /// Number of kernel iterations each sample covered
    pub iterations: usize,
    /// Sample result value, for cross-variant agreement display
    pub result_sample: Option<f64>,
}

/// Measure multiple variants with randomized execution order.
///
/// Warms every variant up, builds a shuffled (variant, sample) schedule so
/// no variant systematically runs on a colder cache or a lower clock, then
/// measures with the configured pinning.
pub fn measure_variants(
    mut variants: Vec<Variant>,
    iterations: usize,
    config: &TimingConfig,
) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    log::debug!(
        "warm-up: {} iterations x {} variants",
        config.warmup_iterations,
        variants.len()
    );
    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }
    log::debug!("warm-up done");

    // Randomized task schedule: (variant_idx, sample_idx)
    let mut tasks: Vec<(usize, usize)> = (0..variants.len())
        .flat_map(|v| (0..samples).map(move |s| (v, s)))
        .collect();
    shuffle(&mut tasks, config.seed.unwrap_or_else(time_seed));

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f64>> = vec![None; variants.len()];

    log::debug!("measuring {} samples", tasks.len());
    let _global_pin =
        (config.pin_strategy == PinStrategy::Global).then(|| CpuPinGuard::new(config.pin_target));

    for (variant_idx, _) in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin = (config.pin_strategy == PinStrategy::PerExecution)
            .then(|| CpuPinGuard::new(config.pin_target));
        let (elapsed_time, result) = (variant.run)();

        measurements[variant_idx].push(elapsed_time);
        result_samples[variant_idx] = result;
    }
    log::debug!("measurement done");

    variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| {
            let times = std::mem::take(&mut measurements[idx]);
            let result_sample = result_samples[idx].take();
            compute_variant_result(
                variant.name,
                variant.description,
                times,
                iterations,
                result_sample,
            )
        })
        .collect()
}

/// Compute statistics from raw measurements
fn compute_variant_result(
    name: &'static str,
    description: &'static str,
    measurements: Vec<Measurement>,
    iterations: usize,
    result_sample: Option<f64>,
) -> VariantResult {
    if measurements.is_empty() {
        return VariantResult {
            name: name.to_string(),
            description: description.to_string(),
            avg_time: Duration::ZERO,
            avg_raw_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            iterations,
            result_sample: None,
        };
    }

    let raw: Vec<u64> = measurements.iter().map(|m| to_raw(*m)).collect();

    let mut sorted = raw.clone();
    sorted.sort_unstable();

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let median = sorted[sorted.len() / 2];

    let sum: u64 = raw.iter().sum();
    let avg_raw_f64 = sum as f64 / raw.len() as f64;

    let variance: f64 = raw
        .iter()
        .map(|&n| {
            let diff = n as f64 - avg_raw_f64;
            diff * diff
        })
        .sum::<f64>()
        / (raw.len() - 1).max(1) as f64;
    let std_dev = variance.sqrt() as u64;

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_time: Duration::from_nanos(avg_raw_f64 as u64),
        avg_raw_f64,
        median_time: Duration::from_nanos(median),
        min_time: Duration::from_nanos(min),
        max_time: Duration::from_nanos(max),
        std_dev: Duration::from_nanos(std_dev),
        iterations,
        result_sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::bench::{elapsed, now};

    #[test]
    fn measure_variants_empty() {
        let results = measure_variants(vec![], 1000, &TimingConfig::default());
        assert!(results.is_empty());
    }

    #[test]
    fn measure_variants_single() {
        let variants = vec![Variant {
            name: "test",
            description: "Test variant",
            run: Box::new(|| {
                let start = now();
                let v = black_box(42);
                (elapsed(start), Some(v as f64))
            }),
        }];

        let config = TimingConfig {
            runs_per_variant: 5,
            warmup_iterations: 2,
            pin_strategy: PinStrategy::Global,
            ..Default::default()
        };

        let results = measure_variants(variants, 100, &config);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "test");
        assert_eq!(results[0].result_sample, Some(42.0));
    }

    #[test]
    fn measure_variants_multiple() {
        let variants = vec![
            Variant {
                name: "fast",
                description: "Fast variant",
                run: Box::new(|| {
                    let start = now();
                    black_box(1);
                    (elapsed(start), Some(1.0))
                }),
            },
            Variant {
                name: "slow",
                description: "Slow variant",
                run: Box::new(|| {
                    let start = now();
                    black_box(vec![0u8; 1000]);
                    (elapsed(start), Some(2.0))
                }),
            },
        ];

        let config = TimingConfig {
            runs_per_variant: 5,
            warmup_iterations: 2,
            seed: Some(99),
            ..Default::default()
        };

        let results = measure_variants(variants, 100, &config);
        assert_eq!(results.len(), 2);

        let fast = results.iter().find(|r| r.name == "fast").unwrap();
        let slow = results.iter().find(|r| r.name == "slow").unwrap();

        assert_eq!(fast.result_sample, Some(1.0));
        assert_eq!(slow.result_sample, Some(2.0));
        assert_eq!(fast.iterations, 100);
    }
}
