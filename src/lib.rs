//! # dot16-bench
//!
//! Competing scalar and SIMD kernels for 16-bit integer dot products, with a
//! benchmark harness that runs every kernel over identical inputs and
//! reports per-variant timing and agreement with the scalar reference.

pub mod math;
pub mod registry;
pub mod utils;

/// Re-export tui from utils for convenience
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::math::dot_product;
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;

    #[test]
    fn test_all_algorithms_registry_verify() {
        let registry = build_registry();
        let algorithms = registry.all();

        println!("Verifying {} algorithms...", algorithms.len());

        for algo in algorithms {
            println!("Verifying algorithm: {}", algo.name());
            match algo.verify() {
                Ok(_) => println!("  ✅ Algorithm '{}' passed verification", algo.name()),
                Err(e) => panic!(
                    "  ❌ Algorithm '{}' failed verification: {}",
                    algo.name(),
                    e
                ),
            }
        }
    }
}
