//! CPU cycle counter for precise micro-benchmarking.
//!
//! Architecture-specific counter reads for x86_64 and aarch64. Used as the
//! default measurement source; the `use_time` feature switches the whole
//! crate to wall-clock time instead.

/// Read the current CPU cycle counter / timer.
///
/// On x86_64: RDTSC fenced with LFENCE so speculation cannot reorder the
/// read around the measured region.
/// On aarch64: CNTVCT_EL0, the fixed-frequency virtual timer readable from
/// userspace.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_cycles_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_cycles_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        compile_error!(
            "the cpu_cycles feature requires x86_64 or aarch64; build with --features use_time"
        );
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles_x86_64() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles_aarch64() -> u64 {
    // Not true core cycles, but consistent across cores and monotonic.
    let val: u64;
    unsafe {
        core::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
    }
    val
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn read_cycles_is_roughly_monotonic() {
        let c1 = read_cycles();
        for i in 0..1000u64 {
            black_box(i);
        }
        let c2 = read_cycles();
        // Counters on different cores can be slightly skewed; allow a small
        // backwards step but not a wild one.
        assert!(
            c2 >= c1 || c1 - c2 < 1000,
            "counter went backwards: {} -> {}",
            c1,
            c2
        );
    }
}
