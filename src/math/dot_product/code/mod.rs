//! Dot product kernel implementations.
//!
//! This module contains the scalar reference and all vector kernel variants,
//! plus the variant registry the benchmark harness enumerates them through.

pub mod lanes;
mod scalar;
mod split_load;
mod tail;
mod unrolled;

pub use scalar::dot_product_scalar;
pub use split_load::{dot_product_wide2, dot_product_wide4};
pub use tail::tail_sum;
pub use unrolled::{
    dot_product_unroll1, dot_product_unroll2, dot_product_unroll3, dot_product_unroll4,
    dot_product_unroll6,
};

use crate::utils::VariantInfo;
use thiserror::Error;

/// Type alias for the kernel function signature.
///
/// `len` is the number of leading elements of `a` and `b` to consume; both
/// slices must provide at least that many elements. Non-positive lengths
/// yield 0. Accumulation wraps mod 2^32.
pub type DotProductFn = fn(&[i16], &[i16], i16) -> i32;

/// Number of elements a kernel call actually processes.
///
/// The loop guards of every kernel run zero times for a non-positive
/// length, so the clamp makes that contract explicit instead of relying on
/// a signed comparison per iteration.
#[inline(always)]
pub(crate) fn effective_len(len: i16) -> usize {
    if len > 0 {
        len as usize
    } else {
        0
    }
}

/// Invalid input reported by [`dot_product_checked`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DotInputError {
    #[error("length argument {0} is negative")]
    NegativeLength(i16),
    #[error("inputs provide {actual} elements, length argument requires {required}")]
    ShortInput { required: usize, actual: usize },
}

/// Validating front end for callers who want safety over raw throughput.
///
/// The raw kernels document their precondition (both slices hold at least
/// `len` elements) and panic when it is violated; this wrapper turns both
/// abnormal cases into a typed error instead.
pub fn dot_product_checked(
    kernel: DotProductFn,
    a: &[i16],
    b: &[i16],
    len: i16,
) -> Result<i32, DotInputError> {
    if len < 0 {
        return Err(DotInputError::NegativeLength(len));
    }
    let required = len as usize;
    let actual = a.len().min(b.len());
    if actual < required {
        return Err(DotInputError::ShortInput { required, actual });
    }
    Ok(kernel(a, b, len))
}

/// Get all kernel variants, scalar reference first.
///
/// The harness enumerates kernels exclusively through this list.
pub fn available_variants() -> Vec<VariantInfo<DotProductFn>> {
    vec![
        VariantInfo {
            name: "scalar",
            description: "Sequential multiply-accumulate reference",
            function: dot_product_scalar,
        },
        VariantInfo {
            name: "unroll1",
            description: "4 elements/iter, single accumulator lane",
            function: dot_product_unroll1,
        },
        VariantInfo {
            name: "unroll2",
            description: "8 elements/iter, 2 accumulator lanes",
            function: dot_product_unroll2,
        },
        VariantInfo {
            name: "unroll3",
            description: "12 elements/iter, 3 accumulator lanes",
            function: dot_product_unroll3,
        },
        VariantInfo {
            name: "unroll4",
            description: "16 elements/iter, 4 accumulator lanes",
            function: dot_product_unroll4,
        },
        VariantInfo {
            name: "unroll6",
            description: "24 elements/iter, 6 accumulator lanes",
            function: dot_product_unroll6,
        },
        VariantInfo {
            name: "wide2",
            description: "8 elements/iter, double-width loads split low/high",
            function: dot_product_wide2,
        },
        VariantInfo {
            name: "wide4",
            description: "16 elements/iter, double-width loads split low/high",
            function: dot_product_wide4,
        },
    ]
}
