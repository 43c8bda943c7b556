//! Narrow-load vector kernels with 1 to 6 independent accumulator lanes.
//!
//! All five variants share the same shape: consume `4 * lanes` elements per
//! iteration through 4-wide loads, keep one widening multiply-accumulate
//! chain per lane so the chains have no data dependency on each other,
//! combine the lanes pairwise after the loop, reduce horizontally, and
//! finish the leftover elements with the shared scalar tail.
//!
//! Increasing the unroll degree trades code size for instruction-level
//! parallelism: the multiply-accumulate latency of one lane is hidden behind
//! the loads and multiplies of the others.

use super::effective_len;
use super::lanes::{Acc4, I16x4};
use super::tail::tail_sum;

/// 4 elements per iteration, single accumulator lane.
pub fn dot_product_unroll1(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 4;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        sum = sum.mla(I16x4::load(a, at), I16x4::load(b, at));
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum.reduce().wrapping_add(tail_sum(a, b, consumed, n))
}

/// 8 elements per iteration, 2 independent accumulator lanes.
pub fn dot_product_unroll2(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 8;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum1 = Acc4::zero();
    let mut sum2 = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        sum1 = sum1.mla(I16x4::load(a, at), I16x4::load(b, at));
        sum2 = sum2.mla(I16x4::load(a, at + 4), I16x4::load(b, at + 4));
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum1.combine(sum2)
        .reduce()
        .wrapping_add(tail_sum(a, b, consumed, n))
}

/// 12 elements per iteration, 3 independent accumulator lanes.
pub fn dot_product_unroll3(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 12;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum1 = Acc4::zero();
    let mut sum2 = Acc4::zero();
    let mut sum3 = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        sum1 = sum1.mla(I16x4::load(a, at), I16x4::load(b, at));
        sum2 = sum2.mla(I16x4::load(a, at + 4), I16x4::load(b, at + 4));
        sum3 = sum3.mla(I16x4::load(a, at + 8), I16x4::load(b, at + 8));
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum1.combine(sum2)
        .combine(sum3)
        .reduce()
        .wrapping_add(tail_sum(a, b, consumed, n))
}

/// 16 elements per iteration, 4 independent accumulator lanes.
pub fn dot_product_unroll4(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 16;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum1 = Acc4::zero();
    let mut sum2 = Acc4::zero();
    let mut sum3 = Acc4::zero();
    let mut sum4 = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        sum1 = sum1.mla(I16x4::load(a, at), I16x4::load(b, at));
        sum2 = sum2.mla(I16x4::load(a, at + 4), I16x4::load(b, at + 4));
        sum3 = sum3.mla(I16x4::load(a, at + 8), I16x4::load(b, at + 8));
        sum4 = sum4.mla(I16x4::load(a, at + 12), I16x4::load(b, at + 12));
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum1.combine(sum2)
        .combine(sum3)
        .combine(sum4)
        .reduce()
        .wrapping_add(tail_sum(a, b, consumed, n))
}

/// 24 elements per iteration, 6 independent accumulator lanes.
pub fn dot_product_unroll6(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 24;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum1 = Acc4::zero();
    let mut sum2 = Acc4::zero();
    let mut sum3 = Acc4::zero();
    let mut sum4 = Acc4::zero();
    let mut sum5 = Acc4::zero();
    let mut sum6 = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        sum1 = sum1.mla(I16x4::load(a, at), I16x4::load(b, at));
        sum2 = sum2.mla(I16x4::load(a, at + 4), I16x4::load(b, at + 4));
        sum3 = sum3.mla(I16x4::load(a, at + 8), I16x4::load(b, at + 8));
        sum4 = sum4.mla(I16x4::load(a, at + 12), I16x4::load(b, at + 12));
        sum5 = sum5.mla(I16x4::load(a, at + 16), I16x4::load(b, at + 16));
        sum6 = sum6.mla(I16x4::load(a, at + 20), I16x4::load(b, at + 20));
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum1.combine(sum2)
        .combine(sum3)
        .combine(sum4)
        .combine(sum5)
        .combine(sum6)
        .reduce()
        .wrapping_add(tail_sum(a, b, consumed, n))
}
