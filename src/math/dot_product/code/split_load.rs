//! Double-width-load vector kernels.
//!
//! These variants load full 8-element registers and split them into low and
//! high halves with a dedicated high-half widening multiply-accumulate,
//! instead of issuing two 4-wide loads. Arithmetic lane count matches the
//! equivalent narrow variants in `unrolled`; only the load count is halved.

use super::effective_len;
use super::lanes::{Acc4, I16x8};
use super::tail::tail_sum;

/// 8 elements per iteration from one double-width load per input, with a
/// low/high accumulator pair. Same arithmetic as `dot_product_unroll2`, half
/// the loads.
pub fn dot_product_wide2(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 8;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum_low = Acc4::zero();
    let mut sum_high = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        let va = I16x8::load(a, at);
        let vb = I16x8::load(b, at);
        sum_low = sum_low.mla(va.low(), vb.low());
        sum_high = sum_high.mla_high(va, vb);
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum_low
        .combine(sum_high)
        .reduce()
        .wrapping_add(tail_sum(a, b, consumed, n))
}

/// 16 elements per iteration from two double-width loads per input, with
/// two low/high accumulator pairs. Same arithmetic as `dot_product_unroll4`,
/// half the loads.
pub fn dot_product_wide4(a: &[i16], b: &[i16], len: i16) -> i32 {
    const ELEMENTS_PER_ITERATION: usize = 16;
    let n = effective_len(len);
    let iterations = n / ELEMENTS_PER_ITERATION;

    let mut sum1_low = Acc4::zero();
    let mut sum1_high = Acc4::zero();
    let mut sum2_low = Acc4::zero();
    let mut sum2_high = Acc4::zero();
    for i in 0..iterations {
        let at = i * ELEMENTS_PER_ITERATION;
        let va1 = I16x8::load(a, at);
        let va2 = I16x8::load(a, at + 8);
        let vb1 = I16x8::load(b, at);
        let vb2 = I16x8::load(b, at + 8);

        sum1_low = sum1_low.mla(va1.low(), vb1.low());
        sum1_high = sum1_high.mla_high(va1, vb1);
        sum2_low = sum2_low.mla(va2.low(), vb2.low());
        sum2_high = sum2_high.mla_high(va2, vb2);
    }

    let consumed = iterations * ELEMENTS_PER_ITERATION;
    sum1_low
        .combine(sum1_high)
        .combine(sum2_low)
        .combine(sum2_high)
        .reduce()
        .wrapping_add(tail_sum(a, b, consumed, n))
}
