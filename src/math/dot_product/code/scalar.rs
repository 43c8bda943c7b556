//! Scalar reference implementation of the 16-bit dot product.
//!
//! This is the ground truth every vector kernel is verified against.

use super::effective_len;

/// Compute the dot product of the first `len` elements of `a` and `b`.
///
/// Each 16-bit pair is multiplied at full 32-bit precision and accumulated
/// left to right with wrapping arithmetic. A non-positive `len` yields 0.
///
/// Both slices must provide at least `len` elements; shorter inputs panic.
///
/// # Example
/// ```
/// use dot16_bench::math::dot_product::dot_product_scalar;
///
/// let a = [1i16, 2, 3];
/// let b = [4i16, 5, 6];
/// assert_eq!(dot_product_scalar(&a, &b, 3), 32);
/// ```
pub fn dot_product_scalar(a: &[i16], b: &[i16], len: i16) -> i32 {
    let n = effective_len(len);

    let mut result = 0i32;
    for i in 0..n {
        result = result.wrapping_add(a[i] as i32 * b[i] as i32);
    }
    result
}
