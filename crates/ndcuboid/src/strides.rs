//! Stride computation utilities.
//!
//! Uses row-major (C) order: the last axis varies fastest.

/// Compute row-major strides from shape.
///
/// For shape [d0, d1, d2, ...], returns strides [d1*d2*..., d2*..., ..., 1].
///
/// # Examples
///
/// ```
/// use ndcuboid::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert_eq!(compute_strides(&[]), vec![]);
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;

    for (slot, &dim) in strides.iter_mut().zip(shape.iter()).rev() {
        *slot = stride;
        stride *= dim;
    }

    strides
}

/// Number of elements of a tensor with this shape.
///
/// Returns `None` when the product of the non-zero dimensions overflows
/// `usize`. A shape that passes also has representable strides, even when
/// a zero dimension makes the element count 0.
///
/// # Examples
///
/// ```
/// use ndcuboid::strides::checked_len;
///
/// assert_eq!(checked_len(&[2, 3, 4]), Some(24));
/// assert_eq!(checked_len(&[]), Some(1));
/// assert_eq!(checked_len(&[1 << 32, 1 << 32]), None);
/// ```
pub fn checked_len(shape: &[usize]) -> Option<usize> {
    let nonzero = shape
        .iter()
        .filter(|&&dim| dim != 0)
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))?;
    Some(if shape.contains(&0) { 0 } else { nonzero })
}

/// Convert cartesian indices to a linear index.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear index to cartesian indices using row-major order.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> Vec<usize> {
    let mut indices = vec![0; shape.len()];

    for (slot, &dim) in indices.iter_mut().zip(shape.iter()).rev() {
        *slot = linear % dim;
        linear /= dim;
    }

    indices
}
