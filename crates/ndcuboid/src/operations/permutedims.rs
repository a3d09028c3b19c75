//! Axis permutation for tensors.
//!
//! ```text
//! transpose()          reverse the axes, buffer permuted in place
//!     → permutedims(reversed axes)
//!         → validate permutation
//!         → allocate output with permuted shape
//!         → permute_into(output, tensor, perm)
//!
//! reverse_shape()      reverse the declared shape only, buffer untouched
//! ```

use crate::error::TensorError;
use crate::storage::Dense;
use crate::strides::{cartesian_to_linear, compute_strides, linear_to_cartesian};
use crate::tensor::Tensor;

impl Tensor {
    /// Permute the dimensions of the tensor, returning a new tensor.
    ///
    /// `perm[i]` gives the source dimension for the i-th dimension of the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns error if `perm` is not a valid permutation of `0..ndim`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let t2 = t.permutedims(&[1, 0]).unwrap();
    /// assert_eq!(t2.shape(), &[3, 2]);
    /// assert_eq!(t.get(&[0, 2]), t2.get(&[2, 0]));
    /// ```
    pub fn permutedims(&self, perm: &[usize]) -> Result<Tensor, TensorError> {
        validate_permutation(perm, self.ndim())?;

        let new_shape: Vec<usize> = perm.iter().map(|&p| self.shape()[p]).collect();
        let storage = permute_into(self, &new_shape, perm);

        Ok(Tensor::from_parts(storage, &new_shape))
    }

    /// Transpose in place by reversing the order of the axes.
    ///
    /// Element `[i, j, k]` moves to `[k, j, i]`; the buffer is rearranged
    /// so the result is a true transpose for every rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{Nested, Tensor};
    ///
    /// let mut t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// t.transpose();
    /// assert_eq!(
    ///     t.to_nested(),
    ///     Nested::from(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]])
    /// );
    /// ```
    pub fn transpose(&mut self) -> &mut Self {
        if self.ndim() < 2 {
            return self;
        }
        let perm: Vec<usize> = (0..self.ndim()).rev().collect();
        let new_shape: Vec<usize> = self.shape().iter().rev().copied().collect();
        let storage = permute_into(self, &new_shape, &perm);
        self.replace(storage, new_shape);
        self
    }

    /// Reverse the declared shape without moving any element.
    ///
    /// This is a reinterpretation of the same row-major buffer, not a data
    /// transpose: for a `[2, 3]` tensor holding `1..=6` the result reads
    /// `[[1, 2], [3, 4], [5, 6]]`. Use [`Tensor::transpose`] for the
    /// mathematical transpose.
    pub fn reverse_shape(&mut self) -> &mut Self {
        let shape: Vec<usize> = self.shape().iter().rev().copied().collect();
        self.replace_shape(shape);
        self
    }
}

/// Gather `src` into a new buffer laid out for `new_shape`.
fn permute_into(src: &Tensor, new_shape: &[usize], perm: &[usize]) -> Dense {
    let old_shape = src.shape();
    let new_strides = compute_strides(new_shape);
    let mut dest = Dense::zeros(src.kind(), src.len());

    for (linear_old, value) in src.values().enumerate() {
        let old_indices = linear_to_cartesian(linear_old, old_shape);

        // new_indices[i] = old_indices[perm[i]]
        let new_indices: Vec<usize> = perm.iter().map(|&p| old_indices[p]).collect();

        let linear_new = cartesian_to_linear(&new_indices, &new_strides);
        dest.set(linear_new, value);
    }

    dest
}

/// Validate that perm is a valid permutation of 0..ndim.
fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };

    if perm.len() != ndim {
        return Err(invalid());
    }

    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }

    Ok(())
}
