//! Magnitudes, distances and products of tensors.

use crate::error::TensorError;
use crate::tensor::Tensor;

impl Tensor {
    /// Euclidean norm of all elements.
    ///
    /// Folds `hypot` over the buffer starting from zero, which equals
    /// `sqrt(sum of squares)` without intermediate overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcuboid::tensor;
    ///
    /// assert!((tensor![3, 4].mag() - 5.0).abs() < 1e-10);
    /// ```
    pub fn mag(&self) -> f64 {
        self.reduce(0.0, f64::hypot)
    }

    /// Sum of squared elements.
    pub fn mag_sqr(&self) -> f64 {
        self.reduce(0.0, |acc, v| acc + v * v)
    }

    /// Scale to unit magnitude in place.
    ///
    /// A zero tensor becomes NaN.
    pub fn normalize(&mut self) -> &mut Self {
        let mag = self.mag();
        self.scale(1.0 / mag)
    }

    /// Scale to magnitude `n` in place.
    pub fn set_mag(&mut self, n: f64) -> &mut Self {
        self.normalize().scale(n)
    }

    /// Euclidean distance `(other - self).mag()`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` if the shapes differ.
    pub fn distance(&self, other: &Tensor) -> Result<f64, TensorError> {
        let mut diff = other.clone();
        diff.sub(self)?;
        Ok(diff.mag())
    }

    /// Inner product: the sum of element-wise products.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` if the shapes differ.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcuboid::tensor;
    ///
    /// assert_eq!(tensor![1, 2, 3].dot(&tensor![4, 5, 6]).unwrap(), 32.0);
    /// ```
    pub fn dot(&self, other: &Tensor) -> Result<f64, TensorError> {
        Ok(self.zip_map(other, |a, b| a * b)?.sum())
    }

    /// Product of the two magnitudes, `|self| * |other|`.
    ///
    /// This is not an inner product; it equals `dot` only for parallel
    /// vectors pointing the same way.
    pub fn magnitude_product(&self, other: &Tensor) -> f64 {
        self.mag() * other.mag()
    }
}
