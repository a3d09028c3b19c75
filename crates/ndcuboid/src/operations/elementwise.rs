//! Element-wise tensor operations.
//!
//! Binary operations accept either a scalar, applied to every element, or
//! a tensor of identical shape, combined index by index. Shapes are checked
//! before the receiver is modified.

use crate::direction::Direction;
use crate::error::TensorError;
use crate::tensor::Tensor;

/// Right-hand side of [`Tensor::add`] and [`Tensor::sub`].
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Tensor(&'a Tensor),
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Scalar(v)
    }
}

impl<'a> From<&'a Tensor> for Operand<'a> {
    fn from(t: &'a Tensor) -> Self {
        Operand::Tensor(t)
    }
}

/// Right-hand side of [`Tensor::equals`].
#[derive(Debug, Clone, Copy)]
pub enum Comparand<'a> {
    /// Compared against every element.
    Scalar(f64),
    /// Compared index by index; a length difference is never equal.
    Values(&'a [f64]),
    /// Compared index by index; shapes must match.
    Tensor(&'a Tensor),
}

impl From<f64> for Comparand<'_> {
    fn from(v: f64) -> Self {
        Comparand::Scalar(v)
    }
}

impl<'a> From<&'a [f64]> for Comparand<'a> {
    fn from(values: &'a [f64]) -> Self {
        Comparand::Values(values)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Comparand<'a> {
    fn from(values: &'a [f64; N]) -> Self {
        Comparand::Values(values)
    }
}

impl<'a> From<&'a Vec<f64>> for Comparand<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        Comparand::Values(values)
    }
}

impl<'a> From<&'a Tensor> for Comparand<'a> {
    fn from(t: &'a Tensor) -> Self {
        Comparand::Tensor(t)
    }
}

impl Tensor {
    fn check_same_shape(&self, other: &Tensor) -> Result<(), TensorError> {
        if self.shape() != other.shape() {
            return Err(TensorError::OperandShapeMismatch {
                lhs: self.shape().to_vec(),
                rhs: other.shape().to_vec(),
            });
        }
        Ok(())
    }

    fn combine_in_place<F>(&mut self, rhs: Operand<'_>, f: F) -> Result<&mut Self, TensorError>
    where
        F: Fn(f64, f64) -> f64,
    {
        match rhs {
            Operand::Scalar(k) => {
                self.storage_mut().map_in_place(|v, _| f(v, k));
            }
            Operand::Tensor(other) => {
                self.check_same_shape(other)?;
                let rhs = other.storage();
                self.storage_mut()
                    .map_in_place(|v, i| f(v, rhs.get(i).unwrap_or(f64::NAN)));
            }
        }
        Ok(self)
    }

    /// Add a scalar or a same-shape tensor in place.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` if `rhs` is a tensor of
    /// a different shape; the receiver is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::tensor;
    ///
    /// let mut t = tensor![1, 2, 3];
    /// t.add(&tensor![4, 5, 6]).unwrap().add(1.0).unwrap();
    /// assert_eq!(t.to_vec(), vec![6.0, 8.0, 10.0]);
    ///
    /// assert!(t.add(&tensor![1, 2]).is_err());
    /// ```
    pub fn add<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self, TensorError> {
        self.combine_in_place(rhs.into(), |a, b| a + b)
    }

    /// Subtract a scalar or a same-shape tensor in place.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` if `rhs` is a tensor of
    /// a different shape; the receiver is left untouched.
    pub fn sub<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self, TensorError> {
        self.combine_in_place(rhs.into(), |a, b| a - b)
    }

    /// Multiply every element by `factor` in place.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.map_in_place(|v| v * factor)
    }

    /// Scale by `1 / n`.
    ///
    /// Division by zero is not checked; elements become infinite or NaN.
    pub fn divide(&mut self, n: f64) -> &mut Self {
        self.scale(1.0 / n)
    }

    /// Negate every element in place.
    pub fn negate(&mut self) -> &mut Self {
        self.map_in_place(|v| -v)
    }

    /// Apply a function to each element, returning a new tensor of the same
    /// shape and element kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::tensor;
    ///
    /// let t = tensor![1, 4, 9];
    /// assert_eq!(t.map(f64::sqrt).to_vec(), vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn map<F>(&self, f: F) -> Tensor
    where
        F: FnMut(f64) -> f64,
    {
        let mut out = self.clone();
        out.map_in_place(f);
        out
    }

    /// Apply a function to each element in place, in index order.
    pub fn map_in_place<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(f64) -> f64,
    {
        self.storage_mut().map_in_place(|v, _| f(v));
        self
    }

    /// Combine two same-shape tensors element-wise into a new tensor.
    ///
    /// The result keeps the shape and element kind of `self`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` if the shapes differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::tensor;
    ///
    /// let a = tensor![1, 5, 3];
    /// let b = tensor![4, 2, 6];
    /// assert_eq!(a.zip_map(&b, f64::max).unwrap().to_vec(), vec![4.0, 5.0, 6.0]);
    /// ```
    pub fn zip_map<F>(&self, other: &Tensor, f: F) -> Result<Tensor, TensorError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut out = self.clone();
        out.combine_in_place(Operand::Tensor(other), f)?;
        Ok(out)
    }

    /// Visit each element in index order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(f64),
    {
        for v in self.values() {
            f(v);
        }
    }

    /// Fold the elements left to right, starting from `init`.
    pub fn reduce<R, F>(&self, init: R, f: F) -> R
    where
        F: FnMut(R, f64) -> R,
    {
        self.values().fold(init, f)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.reduce(0.0, |acc, v| acc + v)
    }

    /// Whether `predicate` holds for every element.
    pub fn every<F>(&self, predicate: F) -> bool
    where
        F: FnMut(f64) -> bool,
    {
        self.values().all(predicate)
    }

    /// Whether `predicate` holds for at least one element.
    pub fn some<F>(&self, predicate: F) -> bool
    where
        F: FnMut(f64) -> bool,
    {
        self.values().any(predicate)
    }

    /// Compare against a tensor, a plain list of values, or a scalar.
    ///
    /// A scalar is compared against every element.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` when comparing against a
    /// tensor of a different shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{Tensor, tensor};
    ///
    /// let t = tensor![2, 2, 2];
    /// assert!(t.equals(2.0).unwrap());
    /// assert!(t.equals(&[2.0, 2.0, 2.0]).unwrap());
    /// assert!(t.equals(&tensor![2, 2, 2]).unwrap());
    /// assert!(t.equals(&Tensor::zeros(&[3, 1])).is_err());
    /// ```
    pub fn equals<'a>(&self, other: impl Into<Comparand<'a>>) -> Result<bool, TensorError> {
        Ok(match other.into() {
            Comparand::Scalar(k) => self.every(|v| v == k),
            Comparand::Values(values) => {
                values.len() == self.len() && self.values().zip(values).all(|(a, &b)| a == b)
            }
            Comparand::Tensor(other) => {
                self.check_same_shape(other)?;
                self.values().eq(other.values())
            }
        })
    }

    /// Linear interpolation `a + (b - a) * fraction`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OperandShapeMismatch` if `a` and `b` differ in shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{Tensor, tensor};
    ///
    /// let mid = Tensor::lerp(&tensor![0, 0, 0], &tensor![2, 4, 6], 0.5).unwrap();
    /// assert_eq!(mid.to_vec(), vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn lerp(a: &Tensor, b: &Tensor, fraction: f64) -> Result<Tensor, TensorError> {
        let mut out = b.clone();
        out.sub(a)?.scale(fraction).add(a)?;
        Ok(out)
    }

    /// Add `values[i] * n` to each element in place.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless this tensor is rank-1 with
    /// exactly `values.len()` elements.
    pub fn offset(&mut self, n: f64, values: &[f64]) -> Result<&mut Self, TensorError> {
        if !self.is_vector(values.len()) {
            return Err(TensorError::TypeMismatch {
                expected: vec![values.len()],
                actual: self.shape().to_vec(),
            });
        }
        self.storage_mut().map_in_place(|v, i| v + values[i] * n);
        Ok(self)
    }

    /// Move this vector `n` units in `direction`, in place.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless this tensor is rank-1 with
    /// exactly 3 elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{Direction, tensor};
    ///
    /// let mut t = tensor![1, 2, 3];
    /// t.offset_dir(1.0, Direction::North).unwrap();
    /// assert_eq!(t.to_vec(), vec![1.0, 2.0, 4.0]);
    /// ```
    pub fn offset_dir(&mut self, n: f64, direction: Direction) -> Result<&mut Self, TensorError> {
        self.as_vector3()?;
        let mut step = Tensor::from_direction(direction);
        step.scale(n);
        self.add(&step)
    }
}
