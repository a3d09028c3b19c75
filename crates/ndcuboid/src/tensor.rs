//! N-dimensional tensor type over a kind-tagged dense buffer.
//!
//! ```text
//! Tensor
//! ├── shape    Vec<usize>   rank = shape.len(), rank 0 = scalar
//! ├── strides  Vec<usize>   row-major, derived from shape
//! └── storage  Dense        one contiguous buffer, see storage::ElementKind
//! ```
//!
//! The product of `shape` always equals the buffer length.

use std::fmt;
use std::str::FromStr;

use crate::error::TensorError;
use crate::nested::Nested;
use crate::storage::{Dense, ElementKind, Values};
use crate::strides::{cartesian_to_linear, checked_len, compute_strides};

/// A shape-tagged, mutable n-dimensional tensor.
///
/// Arithmetic lives in [`crate::operations`]; most operations mutate the
/// receiver in place and return `&mut Self` for chaining.
#[derive(Debug, Clone)]
pub struct Tensor {
    storage: Dense,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// Build a rank-1 `f64` tensor from a list of values.
///
/// # Examples
///
/// ```
/// use ndcuboid::tensor;
///
/// let t = tensor![1, 2, 3];
/// assert_eq!(t.shape(), &[3]);
/// assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0]);
/// ```
#[macro_export]
macro_rules! tensor {
    ($($value:expr),* $(,)?) => {
        $crate::Tensor::from_values(&[$(($value) as f64),*])
    };
}

impl Tensor {
    pub(crate) fn from_parts(storage: Dense, shape: &[usize]) -> Self {
        Self {
            storage,
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Create a new `f64` tensor with the given shape, zero-initialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Tensor;
    ///
    /// let t = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the element count of `shape` overflows `usize`.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::zeros_with_kind(shape, ElementKind::F64)
    }

    /// Create a zero-initialized tensor backed by the given element kind.
    ///
    /// # Panics
    ///
    /// Panics if the element count of `shape` overflows `usize`.
    pub fn zeros_with_kind(shape: &[usize], kind: ElementKind) -> Self {
        let len = checked_len(shape).expect("shape element count overflows usize");
        Self::from_parts(Dense::zeros(kind, len), shape)
    }

    /// Create an `f64` tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        let mut t = Self::zeros(shape);
        t.fill(1.0);
        t
    }

    /// The rank-0 zero tensor.
    pub fn scalar_zero() -> Self {
        Self::zeros(&[])
    }

    /// The 3-element zero vector.
    pub fn vector_zero() -> Self {
        Self::zeros(&[3])
    }

    /// The 4-element zero vector.
    pub fn vector_zero4() -> Self {
        Self::zeros(&[4])
    }

    /// The 3x3 zero matrix.
    pub fn matrix_zero3() -> Self {
        Self::zeros(&[3, 3])
    }

    /// The 4x4 zero matrix.
    pub fn matrix_zero4() -> Self {
        Self::zeros(&[4, 4])
    }

    /// Create an `f64` tensor from flat row-major data and a shape.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match shape,
    /// or `TensorError::ShapeOverflow` if the shape's element count does not
    /// fit in `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[0, 2]), Some(3.0));
    /// assert_eq!(t.get(&[1, 0]), Some(4.0));
    ///
    /// assert!(Tensor::from_vec(vec![1.0, 2.0], &[3]).is_err());
    /// ```
    pub fn from_vec(data: Vec<f64>, shape: &[usize]) -> Result<Self, TensorError> {
        check_len(data.len(), shape)?;
        Ok(Self::from_parts(Dense::from_vec(data), shape))
    }

    /// Create a tensor from nested data, inferring the shape if none is given.
    ///
    /// The inferred shape follows the first element of every nesting level.
    /// All leaves are flattened depth-first into the buffer.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the number of leaves differs
    /// from the product of the (given or inferred) shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Tensor;
    ///
    /// let t = Tensor::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], None).unwrap();
    /// assert_eq!(t.shape(), &[2, 3]);
    ///
    /// let flat = Tensor::from_nested(vec![1.0, 2.0, 3.0, 4.0], Some(&[2, 2])).unwrap();
    /// assert_eq!(flat.shape(), &[2, 2]);
    ///
    /// let ragged = Tensor::from_nested(vec![vec![1.0, 2.0], vec![3.0]], None);
    /// assert!(ragged.is_err());
    /// ```
    pub fn from_nested(
        data: impl Into<Nested>,
        shape: Option<&[usize]>,
    ) -> Result<Self, TensorError> {
        Self::from_nested_with_kind(data, shape, ElementKind::F64)
    }

    /// Like [`Tensor::from_nested`], backed by the given element kind.
    pub fn from_nested_with_kind(
        data: impl Into<Nested>,
        shape: Option<&[usize]>,
        kind: ElementKind,
    ) -> Result<Self, TensorError> {
        let nested = data.into();
        let shape = match shape {
            Some(shape) => shape.to_vec(),
            None => nested.infer_shape(),
        };
        let values = nested.flatten();
        check_len(values.len(), &shape)?;
        Ok(Self::from_parts(Dense::from_values(kind, values), &shape))
    }

    /// Create a rank-1 `f64` tensor from the given values.
    ///
    /// See also the [`tensor!`](crate::tensor!) macro.
    pub fn from_values(values: &[f64]) -> Self {
        Self::from_parts(Dense::from_vec(values.to_vec()), &[values.len()])
    }

    /// Get the shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Alias of [`Tensor::shape`].
    #[inline]
    pub fn dimensions(&self) -> &[usize] {
        &self.shape
    }

    /// Get the rank (number of dimensions).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Get total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if tensor is empty (has zero elements).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get row-major strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The element kind of the backing buffer.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.storage.kind()
    }

    /// Get the backing buffer.
    #[inline]
    pub fn storage(&self) -> &Dense {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut Dense {
        &mut self.storage
    }

    /// Replace shape and buffer together. Callers uphold the length invariant.
    pub(crate) fn replace(&mut self, storage: Dense, shape: Vec<usize>) {
        debug_assert_eq!(Some(storage.len()), checked_len(&shape));
        self.strides = compute_strides(&shape);
        self.shape = shape;
        self.storage = storage;
    }

    /// Reinterpret the buffer under a new shape with the same element count.
    pub(crate) fn replace_shape(&mut self, shape: Vec<usize>) {
        debug_assert_eq!(Some(self.len()), checked_len(&shape));
        self.strides = compute_strides(&shape);
        self.shape = shape;
    }

    /// Iterate over the elements in buffer order.
    #[inline]
    pub fn values(&self) -> Values<'_> {
        self.storage.values()
    }

    /// Copy the elements into a flat `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.storage.to_vec()
    }

    /// Copy this tensor into a buffer of another element kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{ElementKind, tensor};
    ///
    /// let t = tensor![1.5, 256.0, -1.0].to_kind(ElementKind::U8);
    /// assert_eq!(t.to_vec(), vec![1.0, 0.0, 255.0]);
    /// ```
    pub fn to_kind(&self, kind: ElementKind) -> Self {
        Self::from_parts(self.storage.to_kind(kind), &self.shape)
    }

    /// Convert the flat buffer into a nested structure matching the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{Nested, Tensor};
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(
    ///     t.to_nested(),
    ///     Nested::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
    /// );
    /// ```
    pub fn to_nested(&self) -> Nested {
        Nested::from_flat(&self.to_vec(), &self.shape)
    }

    /// Get element by linear index.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<f64> {
        self.storage.get(i)
    }

    /// Set element by linear index.
    ///
    /// # Errors
    ///
    /// Returns error if `i` is past the end of the buffer.
    pub fn set_linear(&mut self, i: usize, value: f64) -> Result<(), TensorError> {
        if self.storage.set(i, value) {
            Ok(())
        } else {
            Err(TensorError::IndexOutOfBounds {
                index: i,
                dim_size: self.len(),
            })
        }
    }

    fn linear_index(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.ndim() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.ndim(),
                actual: indices.len(),
            });
        }
        for (&idx, &dim) in indices.iter().zip(self.shape.iter()) {
            if idx >= dim {
                return Err(TensorError::IndexOutOfBounds {
                    index: idx,
                    dim_size: dim,
                });
            }
        }
        Ok(cartesian_to_linear(indices, &self.strides))
    }

    /// Get element by cartesian indices.
    ///
    /// Returns `None` if indices are out of bounds or wrong number of indices.
    pub fn get(&self, indices: &[usize]) -> Option<f64> {
        let linear = self.linear_index(indices).ok()?;
        self.get_linear(linear)
    }

    /// Set element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns error if indices are out of bounds or wrong number of indices.
    pub fn set(&mut self, indices: &[usize], value: f64) -> Result<(), TensorError> {
        let linear = self.linear_index(indices)?;
        self.set_linear(linear, value)
    }

    /// Overwrite the leading elements of the buffer with `values`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::IndexOutOfBounds` if `values` is longer than
    /// the buffer; nothing is written in that case.
    pub fn set_values(&mut self, values: &[f64]) -> Result<&mut Self, TensorError> {
        if values.len() > self.len() {
            return Err(TensorError::IndexOutOfBounds {
                index: values.len() - 1,
                dim_size: self.len(),
            });
        }
        for (i, &v) in values.iter().enumerate() {
            self.storage.set(i, v);
        }
        Ok(self)
    }

    /// Fill all elements with a value.
    pub fn fill(&mut self, value: f64) {
        self.storage.map_in_place(|_, _| value);
    }

    /// Change the shape without touching the buffer.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the element count differs, or
    /// `TensorError::ShapeOverflow` if it does not fit in `usize`.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self, TensorError> {
        check_len(self.len(), new_shape)?;
        Ok(Self::from_parts(self.storage.clone(), new_shape))
    }

    /// The first element of the buffer.
    ///
    /// `x`, `y`, `z` and `w` alias buffer positions 0 to 3 regardless of
    /// the declared shape.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty. The same holds for `y`, `z` and `w`
    /// with fewer than 2, 3 and 4 elements.
    #[inline]
    pub fn x(&self) -> f64 {
        self.alias(0)
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.alias(1)
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.alias(2)
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.alias(3)
    }

    pub fn set_x(&mut self, value: f64) {
        self.set_alias(0, value);
    }

    pub fn set_y(&mut self, value: f64) {
        self.set_alias(1, value);
    }

    pub fn set_z(&mut self, value: f64) {
        self.set_alias(2, value);
    }

    pub fn set_w(&mut self, value: f64) {
        self.set_alias(3, value);
    }

    fn alias(&self, i: usize) -> f64 {
        match self.storage.get(i) {
            Some(v) => v,
            None => panic!(
                "component {i} read from a tensor with {} elements",
                self.len()
            ),
        }
    }

    fn set_alias(&mut self, i: usize, value: f64) {
        let len = self.len();
        if !self.storage.set(i, value) {
            panic!("component {i} written to a tensor with {len} elements");
        }
    }

    /// Whether this tensor is rank-1 with exactly `n` elements.
    #[inline]
    pub fn is_vector(&self, n: usize) -> bool {
        self.shape == [n]
    }

    /// The components of a rank-1, length-3 tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` for any other shape.
    pub fn as_vector3(&self) -> Result<[f64; 3], TensorError> {
        if !self.is_vector(3) {
            return Err(TensorError::TypeMismatch {
                expected: vec![3],
                actual: self.shape.clone(),
            });
        }
        Ok([self.x(), self.y(), self.z()])
    }

    /// The value of a rank-0 tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::RankMismatch` unless the tensor is a scalar.
    pub fn to_scalar(&self) -> Result<f64, TensorError> {
        if self.ndim() != 0 {
            return Err(TensorError::RankMismatch {
                expected: 0,
                actual: self.ndim(),
            });
        }
        Ok(self.x())
    }
}

fn check_len(len: usize, shape: &[usize]) -> Result<(), TensorError> {
    let expected = checked_len(shape).ok_or_else(|| TensorError::ShapeOverflow {
        shape: shape.to_vec(),
    })?;
    if len != expected {
        return Err(TensorError::ShapeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Equal shapes and equal element values; the element kind is ignored.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.values().eq(other.values())
    }
}

/// Comma-separated element values in buffer order, e.g. `1,2,3`.
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            // Negative zero prints as 0.
            let v = if v == 0.0 { 0.0 } else { v };
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Parse a rank-1 tensor from comma-separated numbers.
///
/// # Examples
///
/// ```
/// use ndcuboid::Tensor;
///
/// let t: Tensor = "1, 2.5,-3".parse().unwrap();
/// assert_eq!(t.to_vec(), vec![1.0, 2.5, -3.0]);
/// assert!("1,x,3".parse::<Tensor>().is_err());
/// ```
impl FromStr for Tensor {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<f64>()
                    .map_err(|source| TensorError::InvalidNumber {
                        token: token.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(Self::from_values(&values))
    }
}
