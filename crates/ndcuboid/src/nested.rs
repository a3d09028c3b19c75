//! Nested (array-of-arrays) representation of tensor data.
//!
//! [`Nested`] is the input of [`Tensor::from_nested`](crate::Tensor::from_nested)
//! and the output of [`Tensor::to_nested`](crate::Tensor::to_nested).

/// A scalar or an arbitrarily nested list of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Value(f64),
    List(Vec<Nested>),
}

impl Nested {
    /// Infer a shape by following the first element of each level.
    ///
    /// A bare value has shape `[]`; an empty list stops the descent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Nested;
    ///
    /// let n = Nested::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    /// assert_eq!(n.infer_shape(), vec![2, 3]);
    /// assert_eq!(Nested::from(7.0).infer_shape(), Vec::<usize>::new());
    /// ```
    pub fn infer_shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        let mut level = self;
        while let Nested::List(items) = level {
            shape.push(items.len());
            match items.first() {
                Some(first) => level = first,
                None => break,
            }
        }
        shape
    }

    /// All leaf values, depth-first, in order of appearance.
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            Nested::Value(v) => out.push(*v),
            Nested::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Group a flat row-major buffer into a structure matching `shape`.
    ///
    /// Every declared axis produces one level of nesting, including axes of
    /// length 1. Rank 0 yields a bare [`Nested::Value`].
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is smaller than the product of `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Nested;
    ///
    /// let n = Nested::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    /// assert_eq!(n, Nested::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]));
    ///
    /// let n = Nested::from_flat(&[1.0, 2.0], &[1, 2]);
    /// assert_eq!(n, Nested::from(vec![vec![1.0, 2.0]]));
    /// ```
    pub fn from_flat(data: &[f64], shape: &[usize]) -> Nested {
        match shape.split_first() {
            None => Nested::Value(data[0]),
            Some((&outer, inner)) => {
                let chunk: usize = inner.iter().product();
                Nested::List(
                    (0..outer)
                        .map(|i| Nested::from_flat(&data[i * chunk..(i + 1) * chunk], inner))
                        .collect(),
                )
            }
        }
    }

    /// The scalar, if this is a leaf.
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Nested::Value(v) => Some(*v),
            Nested::List(_) => None,
        }
    }

    /// The child items, if this is a list.
    pub fn as_list(&self) -> Option<&[Nested]> {
        match self {
            Nested::Value(_) => None,
            Nested::List(items) => Some(items),
        }
    }
}

impl From<f64> for Nested {
    fn from(v: f64) -> Self {
        Nested::Value(v)
    }
}

impl<T: Into<Nested>> From<Vec<T>> for Nested {
    fn from(items: Vec<T>) -> Self {
        Nested::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Nested>, const N: usize> From<[T; N]> for Nested {
    fn from(items: [T; N]) -> Self {
        Nested::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&[f64]> for Nested {
    fn from(items: &[f64]) -> Self {
        Nested::List(items.iter().copied().map(Nested::Value).collect())
    }
}
