//! Error types for ndcuboid.

use std::num::ParseFloatError;

use thiserror::Error;

/// Errors that can occur in tensor and cuboid operations.
#[derive(Debug, Error)]
pub enum TensorError {
    /// Element count does not match the product of the shape.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The element count of a shape does not fit in `usize`.
    #[error("shape overflow: the element count of {shape:?} does not fit in usize")]
    ShapeOverflow { shape: Vec<usize> },

    /// The two tensor operands of a binary operation have different shapes.
    #[error("shape mismatch: operand shapes {lhs:?} and {rhs:?} differ")]
    OperandShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// A vector-only operation was invoked on a tensor of the wrong shape.
    #[error("type mismatch: operation requires a tensor of shape {expected:?}, got {actual:?}")]
    TypeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// Operation requires specific tensor rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A component of a delimited vector could not be read as a number.
    #[error("invalid number {token:?}")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseFloatError,
    },

    /// Cuboid text did not follow `minX,minY,minZ:maxX,maxY,maxZ`.
    #[error("malformed cuboid {input:?}: {reason}")]
    MalformedCuboid { input: String, reason: &'static str },
}

impl TensorError {
    /// Whether this error belongs to the shape-mismatch family.
    ///
    /// Covers element-count mismatches and overflowing shapes at
    /// construction, and operand shape mismatches in binary operations.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            TensorError::ShapeMismatch { .. }
                | TensorError::ShapeOverflow { .. }
                | TensorError::OperandShapeMismatch { .. }
        )
    }

    /// Whether this error reports a vector-only operation on the wrong shape.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TensorError::TypeMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_family() {
        let count = TensorError::ShapeMismatch {
            expected: 6,
            actual: 5,
        };
        let operands = TensorError::OperandShapeMismatch {
            lhs: vec![3],
            rhs: vec![2],
        };
        let overflow = TensorError::ShapeOverflow {
            shape: vec![usize::MAX, 2],
        };
        assert!(count.is_shape_mismatch());
        assert!(operands.is_shape_mismatch());
        assert!(overflow.is_shape_mismatch());
        assert!(!count.is_type_mismatch());
    }

    #[test]
    fn test_messages() {
        let err = TensorError::TypeMismatch {
            expected: vec![3],
            actual: vec![2, 2],
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: operation requires a tensor of shape [3], got [2, 2]"
        );

        let err = TensorError::MalformedCuboid {
            input: "1,2,3".to_string(),
            reason: "missing ':' separator",
        };
        assert_eq!(
            err.to_string(),
            "malformed cuboid \"1,2,3\": missing ':' separator"
        );
    }
}
