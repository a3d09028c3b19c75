//! ndcuboid - shape-tagged tensors and axis-aligned cuboids
//!
//! This crate provides a small n-dimensional tensor over a kind-tagged
//! dense buffer, and an axis-aligned box built on 3-element tensors.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Geometry (cuboid, direction)
//!     → Cuboid queries, resize, translation, lattice enumeration
//!
//! Level 2: Tensor API (tensor, operations, random)
//!     → construction, element access, arithmetic, norms, permutedims
//!
//! Level 3: Storage (storage, strides, nested)
//!     → Dense buffer per ElementKind, row-major index math
//! ```
//!
//! # Example
//!
//! ```
//! use ndcuboid::{Cuboid, Direction, Tensor, tensor};
//!
//! // Create a 2x3 tensor from row-major data
//! let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
//! assert_eq!(t.get(&[1, 0]), Some(4.0));
//!
//! // Vector arithmetic
//! let mut v = tensor![1, 2, 3];
//! v.add(&tensor![4, 5, 6]).unwrap();
//! assert_eq!(v.to_vec(), vec![5.0, 7.0, 9.0]);
//!
//! // Boxes
//! let mut c: Cuboid = "0,0,0:2,2,2".parse().unwrap();
//! c.offset_dir(1.0, Direction::East);
//! assert!(c.contains(2.5, 0.0, 0.0));
//! assert_eq!(c.all().len(), 8);
//! ```

pub mod cuboid;
pub mod direction;
pub mod error;
pub mod nested;
pub mod operations;
mod random;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use cuboid::{Cuboid, LatticePoints};
pub use direction::Direction;
pub use error::TensorError;
pub use nested::Nested;
pub use operations::{Comparand, Operand};
pub use storage::{Dense, ElementKind};
pub use tensor::Tensor;
