//! Tensor operations.
//!
//! Every operation is a method on [`Tensor`](crate::Tensor). In-place
//! operations return `&mut Tensor` (or `Result<&mut Tensor, _>` when the
//! operand can be rejected) so calls chain:
//!
//! ```text
//! elementwise   add, sub, scale, divide, negate, map, zip_map, reduce,
//!               equals, lerp, offset, offset_dir
//! norm          mag, normalize, set_mag, distance, dot, magnitude_product
//! permutedims   permutedims, transpose, reverse_shape
//! ```

mod elementwise;
mod norm;
mod permutedims;

pub use elementwise::{Comparand, Operand};
