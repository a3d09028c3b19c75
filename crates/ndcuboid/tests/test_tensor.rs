//! Integration tests for Tensor construction, arithmetic and element kinds.
//!
//! # Coverage
//!
//! - Shape/data length invariant on every constructor
//! - Nested round-trips
//! - Scalar and tensor add/sub inverse laws
//! - Direction units and vector helpers
//! - Element kind coercion through arithmetic
//! - Seeded random construction

use approx::assert_relative_eq;
use ndcuboid::{Direction, ElementKind, Nested, Tensor, TensorError, tensor};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Construction
// ============================================================================

/// Data length must equal the product of the shape for every constructor.
#[test]
fn test_shape_product_matches_length() {
    for shape in [vec![], vec![4], vec![2, 3], vec![2, 1, 3], vec![0, 5]] {
        let len: usize = shape.iter().product();
        let t = Tensor::from_vec(vec![1.0; len], &shape).unwrap();
        assert_eq!(t.len(), len);
        assert_eq!(t.shape(), shape.as_slice());

        let err = Tensor::from_vec(vec![1.0; len + 1], &shape).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));
    }
}

/// Shapes whose element count overflows `usize` are rejected, not wrapped.
#[test]
fn test_overflowing_shape_rejected() {
    let err = Tensor::from_vec(vec![], &[1 << 32, 1 << 32]).unwrap_err();
    assert!(err.is_shape_mismatch());
    assert!(matches!(err, TensorError::ShapeOverflow { .. }));

    let err = Tensor::from_nested(Vec::<f64>::new(), Some(&[usize::MAX, 2])).unwrap_err();
    assert!(err.is_shape_mismatch());

    assert!(Tensor::zeros(&[2, 2]).reshape(&[1 << 33, 1 << 33]).is_err());
}

/// A `[2, 3]` nested array of `1..=6` reads back as the same nesting.
#[test]
fn test_nested_round_trip() {
    let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    let t = Tensor::from_nested(rows.clone(), None).unwrap();
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.to_nested(), Nested::from(rows));
}

/// An explicit shape overrides the inferred one; a mismatching one fails.
#[test]
fn test_nested_with_explicit_shape() {
    let t = Tensor::from_nested(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], Some(&[3, 2])).unwrap();
    assert_eq!(t.get(&[2, 1]), Some(6.0));

    let err = Tensor::from_nested(vec![1.0, 2.0, 3.0], Some(&[2, 2])).unwrap_err();
    assert!(err.is_shape_mismatch());
}

/// Named zero constructors have the documented shapes.
#[test]
fn test_named_zero_shapes() {
    assert_eq!(Tensor::scalar_zero().shape(), &[] as &[usize]);
    assert_eq!(Tensor::vector_zero().shape(), &[3]);
    assert_eq!(Tensor::vector_zero4().shape(), &[4]);
    assert_eq!(Tensor::matrix_zero3().shape(), &[3, 3]);
    assert_eq!(Tensor::matrix_zero4().shape(), &[4, 4]);
    assert!(Tensor::matrix_zero4().every(|v| v == 0.0));
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Adding then subtracting the same scalar or tensor restores the original.
#[test]
fn test_add_sub_inverse() {
    let original = Tensor::from_vec(vec![0.5, -2.0, 3.25, 8.0, 1e3, -7.5], &[2, 3]).unwrap();
    let k = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();

    let mut t = original.clone();
    t.add(&k).unwrap().sub(&k).unwrap();
    assert_eq!(t, original);

    let mut t = original.clone();
    t.add(0.25).unwrap().sub(0.25).unwrap();
    assert_eq!(t, original);
}

/// `[1,2,3] + [4,5,6] = [5,7,9]`.
#[test]
fn test_vector_add() {
    let mut t = tensor![1, 2, 3];
    t.add(&tensor![4, 5, 6]).unwrap();
    assert_eq!(t.to_vec(), vec![5.0, 7.0, 9.0]);
}

/// Mismatched operands fail without touching the receiver.
#[test]
fn test_operand_shape_mismatch_leaves_receiver() {
    let mut t = tensor![1, 2, 3];
    let err = t.add(&tensor![1, 2]).unwrap_err();
    assert!(err.is_shape_mismatch());
    assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0]);

    let square = Tensor::ones(&[3, 1]);
    assert!(t.sub(&square).is_err());
    assert!(t.equals(&square).is_err());
}

/// Distance from `[1,2,3]` to `[4,5,6]` floors to 5.
#[test]
fn test_distance_floor() {
    let d = tensor![1, 2, 3].clone().distance(&tensor![4, 5, 6]).unwrap();
    assert_eq!(d.floor(), 5.0);
}

/// Inner product and magnitude product are distinct operations.
#[test]
fn test_dot_and_magnitude_product() {
    let a = tensor![1, 0, 0];
    let b = tensor![0, 1, 0];
    assert_relative_eq!(a.dot(&b).unwrap(), 0.0);
    assert_relative_eq!(a.magnitude_product(&b), 1.0);
}

// ============================================================================
// Directions
// ============================================================================

/// Every direction unit vector has magnitude 1 and cancels its opposite.
#[test]
fn test_direction_units() {
    for d in Direction::ALL {
        let mut t = Tensor::from(d);
        assert_relative_eq!(t.mag(), 1.0);
        t.add(&Tensor::from(d.opposite())).unwrap();
        assert!(t.every(|v| v == 0.0));
    }
    assert!(Tensor::from(Direction::None).every(|v| v == 0.0));
}

/// `offset_dir` requires a 3-vector.
#[test]
fn test_offset_dir_type_mismatch() {
    let mut t = tensor![0, 0, 0];
    t.offset_dir(2.0, Direction::Down).unwrap();
    assert_eq!(t.to_vec(), vec![0.0, -2.0, 0.0]);

    let mut wrong = Tensor::zeros(&[3, 1]);
    assert!(wrong.offset_dir(1.0, Direction::Up).unwrap_err().is_type_mismatch());
    let mut short = tensor![0, 0];
    assert!(short.offset_dir(1.0, Direction::Up).unwrap_err().is_type_mismatch());
}

// ============================================================================
// Element kinds
// ============================================================================

/// Integer kinds wrap and clamped bytes saturate after arithmetic.
#[test]
fn test_kind_coercion_after_arithmetic() {
    let mut bytes = Tensor::zeros_with_kind(&[3], ElementKind::U8);
    bytes.set_values(&[250.0, 10.0, 0.0]).unwrap();
    bytes.add(10.0).unwrap();
    assert_eq!(bytes.to_vec(), vec![4.0, 20.0, 10.0]);

    let mut clamped = Tensor::zeros_with_kind(&[3], ElementKind::U8Clamped);
    clamped.set_values(&[250.0, 10.0, 0.0]).unwrap();
    clamped.add(10.0).unwrap().sub(15.0).unwrap();
    assert_eq!(clamped.to_vec(), vec![240.0, 5.0, 0.0]);

    let mut signed = Tensor::zeros_with_kind(&[1], ElementKind::I8);
    signed.set_linear(0, 127.0).unwrap();
    signed.add(1.0).unwrap();
    assert_eq!(signed.to_vec(), vec![-128.0]);
}

/// Equality compares shape and values, not element kind.
#[test]
fn test_equality_ignores_kind() {
    let f = tensor![1, 2, 3];
    let i = f.to_kind(ElementKind::I32);
    assert_eq!(i.kind(), ElementKind::I32);
    assert_eq!(f, i);
}

// ============================================================================
// Text and random
// ============================================================================

/// Display and FromStr round-trip a vector.
#[test]
fn test_text_round_trip() {
    let t = tensor![1.5, -2, 1e-3];
    let parsed: Tensor = t.to_string().parse().unwrap();
    assert_eq!(parsed, t);
    assert!(matches!(
        "1,,2".parse::<Tensor>(),
        Err(TensorError::InvalidNumber { .. })
    ));
}

/// Seeded random tensors are reproducible and integer-valued.
#[test]
fn test_random_seeded() {
    let a = Tensor::random_with_rng(&[4, 4], 6.0, &mut StdRng::seed_from_u64(7));
    let b = Tensor::random_with_rng(&[4, 4], 6.0, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
    assert!(a.every(|v| v.fract() == 0.0 && (0.0..6.0).contains(&v)));
}
