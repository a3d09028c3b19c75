//! Axis-aligned boxes built on 3-element tensors.
//!
//! ```text
//! Cuboid
//! ├── minimum  Tensor [3]   inclusive lower corner
//! └── maximum  Tensor [3]   exclusive upper corner for contains()
//! ```
//!
//! Most geometry returns a new box. `offset_dir`, `add` and `add_scalar`
//! mutate the receiver. The shared constants are handed out as
//! `&'static Cuboid`, so they can only be mutated after cloning.

mod lattice;

pub use lattice::LatticePoints;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use tracing::{error, trace};

use crate::direction::Direction;
use crate::error::TensorError;
use crate::tensor::Tensor;

const CORNERS: &str = "cuboid corners should be 3-element vectors";

static EMPTY: Lazy<Cuboid> = Lazy::new(|| {
    trace!("building shared empty cuboid");
    Cuboid::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
});

static FULL_CUBE: Lazy<Cuboid> = Lazy::new(|| {
    trace!("building shared unit cuboid");
    Cuboid::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
});

/// An axis-aligned box given by a minimum and a maximum corner.
///
/// Bounds are not validated: an inverted box (some `min > max`) is a legal
/// value and is what [`Cuboid::intersect`] returns for disjoint inputs.
///
/// # Examples
///
/// ```
/// use ndcuboid::Cuboid;
///
/// let a = Cuboid::new(0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
/// let b = Cuboid::new(1.0, 1.0, 1.0, 3.0, 3.0, 3.0);
/// assert!(a.intersects_cuboid(&b));
/// assert_eq!(a.union(&b).to_string(), "0,0,0:3,3,3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    minimum: Tensor,
    maximum: Tensor,
}

impl Cuboid {
    /// Create a box from its two corners.
    pub fn new(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Self {
            minimum: Tensor::from_values(&[x1, y1, z1]),
            maximum: Tensor::from_values(&[x2, y2, z2]),
        }
    }

    /// Create a box from two corner vectors.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless both corners are rank-1
    /// tensors with 3 elements.
    pub fn from_points(min: &Tensor, max: &Tensor) -> Result<Self, TensorError> {
        let [x1, y1, z1] = min.as_vector3()?;
        let [x2, y2, z2] = max.as_vector3()?;
        Ok(Self::new(x1, y1, z1, x2, y2, z2))
    }

    /// Create a degenerate box with both corners at `point`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless `point` is a 3-vector.
    pub fn from_point(point: &Tensor) -> Result<Self, TensorError> {
        Self::from_points(point, point)
    }

    /// The shared box `0,0,0:0,0,0`.
    pub fn empty() -> &'static Cuboid {
        &EMPTY
    }

    /// The shared unit box `0,0,0:1,1,1`.
    pub fn full_cube() -> &'static Cuboid {
        &FULL_CUBE
    }

    pub fn min_point(&self) -> &Tensor {
        &self.minimum
    }

    pub fn max_point(&self) -> &Tensor {
        &self.maximum
    }

    pub fn min_x(&self) -> f64 {
        self.minimum.x()
    }

    pub fn min_y(&self) -> f64 {
        self.minimum.y()
    }

    pub fn min_z(&self) -> f64 {
        self.minimum.z()
    }

    pub fn max_x(&self) -> f64 {
        self.maximum.x()
    }

    pub fn max_y(&self) -> f64 {
        self.maximum.y()
    }

    pub fn max_z(&self) -> f64 {
        self.maximum.z()
    }

    fn min_array(&self) -> [f64; 3] {
        [self.min_x(), self.min_y(), self.min_z()]
    }

    fn max_array(&self) -> [f64; 3] {
        [self.max_x(), self.max_y(), self.max_z()]
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether this box overlaps the box `(x1,y1,z1)..(x2,y2,z2)`.
    ///
    /// Comparisons are strict, so boxes that only share a face do not
    /// intersect.
    pub fn intersects(&self, x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> bool {
        self.min_x() < x2
            && self.max_x() > x1
            && self.min_y() < y2
            && self.max_y() > y1
            && self.min_z() < z2
            && self.max_z() > z1
    }

    /// Whether this box overlaps `other`.
    pub fn intersects_cuboid(&self, other: &Cuboid) -> bool {
        let [x1, y1, z1] = other.min_array();
        let [x2, y2, z2] = other.max_array();
        self.intersects(x1, y1, z1, x2, y2, z2)
    }

    /// Whether this box overlaps the box spanned by `min` and `max`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless both corners are 3-vectors.
    pub fn intersects_points(&self, min: &Tensor, max: &Tensor) -> Result<bool, TensorError> {
        let [x1, y1, z1] = min.as_vector3()?;
        let [x2, y2, z2] = max.as_vector3()?;
        Ok(self.intersects(x1, y1, z1, x2, y2, z2))
    }

    /// Whether `(x, y, z)` lies in `[min, max)` on every axis.
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        x >= self.min_x()
            && x < self.max_x()
            && y >= self.min_y()
            && y < self.max_y()
            && z >= self.min_z()
            && z < self.max_z()
    }

    /// [`Cuboid::contains`] for a point given as a tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless `point` is a 3-vector.
    pub fn contains_point(&self, point: &Tensor) -> Result<bool, TensorError> {
        let [x, y, z] = point.as_vector3()?;
        Ok(self.contains(x, y, z))
    }

    /// Overlap of two boxes, per axis `max(mins)..min(maxes)`.
    ///
    /// Disjoint inputs produce an inverted box; nothing is clamped.
    pub fn intersect(&self, other: &Cuboid) -> Cuboid {
        Cuboid {
            minimum: self.minimum.zip_map(&other.minimum, f64::max).expect(CORNERS),
            maximum: self.maximum.zip_map(&other.maximum, f64::min).expect(CORNERS),
        }
    }

    /// Smallest box enclosing both, per axis `min(mins)..max(maxes)`.
    pub fn union(&self, other: &Cuboid) -> Cuboid {
        Cuboid {
            minimum: self.minimum.zip_map(&other.minimum, f64::min).expect(CORNERS),
            maximum: self.maximum.zip_map(&other.maximum, f64::max).expect(CORNERS),
        }
    }

    // ========================================================================
    // Resize
    // ========================================================================

    /// Shrink one side per axis.
    ///
    /// A negative amount raises `min` by its absolute value, a positive one
    /// lowers `max`, zero leaves the axis alone. Amounts larger than the
    /// side push the moved bound past the opposite one, giving an inverted
    /// box.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Cuboid;
    ///
    /// let c = Cuboid::new(0.0, 0.0, 0.0, 4.0, 4.0, 4.0);
    /// assert_eq!(c.contract(-1.0, 1.0, 0.0).to_string(), "1,0,0:4,3,4");
    /// assert_eq!(c.contract(0.0, 0.0, 6.0).to_string(), "0,0,0:4,4,-2");
    /// ```
    pub fn contract(&self, x: f64, y: f64, z: f64) -> Cuboid {
        self.resize([x, y, z], -1.0)
    }

    /// Grow one side per axis, mirroring [`Cuboid::contract`].
    ///
    /// A negative amount lowers `min`, a positive one raises `max`.
    pub fn expand(&self, x: f64, y: f64, z: f64) -> Cuboid {
        self.resize([x, y, z], 1.0)
    }

    /// Move `min` for negative amounts and `max` for positive ones by
    /// `amount * sign`.
    fn resize(&self, amounts: [f64; 3], sign: f64) -> Cuboid {
        let mut min_shift = [0.0; 3];
        let mut max_shift = [0.0; 3];
        for (axis, amount) in amounts.into_iter().enumerate() {
            if amount < 0.0 {
                min_shift[axis] = amount * sign;
            } else if amount > 0.0 {
                max_shift[axis] = amount * sign;
            }
        }

        let mut resized = self.clone();
        resized.minimum.offset(1.0, &min_shift).expect(CORNERS);
        resized.maximum.offset(1.0, &max_shift).expect(CORNERS);
        resized
    }

    // ========================================================================
    // Translation
    // ========================================================================

    /// A copy shifted by `(x, y, z) * n`.
    pub fn offset(&self, n: f64, x: f64, y: f64, z: f64) -> Cuboid {
        let mut moved = self.clone();
        moved.minimum.offset(n, &[x, y, z]).expect(CORNERS);
        moved.maximum.offset(n, &[x, y, z]).expect(CORNERS);
        moved
    }

    /// A copy shifted by `delta * n`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::TypeMismatch` unless `delta` is a 3-vector.
    pub fn offset_tensor(&self, n: f64, delta: &Tensor) -> Result<Cuboid, TensorError> {
        let [x, y, z] = delta.as_vector3()?;
        Ok(self.offset(n, x, y, z))
    }

    /// Shift this box `n` units in `direction`, in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::{Cuboid, Direction};
    ///
    /// let mut c = Cuboid::full_cube().clone();
    /// c.offset_dir(2.0, Direction::West);
    /// assert_eq!(c.to_string(), "-2,0,0:-1,1,1");
    /// ```
    pub fn offset_dir(&mut self, n: f64, direction: Direction) -> &mut Self {
        self.minimum.offset_dir(n, direction).expect(CORNERS);
        self.maximum.offset_dir(n, direction).expect(CORNERS);
        self
    }

    /// Add `other`'s corners to this box's corners, in place.
    pub fn add(&mut self, other: &Cuboid) -> &mut Self {
        self.minimum.add(&other.minimum).expect(CORNERS);
        self.maximum.add(&other.maximum).expect(CORNERS);
        self
    }

    /// Add `k` to every coordinate of both corners, in place.
    pub fn add_scalar(&mut self, k: f64) -> &mut Self {
        self.minimum.map_in_place(|v| v + k);
        self.maximum.map_in_place(|v| v + k);
        self
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// Per-axis midpoint.
    pub fn center(&self) -> Tensor {
        let mut center = self.size();
        center.scale(0.5).add(&self.minimum).expect(CORNERS);
        center
    }

    /// Per-axis extent `max - min`.
    pub fn size(&self) -> Tensor {
        let mut size = self.maximum.clone();
        size.sub(&self.minimum).expect(CORNERS);
        size
    }

    /// Mean of the three extents.
    pub fn average_edge_length(&self) -> f64 {
        self.size().sum() / 3.0
    }

    /// Whether the box encloses no volume.
    ///
    /// True when any axis has `min >= max`, and when any bound is NaN.
    pub fn is_empty(&self) -> bool {
        !self
            .minimum
            .values()
            .zip(self.maximum.values())
            .all(|(lo, hi)| lo < hi)
    }

    /// Whether all three maximum coordinates are zero.
    ///
    /// This says nothing about `min`; prefer [`Cuboid::is_empty`].
    pub fn max_is_origin(&self) -> bool {
        self.maximum.every(|v| v == 0.0)
    }

    // ========================================================================
    // Lattice
    // ========================================================================

    /// Integer points in `[min, max)` per axis, x outermost, z innermost.
    ///
    /// Coordinates beyond ±2^53 are not visited, so every point yielded
    /// satisfies [`Cuboid::contains`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Cuboid;
    ///
    /// let c = Cuboid::new(0.0, 0.0, 0.0, 2.0, 1.0, 1.0);
    /// let points: Vec<Vec<f64>> = c.lattice_points().map(|p| p.to_vec()).collect();
    /// assert_eq!(points, vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0]]);
    /// ```
    pub fn lattice_points(&self) -> LatticePoints {
        LatticePoints::new(self.min_array(), self.max_array())
    }

    /// Every lattice point, collected.
    pub fn all(&self) -> Vec<Tensor> {
        self.lattice_points().collect()
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Parse `"x1,y1,z1:x2,y2,z2"`, falling back to the shared empty box.
    ///
    /// Failures are logged at error level and never returned. Use
    /// [`str::parse`] to get the error instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Cuboid;
    ///
    /// assert_eq!(Cuboid::parse("0,0,0:1,2,3"), Cuboid::new(0.0, 0.0, 0.0, 1.0, 2.0, 3.0));
    /// assert_eq!(&Cuboid::parse("0,0,0"), Cuboid::empty());
    /// ```
    pub fn parse(s: &str) -> Cuboid {
        match s.parse() {
            Ok(cuboid) => cuboid,
            Err(err) => {
                error!(input = s, error = %err, "failed to parse cuboid, using the empty box");
                Cuboid::empty().clone()
            }
        }
    }
}

impl fmt::Display for Cuboid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.minimum, self.maximum)
    }
}

impl FromStr for Cuboid {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| TensorError::MalformedCuboid {
            input: s.to_string(),
            reason,
        };

        let (min, max) = s.split_once(':').ok_or_else(|| malformed("missing ':' separator"))?;
        let min: Tensor = min.parse()?;
        let max: Tensor = max.parse()?;
        if !min.is_vector(3) || !max.is_vector(3) {
            return Err(malformed("each corner needs three components"));
        }
        Self::from_points(&min, &max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;
    use approx::assert_relative_eq;

    fn unit2() -> Cuboid {
        Cuboid::new(0.0, 0.0, 0.0, 2.0, 2.0, 2.0)
    }

    #[test]
    fn test_constants() {
        assert_eq!(Cuboid::empty().to_string(), "0,0,0:0,0,0");
        assert_eq!(Cuboid::full_cube().to_string(), "0,0,0:1,1,1");
        assert!(std::ptr::eq(Cuboid::empty(), Cuboid::empty()));
    }

    #[test]
    fn test_constants_survive_mutating_a_clone() {
        let mut c = Cuboid::full_cube().clone();
        c.add_scalar(5.0).offset_dir(1.0, Direction::Up);
        assert_eq!(c.to_string(), "5,6,5:6,7,6");
        assert_eq!(Cuboid::full_cube().to_string(), "0,0,0:1,1,1");
    }

    #[test]
    fn test_from_points() {
        let c = Cuboid::from_points(&tensor![1, 2, 3], &tensor![4, 5, 6]).unwrap();
        assert_eq!(c, Cuboid::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(c.min_point().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(c.max_z(), 6.0);

        let err = Cuboid::from_points(&tensor![1, 2], &tensor![4, 5, 6]).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_from_point_is_degenerate() {
        let c = Cuboid::from_point(&tensor![1, 1, 1]).unwrap();
        assert!(c.is_empty());
        assert!(c.all().is_empty());
    }

    #[test]
    fn test_intersects_shared_face_excluded() {
        let a = unit2();
        assert!(a.intersects_cuboid(&Cuboid::new(1.0, 1.0, 1.0, 3.0, 3.0, 3.0)));
        assert!(!a.intersects_cuboid(&Cuboid::new(2.0, 2.0, 2.0, 3.0, 3.0, 3.0)));
        assert!(!a.intersects_cuboid(&Cuboid::new(2.0, 0.0, 0.0, 3.0, 2.0, 2.0)));
    }

    #[test]
    fn test_intersects_points_uses_min_then_max() {
        let a = unit2();
        assert!(a.intersects_points(&tensor![1, 1, 1], &tensor![3, 3, 3]).unwrap());
        assert!(!a.intersects_points(&tensor![3, 3, 3], &tensor![4, 4, 4]).unwrap());
        assert!(a.intersects_points(&tensor![1, 1], &tensor![3, 3, 3]).is_err());
    }

    #[test]
    fn test_contains_half_open() {
        let a = unit2();
        assert!(a.contains(0.0, 0.0, 0.0));
        assert!(a.contains(1.5, 1.999, 0.5));
        assert!(!a.contains(2.0, 1.0, 1.0));
        assert!(!a.contains(1.0, 1.0, 2.0));
        assert!(!a.contains(-0.1, 1.0, 1.0));
        assert!(a.contains_point(&tensor![1, 1, 1]).unwrap());
        assert!(a.contains_point(&tensor![1, 1]).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_intersect_and_union() {
        let a = unit2();
        let b = Cuboid::new(1.0, 1.0, 1.0, 3.0, 3.0, 3.0);
        assert_eq!(a.intersect(&b), Cuboid::new(1.0, 1.0, 1.0, 2.0, 2.0, 2.0));
        assert_eq!(a.union(&b), Cuboid::new(0.0, 0.0, 0.0, 3.0, 3.0, 3.0));
    }

    #[test]
    fn test_intersect_disjoint_is_inverted() {
        let a = unit2();
        let far = Cuboid::new(5.0, 5.0, 5.0, 6.0, 6.0, 6.0);
        let overlap = a.intersect(&far);
        assert_eq!(overlap, Cuboid::new(5.0, 5.0, 5.0, 2.0, 2.0, 2.0));
        assert!(overlap.is_empty());
    }

    #[test]
    fn test_contract_sign_rules() {
        let c = Cuboid::new(0.0, 0.0, 0.0, 4.0, 4.0, 4.0);
        assert_eq!(c.contract(-1.0, 2.0, 0.0), Cuboid::new(1.0, 0.0, 0.0, 4.0, 2.0, 4.0));
        assert_eq!(c.contract(0.0, 0.0, 0.0), c);
    }

    #[test]
    fn test_expand_sign_rules() {
        let c = Cuboid::new(0.0, 0.0, 0.0, 4.0, 4.0, 4.0);
        assert_eq!(c.expand(-1.0, 2.0, 0.0), Cuboid::new(-1.0, 0.0, 0.0, 4.0, 6.0, 4.0));
    }

    #[test]
    fn test_contract_wraps_past_opposite_bound() {
        let c = Cuboid::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let wrapped = c.contract(-3.0, 0.0, 0.0);
        assert_eq!(wrapped.min_x(), 3.0);
        assert_eq!(wrapped.max_x(), 1.0);
        assert!(wrapped.is_empty());
    }

    #[test]
    fn test_contract_then_expand_restores() {
        let c = Cuboid::new(-2.0, 0.5, 1.0, 3.0, 4.5, 9.0);
        for (x, y, z) in [(1.0, -2.0, 3.0), (-5.0, 4.0, -8.0), (0.0, 0.25, -0.5)] {
            assert_eq!(c.contract(x, y, z).expand(x, y, z), c);
        }
    }

    #[test]
    fn test_offset_returns_new_box() {
        let c = unit2();
        let moved = c.offset(2.0, 1.0, 0.0, -1.0);
        assert_eq!(moved, Cuboid::new(2.0, 0.0, -2.0, 4.0, 2.0, 0.0));
        assert_eq!(c, unit2());

        let moved = c.offset_tensor(0.5, &tensor![2, 2, 2]).unwrap();
        assert_eq!(moved, Cuboid::new(1.0, 1.0, 1.0, 3.0, 3.0, 3.0));
        assert!(c.offset_tensor(1.0, &tensor![1, 1]).is_err());
    }

    #[test]
    fn test_offset_dir_mutates() {
        let mut c = unit2();
        c.offset_dir(3.0, Direction::North);
        assert_eq!(c, Cuboid::new(0.0, 0.0, 3.0, 2.0, 2.0, 5.0));
        c.offset_dir(1.0, Direction::None);
        assert_eq!(c, Cuboid::new(0.0, 0.0, 3.0, 2.0, 2.0, 5.0));
    }

    #[test]
    fn test_add_forms() {
        let mut c = unit2();
        c.add(&Cuboid::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(c, Cuboid::new(1.0, 2.0, 3.0, 6.0, 7.0, 8.0));
        c.add_scalar(-1.0);
        assert_eq!(c, Cuboid::new(0.0, 1.0, 2.0, 5.0, 6.0, 7.0));
    }

    #[test]
    fn test_derived_values() {
        let c = Cuboid::new(1.0, 2.0, 3.0, 3.0, 6.0, 9.0);
        assert_eq!(c.size().to_vec(), vec![2.0, 4.0, 6.0]);
        assert_eq!(c.center().to_vec(), vec![2.0, 4.0, 6.0]);
        assert_relative_eq!(c.average_edge_length(), 4.0);
    }

    #[test]
    fn test_is_empty_vs_max_is_origin() {
        assert!(Cuboid::empty().is_empty());
        assert!(Cuboid::empty().max_is_origin());
        assert!(!Cuboid::full_cube().is_empty());

        let negative = Cuboid::new(-1.0, -1.0, -1.0, 0.0, 0.0, 0.0);
        assert!(!negative.is_empty());
        assert!(negative.max_is_origin());

        let flat = Cuboid::new(0.0, 0.0, 0.0, 1.0, 0.0, 1.0);
        assert!(flat.is_empty());
        assert!(!flat.max_is_origin());

        assert!(Cuboid::new(f64::NAN, 0.0, 0.0, 1.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_all_points_are_contained() {
        let c = Cuboid::new(-1.5, 0.0, 0.25, 1.0, 2.0, 2.5);
        let points = c.all();
        // x in {-1, 0}, y in {0, 1}, z in {1, 2}
        assert_eq!(points.len(), 8);
        for p in &points {
            assert!(c.contains_point(p).unwrap(), "{p} not in {c}");
        }
        assert_eq!(points[0].to_vec(), vec![-1.0, 0.0, 1.0]);
        assert_eq!(points[7].to_vec(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_display_and_from_str() {
        let c = Cuboid::new(0.5, -1.0, 2.0, 3.0, 4.25, 5.0);
        assert_eq!(c.to_string(), "0.5,-1,2:3,4.25,5");
        assert_eq!(c.to_string().parse::<Cuboid>().unwrap(), c);
        assert_eq!(" 1, 2 ,3 :4,5,6".parse::<Cuboid>().unwrap(), Cuboid::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
    }

    #[test]
    fn test_from_str_errors() {
        assert!(matches!(
            "0,0,0".parse::<Cuboid>(),
            Err(TensorError::MalformedCuboid { .. })
        ));
        assert!(matches!(
            "0,0:1,1".parse::<Cuboid>(),
            Err(TensorError::MalformedCuboid { .. })
        ));
        assert!(matches!(
            "0,a,0:1,1,1".parse::<Cuboid>(),
            Err(TensorError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(Cuboid::parse("1,2,3:4,5,6"), Cuboid::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(&Cuboid::parse("garbage"), Cuboid::empty());
        assert_eq!(&Cuboid::parse(""), Cuboid::empty());
    }
}
