//! Compass and vertical directions and their unit displacement vectors.
//!
//! Axis convention: x grows East, y grows Up, z grows North.

use crate::tensor::Tensor;

/// One of the six axis-aligned directions, or no direction at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    /// No displacement; maps to the zero vector.
    #[default]
    None,
}

impl Direction {
    /// The six directions with a non-zero displacement.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// The unit displacement for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::Direction;
    ///
    /// assert_eq!(Direction::North.unit(), [0.0, 0.0, 1.0]);
    /// assert_eq!(Direction::None.unit(), [0.0, 0.0, 0.0]);
    /// ```
    pub fn unit(self) -> [f64; 3] {
        match self {
            Direction::North => [0.0, 0.0, 1.0],
            Direction::South => [0.0, 0.0, -1.0],
            Direction::East => [1.0, 0.0, 0.0],
            Direction::West => [-1.0, 0.0, 0.0],
            Direction::Up => [0.0, 1.0, 0.0],
            Direction::Down => [0.0, -1.0, 0.0],
            Direction::None => [0.0, 0.0, 0.0],
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }
}

impl Tensor {
    /// The unit vector of `direction` as a rank-1, length-3 tensor.
    pub fn from_direction(direction: Direction) -> Tensor {
        Tensor::from_values(&direction.unit())
    }
}

impl From<Direction> for Tensor {
    fn from(direction: Direction) -> Self {
        Tensor::from_direction(direction)
    }
}
