//! Lazy enumeration of the integer points inside a cuboid.

use std::iter::FusedIterator;

use crate::tensor::Tensor;

/// Every integer up to this magnitude is exactly an `f64`.
const EXACT_LIMIT: i64 = 1 << 53;

/// Iterator over the integer lattice points of a box.
///
/// Yields every point with integer coordinates in `[min, max)` on each
/// axis, x outermost and z innermost. Clone the iterator (or ask the cuboid
/// again) to restart it.
///
/// Only integers with magnitude up to 2^53 are visited, since beyond that
/// an `f64` cannot represent every integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticePoints {
    start: [i64; 3],
    end: [i64; 3],
    next: Option<[i64; 3]>,
}

impl LatticePoints {
    pub(crate) fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        // The first integer >= min and the first integer >= max bound the
        // half-open range on each axis, clamped to the exact integers.
        let start = min.map(|v| (v.ceil() as i64).max(-EXACT_LIMIT));
        let end = max.map(|v| (v.ceil() as i64).min(EXACT_LIMIT + 1));
        let has_nan = min.iter().chain(max.iter()).any(|v| v.is_nan());
        let next = (!has_nan && (0..3).all(|axis| start[axis] < end[axis])).then_some(start);
        Self { start, end, next }
    }

    /// Points not yet yielded, or `None` if the count overflows `u128`.
    fn remaining(&self) -> Option<u128> {
        let Some(p) = self.next else {
            return Some(0);
        };
        let span = |axis: usize| (self.end[axis] as i128 - self.start[axis] as i128) as u128;
        let rest = |axis: usize| (self.end[axis] as i128 - p[axis] as i128 - 1) as u128;

        let slab = span(1).checked_mul(span(2))?;
        rest(0)
            .checked_mul(slab)?
            .checked_add(rest(1).checked_mul(span(2))?)?
            .checked_add(rest(2) + 1)
    }

    fn advance(&mut self, mut p: [i64; 3]) -> Option<[i64; 3]> {
        for axis in (0..3).rev() {
            p[axis] += 1;
            if p[axis] < self.end[axis] {
                return Some(p);
            }
            p[axis] = self.start[axis];
        }
        None
    }
}

impl Iterator for LatticePoints {
    type Item = Tensor;

    fn next(&mut self) -> Option<Tensor> {
        let current = self.next?;
        self.next = self.advance(current);
        Some(Tensor::from_values(&current.map(|c| c as f64)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().and_then(|n| usize::try_from(n).ok()) {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for LatticePoints {}
