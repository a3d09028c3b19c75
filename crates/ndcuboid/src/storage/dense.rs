//! Dense storage for tensor data.

use std::iter::FusedIterator;

use super::{ClampedU8, Element, ElementKind};

/// Dense storage - one contiguous, owned buffer per element kind.
///
/// Elements are read as `f64` and coerced to the buffer's kind on write.
#[derive(Debug, Clone, PartialEq)]
pub enum Dense {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I8(Vec<i8>),
    U8(Vec<u8>),
    U8Clamped(Vec<ClampedU8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
}

/// Run `$body` with `$buf` bound to the variant's `Vec`.
macro_rules! with_buffer {
    ($dense:expr, $buf:ident => $body:expr) => {
        match $dense {
            Dense::F32($buf) => $body,
            Dense::F64($buf) => $body,
            Dense::I8($buf) => $body,
            Dense::U8($buf) => $body,
            Dense::U8Clamped($buf) => $body,
            Dense::I16($buf) => $body,
            Dense::U16($buf) => $body,
            Dense::I32($buf) => $body,
            Dense::U32($buf) => $body,
        }
    };
}

fn collect<T: Element>(values: impl IntoIterator<Item = f64>) -> Vec<T> {
    values.into_iter().map(T::from_f64).collect()
}

impl Dense {
    /// Create dense storage of the given kind and length, zero-initialized.
    pub fn zeros(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::F32 => Dense::F32(vec![0.0; len]),
            ElementKind::F64 => Dense::F64(vec![0.0; len]),
            ElementKind::I8 => Dense::I8(vec![0; len]),
            ElementKind::U8 => Dense::U8(vec![0; len]),
            ElementKind::U8Clamped => Dense::U8Clamped(vec![ClampedU8(0); len]),
            ElementKind::I16 => Dense::I16(vec![0; len]),
            ElementKind::U16 => Dense::U16(vec![0; len]),
            ElementKind::I32 => Dense::I32(vec![0; len]),
            ElementKind::U32 => Dense::U32(vec![0; len]),
        }
    }

    /// Create dense storage of the given kind, coercing each value.
    pub fn from_values(kind: ElementKind, values: impl IntoIterator<Item = f64>) -> Self {
        match kind {
            ElementKind::F32 => Dense::F32(collect(values)),
            ElementKind::F64 => Dense::F64(values.into_iter().collect()),
            ElementKind::I8 => Dense::I8(collect(values)),
            ElementKind::U8 => Dense::U8(collect(values)),
            ElementKind::U8Clamped => Dense::U8Clamped(collect(values)),
            ElementKind::I16 => Dense::I16(collect(values)),
            ElementKind::U16 => Dense::U16(collect(values)),
            ElementKind::I32 => Dense::I32(collect(values)),
            ElementKind::U32 => Dense::U32(collect(values)),
        }
    }

    /// Create `f64` storage from an existing vector (takes ownership).
    pub fn from_vec(data: Vec<f64>) -> Self {
        Dense::F64(data)
    }

    /// The element kind of this buffer.
    pub fn kind(&self) -> ElementKind {
        match self {
            Dense::F32(_) => ElementKind::F32,
            Dense::F64(_) => ElementKind::F64,
            Dense::I8(_) => ElementKind::I8,
            Dense::U8(_) => ElementKind::U8,
            Dense::U8Clamped(_) => ElementKind::U8Clamped,
            Dense::I16(_) => ElementKind::I16,
            Dense::U16(_) => ElementKind::U16,
            Dense::I32(_) => ElementKind::I32,
            Dense::U32(_) => ElementKind::U32,
        }
    }

    /// Length of storage.
    #[inline]
    pub fn len(&self) -> usize {
        with_buffer!(self, buf => buf.len())
    }

    /// Check if storage is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read element `i` as `f64`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        with_buffer!(self, buf => buf.get(i).map(|e| e.to_f64()))
    }

    /// Write element `i`, coercing to the buffer's kind.
    ///
    /// Returns `false` if `i` is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, value: f64) -> bool {
        with_buffer!(self, buf => match buf.get_mut(i) {
            Some(slot) => {
                *slot = Element::from_f64(value);
                true
            }
            None => false,
        })
    }

    /// Iterate over all elements as `f64` in index order.
    pub fn values(&self) -> Values<'_> {
        Values {
            dense: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Copy all elements into a `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values().collect()
    }

    /// Get the `f64` buffer as a slice, if this storage holds `f64`.
    pub fn as_f64_slice(&self) -> Option<&[f64]> {
        match self {
            Dense::F64(buf) => Some(buf),
            _ => None,
        }
    }

    /// Replace every element with `f(value, index)`, in index order.
    pub fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(f64, usize) -> f64,
    {
        with_buffer!(self, buf => {
            for (i, slot) in buf.iter_mut().enumerate() {
                *slot = Element::from_f64(f(slot.to_f64(), i));
            }
        })
    }

    /// Copy this buffer into a new buffer of another kind.
    pub fn to_kind(&self, kind: ElementKind) -> Self {
        if kind == self.kind() {
            return self.clone();
        }
        Dense::from_values(kind, self.values())
    }
}

/// Iterator over the elements of a [`Dense`] buffer, widened to `f64`.
#[derive(Debug, Clone)]
pub struct Values<'a> {
    dense: &'a Dense,
    front: usize,
    back: usize,
}

impl Iterator for Values<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        let value = self.dense.get(self.front);
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Values<'_> {
    fn next_back(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.dense.get(self.back)
    }
}

impl ExactSizeIterator for Values<'_> {}

impl FusedIterator for Values<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        for kind in ElementKind::ALL {
            let d = Dense::zeros(kind, 5);
            assert_eq!(d.kind(), kind);
            assert_eq!(d.len(), 5);
            assert!(!d.is_empty());
            assert!(d.values().all(|v| v == 0.0));
        }
    }

    #[test]
    fn test_from_vec() {
        let d = Dense::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(d.kind(), ElementKind::F64);
        assert_eq!(d.as_f64_slice(), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn test_from_values_coerces() {
        let d = Dense::from_values(ElementKind::U8, [1.9, 256.0, -1.0]);
        assert_eq!(d, Dense::U8(vec![1, 0, 255]));
        assert_eq!(d.as_f64_slice(), None);
    }

    #[test]
    fn test_get_set() {
        let mut d = Dense::zeros(ElementKind::I16, 3);
        assert!(d.set(1, 5.7));
        assert_eq!(d.get(1), Some(5.0));
        assert!(!d.set(3, 1.0));
        assert_eq!(d.get(3), None);
    }

    #[test]
    fn test_map_in_place() {
        let mut d = Dense::from_values(ElementKind::U8Clamped, [10.0, 200.0]);
        d.map_in_place(|v, i| v * 2.0 + i as f64);
        assert_eq!(d.to_vec(), vec![20.0, 255.0]);
    }

    #[test]
    fn test_values_double_ended() {
        let d = Dense::from_vec(vec![1.0, 2.0, 3.0]);
        let reversed: Vec<f64> = d.values().rev().collect();
        assert_eq!(reversed, vec![3.0, 2.0, 1.0]);
        assert_eq!(d.values().len(), 3);
    }

    #[test]
    fn test_to_kind() {
        let d = Dense::from_vec(vec![1.5, -2.5, 300.0]);
        let i = d.to_kind(ElementKind::I32);
        assert_eq!(i, Dense::I32(vec![1, -2, 300]));
        let back = i.to_kind(ElementKind::F64);
        assert_eq!(back.to_vec(), vec![1.0, -2.0, 300.0]);
    }
}
