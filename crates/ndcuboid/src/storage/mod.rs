//! Storage types for tensor data.
//!
//! A tensor's elements live in a single contiguous buffer whose numeric
//! kind is chosen at construction:
//!
//! ```text
//! ElementKind            Dense variant
//! ├── F32, F64           Vec<f32>, Vec<f64>
//! ├── I8, I16, I32       Vec<i8>, Vec<i16>, Vec<i32>
//! ├── U8, U16, U32       Vec<u8>, Vec<u16>, Vec<u32>
//! └── U8Clamped          Vec<ClampedU8>
//! ```
//!
//! Arithmetic is carried out in `f64` and coerced back to the element kind
//! on every store, see [`Element::from_f64`].

mod dense;

use std::fmt;

pub use dense::{Dense, Values};

/// The numeric kind backing a tensor's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    F32,
    #[default]
    F64,
    I8,
    U8,
    /// 8-bit unsigned, saturating at 0 and 255 with round-half-even.
    U8Clamped,
    I16,
    U16,
    I32,
    U32,
}

impl ElementKind {
    /// Every supported kind.
    pub const ALL: [ElementKind; 9] = [
        ElementKind::F32,
        ElementKind::F64,
        ElementKind::I8,
        ElementKind::U8,
        ElementKind::U8Clamped,
        ElementKind::I16,
        ElementKind::U16,
        ElementKind::I32,
        ElementKind::U32,
    ];

    /// The value `v` becomes once stored in a buffer of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcuboid::ElementKind;
    ///
    /// assert_eq!(ElementKind::U8.coerce(257.0), 1.0);
    /// assert_eq!(ElementKind::U8Clamped.coerce(257.0), 255.0);
    /// assert_eq!(ElementKind::I8.coerce(-1.7), -1.0);
    /// assert_eq!(ElementKind::I32.coerce(f64::NAN), 0.0);
    /// ```
    pub fn coerce(self, v: f64) -> f64 {
        match self {
            ElementKind::F32 => f32::from_f64(v).to_f64(),
            ElementKind::F64 => v,
            ElementKind::I8 => i8::from_f64(v).to_f64(),
            ElementKind::U8 => u8::from_f64(v).to_f64(),
            ElementKind::U8Clamped => ClampedU8::from_f64(v).to_f64(),
            ElementKind::I16 => i16::from_f64(v).to_f64(),
            ElementKind::U16 => u16::from_f64(v).to_f64(),
            ElementKind::I32 => i32::from_f64(v).to_f64(),
            ElementKind::U32 => u32::from_f64(v).to_f64(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
            ElementKind::I8 => "i8",
            ElementKind::U8 => "u8",
            ElementKind::U8Clamped => "u8-clamped",
            ElementKind::I16 => "i16",
            ElementKind::U16 => "u16",
            ElementKind::I32 => "i32",
            ElementKind::U32 => "u32",
        };
        f.write_str(name)
    }
}

/// An 8-bit unsigned element that saturates instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct ClampedU8(pub u8);

/// Trait for the element types a [`Dense`] buffer can hold.
pub trait Element: Copy + Default + fmt::Debug + 'static {
    /// The kind tag for this element type.
    const KIND: ElementKind;

    /// Convert an `f64` into this element type.
    ///
    /// Integer kinds store 0 for NaN and infinities, otherwise truncate
    /// toward zero and wrap modulo 2^bits.
    fn from_f64(v: f64) -> Self;

    /// Widen this element to `f64`.
    fn to_f64(self) -> f64;
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::F64;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Element for f32 {
    const KIND: ElementKind = ElementKind::F32;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Truncate and reduce `v` modulo `2^bits`, mapping non-finite values to 0.
#[inline]
fn wrap_modular(v: f64, bits: u32) -> u64 {
    if !v.is_finite() {
        return 0;
    }
    let modulus = (1u64 << bits) as f64;
    v.trunc().rem_euclid(modulus) as u64
}

macro_rules! impl_wrapping_element {
    ($ty:ty, $unsigned:ty, $kind:ident, $bits:expr) => {
        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn from_f64(v: f64) -> Self {
                wrap_modular(v, $bits) as $unsigned as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_wrapping_element!(i8, u8, I8, 8);
impl_wrapping_element!(u8, u8, U8, 8);
impl_wrapping_element!(i16, u16, I16, 16);
impl_wrapping_element!(u16, u16, U16, 16);
impl_wrapping_element!(i32, u32, I32, 32);
impl_wrapping_element!(u32, u32, U32, 32);

impl Element for ClampedU8 {
    const KIND: ElementKind = ElementKind::U8Clamped;

    #[inline]
    fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            return ClampedU8(0);
        }
        ClampedU8(v.clamp(0.0, 255.0).round_ties_even() as u8)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.0 as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_is_f64() {
        assert_eq!(ElementKind::default(), ElementKind::F64);
    }

    #[test]
    fn test_signed_wraps() {
        assert_eq!(i8::from_f64(127.0), 127);
        assert_eq!(i8::from_f64(128.0), -128);
        assert_eq!(i8::from_f64(-129.0), 127);
        assert_eq!(i16::from_f64(40000.0), -25536);
        assert_eq!(i32::from_f64(2_147_483_648.0), i32::MIN);
    }

    #[test]
    fn test_unsigned_wraps() {
        assert_eq!(u8::from_f64(256.0), 0);
        assert_eq!(u8::from_f64(-1.0), 255);
        assert_eq!(u16::from_f64(65537.0), 1);
        assert_eq!(u32::from_f64(-1.0), u32::MAX);
    }

    #[test]
    fn test_integers_truncate_toward_zero() {
        assert_eq!(i32::from_f64(2.9), 2);
        assert_eq!(i32::from_f64(-2.9), -2);
        assert_eq!(u8::from_f64(0.99), 0);
    }

    #[test]
    fn test_non_finite_integers_store_zero() {
        assert_eq!(i32::from_f64(f64::NAN), 0);
        assert_eq!(u16::from_f64(f64::INFINITY), 0);
        assert_eq!(i8::from_f64(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_clamped_saturates_and_rounds_half_even() {
        assert_eq!(ClampedU8::from_f64(300.0), ClampedU8(255));
        assert_eq!(ClampedU8::from_f64(-4.0), ClampedU8(0));
        assert_eq!(ClampedU8::from_f64(1.5), ClampedU8(2));
        assert_eq!(ClampedU8::from_f64(2.5), ClampedU8(2));
        assert_eq!(ClampedU8::from_f64(f64::NAN), ClampedU8(0));
        assert_eq!(ClampedU8::from_f64(f64::INFINITY), ClampedU8(255));
    }

    #[test]
    fn test_f32_rounds() {
        assert_eq!(ElementKind::F32.coerce(0.1), 0.1f32 as f64);
        assert_ne!(ElementKind::F32.coerce(0.1), 0.1);
    }
}
