//! Floating-point capability shared by every numeric API in the crate.
//!
//! [`Float`] is sealed and implemented for `f32` and `f64` only, so calling a
//! check with an integer series is rejected at compile time rather than at
//! runtime. The trait also carries the per-type constants the binary codec
//! needs (stable type tag and element width).

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Single- or double-precision floating-point element type.
///
/// This trait cannot be implemented outside this crate.
pub trait Float:
    sealed::Sealed
    + Copy
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Stable tag identifying this element type in serialized blobs.
    const TYPE_TAG: &'static str;

    /// Width of one element in bytes.
    const SIZE: usize;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Converts a sample count into this type (used for averaging).
    fn from_usize(n: usize) -> Self;

    /// Widens to `f64`.
    fn to_f64(self) -> f64;

    /// Appends the little-endian IEEE-754 encoding of `self` to `out`.
    fn extend_le_bytes(self, out: &mut Vec<u8>);

    /// Decodes one element from exactly [`Float::SIZE`] little-endian bytes.
    ///
    /// Returns `None` when `chunk` has the wrong length.
    fn from_le_chunk(chunk: &[u8]) -> Option<Self>;
}

macro_rules! impl_float {
    ($ty:ty, $tag:literal) => {
        impl Float for $ty {
            const ZERO: Self = 0.0;
            const TYPE_TAG: &'static str = $tag;
            const SIZE: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }

            #[inline]
            fn from_usize(n: usize) -> Self {
                n as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline]
            fn extend_le_bytes(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn from_le_chunk(chunk: &[u8]) -> Option<Self> {
                chunk.try_into().ok().map(<$ty>::from_le_bytes)
            }
        }
    };
}

impl_float!(f32, "f32");
impl_float!(f64, "f64");
