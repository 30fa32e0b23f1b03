//! Capability traits for index and value types, and the overflow policies.
//!
//! A [`RunArray`](crate::RunArray) is generic over three parameters:
//! - an index type implementing [`Key`] (the integer domain),
//! - a value type (any `Clone + PartialEq`; numeric reductions additionally
//!   require [`Arithmetic`]),
//! - an [`OverflowPolicy`] selecting how index offsets and numeric reductions
//!   behave on overflow.
//!
//! The policy is a zero-sized type chosen at instantiation, so the default
//! [`Wrapping`] policy costs nothing over native arithmetic.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Numeric capability used by index arithmetic and by numeric reductions.
///
/// Integer implementations forward to the inherent `checked_*` / `wrapping_*`
/// methods. Float implementations treat an overflow to infinity from finite
/// operands as the checked failure case, and "wrapping" is plain IEEE arithmetic.
pub trait Arithmetic: Copy + PartialOrd + Debug {
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    fn checked_div(self, rhs: Self) -> Option<Self>;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    /// # Panics
    /// Integer implementations panic on division by zero.
    fn wrapping_div(self, rhs: Self) -> Self;

    /// Convert an element count into this type (`as` cast semantics).
    fn from_len(len: usize) -> Self;
}

/// An integer index type usable as the domain of a [`RunArray`](crate::RunArray).
pub trait Key: Arithmetic + Ord + Hash + Display {
    /// Reinterpret a wrapped distance `to - from` (with `from <= to`) as an
    /// element count. Signed keys go through the unsigned type of the same
    /// width, so distances beyond `Self::MAX` keep their magnitude.
    fn to_len(self) -> usize;

    /// `self + len`, or `None` if the result is not representable.
    fn checked_add_len(self, len: usize) -> Option<Self>;
    /// `self - len`, or `None` if the result is not representable.
    fn checked_sub_len(self, len: usize) -> Option<Self>;
    /// `self + len` modulo the key width.
    fn wrapping_add_len(self, len: usize) -> Self;
    /// `self - len` modulo the key width.
    fn wrapping_sub_len(self, len: usize) -> Self;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {$(
        impl Arithmetic for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> { <$t>::checked_add(self, rhs) }
            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> { <$t>::checked_sub(self, rhs) }
            #[inline]
            fn checked_mul(self, rhs: Self) -> Option<Self> { <$t>::checked_mul(self, rhs) }
            #[inline]
            fn checked_div(self, rhs: Self) -> Option<Self> { <$t>::checked_div(self, rhs) }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self { <$t>::wrapping_add(self, rhs) }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self { <$t>::wrapping_sub(self, rhs) }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self { <$t>::wrapping_mul(self, rhs) }
            #[inline]
            fn wrapping_div(self, rhs: Self) -> Self { <$t>::wrapping_div(self, rhs) }
            #[inline]
            fn from_len(len: usize) -> Self { len as $t }
        }
    )*};
}

macro_rules! impl_signed_key {
    ($($t:ty => $u:ty),* $(,)?) => {$(
        impl Key for $t {
            #[inline]
            fn to_len(self) -> usize { self as $u as usize }
            #[inline]
            fn checked_add_len(self, len: usize) -> Option<Self> {
                <$u>::try_from(len).ok().and_then(|n| self.checked_add_unsigned(n))
            }
            #[inline]
            fn checked_sub_len(self, len: usize) -> Option<Self> {
                <$u>::try_from(len).ok().and_then(|n| self.checked_sub_unsigned(n))
            }
            #[inline]
            fn wrapping_add_len(self, len: usize) -> Self { self.wrapping_add_unsigned(len as $u) }
            #[inline]
            fn wrapping_sub_len(self, len: usize) -> Self { self.wrapping_sub_unsigned(len as $u) }
        }
    )*};
}

macro_rules! impl_unsigned_key {
    ($($t:ty),* $(,)?) => {$(
        impl Key for $t {
            #[inline]
            fn to_len(self) -> usize { self as usize }
            #[inline]
            fn checked_add_len(self, len: usize) -> Option<Self> {
                <$t>::try_from(len).ok().and_then(|n| self.checked_add(n))
            }
            #[inline]
            fn checked_sub_len(self, len: usize) -> Option<Self> {
                <$t>::try_from(len).ok().and_then(|n| self.checked_sub(n))
            }
            #[inline]
            fn wrapping_add_len(self, len: usize) -> Self { <$t>::wrapping_add(self, len as $t) }
            #[inline]
            fn wrapping_sub_len(self, len: usize) -> Self { <$t>::wrapping_sub(self, len as $t) }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),* $(,)?) => {$(
        impl Arithmetic for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> { finite_or_none(self, rhs, self + rhs) }
            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> { finite_or_none(self, rhs, self - rhs) }
            #[inline]
            fn checked_mul(self, rhs: Self) -> Option<Self> { finite_or_none(self, rhs, self * rhs) }
            #[inline]
            fn checked_div(self, rhs: Self) -> Option<Self> {
                if rhs == 0.0 { None } else { finite_or_none(self, rhs, self / rhs) }
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self { self + rhs }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self { self - rhs }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self { self * rhs }
            #[inline]
            fn wrapping_div(self, rhs: Self) -> Self { self / rhs }
            #[inline]
            fn from_len(len: usize) -> Self { len as $t }
        }
    )*};
}

#[inline]
fn finite_or_none<T: Arithmetic>(a: T, b: T, result: T) -> Option<T> {
    let finite = |x: T| x >= T::MIN && x <= T::MAX;
    // NaN compares false everywhere; let it propagate rather than saturate.
    if finite(a) && finite(b) && !finite(result) && result == result {
        None
    } else {
        Some(result)
    }
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_signed_key!(i32 => u32, i64 => u64, isize => usize);
impl_unsigned_key!(u32, u64, usize);
impl_float!(f32, f64);

/// Overflow behaviour for index offsets and numeric reductions.
pub trait OverflowPolicy: Copy + Clone + Debug + Default + PartialEq + Eq + 'static {
    fn add<T: Arithmetic>(a: T, b: T) -> T;
    fn sub<T: Arithmetic>(a: T, b: T) -> T;
    fn mul<T: Arithmetic>(a: T, b: T) -> T;
    fn div<T: Arithmetic>(a: T, b: T) -> T;

    /// Move `index` by `len` positions (right if `forward`). `None` means the
    /// policy refuses a result that does not fit the key type.
    fn offset<K: Key>(index: K, len: usize, forward: bool) -> Option<K>;

    /// `base` raised to `exp` by square-and-multiply under this policy.
    fn pow<T: Arithmetic>(base: T, mut exp: usize) -> T {
        let mut result = T::ONE;
        let mut square = base;
        while exp > 0 {
            if exp & 1 == 1 {
                result = Self::mul(result, square);
            }
            exp >>= 1;
            if exp > 0 {
                square = Self::mul(square, square);
            }
        }
        result
    }
}

/// Native arithmetic: integers wrap, floats follow IEEE rules.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Wrapping;

/// Saturating arithmetic: results clamp to the type's minimum or maximum.
///
/// Division by zero saturates by the sign of the dividend (zero stays zero).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Saturating;

impl OverflowPolicy for Wrapping {
    #[inline]
    fn add<T: Arithmetic>(a: T, b: T) -> T {
        a.wrapping_add(b)
    }
    #[inline]
    fn sub<T: Arithmetic>(a: T, b: T) -> T {
        a.wrapping_sub(b)
    }
    #[inline]
    fn mul<T: Arithmetic>(a: T, b: T) -> T {
        a.wrapping_mul(b)
    }
    #[inline]
    fn div<T: Arithmetic>(a: T, b: T) -> T {
        a.wrapping_div(b)
    }
    #[inline]
    fn offset<K: Key>(index: K, len: usize, forward: bool) -> Option<K> {
        Some(if forward {
            index.wrapping_add_len(len)
        } else {
            index.wrapping_sub_len(len)
        })
    }
}

impl OverflowPolicy for Saturating {
    #[inline]
    fn add<T: Arithmetic>(a: T, b: T) -> T {
        a.checked_add(b)
            .unwrap_or(if b > T::ZERO { T::MAX } else { T::MIN })
    }
    #[inline]
    fn sub<T: Arithmetic>(a: T, b: T) -> T {
        a.checked_sub(b)
            .unwrap_or(if b < T::ZERO { T::MAX } else { T::MIN })
    }
    #[inline]
    fn mul<T: Arithmetic>(a: T, b: T) -> T {
        a.checked_mul(b).unwrap_or(if (a < T::ZERO) == (b < T::ZERO) {
            T::MAX
        } else {
            T::MIN
        })
    }
    #[inline]
    fn div<T: Arithmetic>(a: T, b: T) -> T {
        a.checked_div(b).unwrap_or(if b == T::ZERO {
            if a > T::ZERO {
                T::MAX
            } else if a < T::ZERO {
                T::MIN
            } else {
                T::ZERO
            }
        } else {
            // Only MIN / -1 overflows for integers.
            T::MAX
        })
    }
    #[inline]
    fn offset<K: Key>(index: K, len: usize, forward: bool) -> Option<K> {
        if forward {
            index.checked_add_len(len)
        } else {
            index.checked_sub_len(len)
        }
    }
}

/// Thread-safety bounds required by reductions when the `parallel` feature is on.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Send + Sync + ?Sized> MaybeSync for T {}

/// Thread-safety bounds required by reductions when the `parallel` feature is on.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}
