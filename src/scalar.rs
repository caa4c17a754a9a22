//! Scalar traits shared by the hash map and the sort engine
//!
//! One generic implementation replaces a family of per-primitive copies, so the
//! per-type behavior lives here:
//!
//! - [`ScalarKey`]: hashing and key equality for open-addressing tables
//! - [`NaturalOrder`]: the total order used when a sort is called without a
//!   comparator
//!
//! Floating point keys compare by their canonical bit pattern: every NaN equals
//! every other NaN, and `-0.0` is a different key from `0.0`. The natural order
//! on floats puts `-0.0` before `0.0` and NaN after everything else.

use crate::hash_map::{mix32, mix64};
use std::cmp::Ordering;
use std::fmt::Debug;

/// A fixed-width scalar usable as a hash map key
pub trait ScalarKey: Copy + Default + Debug + 'static {
    /// Mixed hash of the key; the table takes the low bits
    fn key_hash(self) -> u64;

    /// Key equality as seen by the hash table
    fn key_eq(self, other: Self) -> bool;
}

/// Natural ascending order of a scalar type
pub trait NaturalOrder: Copy + Debug + 'static {
    /// Compare two scalars in natural ascending order
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_int_scalar {
    ($mix:ident, $widen:ty; $($t:ty),*) => {
        $(
            impl ScalarKey for $t {
                #[inline]
                fn key_hash(self) -> u64 {
                    $mix(self as $widen) as u64
                }

                #[inline]
                fn key_eq(self, other: Self) -> bool {
                    self == other
                }
            }

            impl NaturalOrder for $t {
                #[inline]
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_int_scalar!(mix32, u32; i8, i16, i32, u8, u16, u32);
impl_int_scalar!(mix64, u64; i64, u64);

impl ScalarKey for char {
    #[inline]
    fn key_hash(self) -> u64 {
        mix32(self as u32) as u64
    }

    #[inline]
    fn key_eq(self, other: Self) -> bool {
        self == other
    }
}

impl NaturalOrder for char {
    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl NaturalOrder for bool {
    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Canonical bits of an `f32`: all NaNs collapse to one pattern
#[inline]
fn f32_bits(value: f32) -> u32 {
    if value.is_nan() {
        f32::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// Canonical bits of an `f64`: all NaNs collapse to one pattern
#[inline]
fn f64_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl ScalarKey for f32 {
    #[inline]
    fn key_hash(self) -> u64 {
        mix32(f32_bits(self)) as u64
    }

    #[inline]
    fn key_eq(self, other: Self) -> bool {
        f32_bits(self) == f32_bits(other)
    }
}

impl NaturalOrder for f32 {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        if self < other {
            Ordering::Less
        } else if self > other {
            Ordering::Greater
        } else {
            // Equal, signed zeros, or NaN: order by canonical bits as signed ints
            (f32_bits(*self) as i32).cmp(&(f32_bits(*other) as i32))
        }
    }
}

impl ScalarKey for f64 {
    #[inline]
    fn key_hash(self) -> u64 {
        mix64(f64_bits(self))
    }

    #[inline]
    fn key_eq(self, other: Self) -> bool {
        f64_bits(self) == f64_bits(other)
    }
}

impl NaturalOrder for f64 {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        if self < other {
            Ordering::Less
        } else if self > other {
            Ordering::Greater
        } else {
            (f64_bits(*self) as i64).cmp(&(f64_bits(*other) as i64))
        }
    }
}
