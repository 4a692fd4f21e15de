// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point value type for neural state on FPU-less cores
//!
//! [`Accum`] is a signed 32-bit value with 15 fractional bits (s16.15), the
//! native `accum` layout of the target cores. It is the only numeric type used
//! by per-timestep kernels and by configuration records.
//!
//! ## Arithmetic rules
//!
//! | Operation | Rule |
//! |-----------|------|
//! | `a * b`   | 64-bit product divided by 2^15, truncated toward zero, saturated |
//! | `a + b`, `a - b`, `-a` | saturating |
//! | `from_num` | saturating, host-side setup only |
//!
//! Truncation toward zero means repeated multiplication by a factor in
//! `[0, 1)` moves any value monotonically to exactly zero, from either sign,
//! without oscillation.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use fixed::traits::{FromFixed, ToFixed};

/// `fixed` representation with the same bit layout as [`Accum`]
pub type AccumFixed = fixed::types::I17F15;

/// s16.15 fixed-point value
///
/// `#[repr(transparent)]` over `i32`, so configuration words and state arrays
/// can be reinterpreted without copying.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Accum(pub i32);

impl Accum {
    /// Number of fractional bits
    pub const FRAC_BITS: u32 = 15;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    pub const HALF: Self = Self(1 << (Self::FRAC_BITS - 1));

    /// Smallest positive value (2^-15)
    pub const DELTA: Self = Self(1);

    pub const MAX: Self = Self(i32::MAX);
    pub const MIN: Self = Self(i32::MIN);

    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Reinterpret a raw 32-bit configuration word
    #[inline]
    pub const fn from_word(word: u32) -> Self {
        Self(word as i32)
    }

    #[inline]
    pub const fn to_word(self) -> u32 {
        self.0 as u32
    }

    /// Smallest whole number representable
    pub const MIN_INT: i32 = -(1 << 16);
    /// Largest whole number representable
    pub const MAX_INT: i32 = (1 << 16) - 1;

    /// Exact conversion from a whole number in `MIN_INT..=MAX_INT`
    #[inline]
    pub const fn from_int(value: i32) -> Self {
        debug_assert!(value >= Self::MIN_INT && value <= Self::MAX_INT);
        Self(value << Self::FRAC_BITS)
    }

    /// Saturating conversion from any number `fixed` understands
    ///
    /// Intended for host-side setup and tests; floating-point sources are
    /// rounded to the nearest representable value.
    ///
    /// # Example
    /// ```
    /// use ensemble_npu_neural::Accum;
    ///
    /// assert_eq!(Accum::from_num(0.25), Accum::from_bits(8192));
    /// assert_eq!(Accum::from_num(1e9), Accum::MAX);
    /// ```
    #[inline]
    pub fn from_num<Src: ToFixed>(src: Src) -> Self {
        Self(AccumFixed::saturating_from_num(src).to_bits())
    }

    #[inline]
    pub fn to_num<Dst: FromFixed>(self) -> Dst {
        self.to_fixed().to_num()
    }

    #[inline]
    pub const fn to_fixed(self) -> AccumFixed {
        AccumFixed::from_bits(self.0)
    }

    /// Fixed-point multiply, truncating toward zero
    ///
    /// # Example
    /// ```
    /// use ensemble_npu_neural::Accum;
    ///
    /// let v = Accum::from_int(4);
    /// assert_eq!(v.mul_trunc(Accum::HALF), Accum::from_int(2));
    ///
    /// // -2^-15 * 0.5 truncates to zero instead of staying at -2^-15
    /// assert_eq!((-Accum::DELTA).mul_trunc(Accum::HALF), Accum::ZERO);
    /// ```
    #[inline(always)]
    pub fn mul_trunc(self, rhs: Self) -> Self {
        let product = i64::from(self.0) * i64::from(rhs.0);
        let scaled = product / (1_i64 << Self::FRAC_BITS);
        Self(scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    #[inline]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// `1 - self`, the complement of a decay factor
    #[inline]
    pub const fn one_minus(self) -> Self {
        Self::ONE.saturating_sub(self)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<AccumFixed> for Accum {
    #[inline]
    fn from(value: AccumFixed) -> Self {
        Self(value.to_bits())
    }
}

impl From<Accum> for AccumFixed {
    #[inline]
    fn from(value: Accum) -> Self {
        value.to_fixed()
    }
}

impl Mul for Accum {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.mul_trunc(rhs)
    }
}

impl MulAssign for Accum {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_trunc(rhs);
    }
}

impl Add for Accum {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Accum {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Accum {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Accum {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.saturating_sub(rhs);
    }
}

impl Neg for Accum {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl fmt::Display for Accum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_fixed(), f)
    }
}

impl fmt::Debug for Accum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accum({})", self.to_fixed())
    }
}
