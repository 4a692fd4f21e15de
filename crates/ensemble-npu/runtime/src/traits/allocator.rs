// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scoped allocation trait
//!
//! ## Design Philosophy
//!
//! - **Checked**: every request returns a `Result`; exhaustion is reported,
//!   never turned into an abort
//! - **Exact**: buffers are reserved for exactly the requested length, so
//!   filling them never reallocates
//! - **Setup-only**: callers allocate while initialising and hold the buffers
//!   for the rest of the run

use alloc::vec::Vec;
use core::mem;

use bytemuck::Zeroable;

use crate::traits::error::{Result, RuntimeError};

/// Allocator used by components while they are being set up
///
/// Implementors only provide [`allocate`](ScopedAllocator::allocate); the
/// zeroing and copying variants build on it.
///
/// # Example
///
/// ```ignore
/// // An allocator that refuses everything
/// pub struct NoMemory;
///
/// impl ScopedAllocator for NoMemory {
///     fn allocate<T>(&mut self, len: usize) -> Result<Vec<T>> {
///         Err(RuntimeError::OutOfMemory { requested_bytes: request_bytes::<T>(len).unwrap_or(usize::MAX) })
///     }
///
///     fn memory_limit(&self) -> Option<usize> { Some(0) }
/// }
/// ```
pub trait ScopedAllocator {
    /// Reserve an empty vector with capacity for exactly `len` elements
    fn allocate<T>(&mut self, len: usize) -> Result<Vec<T>>;

    /// Reserve `len` elements and fill them with the all-zero bit pattern
    fn allocate_zeroed<T: Zeroable + Copy>(&mut self, len: usize) -> Result<Vec<T>> {
        let mut buffer = self.allocate(len)?;
        buffer.resize(len, T::zeroed());
        Ok(buffer)
    }

    /// Reserve `src.len()` elements and copy `src` into them, preserving order
    fn allocate_copy<T: Copy>(&mut self, src: &[T]) -> Result<Vec<T>> {
        let mut buffer = self.allocate(src.len())?;
        buffer.extend_from_slice(src);
        Ok(buffer)
    }

    /// Platform memory limit in bytes (None = unlimited)
    fn memory_limit(&self) -> Option<usize>;

    /// Platform name for logging/debugging
    fn platform_name(&self) -> &'static str {
        "Generic Allocator"
    }
}

impl<A: ScopedAllocator> ScopedAllocator for &mut A {
    fn allocate<T>(&mut self, len: usize) -> Result<Vec<T>> {
        (**self).allocate(len)
    }

    fn memory_limit(&self) -> Option<usize> {
        (**self).memory_limit()
    }

    fn platform_name(&self) -> &'static str {
        (**self).platform_name()
    }
}

/// Bytes needed for `len` elements of `T`, or `None` on overflow
#[inline]
pub fn request_bytes<T>(len: usize) -> Option<usize> {
    len.checked_mul(mem::size_of::<T>())
}

/// Bytes needed for `len` elements of `T`, as an allocation error on overflow
#[inline]
pub(crate) fn checked_request_bytes<T>(len: usize) -> Result<usize> {
    request_bytes::<T>(len).ok_or(RuntimeError::OutOfMemory {
        requested_bytes: usize::MAX,
    })
}
