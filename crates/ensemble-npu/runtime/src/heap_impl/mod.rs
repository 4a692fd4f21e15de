// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Ensemble Runtime - Heap
//!
//! Allocation adapter for targets with a global allocator and no fixed
//! memory budget (desktop simulation, hosts with large SDRAM).
//!
//! ## Features
//! - ✅ Fallible reservation (`Vec::try_reserve_exact`)
//! - ✅ Request and byte accounting
//! - ✅ `no_std` + `alloc`

use alloc::vec::Vec;

use tracing::{trace, warn};

use crate::traits::allocator::checked_request_bytes;
use crate::traits::{Result, RuntimeError, ScopedAllocator};

/// Scoped allocator backed by the global heap
#[derive(Debug, Default, Clone)]
pub struct HeapAllocator {
    requests: usize,
    bytes_reserved: usize,
}

impl HeapAllocator {
    /// Create an allocator with zeroed statistics
    pub const fn new() -> Self {
        Self {
            requests: 0,
            bytes_reserved: 0,
        }
    }

    /// Number of allocation requests seen, successful or not
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Total bytes reserved by successful requests
    pub fn bytes_reserved(&self) -> usize {
        self.bytes_reserved
    }
}

impl ScopedAllocator for HeapAllocator {
    fn allocate<T>(&mut self, len: usize) -> Result<Vec<T>> {
        self.requests += 1;
        let bytes = checked_request_bytes::<T>(len)?;

        let mut buffer = Vec::new();
        if buffer.try_reserve_exact(len).is_err() {
            warn!(len, bytes, "Heap allocation failed");
            return Err(RuntimeError::OutOfMemory {
                requested_bytes: bytes,
            });
        }

        self.bytes_reserved += bytes;
        trace!(len, bytes, "Heap allocation");
        Ok(buffer)
    }

    fn memory_limit(&self) -> Option<usize> {
        None
    }

    fn platform_name(&self) -> &'static str {
        "Heap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_reserves_exact_capacity() {
        let mut heap = HeapAllocator::new();
        let buffer: Vec<u32> = heap.allocate(16).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 16);
        assert_eq!(heap.requests(), 1);
        assert_eq!(heap.bytes_reserved(), 64);
    }

    #[test]
    fn test_allocate_zeroed_and_copy() {
        let mut heap = HeapAllocator::new();
        let zeros: Vec<i32> = heap.allocate_zeroed(4).unwrap();
        assert_eq!(zeros, [0, 0, 0, 0]);

        let copy = heap.allocate_copy(&[3_u16, 1, 2]).unwrap();
        assert_eq!(copy, [3, 1, 2]);
        assert_eq!(heap.requests(), 2);
        assert_eq!(heap.bytes_reserved(), 16 + 6);
    }

    #[test]
    fn test_zero_length_allocation_succeeds() {
        let mut heap = HeapAllocator::new();
        let buffer: Vec<u64> = heap.allocate_zeroed(0).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(heap.bytes_reserved(), 0);
    }

    #[test]
    fn test_impossible_request_is_reported() {
        let mut heap = HeapAllocator::new();
        let result: Result<Vec<u32>> = heap.allocate(usize::MAX / 2);
        assert!(matches!(result, Err(RuntimeError::OutOfMemory { .. })));
        assert_eq!(heap.bytes_reserved(), 0);
    }

    #[test]
    fn test_no_memory_limit() {
        assert_eq!(HeapAllocator::new().memory_limit(), None);
    }
}
