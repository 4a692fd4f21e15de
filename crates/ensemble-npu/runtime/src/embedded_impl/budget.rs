// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Budgeted allocator for embedded systems
//!
//! Tracks every byte handed out against a fixed limit, so a configuration
//! that would not fit in a core's local memory fails during setup on any
//! host, not only on the target.

use alloc::vec::Vec;

use tracing::warn;

use crate::heap_impl::HeapAllocator;
use crate::traits::allocator::checked_request_bytes;
use crate::traits::{Result, RuntimeError, ScopedAllocator};

/// Scoped allocator with a fixed byte budget
///
/// Budget accounting uses the requested size (`len * size_of::<T>()`), not
/// any slack the underlying heap may add.
///
/// # Example
/// ```
/// use ensemble_npu_runtime::{BudgetAllocator, RuntimeError, ScopedAllocator};
///
/// let mut dtcm = BudgetAllocator::new(16);
/// let a: Vec<u32> = dtcm.allocate(3).unwrap();
/// let b: Result<Vec<u32>, _> = dtcm.allocate(2);
/// assert_eq!(b, Err(RuntimeError::CapacityExceeded { requested: 8, available: 4 }));
/// # drop(a);
/// ```
#[derive(Debug, Clone)]
pub struct BudgetAllocator {
    limit_bytes: usize,
    used_bytes: usize,
    requests: usize,
    heap: HeapAllocator,
}

impl BudgetAllocator {
    /// Create an allocator that may hand out at most `limit_bytes`
    pub const fn new(limit_bytes: usize) -> Self {
        Self {
            limit_bytes,
            used_bytes: 0,
            requests: 0,
            heap: HeapAllocator::new(),
        }
    }

    /// Budget configured at construction
    pub fn limit_bytes(&self) -> usize {
        self.limit_bytes
    }

    /// Bytes handed out so far
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Bytes still available
    pub fn remaining_bytes(&self) -> usize {
        self.limit_bytes - self.used_bytes
    }

    /// Number of allocation requests seen, successful or not
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self::new(super::DEFAULT_DTCM_BYTES)
    }
}

impl ScopedAllocator for BudgetAllocator {
    fn allocate<T>(&mut self, len: usize) -> Result<Vec<T>> {
        self.requests += 1;
        let bytes = checked_request_bytes::<T>(len)?;
        let available = self.remaining_bytes();

        if bytes > available {
            warn!(
                requested = bytes,
                available,
                limit = self.limit_bytes,
                "Allocation exceeds memory budget"
            );
            return Err(RuntimeError::CapacityExceeded {
                requested: bytes,
                available,
            });
        }

        let buffer = self.heap.allocate(len)?;
        self.used_bytes += bytes;
        Ok(buffer)
    }

    fn memory_limit(&self) -> Option<usize> {
        Some(self.limit_bytes)
    }

    fn platform_name(&self) -> &'static str {
        "Embedded (budgeted)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_accounting() {
        let mut dtcm = BudgetAllocator::new(100);
        let _a: Vec<u32> = dtcm.allocate_zeroed(10).unwrap();
        assert_eq!(dtcm.used_bytes(), 40);
        assert_eq!(dtcm.remaining_bytes(), 60);

        let _b: Vec<u8> = dtcm.allocate(60).unwrap();
        assert_eq!(dtcm.remaining_bytes(), 0);
    }

    #[test]
    fn test_budget_exceeded_does_not_consume_budget() {
        let mut dtcm = BudgetAllocator::new(10);
        let result: Result<Vec<u32>> = dtcm.allocate(3);
        assert_eq!(
            result,
            Err(RuntimeError::CapacityExceeded {
                requested: 12,
                available: 10
            })
        );
        assert_eq!(dtcm.used_bytes(), 0);
    }

    #[test]
    fn test_rejected_requests_are_counted() {
        let mut dtcm = BudgetAllocator::new(4);
        let rejected: Result<Vec<u32>> = dtcm.allocate(2);
        assert!(rejected.is_err());
        assert_eq!(dtcm.requests(), 1);

        let _fits: Vec<u32> = dtcm.allocate(1).unwrap();
        assert_eq!(dtcm.requests(), 2);
        assert_eq!(dtcm.remaining_bytes(), 0);
    }

    #[test]
    fn test_default_is_dtcm_sized() {
        let dtcm = BudgetAllocator::default();
        assert_eq!(dtcm.memory_limit(), Some(64 * 1024));
        assert_eq!(dtcm.platform_name(), "Embedded (budgeted)");
    }
}
