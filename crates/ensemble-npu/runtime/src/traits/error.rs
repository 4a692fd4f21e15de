// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for runtime allocation

use core::fmt;

/// Runtime errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Request exceeds the platform's remaining memory budget
    CapacityExceeded {
        /// Requested bytes
        requested: usize,
        /// Bytes still available in the budget
        available: usize,
    },

    /// The underlying allocator could not satisfy the request
    OutOfMemory {
        /// Requested bytes (`usize::MAX` when the size computation overflowed)
        requested_bytes: usize,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::CapacityExceeded {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Capacity exceeded: requested {} bytes, available {}",
                    requested, available
                )
            }
            RuntimeError::OutOfMemory { requested_bytes } => {
                write!(f, "Out of memory: requested {} bytes", requested_bytes)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuntimeError {}

/// Result type for runtime operations
pub type Result<T> = core::result::Result<T, RuntimeError>;
