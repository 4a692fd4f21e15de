// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Allocation abstraction for setup-time neural state
//!
//! Components never call the global allocator directly during setup.
//! They go through [`ScopedAllocator`] so that:
//! - every request is checked and reported instead of aborting the process
//! - platforms can impose a memory budget (embedded cores)
//! - tests can inject failures at a chosen request

pub mod allocator;
pub mod error;

// Re-export key types
pub use allocator::ScopedAllocator;
pub use error::{Result, RuntimeError};
