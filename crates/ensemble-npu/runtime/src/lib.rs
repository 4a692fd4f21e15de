// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # Ensemble Runtime Allocation
//!
//! Checked, setup-time allocation for neural state.
//!
//! This crate provides:
//! - **Trait** (always available): [`ScopedAllocator`], the seam every
//!   setup-time allocation goes through
//! - **Heap implementation**: [`HeapAllocator`], backed by the global allocator
//!   with fallible reservation
//! - **Embedded implementation**: [`BudgetAllocator`], which enforces a fixed
//!   byte budget (a core's local data memory) before touching the heap
//!
//! Allocation only happens while a component is being set up. Once a
//! component reports ready, its per-timestep path never allocates.
//!
//! ## Usage
//!
//! ```rust
//! use ensemble_npu_runtime::{BudgetAllocator, ScopedAllocator};
//!
//! let mut dtcm = BudgetAllocator::new(64 * 1024);
//! let state: Vec<u32> = dtcm.allocate_zeroed(128).unwrap();
//! assert_eq!(state.len(), 128);
//! assert_eq!(dtcm.remaining_bytes(), 64 * 1024 - 512);
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Traits module (always available)
pub mod traits;

pub use traits::{Result, RuntimeError, ScopedAllocator};

pub mod heap_impl;

pub use heap_impl::HeapAllocator;

pub mod embedded_impl;

pub use embedded_impl::BudgetAllocator;
