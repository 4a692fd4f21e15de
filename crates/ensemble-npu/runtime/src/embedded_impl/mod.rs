// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Ensemble Runtime - Embedded (fixed memory budget)
//!
//! Allocation adapter for cores with a small, fixed data memory.
//!
//! ## Features
//! - ✅ `no_std` compatible
//! - ✅ Byte budget enforced before the heap is touched
//! - ✅ Deterministic failure point for a given configuration
//!
//! ## Targets
//! - ARM968 application cores (64 KB local data memory)
//! - ARM Cortex-M / RISC-V microcontrollers

pub mod budget;

pub use budget::BudgetAllocator;

/// Local data memory of a typical application core (64 KB)
pub const DEFAULT_DTCM_BYTES: usize = 64 * 1024;
