// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Ensemble Filtered Activity
//!
//! A bank of independently parameterised leaky-integrator filters over
//! neuron output activity. Each filter keeps one s16.15 trace per neuron;
//! learning rules read and add to these traces between timesteps, and the
//! bank decays all of them once per timestep.
//!
//! ## Lifecycle
//! 1. [`FilteredActivity::initialise`] parses the configuration region,
//!    allocates and zeroes state through a [`ScopedAllocator`]
//! 2. [`FilteredActivity::step`] runs once per timestep, never allocates and
//!    never fails
//!
//! A bank only exists once initialisation succeeded, so stepping an
//! uninitialised bank is not expressible.
//!
//! ## Configuration region (32-bit little-endian words)
//!
//! ```text
//! word 0            num_filters
//! word 1 + 2f       decay of filter f            (s16.15)
//! word 2 + 2f       1 - decay of filter f        (s16.15, informational)
//! ```
//!
//! ## Example
//! ```
//! use ensemble_npu_filtered_activity::FilteredActivity;
//! use ensemble_npu_neural::Accum;
//! use ensemble_npu_runtime::HeapAllocator;
//!
//! let region = [1, Accum::HALF.to_word(), Accum::HALF.one_minus().to_word()];
//! let mut bank = FilteredActivity::initialise(&region, 4, &mut HeapAllocator::new()).unwrap();
//!
//! bank.activity_mut(0)[2] = Accum::ONE; // a spike from neuron 2
//! bank.step(4);
//! assert_eq!(bank.activity(0)[2], Accum::HALF);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod filter_bank;
pub mod parameters;
pub mod region;

// Re-export key types
pub use error::{AllocationSite, FilterError, Result};
pub use filter_bank::FilteredActivity;
pub use parameters::ActivityFilterParameters;
pub use region::FilteredActivityRegion;

pub use ensemble_npu_runtime::ScopedAllocator;
