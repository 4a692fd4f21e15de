// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Ensemble Neural Values (Platform-Agnostic)
//!
//! Numeric building blocks shared by every per-timestep kernel:
//! - **Types**: the s16.15 fixed-point [`Accum`] value
//! - **Dynamics**: pure decay kernels over slices of values
//!
//! ## Target Platforms
//! - ✅ Embedded cores without an FPU (no_std)
//! - ✅ Desktop (Linux, macOS, Windows) for host-side simulation and tests

#![cfg_attr(not(feature = "std"), no_std)]

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub mod dynamics;

pub use dynamics::*;

pub use types::{Accum, AccumFixed};
