// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Types Module
//!
//! Core value types for fixed-point neural processing.

pub mod numeric;

pub use numeric::{Accum, AccumFixed};
