// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Leaky-integrator dynamics
//!
//! Pure functions applying one timestep of exponential decay.
//! Platform-agnostic, works with `no_std`, never allocates.

use crate::types::Accum;

/// Apply one decay step to a single value
///
/// # Formula
/// `v_new = v * decay` (s16.15 multiply, truncation toward zero)
///
/// # Example
/// ```
/// use ensemble_npu_neural::{apply_decay, Accum};
///
/// let mut trace = Accum::from_int(4);
/// apply_decay(&mut trace, Accum::HALF);
/// assert_eq!(trace, Accum::from_int(2));
/// ```
#[inline(always)]
pub fn apply_decay(value: &mut Accum, decay: Accum) {
    *value *= decay;
}

/// Apply one decay step to every value in a slice
///
/// No branches depend on the values, so the loop cost is fixed for a
/// given slice length.
#[inline]
pub fn decay_slice(values: &mut [Accum], decay: Accum) {
    for value in values.iter_mut() {
        apply_decay(value, decay);
    }
}
