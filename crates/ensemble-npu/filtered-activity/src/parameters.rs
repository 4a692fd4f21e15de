// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-filter parameter record

use bytemuck::{Pod, Zeroable};
use ensemble_npu_neural::Accum;

/// Parameters of one activity filter, in configuration-region layout
///
/// Two consecutive 32-bit words. Records are copied verbatim from the region,
/// so field order and `#[repr(C)]` are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct ActivityFilterParameters {
    /// Fraction of the previous trace retained per step
    pub decay: Accum,

    /// `1 - decay`; carried and logged, not used by the step
    pub one_minus_decay: Accum,
}

impl ActivityFilterParameters {
    /// Size of one record in region words
    pub const WORDS: usize = 2;

    /// Build a record with a consistent complement
    pub const fn from_decay(decay: Accum) -> Self {
        Self {
            decay,
            one_minus_decay: decay.one_minus(),
        }
    }

    /// Region words for this record
    pub const fn to_words(self) -> [u32; Self::WORDS] {
        [self.decay.to_word(), self.one_minus_decay.to_word()]
    }
}
