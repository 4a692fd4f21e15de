// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read-only view of the filtered activity configuration region

use crate::error::{FilterError, Result};
use crate::parameters::ActivityFilterParameters;

/// Parsed view over a configuration region
///
/// Borrows the region; parameter records are reinterpreted in place and only
/// copied when a bank is initialised.
#[derive(Debug, Clone, Copy)]
pub struct FilteredActivityRegion<'a> {
    parameters: &'a [ActivityFilterParameters],
}

impl<'a> FilteredActivityRegion<'a> {
    /// Parse the filter count and parameter records from region words
    ///
    /// Words after the last declared record are ignored.
    pub fn parse(words: &'a [u32]) -> Result<Self> {
        let (&num_filters, records) = words.split_first().ok_or(FilterError::TruncatedRegion {
            required_words: 1,
            available_words: 0,
        })?;

        let record_words = (num_filters as usize).saturating_mul(ActivityFilterParameters::WORDS);
        let records = records
            .get(..record_words)
            .ok_or(FilterError::TruncatedRegion {
                required_words: record_words.saturating_add(1),
                available_words: words.len(),
            })?;

        Ok(Self {
            parameters: bytemuck::cast_slice(records),
        })
    }

    /// Number of words a region with `num_filters` filters occupies
    pub const fn words_required(num_filters: usize) -> usize {
        1 + num_filters * ActivityFilterParameters::WORDS
    }

    pub fn num_filters(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameter records in filter-index order
    pub fn parameters(&self) -> &'a [ActivityFilterParameters] {
        self.parameters
    }
}
