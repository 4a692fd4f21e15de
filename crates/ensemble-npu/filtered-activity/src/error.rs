// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for filter bank initialisation
//!
//! Only initialisation can fail. The per-timestep step has no error path.

use core::fmt;

use ensemble_npu_runtime::RuntimeError;

/// Which allocation of the filter bank failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationSite {
    /// The parameter record array
    Parameters,
    /// The array of per-filter state handles
    ActivityHandles,
    /// The per-neuron state array of one filter
    Activity { filter: usize },
}

impl fmt::Display for AllocationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationSite::Parameters => write!(f, "filter parameters"),
            AllocationSite::ActivityHandles => write!(f, "filtered activity handles"),
            AllocationSite::Activity { filter } => {
                write!(f, "filtered activity of filter {}", filter)
            }
        }
    }
}

/// Filter bank initialisation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A setup allocation could not be satisfied; initialisation was aborted
    AllocationFailure {
        site: AllocationSite,
        source: RuntimeError,
    },

    /// The configuration region ends before the declared parameter records
    TruncatedRegion {
        required_words: usize,
        available_words: usize,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::AllocationFailure { site, source } => {
                write!(f, "Failed to allocate {}: {}", site, source)
            }
            FilterError::TruncatedRegion {
                required_words,
                available_words,
            } => write!(
                f,
                "Filtered activity region truncated: requires {} words, found {}",
                required_words, available_words
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::AllocationFailure { source, .. } => Some(source),
            FilterError::TruncatedRegion { .. } => None,
        }
    }
}

/// Result type for filter bank operations
pub type Result<T> = core::result::Result<T, FilterError>;

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_failing_filter() {
        let err = FilterError::AllocationFailure {
            site: AllocationSite::Activity { filter: 3 },
            source: RuntimeError::OutOfMemory {
                requested_bytes: 400,
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to allocate filtered activity of filter 3: Out of memory: requested 400 bytes"
        );
    }

    #[test]
    fn test_source_chains_to_runtime_error() {
        use std::error::Error;

        let err = FilterError::AllocationFailure {
            site: AllocationSite::Parameters,
            source: RuntimeError::CapacityExceeded {
                requested: 16,
                available: 8,
            },
        };
        assert!(err.source().is_some());
    }
}
