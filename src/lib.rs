// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Ensemble
//!
//! Filtered neuron activity for learning rules running on memory-constrained
//! neuromorphic cores. This umbrella crate re-exports the workspace members
//! and adds the host-side pieces the `step_budget` tool is built from.
//!
//! ## Crates
//!
//! - **`neural`**: s16.15 [`Accum`](neural::Accum) value type and decay kernels (no_std)
//! - **`runtime`**: [`ScopedAllocator`](runtime::ScopedAllocator) seam with heap
//!   and byte-budget implementations (no_std + alloc)
//! - **`filtered_activity`**: the filter bank
//! - **`config`**: TOML configuration with environment and CLI overrides
//! - **`observability`**: logging setup and per-crate debug flags
//!
//! ## Usage
//!
//! ```rust
//! use ensemble::prelude::*;
//!
//! let region = [
//!     2,
//!     Accum::HALF.to_word(), Accum::HALF.one_minus().to_word(),
//!     Accum::from_num(0.25).to_word(), Accum::from_num(0.75).to_word(),
//! ];
//! let mut dtcm = BudgetAllocator::new(4 * 1024);
//! let mut bank = FilteredActivity::initialise(&region, 3, &mut dtcm)?;
//!
//! bank.activity_mut(0).fill(Accum::from_int(4));
//! bank.activity_mut(1).fill(Accum::from_int(8));
//! bank.step(3);
//! assert_eq!(bank.activity(1), &[Accum::from_int(2); 3]);
//! # Ok::<(), FilterError>(())
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use ensemble_config as config;
pub use ensemble_npu_filtered_activity as filtered_activity;
pub use ensemble_npu_neural as neural;
pub use ensemble_npu_runtime as runtime;
pub use ensemble_observability as observability;

pub mod driver;
pub mod region_file;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{load_config, validate_config, EnsembleConfig};
    pub use crate::driver::{build_bank, run_steps, StepReport};
    pub use crate::filtered_activity::{
        ActivityFilterParameters, AllocationSite, FilterError, FilteredActivity,
    };
    pub use crate::neural::{Accum, AccumFixed};
    pub use crate::region_file::{
        read_region_file, words_from_le_bytes, words_to_le_bytes, write_region_file,
    };
    pub use crate::runtime::{BudgetAllocator, HeapAllocator, RuntimeError, ScopedAllocator};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let bank = FilteredActivity::empty();
        assert_eq!(bank.num_filters(), 0);
        assert_eq!(Accum::ONE.to_bits(), 1 << 15);
    }

    #[test]
    fn test_members_share_workspace_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert_eq!(crate::neural::VERSION, version);
        assert_eq!(crate::runtime::VERSION, version);
        assert_eq!(crate::filtered_activity::VERSION, version);
        assert_eq!(crate::config::VERSION, version);
        assert_eq!(crate::observability::VERSION, version);
    }
}
