// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ensemble-observability
//!
//! Console logging for the ensemble crates with per-crate debug flags.
//!
//! The library crates only emit `tracing` events; binaries call
//! [`init_logging`] once to install a subscriber.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known ensemble crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "ensemble",
    "ensemble-config",
    "ensemble-npu-neural",
    "ensemble-npu-runtime",
    "ensemble-npu-filtered-activity",
];

/// Tracing target for a crate name (`ensemble-npu-runtime` -> `ensemble_npu_runtime`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_target() {
        assert_eq!(
            crate_target("ensemble-npu-filtered-activity"),
            "ensemble_npu_filtered_activity"
        );
        assert_eq!(crate_target("ensemble"), "ensemble");
    }
}
