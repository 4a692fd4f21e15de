// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Human-readable console output filtered by log level and debug flags.
//! `RUST_LOG`, when set, replaces the computed filter.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

/// Filter for `level` plus per-crate debug overrides
pub fn build_filter(debug_flags: &CrateDebugFlags, level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter '{}'", directives))
}

/// Install the global console subscriber
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `level` - Default level for everything else (`trace` .. `error`)
///
/// # Errors
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_logging(debug_flags: &CrateDebugFlags, level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(debug_flags, level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug_flags.any_enabled())
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
