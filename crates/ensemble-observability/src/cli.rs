// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-ensemble-npu-runtime` and `--debug-all`.

use std::collections::BTreeSet;
use std::env;

use crate::{crate_target, KNOWN_CRATES};

/// Environment variable holding comma-separated crate names, or `all`
pub const DEBUG_ENV: &str = "ENSEMBLE_DEBUG";

/// Crates whose debug output is enabled
///
/// # Example
/// ```rust
/// use ensemble_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(["--debug-ensemble-npu-runtime".to_string()]);
/// assert!(flags.is_enabled("ensemble-npu-runtime"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`; `--debug-all`
    /// enables every crate in [`KNOWN_CRATES`]. Other arguments are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Self::default();
        for arg in args {
            match arg.strip_prefix("--debug-") {
                Some("all") => flags.enable_all(),
                Some(crate_name) if !crate_name.is_empty() => flags.enable(crate_name),
                _ => {}
            }
        }
        flags
    }

    /// Add crates named in an `ENSEMBLE_DEBUG`-style value
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .for_each(|name| self.enable(name));
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled_crates.iter().map(String::as_str)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Build an `EnvFilter` directive string
    ///
    /// `default_level` applies to everything not explicitly enabled, e.g.
    /// `"ensemble_npu_runtime=debug,info"`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|name| format!("{}=debug", crate_target(name)))
            .chain(std::iter::once(default_level.to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Debug flags from the process arguments and `ENSEMBLE_DEBUG`
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&value);
    }
    flags
}
