// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `ensemble_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnsembleConfig {
    pub system: SystemConfig,
    pub filtered_activity: FilteredActivityConfig,
    pub timestep: TimestepConfig,
    pub memory: MemoryConfig,
}

/// System-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Filter bank setup
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilteredActivityConfig {
    /// Neurons per filter; must match the ensemble being simulated
    pub n_neurons: usize,
    /// Binary configuration region (little-endian 32-bit words)
    pub region_path: PathBuf,
    /// Decay filters on the rayon pool instead of inline
    pub parallel_step: bool,
}

impl Default for FilteredActivityConfig {
    fn default() -> Self {
        Self {
            n_neurons: 100,
            region_path: PathBuf::from("filtered_activity.bin"),
            parallel_step: false,
        }
    }
}

/// Simulation timestep and the share of it the filter step may use
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimestepConfig {
    /// Simulation timestep in microseconds (default: 1 ms)
    pub dt_us: u32,
    /// Worst-case time the filter step may take per timestep
    pub step_budget_us: u32,
    /// Timesteps to run
    pub steps: u32,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            dt_us: 1000,
            step_budget_us: 100,
            steps: 1000,
        }
    }
}

/// Memory available to the filter bank
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Byte budget for all filter bank allocations (0 = unlimited)
    pub budget_bytes: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            budget_bytes: 64 * 1024,
        }
    }
}

impl MemoryConfig {
    /// Budget in bytes, `None` when unlimited
    pub fn budget(&self) -> Option<usize> {
        (self.budget_bytes > 0).then_some(self.budget_bytes)
    }
}
