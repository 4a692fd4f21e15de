// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that values are in range and consistent with each other. Every
//! problem is collected before reporting.

use crate::{ConfigError, ConfigResult, EnsembleConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
    BudgetExceedsTimestep { step_budget_us: u32, dt_us: u32 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::BudgetExceedsTimestep {
                step_budget_us,
                dt_us,
            } => write!(
                f,
                "timestep.step_budget_us = {} exceeds timestep.dt_us = {}",
                step_budget_us, dt_us
            ),
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &EnsembleConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation problem in `config`, in section order
pub fn collect_errors(config: &EnsembleConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.system.log_level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.system.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.filtered_activity.region_path.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "filtered_activity.region_path".to_string(),
        });
    }

    let timestep = &config.timestep;
    if timestep.dt_us == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "timestep.dt_us".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    if timestep.step_budget_us == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "timestep.step_budget_us".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    } else if timestep.dt_us > 0 && timestep.step_budget_us > timestep.dt_us {
        errors.push(ConfigValidationError::BudgetExceedsTimestep {
            step_budget_us: timestep.step_budget_us,
            dt_us: timestep.dt_us,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&EnsembleConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_neurons_is_allowed() {
        let mut config = EnsembleConfig::default();
        config.filtered_activity.n_neurons = 0;
        assert!(collect_errors(&config).is_empty());
    }

    #[test]
    fn test_budget_larger_than_timestep() {
        let mut config = EnsembleConfig::default();
        config.timestep.step_budget_us = config.timestep.dt_us + 1;

        assert_eq!(
            collect_errors(&config),
            vec![ConfigValidationError::BudgetExceedsTimestep {
                step_budget_us: 1001,
                dt_us: 1000,
            }]
        );
    }

    #[test]
    fn test_all_errors_are_reported() {
        let mut config = EnsembleConfig::default();
        config.system.log_level = "verbose".to_string();
        config.filtered_activity.region_path = PathBuf::new();
        config.timestep.dt_us = 0;
        config.timestep.step_budget_us = 0;

        assert_eq!(collect_errors(&config).len(), 4);

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("system.log_level"));
        assert!(message.contains("filtered_activity.region_path"));
        assert!(message.contains("timestep.dt_us"));
        assert!(message.contains("timestep.step_budget_us"));
    }
}
