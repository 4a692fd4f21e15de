// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are resolved in three tiers, later tiers winning:
//! 1. TOML file
//! 2. Environment variables
//! 3. CLI arguments (`section.key=value`)

use crate::{ConfigError, ConfigResult, EnsembleConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ENSEMBLE_CONFIG_PATH";

/// Find the ensemble configuration file
///
/// Search order:
/// 1. `ENSEMBLE_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides keyed by `section.key`
///
/// # Errors
///
/// Returns error if the file is missing, contains invalid TOML, or an override
/// value cannot be parsed. Semantic checks are left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<EnsembleConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: EnsembleConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config)?;

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!("{} = '{}'", key, value))),
    }
}

/// Set one dotted key; returns `Ok(false)` if the key is unknown
fn set_key(config: &mut EnsembleConfig, key: &str, value: &str) -> ConfigResult<bool> {
    match key {
        "system.log_level" => config.system.log_level = value.trim().to_lowercase(),
        "filtered_activity.n_neurons" => config.filtered_activity.n_neurons = parse_value(key, value)?,
        "filtered_activity.region_path" => config.filtered_activity.region_path = PathBuf::from(value),
        "filtered_activity.parallel_step" => {
            config.filtered_activity.parallel_step = parse_bool(key, value)?
        }
        "timestep.dt_us" => config.timestep.dt_us = parse_value(key, value)?,
        "timestep.step_budget_us" => config.timestep.step_budget_us = parse_value(key, value)?,
        "timestep.steps" => config.timestep.steps = parse_value(key, value)?,
        "memory.budget_bytes" => config.memory.budget_bytes = parse_value(key, value)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Environment variables and the keys they override
pub const ENVIRONMENT_OVERRIDES: &[(&str, &str)] = &[
    ("ENSEMBLE_LOG_LEVEL", "system.log_level"),
    ("ENSEMBLE_N_NEURONS", "filtered_activity.n_neurons"),
    ("ENSEMBLE_REGION_PATH", "filtered_activity.region_path"),
    ("ENSEMBLE_PARALLEL_STEP", "filtered_activity.parallel_step"),
    ("ENSEMBLE_DT_US", "timestep.dt_us"),
    ("ENSEMBLE_STEP_BUDGET_US", "timestep.step_budget_us"),
    ("ENSEMBLE_STEPS", "timestep.steps"),
    ("ENSEMBLE_MEMORY_BUDGET_BYTES", "memory.budget_bytes"),
];

/// Apply environment variable overrides to configuration
///
/// See [`ENVIRONMENT_OVERRIDES`] for the supported variables.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a set variable does not parse
pub fn apply_environment_overrides(config: &mut EnsembleConfig) -> ConfigResult<()> {
    for (var, key) in ENVIRONMENT_OVERRIDES {
        if let Ok(value) = env::var(var) {
            set_key(config, key, &value)
                .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}'", var, value)))?;
        }
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// Keys use the TOML path, e.g. `filtered_activity.n_neurons`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for unknown keys or unparsable values
pub fn apply_cli_overrides(
    config: &mut EnsembleConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    for (key, value) in cli_args {
        if !set_key(config, key, value)? {
            return Err(ConfigError::InvalidValue(format!(
                "unknown configuration key '{}'",
                key
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests touching process environment must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for (var, _) in ENVIRONMENT_OVERRIDES {
            env::remove_var(var);
        }
        env::remove_var(CONFIG_PATH_ENV);
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = write_config(
            r#"
            [filtered_activity]
            n_neurons = 256
            region_path = "ensemble/filters.bin"

            [timestep]
            step_budget_us = 50
            "#,
        );

        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.filtered_activity.n_neurons, 256);
        assert_eq!(
            config.filtered_activity.region_path,
            PathBuf::from("ensemble/filters.bin")
        );
        assert_eq!(config.timestep.step_budget_us, 50);
        assert_eq!(config.timestep.dt_us, 1000);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = write_config("[filtered_activity\nn_neurons = 1");
        let err = load_config(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        env::set_var("ENSEMBLE_N_NEURONS", "512");
        env::set_var("ENSEMBLE_PARALLEL_STEP", "true");
        env::set_var("ENSEMBLE_LOG_LEVEL", "DEBUG");

        let mut config = EnsembleConfig::default();
        apply_environment_overrides(&mut config).unwrap();
        clear_env();

        assert_eq!(config.filtered_activity.n_neurons, 512);
        assert!(config.filtered_activity.parallel_step);
        assert_eq!(config.system.log_level, "debug");
    }

    #[test]
    fn test_environment_override_rejects_garbage() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        env::set_var("ENSEMBLE_STEPS", "many");
        let mut config = EnsembleConfig::default();
        let result = apply_environment_overrides(&mut config);
        clear_env();

        match result {
            Err(ConfigError::InvalidValue(msg)) => assert!(msg.contains("ENSEMBLE_STEPS")),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides_win_over_environment() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = write_config("[memory]\nbudget_bytes = 1024\n");
        env::set_var("ENSEMBLE_MEMORY_BUDGET_BYTES", "2048");

        let mut cli = HashMap::new();
        cli.insert("memory.budget_bytes".to_string(), "0".to_string());
        cli.insert("timestep.steps".to_string(), "10".to_string());

        let config = load_config(Some(file.path()), Some(&cli));
        clear_env();
        let config = config.unwrap();

        assert_eq!(config.memory.budget(), None);
        assert_eq!(config.timestep.steps, 10);
    }

    #[test]
    fn test_unknown_cli_key_is_rejected() {
        let mut cli = HashMap::new();
        cli.insert("filtered_activity.neurons".to_string(), "4".to_string());

        let mut config = EnsembleConfig::default();
        let err = apply_cli_overrides(&mut config, &cli).unwrap_err();
        assert!(err.to_string().contains("filtered_activity.neurons"));
    }

    #[test]
    fn test_config_path_env_must_exist() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        env::set_var(CONFIG_PATH_ENV, "/nonexistent/ensemble_configuration.toml");
        let result = find_config_file();
        clear_env();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_config_path_env_is_used() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = write_config("[timestep]\nsteps = 3\n");
        env::set_var(CONFIG_PATH_ENV, file.path());
        let config = load_config(None, None);
        clear_env();

        assert_eq!(config.unwrap().timestep.steps, 3);
    }
}
