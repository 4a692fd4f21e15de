// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Filter bank step-time checker.
//!
//! Builds the filter bank described by `ensemble_configuration.toml`, loads
//! every trace with one unit of activity, and times the configured number of
//! steps against the per-step budget. Exits 1 when the worst step is over
//! budget, 2 when setup fails.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use ensemble::config::{load_config, validate_config, EnsembleConfig};
use ensemble::driver::{build_bank, run_steps, StepReport};
use ensemble::filtered_activity::FilteredActivity;
use ensemble::neural::Accum;
use ensemble::observability::{init_logging, parse_debug_flags};
use ensemble::region_file::read_region_file;
use tracing::{error, info};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: step_budget [--config <path>] [section.key=value ...] [--debug-<crate> | --debug-all]\n\n\
         Examples:\n\
         - step_budget filtered_activity.n_neurons=256 timestep.steps=10000\n\
         - step_budget --config ensemble_configuration.toml --debug-ensemble-npu-runtime\n"
    );
    process::exit(2);
}

fn parse_args() -> (Option<PathBuf>, HashMap<String, String>) {
    let mut config_path = None;
    let mut overrides = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                config_path = Some(PathBuf::from(v));
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => match other.split_once('=') {
                Some((key, value)) => {
                    overrides.insert(key.to_string(), value.to_string());
                }
                None => {
                    eprintln!("Unknown argument: {other}");
                    usage_and_exit();
                }
            },
        }
    }

    (config_path, overrides)
}

fn setup() -> Result<(EnsembleConfig, FilteredActivity)> {
    let (config_path, overrides) = parse_args();

    let config = load_config(config_path.as_deref(), Some(&overrides))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    init_logging(&parse_debug_flags(), &config.system.log_level)?;

    let region = read_region_file(&config.filtered_activity.region_path)?;
    let mut bank = build_bank(&config, &region).context("Failed to initialise filter bank")?;

    for activity in bank.activities_mut() {
        activity.fill(Accum::ONE);
    }

    Ok((config, bank))
}

fn report(config: &EnsembleConfig, bank: &FilteredActivity, report: &StepReport) {
    println!(
        "[step_budget] filters={} neurons={} steps={} parallel={}",
        bank.num_filters(),
        config.filtered_activity.n_neurons,
        report.steps,
        config.filtered_activity.parallel_step
    );
    println!(
        "[step_budget] {} mean={:?} worst={:?} budget={:?} dt={}us",
        if report.within_budget() { "OK" } else { "FAIL" },
        report.mean(),
        report.worst,
        report.budget,
        config.timestep.dt_us
    );
}

fn main() {
    let (config, mut bank) = match setup() {
        Ok(ready) => ready,
        Err(e) => {
            eprintln!("[step_budget] Setup failed: {e:#}");
            process::exit(2);
        }
    };

    info!(
        filters = bank.num_filters(),
        memory_bytes = bank.memory_footprint(),
        "Filter bank ready"
    );

    let step_report = run_steps(
        &mut bank,
        config.filtered_activity.n_neurons,
        config.timestep.steps,
        config.filtered_activity.parallel_step,
        Duration::from_micros(u64::from(config.timestep.step_budget_us)),
    );
    report(&config, &bank, &step_report);

    if !step_report.within_budget() {
        error!(
            worst_us = step_report.worst.as_micros() as u64,
            budget_us = config.timestep.step_budget_us,
            "Filter step exceeded its budget"
        );
        process::exit(1);
    }
}
