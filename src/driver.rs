// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Host-side timestep driving: build a bank from configuration and time its steps

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::EnsembleConfig;
use crate::filtered_activity::{FilteredActivity, Result};
use crate::runtime::{BudgetAllocator, HeapAllocator};

/// Initialise a bank with the allocator the memory section asks for
///
/// A byte budget selects [`BudgetAllocator`], an unlimited budget the heap.
pub fn build_bank(config: &EnsembleConfig, region: &[u32]) -> Result<FilteredActivity> {
    let n_neurons = config.filtered_activity.n_neurons;
    match config.memory.budget() {
        Some(budget_bytes) => {
            let mut dtcm = BudgetAllocator::new(budget_bytes);
            let bank = FilteredActivity::initialise(region, n_neurons, &mut dtcm)?;
            info!(
                used_bytes = dtcm.used_bytes(),
                remaining_bytes = dtcm.remaining_bytes(),
                "Filter bank fits in {} byte budget",
                budget_bytes
            );
            Ok(bank)
        }
        None => {
            let mut heap = HeapAllocator::new();
            let bank = FilteredActivity::initialise(region, n_neurons, &mut heap)?;
            info!(bytes_reserved = heap.bytes_reserved(), "Filter bank allocated on heap");
            Ok(bank)
        }
    }
}

/// Step timing summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub steps: u32,
    pub total: Duration,
    pub worst: Duration,
    pub budget: Duration,
}

impl StepReport {
    pub fn mean(&self) -> Duration {
        if self.steps == 0 {
            return Duration::ZERO;
        }
        self.total / self.steps
    }

    pub fn within_budget(&self) -> bool {
        self.worst <= self.budget
    }
}

/// Run `steps` timesteps, timing each one
pub fn run_steps(
    bank: &mut FilteredActivity,
    n_neurons: usize,
    steps: u32,
    parallel: bool,
    budget: Duration,
) -> StepReport {
    let mut total = Duration::ZERO;
    let mut worst = Duration::ZERO;

    for step in 0..steps {
        let start = Instant::now();
        if parallel {
            bank.step_parallel(n_neurons);
        } else {
            bank.step(n_neurons);
        }
        let elapsed = start.elapsed();

        if elapsed > worst {
            debug!(step, elapsed_ns = elapsed.as_nanos() as u64, "New worst step");
            worst = elapsed;
        }
        total += elapsed;
    }

    StepReport {
        steps,
        total,
        worst,
        budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neural::Accum;

    #[test]
    fn test_empty_report() {
        let mut bank = FilteredActivity::empty();
        let report = run_steps(&mut bank, 10, 0, false, Duration::from_micros(1));
        assert_eq!(report.mean(), Duration::ZERO);
        assert!(report.within_budget());
    }

    #[test]
    fn test_run_steps_decays() {
        let region = [1, Accum::HALF.to_word(), Accum::HALF.to_word()];
        let mut bank = FilteredActivity::initialise(&region, 2, &mut HeapAllocator::new()).unwrap();
        bank.activity_mut(0).fill(Accum::from_int(8));

        let report = run_steps(&mut bank, 2, 3, false, Duration::from_secs(1));
        assert_eq!(report.steps, 3);
        assert!(report.worst <= report.total);
        assert_eq!(bank.activity(0), &[Accum::ONE; 2]);
    }

    #[test]
    fn test_build_bank_respects_budget() {
        let region = [1, Accum::HALF.to_word(), Accum::HALF.to_word()];
        let mut config = EnsembleConfig::default();
        config.filtered_activity.n_neurons = 1024;
        config.memory.budget_bytes = 256;
        assert!(build_bank(&config, &region).is_err());

        config.memory.budget_bytes = 0;
        let bank = build_bank(&config, &region).unwrap();
        assert_eq!(bank.activity(0).len(), 1024);
    }
}
