// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Filter bank: per-filter parameters and per-neuron decayed activity
//!
//! Structure-of-arrays layout: `parameters[f]` governs `activities[f]`, and
//! both arrays always hold exactly `num_filters` entries.

use alloc::vec::Vec;
use core::mem;

use ensemble_npu_neural::{decay_slice, Accum};
use ensemble_npu_runtime::{RuntimeError, ScopedAllocator};
use tracing::info;

#[cfg(feature = "std")]
use rayon::prelude::*;

use crate::error::{AllocationSite, FilterError, Result};
use crate::parameters::ActivityFilterParameters;
use crate::region::FilteredActivityRegion;

/// Bank of leaky-integrator filters over neuron activity
///
/// Created once during simulation setup and owned by the timestep driver.
/// Learning rules access the traces through [`activity_mut`](Self::activity_mut)
/// between calls to [`step`](Self::step).
#[derive(Debug, Clone, Default)]
pub struct FilteredActivity {
    parameters: Vec<ActivityFilterParameters>,
    activities: Vec<Vec<Accum>>,
    n_neurons: usize,
}

fn allocation_failure(site: AllocationSite) -> impl FnOnce(RuntimeError) -> FilterError {
    move |source| FilterError::AllocationFailure { site, source }
}

impl FilteredActivity {
    /// A bank with no filters; stepping it does nothing
    pub const fn empty() -> Self {
        Self {
            parameters: Vec::new(),
            activities: Vec::new(),
            n_neurons: 0,
        }
    }

    /// Parse a configuration region and build a zeroed bank
    ///
    /// # Arguments
    /// * `region` - configuration words: filter count then parameter records
    /// * `n_neurons` - neurons per filter; must match the rest of the simulation
    /// * `allocator` - every setup allocation goes through it
    ///
    /// # Errors
    /// * [`FilterError::TruncatedRegion`] if the region is shorter than declared
    /// * [`FilterError::AllocationFailure`] on the first allocation that fails;
    ///   the remaining allocations are not attempted
    pub fn initialise<A: ScopedAllocator>(
        region: &[u32],
        n_neurons: usize,
        allocator: &mut A,
    ) -> Result<Self> {
        let region = FilteredActivityRegion::parse(region)?;
        Self::from_region(region, n_neurons, allocator)
    }

    /// Build a zeroed bank from an already parsed region
    pub fn from_region<A: ScopedAllocator>(
        region: FilteredActivityRegion<'_>,
        n_neurons: usize,
        allocator: &mut A,
    ) -> Result<Self> {
        let num_filters = region.num_filters();
        info!(num_filters, "Filtered activity: num filters {}", num_filters);

        // Learning disabled: nothing to allocate
        if num_filters == 0 {
            return Ok(Self {
                n_neurons,
                ..Self::empty()
            });
        }

        let parameters = allocator
            .allocate_copy(region.parameters())
            .map_err(allocation_failure(AllocationSite::Parameters))?;
        let mut activities = allocator
            .allocate::<Vec<Accum>>(num_filters)
            .map_err(allocation_failure(AllocationSite::ActivityHandles))?;

        for (filter, params) in parameters.iter().enumerate() {
            info!(
                filter,
                decay = %params.decay,
                one_minus_decay = %params.one_minus_decay,
                "Filter {}, decay {}, 1 - decay {}",
                filter,
                params.decay,
                params.one_minus_decay
            );

            let activity = allocator
                .allocate_zeroed::<Accum>(n_neurons)
                .map_err(allocation_failure(AllocationSite::Activity { filter }))?;
            activities.push(activity);
        }

        Ok(Self {
            parameters,
            activities,
            n_neurons,
        })
    }

    /// Apply one timestep of decay to every filter and neuron
    ///
    /// `n_neurons` is expected to equal the value given at initialisation;
    /// only cells that exist are touched if it is larger.
    #[inline]
    pub fn step(&mut self, n_neurons: usize) {
        for (params, activity) in self.parameters.iter().zip(self.activities.iter_mut()) {
            let len = n_neurons.min(activity.len());
            decay_slice(&mut activity[..len], params.decay);
        }
    }

    /// Same result as [`step`](Self::step), filters processed on the rayon pool
    ///
    /// Returns only after every filter has been decayed.
    #[cfg(feature = "std")]
    pub fn step_parallel(&mut self, n_neurons: usize) {
        self.activities
            .par_iter_mut()
            .zip(self.parameters.par_iter())
            .for_each(|(activity, params)| {
                let len = n_neurons.min(activity.len());
                decay_slice(&mut activity[..len], params.decay);
            });
    }

    pub fn num_filters(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Neuron count given at initialisation
    pub fn n_neurons(&self) -> usize {
        self.n_neurons
    }

    pub fn parameters(&self) -> &[ActivityFilterParameters] {
        &self.parameters
    }

    pub fn filter(&self, filter: usize) -> Option<&ActivityFilterParameters> {
        self.parameters.get(filter)
    }

    /// Per-neuron traces of one filter
    ///
    /// # Panics
    /// If `filter >= num_filters()`.
    pub fn activity(&self, filter: usize) -> &[Accum] {
        &self.activities[filter]
    }

    /// Mutable per-neuron traces of one filter
    ///
    /// # Panics
    /// If `filter >= num_filters()`.
    pub fn activity_mut(&mut self, filter: usize) -> &mut [Accum] {
        &mut self.activities[filter]
    }

    pub fn get_activity(&self, filter: usize) -> Option<&[Accum]> {
        self.activities.get(filter).map(Vec::as_slice)
    }

    pub fn get_activity_mut(&mut self, filter: usize) -> Option<&mut [Accum]> {
        self.activities.get_mut(filter).map(Vec::as_mut_slice)
    }

    /// Mutable traces of every filter, in filter-index order
    pub fn activities_mut(&mut self) -> impl Iterator<Item = &mut [Accum]> + '_ {
        self.activities.iter_mut().map(Vec::as_mut_slice)
    }

    /// `(parameters, traces)` pairs in filter-index order
    pub fn iter(&self) -> impl Iterator<Item = (&ActivityFilterParameters, &[Accum])> + '_ {
        self.parameters
            .iter()
            .zip(self.activities.iter().map(Vec::as_slice))
    }

    /// Bytes requested from the allocator for this bank
    pub fn memory_footprint(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let parameters = self.parameters.len() * mem::size_of::<ActivityFilterParameters>();
        let handles = self.activities.len() * mem::size_of::<Vec<Accum>>();
        let traces: usize = self
            .activities
            .iter()
            .map(|activity| activity.len() * mem::size_of::<Accum>())
            .sum();
        parameters + handles + traces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_npu_runtime::HeapAllocator;

    fn region(decays: &[Accum]) -> Vec<u32> {
        let mut words = alloc::vec![decays.len() as u32];
        for &decay in decays {
            words.extend_from_slice(&ActivityFilterParameters::from_decay(decay).to_words());
        }
        words
    }

    #[test]
    fn test_initialise_zeroes_every_trace() {
        let words = region(&[Accum::HALF, Accum::from_num(0.9)]);
        let bank = FilteredActivity::initialise(&words, 5, &mut HeapAllocator::new()).unwrap();

        assert_eq!(bank.num_filters(), 2);
        assert_eq!(bank.n_neurons(), 5);
        for (_, activity) in bank.iter() {
            assert_eq!(activity, &[Accum::ZERO; 5]);
        }
    }

    #[test]
    fn test_zero_filters_allocates_nothing() {
        let mut heap = HeapAllocator::new();
        let mut bank = FilteredActivity::initialise(&[0], 100, &mut heap).unwrap();

        assert!(bank.is_empty());
        assert_eq!(heap.requests(), 0);
        assert_eq!(bank.memory_footprint(), 0);
        bank.step(100);
        bank.step(usize::MAX);
    }

    #[test]
    fn test_step_decays_per_filter() {
        let words = region(&[Accum::HALF, Accum::from_num(0.25)]);
        let mut bank = FilteredActivity::initialise(&words, 2, &mut HeapAllocator::new()).unwrap();
        bank.activity_mut(0).fill(Accum::from_int(4));
        bank.activity_mut(1).fill(Accum::from_int(4));

        bank.step(2);

        assert_eq!(bank.activity(0), &[Accum::from_int(2); 2]);
        assert_eq!(bank.activity(1), &[Accum::ONE; 2]);
    }

    #[test]
    fn test_step_with_fewer_neurons_only_touches_prefix() {
        let words = region(&[Accum::HALF]);
        let mut bank = FilteredActivity::initialise(&words, 3, &mut HeapAllocator::new()).unwrap();
        bank.activity_mut(0).fill(Accum::ONE);

        bank.step(2);
        assert_eq!(bank.activity(0), &[Accum::HALF, Accum::HALF, Accum::ONE]);

        // Larger counts are clamped to the allocated length
        bank.step(10);
        assert_eq!(bank.activity(0)[2], Accum::HALF);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_step_parallel_matches_step() {
        let decays = [Accum::HALF, Accum::from_num(0.9), Accum::from_num(0.01), Accum::ONE];
        let words = region(&decays);
        let mut sequential = FilteredActivity::initialise(&words, 64, &mut HeapAllocator::new()).unwrap();
        for (f, activity) in sequential.activities_mut().enumerate() {
            for (n, value) in activity.iter_mut().enumerate() {
                *value = Accum::from_bits((n as i32 - 32) * 4099 + f as i32 * 77);
            }
        }
        let mut parallel = sequential.clone();

        for _ in 0..20 {
            sequential.step(64);
            parallel.step_parallel(64);
        }

        for f in 0..decays.len() {
            assert_eq!(sequential.activity(f), parallel.activity(f));
        }
    }

    #[test]
    fn test_memory_footprint() {
        let words = region(&[Accum::HALF, Accum::HALF]);
        let mut heap = HeapAllocator::new();
        let bank = FilteredActivity::initialise(&words, 10, &mut heap).unwrap();

        assert_eq!(bank.memory_footprint(), heap.bytes_reserved());
        assert_eq!(heap.requests(), 4);
    }

    /// Heap allocator that records each request's element count
    #[derive(Default)]
    struct RecordingAllocator {
        lens: Vec<usize>,
        heap: HeapAllocator,
    }

    impl ScopedAllocator for RecordingAllocator {
        fn allocate<T>(&mut self, len: usize) -> ensemble_npu_runtime::Result<Vec<T>> {
            self.lens.push(len);
            self.heap.allocate(len)
        }

        fn memory_limit(&self) -> Option<usize> {
            None
        }
    }

    #[test]
    fn test_parameters_copied_in_first_request() {
        let decays = [Accum::HALF, Accum::from_num(0.25), Accum::ONE];
        let words = region(&decays);
        let mut allocator = RecordingAllocator::default();
        let bank = FilteredActivity::initialise(&words, 7, &mut allocator).unwrap();

        // parameters, handles, then one trace array per filter
        assert_eq!(allocator.lens, [3, 3, 7, 7, 7]);
        let copied: Vec<Accum> = bank.parameters().iter().map(|p| p.decay).collect();
        assert_eq!(copied, decays);
    }

    #[test]
    fn test_get_activity_out_of_range() {
        let mut bank = FilteredActivity::empty();
        assert!(bank.get_activity(0).is_none());
        assert!(bank.get_activity_mut(0).is_none());
        assert!(bank.filter(0).is_none());
    }
}
