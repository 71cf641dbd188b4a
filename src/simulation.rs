//! Monte Carlo driver
//!
//! Each iteration randomizes the measurement and the closure parameters,
//! evaluates the delay formula and records the rounded outcome. Iterations
//! are independent, so the parallel driver gives every worker its own seeded
//! RNG and its own distribution, merged once all workers finish.

use crate::config::EngineConfig;
use crate::delay::calculate_delay;
use crate::error::{EngineError, Result};
use crate::frequency::FrequencyDistribution;
use crate::measurement::{ClosureParameters, Measurement};
use crate::randomizer::Randomize;
use crate::sampler::{create_rng, entropy_rng};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Monte Carlo delay simulation over one canonical scenario
#[derive(Debug, Clone)]
pub struct MonteCarlo<'a> {
    config: &'a EngineConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> MonteCarlo<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop early once `flag` is set; the partial distribution is returned
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run `config.iterations` iterations on the calling thread
    pub fn run<R: Rng + ?Sized>(
        &self,
        measurement: &Measurement,
        params: &ClosureParameters,
        rng: &mut R,
    ) -> Result<FrequencyDistribution> {
        self.prepare(measurement, params)?;
        debug!(
            link = %measurement.link,
            iterations = self.config.iterations,
            flex = self.config.flex,
            "starting monte carlo run"
        );

        let results = self.run_iterations(measurement, params, self.config.iterations, rng)?;
        self.log_completion(&results);
        Ok(results)
    }

    /// Run across `config.workers` scoped threads, reproducible for a seed.
    ///
    /// Worker `i` draws from `create_rng(seed + i)` and handles an even share of
    /// the iterations (the first workers take the remainder).
    pub fn run_parallel(
        &self,
        measurement: &Measurement,
        params: &ClosureParameters,
        seed: u64,
    ) -> Result<FrequencyDistribution> {
        self.prepare(measurement, params)?;

        let workers = self.config.workers.min(self.config.iterations);
        let base = self.config.iterations / workers;
        let remainder = self.config.iterations % workers;
        debug!(
            link = %measurement.link,
            iterations = self.config.iterations,
            workers,
            seed,
            "starting parallel monte carlo run"
        );

        let partials = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let share = base + usize::from(worker < remainder);
                    let worker_seed = seed.wrapping_add(worker as u64);
                    scope.spawn(move |_| {
                        let mut rng = create_rng(worker_seed);
                        self.run_iterations(measurement, params, share, &mut rng)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(EngineError::Configuration(
                            "simulation worker panicked".to_string(),
                        ))
                    })
                })
                .collect::<Vec<_>>()
        })
        .map_err(|_| EngineError::Configuration("simulation scope panicked".to_string()))?;

        let mut results = FrequencyDistribution::new();
        for partial in partials {
            results.merge(partial?);
        }
        self.log_completion(&results);
        Ok(results)
    }

    /// Dispatch on `config.seed` and `config.workers`
    pub fn run_configured(
        &self,
        measurement: &Measurement,
        params: &ClosureParameters,
    ) -> Result<FrequencyDistribution> {
        match (self.config.seed, self.config.workers) {
            (Some(seed), 1) => self.run(measurement, params, &mut create_rng(seed)),
            (None, 1) => self.run(measurement, params, &mut entropy_rng()),
            (Some(seed), _) => self.run_parallel(measurement, params, seed),
            (None, _) => {
                let seed = entropy_rng().gen();
                self.run_parallel(measurement, params, seed)
            }
        }
    }

    fn prepare(&self, measurement: &Measurement, params: &ClosureParameters) -> Result<()> {
        self.config.validate()?;
        measurement.validate()?;
        params.validate()
    }

    fn run_iterations<R: Rng + ?Sized>(
        &self,
        measurement: &Measurement,
        params: &ClosureParameters,
        iterations: usize,
        rng: &mut R,
    ) -> Result<FrequencyDistribution> {
        let flex = self.config.flex;
        let mut results = FrequencyDistribution::new();

        for _ in 0..iterations {
            if self.is_cancelled() {
                break;
            }
            let iteration_measurement = measurement.randomize(flex, rng);
            let iteration_params = params.randomize(flex, rng);
            let delay = calculate_delay(&iteration_measurement, &iteration_params, self.config);
            results.record(delay)?;
        }

        Ok(results)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn log_completion(&self, results: &FrequencyDistribution) {
        if (results.total() as usize) < self.config.iterations {
            info!(
                completed = results.total(),
                requested = self.config.iterations,
                "monte carlo run cancelled"
            );
        } else {
            debug!(
                completed = results.total(),
                distinct = results.len(),
                "monte carlo run finished"
            );
        }
    }
}
