//! closure-delay - Monte Carlo estimation of lane closure delays
//!
//! Sensor readings and closure parameters are uncertain, so instead of a single
//! figure this library perturbs the inputs, re-evaluates a deterministic delay
//! formula many times and summarizes the outcomes as a most likely delay plus
//! the narrowest range reaching a target certainty.
//!
//! ```
//! use closure_delay::config::EngineConfig;
//! use closure_delay::confidence::range_for_certainty;
//! use closure_delay::measurement::{ClosureParameters, Measurement};
//! use closure_delay::sampler::create_rng;
//! use closure_delay::simulation::MonteCarlo;
//!
//! let config = EngineConfig { iterations: 1_000, ..EngineConfig::default() };
//! let results = MonteCarlo::new(&config)
//!     .run(&Measurement::sample(), &ClosureParameters::sample(), &mut create_rng(42))
//!     .unwrap();
//! let range = range_for_certainty(&results, config.threshold_certainty).unwrap();
//! assert!(range.certainty >= 0.8);
//! ```

pub mod cli;
pub mod confidence;
pub mod config;
pub mod delay;
pub mod error;
pub mod frequency;
pub mod measurement;
pub mod randomizer;
pub mod report;
pub mod sampler;
pub mod simulation;
