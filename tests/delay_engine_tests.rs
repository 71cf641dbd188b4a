// Integration tests for the Monte Carlo delay engine
//
// Exercises the public API end to end: reference scenario, full-closure stub,
// sampling behaviour and confidence extraction over real simulation output.

use closure_delay::confidence::range_for_certainty;
use closure_delay::config::EngineConfig;
use closure_delay::delay::{calculate_delay, FULL_CLOSURE_SENTINEL};
use closure_delay::error::EngineError;
use closure_delay::measurement::{ClosureParameters, Measurement};
use closure_delay::report::DelayReport;
use closure_delay::sampler::{create_rng, sample_around};
use closure_delay::simulation::MonteCarlo;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn config(iterations: usize) -> EngineConfig {
    EngineConfig {
        iterations,
        ..EngineConfig::default()
    }
}

// ============================================================================
// Point estimate
// ============================================================================

#[test]
fn test_reference_point_delay() {
    let delay = calculate_delay(
        &Measurement::sample(),
        &ClosureParameters::sample(),
        &EngineConfig::default(),
    );
    assert_eq!(delay, 5.53);
}

#[test]
fn test_four_lane_scenario_point_delay() {
    let measurement = Measurement {
        link: "M25-4410B".to_string(),
        date: String::new(),
        time: String::new(),
        lanes: 4,
        speeds: [70.0, 65.0, 60.0],
        flows: [20.0, 18.0, 9.0],
    };
    let params = ClosureParameters {
        lanes_closed: 1,
        length_metres: 800.0,
        duration_minutes: 45.0,
        speed_mph: 40.0,
    };
    assert_eq!(
        calculate_delay(&measurement, &params, &EngineConfig::default()),
        86.03
    );
}

#[test]
fn test_full_closure_is_sentinel_not_error() {
    let params = ClosureParameters {
        lanes_closed: 5,
        ..ClosureParameters::sample()
    };
    assert_eq!(
        calculate_delay(&Measurement::sample(), &params, &EngineConfig::default()),
        FULL_CLOSURE_SENTINEL
    );
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn test_sample_around_keeps_asymmetric_lower_bound() {
    let mut rng = create_rng(123);
    let n = 40_000;
    let mean = (0..n).map(|_| sample_around(&mut rng, 100.0, 0.2)).sum::<f64>() / n as f64;
    assert!((mean - 50.0).abs() < 1.0, "mean {mean}");
}

// ============================================================================
// Simulation and summary
// ============================================================================

#[test]
fn test_simulation_total_matches_iterations() {
    for iterations in [1, 17, 2_500] {
        let config = config(iterations);
        let results = MonteCarlo::new(&config)
            .run(
                &Measurement::sample(),
                &ClosureParameters::sample(),
                &mut create_rng(iterations as u64),
            )
            .unwrap();
        let sum: u64 = results.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, iterations as u64);
    }
}

#[test]
fn test_simulated_range_meets_threshold() {
    let config = config(5_000);
    let results = MonteCarlo::new(&config)
        .run(
            &Measurement::sample(),
            &ClosureParameters::sample(),
            &mut create_rng(2021),
        )
        .unwrap();

    let range = range_for_certainty(&results, 0.8).unwrap();
    assert!(range.certainty >= 0.8);
    assert!(range.low <= range.high);

    let full = range_for_certainty(&results, 1.0).unwrap();
    assert_eq!(full.low, results.min_value().unwrap());
    assert_eq!(full.high, results.max_value().unwrap());
    assert_eq!(full.certainty, 1.0);

    let (mode, count) = results.mode().unwrap();
    let modal = range_for_certainty(&results, results.share(count)).unwrap();
    assert_eq!((modal.low, modal.high), (mode, mode));
}

#[test]
fn test_parallel_run_merges_all_workers() {
    let config = EngineConfig {
        workers: 3,
        ..config(3_000)
    };
    let results = MonteCarlo::new(&config)
        .run_parallel(&Measurement::sample(), &ClosureParameters::sample(), 8)
        .unwrap();
    assert_eq!(results.total(), 3_000);
}

#[test]
fn test_cancel_flag_stops_parallel_run() {
    let config = EngineConfig {
        workers: 2,
        ..config(10_000)
    };
    let flag = Arc::new(AtomicBool::new(false));
    flag.store(true, Ordering::Relaxed);
    let results = MonteCarlo::new(&config)
        .with_cancel(flag)
        .run_parallel(&Measurement::sample(), &ClosureParameters::sample(), 8)
        .unwrap();
    assert_eq!(results.total(), 0);
}

#[test]
fn test_zero_speed_rejected_as_invalid_input() {
    let config = config(10);
    let measurement = Measurement {
        speeds: [0.0, 113.0, 113.0],
        ..Measurement::sample()
    };
    let err = MonteCarlo::new(&config)
        .run(&measurement, &ClosureParameters::sample(), &mut create_rng(1))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { field: "speeds", .. }));
}

#[test]
fn test_report_from_simulation() {
    let config = EngineConfig {
        seed: Some(5),
        ..config(2_000)
    };
    let measurement = Measurement::sample();
    let params = ClosureParameters::sample();
    let results = MonteCarlo::new(&config)
        .run_configured(&measurement, &params)
        .unwrap();
    let report = DelayReport::build(&measurement, &params, &config, &results).unwrap();

    assert_eq!(report.iterations, 2_000);
    assert_eq!(report.point_delay_minutes, 5.53);
    assert!(report.range.certainty >= config.threshold_certainty);
    assert!(report.range.low <= report.most_likely.delay_minutes);
    assert!(report.most_likely.delay_minutes <= report.range.high);
}
