//! Per-iteration randomized copies of the scenario inputs
//!
//! Lane counts are structural and copied verbatim; every other numeric field
//! is replaced by [`sample_around`] of its point value.

use crate::measurement::{ClosureParameters, Measurement};
use crate::sampler::sample_around;
use rand::Rng;

/// Build a fresh perturbed copy of a value without touching the original
pub trait Randomize {
    fn randomize<R: Rng + ?Sized>(&self, flex: f64, rng: &mut R) -> Self;
}

impl Randomize for Measurement {
    fn randomize<R: Rng + ?Sized>(&self, flex: f64, rng: &mut R) -> Self {
        // Flows first, then speeds: fixes the draw order for seeded runs
        let flows = self.flows.map(|flow| sample_around(rng, flow, flex));
        let speeds = self.speeds.map(|speed| sample_around(rng, speed, flex));

        Measurement {
            link: self.link.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            lanes: self.lanes,
            speeds,
            flows,
        }
    }
}

impl Randomize for ClosureParameters {
    fn randomize<R: Rng + ?Sized>(&self, flex: f64, rng: &mut R) -> Self {
        ClosureParameters {
            lanes_closed: self.lanes_closed,
            length_metres: sample_around(rng, self.length_metres, flex),
            duration_minutes: sample_around(rng, self.duration_minutes, flex),
            speed_mph: sample_around(rng, self.speed_mph, flex),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::create_rng;

    #[test]
    fn test_measurement_lanes_and_metadata_copied() {
        let original = Measurement::sample();
        let mut rng = create_rng(42);
        let randomized = original.randomize(0.2, &mut rng);
        assert_eq!(randomized.lanes, original.lanes);
        assert_eq!(randomized.link, original.link);
        assert_ne!(randomized.speeds, original.speeds);
        assert_ne!(randomized.flows, original.flows);
    }

    #[test]
    fn test_input_not_mutated() {
        let original = ClosureParameters::sample();
        let mut rng = create_rng(42);
        let _ = original.randomize(0.2, &mut rng);
        assert_eq!(original, ClosureParameters::sample());
    }

    #[test]
    fn test_params_lanes_closed_copied() {
        let original = ClosureParameters::sample();
        let mut rng = create_rng(9);
        for _ in 0..100 {
            assert_eq!(original.randomize(0.2, &mut rng).lanes_closed, 2);
        }
    }

    #[test]
    fn test_same_seed_same_copy() {
        let original = Measurement::sample();
        let a = original.randomize(0.2, &mut create_rng(5));
        let b = original.randomize(0.2, &mut create_rng(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_readings_stay_zero() {
        let original = Measurement {
            flows: [0.0, 0.0, 0.0],
            ..Measurement::sample()
        };
        let copy = original.randomize(0.2, &mut create_rng(1));
        assert_eq!(copy.flows, [0.0, 0.0, 0.0]);
    }
}
