//! Deterministic delay formula
//!
//! Closing lanes squeezes the link's traffic into the remaining ones: density
//! rises, flow through the works falls, and the resulting speed (capped at the
//! posted closure speed) is compared against the reported speed over the
//! length of the incident. The incident is the closure itself plus the
//! shockwave that grows back up the carriageway for the closure's duration.
//!
//! Full closures are not modelled and yield [`FULL_CLOSURE_SENTINEL`].
//!
//! No guard protects against zero density or physically impossible densities.
//! Such inputs produce NaN or infinity, which callers must not hide.

use crate::config::EngineConfig;
use crate::measurement::{ClosureParameters, Measurement};
use tracing::trace;

/// Returned in place of a delay when every lane is closed
pub const FULL_CLOSURE_SENTINEL: f64 = -99.99;

/// Shape of the closure relative to the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureKind {
    /// At least one lane stays open
    Partial { open_lanes: u32 },
    /// No lane stays open
    Full,
}

impl ClosureKind {
    pub fn classify(measurement: &Measurement, params: &ClosureParameters) -> Self {
        let open_lanes = i64::from(measurement.lanes) - i64::from(params.lanes_closed);
        if open_lanes <= 0 {
            ClosureKind::Full
        } else {
            // open_lanes <= measurement.lanes, so it fits back into u32
            ClosureKind::Partial {
                open_lanes: open_lanes as u32,
            }
        }
    }
}

/// Traffic state inside the closure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosureState {
    pub density: f64,
    pub flow: f64,
}

impl ClosureState {
    /// Average speed through the closure (flow / density)
    pub fn speed(&self) -> f64 {
        self.flow / self.density
    }
}

/// Density and flow through the closure for a given number of open lanes.
///
/// With every lane open the link is unaffected and the totals are returned
/// unchanged. Otherwise density grows by `1 + open/lanes` and flow shrinks by
/// `1 − open/lanes`.
pub fn closure_state(measurement: &Measurement, open_lanes: u32) -> ClosureState {
    let total_flow = measurement.total_flow();
    let total_density = measurement.total_density();

    if open_lanes >= measurement.lanes {
        return ClosureState {
            density: total_density,
            flow: total_flow,
        };
    }

    let open_share = f64::from(open_lanes) / f64::from(measurement.lanes);
    ClosureState {
        density: total_density * (1.0 + open_share),
        flow: total_flow * (1.0 - open_share),
    }
}

/// Length affected by the closure in kilometres (shockwave + works)
pub fn incident_length_km(params: &ClosureParameters, config: &EngineConfig) -> f64 {
    let shockwave_km =
        config.metres_to_km(config.shockwave_growth_metres_per_minute() * params.duration_minutes);
    shockwave_km + config.metres_to_km(params.length_metres)
}

/// Delay in minutes caused by the closure, rounded to 2 decimal places
pub fn calculate_delay(
    measurement: &Measurement,
    params: &ClosureParameters,
    config: &EngineConfig,
) -> f64 {
    let open_lanes = match ClosureKind::classify(measurement, params) {
        ClosureKind::Full => return calculate_delay_full_closure(measurement, params),
        ClosureKind::Partial { open_lanes } => open_lanes,
    };

    let state = closure_state(measurement, open_lanes);
    let closure_speed = config.mph_to_kph(params.speed_mph);

    // Written so a NaN speed survives the cap instead of being replaced
    let speed = state.speed();
    let speed = if closure_speed < speed {
        closure_speed
    } else {
        speed
    };

    let length_km = incident_length_km(params, config);
    let impaired_hours = length_km / speed;
    let normal_hours = length_km / measurement.average_speed();

    round_to_hundredths((impaired_hours - normal_hours) * config.minutes_per_hour)
}

fn calculate_delay_full_closure(measurement: &Measurement, params: &ClosureParameters) -> f64 {
    trace!(
        link = %measurement.link,
        lanes = measurement.lanes,
        lanes_closed = params.lanes_closed,
        "full closure delay is not modelled"
    );
    FULL_CLOSURE_SENTINEL
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
