//! Sensor measurements and closure parameters
//!
//! Both records are plain values: built once from a source, never mutated,
//! and copied into fresh randomized instances for every simulation iteration.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lane channels reported by a loop-detector site
pub const LANE_CHANNELS: usize = 3;

/// One sensor record for a road link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Road link identifier (e.g., "A3-0413A")
    pub link: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Number of running lanes on the link
    pub lanes: u32,
    /// Per-lane speed readings (miles/hour)
    pub speeds: [f64; LANE_CHANNELS],
    /// Per-lane flow readings (vehicles per period)
    pub flows: [f64; LANE_CHANNELS],
}

impl Measurement {
    /// Reference record for link A3-0413A
    pub fn sample() -> Self {
        Self {
            link: "A3-0413A".to_string(),
            date: "24/01/2021".to_string(),
            time: "10:00".to_string(),
            lanes: 3,
            speeds: [109.0, 113.0, 113.0],
            flows: [14.0, 11.0, 11.0],
        }
    }

    pub fn total_flow(&self) -> f64 {
        self.flows.iter().sum()
    }

    /// Sum of per-lane densities, each approximated as flow / speed
    pub fn total_density(&self) -> f64 {
        self.flows
            .iter()
            .zip(self.speeds.iter())
            .map(|(flow, speed)| flow / speed)
            .sum()
    }

    pub fn average_speed(&self) -> f64 {
        self.speeds.iter().sum::<f64>() / LANE_CHANNELS as f64
    }

    /// Reject records the delay formula cannot evaluate meaningfully
    pub fn validate(&self) -> Result<()> {
        if self.lanes == 0 {
            return Err(EngineError::invalid("lanes", "must be >= 1, got 0"));
        }
        for (i, speed) in self.speeds.iter().enumerate() {
            if !speed.is_finite() || *speed <= 0.0 {
                return Err(EngineError::invalid(
                    "speeds",
                    format!("lane {} must be finite and > 0, got {speed}", i + 1),
                ));
            }
        }
        for (i, flow) in self.flows.iter().enumerate() {
            if !flow.is_finite() || *flow < 0.0 {
                return Err(EngineError::invalid(
                    "flows",
                    format!("lane {} must be finite and >= 0, got {flow}", i + 1),
                ));
            }
        }
        // Zero flow on every lane means zero density and no defined speed
        if self.total_flow() == 0.0 {
            return Err(EngineError::invalid(
                "flows",
                "must not all be zero, the link carries no traffic",
            ));
        }
        Ok(())
    }
}

/// Parameters describing the closure being assessed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureParameters {
    pub lanes_closed: u32,
    pub length_metres: f64,
    pub duration_minutes: f64,
    /// Posted or advisory speed through the works (miles/hour)
    pub speed_mph: f64,
}

impl ClosureParameters {
    /// Two lanes closed over 250 m for 30 minutes at 50 mph
    pub fn sample() -> Self {
        Self {
            lanes_closed: 2,
            length_metres: 250.0,
            duration_minutes: 30.0,
            speed_mph: 50.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("length_metres", self.length_metres),
            ("duration_minutes", self.duration_minutes),
            ("speed_mph", self.speed_mph),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::invalid(
                    field,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// A measurement paired with the closure to assess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub measurement: Measurement,
    pub closure: ClosureParameters,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            measurement: Measurement::sample(),
            closure: ClosureParameters::sample(),
        }
    }
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let scenario: Scenario = toml::from_str(contents).context("Invalid scenario TOML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario with `[measurement]` and `[closure]` tables
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::{bail, Context};

        let path_ref = path.as_ref();
        if !path_ref.exists() {
            bail!("Scenario file not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref).context("Failed to read scenario file")?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.measurement.validate()?;
        self.closure.validate()
    }
}
