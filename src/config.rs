//! Engine constants and run configuration
//!
//! Physical conversion factors, the shockwave speed and the Monte Carlo
//! knobs (iterations, flex, target certainty) live in one immutable
//! [`EngineConfig`] value that is passed explicitly to every component.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Speed at which the closure shockwave travels back up the carriageway
pub const DEFAULT_SHOCKWAVE_SPEED_KPH: f64 = 20.0;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub metres_per_km: f64,
    pub minutes_per_hour: f64,
    /// Multiplier turning miles/hour into kilometres/hour
    pub mph_to_kph: f64,
    /// Speed of the shockwave behind the closure; sets how fast the queue grows
    pub shockwave_speed_kph: f64,
    /// Number of Monte Carlo iterations
    pub iterations: usize,
    /// Fractional half-width used to build sampling ranges
    pub flex: f64,
    /// Share of samples the reported range must capture
    pub threshold_certainty: f64,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Worker threads used by the parallel driver
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metres_per_km: 1000.0,
            minutes_per_hour: 60.0,
            mph_to_kph: 1.609,
            shockwave_speed_kph: DEFAULT_SHOCKWAVE_SPEED_KPH,
            iterations: 10_000,
            flex: 0.20,
            threshold_certainty: 0.80,
            seed: None,
            workers: 1,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, then validate it
    ///
    /// Missing keys fall back to [`EngineConfig::default`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::{bail, Context};

        let path_ref = path.as_ref();
        if !path_ref.exists() {
            bail!("Config file not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref).context("Failed to read config file")?;
        let config: EngineConfig = toml::from_str(&contents).context("Invalid config TOML")?;
        config.validate()?;

        Ok(config)
    }

    /// Check that every constant is usable by the engine
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(EngineError::Configuration(
                "iterations must be >= 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(EngineError::Configuration(
                "workers must be >= 1".to_string(),
            ));
        }
        if !self.flex.is_finite() || self.flex < 0.0 {
            return Err(EngineError::Configuration(format!(
                "flex must be finite and >= 0, got {}",
                self.flex
            )));
        }
        check_certainty(self.threshold_certainty)?;

        let factors = [
            ("metres_per_km", self.metres_per_km),
            ("minutes_per_hour", self.minutes_per_hour),
            ("mph_to_kph", self.mph_to_kph),
            ("shockwave_speed_kph", self.shockwave_speed_kph),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::Configuration(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Convert miles/hour to kilometres/hour
    pub fn mph_to_kph(&self, mph: f64) -> f64 {
        mph * self.mph_to_kph
    }

    /// Metres the shockwave grows per minute of closure
    pub fn shockwave_growth_metres_per_minute(&self) -> f64 {
        self.shockwave_speed_kph * self.metres_per_km / self.minutes_per_hour
    }

    /// Convert metres to kilometres
    pub fn metres_to_km(&self, metres: f64) -> f64 {
        metres / self.metres_per_km
    }
}

/// A target certainty must be a share in (0, 1]
pub fn check_certainty(certainty: f64) -> Result<()> {
    if certainty.is_nan() || certainty <= 0.0 || certainty > 1.0 {
        return Err(EngineError::Configuration(format!(
            "target certainty must be in (0, 1], got {certainty}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.flex, 0.20);
        assert_eq!(config.threshold_certainty, 0.80);
        assert!((config.shockwave_growth_metres_per_minute() - 333.333_333).abs() < 1e-5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unit_conversions() {
        let config = EngineConfig::default();
        assert!((config.mph_to_kph(50.0) - 80.45).abs() < 1e-9);
        assert_eq!(config.metres_to_km(250.0), 0.25);
    }

    #[test]
    fn test_shockwave_growth_follows_speed() {
        let config = EngineConfig {
            shockwave_speed_kph: 60.0,
            ..EngineConfig::default()
        };
        assert!((config.shockwave_growth_metres_per_minute() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_file_partial_overrides() {
        let file = write_config("iterations = 500\nflex = 0.1\nseed = 7\n");
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.flex, 0.1);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.minutes_per_hour, 60.0);
    }

    #[test]
    fn test_from_file_missing() {
        let result = EngineConfig::from_file("/nonexistent/closure-delay.toml");
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let file = write_config("threshold_certainty = 1.5\n");
        assert!(EngineConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = EngineConfig {
            iterations: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_flex() {
        let config = EngineConfig {
            flex: -0.1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_check_certainty_bounds() {
        assert!(check_certainty(1.0).is_ok());
        assert!(check_certainty(0.5).is_ok());
        assert!(check_certainty(0.0).is_err());
        assert!(check_certainty(1.01).is_err());
        assert!(check_certainty(f64::NAN).is_err());
    }
}
