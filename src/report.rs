//! Summary of one delay estimate, rendered as text or JSON

use crate::confidence::{range_for_certainty, ConfidenceRange};
use crate::config::EngineConfig;
use crate::delay::{calculate_delay, ClosureKind};
use crate::error::{EngineError, Result};
use crate::frequency::FrequencyDistribution;
use crate::measurement::{ClosureParameters, Measurement};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::warn;

/// Most frequent simulated delay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModalDelay {
    pub delay_minutes: i64,
    pub certainty: f64,
}

/// One histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub delay_minutes: i64,
    pub count: u64,
}

/// Everything the presentation layer needs about one estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayReport {
    pub link: String,
    /// Deterministic delay from the unperturbed inputs
    pub point_delay_minutes: f64,
    /// Every lane is closed; the delays are placeholders, not results
    pub full_closure: bool,
    pub iterations: u64,
    pub most_likely: ModalDelay,
    pub target_certainty: f64,
    pub range: ConfidenceRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<HistogramBin>>,
}

impl DelayReport {
    /// Summarize a finished simulation alongside the point estimate
    pub fn build(
        measurement: &Measurement,
        params: &ClosureParameters,
        config: &EngineConfig,
        distribution: &FrequencyDistribution,
    ) -> Result<Self> {
        let point_delay_minutes = calculate_delay(measurement, params, config);
        let full_closure = ClosureKind::classify(measurement, params) == ClosureKind::Full;
        if full_closure {
            warn!(
                link = %measurement.link,
                "full closure delay is not modelled; reported values are placeholders"
            );
        }

        let (mode, count) = distribution.mode().ok_or(EngineError::EmptyDistribution)?;
        let range = range_for_certainty(distribution, config.threshold_certainty)?;

        Ok(Self {
            link: measurement.link.clone(),
            point_delay_minutes,
            full_closure,
            iterations: distribution.total(),
            most_likely: ModalDelay {
                delay_minutes: mode,
                certainty: distribution.share(count),
            },
            target_certainty: config.threshold_certainty,
            range,
            histogram: None,
        })
    }

    /// Attach the distribution in ascending delay order
    pub fn with_histogram(mut self, distribution: &FrequencyDistribution) -> Self {
        self.histogram = Some(
            distribution
                .iter()
                .map(|(delay_minutes, count)| HistogramBin {
                    delay_minutes,
                    count,
                })
                .collect(),
        );
        self
    }

    /// Human-readable summary
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Link: {}", self.link);
        if self.full_closure {
            let _ = writeln!(
                out,
                "Full closure: delay not modelled (placeholder {})",
                self.point_delay_minutes
            );
        }
        let _ = writeln!(
            out,
            "The calculated delay is {} minute(s)",
            self.point_delay_minutes
        );
        let _ = writeln!(
            out,
            "The most likely delay will be {} minute(s) with {:.4} certainty",
            self.most_likely.delay_minutes, self.most_likely.certainty
        );
        let _ = writeln!(
            out,
            "The delay will be between {} minute(s) and {} minute(s) with {:.4} certainty",
            self.range.low, self.range.high, self.range.certainty
        );
        let _ = writeln!(
            out,
            "({} iterations, target certainty {})",
            self.iterations, self.target_certainty
        );

        if let Some(histogram) = &self.histogram {
            let _ = writeln!(out);
            let _ = writeln!(out, "Delay (min)  Count");
            let _ = writeln!(out, "─────────────────────────");
            for bin in histogram {
                let _ = writeln!(out, "{:>11}  {}", bin.delay_minutes, bin.count);
            }
        }

        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
