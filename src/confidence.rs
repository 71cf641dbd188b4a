//! Confidence range extraction
//!
//! Outcomes are ranked by count (descending, ties by ascending value) and
//! taken greedily until their combined share reaches the target certainty.
//! The range reported is the numeric min/max of the selected values, so for a
//! multimodal distribution it can span values that were never selected.

use crate::config::check_certainty;
use crate::error::{EngineError, Result};
use crate::frequency::FrequencyDistribution;
use serde::Serialize;
use tracing::debug;

/// Delay range together with the share of outcomes it captures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceRange {
    pub low: i64,
    pub high: i64,
    /// Achieved certainty, never below the requested one
    pub certainty: f64,
}

impl ConfidenceRange {
    pub fn is_single_point(&self) -> bool {
        self.low == self.high
    }
}

/// Narrowest greedy range whose share of outcomes meets `target_certainty`
pub fn range_for_certainty(
    distribution: &FrequencyDistribution,
    target_certainty: f64,
) -> Result<ConfidenceRange> {
    check_certainty(target_certainty)?;
    if distribution.is_empty() {
        return Err(EngineError::EmptyDistribution);
    }

    let ranked = distribution.ranked();
    let mut low = i64::MAX;
    let mut high = i64::MIN;
    let mut accumulated = 0u64;

    for (selected, (value, count)) in ranked.iter().enumerate() {
        low = low.min(*value);
        high = high.max(*value);
        accumulated += count;

        let certainty = distribution.share(accumulated);
        if certainty >= target_certainty {
            debug!(
                selected = selected + 1,
                distinct = ranked.len(),
                low,
                high,
                certainty,
                "confidence range found"
            );
            return Ok(ConfidenceRange {
                low,
                high,
                certainty,
            });
        }
    }

    // Every count taken sums to the total, i.e. a share of exactly 1.0
    Err(EngineError::Configuration(format!(
        "certainty {target_certainty} not reachable by the distribution"
    )))
}
