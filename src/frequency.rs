//! Frequency distribution of simulated delays
//!
//! Outcomes are rounded to whole minutes and counted. Counts only ever grow,
//! so after N successful records the counts always sum to N.

use crate::error::{EngineError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count of simulation iterations per rounded delay (minutes)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyDistribution {
    counts: BTreeMap<i64, u64>,
    total: u64,
}

impl FrequencyDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome, rounding half-to-even to the nearest minute.
    ///
    /// Non-finite outcomes are refused so a broken iteration can't masquerade
    /// as a real delay.
    pub fn record(&mut self, outcome: f64) -> Result<i64> {
        if !outcome.is_finite() {
            return Err(EngineError::NonFiniteOutcome(outcome));
        }
        let key = outcome.round_ties_even() as i64;
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
        Ok(key)
    }

    /// Fold another distribution's counts into this one
    pub fn merge(&mut self, other: FrequencyDistribution) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        self.total += other.total;
    }

    /// Number of recorded outcomes
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct rounded outcomes
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, value: i64) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Fraction of all recorded outcomes represented by `count`
    pub fn share(&self, count: u64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64
    }

    /// `(value, count)` pairs in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts.iter().map(|(&value, &count)| (value, count))
    }

    pub fn min_value(&self) -> Option<i64> {
        self.counts.keys().next().copied()
    }

    pub fn max_value(&self) -> Option<i64> {
        self.counts.keys().next_back().copied()
    }

    /// `(value, count)` pairs by count descending, ties by value ascending
    pub fn ranked(&self) -> Vec<(i64, u64)> {
        let mut ranked: Vec<(i64, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Most frequent value and its count; the smallest value wins ties
    pub fn mode(&self) -> Option<(i64, u64)> {
        self.ranked().first().copied()
    }
}
