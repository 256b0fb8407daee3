//! Batch statistics.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ErrorCode;
use crate::score::VariantOutcome;

/// Counts of scored and skipped variants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Variants seen.
    pub total: usize,
    /// Variants with a score report.
    pub scored: usize,
    /// Skipped variants by skip code.
    pub skipped: BTreeMap<ErrorCode, usize>,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: &VariantOutcome) {
        self.total += 1;
        match outcome {
            VariantOutcome::Scored(_) => self.scored += 1,
            VariantOutcome::Skipped(skip) => *self.skipped.entry(skip.code()).or_default() += 1,
        }
    }

    /// Total number of skipped variants.
    pub fn skipped_count(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Add the counts of another batch.
    pub fn merge(&mut self, other: &BatchStats) {
        self.total += other.total;
        self.scored += other.scored;
        for (code, count) in &other.skipped {
            *self.skipped.entry(*code).or_default() += count;
        }
    }

    /// Scored variants as a percentage of all variants.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.scored as f64 / self.total as f64) * 100.0
        }
    }
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} variants: {} scored, {} skipped",
            self.total,
            self.scored,
            self.skipped_count()
        )?;
        if !self.skipped.is_empty() {
            let parts: Vec<String> = self
                .skipped
                .iter()
                .map(|(code, count)| format!("{} {}: {}", code, code.description(), count))
                .collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        Ok(())
    }
}
