//! Batch processor implementation.

use std::time::{Duration, Instant};

use crate::annotation::AnnotationProvider;
use crate::batch::stats::BatchStats;
use crate::error::SpliceError;
use crate::reference::SequenceProvider;
use crate::score::{Variant, VariantOutcome, VariantScorer};

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Callback frequency (call progress callback every N items).
    pub progress_interval: usize,
    /// Variants scored per chunk.
    pub chunk_size: usize,
    /// Score chunks on the rayon thread pool (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            progress_interval: 100,
            chunk_size: 1000,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback interval.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Set the number of variants scored per chunk.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Enable or disable parallel scoring.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Progress information for batch operations.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total items to process.
    pub total: usize,
    /// Items processed so far.
    pub processed: usize,
    /// Scored items so far.
    pub scored: usize,
    /// Skipped items so far.
    pub skipped: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Calculate completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }

    /// Calculate processing rate (items per second).
    ///
    /// Returns 0.0 if no time has elapsed yet.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }

    /// Estimate remaining time based on current rate.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let rate = self.items_per_second();
        if rate == 0.0 {
            return None;
        }
        let remaining_items = self.total.saturating_sub(self.processed);
        Some(Duration::from_secs_f64(remaining_items as f64 / rate))
    }
}

/// Result of a batch operation.
#[derive(Debug)]
pub struct BatchResult {
    /// One outcome per input, in input order.
    pub outcomes: Vec<VariantOutcome>,
    pub stats: BatchStats,
    /// Total processing time.
    pub duration: Duration,
}

/// Batch processor scoring variants through a [`VariantScorer`].
pub struct BatchProcessor<'s, 'a, S: ?Sized, A: ?Sized> {
    scorer: &'s VariantScorer<'a, S, A>,
    config: BatchConfig,
}

impl<'s, 'a, S, A> BatchProcessor<'s, 'a, S, A>
where
    S: SequenceProvider + Sync + ?Sized,
    A: AnnotationProvider + Sync + ?Sized,
{
    /// Create a new batch processor.
    pub fn new(scorer: &'s VariantScorer<'a, S, A>) -> Self {
        Self::with_config(scorer, BatchConfig::default())
    }

    /// Create a new batch processor with configuration.
    pub fn with_config(scorer: &'s VariantScorer<'a, S, A>, config: BatchConfig) -> Self {
        Self { scorer, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Score `(record, variant)` pairs.
    pub fn score(&self, variants: &[(usize, Variant)]) -> Result<BatchResult, SpliceError> {
        self.score_with_progress(variants, |_| {})
    }

    /// Score `(record, variant)` pairs with progress callback.
    ///
    /// Stops at the first fatal error.
    pub fn score_with_progress<F>(
        &self,
        variants: &[(usize, Variant)],
        mut progress_fn: F,
    ) -> Result<BatchResult, SpliceError>
    where
        F: FnMut(BatchProgress),
    {
        let start = Instant::now();
        let total = variants.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut stats = BatchStats::new();
        let mut last_reported = 0;

        for chunk in variants.chunks(self.config.chunk_size) {
            for outcome in self.score_chunk(chunk)? {
                stats.record(&outcome);
                outcomes.push(outcome);
            }

            let processed = outcomes.len();
            if processed / self.config.progress_interval > last_reported / self.config.progress_interval
                || processed == total
            {
                last_reported = processed;
                progress_fn(BatchProgress {
                    total,
                    processed,
                    scored: stats.scored,
                    skipped: stats.skipped_count(),
                    elapsed: start.elapsed(),
                });
            }
        }

        Ok(BatchResult {
            outcomes,
            stats,
            duration: start.elapsed(),
        })
    }

    /// Score one chunk, in input order.
    pub fn score_chunk(&self, chunk: &[(usize, Variant)]) -> Result<Vec<VariantOutcome>, SpliceError> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return crate::parallel::score_parallel(self.scorer, chunk)
                    .into_iter()
                    .collect();
            }
        }

        chunk
            .iter()
            .map(|(record, variant)| self.scorer.score(*record, variant))
            .collect()
    }
}
