//! Running statistics across one batch.

use crate::MirrorOutcome;

/// Counts and byte sums accumulated across a whole batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// References fully mirrored
    pub processed: usize,
    /// References skipped (already optimized, irrelevant, download failed)
    pub skipped: usize,
    /// References that hit a processing failure
    pub errored: usize,
    /// Sum of source sizes over processed references
    pub original_bytes: usize,
    /// Sum of stored sizes over processed references
    pub optimized_bytes: usize,
}

impl BatchStats {
    /// Fold one terminal outcome into the totals.
    pub fn record(&mut self, outcome: &MirrorOutcome) {
        match outcome {
            MirrorOutcome::Processed {
                original_size,
                optimized_size,
                ..
            } => {
                self.processed += 1;
                self.original_bytes += original_size;
                self.optimized_bytes += optimized_size;
            }
            MirrorOutcome::SkippedAlreadyOptimized
            | MirrorOutcome::SkippedIrrelevant
            | MirrorOutcome::SkippedDownloadFailed => self.skipped += 1,
            MirrorOutcome::Errored { .. } => self.errored += 1,
        }
    }

    /// Merge another batch into this one.
    pub fn merge(&mut self, other: &BatchStats) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.errored += other.errored;
        self.original_bytes += other.original_bytes;
        self.optimized_bytes += other.optimized_bytes;
    }

    /// Aggregate savings percentage, zero when nothing was processed.
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.optimized_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

impl std::fmt::Display for BatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "processed {}, skipped {}, errors {}; {} -> {} bytes ({:.1}% saved)",
            self.processed,
            self.skipped,
            self.errored,
            self.original_bytes,
            self.optimized_bytes,
            self.savings_percent()
        )
    }
}
