//! Terminal outcomes of one mirroring attempt.

use vermeer_storage::StoredObject;

/// The pipeline stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Stage {
    /// Decode or re-encode failed
    #[display("optimize")]
    Optimize,
    /// Upload to owned storage failed
    #[display("upload")]
    Upload,
    /// Writing the new URL back to the document failed
    #[display("reference update")]
    ReferenceUpdate,
}

/// Terminal state of one image reference.
///
/// Skips are expected and recoverable; errors carry the causing message but
/// never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Mirrored, reference updated, old object cleaned up where owned
    Processed {
        /// The durable result
        stored: StoredObject,
        /// Whether the old own-bucket object was deleted
        old_deleted: bool,
        /// Source size in bytes
        original_size: usize,
        /// Stored size in bytes
        optimized_size: usize,
    },
    /// The URL already points at a content-addressed optimized object
    SkippedAlreadyOptimized,
    /// The URL is neither owned nor a known mirror candidate
    SkippedIrrelevant,
    /// The source could not be downloaded; skip, do not retry automatically
    SkippedDownloadFailed,
    /// A pipeline stage failed
    Errored {
        /// Which stage failed
        stage: Stage,
        /// The causing message
        message: String,
    },
}

impl MirrorOutcome {
    /// One-character status annotation for progress output.
    pub fn symbol(&self) -> &'static str {
        match self {
            MirrorOutcome::Processed { .. } => "✓",
            MirrorOutcome::SkippedAlreadyOptimized => "=",
            MirrorOutcome::SkippedIrrelevant => "·",
            MirrorOutcome::SkippedDownloadFailed => "○",
            MirrorOutcome::Errored { .. } => "✗",
        }
    }

    /// Is this any of the skip states?
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            MirrorOutcome::SkippedAlreadyOptimized
                | MirrorOutcome::SkippedIrrelevant
                | MirrorOutcome::SkippedDownloadFailed
        )
    }
}

impl std::fmt::Display for MirrorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MirrorOutcome::Processed {
                stored,
                original_size,
                optimized_size,
                ..
            } => write!(
                f,
                "mirrored to {} ({} -> {} bytes)",
                stored.public_url, original_size, optimized_size
            ),
            MirrorOutcome::SkippedAlreadyOptimized => write!(f, "already optimized"),
            MirrorOutcome::SkippedIrrelevant => write!(f, "not a mirror candidate"),
            MirrorOutcome::SkippedDownloadFailed => write!(f, "download failed"),
            MirrorOutcome::Errored { stage, message } => {
                write!(f, "{stage} failed: {message}")
            }
        }
    }
}
