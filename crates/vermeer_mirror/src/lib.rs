//! Mirroring orchestrator for Vermeer.
//!
//! Composes the storage gateway, the transform engine, and the content
//! client into the per-image workflow:
//!
//! ```text
//! classify -> download -> optimize -> upload -> update reference -> cleanup
//! ```
//!
//! Already-optimized references short-circuit before any network call, and
//! per-reference failures turn into batch statistics instead of aborting the
//! run. Cleanup of the old object is best-effort and only ever touches owned
//! storage.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;
mod outcome;
mod reference;
mod stats;

pub use orchestrator::{mirror_reference, run_collection};
pub use outcome::{MirrorOutcome, Stage};
pub use reference::{scan_page, FieldKind, ImageReference};
pub use stats::BatchStats;
