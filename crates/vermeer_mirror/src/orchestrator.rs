//! The per-image mirroring workflow and the batch runner.

use crate::{BatchStats, FieldKind, ImageReference, MirrorOutcome, Stage, scan_page};
use tracing::{debug, info, instrument, warn};
use vermeer_image::{optimize, OptimizeOptions};
use vermeer_notion::{CollectionSpec, ContentApi};
use vermeer_storage::{is_mirror_candidate, ObjectStore, OPTIMIZED_NAMESPACE};
use vermeer_error::VermeerResult;

/// Pick the transform profile for a reference: icons get the thumbnail
/// profile, article imagery the full profile.
fn profile_for(field: &FieldKind) -> OptimizeOptions {
    match field {
        FieldKind::PageIcon | FieldKind::IconProperty(_) => OptimizeOptions::thumbnail(),
        FieldKind::UrlProperty(_) => OptimizeOptions::full_image(),
    }
}

/// Run the download → optimize → upload → reference-update → cleanup
/// sequence for one image reference.
///
/// Every failure is caught here and folded into the returned terminal
/// outcome; this function never aborts the batch. The reference update is
/// the last mutating step, so a failure before it never leaves the document
/// pointing at a missing object; a failure during it leaves an unreferenced
/// upload behind, which is an acceptable orphan.
#[instrument(skip(store, content), fields(page = %reference.owner_page_id, url = %reference.source_url))]
pub async fn mirror_reference<S, C>(
    store: &S,
    content: &C,
    reference: &ImageReference,
) -> MirrorOutcome
where
    S: ObjectStore + ?Sized,
    C: ContentApi + ?Sized,
{
    let class = store.classify(&reference.source_url);
    if class.is_already_optimized {
        debug!("Already optimized, nothing to do");
        return MirrorOutcome::SkippedAlreadyOptimized;
    }
    if !class.is_own_bucket && !is_mirror_candidate(&reference.source_url) {
        debug!("Not a mirror candidate");
        return MirrorOutcome::SkippedIrrelevant;
    }

    let Some(raw) = store.download(&reference.source_url).await else {
        return MirrorOutcome::SkippedDownloadFailed;
    };

    let optimized = match optimize(&raw.buffer, profile_for(&reference.field)) {
        Ok(optimized) => optimized,
        Err(e) => {
            return MirrorOutcome::Errored {
                stage: Stage::Optimize,
                message: e.to_string(),
            };
        }
    };

    let stored = match store
        .upload(
            &optimized.buffer,
            OPTIMIZED_NAMESPACE,
            Some(optimized.format.content_type()),
        )
        .await
    {
        Ok(stored) => stored,
        Err(e) => {
            return MirrorOutcome::Errored {
                stage: Stage::Upload,
                message: e.to_string(),
            };
        }
    };

    let update = match &reference.field {
        FieldKind::PageIcon => {
            content
                .update_page_icon(&reference.owner_page_id, &stored.public_url)
                .await
        }
        FieldKind::IconProperty(property) => {
            content
                .update_icon_property(&reference.owner_page_id, property, &stored.public_url)
                .await
        }
        FieldKind::UrlProperty(property) => {
            content
                .update_url_property(&reference.owner_page_id, property, &stored.public_url)
                .await
        }
    };
    if let Err(e) = update {
        return MirrorOutcome::Errored {
            stage: Stage::ReferenceUpdate,
            message: e.to_string(),
        };
    }

    // Best-effort cleanup, only after the reference points elsewhere and
    // only for objects in owned storage. Foreign originals stay put.
    let old_deleted = if store.classify(&reference.source_url).is_own_bucket {
        let deleted = store.delete(&reference.source_url).await;
        if !deleted {
            warn!(url = %reference.source_url, "Old object not deleted, leaving it stale");
        }
        deleted
    } else {
        false
    };

    MirrorOutcome::Processed {
        old_deleted,
        original_size: raw.byte_size,
        optimized_size: stored.byte_size,
        stored,
    }
}

/// Process every image reference in one collection, strictly sequentially
/// and in query order.
///
/// Per-reference failures become statistics; only the initial query can fail
/// the run.
#[instrument(skip(store, content, spec), fields(collection = %spec.kind))]
pub async fn run_collection<S, C>(
    store: &S,
    content: &C,
    spec: &CollectionSpec,
) -> VermeerResult<BatchStats>
where
    S: ObjectStore + ?Sized,
    C: ContentApi + ?Sized,
{
    let pages = content.query_collection(&spec.database_id, &spec.sort).await?;
    info!(pages = pages.len(), "Scanning collection");

    let mut stats = BatchStats::default();
    for page in &pages {
        for reference in scan_page(page, spec) {
            let outcome = mirror_reference(store, content, &reference).await;
            info!(
                "{} [{}] {}: {}",
                outcome.symbol(),
                reference.field,
                reference.source_url,
                outcome
            );
            stats.record(&outcome);
        }
    }

    info!(%stats, "Collection done");
    Ok(stats)
}
