//! Handlers for the mirror and classify commands.

use std::str::FromStr;
use tracing::info;
use vermeer_error::{ConfigError, VermeerResult};
use vermeer_mirror::{run_collection, BatchStats};
use vermeer_notion::{CollectionKind, CollectionSpec, NotionClient};
use vermeer_storage::{is_mirror_candidate, S3Storage, StorageConfig, UrlClassifier};

/// Mirror one named collection, or every configured one.
///
/// Storage credentials are required up front; collections without a
/// configured database id are skipped, never fatal.
pub async fn handle_mirror(collection: Option<&str>) -> VermeerResult<()> {
    // Fail fast on missing credentials, before any network call.
    let storage = S3Storage::new(StorageConfig::from_env()?);
    let notion = NotionClient::from_env()?;

    let specs: Vec<CollectionSpec> = match collection {
        Some(name) => {
            let kind = CollectionKind::from_str(name).map_err(|_| {
                ConfigError::new(format!("Unknown collection '{name}'"))
            })?;
            CollectionSpec::discover_one(kind).into_iter().collect()
        }
        None => CollectionSpec::discover(),
    };

    if specs.is_empty() {
        info!("No collections configured, nothing to do");
        return Ok(());
    }

    let mut totals = BatchStats::default();
    for spec in &specs {
        println!("==> {}", spec.kind);
        let stats = run_collection(&storage, &notion, spec).await?;
        println!("    {stats}");
        totals.merge(&stats);
    }

    if specs.len() > 1 {
        println!("all collections: {totals}");
    }
    Ok(())
}

/// Print the pipeline's view of one URL.
pub fn handle_classify(url: &str) -> VermeerResult<()> {
    let config = StorageConfig::from_env()?;
    let classifier = UrlClassifier::new(config.public_base.clone(), config.native_host());
    let class = classifier.classify(url);

    println!("own bucket:        {}", class.is_own_bucket);
    println!("already optimized: {}", class.is_already_optimized);
    println!("mirror candidate:  {}", is_mirror_candidate(url));
    Ok(())
}
