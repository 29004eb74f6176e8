//! End-to-end orchestrator tests against in-memory backends.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use vermeer_error::{NotionError, NotionErrorKind, VermeerResult};
use vermeer_mirror::{
    mirror_reference, run_collection, scan_page, BatchStats, FieldKind, ImageReference,
    MirrorOutcome, Stage,
};
use vermeer_notion::{
    CollectionKind, CollectionSpec, ContentApi, Page, QuerySort, SortDirection,
};
use vermeer_storage::{
    content_hash, extension_for, RawAsset, StoredObject, UrlClass, UrlClassifier, ObjectStore,
};

const PUBLIC_BASE: &str = "https://photos.s3.us-east-1.amazonaws.com";
const NATIVE_HOST: &str = "photos.s3.us-east-1.amazonaws.com";

/// In-memory stand-in for the S3 gateway, counting API calls.
struct InMemoryStore {
    classifier: UrlClassifier,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    sources: Mutex<HashMap<String, Vec<u8>>>,
    download_calls: AtomicUsize,
    delete_api_calls: AtomicUsize,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            classifier: UrlClassifier::new(PUBLIC_BASE, NATIVE_HOST),
            objects: Mutex::new(HashMap::new()),
            sources: Mutex::new(HashMap::new()),
            download_calls: AtomicUsize::new(0),
            delete_api_calls: AtomicUsize::new(0),
        }
    }

    fn with_source(self, url: &str, bytes: Vec<u8>) -> Self {
        self.sources.lock().unwrap().insert(url.to_string(), bytes);
        self
    }

    fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryStore {
    async fn download(&self, url: &str) -> Option<RawAsset> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        let bytes = self.sources.lock().unwrap().get(url).cloned()?;
        Some(RawAsset::new(bytes, "image/png"))
    }

    async fn upload(
        &self,
        buffer: &[u8],
        namespace: &str,
        content_type: Option<&str>,
    ) -> VermeerResult<StoredObject> {
        let hash = content_hash(buffer);
        let key = format!("{namespace}/{hash}{}", extension_for(content_type));
        self.objects
            .lock()
            .unwrap()
            .insert(key.clone(), buffer.to_vec());
        Ok(StoredObject {
            public_url: format!("{PUBLIC_BASE}/{key}"),
            key,
            content_hash: hash,
            byte_size: buffer.len(),
        })
    }

    async fn delete(&self, url: &str) -> bool {
        let prefix = format!("{PUBLIC_BASE}/");
        let Some(key) = url.strip_prefix(&prefix) else {
            return false;
        };
        self.delete_api_calls.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().remove(key).is_some()
    }

    fn classify(&self, url: &str) -> UrlClass {
        self.classifier.classify(url)
    }
}

/// Content API fake recording every update it receives.
#[derive(Default)]
struct FakeContent {
    pages: Vec<Page>,
    updates: Mutex<Vec<(String, String, String)>>,
    fail_updates: bool,
}

impl FakeContent {
    fn updates(&self) -> Vec<(String, String, String)> {
        self.updates.lock().unwrap().clone()
    }

    fn record(&self, page_id: &str, field: &str, url: &str) -> VermeerResult<()> {
        if self.fail_updates {
            return Err(NotionError::new(NotionErrorKind::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
            .into());
        }
        self.updates
            .lock()
            .unwrap()
            .push((page_id.to_string(), field.to_string(), url.to_string()));
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentApi for FakeContent {
    async fn query_collection(
        &self,
        _database_id: &str,
        _sort: &QuerySort,
    ) -> VermeerResult<Vec<Page>> {
        Ok(self.pages.clone())
    }

    async fn update_page_icon(&self, page_id: &str, url: &str) -> VermeerResult<()> {
        self.record(page_id, "icon", url)
    }

    async fn update_icon_property(
        &self,
        page_id: &str,
        property: &str,
        url: &str,
    ) -> VermeerResult<()> {
        self.record(page_id, property, url)
    }

    async fn update_url_property(
        &self,
        page_id: &str,
        property: &str,
        url: &str,
    ) -> VermeerResult<()> {
        self.record(page_id, property, url)
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 2 % 256) as u8, (y * 3 % 256) as u8, 90])
    }));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn icon_reference(url: &str) -> ImageReference {
    ImageReference {
        source_url: url.to_string(),
        owner_page_id: "page-1".to_string(),
        field: FieldKind::PageIcon,
    }
}

fn stack_spec() -> CollectionSpec {
    CollectionSpec {
        kind: CollectionKind::Stack,
        database_id: "db-1".to_string(),
        sort: QuerySort::by_property("Name", SortDirection::Ascending),
        use_page_icon: true,
        icon_property: Some("Icon"),
        image_property: None,
    }
}

#[tokio::test]
async fn already_optimized_reference_issues_no_network_calls() {
    let store = InMemoryStore::new();
    let content = FakeContent::default();
    let url = format!("{PUBLIC_BASE}/notion-images/{}.png", "a".repeat(64));

    let outcome = mirror_reference(&store, &content, &icon_reference(&url)).await;

    assert_eq!(outcome, MirrorOutcome::SkippedAlreadyOptimized);
    assert_eq!(store.download_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.object_count(), 0);
    assert!(content.updates().is_empty());
}

#[tokio::test]
async fn notion_hosted_icon_is_mirrored_end_to_end() {
    let source = "https://prod-files-secure.s3.us-west-2.amazonaws.com/ws/icon.png";
    let store = InMemoryStore::new().with_source(source, png_bytes(100, 100));
    let content = FakeContent::default();

    let outcome = mirror_reference(&store, &content, &icon_reference(source)).await;

    let MirrorOutcome::Processed {
        stored,
        old_deleted,
        ..
    } = outcome
    else {
        panic!("expected Processed, got {outcome:?}");
    };

    // Key layout: notion-images/<64-hex>.png under the public base.
    let (namespace, file) = stored.key.split_once('/').unwrap();
    assert_eq!(namespace, "notion-images");
    let stem = file.strip_suffix(".png").unwrap();
    assert_eq!(stem.len(), 64);
    assert!(stem.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(stored.public_url, format!("{PUBLIC_BASE}/{}", stored.key));

    // Thumbnail profile: stored bytes decode to at most 80x80.
    let uploaded = store.object(&stored.key).unwrap();
    let decoded = image::load_from_memory(&uploaded).unwrap();
    assert!(decoded.width() <= 80 && decoded.height() <= 80);

    // Exactly one reference update, pointing the icon at the new URL.
    assert_eq!(
        content.updates(),
        vec![("page-1".to_string(), "icon".to_string(), stored.public_url.clone())]
    );

    // The foreign original stays untouched.
    assert!(!old_deleted);
    assert_eq!(store.delete_api_calls.load(Ordering::SeqCst), 0);

    // Re-running against the updated reference is a no-op skip.
    let rerun = mirror_reference(&store, &content, &icon_reference(&stored.public_url)).await;
    assert_eq!(rerun, MirrorOutcome::SkippedAlreadyOptimized);
}

#[tokio::test]
async fn own_bucket_original_is_deleted_after_update() {
    let source = format!("{PUBLIC_BASE}/uploads/old-avatar.png");
    let store = InMemoryStore::new().with_source(&source, png_bytes(120, 60));
    store
        .objects
        .lock()
        .unwrap()
        .insert("uploads/old-avatar.png".to_string(), vec![1, 2, 3]);
    let content = FakeContent::default();

    let outcome = mirror_reference(&store, &content, &icon_reference(&source)).await;

    let MirrorOutcome::Processed { old_deleted, .. } = outcome else {
        panic!("expected Processed, got {outcome:?}");
    };
    assert!(old_deleted);
    assert!(store.object("uploads/old-avatar.png").is_none());
}

#[tokio::test]
async fn unreachable_source_is_a_skip_not_an_error() {
    let store = InMemoryStore::new();
    let content = FakeContent::default();
    let reference = icon_reference("https://file.notion.so/f/gone.png");

    let outcome = mirror_reference(&store, &content, &reference).await;

    assert_eq!(outcome, MirrorOutcome::SkippedDownloadFailed);
    assert!(content.updates().is_empty());
}

#[tokio::test]
async fn foreign_non_notion_urls_are_irrelevant() {
    let store = InMemoryStore::new();
    let content = FakeContent::default();
    let reference = icon_reference("https://example.com/some/image.png");

    let outcome = mirror_reference(&store, &content, &reference).await;

    assert_eq!(outcome, MirrorOutcome::SkippedIrrelevant);
    assert_eq!(store.download_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn identical_bytes_land_on_one_object() {
    let bytes = png_bytes(40, 40);
    let first = "https://file.notion.so/f/one.png";
    let second = "https://file.notion.so/f/two.png";
    let store = InMemoryStore::new()
        .with_source(first, bytes.clone())
        .with_source(second, bytes);
    let content = FakeContent::default();

    let a = mirror_reference(&store, &content, &icon_reference(first)).await;
    let b = mirror_reference(&store, &content, &icon_reference(second)).await;

    let (MirrorOutcome::Processed { stored: sa, .. }, MirrorOutcome::Processed { stored: sb, .. }) =
        (a, b)
    else {
        panic!("expected both Processed");
    };
    assert_eq!(sa.key, sb.key);
    assert_eq!(sa.public_url, sb.public_url);
    assert_eq!(store.object_count(), 1);
}

#[tokio::test]
async fn update_failure_leaves_an_orphan_upload() {
    let source = "https://file.notion.so/f/icon.png";
    let store = InMemoryStore::new().with_source(source, png_bytes(64, 64));
    let content = FakeContent {
        fail_updates: true,
        ..FakeContent::default()
    };

    let outcome = mirror_reference(&store, &content, &icon_reference(source)).await;

    let MirrorOutcome::Errored { stage, .. } = outcome else {
        panic!("expected Errored, got {outcome:?}");
    };
    assert_eq!(stage, Stage::ReferenceUpdate);
    // The upload happened before the failure and stays behind.
    assert_eq!(store.object_count(), 1);
    assert_eq!(store.delete_api_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn garbage_source_bytes_are_an_optimize_error() {
    let source = "https://file.notion.so/f/not-an-image.png";
    let store = InMemoryStore::new().with_source(source, b"not an image at all".to_vec());
    let content = FakeContent::default();

    let outcome = mirror_reference(&store, &content, &icon_reference(source)).await;

    let MirrorOutcome::Errored { stage, .. } = outcome else {
        panic!("expected Errored, got {outcome:?}");
    };
    assert_eq!(stage, Stage::Optimize);
    assert_eq!(store.object_count(), 0);
}

fn page_with_icon(id: &str, url: &str) -> Page {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "icon": { "type": "external", "external": { "url": url } },
        "properties": {}
    }))
    .unwrap()
}

#[tokio::test]
async fn run_collection_accumulates_statistics_across_pages() {
    let mirrored_a = "https://file.notion.so/f/a.png";
    let mirrored_b = "https://file.notion.so/f/b.png";
    let optimized = format!("{PUBLIC_BASE}/notion-images/{}.png", "b".repeat(64));

    let store = InMemoryStore::new()
        .with_source(mirrored_a, png_bytes(90, 90))
        .with_source(mirrored_b, png_bytes(150, 150));
    let content = FakeContent {
        pages: vec![
            page_with_icon("page-a", mirrored_a),
            page_with_icon("page-b", mirrored_b),
            page_with_icon("page-c", &optimized),
        ],
        ..FakeContent::default()
    };

    let stats = run_collection(&store, &content, &stack_spec()).await.unwrap();

    assert_eq!(stats.processed, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.errored, 0);
    assert_eq!(content.updates().len(), 2);
    assert!(stats.original_bytes > 0);
}

#[test]
fn scan_order_is_icon_property_then_page_icon_then_image() {
    let spec = CollectionSpec {
        kind: CollectionKind::Stack,
        database_id: "db".to_string(),
        sort: QuerySort::by_property("Name", SortDirection::Ascending),
        use_page_icon: true,
        icon_property: Some("Icon"),
        image_property: Some("Artwork"),
    };
    let page: Page = serde_json::from_value(serde_json::json!({
        "id": "page-9",
        "icon": { "type": "external", "external": { "url": "https://x/page-icon.png" } },
        "properties": {
            "Icon": {
                "type": "files",
                "files": [
                    { "type": "external", "external": { "url": "https://x/prop-icon.png" } }
                ]
            },
            "Artwork": { "type": "url", "url": "https://x/artwork.png" }
        }
    }))
    .unwrap();

    let references = scan_page(&page, &spec);
    let fields: Vec<&FieldKind> = references.iter().map(|r| &r.field).collect();
    assert_eq!(
        fields,
        vec![
            &FieldKind::IconProperty("Icon".to_string()),
            &FieldKind::PageIcon,
            &FieldKind::UrlProperty("Artwork".to_string()),
        ]
    );
    assert_eq!(references[0].source_url, "https://x/prop-icon.png");
}

#[test]
fn emoji_icons_produce_no_references() {
    let page: Page = serde_json::from_value(serde_json::json!({
        "id": "page-0",
        "icon": { "type": "emoji", "emoji": "🔥" },
        "properties": {}
    }))
    .unwrap();

    assert!(scan_page(&page, &stack_spec()).is_empty());
}

#[test]
fn stats_display_mentions_savings() {
    let stats = BatchStats {
        processed: 2,
        skipped: 1,
        errored: 0,
        original_bytes: 300_000,
        optimized_bytes: 130_000,
    };
    let rendered = stats.to_string();
    assert!(rendered.contains("processed 2"));
    assert!(rendered.contains("56.7%"));
}
